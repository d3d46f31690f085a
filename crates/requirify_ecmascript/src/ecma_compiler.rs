use arcstr::ArcStr;
use oxc::{parser::Parser, span::SourceType};
use requirify_error::BuildResult;

use crate::ecma_ast::{
  EcmaAst,
  program_cell::{ProgramCell, ProgramCellDependent, ProgramCellOwner},
};

pub struct EcmaCompiler;

impl EcmaCompiler {
  pub fn parse(source: impl Into<ArcStr>, source_type: SourceType) -> BuildResult<EcmaAst> {
    let allocator = oxc::allocator::Allocator::default();
    let owner = ProgramCellOwner { source: source.into(), allocator };
    let program = ProgramCell::try_new(owner, |owner| {
      let ret = Parser::new(&owner.allocator, &owner.source, source_type).parse();
      if ret.errors.is_empty() && !ret.panicked {
        Ok(ProgramCellDependent { program: ret.program })
      } else {
        Err(anyhow::anyhow!("{:?}", ret.errors))
      }
    })?;

    Ok(EcmaAst { program })
  }
}

#[test]
fn basic_test() {
  let ast = EcmaCompiler::parse("import a from 'a';\nconst b = a;", SourceType::mjs()).unwrap();
  assert_eq!(ast.program().body.len(), 2);
  assert_eq!(ast.source().as_str(), "import a from 'a';\nconst b = a;");
  assert!(EcmaCompiler::parse("const = ;", SourceType::mjs()).is_err());
}
