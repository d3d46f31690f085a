mod cjs_lexer;
mod ecma_ast;
mod ecma_compiler;

pub use crate::{
  cjs_lexer::{CjsExports, CjsLexer, ExportsLexer},
  ecma_ast::EcmaAst,
  ecma_compiler::EcmaCompiler,
};
