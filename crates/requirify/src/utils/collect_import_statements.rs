use oxc::ast::ast::{ImportDeclaration, ImportDeclarationSpecifier, Program, Statement};
use requirify_common::{ImportBinding, ImportStatement};

/// Lifts every top-level `import` declaration out of `program`, in source order.
/// Imports nested in other statements can't exist, and dynamic `import()` is left alone.
pub fn collect_import_statements(program: &Program) -> Vec<ImportStatement> {
  program
    .body
    .iter()
    .filter_map(|stmt| match stmt {
      Statement::ImportDeclaration(decl) => Some(to_import_statement(decl)),
      _ => None,
    })
    .collect()
}

fn to_import_statement(decl: &ImportDeclaration) -> ImportStatement {
  let bindings = decl
    .specifiers
    .iter()
    .flatten()
    .map(|specifier| match specifier {
      ImportDeclarationSpecifier::ImportSpecifier(spec) => ImportBinding::Named {
        imported: spec.imported.name().to_string(),
        local: spec.local.name.to_string(),
        is_type: spec.import_kind.is_type(),
      },
      ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
        ImportBinding::Default { local: spec.local.name.to_string() }
      }
      ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
        ImportBinding::Namespace { local: spec.local.name.to_string() }
      }
    })
    .collect();

  ImportStatement {
    span: decl.span,
    source: decl.source.value.to_string(),
    is_type: decl.import_kind.is_type(),
    bindings,
  }
}
