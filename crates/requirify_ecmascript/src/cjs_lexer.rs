use oxc::{
  allocator::Allocator,
  ast::ast::{
    Argument, AssignmentExpression, AssignmentTarget, CallExpression, Expression, MetaProperty,
    ObjectPropertyKind, Statement,
  },
  ast_visit::{Visit, walk},
  parser::{ParseOptions, Parser},
  span::SourceType,
};
use requirify_utils::indexmap::FxIndexSet;

/// The statically visible export surface of a CommonJS module.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CjsExports {
  pub exports: FxIndexSet<String>,
  /// Specifiers whose exports are forwarded wholesale, e.g. `module.exports = require('x')`.
  pub reexports: FxIndexSet<String>,
}

/// Detects the named exports of a module written in CommonJS.
///
/// Implementations must fail when the text isn't recognizable as CommonJS, since a
/// successful parse is what lets a `.js` file of unknown type be treated as CommonJS.
pub trait ExportsLexer: Send + Sync {
  fn parse(&self, source: &str) -> anyhow::Result<CjsExports>;
}

/// An [ExportsLexer] backed by the oxc parser.
#[derive(Debug, Default)]
pub struct CjsLexer;

impl CjsLexer {
  pub async fn init() -> anyhow::Result<Self> {
    Ok(Self)
  }
}

impl ExportsLexer for CjsLexer {
  fn parse(&self, source: &str) -> anyhow::Result<CjsExports> {
    let allocator = Allocator::default();
    // Node runs CommonJS inside a function wrapper, so a top-level `return` is legal.
    let ret = Parser::new(&allocator, source, SourceType::cjs())
      .with_options(ParseOptions { allow_return_outside_function: true, ..Default::default() })
      .parse();
    if ret.panicked || !ret.errors.is_empty() {
      anyhow::bail!("Failed to parse as CommonJS: {:?}", ret.errors);
    }

    if let Some(stmt) = ret.program.body.iter().find(|stmt| stmt.is_module_declaration()) {
      let kind = if matches!(stmt, Statement::ImportDeclaration(_)) { "import" } else { "export" };
      anyhow::bail!("Unexpected {kind} statement in CJS module.");
    }

    let mut collector = ExportsCollector::default();
    collector.visit_program(&ret.program);
    if collector.has_import_meta {
      anyhow::bail!("Unexpected import.meta in CJS module.");
    }

    Ok(collector.exports)
  }
}

#[derive(Default)]
struct ExportsCollector {
  exports: CjsExports,
  has_import_meta: bool,
}

impl ExportsCollector {
  fn add_export(&mut self, name: &str) {
    self.exports.exports.insert(name.to_string());
  }

  fn add_reexport(&mut self, specifier: &str) {
    self.exports.reexports.insert(specifier.to_string());
  }

  /// `module.exports = { a, b: c, ...require('x') }` or `module.exports = require('x')`.
  fn collect_module_exports_value(&mut self, value: &Expression<'_>) {
    match value {
      Expression::ObjectExpression(obj) => {
        for prop in &obj.properties {
          match prop {
            ObjectPropertyKind::ObjectProperty(prop) => {
              if let Some(name) = prop.key.static_name() {
                self.add_export(&name);
              }
            }
            ObjectPropertyKind::SpreadProperty(spread) => {
              if let Some(specifier) = as_require_call(&spread.argument) {
                self.add_reexport(specifier);
              }
            }
          }
        }
      }
      _ => {
        if let Some(specifier) = as_require_call(value) {
          self.add_reexport(specifier);
        }
      }
    }
  }
}

impl<'a> Visit<'a> for ExportsCollector {
  fn visit_assignment_expression(&mut self, it: &AssignmentExpression<'a>) {
    match &it.left {
      AssignmentTarget::StaticMemberExpression(member) => {
        let property = member.property.name.as_str();
        if is_exports_object(&member.object) {
          self.add_export(property);
        } else if property == "exports" && is_identifier(&member.object, "module") {
          self.collect_module_exports_value(&it.right);
        }
      }
      AssignmentTarget::ComputedMemberExpression(member) => {
        if let Expression::StringLiteral(lit) = &member.expression {
          if is_exports_object(&member.object) {
            self.add_export(lit.value.as_str());
          } else if lit.value.as_str() == "exports" && is_identifier(&member.object, "module") {
            self.collect_module_exports_value(&it.right);
          }
        }
      }
      _ => {}
    }
    walk::walk_assignment_expression(self, it);
  }

  fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
    match &it.callee {
      // Object.defineProperty(exports, 'a', { .. })
      Expression::StaticMemberExpression(callee)
        if callee.property.name.as_str() == "defineProperty" && is_identifier(&callee.object, "Object") =>
      {
        if let [target, Argument::StringLiteral(name), ..] = it.arguments.as_slice() {
          if target.as_expression().is_some_and(is_exports_object) {
            self.add_export(name.value.as_str());
          }
        }
      }
      // __exportStar(require('x'), exports), emitted by tsc
      Expression::Identifier(callee) if matches!(callee.name.as_str(), "__exportStar" | "__export") => {
        if let Some(specifier) =
          it.arguments.first().and_then(Argument::as_expression).and_then(as_require_call)
        {
          self.add_reexport(specifier);
        }
      }
      _ => {}
    }
    walk::walk_call_expression(self, it);
  }

  fn visit_meta_property(&mut self, it: &MetaProperty<'a>) {
    if it.meta.name.as_str() == "import" {
      self.has_import_meta = true;
    }
  }
}

fn is_identifier(expr: &Expression<'_>, name: &str) -> bool {
  matches!(expr, Expression::Identifier(ident) if ident.name.as_str() == name)
}

/// `exports` or `module.exports`
fn is_exports_object(expr: &Expression<'_>) -> bool {
  match expr {
    Expression::Identifier(ident) => ident.name.as_str() == "exports",
    Expression::StaticMemberExpression(member) => {
      member.property.name.as_str() == "exports" && is_identifier(&member.object, "module")
    }
    _ => false,
  }
}

/// `require('x')` -> `x`
fn as_require_call<'e>(expr: &'e Expression<'_>) -> Option<&'e str> {
  let Expression::CallExpression(call) = expr else { return None };
  if !is_identifier(&call.callee, "require") {
    return None;
  }
  match call.arguments.as_slice() {
    [Argument::StringLiteral(lit)] => Some(lit.value.as_str()),
    _ => None,
  }
}
