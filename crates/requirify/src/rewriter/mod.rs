mod transform_state;

use itertools::Itertools;
use requirify_common::{ImportStatement, is_process_module};
use requirify_utils::{
  concat_string,
  ecmascript::{to_property_key, to_string_literal},
};

pub use self::transform_state::TransformState;

/// Name of the function the preamble defines and rewritten imports call.
pub const REQUIRE_FN: &str = "__cjs_require";

/// How the value of a rewritten import is obtained at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequireTarget {
  /// `globalThis.process`
  Process,
  /// `globalThis.process.getBuiltinModule("fs")`
  Builtin(String),
  /// `__cjs_require("x")`
  Require(String),
}

impl RequireTarget {
  pub fn new(specifier: &str, is_builtin: bool) -> Self {
    if !is_builtin {
      Self::Require(specifier.to_string())
    } else if is_process_module(specifier) {
      Self::Process
    } else {
      Self::Builtin(specifier.to_string())
    }
  }

  pub fn uses_require(&self) -> bool {
    matches!(self, Self::Require(_))
  }

  pub fn to_expression(&self) -> String {
    match self {
      Self::Process => "globalThis.process".to_string(),
      Self::Builtin(specifier) => {
        concat_string!("globalThis.process.getBuiltinModule(", to_string_literal(specifier), ")")
      }
      Self::Require(specifier) => concat_string!(REQUIRE_FN, "(", to_string_literal(specifier), ")"),
    }
  }
}

/// The `const` bindings that stand in for an import with specifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingShim {
  pub target: RequireTarget,
  /// Explicit default binding, or one synthesized for a namespace import.
  pub default: Option<String>,
  pub namespace: Option<String>,
  /// `(imported, local)` pairs.
  pub named: Vec<(String, String)>,
}

impl BindingShim {
  pub fn new(stmt: &ImportStatement, target: RequireTarget) -> Self {
    let namespace = stmt.namespace().map(ToString::to_string);
    let default = stmt
      .default()
      .map(ToString::to_string)
      .or_else(|| namespace.as_deref().map(|ns| concat_string!("__cjs_", ns, "_default")));
    let named =
      stmt.named().map(|(imported, local)| (imported.to_string(), local.to_string())).collect();
    Self { target, default, namespace, named }
  }

  pub fn render(&self) -> String {
    let expression = self.target.to_expression();
    let mut lines = Vec::with_capacity(3);

    if let Some(default) = &self.default {
      lines.push(concat_string!("const ", default, " = ", expression, ";"));
    }

    if let (Some(namespace), Some(default)) = (&self.namespace, &self.default) {
      lines.push(concat_string!(
        "const ",
        namespace,
        " = { ...",
        default,
        ", default: ",
        default,
        " };"
      ));
    }

    if !self.named.is_empty() {
      let pattern = self
        .named
        .iter()
        .map(|(imported, local)| {
          if imported == local { local.clone() } else { concat_string!(to_property_key(imported), ": ", local) }
        })
        .join(", ");
      let source = self.default.as_deref().unwrap_or(&expression);
      lines.push(concat_string!("const { ", pattern, " } = ", source, ";"));
    }

    lines.join("\n")
  }
}

/// What happens to one import declaration that is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewritePlan {
  /// Drop a side-effect import of a builtin.
  Remove,
  /// `import 'x'` -> `__cjs_require("x");`
  BareRequire { specifier: String },
  Bindings(BindingShim),
}

impl RewritePlan {
  pub fn uses_require(&self) -> bool {
    match self {
      Self::Remove => false,
      Self::BareRequire { .. } => true,
      Self::Bindings(shim) => shim.target.uses_require(),
    }
  }

  /// Replacement text for the declaration's span. `None` removes it.
  pub fn render(&self) -> Option<String> {
    match self {
      Self::Remove => None,
      Self::BareRequire { specifier } => {
        Some(RequireTarget::Require(specifier.clone()).to_expression() + ";")
      }
      Self::Bindings(shim) => Some(shim.render()),
    }
  }
}
