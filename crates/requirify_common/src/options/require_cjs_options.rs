use std::{fmt::Debug, path::PathBuf, sync::Arc};

use futures::future::BoxFuture;
use serde::Deserialize;

use crate::HookOrder;

/// `(specifier, importer) -> Some(verdict)` to force a decision, `None` to fall back
/// to the built-in CommonJS detection.
pub type ShouldTransformFn =
  Arc<dyn Fn(&str, &str) -> BoxFuture<'static, Option<bool>> + Send + Sync>;

#[derive(Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RequireCjsOptions {
  /// Globs matched against chunk file names. Defaults to `**/*.js` and `**/*.mjs`.
  pub include: Option<Vec<String>>,
  pub exclude: Option<Vec<String>>,
  pub order: Option<HookOrder>,
  /// Rewrite imports of Node builtins to `process.getBuiltinModule()`.
  pub builtin_node_modules: Option<bool>,
  pub cwd: Option<PathBuf>,
  #[serde(skip)]
  pub should_transform: Option<ShouldTransformFn>,
}

impl Debug for RequireCjsOptions {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RequireCjsOptions")
      .field("include", &self.include)
      .field("exclude", &self.exclude)
      .field("order", &self.order)
      .field("builtin_node_modules", &self.builtin_node_modules)
      .field("cwd", &self.cwd)
      .field("should_transform", &self.should_transform.as_ref().map(|_| "Fn"))
      .finish()
  }
}

#[test]
fn deserialize_from_json() {
  let options: RequireCjsOptions = serde_json::from_str(
    r#"{ "include": ["dist/**/*.js"], "builtinNodeModules": true, "order": "pre" }"#,
  )
  .unwrap();
  assert_eq!(options.include.as_deref(), Some(&["dist/**/*.js".to_string()][..]));
  assert_eq!(options.builtin_node_modules, Some(true));
  assert_eq!(options.order, Some(HookOrder::Pre));
  assert!(options.exclude.is_none());
  assert!(options.should_transform.is_none());

  assert!(serde_json::from_str::<RequireCjsOptions>(r#"{ "unknown": 1 }"#).is_err());
}
