mod classifier;
mod plugin;
mod rewriter;
mod utils;

pub use crate::{
  classifier::{CjsClassifier, LexerFactory},
  plugin::RequireCjsPlugin,
  rewriter::{BindingShim, RequireTarget, RewritePlan, TransformState},
  utils::{
    collect_import_statements::collect_import_statements, normalize_options::normalize_options,
  },
};
pub use requirify_common::*;
pub use requirify_error::{BuildError, BuildResult, ConfigError};
