use std::{fmt::Debug, path::PathBuf};

use crate::{HookOrder, ShouldTransformFn};

pub struct NormalizedRequireCjsOptions {
  pub include: Vec<String>,
  pub exclude: Vec<String>,
  pub order: HookOrder,
  pub builtin_node_modules: bool,
  pub cwd: Option<PathBuf>,
  pub should_transform: Option<ShouldTransformFn>,
}

impl NormalizedRequireCjsOptions {
  /// Whether the chunk with `file_name` passes the include/exclude filter.
  pub fn is_included(&self, file_name: &str) -> bool {
    let file_name = file_name.trim_start_matches("./");
    if self.exclude.iter().any(|glob| fast_glob::glob_match(glob, file_name)) {
      return false;
    }
    self.include.iter().any(|glob| fast_glob::glob_match(glob, file_name))
  }

  /// Asks the user-supplied predicate, if any.
  pub async fn should_transform(&self, specifier: &str, importer: &str) -> Option<bool> {
    match &self.should_transform {
      Some(func) => func(specifier, importer).await,
      None => None,
    }
  }
}

impl Debug for NormalizedRequireCjsOptions {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NormalizedRequireCjsOptions")
      .field("include", &self.include)
      .field("exclude", &self.exclude)
      .field("order", &self.order)
      .field("builtin_node_modules", &self.builtin_node_modules)
      .field("cwd", &self.cwd)
      .finish_non_exhaustive()
  }
}
