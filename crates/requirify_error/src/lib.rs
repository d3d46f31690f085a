mod config_error;

use std::ops::{Deref, DerefMut};

pub use crate::config_error::ConfigError;

/// Errors that abort the build. Per-module failures never end up here, they are
/// folded into a "leave the import alone" decision by the classifier.
#[derive(Debug)]
pub struct BuildError(pub Vec<anyhow::Error>);

impl BuildError {
  pub fn is_config_error(&self) -> bool {
    self.0.iter().any(|err| err.downcast_ref::<ConfigError>().is_some())
  }
}

impl Deref for BuildError {
  type Target = Vec<anyhow::Error>;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl DerefMut for BuildError {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.0
  }
}

impl From<anyhow::Error> for BuildError {
  fn from(error: anyhow::Error) -> Self {
    Self(vec![error])
  }
}

impl From<Vec<anyhow::Error>> for BuildError {
  fn from(errors: Vec<anyhow::Error>) -> Self {
    Self(errors)
  }
}

impl From<ConfigError> for BuildError {
  fn from(error: ConfigError) -> Self {
    Self(vec![error.into()])
  }
}

pub type BuildResult<T> = anyhow::Result<T, BuildError>;

#[test]
fn config_errors_are_detectable() {
  let err = BuildError::from(ConfigError::UnsupportedFormat { format: "cjs".to_string() });
  assert!(err.is_config_error());
  assert!(!BuildError::from(anyhow::anyhow!("boom")).is_config_error());
}
