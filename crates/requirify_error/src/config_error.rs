use std::fmt::Display;

/// Misconfigurations of the surrounding build that make the rewrite meaningless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  UnsupportedPlatform { platform: String },
  UnsupportedFormat { format: String },
}

impl Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::UnsupportedPlatform { platform } => write!(
        f,
        "`require-cjs` only works with the `node` platform, but the build targets `{platform}`."
      ),
      Self::UnsupportedFormat { format } => {
        write!(f, "`require-cjs` only works with `esm` output, but the output format is `{format}`.")
      }
    }
  }
}

impl std::error::Error for ConfigError {}
