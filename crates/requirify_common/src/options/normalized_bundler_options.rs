use std::path::PathBuf;

use crate::{OutputFormat, Platform};

/// The slice of the host build's options the render-chunk hook depends on.
#[derive(Debug, Clone)]
pub struct NormalizedBundlerOptions {
  pub cwd: PathBuf,
  pub platform: Platform,
  pub format: OutputFormat,
  pub dir: Option<String>,
  pub file: Option<String>,
  pub sourcemap: bool,
}

impl NormalizedBundlerOptions {
  pub fn is_esm_format_with_node_platform(&self) -> bool {
    matches!(self.format, OutputFormat::Esm) && matches!(self.platform, Platform::Node)
  }
}
