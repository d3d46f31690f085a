use std::path::PathBuf;

use clap::Args;

use crate::types::{output_format::OutputFormat, platform::Platform};

#[derive(Args)]
pub struct InputArgs {
  /// Emitted chunks to rewrite in place.
  #[clap(required = true)]
  pub files: Vec<PathBuf>,

  #[clap(long)]
  pub cwd: Option<PathBuf>,

  /// Output directory the chunks were written to. Chunk names are relative to it.
  #[clap(long, short = 'd')]
  pub dir: Option<String>,

  #[clap(long, short)]
  pub platform: Option<Platform>,

  #[clap(long)]
  pub format: Option<OutputFormat>,
}

#[derive(Args)]
pub struct RequireCjsArgs {
  /// JSON file with plugin options, overridden by the flags below.
  #[clap(long, short = 'c')]
  pub config: Option<PathBuf>,

  #[clap(long, action = clap::ArgAction::Append)]
  pub include: Option<Vec<String>>,

  #[clap(long, action = clap::ArgAction::Append)]
  pub exclude: Option<Vec<String>>,

  #[clap(long)]
  pub builtin_node_modules: Option<bool>,
}

#[derive(Args)]
pub struct OutputArgs {
  /// Also write `<file>.map` next to every rewritten chunk.
  #[clap(long, short = 's')]
  pub sourcemap: bool,

  #[clap(long)]
  pub silent: bool,
}
