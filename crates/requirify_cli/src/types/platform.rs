use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum Platform {
  Node,
  Browser,
  Neutral,
}

impl From<Platform> for requirify::Platform {
  fn from(value: Platform) -> Self {
    match value {
      Platform::Node => requirify::Platform::Node,
      Platform::Browser => requirify::Platform::Browser,
      Platform::Neutral => requirify::Platform::Neutral,
    }
  }
}
