use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum OutputFormat {
  Esm,
  Cjs,
  Iife,
}

impl From<OutputFormat> for requirify::OutputFormat {
  fn from(value: OutputFormat) -> Self {
    match value {
      OutputFormat::Esm => requirify::OutputFormat::Esm,
      OutputFormat::Cjs => requirify::OutputFormat::Cjs,
      OutputFormat::Iife => requirify::OutputFormat::Iife,
    }
  }
}
