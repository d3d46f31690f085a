mod args;
mod tracing_config;
mod types;

use std::{
  path::{Path, PathBuf},
  process::ExitCode,
  sync::Arc,
  time::Instant,
};

use ansi_term::Colour;
use anyhow::Context;
use args::{InputArgs, OutputArgs, RequireCjsArgs};
use clap::Parser;

use requirify::{
  BuildError, BuildResult, NormalizedBundlerOptions, OutputFormat, Platform, RenderChunkArgs,
  RenderedChunk, RequireCjsOptions, RequireCjsPlugin,
};
use requirify_utils::path_ext::PathExt;

#[derive(Parser)]
#[command(version, about = "Load CommonJS dependencies of ESM output with `require`", long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  require_cjs: RequireCjsArgs,

  #[clap(flatten)]
  output: OutputArgs,
}

struct ChunkReport {
  file_name: String,
  size: usize,
  rewritten: bool,
}

async fn load_options(args: RequireCjsArgs) -> anyhow::Result<RequireCjsOptions> {
  let mut options = match &args.config {
    Some(path) => {
      let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config {}", path.display()))?;
      serde_json::from_str::<RequireCjsOptions>(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?
    }
    None => RequireCjsOptions::default(),
  };

  if args.include.is_some() {
    options.include = args.include;
  }
  if args.exclude.is_some() {
    options.exclude = args.exclude;
  }
  if args.builtin_node_modules.is_some() {
    options.builtin_node_modules = args.builtin_node_modules;
  }
  Ok(options)
}

/// Chunk names are slash-separated and relative to the output directory, like a bundler's.
fn chunk_file_name(file: &Path, dir: &Path) -> String {
  file.strip_prefix(dir).unwrap_or(file).to_slash_string()
}

async fn rewrite_file(
  plugin: &RequireCjsPlugin,
  file: &Path,
  dir: &Path,
  sourcemap: bool,
) -> BuildResult<ChunkReport> {
  let file_name = chunk_file_name(file, dir);
  let code = tokio::fs::read_to_string(file)
    .await
    .with_context(|| format!("Failed to read {}", file.display()))?;

  let args = RenderChunkArgs {
    code: code.into(),
    chunk: RenderedChunk { file_name: file_name.as_str().into() },
  };
  let output = plugin.render_chunk(&args).await?;

  let Some(output) = output else {
    return Ok(ChunkReport { file_name, size: args.code.len(), rewritten: false });
  };

  tokio::fs::write(file, &output.code)
    .await
    .with_context(|| format!("Failed to write {}", file.display()))?;
  if sourcemap {
    if let Some(map) = &output.map {
      let mut map_path = file.as_os_str().to_owned();
      map_path.push(".map");
      tokio::fs::write(PathBuf::from(map_path), map)
        .await
        .with_context(|| format!("Failed to write source map for {}", file.display()))?;
    }
  }

  Ok(ChunkReport { file_name, size: output.code.len(), rewritten: true })
}

async fn run(args: Commands) -> BuildResult<Vec<ChunkReport>> {
  let InputArgs { files, cwd, dir, platform, format } = args.input;
  let cwd = match cwd {
    Some(cwd) => cwd,
    None => std::env::current_dir().context("Failed to read the current directory")?,
  };
  let dir = dir.unwrap_or_else(|| ".".to_string());
  let dir_path = Path::new(&dir).absolutize_from(&cwd);

  let bundler_options = Arc::new(NormalizedBundlerOptions {
    cwd: cwd.clone(),
    platform: platform.map_or(Platform::Node, Into::into),
    format: format.map_or(OutputFormat::Esm, Into::into),
    dir: Some(dir),
    file: None,
    sourcemap: args.output.sourcemap,
  });

  let options = load_options(args.require_cjs).await?;
  tracing::debug!(?options, "loaded options");
  let plugin = RequireCjsPlugin::new(options, bundler_options);
  plugin.render_start()?;

  let mut reports = Vec::with_capacity(files.len());
  let mut errors = vec![];
  for file in files {
    let file = file.absolutize_from(&cwd);
    match rewrite_file(&plugin, &file, &dir_path, args.output.sourcemap).await {
      Ok(report) => reports.push(report),
      Err(err) => {
        let file = file.display().to_string();
        errors.extend(err.0.into_iter().map(|err| err.context(format!("Failed to rewrite {file}"))));
      }
    }
  }

  if errors.is_empty() { Ok(reports) } else { Err(BuildError::from(errors)) }
}

#[allow(clippy::cast_precision_loss)]
fn print_reports(reports: &[ChunkReport]) {
  let left = reports.iter().map(|report| report.file_name.len()).max().unwrap_or(0);
  let sizes =
    reports.iter().map(|report| format!("{:.2}", report.size as f64 / 1024.0)).collect::<Vec<_>>();
  let right = sizes.iter().map(String::len).max().unwrap_or(0);

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (report, size) in reports.iter().zip(sizes) {
    let status = if report.rewritten { "rewritten" } else { "unchanged" };
    println!(
      "{}{}{:left$} {}{}{:right$}{} kB",
      dim.paint("<DIR>/"),
      color.paint(report.file_name.as_str()),
      "",
      dim.paint(format!("{status:9}")),
      dim.paint(" │ size: "),
      "",
      size,
      left = left - report.file_name.len(),
      right = right - size.len()
    );
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  tracing_config::init_tracing();

  let args = Commands::parse();
  let silent = args.output.silent;

  let start = Instant::now();
  match run(args).await {
    Ok(reports) => {
      if !silent {
        print_reports(&reports);
        let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
        println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
      }
      ExitCode::SUCCESS
    }
    Err(errors) => {
      for error in errors.iter() {
        eprintln!("{} {:#}", Colour::Red.paint("Error:"), error);
      }
      if errors.is_config_error() { ExitCode::from(2) } else { ExitCode::FAILURE }
    }
  }
}
