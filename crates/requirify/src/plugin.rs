use std::{
  borrow::Cow,
  path::{Path, PathBuf},
  sync::Arc,
};

use futures::future::join_all;
use oxc::span::SourceType;
use requirify_common::{
  HookOrder, ImportStatement, NormalizedBundlerOptions, NormalizedRequireCjsOptions,
  RenderChunkArgs, RenderChunkOutput, RenderedChunk, RequireCjsOptions, is_builtin_module,
};
use requirify_ecmascript::EcmaCompiler;
use requirify_error::{BuildResult, ConfigError};
use requirify_fs::OsFileSystem;
use requirify_resolver::Resolver;
use requirify_utils::path_ext::PathExt;

use crate::{
  classifier::CjsClassifier,
  rewriter::{BindingShim, RequireTarget, RewritePlan, TransformState},
  utils::{
    collect_import_statements::collect_import_statements, normalize_options::normalize_options,
  },
};

/// Rewrites `import` declarations of CommonJS modules in ESM output into `require` calls.
pub struct RequireCjsPlugin {
  options: NormalizedRequireCjsOptions,
  bundler_options: Arc<NormalizedBundlerOptions>,
  classifier: CjsClassifier,
}

impl RequireCjsPlugin {
  pub fn new(options: RequireCjsOptions, bundler_options: Arc<NormalizedBundlerOptions>) -> Self {
    let options = normalize_options(options);
    let cwd = options.cwd.clone().unwrap_or_else(|| bundler_options.cwd.clone());
    let resolver = Arc::new(Resolver::new(bundler_options.platform, cwd, OsFileSystem));
    Self { options, bundler_options, classifier: CjsClassifier::new(resolver) }
  }

  pub fn name(&self) -> Cow<'static, str> {
    Cow::Borrowed("requirify:require-cjs")
  }

  pub fn render_chunk_order(&self) -> HookOrder {
    self.options.order
  }

  /// Rejects builds the rewrite can't be correct for. Runs once before any chunk is rendered.
  pub fn render_start(&self) -> BuildResult<()> {
    let options = &self.bundler_options;
    if !options.is_esm_format_with_node_platform() {
      let err = if options.format.keep_esm_import_export_syntax() {
        ConfigError::UnsupportedPlatform { platform: options.platform.to_string() }
      } else {
        ConfigError::UnsupportedFormat { format: options.format.to_string() }
      };
      return Err(err.into());
    }
    Ok(())
  }

  pub async fn render_chunk(&self, args: &RenderChunkArgs) -> BuildResult<Option<RenderChunkOutput>> {
    let file_name = args.chunk.file_name.as_str();
    if !self.options.is_included(file_name) {
      return Ok(None);
    }

    let source_type =
      SourceType::from_path(file_name).unwrap_or_else(|_| SourceType::mjs()).with_module(true);
    let statements = {
      let ast = EcmaCompiler::parse(args.code.clone(), source_type)?;
      collect_import_statements(ast.program())
    };
    if statements.is_empty() {
      return Ok(None);
    }

    let importer_path = self.importer_path(&args.chunk);
    let importer = importer_path.to_string_lossy();

    let plans =
      join_all(statements.iter().map(|stmt| self.plan_statement(stmt, &importer, &importer_path)))
        .await;

    let mut state = TransformState::new(&args.code);
    for (stmt, plan) in statements.iter().zip(plans) {
      if let Some(plan) = plan {
        tracing::debug!(file_name, specifier = %stmt.source, ?plan, "rewriting import");
        state.apply(stmt, &plan);
      }
    }

    if !state.changed() {
      return Ok(None);
    }
    if state.using_require() {
      state.insert_preamble(self.options.builtin_node_modules);
    }

    Ok(Some(state.finish(file_name, self.bundler_options.sourcemap)))
  }

  /// Where the chunk will live on disk, since that's what its imports resolve against.
  pub fn importer_path(&self, chunk: &RenderedChunk) -> PathBuf {
    let options = &self.bundler_options;
    let path = match (&options.file, &options.dir) {
      (Some(file), _) => PathBuf::from(file),
      (None, Some(dir)) => Path::new(dir).join(chunk.file_name.as_str()),
      (None, None) => PathBuf::from(chunk.file_name.as_str()),
    };
    let cwd = self.options.cwd.as_deref().unwrap_or(&options.cwd);
    path.absolutize_from(cwd)
  }

  /// `None` leaves the declaration untouched.
  async fn plan_statement(
    &self,
    stmt: &ImportStatement,
    importer: &str,
    importer_path: &Path,
  ) -> Option<RewritePlan> {
    if stmt.is_type {
      return None;
    }

    let specifier = stmt.source.as_str();
    let is_builtin = is_builtin_module(specifier);

    if stmt.is_side_effect_only() {
      // Builtins are free of side effects, so there is nothing to keep.
      if is_builtin {
        return Some(RewritePlan::Remove);
      }
      return self
        .should_transform(specifier, importer, importer_path)
        .await
        .then(|| RewritePlan::BareRequire { specifier: specifier.to_string() });
    }

    let verdict = match self.options.should_transform(specifier, importer).await {
      Some(verdict) => verdict,
      None if is_builtin => self.options.builtin_node_modules,
      None => self.classifier.is_pure_cjs(specifier, importer_path).await,
    };

    verdict.then(|| RewritePlan::Bindings(BindingShim::new(stmt, RequireTarget::new(specifier, is_builtin))))
  }

  async fn should_transform(&self, specifier: &str, importer: &str, importer_path: &Path) -> bool {
    match self.options.should_transform(specifier, importer).await {
      Some(verdict) => verdict,
      None => self.classifier.is_pure_cjs(specifier, importer_path).await,
    }
  }
}
