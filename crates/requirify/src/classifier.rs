use std::{path::Path, sync::Arc};

use futures::{FutureExt, future::BoxFuture};
use requirify_common::{PackageType, is_builtin_module};
use requirify_ecmascript::{CjsLexer, ExportsLexer};
use requirify_fs::{FileSystem, OsFileSystem};
use requirify_resolver::{ResolveKind, Resolver};
use tokio::sync::OnceCell;

/// Creates the export lexer the first time content inspection is needed.
pub type LexerFactory =
  Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<Arc<dyn ExportsLexer>>> + Send + Sync>;

/// Decides whether an import target can be loaded with `require` without changing which
/// file is loaded or what it exports.
pub struct CjsClassifier<F: FileSystem = OsFileSystem> {
  resolver: Arc<Resolver<F>>,
  lexer: OnceCell<Arc<dyn ExportsLexer>>,
  lexer_factory: LexerFactory,
}

impl<F: FileSystem> CjsClassifier<F> {
  pub fn new(resolver: Arc<Resolver<F>>) -> Self {
    let lexer_factory: LexerFactory = Arc::new(|| {
      async { CjsLexer::init().await.map(|lexer| Arc::new(lexer) as Arc<dyn ExportsLexer>) }.boxed()
    });
    Self { resolver, lexer: OnceCell::new(), lexer_factory }
  }

  #[must_use]
  pub fn with_lexer_factory(mut self, lexer_factory: LexerFactory) -> Self {
    self.lexer_factory = lexer_factory;
    self
  }

  /// Concurrent first callers wait on the same initialization.
  async fn lexer(&self) -> anyhow::Result<&Arc<dyn ExportsLexer>> {
    self.lexer.get_or_try_init(|| (self.lexer_factory)()).await
  }

  /// `true` only when `specifier`, imported from `importer`, provably is a CommonJS module.
  /// Anything that can't be proven, including every failure along the way, is `false`.
  pub async fn is_pure_cjs(&self, specifier: &str, importer: &Path) -> bool {
    // Builtins have their own rewrite path and never reach content inspection.
    if is_builtin_module(specifier) {
      return false;
    }

    match self.classify(specifier, importer).await {
      Ok(is_cjs) => {
        tracing::trace!(specifier, importer = %importer.display(), is_cjs, "classified");
        is_cjs
      }
      Err(err) => {
        tracing::trace!(specifier, importer = %importer.display(), %err, "not provably CommonJS");
        false
      }
    }
  }

  async fn classify(&self, specifier: &str, importer: &Path) -> anyhow::Result<bool> {
    let fs = self.resolver.fs();

    let import = self.resolver.resolve(importer, specifier, ResolveKind::Import)?;
    if !import.is_plain_file() || !fs.is_file(&import.path) {
      return Ok(false);
    }

    let require = self.resolver.resolve(importer, specifier, ResolveKind::Require)?;
    if import.path != require.path {
      tracing::trace!(
        specifier,
        import = %import.path.display(),
        require = %require.path.display(),
        "import and require resolve to different files"
      );
      return Ok(false);
    }

    let path = import.path;
    match path.extension().and_then(|ext| ext.to_str()) {
      Some("cjs") => Ok(true),
      Some("js") => {
        match self.resolver.nearest_package_json(&path).and_then(|pkg| pkg.package_type()) {
          Some(PackageType::Module) => Ok(false),
          Some(PackageType::CommonJs) => Ok(true),
          None => {
            let source = fs.read_to_string(&path)?;
            let exports = self.lexer().await?.parse(&source)?;
            tracing::trace!(
              path = %path.display(),
              exports = exports.exports.len(),
              reexports = exports.reexports.len(),
              "detected CommonJS exports"
            );
            Ok(true)
          }
        }
      }
      _ => Ok(false),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
  };

  use requirify_common::Platform;

  use super::*;

  fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  fn setup() -> (tempfile::TempDir, PathBuf, CjsClassifier) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    write(&root, "package.json", r#"{ "name": "app", "type": "module" }"#);
    write(&root, "dist/index.js", "");

    write(&root, "node_modules/dot-cjs/package.json", r#"{ "main": "index.cjs" }"#);
    write(&root, "node_modules/dot-cjs/index.cjs", "exports.a = 1;");

    write(&root, "node_modules/typed-cjs/package.json", r#"{ "type": "commonjs", "main": "index.js" }"#);
    write(&root, "node_modules/typed-cjs/index.js", "export const looksLikeEsm = 1;");

    write(&root, "node_modules/typed-esm/package.json", r#"{ "type": "module", "main": "index.js" }"#);
    write(&root, "node_modules/typed-esm/index.js", "exports.a = 1;");

    write(&root, "node_modules/untyped-cjs/package.json", r#"{ "main": "index.js" }"#);
    write(&root, "node_modules/untyped-cjs/index.js", "module.exports = { a: 1 };");

    write(&root, "node_modules/untyped-esm/package.json", r#"{ "main": "index.js" }"#);
    write(&root, "node_modules/untyped-esm/index.js", "export default 1;");

    write(&root, "node_modules/dual/package.json", r#"{ "exports": { "import": "./esm.cjs", "require": "./cjs.cjs" } }"#);
    write(&root, "node_modules/dual/esm.cjs", "exports.a = 1;");
    write(&root, "node_modules/dual/cjs.cjs", "exports.a = 1;");

    write(&root, "node_modules/early-return/package.json", r#"{ "main": "index.js" }"#);
    write(
      &root,
      "node_modules/early-return/index.js",
      "if (typeof window !== 'undefined') return;\nmodule.exports = { a: 1 };",
    );

    write(&root, "node_modules/mjs/package.json", r#"{ "main": "index.mjs" }"#);
    write(&root, "node_modules/mjs/index.mjs", "export const a = 1;");

    let resolver = Arc::new(Resolver::new(Platform::Node, root.clone(), OsFileSystem));
    (dir, root, CjsClassifier::new(resolver))
  }

  #[tokio::test]
  async fn classifies_by_extension_manifest_and_content() {
    let (_dir, root, classifier) = setup();
    let importer = root.join("dist/index.js");

    assert!(classifier.is_pure_cjs("dot-cjs", &importer).await);
    assert!(classifier.is_pure_cjs("typed-cjs", &importer).await);
    assert!(!classifier.is_pure_cjs("typed-esm", &importer).await);
    assert!(classifier.is_pure_cjs("untyped-cjs", &importer).await);
    assert!(!classifier.is_pure_cjs("untyped-esm", &importer).await);
    assert!(!classifier.is_pure_cjs("mjs", &importer).await);
  }

  #[tokio::test]
  async fn top_level_return_is_still_cjs() {
    let (_dir, root, classifier) = setup();
    let importer = root.join("dist/index.js");
    assert!(classifier.is_pure_cjs("early-return", &importer).await);
  }

  /// Serves every `package.json` under `node_modules` as unparsable text, while the
  /// resolver keeps reading the real files.
  struct GarbledManifests;

  impl FileSystem for GarbledManifests {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
      let in_node_modules = path.components().any(|part| part.as_os_str() == "node_modules");
      if in_node_modules && path.ends_with("package.json") {
        Ok("{ nope".to_string())
      } else {
        OsFileSystem.read_to_string(path)
      }
    }

    fn is_file(&self, path: &Path) -> bool {
      OsFileSystem.is_file(path)
    }
  }

  #[tokio::test]
  async fn malformed_manifest_falls_back_to_content() {
    let (_dir, root, _) = setup();
    let resolver = Arc::new(Resolver::new(Platform::Node, root.clone(), GarbledManifests));
    let classifier = CjsClassifier::new(resolver);
    let importer = root.join("dist/index.js");

    // The declared `type` is lost, so the file's own syntax decides.
    assert!(classifier.is_pure_cjs("typed-esm", &importer).await);
    assert!(!classifier.is_pure_cjs("typed-cjs", &importer).await);
    assert!(classifier.is_pure_cjs("untyped-cjs", &importer).await);
    assert!(!classifier.is_pure_cjs("untyped-esm", &importer).await);
  }

  #[tokio::test]
  async fn resolution_mismatch_is_never_pure() {
    let (_dir, root, classifier) = setup();
    let importer = root.join("dist/index.js");
    assert!(!classifier.is_pure_cjs("dual", &importer).await);
  }

  #[tokio::test]
  async fn unresolvable_and_builtin_are_never_pure() {
    let (_dir, root, classifier) = setup();
    let importer = root.join("dist/index.js");
    assert!(!classifier.is_pure_cjs("missing", &importer).await);
    assert!(!classifier.is_pure_cjs("fs", &importer).await);
    assert!(!classifier.is_pure_cjs("node:path", &importer).await);
  }

  #[tokio::test]
  async fn verdicts_are_stable() {
    let (_dir, root, classifier) = setup();
    let importer = root.join("dist/index.js");
    for specifier in ["dot-cjs", "untyped-cjs", "untyped-esm", "dual"] {
      let first = classifier.is_pure_cjs(specifier, &importer).await;
      let second = classifier.is_pure_cjs(specifier, &importer).await;
      assert_eq!(first, second, "{specifier}");
    }
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn lexer_is_initialized_once() {
    let (_dir, root, classifier) = setup();
    let inits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&inits);
    let classifier = classifier.with_lexer_factory(Arc::new(move || {
      let counter = Arc::clone(&counter);
      async move {
        counter.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(Arc::new(CjsLexer) as Arc<dyn ExportsLexer>)
      }
      .boxed()
    }));

    let importer = root.join("dist/index.js");
    let verdicts = futures::future::join_all(
      (0..8).map(|_| classifier.is_pure_cjs("untyped-cjs", &importer)),
    )
    .await;

    assert!(verdicts.into_iter().all(|is_cjs| is_cjs));
    assert_eq!(inits.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn lexer_init_failure_is_not_pure() {
    let (_dir, root, classifier) = setup();
    let classifier = classifier
      .with_lexer_factory(Arc::new(|| {
        async { Err::<Arc<dyn ExportsLexer>, _>(anyhow::anyhow!("no lexer")) }.boxed()
      }));
    let importer = root.join("dist/index.js");
    assert!(!classifier.is_pure_cjs("untyped-cjs", &importer).await);
    // Extension and manifest decisions don't need the lexer.
    assert!(classifier.is_pure_cjs("dot-cjs", &importer).await);
  }
}
