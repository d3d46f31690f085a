use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use dashmap::DashMap;
use itertools::Itertools;
use oxc_resolver::{ResolveError, ResolveOptions as OxcResolverOptions, Resolver as OxcResolver};
use sugar_path::SugarPath;

use requirify_common::{PackageJson, Platform};
use requirify_fs::{FileSystem, OsFileSystem};

/// Which module system's resolution rules to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveKind {
  /// `import` statements: `import` condition, fully specified relative requests.
  Import,
  /// `require()` calls: `require` condition, extension and directory index probing.
  Require,
}

#[derive(Debug)]
pub struct Resolver<F: FileSystem = OsFileSystem> {
  cwd: PathBuf,
  fs: F,
  import_resolver: OxcResolver,
  require_resolver: OxcResolver,
  /// Directory -> nearest `package.json` at or above it.
  package_json_cache: DashMap<PathBuf, Option<Arc<PackageJson>>>,
}

#[derive(Debug)]
pub struct ResolveReturn {
  pub path: PathBuf,
  pub query: Option<String>,
  pub fragment: Option<String>,
}

impl ResolveReturn {
  /// Whether the resolution points at a plain file on disk, without `?query` or `#hash`.
  pub fn is_plain_file(&self) -> bool {
    self.query.is_none() && self.fragment.is_none() && self.path.is_absolute()
  }
}

impl<F: FileSystem> Resolver<F> {
  pub fn new(platform: Platform, cwd: PathBuf, fs: F) -> Self {
    let mut default_conditions = vec!["default".to_string()];

    match platform {
      Platform::Node => {
        default_conditions.push("node".to_string());
      }
      Platform::Browser => {
        default_conditions.push("browser".to_string());
      }
      Platform::Neutral => {}
    }

    let import_conditions =
      ["import".to_string()].into_iter().chain(default_conditions.clone()).unique().collect();
    let require_conditions =
      ["require".to_string()].into_iter().chain(default_conditions).unique().collect();

    let main_fields = match platform {
      Platform::Node | Platform::Neutral => vec!["main".to_string()],
      Platform::Browser => vec!["browser".to_string(), "main".to_string()],
    };

    let resolve_options_with_require_conditions = OxcResolverOptions {
      main_fields,
      builtin_modules: matches!(platform, Platform::Node),
      condition_names: require_conditions,
      extensions: vec![String::from(".js"), String::from(".json"), String::from(".node")],
      ..Default::default()
    };

    let resolve_options_with_import_conditions = OxcResolverOptions {
      condition_names: import_conditions,
      fully_specified: true,
      ..resolve_options_with_require_conditions.clone()
    };

    let require_resolver = OxcResolver::new(resolve_options_with_require_conditions);
    let import_resolver = require_resolver.clone_with_options(resolve_options_with_import_conditions);

    Self { cwd, fs, import_resolver, require_resolver, package_json_cache: DashMap::default() }
  }

  pub fn fs(&self) -> &F {
    &self.fs
  }

  /// Resolves `specifier` as if it were written inside the file at `importer`.
  pub fn resolve(
    &self,
    importer: &Path,
    specifier: &str,
    kind: ResolveKind,
  ) -> Result<ResolveReturn, ResolveError> {
    let resolver = match kind {
      ResolveKind::Import => &self.import_resolver,
      ResolveKind::Require => &self.require_resolver,
    };

    let dir = importer
      .parent()
      .filter(|inner| inner.components().next().is_some())
      .unwrap_or(self.cwd.as_path());

    let dir = if dir.is_absolute() { dir.normalize() } else { self.cwd.join(dir).normalize() };

    resolver.resolve(&dir, specifier).map(|info| ResolveReturn {
      query: info.query().map(ToString::to_string),
      fragment: info.fragment().map(ToString::to_string),
      path: info.into_path_buf(),
    })
  }

  /// Finds the `package.json` that governs `path`, stopping at `node_modules` boundaries.
  pub fn nearest_package_json(&self, path: &Path) -> Option<Arc<PackageJson>> {
    path.parent().and_then(|dir| self.package_json_in(dir))
  }

  fn package_json_in(&self, dir: &Path) -> Option<Arc<PackageJson>> {
    if let Some(cached) = self.package_json_cache.get(dir) {
      return cached.value().clone();
    }

    let found = if dir.file_name().is_some_and(|name| name == "node_modules") {
      None
    } else {
      let candidate = dir.join("package.json");
      if self.fs.is_file(&candidate) {
        Some(Arc::new(self.read_package_json(candidate)))
      } else {
        dir.parent().and_then(|parent| self.package_json_in(parent))
      }
    };

    self.package_json_cache.insert(dir.to_path_buf(), found.clone());
    found
  }

  fn read_package_json(&self, path: PathBuf) -> PackageJson {
    let content = match self.fs.read_to_string(&path) {
      Ok(content) => content,
      Err(err) => {
        tracing::trace!(path = %path.display(), %err, "unreadable package.json");
        return PackageJson::new(path);
      }
    };
    match PackageJson::parse(path.clone(), &content) {
      Ok(package_json) => package_json,
      Err(err) => {
        tracing::trace!(path = %path.display(), %err, "malformed package.json");
        PackageJson::new(path)
      }
    }
  }
}
