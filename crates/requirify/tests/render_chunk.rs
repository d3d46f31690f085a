use std::{
  fs,
  path::{Path, PathBuf},
  sync::Arc,
};

use futures::FutureExt;
use requirify::{
  NormalizedBundlerOptions, OutputFormat, Platform, RenderChunkArgs, RenderedChunk,
  RequireCjsOptions, RequireCjsPlugin,
};

const CREATE_REQUIRE: &str = "import { createRequire as __cjs_createRequire } from \"node:module\";\nconst __cjs_require = __cjs_createRequire(import.meta.url);\n";
const GET_BUILTIN_MODULE: &str = "const __cjs_require = globalThis.process.getBuiltinModule(\"module\").createRequire(import.meta.url);\n";

struct Fixture {
  _dir: tempfile::TempDir,
  root: PathBuf,
}

impl Fixture {
  fn new() -> Self {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().canonicalize().unwrap();
    let fixture = Self { _dir: dir, root };
    fixture.write("package.json", r#"{ "name": "app", "type": "module" }"#);
    fixture.write("dist/.keep", "");

    fixture.write("node_modules/x/package.json", r#"{ "main": "index.cjs" }"#);
    fixture.write("node_modules/x/index.cjs", "exports.a = 1; exports.c = 2;");

    fixture.write("node_modules/legacy/package.json", r#"{ "main": "lib/main.js" }"#);
    fixture.write("node_modules/legacy/lib/main.js", "module.exports = { run() {} };");

    fixture.write("node_modules/esm/package.json", r#"{ "type": "module", "main": "index.js" }"#);
    fixture.write("node_modules/esm/index.js", "export const a = 1;");

    fixture.write(
      "node_modules/dual/package.json",
      r#"{ "exports": { "import": "./index.mjs", "require": "./index.cjs" } }"#,
    );
    fixture.write("node_modules/dual/index.mjs", "export const a = 1;");
    fixture.write("node_modules/dual/index.cjs", "exports.a = 1;");
    fixture
  }

  fn write(&self, relative: &str, content: &str) {
    let path = self.root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
  }

  fn plugin(&self, options: RequireCjsOptions) -> RequireCjsPlugin {
    RequireCjsPlugin::new(options, bundler_options(&self.root))
  }
}

fn bundler_options(cwd: &Path) -> Arc<NormalizedBundlerOptions> {
  Arc::new(NormalizedBundlerOptions {
    cwd: cwd.to_path_buf(),
    platform: Platform::Node,
    format: OutputFormat::Esm,
    dir: Some("dist".to_string()),
    file: None,
    sourcemap: false,
  })
}

async fn render(plugin: &RequireCjsPlugin, file_name: &str, code: &str) -> Option<String> {
  let args =
    RenderChunkArgs { code: code.into(), chunk: RenderedChunk { file_name: file_name.into() } };
  plugin.render_chunk(&args).await.unwrap().map(|output| output.code)
}

#[tokio::test]
async fn default_and_named_imports_of_cjs() {
  let fixture = Fixture::new();
  let plugin = fixture.plugin(RequireCjsOptions::default());
  let code = "import def, { a as b } from 'x';\nconsole.log(def, b);\n";
  assert_eq!(
    render(&plugin, "index.js", code).await.unwrap(),
    format!(
      "{CREATE_REQUIRE}const def = __cjs_require(\"x\");\nconst {{ a: b }} = def;\nconsole.log(def, b);\n"
    )
  );
}

#[tokio::test]
async fn namespace_import_of_cjs() {
  let fixture = Fixture::new();
  let plugin = fixture.plugin(RequireCjsOptions::default());
  let output = render(&plugin, "index.js", "import * as ns from 'legacy';\nns.run();\n").await.unwrap();
  assert_eq!(
    output,
    format!(
      "{CREATE_REQUIRE}const __cjs_ns_default = __cjs_require(\"legacy\");\nconst ns = {{ ...__cjs_ns_default, default: __cjs_ns_default }};\nns.run();\n"
    )
  );
}

#[tokio::test]
async fn esm_and_ambiguous_imports_stay() {
  let fixture = Fixture::new();
  let plugin = fixture.plugin(RequireCjsOptions::default());
  let code = "import { a } from 'esm';\nimport { a as b } from 'dual';\nimport c from 'missing';\nimport * as path from 'node:path';\nconsole.log(a, b, c, path);\n";
  assert_eq!(render(&plugin, "index.js", code).await, None);
}

#[tokio::test]
async fn type_only_imports_stay() {
  let fixture = Fixture::new();
  let plugin = fixture
    .plugin(RequireCjsOptions { include: Some(vec!["**/*.ts".to_string()]), ..Default::default() });
  let code = "import type { A } from 'x';\nimport { type B, c } from 'x';\nexport const value: A | B = c;\n";
  assert_eq!(
    render(&plugin, "index.ts", code).await.unwrap(),
    format!(
      "{CREATE_REQUIRE}import type {{ A }} from 'x';\nconst {{ c }} = __cjs_require(\"x\");\nexport const value: A | B = c;\n"
    )
  );
}

#[tokio::test]
async fn side_effect_imports() {
  let fixture = Fixture::new();
  let plugin = fixture.plugin(RequireCjsOptions::default());

  // Builtins are dropped without needing `require`.
  assert_eq!(render(&plugin, "index.js", "import 'node:fs';\nrun();\n").await.unwrap(), "\nrun();\n");

  assert_eq!(
    render(&plugin, "index.js", "import 'x';\nimport 'esm';\n").await.unwrap(),
    format!("{CREATE_REQUIRE}__cjs_require(\"x\");\nimport 'esm';\n")
  );
}

#[tokio::test]
async fn builtin_node_modules() {
  let fixture = Fixture::new();
  let code = "import { readFileSync } from 'node:fs';\nimport process from 'process';\n";

  let plugin = fixture.plugin(RequireCjsOptions::default());
  assert_eq!(render(&plugin, "index.js", code).await, None);

  let plugin =
    fixture.plugin(RequireCjsOptions { builtin_node_modules: Some(true), ..Default::default() });
  assert_eq!(
    render(&plugin, "index.js", code).await.unwrap(),
    "const { readFileSync } = globalThis.process.getBuiltinModule(\"node:fs\");\nconst process = globalThis.process;\n"
  );

  // With builtins enabled the preamble itself comes from `process.getBuiltinModule`.
  assert_eq!(
    render(&plugin, "index.js", "import def from 'x';\n").await.unwrap(),
    format!("{GET_BUILTIN_MODULE}const def = __cjs_require(\"x\");\n")
  );
}

#[tokio::test]
async fn preamble_follows_shebang() {
  let fixture = Fixture::new();
  let plugin = fixture.plugin(RequireCjsOptions::default());
  let code = "#!/usr/bin/env node\nimport def from 'x';\ndef();\n";
  assert_eq!(
    render(&plugin, "cli.js", code).await.unwrap(),
    format!("#!/usr/bin/env node\n{CREATE_REQUIRE}const def = __cjs_require(\"x\");\ndef();\n")
  );
}

#[tokio::test]
async fn override_predicate_wins_for_bindings() {
  let fixture = Fixture::new();
  let plugin = fixture.plugin(RequireCjsOptions {
    should_transform: Some(Arc::new(|specifier: &str, importer: &str| {
      assert!(importer.ends_with("index.js"));
      let verdict = match specifier {
        "esm" | "node:fs" => Some(true),
        "x" => Some(false),
        _ => None,
      };
      async move { verdict }.boxed()
    })),
    ..Default::default()
  });

  let code = "import { a } from 'esm';\nimport { c } from 'x';\nimport legacy from 'legacy';\nimport { readFileSync } from 'node:fs';\nimport 'node:fs';\n";
  assert_eq!(
    render(&plugin, "index.js", code).await.unwrap(),
    format!(
      "{CREATE_REQUIRE}const {{ a }} = __cjs_require(\"esm\");\nimport {{ c }} from 'x';\nconst legacy = __cjs_require(\"legacy\");\nconst {{ readFileSync }} = globalThis.process.getBuiltinModule(\"node:fs\");\n\n"
    )
  );
}

#[tokio::test]
async fn sourcemap_is_emitted_when_requested() {
  let fixture = Fixture::new();
  let mut options = (*bundler_options(&fixture.root)).clone();
  options.sourcemap = true;
  let plugin = RequireCjsPlugin::new(RequireCjsOptions::default(), Arc::new(options));
  let args = RenderChunkArgs {
    code: "import def from 'x';\ndef();\n".into(),
    chunk: RenderedChunk { file_name: "index.js".into() },
  };
  let output = plugin.render_chunk(&args).await.unwrap().unwrap();
  assert!(output.map.is_some());
}
