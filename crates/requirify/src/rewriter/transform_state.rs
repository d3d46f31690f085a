use requirify_common::{ImportStatement, RenderChunkOutput};
use string_wizard::{MagicString, SourceMapOptions};

use super::RewritePlan;

const CREATE_REQUIRE_PREAMBLE: &str = "import { createRequire as __cjs_createRequire } from \"node:module\";\nconst __cjs_require = __cjs_createRequire(import.meta.url);\n";

const BUILTIN_MODULE_PREAMBLE: &str = "const __cjs_require = globalThis.process.getBuiltinModule(\"module\").createRequire(import.meta.url);\n";

/// Edits accumulated while rewriting one chunk.
pub struct TransformState<'text> {
  source: &'text str,
  magic_string: MagicString<'text>,
  using_require: bool,
  changed: bool,
}

impl<'text> TransformState<'text> {
  pub fn new(source: &'text str) -> Self {
    Self { source, magic_string: MagicString::new(source), using_require: false, changed: false }
  }

  pub fn using_require(&self) -> bool {
    self.using_require
  }

  pub fn changed(&self) -> bool {
    self.changed
  }

  pub fn apply(&mut self, stmt: &ImportStatement, plan: &RewritePlan) {
    let start = stmt.span.start as usize;
    let end = stmt.span.end as usize;
    match plan.render() {
      Some(replacement) => {
        self.magic_string.update(start, end, replacement);
      }
      None => {
        self.magic_string.remove(start, end);
      }
    }
    self.using_require |= plan.uses_require();
    self.changed = true;
  }

  /// Defines `__cjs_require`, keeping a leading `#!` line first.
  pub fn insert_preamble(&mut self, builtin_node_modules: bool) {
    let preamble =
      if builtin_node_modules { BUILTIN_MODULE_PREAMBLE } else { CREATE_REQUIRE_PREAMBLE };

    if self.source.starts_with('#') {
      match self.source.find('\n') {
        Some(line_end) => {
          self.magic_string.append_left(line_end + 1, preamble);
        }
        None => {
          self.magic_string.append(String::from("\n") + preamble);
        }
      }
    } else {
      self.magic_string.prepend(preamble);
    }
    self.changed = true;
  }

  pub fn finish(self, file_name: &str, sourcemap: bool) -> RenderChunkOutput {
    let map = sourcemap.then(|| {
      self
        .magic_string
        .source_map(SourceMapOptions {
          include_content: true,
          source: file_name.into(),
          ..Default::default()
        })
        .to_json_string()
    });
    RenderChunkOutput { code: self.magic_string.to_string(), map }
  }
}
