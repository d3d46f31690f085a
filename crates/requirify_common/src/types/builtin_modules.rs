use phf::{Set, phf_set};

/// `require('module').builtinModules` of Node.js 22, without the `node:`-only ones.
static NODE_BUILTIN_MODULES: Set<&'static str> = phf_set! {
  "_http_agent", "_http_client", "_http_common", "_http_incoming", "_http_outgoing",
  "_http_server", "_stream_duplex", "_stream_passthrough", "_stream_readable",
  "_stream_transform", "_stream_wrap", "_stream_writable", "_tls_common", "_tls_wrap",
  "assert", "assert/strict", "async_hooks", "buffer", "child_process", "cluster", "console",
  "constants", "crypto", "dgram", "diagnostics_channel", "dns", "dns/promises", "domain",
  "events", "fs", "fs/promises", "http", "http2", "https", "inspector", "inspector/promises",
  "module", "net", "os", "path", "path/posix", "path/win32", "perf_hooks", "process",
  "punycode", "querystring", "readline", "readline/promises", "repl", "stream",
  "stream/consumers", "stream/promises", "stream/web", "string_decoder", "sys", "timers",
  "timers/promises", "tls", "trace_events", "tty", "url", "util", "util/types", "v8", "vm",
  "wasi", "worker_threads", "zlib",
};

/// Builtins that can only be imported with the `node:` scheme.
static NODE_PREFIXED_ONLY_MODULES: Set<&'static str> = phf_set! {
  "sea", "sqlite", "test", "test/reporters",
};

pub fn is_builtin_module(specifier: &str) -> bool {
  match specifier.strip_prefix("node:") {
    Some(name) => NODE_BUILTIN_MODULES.contains(name) || NODE_PREFIXED_ONLY_MODULES.contains(name),
    None => NODE_BUILTIN_MODULES.contains(specifier),
  }
}

/// `process` is a global, so its module can be read off `globalThis` directly.
pub fn is_process_module(specifier: &str) -> bool {
  matches!(specifier, "process" | "node:process")
}

#[test]
fn test_is_builtin_module() {
  assert!(is_builtin_module("fs"));
  assert!(is_builtin_module("node:fs"));
  assert!(is_builtin_module("fs/promises"));
  assert!(is_builtin_module("node:test"));
  assert!(!is_builtin_module("test"));
  assert!(!is_builtin_module("node:nope"));
  assert!(!is_builtin_module("react"));
  assert!(!is_builtin_module("./fs"));
  assert!(is_process_module("node:process"));
  assert!(!is_process_module("node:fs"));
}
