mod options;
mod types;

pub use crate::{
  options::{
    hook_order::HookOrder,
    normalized_bundler_options::NormalizedBundlerOptions,
    normalized_require_cjs_options::NormalizedRequireCjsOptions,
    output_format::OutputFormat,
    platform::Platform,
    require_cjs_options::{RequireCjsOptions, ShouldTransformFn},
  },
  types::{
    builtin_modules::{is_builtin_module, is_process_module},
    import_statement::{ImportBinding, ImportStatement},
    package_json::{PackageJson, PackageType},
    render_chunk::{RenderChunkArgs, RenderChunkOutput, RenderedChunk},
  },
};
