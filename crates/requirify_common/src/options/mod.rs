pub mod hook_order;
pub mod normalized_bundler_options;
pub mod normalized_require_cjs_options;
pub mod output_format;
pub mod platform;
pub mod require_cjs_options;
