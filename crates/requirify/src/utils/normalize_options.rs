use requirify_common::{NormalizedRequireCjsOptions, RequireCjsOptions};

pub fn normalize_options(raw_options: RequireCjsOptions) -> NormalizedRequireCjsOptions {
  NormalizedRequireCjsOptions {
    include: raw_options
      .include
      .unwrap_or_else(|| vec!["**/*.js".to_string(), "**/*.mjs".to_string()]),
    exclude: raw_options.exclude.unwrap_or_default(),
    order: raw_options.order.unwrap_or_default(),
    builtin_node_modules: raw_options.builtin_node_modules.unwrap_or(false),
    cwd: raw_options.cwd,
    should_transform: raw_options.should_transform,
  }
}

#[test]
fn test_defaults() {
  let options = normalize_options(RequireCjsOptions::default());
  assert_eq!(options.include, ["**/*.js", "**/*.mjs"]);
  assert!(options.exclude.is_empty());
  assert_eq!(options.order, requirify_common::HookOrder::Post);
  assert!(!options.builtin_node_modules);
  assert!(options.cwd.is_none());
  assert!(options.should_transform.is_none());
}
