use serde::Deserialize;

/// Where the render-chunk hook runs relative to other plugins' hooks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookOrder {
  Pre,
  #[default]
  Post,
}
