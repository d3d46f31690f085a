// A wrapper around the `oxc_resolver` crate that resolves a specifier the way both
// `import` and `require` would see it.

mod resolver;

pub use crate::resolver::{ResolveKind, ResolveReturn, Resolver};
