use oxc::span::Span;

/// One top-level `import` declaration lifted out of the chunk's AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
  pub span: Span,
  pub source: String,
  /// `import type ... from '..'`
  pub is_type: bool,
  pub bindings: Vec<ImportBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBinding {
  /// `import * as local from '..'`
  Namespace { local: String },
  /// `import local from '..'`
  Default { local: String },
  /// `import { imported as local } from '..'`
  Named { imported: String, local: String, is_type: bool },
}

impl ImportStatement {
  /// `import '..'`, `import {} from '..'` or an import whose bindings are all type-only.
  pub fn is_side_effect_only(&self) -> bool {
    self.bindings.iter().all(|binding| matches!(binding, ImportBinding::Named { is_type: true, .. }))
  }

  pub fn namespace(&self) -> Option<&str> {
    self.bindings.iter().find_map(|binding| match binding {
      ImportBinding::Namespace { local } => Some(local.as_str()),
      _ => None,
    })
  }

  pub fn default(&self) -> Option<&str> {
    self.bindings.iter().find_map(|binding| match binding {
      ImportBinding::Default { local } => Some(local.as_str()),
      _ => None,
    })
  }

  /// Value-level named bindings as `(imported, local)` pairs.
  pub fn named(&self) -> impl Iterator<Item = (&str, &str)> {
    self.bindings.iter().filter_map(|binding| match binding {
      ImportBinding::Named { imported, local, is_type: false } => {
        Some((imported.as_str(), local.as_str()))
      }
      _ => None,
    })
  }
}
