use std::{io, path::Path};

/// Read-only view of the disk used while inspecting resolved modules.
pub trait FileSystem: Send + Sync {
  fn read_to_string(&self, path: &Path) -> io::Result<String>;

  fn is_file(&self, path: &Path) -> bool;
}
