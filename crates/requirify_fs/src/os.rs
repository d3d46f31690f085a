use std::{io, path::Path};

use crate::FileSystem;

#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
  }

  fn is_file(&self, path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|meta| meta.is_file())
  }
}

#[test]
fn reads_files_from_disk() {
  let dir = tempfile::tempdir().unwrap();
  let file = dir.path().join("index.cjs");
  std::fs::write(&file, "module.exports = 1;").unwrap();

  let fs = OsFileSystem;
  assert!(fs.is_file(&file));
  assert!(!fs.is_file(dir.path()));
  assert_eq!(fs.read_to_string(&file).unwrap(), "module.exports = 1;");
  assert!(fs.read_to_string(&dir.path().join("missing.js")).is_err());
}
