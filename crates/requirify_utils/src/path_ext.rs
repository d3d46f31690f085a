use std::path::{Path, PathBuf};

use sugar_path::SugarPath;

pub trait PathExt {
  /// Slash-separated form of the path. Invalid UTF-8 is replaced rather than rejected.
  fn to_slash_string(&self) -> String;

  /// Joins `self` onto `cwd` unless it is already absolute, then normalizes it.
  fn absolutize_from(&self, cwd: &Path) -> PathBuf;
}

impl PathExt for Path {
  fn to_slash_string(&self) -> String {
    self.to_slash_lossy().into_owned()
  }

  fn absolutize_from(&self, cwd: &Path) -> PathBuf {
    if self.is_absolute() { self.normalize() } else { cwd.join(self).normalize() }
  }
}

#[test]
fn test_absolutize_from() {
  let cwd = Path::new("/project");
  assert_eq!(Path::new("dist/index.js").absolutize_from(cwd), Path::new("/project/dist/index.js"));
  assert_eq!(Path::new("./dist/../out.js").absolutize_from(cwd), Path::new("/project/out.js"));
  assert_eq!(Path::new("/abs/out.js").absolutize_from(cwd), Path::new("/abs/out.js"));
}

#[cfg(unix)]
#[test]
fn test_to_slash_string_with_invalid_utf8() {
  use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

  assert_eq!(Path::new("chunks/a.js").to_slash_string(), "chunks/a.js");
  let path = Path::new(OsStr::from_bytes(b"chunks/\xFF.js"));
  assert_eq!(path.to_slash_string(), "chunks/\u{FFFD}.js");
}
