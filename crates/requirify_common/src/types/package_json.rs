use std::path::PathBuf;

use serde::Deserialize;

/// The `type` field of a `package.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageType {
  Module,
  CommonJs,
}

#[derive(Debug, Clone)]
pub struct PackageJson {
  pub path: PathBuf,
  pub r#type: Option<String>,
}

#[derive(Deserialize)]
struct RawPackageJson {
  r#type: Option<serde_json::Value>,
}

impl PackageJson {
  pub fn new(path: PathBuf) -> Self {
    Self { path, r#type: None }
  }

  #[must_use]
  pub fn with_type(mut self, value: Option<&str>) -> Self {
    self.r#type = value.map(ToString::to_string);
    self
  }

  /// Parses the fields we care about. A manifest that isn't valid JSON is an error;
  /// a `type` that isn't a string is treated as absent.
  pub fn parse(path: PathBuf, content: &str) -> serde_json::Result<Self> {
    let raw: RawPackageJson = serde_json::from_str(content)?;
    let r#type = raw.r#type.as_ref().and_then(serde_json::Value::as_str);
    Ok(Self::new(path).with_type(r#type))
  }

  pub fn r#type(&self) -> Option<&str> {
    self.r#type.as_deref()
  }

  pub fn package_type(&self) -> Option<PackageType> {
    match self.r#type()? {
      "module" => Some(PackageType::Module),
      "commonjs" => Some(PackageType::CommonJs),
      _ => None,
    }
  }
}

#[test]
fn test_parse_package_json() {
  let pkg = PackageJson::parse("package.json".into(), r#"{ "name": "a", "type": "module" }"#).unwrap();
  assert_eq!(pkg.package_type(), Some(PackageType::Module));

  let pkg = PackageJson::parse("package.json".into(), r#"{ "type": "commonjs" }"#).unwrap();
  assert_eq!(pkg.package_type(), Some(PackageType::CommonJs));

  let pkg = PackageJson::parse("package.json".into(), r#"{ "type": 1 }"#).unwrap();
  assert_eq!(pkg.package_type(), None);

  let pkg = PackageJson::parse("package.json".into(), "{}").unwrap();
  assert_eq!(pkg.r#type(), None);

  assert!(PackageJson::parse("package.json".into(), "{ broken").is_err());
}
