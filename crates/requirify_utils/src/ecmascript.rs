use oxc::syntax::identifier;

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

/// Quotes `name` as a JSON string literal, which is also a valid JS string literal.
pub fn to_string_literal(name: &str) -> String {
  serde_json::Value::String(name.to_string()).to_string()
}

/// Renders `name` so it can be used as a key in an object literal or pattern.
pub fn to_property_key(name: &str) -> String {
  if is_validate_identifier_name(name) { name.into() } else { to_string_literal(name) }
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("😈"));
}

#[test]
fn test_to_property_key() {
  assert_eq!(to_property_key("readFile"), "readFile");
  assert_eq!(to_property_key("a-b"), "\"a-b\"");
  assert_eq!(to_string_literal("node:fs"), "\"node:fs\"");
  assert_eq!(to_string_literal("we\"ird"), "\"we\\\"ird\"");
}
