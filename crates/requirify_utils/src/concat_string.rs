/// Concatenates string-like values into a `String` with a single allocation.
#[macro_export]
macro_rules! concat_string {
  () => { String::new() };
  ($($s:expr),+ $(,)?) => {
    [$(AsRef::<str>::as_ref(&$s)),+].concat()
  };
}

#[test]
fn test_concat_string() {
  let name = String::from("ns");
  assert_eq!(concat_string!("__cjs_", name, "_default"), "__cjs_ns_default");
  assert_eq!(concat_string!(), "");
}
