pub mod builtin_modules;
pub mod import_statement;
pub mod package_json;
pub mod render_chunk;
