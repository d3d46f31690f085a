pub mod collect_import_statements;
pub mod normalize_options;
