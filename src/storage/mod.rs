mod repository;

pub use repository::*;

/// SQL migration for the initial schema
pub const MIGRATION_001_INITIAL: &str = include_str!("migrations/001_initial.sql");

/// SQL migration for the export audit log
pub const MIGRATION_002_EXPORT_LOG: &str = include_str!("migrations/002_export_log.sql");
