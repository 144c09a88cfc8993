//! Migration SQL compiled into the binary
//!
//! `include_str!` keeps the full history in the executable, so applying
//! migrations never depends on SQL files being present on disk.

/// One migration, identified by its stable id
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All migrations in application order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_initial_schema",
            sql: include_str!("../../migrations/001_initial_schema.sql"),
        },
        Migration {
            id: "002_prescription_indexes",
            sql: include_str!("../../migrations/002_prescription_indexes.sql"),
        },
    ]
}
