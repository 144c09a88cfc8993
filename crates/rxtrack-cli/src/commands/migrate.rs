//! Migrate command
//!
//! Usage: rxtrack migrate [--db PATH]

use clap::Args;
use rxtrack_api::Config;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Database path or URI, overriding DB_URI
    #[arg(long)]
    pub db: Option<String>,
}

/// Execute migrate command
pub fn execute(args: MigrateArgs) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let db_uri = args.db.unwrap_or_else(|| Config::from_env().db_uri);
    let path = rxtrack_store::db::path_from_uri(&db_uri);

    let mut conn = rxtrack_store::db::open(&path)?;
    rxtrack_store::db::configure(&conn)?;

    println!("Migrating {}...", path);
    let applied = rxtrack_store::migrations::apply_migrations(&mut conn)?;

    if applied == 0 {
        println!("✓ Database is up to date");
    } else {
        println!("✓ Applied {} migration(s)", applied);
    }

    Ok(())
}
