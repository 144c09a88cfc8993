//! Shared application state

use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::Mutex;

/// State handed to every handler
///
/// A SQLite connection is not `Sync`, so the single connection sits behind an
/// async mutex; handlers hold the guard only while a request touches the
/// database.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        AppState {
            db: Arc::new(Mutex::new(conn)),
        }
    }
}
