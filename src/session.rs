// Live database session: create, restore from image, export to image

use crate::engine::Engine;
use crate::error::{StoreError, StoreResult};
use rusqlite::Connection;
use rusqlite::backup::Backup;
use std::fs;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::debug;

/// Fixed schema, applied once on fresh databases. Restored images carry
/// their schema inside the image; no DDL is re-applied on that path.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER
);
CREATE INDEX IF NOT EXISTS idx_tasks_completed ON tasks(completed);
"#;

const BACKUP_PAGES_PER_STEP: std::ffi::c_int = 64;

/// The live in-process database handle.
///
/// Lives for the process duration once established; there is no close path.
#[derive(Debug)]
pub struct Session {
    pub(crate) conn: Connection,
}

impl Session {
    /// Build a fresh empty database and apply the schema.
    pub fn create(engine: &Engine) -> StoreResult<Self> {
        let conn = engine.connection()?;
        conn.execute_batch(SCHEMA)?;
        debug!("created fresh database with schema");
        Ok(Self { conn })
    }

    /// Rebuild a database from a previously exported image.
    ///
    /// Bytes the engine cannot parse surface as `CorruptImage`; a corrupt
    /// image is never silently replaced with a fresh database.
    pub fn restore(engine: &Engine, image: &[u8]) -> StoreResult<Self> {
        let mut conn = engine.connection()?;

        let staging = NamedTempFile::new()?;
        fs::write(staging.path(), image)?;

        let src = Connection::open(staging.path()).map_err(StoreError::CorruptImage)?;
        {
            let backup = Backup::new(&src, &mut conn).map_err(StoreError::CorruptImage)?;
            backup
                .run_to_completion(BACKUP_PAGES_PER_STEP, Duration::from_millis(0), None)
                .map_err(StoreError::CorruptImage)?;
        }

        debug!(bytes = image.len(), "restored database from stored image");
        Ok(Self { conn })
    }

    /// Serialize the entire current database state to a byte image.
    pub fn export(&self) -> StoreResult<Vec<u8>> {
        let staging = NamedTempFile::new()?;
        {
            let mut dst = Connection::open(staging.path())?;
            let backup = Backup::new(&self.conn, &mut dst)?;
            backup.run_to_completion(BACKUP_PAGES_PER_STEP, Duration::from_millis(0), None)?;
        }

        let image = fs::read(staging.path())?;
        debug!(bytes = image.len(), "exported database image");
        Ok(image)
    }
}
