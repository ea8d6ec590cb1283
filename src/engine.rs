// Engine bootstrapper for the embedded SQLite runtime
//
// The engine is linked into the binary (rusqlite "bundled"), so acquisition
// is a one-time probe rather than a load from disk. The handle is cached for
// the process lifetime; every caller gets the same one.

use crate::error::{StoreError, StoreResult};
use rusqlite::Connection;
use std::sync::{Mutex, OnceLock};
use tracing::debug;

static ENGINE: OnceLock<Engine> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

/// Handle to the initialized SQLite runtime.
#[derive(Debug)]
pub struct Engine {
    version: String,
}

impl Engine {
    /// Acquire the engine, initializing it on first call.
    ///
    /// Idempotent: later calls return the cached handle without re-probing.
    /// Concurrent first callers serialize on one in-flight initialization,
    /// so the probe runs at most once per successful acquisition. A failed
    /// probe returns `EngineUnavailable` and leaves the engine unacquired,
    /// so a later call may retry.
    pub fn acquire() -> StoreResult<&'static Engine> {
        if let Some(engine) = ENGINE.get() {
            return Ok(engine);
        }

        let _init = INIT.lock().unwrap();
        // A racing caller may have finished while we waited for the lock
        if let Some(engine) = ENGINE.get() {
            return Ok(engine);
        }

        let version = Self::probe()?;
        debug!(version = %version, "SQLite engine initialized");
        Ok(ENGINE.get_or_init(|| Engine { version }))
    }

    /// Reported version of the underlying SQLite library.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Open a fresh in-memory database on this engine.
    pub(crate) fn connection(&self) -> StoreResult<Connection> {
        Connection::open_in_memory().map_err(StoreError::EngineUnavailable)
    }

    fn probe() -> StoreResult<String> {
        let conn = Connection::open_in_memory().map_err(StoreError::EngineUnavailable)?;
        conn.query_row("SELECT sqlite_version()", [], |row| row.get(0))
            .map_err(StoreError::EngineUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_is_idempotent() {
        let first = Engine::acquire().unwrap();
        let second = Engine::acquire().unwrap();
        // Same static handle both times
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_concurrent_acquire_yields_one_handle() {
        let handles: Vec<&'static Engine> = std::thread::scope(|scope| {
            (0..8)
                .map(|_| scope.spawn(|| Engine::acquire().unwrap()))
                .collect::<Vec<_>>()
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        for pair in handles.windows(2) {
            assert!(std::ptr::eq(pair[0], pair[1]));
        }
    }

    #[test]
    fn test_version_reported() {
        let engine = Engine::acquire().unwrap();
        // "3.x.y"
        assert!(engine.version().starts_with('3'));
    }

    #[test]
    fn test_connection_is_usable() {
        let engine = Engine::acquire().unwrap();
        let conn = engine.connection().unwrap();
        let one: i64 = conn.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
        assert_eq!(one, 1);
    }
}
