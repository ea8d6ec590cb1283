// Task store facade: lazy singleton session + write-then-persist protocol

use crate::bytestore::{ByteStore, FileByteStore};
use crate::engine::Engine;
use crate::error::{StoreError, StoreResult};
use crate::models::{Task, now_ms};
use crate::session::Session;
use rusqlite::params;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Fixed key the database image is stored under in the byte store.
pub const DB_KEY: &str = "todo-db";

/// Task list store over an in-memory SQLite database synced to a byte store.
///
/// The session is materialized lazily on first use: restored from the byte
/// store when a prior image exists, freshly created with schema otherwise.
/// Every mutating operation re-exports the whole database and durably writes
/// it before returning, so a successful result implies the durable store
/// reflects the mutation. One mutex serializes bootstrap and wraps each
/// operation's {statement + export + durable write}.
pub struct TodoStore {
    bytes: Box<dyn ByteStore>,
    session: Mutex<Option<Session>>,
}

impl TodoStore {
    /// Open a store backed by files in a `.todostore` subdirectory of `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let bytes = FileByteStore::open(path.as_ref().join(".todostore"))?;
        Ok(Self::with_store(Box::new(bytes)))
    }

    /// Build a store over any byte store implementation.
    pub fn with_store(bytes: Box<dyn ByteStore>) -> Self {
        Self {
            bytes,
            session: Mutex::new(None),
        }
    }

    /// Establish the session (restore or create + persist) without returning rows.
    pub fn init(&self) -> StoreResult<()> {
        self.session().map(|_| ())
    }

    /// All tasks, newest first: `created_at` descending with NULLs last,
    /// ties broken by id descending. Read-only; does not persist.
    pub fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        let mut guard = self.session()?;
        let session = guard.as_mut().expect("session initialized");

        let mut stmt = session.conn.prepare(
            "SELECT id, title, completed, created_at FROM tasks
             ORDER BY COALESCE(created_at, 0) DESC, id DESC",
        )?;
        let tasks = stmt
            .query_map([], |row| {
                Ok(Task {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    completed: row.get::<_, i64>(2)? != 0,
                    created_at: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    /// Insert a new task and return the fully populated row.
    pub fn add_task(&self, title: &str) -> StoreResult<Task> {
        validate_title(title)?;

        let mut guard = self.session()?;
        let session = guard.as_mut().expect("session initialized");

        let created_at = now_ms();
        session.conn.execute(
            "INSERT INTO tasks (title, completed, created_at) VALUES (?1, 0, ?2)",
            params![title, created_at],
        )?;
        let id = session.conn.last_insert_rowid();

        self.persist(session)?;
        debug!(id, "added task");

        Ok(Task {
            id,
            title: title.to_string(),
            completed: false,
            created_at: Some(created_at),
        })
    }

    /// Update a task's title. No-op if no row matches `id`.
    pub fn update_task(&self, id: i64, title: &str) -> StoreResult<()> {
        validate_title(title)?;

        let mut guard = self.session()?;
        let session = guard.as_mut().expect("session initialized");

        let changed = session
            .conn
            .execute("UPDATE tasks SET title = ?1 WHERE id = ?2", params![title, id])?;

        self.persist(session)?;
        debug!(id, changed, "updated task title");
        Ok(())
    }

    /// Set a task's completion flag. No-op if no row matches `id`.
    pub fn toggle_complete(&self, id: i64, completed: bool) -> StoreResult<()> {
        let mut guard = self.session()?;
        let session = guard.as_mut().expect("session initialized");

        let flag: i64 = if completed { 1 } else { 0 };
        let changed = session
            .conn
            .execute("UPDATE tasks SET completed = ?1 WHERE id = ?2", params![flag, id])?;

        self.persist(session)?;
        debug!(id, completed, changed, "toggled task");
        Ok(())
    }

    /// Delete a task. No-op if no row matches `id`; ids are never reused.
    pub fn delete_task(&self, id: i64) -> StoreResult<()> {
        let mut guard = self.session()?;
        let session = guard.as_mut().expect("session initialized");

        let changed = session
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;

        self.persist(session)?;
        debug!(id, changed, "deleted task");
        Ok(())
    }

    /// Lock the session slot, bootstrapping on first use.
    ///
    /// Once a session exists it is returned as-is; storage is not re-read.
    fn session(&self) -> StoreResult<MutexGuard<'_, Option<Session>>> {
        let mut guard = self.session.lock().unwrap();
        if guard.is_none() {
            *guard = Some(self.bootstrap()?);
        }
        Ok(guard)
    }

    fn bootstrap(&self) -> StoreResult<Session> {
        let engine = Engine::acquire()?;

        match self.bytes.get(DB_KEY)? {
            Some(image) if !image.is_empty() => {
                info!(bytes = image.len(), "restoring database from stored image");
                Session::restore(engine, &image)
            }
            _ => {
                info!("no stored image, creating fresh database");
                let session = Session::create(engine)?;
                // Persist right away so a restart before any task is added
                // still finds a valid, schema-bearing image.
                self.persist(&session)?;
                Ok(session)
            }
        }
    }

    /// Export the full database state and durably write it under `DB_KEY`.
    fn persist(&self, session: &Session) -> StoreResult<()> {
        let image = session.export().map_err(StoreError::persistence)?;
        self.bytes
            .set(DB_KEY, &image)
            .map_err(StoreError::persistence)?;
        debug!(bytes = image.len(), "persisted database image");
        Ok(())
    }
}

fn validate_title(title: &str) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::InvalidInput(
            "task title must not be empty".to_string(),
        ));
    }
    Ok(())
}
