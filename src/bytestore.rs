// Durable byte store: single named blob, get/set, last write wins

use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Narrow contract the persistence engine needs from durable storage.
///
/// Implementations fail only on underlying storage-medium errors. No
/// atomicity is assumed beyond "last write wins, single key".
pub trait ByteStore: Send + Sync {
    /// Read the blob stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>>;

    /// Overwrite the blob stored under `key`.
    fn set(&self, key: &str, bytes: &[u8]) -> io::Result<()>;
}

/// File-backed byte store: one file per key inside a data directory.
///
/// Writes go through a `.tmp` sibling and a rename so a crash mid-write
/// leaves the prior blob intact. A `.lock` sidecar serializes writers
/// across processes.
pub struct FileByteStore {
    dir: PathBuf,
}

impl FileByteStore {
    /// Open or create a byte store rooted at the given directory.
    pub fn open<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        // The directory holds only derived state; keep it out of version control.
        let gitignore = dir.join(".gitignore");
        if !gitignore.exists() {
            fs::write(gitignore, "*\n")?;
        }

        Ok(Self { dir })
    }

    /// Directory this store keeps its blobs in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn lock_file(&self, key: &str) -> io::Result<fs::File> {
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.dir.join(format!("{key}.lock")))
    }

    fn validate_key(key: &str) -> io::Result<()> {
        if key.is_empty() || key.len() > 64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid store key: {key:?}"),
            ));
        }
        if !key.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid store key: {key:?} (must be alphanumeric with _/-)"),
            ));
        }
        Ok(())
    }
}

impl ByteStore for FileByteStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Self::validate_key(key)?;

        let lock = self.lock_file(key)?;
        lock.lock_shared()?;

        let path = self.dir.join(key);
        let result = match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        };

        fs2::FileExt::unlock(&lock)?;
        result
    }

    fn set(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        Self::validate_key(key)?;

        let lock = self.lock_file(key)?;
        lock.lock_exclusive()?;

        let tmp_path = self.dir.join(format!("{key}.tmp"));
        let final_path = self.dir.join(key);

        let write_result = (|| {
            let mut tmp = fs::File::create(&tmp_path)?;
            io::Write::write_all(&mut tmp, bytes)?;
            tmp.sync_all()?;
            drop(tmp);
            fs::rename(&tmp_path, &final_path)
        })();

        fs2::FileExt::unlock(&lock)?;
        write_result?;

        debug!(key, bytes = bytes.len(), "wrote blob");
        Ok(())
    }
}

/// In-memory byte store backed by a shared map.
///
/// Clones share the same underlying storage, which lets a second store
/// instance restore what the first one persisted. Used by tests and
/// ephemeral sessions; stands in for browser key-value storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryByteStore {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryByteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ByteStore for MemoryByteStore {
    fn get(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.blobs.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, bytes: &[u8]) -> io::Result<()> {
        self.blobs.lock().unwrap().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}
