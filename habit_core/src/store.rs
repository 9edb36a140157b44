//! Durable storage for the habit document.
//!
//! Every operation runs as one scoped unit of work: the store handle is
//! acquired, the closure runs against the document, and the handle is
//! released on every exit path. A write is committed only when its closure
//! returns `Ok`; an error leaves the stored document untouched.

use crate::{Database, Error, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// A store that can run read and write units of work over a `Database`
pub trait Store {
    /// Run `f` against a consistent snapshot of the document
    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T>;

    /// Run `f` against the document and commit its changes if it succeeds
    fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T>;
}

// ============================================================================
// File-backed store
// ============================================================================

/// JSON document store guarded by an advisory lock file
///
/// Writers take an exclusive lock, readers a shared one. The document is
/// replaced atomically (temp file, fsync, rename), so a crash mid-write
/// leaves the previous version intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
}

/// Held for the duration of one unit of work; unlocks on drop
struct StoreLock {
    file: File,
}

impl StoreLock {
    fn acquire(path: &Path, exclusive: bool) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(path)?;

        if exclusive {
            FileExt::lock_exclusive(&file)?;
        } else {
            FileExt::lock_shared(&file)?;
        }
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!("Failed to release store lock: {}", e);
        }
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// `habits.json` locks through `habits.json.lock`, never the store itself
fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".lock");
    PathBuf::from(name)
}

impl FileStore {
    /// Open a store at `path`; the file is created on first write
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        std::fs::create_dir_all(parent_dir(&path))?;
        let lock_path = lock_path_for(&path);
        tracing::debug!("Opened habit store at {:?}", path);
        Ok(Self { path, lock_path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the document; a missing file is an empty store
    fn load(&self) -> Result<Database> {
        if !self.path.exists() {
            tracing::debug!("No store file at {:?}, starting empty", self.path);
            return Ok(Database::default());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let db: Database = serde_json::from_str(&contents)?;

        let violations = db.check_integrity();
        if !violations.is_empty() {
            tracing::warn!(
                "Store file {:?} failed integrity check ({} violations)",
                self.path,
                violations.len()
            );
            return Err(Error::Integrity(violations.join("; ")));
        }

        Ok(db)
    }

    fn persist(&self, db: &Database) -> Result<()> {
        let temp = NamedTempFile::new_in(parent_dir(&self.path))?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, db)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        tracing::debug!("Committed {} habits to {:?}", db.habit_count(), self.path);
        Ok(())
    }
}

impl Store for FileStore {
    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T>,
    {
        let _lock = StoreLock::acquire(&self.lock_path, false)?;
        let db = self.load()?;
        f(&db)
    }

    fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T>,
    {
        let _lock = StoreLock::acquire(&self.lock_path, true)?;
        let mut db = self.load()?;
        let output = f(&mut db)?;
        self.persist(&db)?;
        Ok(output)
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Non-durable store for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    db: Mutex<Database>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T>,
    {
        // Writers only swap in fully-built drafts, so a poisoned lock still
        // guards a consistent document.
        let db = self.db.lock().unwrap_or_else(|p| p.into_inner());
        f(&db)
    }

    fn write<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T>,
    {
        let mut db = self.db.lock().unwrap_or_else(|p| p.into_inner());
        let mut draft = db.clone();
        let output = f(&mut draft)?;
        *db = draft;
        Ok(output)
    }
}
