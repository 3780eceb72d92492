//! Dataset handle — owns the `(data, index, lockfile)` triple for the
//! lifetime of one operation.
//!
//! Opening acquires a non-blocking OS exclusive lock on the lockfile,
//! decodes the index file, and hands back positioned access to the data
//! file. `close()` rewrites the index only if it was modified, then
//! releases the lock — the only path that is allowed to leave a stale lock
//! behind is a process abort, which `Drop` defends against on a best-effort
//! basis.

use crate::error::{Error, Result};
use crate::index_codec;
use crate::ranges::RangeIndex;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// The three paths that make up one dataset.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub data_path: PathBuf,
    pub index_path: PathBuf,
    pub lockfile_path: PathBuf,
}

impl DatasetPaths {
    /// Default sibling paths: `<data>.idx` and `<data>.lock`, unless
    /// overridden.
    pub fn new(
        data_path: impl Into<PathBuf>,
        index_path: Option<PathBuf>,
        lockfile_path: Option<PathBuf>,
    ) -> Self {
        let data_path = data_path.into();
        let index_path = index_path.unwrap_or_else(|| append_extension(&data_path, "idx"));
        let lockfile_path = lockfile_path.unwrap_or_else(|| append_extension(&data_path, "lock"));
        Self {
            data_path,
            index_path,
            lockfile_path,
        }
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut s = path.as_os_str().to_owned();
    s.push(".");
    s.push(ext);
    PathBuf::from(s)
}

/// How a dataset is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    ReadOnly,
    ReadWrite,
    Create,
    /// Read-write, creating the data/index pair if either is missing instead
    /// of requiring a prior `create`. Used by `add`/`set-size`, which the
    /// original tool runs directly against a path nobody has `create`d yet.
    OpenOrCreate,
}

/// An open dataset: the data file, the parsed index, and the held lock.
pub struct Dataset {
    data: File,
    index_path: PathBuf,
    index: RangeIndex,
    dirty: bool,
    lock: File,
    closed: bool,
}

impl Dataset {
    /// Acquire the lock, open/create the data and index files per `mode`,
    /// and decode the index.
    pub fn open(paths: &DatasetPaths, mode: Mode) -> Result<Self> {
        let lock = OpenOptions::new()
            .write(true)
            .create(true)
            .open(&paths.lockfile_path)?;
        lock.try_lock_exclusive().map_err(|_| Error::lock_contention())?;

        match Self::open_locked(paths, mode, &lock) {
            Ok(dataset) => Ok(dataset),
            Err(e) => {
                let _ = FileExt::unlock(&lock);
                Err(e)
            }
        }
    }

    fn open_locked(paths: &DatasetPaths, mode: Mode, lock: &File) -> Result<Self> {
        let (data, index_bytes) = match mode {
            Mode::Create => {
                let data = OpenOptions::new()
                    .read(true)
                    .write(true)
                    .create_new(true)
                    .open(&paths.data_path)?;
                OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&paths.index_path)?;
                (data, Vec::new())
            }
            Mode::ReadOnly | Mode::ReadWrite => {
                let data = OpenOptions::new()
                    .read(true)
                    .write(mode == Mode::ReadWrite)
                    .open(&paths.data_path)?;
                let mut index_bytes = Vec::new();
                File::open(&paths.index_path)?.read_to_end(&mut index_bytes)?;
                (data, index_bytes)
            }
            Mode::OpenOrCreate => {
                let data = OpenOptions::new()
                    .read(true)
                    .write(true)
                    .create(true)
                    .open(&paths.data_path)?;
                let mut index_bytes = Vec::new();
                OpenOptions::new()
                    .read(true)
                    .write(true)
                    .create(true)
                    .open(&paths.index_path)?
                    .read_to_end(&mut index_bytes)?;
                (data, index_bytes)
            }
        };

        let index = index_codec::decode(&index_bytes).map_err(|_| Error::malformed_index())?;

        Ok(Dataset {
            data,
            index_path: paths.index_path.clone(),
            index,
            dirty: false,
            lock: lock.try_clone()?,
            closed: false,
        })
    }

    pub fn index(&self) -> &RangeIndex {
        &self.index
    }

    /// Mutable access to the index. Any use marks the dataset dirty, so
    /// `close()` knows to rewrite the index file — callers only reach this
    /// from the operation layer when they are actually about to insert or
    /// truncate a range.
    pub fn index_mut(&mut self) -> &mut RangeIndex {
        self.dirty = true;
        &mut self.index
    }

    pub fn data_len(&self) -> Result<u64> {
        Ok(self.data.metadata()?.len())
    }

    pub fn set_data_len(&mut self, len: u64) -> Result<()> {
        self.data.set_len(len)?;
        Ok(())
    }

    pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.data.seek(SeekFrom::Start(offset))?;
        self.data.read_exact(buf)?;
        Ok(())
    }

    pub fn write_at(&mut self, offset: u64, buf: &[u8]) -> Result<()> {
        self.data.seek(SeekFrom::Start(offset))?;
        self.data.write_all(buf)?;
        Ok(())
    }

    /// Flush and fsync the data file. The operation layer calls this before
    /// marking the index dirty with new ranges, so a crash can never leave
    /// the index pointing at bytes that were never durably written.
    pub fn flush_data(&mut self) -> Result<()> {
        self.data.flush()?;
        self.data.sync_data()?;
        Ok(())
    }

    /// Rewrite the index file (only if modified), then release the lock.
    /// The lock is released even if the rewrite fails.
    pub fn close(mut self) -> Result<()> {
        let result = self.flush_index();
        self.closed = true;
        let _ = FileExt::unlock(&self.lock);
        result
    }

    fn flush_index(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let bytes = index_codec::encode(&self.index, 0);
        let mut f = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.index_path)?;
        f.write_all(&bytes)?;
        f.flush()?;
        f.sync_all()?;
        self.dirty = false;
        Ok(())
    }
}

impl Drop for Dataset {
    fn drop(&mut self) {
        if !self.closed {
            let _ = FileExt::unlock(&self.lock);
        }
    }
}
