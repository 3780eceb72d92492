//! Error model — a closed set of error kinds, each optionally carrying the
//! OS error that caused it. A `thiserror`-derived enum with a catch-all
//! `Io` variant, plus the stable numeric identifiers and system-cause pair
//! the CLI shell formats into its `Library error code:` / `System error
//! code:` report lines.

use std::fmt;
use std::io;
use thiserror::Error;

/// The name/code pair of the OS error that caused an [`Error::Io`], when
/// one is available (not every `IO` error originates from a syscall with a
/// recognizable errno — e.g. an in-process short read never sets one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemCause {
    pub name: &'static str,
    pub code: i32,
}

impl fmt::Display for SystemCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("System input/output error")]
    Io {
        cause: Option<SystemCause>,
        #[source]
        source: io::Error,
    },
    #[error("Data conflicts with existing data")]
    DataConflict,
    #[error("Size too small to contain data")]
    SizeTooSmall,
    #[error("Read out of bounds")]
    ReadOutOfBounds,
    #[error("Malformed index")]
    MalformedIndex,
    #[error("Lock contention")]
    LockContention,
    #[error("Usage error: {0}")]
    Usage(String),
}

impl Error {
    /// The stable numeric identifier from the error taxonomy. `None` for
    /// kinds that do not have a reserved code.
    pub fn code(&self) -> Option<u32> {
        match self {
            Error::Io { .. } => Some(1),
            Error::SizeTooSmall => Some(3),
            Error::DataConflict => Some(5),
            Error::ReadOutOfBounds => Some(6),
            Error::MalformedIndex | Error::LockContention | Error::Usage(_) => None,
        }
    }

    /// Human-readable kind name, used in the CLI's `Library error name:` line.
    pub fn name(&self) -> &'static str {
        match self {
            Error::Io { .. } => "IO",
            Error::DataConflict => "DataConflict",
            Error::SizeTooSmall => "SizeTooSmall",
            Error::ReadOutOfBounds => "ReadOutOfBounds",
            Error::MalformedIndex => "MalformedIndex",
            Error::LockContention => "LockContention",
            Error::Usage(_) => "Usage",
        }
    }

    pub fn system_cause(&self) -> Option<SystemCause> {
        match self {
            Error::Io { cause, .. } => *cause,
            _ => None,
        }
    }

    pub fn malformed_index() -> Self {
        Error::MalformedIndex
    }

    pub fn lock_contention() -> Self {
        Error::LockContention
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::WouldBlock {
            return Error::LockContention;
        }
        let cause = classify(&source);
        Error::Io { cause, source }
    }
}

#[cfg(unix)]
fn classify(e: &io::Error) -> Option<SystemCause> {
    let code = e.raw_os_error()?;
    let name = match code {
        libc_enoent::ENOENT => "ENOENT",
        libc_enoent::EEXIST => "EEXIST",
        libc_enoent::EACCES => "EACCES",
        libc_enoent::EAGAIN => "EAGAIN",
        libc_enoent::EISDIR => "EISDIR",
        libc_enoent::ENOSPC => "ENOSPC",
        _ => return Some(SystemCause { name: "UNKNOWN", code }),
    };
    Some(SystemCause { name, code })
}

#[cfg(windows)]
fn classify(e: &io::Error) -> Option<SystemCause> {
    let code = e.raw_os_error()?;
    let name = match code {
        2 => "ERROR_FILE_NOT_FOUND",
        80 => "ERROR_FILE_EXISTS",
        5 => "ERROR_ACCESS_DENIED",
        _ => return Some(SystemCause { name: "UNKNOWN", code }),
    };
    Some(SystemCause { name, code })
}

/// Small numeric table for the errno values this crate actually triggers
/// (missing dataset/index files, pre-existing files on `create`, and a
/// `--source` pointed at a directory). Named like the libc constants they
/// mirror without depending on `libc` for five integers.
#[cfg(unix)]
mod libc_enoent {
    pub const ENOENT: i32 = 2;
    pub const EEXIST: i32 = 17;
    pub const EACCES: i32 = 13;
    pub const EAGAIN: i32 = 11;
    pub const EISDIR: i32 = 21;
    pub const ENOSPC: i32 = 28;
}

pub type Result<T> = std::result::Result<T, Error>;
