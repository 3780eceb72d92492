//! # sparsebox — a sparse byte-range dataset store
//!
//! A dataset is a triple of files: a *data file* holding raw bytes at their
//! logical offsets, an *index file* recording which byte ranges in the data
//! file are authoritative, and a *lockfile* for advisory cross-process
//! mutual exclusion. Seven operations (`create`, `add`, `read`,
//! `find-offset`, `list-ranges`, `get-index`, `set-size`) open the pair
//! under the lock, mutate or query the index and data bytes, and flush.
//!
//! Guarantees:
//! - The index is always sorted, disjoint, and non-touching — two ranges
//!   that would touch are always merged into one.
//! - A crash mid-`add` may leave data bytes written that the index does not
//!   yet cover; that is safe, since unindexed bytes are logically absent.
//!   The reverse can never happen: data is always flushed before the index
//!   that references it is persisted.
//! - `add`'s `error` conflict policy is transactional: a detected conflict
//!   leaves both files byte-identical to their pre-call state.

pub mod cli;
pub mod dataset;
pub mod error;
pub mod index_codec;
pub mod ops;
pub mod ranges;
pub mod varint;

pub use dataset::{Dataset, DatasetPaths, Mode};
pub use error::{Error, Result, SystemCause};
pub use ranges::{Range, RangeIndex};
