//! Operation layer — the seven verbs (`create`, `add`, `read`, `find-offset`,
//! `list-ranges`, `get-index`, `set-size`) implemented atop [`crate::dataset`]
//! and [`crate::index_codec`].
//!
//! Every op is a free function taking a [`DatasetConfig`] (the three paths)
//! plus its own parameters, rather than methods on a god object.

pub mod add;
pub mod create;
pub mod find_offset;
pub mod get_index;
pub mod list_ranges;
pub mod read;
pub mod set_size;

use crate::dataset::DatasetPaths;
use std::path::PathBuf;

/// Chunk size used by every op that streams data bytes — the conflict scan
/// in `add`, the copy loop in `read`, and the write-through in `add`.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Where the command-line frontend tells an op to find its three files.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub data_path: PathBuf,
    pub index_path: Option<PathBuf>,
    pub lockfile_path: Option<PathBuf>,
}

impl DatasetConfig {
    pub fn paths(&self) -> DatasetPaths {
        DatasetPaths::new(
            self.data_path.clone(),
            self.index_path.clone(),
            self.lockfile_path.clone(),
        )
    }
}

pub use add::{add, OnConflict, Source};
pub use create::create;
pub use find_offset::{find_offset, FindOffsetOutcome, StopAt};
pub use get_index::get_index;
pub use list_ranges::{list_ranges, RangeFormat};
pub use read::read;
pub use set_size::set_size;
