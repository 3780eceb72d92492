use crate::dataset::{Dataset, Mode};
use crate::error::Result;
use crate::ops::DatasetConfig;

/// Create a fresh dataset: exclusive-create the data and index files, pad
/// the data file to `size` bytes if given, leave the index empty.
pub fn create(config: &DatasetConfig, size: u64) -> Result<()> {
    let paths = config.paths();
    let mut dataset = Dataset::open(&paths, Mode::Create)?;
    if size > 0 {
        dataset.set_data_len(size)?;
    }
    dataset.close()
}
