use crate::dataset::{Dataset, Mode};
use crate::error::{Error, Result};
use crate::ops::DatasetConfig;

/// Set the data file length to exactly `size`. If any indexed range
/// extends beyond `size`, the shrink is destructive: it fails with
/// `SizeTooSmall` unless `force` is set, in which case the data file is
/// truncated and the index is clipped to match.
pub fn set_size(config: &DatasetConfig, size: u64, force: bool) -> Result<()> {
    let paths = config.paths();
    let mut dataset = Dataset::open(&paths, Mode::OpenOrCreate)?;

    let result = set_size_on_open(&mut dataset, size, force);
    match result {
        Ok(()) => dataset.close(),
        Err(e) => {
            let _ = dataset.close();
            Err(e)
        }
    }
}

fn set_size_on_open(dataset: &mut Dataset, size: u64, force: bool) -> Result<()> {
    let destructive = dataset.index().iter(0).any(|r| r.end > size);
    if destructive && !force {
        return Err(Error::SizeTooSmall);
    }
    dataset.set_data_len(size)?;
    if destructive {
        dataset.index_mut().truncate_to(size);
    }
    Ok(())
}
