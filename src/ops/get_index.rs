use crate::dataset::{Dataset, Mode};
use crate::error::Result;
use crate::index_codec;
use crate::ops::DatasetConfig;
use std::io::Write;

/// Emit the serialized index, restricted to ranges of length
/// `>= min_range_length`, unmodified by any text translation.
pub fn get_index(config: &DatasetConfig, min_range_length: u64, sink: &mut dyn Write) -> Result<()> {
    let paths = config.paths();
    let dataset = Dataset::open(&paths, Mode::ReadOnly)?;
    let bytes = index_codec::encode(dataset.index(), min_range_length);
    dataset.close()?;
    sink.write_all(&bytes)?;
    Ok(())
}
