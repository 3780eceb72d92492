use crate::dataset::{Dataset, Mode};
use crate::error::Result;
use crate::ops::DatasetConfig;
use std::io::Write;

/// How each emitted line renders a range's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFormat {
    /// `start..end_inclusive`
    Inclusive,
    /// `start...end`
    Exclusive,
}

/// Emit one line per range, lowest start first. `missing = true` emits the
/// complement up to the data file's current size instead.
pub fn list_ranges(
    config: &DatasetConfig,
    missing: bool,
    format: RangeFormat,
    sink: &mut dyn Write,
) -> Result<()> {
    let paths = config.paths();
    let dataset = Dataset::open(&paths, Mode::ReadOnly)?;

    let ranges = if missing {
        let file_size = dataset.data_len()?;
        dataset.index().iter_complement(file_size)
    } else {
        dataset.index().iter(0).collect()
    };
    dataset.close()?;

    for r in ranges {
        match format {
            RangeFormat::Inclusive => writeln!(sink, "{}..{}", r.start, r.end - 1)?,
            RangeFormat::Exclusive => writeln!(sink, "{}...{}", r.start, r.end)?,
        }
    }
    Ok(())
}
