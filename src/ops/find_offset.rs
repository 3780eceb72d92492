use crate::dataset::{Dataset, Mode};
use crate::error::Result;
use crate::ops::DatasetConfig;

/// Which predicate `find-offset` searches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopAt {
    Data,
    NoData,
}

/// `find-offset`'s result: either the offset found, or the distinguished
/// non-error "no such offset" outcome (only reachable via `StopAt::Data`,
/// since `find_next_missing` is always defined).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindOffsetOutcome {
    Found(u64),
    NoResult,
}

pub fn find_offset(config: &DatasetConfig, start_at: u64, stop_at: StopAt) -> Result<FindOffsetOutcome> {
    let paths = config.paths();
    let dataset = Dataset::open(&paths, Mode::ReadOnly)?;

    let outcome = match stop_at {
        StopAt::Data => match dataset.index().find_next_data(start_at) {
            Some(o) => FindOffsetOutcome::Found(o),
            None => FindOffsetOutcome::NoResult,
        },
        StopAt::NoData => FindOffsetOutcome::Found(dataset.index().find_next_missing(start_at)),
    };

    dataset.close()?;
    Ok(outcome)
}
