use crate::dataset::{Dataset, Mode};
use crate::error::{Error, Result};
use crate::ops::{DatasetConfig, CHUNK_SIZE};
use std::io::Write;

/// Stream bytes from the dataset to `sink`, per spec.md §4.E's `read`
/// semantics: an explicit `length` must be fully contained in one existing
/// range or the call fails `ReadOutOfBounds`; an unspecified `length`
/// produces from `offset` to the end of whatever range contains it (zero
/// bytes, successfully, if `offset` is not indexed).
pub fn read(
    config: &DatasetConfig,
    offset: u64,
    length: Option<u64>,
    limit: Option<u64>,
    sink: &mut dyn Write,
) -> Result<()> {
    let paths = config.paths();
    let mut dataset = Dataset::open(&paths, Mode::ReadOnly)?;

    let to_produce = match length {
        Some(length) => {
            if let Some(limit) = limit {
                if length > limit {
                    return close_with(dataset, Err(Error::ReadOutOfBounds));
                }
            }
            let end = match offset.checked_add(length) {
                Some(end) => end,
                None => return close_with(dataset, Err(Error::ReadOutOfBounds)),
            };
            match dataset.index().query(offset) {
                Some(r) if end <= r.end => length,
                _ => return close_with(dataset, Err(Error::ReadOutOfBounds)),
            }
        }
        None => {
            let available = match dataset.index().query(offset) {
                Some(r) => r.end - offset,
                None => 0,
            };
            match limit {
                Some(limit) => available.min(limit),
                None => available,
            }
        }
    };

    let result = stream_bytes(&mut dataset, offset, to_produce, sink);
    close_with(dataset, result)
}

fn close_with(dataset: Dataset, result: Result<()>) -> Result<()> {
    match result {
        Ok(()) => dataset.close(),
        Err(e) => {
            let _ = dataset.close();
            Err(e)
        }
    }
}

fn stream_bytes(dataset: &mut Dataset, offset: u64, length: u64, sink: &mut dyn Write) -> Result<()> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    let end = offset + length;
    let mut pos = offset;
    while pos < end {
        let chunk_len = ((end - pos).min(CHUNK_SIZE as u64)) as usize;
        dataset.read_at(pos, &mut buf[..chunk_len])?;
        sink.write_all(&buf[..chunk_len])?;
        pos += chunk_len as u64;
    }
    Ok(())
}
