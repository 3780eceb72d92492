use crate::dataset::{Dataset, Mode};
use crate::error::{Error, Result};
use crate::ops::{DatasetConfig, CHUNK_SIZE};
use crate::ranges::Range;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

/// Where `add`'s incoming bytes come from.
#[derive(Debug, Clone)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    pub fn open(&self) -> io::Result<Box<dyn Read>> {
        match self {
            Source::Stdin => Ok(Box::new(io::stdin())),
            Source::File(path) => Ok(Box::new(File::open(path)?)),
        }
    }
}

/// How `add` reconciles incoming bytes with bytes already indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnConflict {
    Error,
    Keep,
    Overwrite,
}

/// Write `source`'s bytes at `offset`, reconciling with any pre-existing
/// indexed bytes per `on_conflict`, then insert `[offset, offset + L)` into
/// the index.
///
/// The `Error` policy is transactional: it scans for conflicts before
/// writing a single byte, so a conflict leaves both files untouched.
pub fn add(config: &DatasetConfig, offset: u64, source: &Source, on_conflict: OnConflict) -> Result<()> {
    let mut buf = Vec::new();
    source.open()?.read_to_end(&mut buf)?;

    let paths = config.paths();
    let mut dataset = Dataset::open(&paths, Mode::OpenOrCreate)?;

    match add_to_open_dataset(&mut dataset, offset, &buf, on_conflict) {
        Ok(()) => dataset.close(),
        Err(e) => {
            let _ = dataset.close();
            Err(e)
        }
    }
}

fn add_to_open_dataset(dataset: &mut Dataset, offset: u64, buf: &[u8], on_conflict: OnConflict) -> Result<()> {
    let len = buf.len() as u64;
    if len == 0 {
        return Ok(());
    }
    let end = offset
        .checked_add(len)
        .ok_or_else(|| Error::usage("offset + length overflows a 64-bit offset"))?;

    let overlaps: Vec<Range> = dataset
        .index()
        .iter(0)
        .filter(|r| r.start < end && r.end > offset)
        .map(|r| Range::new(r.start.max(offset), r.end.min(end)))
        .collect();

    match on_conflict {
        OnConflict::Error => {
            for r in &overlaps {
                verify_matches(dataset, *r, offset, buf)?;
            }
            grow_if_needed(dataset, end)?;
            dataset.write_at(offset, buf)?;
        }
        OnConflict::Overwrite => {
            grow_if_needed(dataset, end)?;
            dataset.write_at(offset, buf)?;
        }
        OnConflict::Keep => {
            grow_if_needed(dataset, end)?;
            write_excluding(dataset, offset, buf, &overlaps)?;
        }
    }

    dataset.flush_data()?;
    dataset.index_mut().insert(offset, end);
    Ok(())
}

fn grow_if_needed(dataset: &mut Dataset, end: u64) -> Result<()> {
    if end > dataset.data_len()? {
        dataset.set_data_len(end)?;
    }
    Ok(())
}

/// Compare existing bytes under `r` (a subregion of `[offset, offset+len)`)
/// against the corresponding slice of `buf`, in chunks of at most
/// [`CHUNK_SIZE`]. The first mismatch aborts with `DataConflict` before any
/// write has occurred.
fn verify_matches(dataset: &mut Dataset, r: Range, offset: u64, buf: &[u8]) -> Result<()> {
    let mut pos = r.start;
    while pos < r.end {
        let chunk_len = ((r.end - pos).min(CHUNK_SIZE as u64)) as usize;
        let mut existing = vec![0u8; chunk_len];
        dataset.read_at(pos, &mut existing)?;
        let start = (pos - offset) as usize;
        if existing != buf[start..start + chunk_len] {
            return Err(Error::DataConflict);
        }
        pos += chunk_len as u64;
    }
    Ok(())
}

/// Write every byte of `[offset, offset + buf.len())` except the subregions
/// named in `overlaps` (the `keep` policy's pre-existing bytes to preserve).
fn write_excluding(dataset: &mut Dataset, offset: u64, buf: &[u8], overlaps: &[Range]) -> Result<()> {
    let end = offset + buf.len() as u64;
    let mut cursor = offset;
    for r in overlaps {
        if cursor < r.start {
            let start = (cursor - offset) as usize;
            let stop = (r.start - offset) as usize;
            dataset.write_at(cursor, &buf[start..stop])?;
        }
        cursor = cursor.max(r.end);
    }
    if cursor < end {
        let start = (cursor - offset) as usize;
        dataset.write_at(cursor, &buf[start..])?;
    }
    Ok(())
}
