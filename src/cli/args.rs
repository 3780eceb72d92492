//! Hand-rolled `--flag=value` / `--flag value` / `--flag` argument parsing.
//!
//! No derive-macro framework: the external contract fixes the exact text of
//! `--help`/`--version` output, which a framework's own templates fight
//! rather than produce verbatim. See `cli::help` for that text.

use crate::error::Error;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Flags that never take a value — every other `--flag` with no embedded
/// `=` consumes the following token as its value.
const BOOLEAN_FLAGS: &[&str] = &["force", "missing", "help", "version"];

/// A parsed command line: every `--key=value`, `--key value`, and bare
/// `--key` entry, order-independent, last write wins on duplicates.
#[derive(Debug, Default)]
pub struct Args {
    values: HashMap<String, String>,
    flags: HashSet<String>,
}

impl Args {
    pub fn parse(raw: impl IntoIterator<Item = String>) -> Result<Self, Error> {
        let mut args = Args::default();
        let mut iter = raw.into_iter();
        while let Some(arg) = iter.next() {
            let rest = arg
                .strip_prefix("--")
                .ok_or_else(|| Error::usage(format!("unrecognized argument: {arg}")))?;
            if rest.is_empty() {
                return Err(Error::usage("unrecognized argument: --"));
            }
            match rest.split_once('=') {
                Some((key, value)) => {
                    args.values.insert(key.to_string(), value.to_string());
                }
                None if BOOLEAN_FLAGS.contains(&rest) => {
                    args.flags.insert(rest.to_string());
                }
                None => {
                    let value = iter
                        .next()
                        .ok_or_else(|| Error::usage(format!("--{rest} requires a value")))?;
                    args.values.insert(rest.to_string(), value);
                }
            }
        }
        Ok(args)
    }

    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name) || self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn get_path(&self, name: &str) -> Option<PathBuf> {
        self.get(name).map(PathBuf::from)
    }

    pub fn get_u64(&self, name: &str) -> Result<Option<u64>, Error> {
        match self.get(name) {
            Some(v) => v.parse::<u64>().map(Some).map_err(|_| {
                Error::usage(format!("--{name} must be a non-negative integer, got {v:?}"))
            }),
            None => Ok(None),
        }
    }

    pub fn get_required(&self, name: &str) -> Result<&str, Error> {
        self.get(name)
            .ok_or_else(|| Error::usage(format!("missing required --{name}")))
    }

    pub fn get_required_u64(&self, name: &str) -> Result<u64, Error> {
        self.get_required(name)?
            .parse::<u64>()
            .map_err(|_| Error::usage(format!("--{name} must be a non-negative integer")))
    }
}
