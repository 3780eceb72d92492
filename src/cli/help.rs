//! Usage/help/version text, byte-for-byte per the external CLI contract:
//! `--help` prints a block starting with `Usage: <cmd> [options]`, every
//! line at most 80 columns, each flag named at the very start of its own
//! line; `--version` prints `<cmd> <version>\n`.

pub const VERSION: &str = "1.0.0";

/// Flags accepted by every command.
pub const COMMON_FLAGS: &[&str] = &[
    "--dataset <path>        Path to the data file (required)",
    "--index-path <path>     Path to the index file (default <dataset>.idx)",
    "--lockfile-path <path>  Path to the lockfile (default <dataset>.lock)",
    "--help                  Print this usage block and exit",
    "--version               Print the version number and exit",
];

pub const CREATE_FLAGS: &[&str] = &[
    "--size=<N>              Extend the new data file to N bytes (default 0)",
];

pub const ADD_FLAGS: &[&str] = &[
    "--offset=<N>            Byte offset at which to write (required)",
    "--source=<path>         File to read bytes from (default stdin)",
    "--on-conflict=<policy>  error, keep, or overwrite (default error)",
];

pub const READ_FLAGS: &[&str] = &[
    "--offset=<N>            Byte offset to read from (required)",
    "--length=<N>            Exact number of bytes to read",
    "--limit=<N>             Cap on the number of bytes produced",
];

pub const FIND_OFFSET_FLAGS: &[&str] = &[
    "--start-at=<N>          Byte offset to search from (required)",
    "--stop-at=<predicate>   data or no-data (required)",
];

pub const LIST_RANGES_FLAGS: &[&str] = &[
    "--range-format=<fmt>    inclusive or exclusive (default inclusive)",
    "--missing               List the complement instead of indexed ranges",
];

pub const GET_INDEX_FLAGS: &[&str] = &[
    "--min-range-length=<N>  Drop ranges shorter than N bytes (default 0)",
];

pub const SET_SIZE_FLAGS: &[&str] = &[
    "--size=<N>              New data file length in bytes (required)",
    "--force                 Allow a shrink that drops indexed bytes",
];

/// Render `Usage: <name> [options]` followed by the common flags and
/// `extra_flags`, one per line.
pub fn usage_text(name: &str, extra_flags: &[&str]) -> String {
    let mut out = format!("Usage: {name} [options]\n");
    for line in COMMON_FLAGS.iter().chain(extra_flags.iter()) {
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn version_text(name: &str) -> String {
    format!("{name} {VERSION}\n")
}
