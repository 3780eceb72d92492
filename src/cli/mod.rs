//! The CLI shell: common flag handling and error/exit-code formatting
//! shared by the seven binaries in `src/bin/`. Everything here is the
//! "external collaborator" spec.md keeps out of the core library's hard
//! part, kept thin on purpose.

pub mod args;
pub mod help;

use crate::error::Error;
use crate::ops::DatasetConfig;
use args::Args;

/// Pull the three common paths every command shares out of a parsed
/// argument set.
pub fn dataset_config(args: &Args) -> Result<DatasetConfig, Error> {
    let data_path = args
        .get_path("dataset")
        .ok_or_else(|| Error::usage("missing required --dataset"))?;
    Ok(DatasetConfig {
        data_path,
        index_path: args.get_path("index-path"),
        lockfile_path: args.get_path("lockfile-path"),
    })
}

/// Render one error exactly as spec.md §6/§7 describe: the fixed
/// kind-message, an `: <io detail>` suffix for `Io` errors, a blank line,
/// then whichever `Library error …` / `System error …` property lines
/// apply.
pub fn format_error(err: &Error) -> String {
    let mut s = format!("Error: {err}");
    if let Error::Io { source, .. } = err {
        s.push_str(&format!(": {source}"));
    }
    s.push_str("\n\n");
    if let Some(code) = err.code() {
        s.push_str(&format!("Library error name: {}\n", err.name()));
        s.push_str(&format!("Library error code: {code}\n"));
    }
    if let Some(cause) = err.system_cause() {
        s.push_str(&format!("System error name: {}\n", cause.name));
        s.push_str(&format!("System error code: {}\n", cause.code));
    }
    s
}

/// Print `err` to stderr and return the process's exit code: a bad-flags
/// `Usage` error gets its own message plus the command's usage block and
/// exits `2`; every other kind gets the full property-line report and
/// exits `3`.
pub fn report(name: &str, usage_flags: &[&str], err: &Error) -> i32 {
    match err {
        Error::Usage(_) => {
            eprintln!("Error: {err}\n");
            eprint!("{}", help::usage_text(name, usage_flags));
            2
        }
        _ => {
            eprint!("{}", format_error(err));
            3
        }
    }
}

/// `--help`/`--version` short-circuit every command before its own flags
/// are even parsed. Returns `true` (and has already printed) if either was
/// present.
pub fn handle_help_and_version(name: &str, raw: &[String], usage_flags: &[&str]) -> bool {
    if raw.iter().any(|a| a == "--help") {
        print!("{}", help::usage_text(name, usage_flags));
        return true;
    }
    if raw.iter().any(|a| a == "--version") {
        print!("{}", help::version_text(name));
        return true;
    }
    false
}
