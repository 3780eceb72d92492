use sparsebox::cli::{self, args::Args, help};
use sparsebox::error::Error;
use sparsebox::ops::{self, RangeFormat};
use std::io::{self, Write};

const NAME: &str = "list-ranges";

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if cli::handle_help_and_version(NAME, &raw, help::LIST_RANGES_FLAGS) {
        return;
    }
    std::process::exit(run(raw));
}

fn run(raw: Vec<String>) -> i32 {
    let args = match Args::parse(raw) {
        Ok(a) => a,
        Err(e) => return cli::report(NAME, help::LIST_RANGES_FLAGS, &e),
    };
    let config = match cli::dataset_config(&args) {
        Ok(c) => c,
        Err(e) => return cli::report(NAME, help::LIST_RANGES_FLAGS, &e),
    };
    let format = match args.get("range-format") {
        None | Some("inclusive") => RangeFormat::Inclusive,
        Some("exclusive") => RangeFormat::Exclusive,
        Some(other) => {
            let e = Error::usage(format!(
                "--range-format must be inclusive or exclusive, got {other:?}"
            ));
            return cli::report(NAME, help::LIST_RANGES_FLAGS, &e);
        }
    };
    let missing = args.has_flag("missing");

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    match ops::list_ranges(&config, missing, format, &mut lock) {
        Ok(()) => {
            let _ = lock.flush();
            0
        }
        Err(e) => cli::report(NAME, help::LIST_RANGES_FLAGS, &e),
    }
}
