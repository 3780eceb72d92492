use sparsebox::cli::{self, args::Args, help};
use sparsebox::ops;
use std::io::{self, Write};

const NAME: &str = "get-index";

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if cli::handle_help_and_version(NAME, &raw, help::GET_INDEX_FLAGS) {
        return;
    }
    std::process::exit(run(raw));
}

fn run(raw: Vec<String>) -> i32 {
    let args = match Args::parse(raw) {
        Ok(a) => a,
        Err(e) => return cli::report(NAME, help::GET_INDEX_FLAGS, &e),
    };
    let config = match cli::dataset_config(&args) {
        Ok(c) => c,
        Err(e) => return cli::report(NAME, help::GET_INDEX_FLAGS, &e),
    };
    let min_range_length = match args.get_u64("min-range-length") {
        Ok(v) => v.unwrap_or(0),
        Err(e) => return cli::report(NAME, help::GET_INDEX_FLAGS, &e),
    };

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    match ops::get_index(&config, min_range_length, &mut lock) {
        Ok(()) => {
            let _ = lock.flush();
            0
        }
        Err(e) => cli::report(NAME, help::GET_INDEX_FLAGS, &e),
    }
}
