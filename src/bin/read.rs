use sparsebox::cli::{self, args::Args, help};
use sparsebox::ops;
use std::io::{self, Write};

const NAME: &str = "read";

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if cli::handle_help_and_version(NAME, &raw, help::READ_FLAGS) {
        return;
    }
    std::process::exit(run(raw));
}

fn run(raw: Vec<String>) -> i32 {
    let args = match Args::parse(raw) {
        Ok(a) => a,
        Err(e) => return cli::report(NAME, help::READ_FLAGS, &e),
    };
    let config = match cli::dataset_config(&args) {
        Ok(c) => c,
        Err(e) => return cli::report(NAME, help::READ_FLAGS, &e),
    };
    let offset = match args.get_required_u64("offset") {
        Ok(v) => v,
        Err(e) => return cli::report(NAME, help::READ_FLAGS, &e),
    };
    let length = match args.get_u64("length") {
        Ok(v) => v,
        Err(e) => return cli::report(NAME, help::READ_FLAGS, &e),
    };
    let limit = match args.get_u64("limit") {
        Ok(v) => v,
        Err(e) => return cli::report(NAME, help::READ_FLAGS, &e),
    };

    let stdout = io::stdout();
    let mut lock = stdout.lock();
    match ops::read(&config, offset, length, limit, &mut lock) {
        Ok(()) => {
            let _ = lock.flush();
            0
        }
        Err(e) => cli::report(NAME, help::READ_FLAGS, &e),
    }
}
