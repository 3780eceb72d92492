use sparsebox::cli::{self, args::Args, help};
use sparsebox::error::Error;
use sparsebox::ops::{self, FindOffsetOutcome, StopAt};

const NAME: &str = "find-offset";

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if cli::handle_help_and_version(NAME, &raw, help::FIND_OFFSET_FLAGS) {
        return;
    }
    std::process::exit(run(raw));
}

fn run(raw: Vec<String>) -> i32 {
    let args = match Args::parse(raw) {
        Ok(a) => a,
        Err(e) => return cli::report(NAME, help::FIND_OFFSET_FLAGS, &e),
    };
    let config = match cli::dataset_config(&args) {
        Ok(c) => c,
        Err(e) => return cli::report(NAME, help::FIND_OFFSET_FLAGS, &e),
    };
    let start_at = match args.get_required_u64("start-at") {
        Ok(v) => v,
        Err(e) => return cli::report(NAME, help::FIND_OFFSET_FLAGS, &e),
    };
    let stop_at = match args.get_required("stop-at") {
        Ok("data") => StopAt::Data,
        Ok("no-data") => StopAt::NoData,
        Ok(other) => {
            let e = Error::usage(format!("--stop-at must be data or no-data, got {other:?}"));
            return cli::report(NAME, help::FIND_OFFSET_FLAGS, &e);
        }
        Err(e) => return cli::report(NAME, help::FIND_OFFSET_FLAGS, &e),
    };

    match ops::find_offset(&config, start_at, stop_at) {
        Ok(FindOffsetOutcome::Found(offset)) => {
            println!("{offset}");
            0
        }
        Ok(FindOffsetOutcome::NoResult) => 1,
        Err(e) => cli::report(NAME, help::FIND_OFFSET_FLAGS, &e),
    }
}
