use sparsebox::cli::{self, args::Args, help};
use sparsebox::ops;

const NAME: &str = "set-size";

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if cli::handle_help_and_version(NAME, &raw, help::SET_SIZE_FLAGS) {
        return;
    }
    std::process::exit(run(raw));
}

fn run(raw: Vec<String>) -> i32 {
    let args = match Args::parse(raw) {
        Ok(a) => a,
        Err(e) => return cli::report(NAME, help::SET_SIZE_FLAGS, &e),
    };
    let config = match cli::dataset_config(&args) {
        Ok(c) => c,
        Err(e) => return cli::report(NAME, help::SET_SIZE_FLAGS, &e),
    };
    let size = match args.get_required_u64("size") {
        Ok(v) => v,
        Err(e) => return cli::report(NAME, help::SET_SIZE_FLAGS, &e),
    };
    let force = args.has_flag("force");

    match ops::set_size(&config, size, force) {
        Ok(()) => 0,
        Err(e) => cli::report(NAME, help::SET_SIZE_FLAGS, &e),
    }
}
