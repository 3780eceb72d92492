use sparsebox::cli::{self, args::Args, help};
use sparsebox::error::Error;
use sparsebox::ops::{self, OnConflict, Source};

const NAME: &str = "add";

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if cli::handle_help_and_version(NAME, &raw, help::ADD_FLAGS) {
        return;
    }
    std::process::exit(run(raw));
}

fn run(raw: Vec<String>) -> i32 {
    let args = match Args::parse(raw) {
        Ok(a) => a,
        Err(e) => return cli::report(NAME, help::ADD_FLAGS, &e),
    };
    let config = match cli::dataset_config(&args) {
        Ok(c) => c,
        Err(e) => return cli::report(NAME, help::ADD_FLAGS, &e),
    };
    let offset = match args.get_required_u64("offset") {
        Ok(v) => v,
        Err(e) => return cli::report(NAME, help::ADD_FLAGS, &e),
    };
    let source = match args.get_path("source") {
        Some(path) => Source::File(path),
        None => Source::Stdin,
    };
    let on_conflict = match args.get("on-conflict") {
        None | Some("error") => OnConflict::Error,
        Some("keep") => OnConflict::Keep,
        Some("overwrite") => OnConflict::Overwrite,
        Some(other) => {
            let e = Error::usage(format!(
                "--on-conflict must be error, keep, or overwrite, got {other:?}"
            ));
            return cli::report(NAME, help::ADD_FLAGS, &e);
        }
    };

    match ops::add(&config, offset, &source, on_conflict) {
        Ok(()) => 0,
        Err(e) => cli::report(NAME, help::ADD_FLAGS, &e),
    }
}
