//! Foresight command-line entry point.

fn main() {
    if let Err(err) = foresight_lib::cli::run() {
        eprintln!("foresight: {err}");
        std::process::exit(1);
    }
}
