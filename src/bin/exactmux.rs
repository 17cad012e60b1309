fn main() {
    if let Err(err) = exactmux::cli::run_cli() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
