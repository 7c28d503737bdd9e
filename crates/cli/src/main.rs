fn main() {
    if let Err(e) = chanscope_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
