fn main() {
    if let Err(err) = facecrop::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
