fn main() {
    if let Err(err) = fundmap::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
