fn main() {
    if let Err(err) = bboxeval::run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
