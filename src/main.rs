fn main() {
    env_logger::init();
    if let Err(err) = dbfig::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
