fn main() {
    if let Err(err) = cholock_lib::run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
