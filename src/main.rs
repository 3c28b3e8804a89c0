fn main() {
    if let Err(err) = health_wrapped_lib::run() {
        log::error!("{err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
