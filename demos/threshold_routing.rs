use lgr::{Level, Registry};

fn main() {
    let registry = Registry::new();
    // everything from Debug is archived, the terminal only shows warnings and above
    registry.set_log_threshold(Level::Debug);
    registry.set_output_threshold(Level::Warn);
    let path = registry
        .use_temporary_file_destination("lgr-demo-")
        .expect("Unable to create log file");

    std::thread::scope(|s| {
        for i in 0..4 {
            let registry = &registry;
            s.spawn(move || {
                lgr::debug!(logger: registry, "worker {i} started");
                lgr::warn!(logger: registry, "worker {i} is running late");
            });
        }
    });

    registry.set_output_threshold(Level::Msg);
    lgr::msg!(logger: &registry, "log file is {}", path.display());
    for line in std::fs::read_to_string(&path).unwrap().lines() {
        println!("\t{line}");
    }
}
