use lgr::{Flags, Level, MemorySink};

#[test]
fn test_log_macros_go_through_global_registry() {
    let registry = lgr::global();
    let file = MemorySink::new();
    registry.set_file_sink(file.clone());
    registry.set_console_destination(MemorySink::new());
    registry.set_flags(Flags::empty());
    registry.set_log_threshold(Level::Debug);
    lgr::init_log_facade().unwrap();

    log::debug!("via log {}", 1);
    log::trace!("dropped");
    lgr::warn!("via lgr {}", 2);
    lgr::feedback!("plain {}", 3);

    assert_eq!(
        file.lines(),
        vec!["DEBUG: via log 1", "WARN: via lgr 2", "LOG: plain 3"]
    );
    assert!(log::log_enabled!(log::Level::Info));
    assert!(!log::log_enabled!(log::Level::Trace));
}
