use lgr::{Flags, Level, MemorySink, Registry};

#[test]
fn test_style_reaches_console_but_not_file() {
    lgr::set_color_override(Some(true));
    let registry = Registry::new();
    let file = MemorySink::new();
    let console = MemorySink::new();
    registry.set_file_sink(file.clone());
    registry.set_console_destination(console.clone());
    registry.set_flags(Flags::empty());

    registry.error().printf(format_args!("boom")).unwrap();
    registry.warn().printf(format_args!("careful")).unwrap();
    lgr::set_color_override(None);

    assert_eq!(file.contents(), "ERROR: boom\nWARN: careful\n");
    assert!(!file.contents().contains('\x1b'));

    let shown = console.lines();
    assert_eq!(shown.len(), 2);
    assert!(shown[0].starts_with("\x1b[31m"), "{:?}", shown[0]);
    assert!(shown[0].contains("ERROR: boom"));
    assert!(shown[0].ends_with("\x1b[0m"), "{:?}", shown[0]);
    assert!(shown[1].starts_with("\x1b["), "{:?}", shown[1]);
    assert!(shown[1].contains("WARN: careful"));
    assert!(console.contents().ends_with("\x1b[0m\n"));
}

#[test]
fn test_plain_style_adds_no_escapes() {
    let registry = Registry::new();
    let console = MemorySink::new();
    registry.set_console_destination(console.clone());
    registry.set_flags(Flags::empty());
    registry.set_style(Level::Msg, lgr::Style::PLAIN);

    registry.msg().printf(format_args!("untouched")).unwrap();
    assert_eq!(console.contents(), "MSG: untouched\n");
}
