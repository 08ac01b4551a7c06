use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard},
};

use lgr_core::{
    Caller, ConsoleSink, DiscardSink, FileSink, Flags, Level, LgrConfig, Line, Result, SharedSink,
    Sink, Style, header_now,
};
use log::{Log, Metadata, Record};

use crate::{
    channel::{Channel, default_channels},
    router::{self, DestinationKind},
};

/// Prefix of the persisted copy of a [`Registry::feedback`] message.
pub const FEEDBACK_PREFIX: &str = "LOG: ";

struct State {
    log_threshold: Level,
    output_threshold: Level,
    flags: Flags,
    file: SharedSink,
    file_path: Option<PathBuf>,
    console: SharedSink,
    channels: [Channel; 8],
}

impl State {
    fn refresh(&mut self) {
        router::refresh(
            &mut self.channels,
            self.output_threshold,
            self.log_threshold,
            &self.file,
            &self.console,
        );
    }

    fn channel_mut(&mut self, level: Level) -> &mut Channel {
        &mut self.channels[level.index()]
    }
}

/// Owns the thresholds, the file and console destinations, and the eight
/// level channels.
///
/// Every mutator applies its change and re-routes all channels under a single
/// write lock, so concurrent log calls see either the old routing or the new
/// one. Log calls only hold the read lock while copying the destination of
/// their channel; the write itself happens outside the lock.
///
/// ```rust
/// use lgr::{Level, MemorySink, Registry};
///
/// let registry = Registry::new();
/// let file = MemorySink::new();
/// registry.set_file_sink(file.clone());
/// registry.set_console_destination(MemorySink::new());
/// registry.set_log_threshold(Level::Debug);
/// registry.set_output_threshold(Level::Warn);
///
/// registry.info().printf(format_args!("{} items indexed", 42)).unwrap();
/// assert!(file.contents().contains("INFO: "));
/// assert!(file.contents().ends_with("42 items indexed\n"));
/// ```
pub struct Registry {
    state: RwLock<State>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Logs `Info` and above to the file, shows `Msg` and above on stdout.
    /// The file destination starts out discarding.
    pub fn new() -> Self {
        Self::with_config(&LgrConfig::default())
    }

    pub fn with_config(config: &LgrConfig) -> Self {
        let mut state = State {
            log_threshold: config.log_threshold(),
            output_threshold: config.output_threshold(),
            flags: Flags::default(),
            file: Arc::new(DiscardSink),
            file_path: None,
            console: Arc::new(ConsoleSink::stdout()),
            channels: default_channels(),
        };
        state.refresh();
        Self {
            state: RwLock::new(state),
        }
    }

    /// Built from the `LGR_*` environment variables.
    pub fn from_env() -> Self {
        Self::with_config(&lgr_core::LGR_CONFIG)
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<R>(&self, apply: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let result = apply(&mut state);
        state.refresh();
        result
    }

    // --- emitting ---

    pub fn channel(&self, level: Level) -> ChannelHandle<'_> {
        ChannelHandle {
            registry: self,
            level,
        }
    }

    pub fn trace(&self) -> ChannelHandle<'_> {
        self.channel(Level::Trace)
    }

    pub fn debug(&self) -> ChannelHandle<'_> {
        self.channel(Level::Debug)
    }

    pub fn info(&self) -> ChannelHandle<'_> {
        self.channel(Level::Info)
    }

    pub fn msg(&self) -> ChannelHandle<'_> {
        self.channel(Level::Msg)
    }

    pub fn warn(&self) -> ChannelHandle<'_> {
        self.channel(Level::Warn)
    }

    pub fn error(&self) -> ChannelHandle<'_> {
        self.channel(Level::Error)
    }

    pub fn critical(&self) -> ChannelHandle<'_> {
        self.channel(Level::Critical)
    }

    pub fn fatal(&self) -> ChannelHandle<'_> {
        self.channel(Level::Fatal)
    }

    /// Formats one line and hands it to the current destination of `level`.
    ///
    /// Each physical output receives at most one write. Nothing is formatted
    /// when the level is discarded.
    pub fn emit(
        &self,
        level: Level,
        caller: Caller<'_>,
        args: fmt::Arguments<'_>,
    ) -> Result<()> {
        let (destination, prefix, flags) = {
            let state = self.read();
            let channel = &state.channels[level.index()];
            match (channel.kind(), &channel.destination) {
                (Some(kind), Some(destination)) if kind != DestinationKind::Discard => (
                    Arc::clone(destination),
                    channel.rendered_prefix(),
                    state.flags,
                ),
                _ => return Ok(()),
            }
        };
        let line = Line::new(prefix, header_now(flags, &caller), args.to_string());
        destination.write_line(&line)?;
        Ok(())
    }

    /// Shows the message as is on the console and persists it, with the full
    /// header and [`FEEDBACK_PREFIX`], to the file destination. Thresholds do
    /// not apply.
    pub fn feedback(&self, caller: Caller<'_>, args: fmt::Arguments<'_>) -> Result<()> {
        let (console, file, flags) = {
            let state = self.read();
            (Arc::clone(&state.console), Arc::clone(&state.file), state.flags)
        };
        let message = args.to_string();
        let shown = Line::new("", "", message.clone());
        let persisted = Line::new(FEEDBACK_PREFIX, header_now(flags, &caller), message);
        let shown = console.write(shown.full().as_bytes());
        let persisted = file.write_line(&persisted);
        shown.and(persisted)?;
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        let (console, file) = {
            let state = self.read();
            (Arc::clone(&state.console), Arc::clone(&state.file))
        };
        let console = console.flush();
        let file = file.flush();
        console.and(file)?;
        Ok(())
    }

    // --- thresholds ---

    /// Minimum level persisted to the file destination. Out-of-range ranks are
    /// clamped; the applied level is returned.
    pub fn set_log_threshold(&self, level: impl Into<i64>) -> Level {
        let level = Level::clamp(level.into());
        self.update(|state| state.log_threshold = level);
        level
    }

    /// Minimum level shown on the console. Out-of-range ranks are clamped; the
    /// applied level is returned.
    pub fn set_output_threshold(&self, level: impl Into<i64>) -> Level {
        let level = Level::clamp(level.into());
        self.update(|state| state.output_threshold = level);
        level
    }

    pub fn log_threshold(&self) -> Level {
        self.read().log_threshold
    }

    pub fn output_threshold(&self) -> Level {
        self.read().output_threshold
    }

    // --- destinations ---

    /// Appends to `path`, creating it if needed.
    ///
    /// When the file cannot be opened the error is returned and the previous
    /// file destination stays in effect.
    pub fn set_file_destination<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let sink = FileSink::open(path)?;
        let path = sink.path().to_path_buf();
        self.update(|state| {
            state.file = Arc::new(sink);
            state.file_path = Some(path);
        });
        Ok(())
    }

    /// Logs to a new file in the system temp directory whose name starts with
    /// `prefix`, and returns its path.
    pub fn use_temporary_file_destination(&self, prefix: &str) -> Result<PathBuf> {
        let sink = FileSink::temporary(prefix)?;
        let path = sink.path().to_path_buf();
        self.update(|state| {
            state.file = Arc::new(sink);
            state.file_path = Some(path.clone());
        });
        Ok(path)
    }

    /// Persists to an arbitrary sink instead of a file.
    pub fn set_file_sink(&self, sink: impl Sink + 'static) {
        self.update(|state| {
            state.file = Arc::new(sink);
            state.file_path = None;
        });
    }

    /// Stops persisting. The console is unaffected.
    pub fn discard_logging(&self) {
        self.set_file_sink(DiscardSink);
    }

    /// Replaces stdout as the console destination.
    pub fn set_console_destination(&self, sink: impl Sink + 'static) {
        self.update(|state| state.console = Arc::new(sink));
    }

    /// Path of the current log file, if logging to a file.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.read().file_path.clone()
    }

    pub fn destination_kind(&self, level: Level) -> Option<DestinationKind> {
        self.read().channels[level.index()].kind()
    }

    /// Destination kind of every channel, ordered by level.
    pub fn routing(&self) -> Vec<(Level, Option<DestinationKind>)> {
        self.read()
            .channels
            .iter()
            .map(|channel| (channel.level(), channel.kind()))
            .collect()
    }

    // --- formatting ---

    pub fn set_flags(&self, flags: Flags) {
        self.update(|state| state.flags = flags);
    }

    pub fn flags(&self) -> Flags {
        self.read().flags
    }

    /// Replaces the prefix of every channel.
    pub fn set_prefix(&self, prefix: &str) {
        self.update(|state| {
            for channel in &mut state.channels {
                channel.prefix = prefix.to_string();
            }
        });
    }

    /// Appends to the prefix of every channel.
    pub fn append_prefix(&self, text: &str) {
        self.update(|state| {
            for channel in &mut state.channels {
                channel.prefix.push_str(text);
            }
        });
    }

    pub fn set_channel_prefix(&self, level: Level, prefix: &str) {
        self.update(|state| state.channel_mut(level).prefix = prefix.to_string());
    }

    pub fn append_channel_prefix(&self, level: Level, text: &str) {
        self.update(|state| state.channel_mut(level).prefix.push_str(text));
    }

    /// Whether the level name follows the custom prefix, on every channel.
    pub fn set_prefix_name(&self, enabled: bool) {
        self.update(|state| {
            for channel in &mut state.channels {
                channel.prefix_name = enabled;
            }
        });
    }

    /// The text currently written in front of each line of `level`.
    pub fn prefix(&self, level: Level) -> String {
        self.read().channels[level.index()].rendered_prefix()
    }

    /// Whether console lines of `level` carry the header.
    pub fn set_verbose(&self, level: Level, verbose: bool) {
        self.update(|state| state.channel_mut(level).verbose = verbose);
    }

    pub fn set_style(&self, level: Level, style: Style) {
        self.update(|state| state.channel_mut(level).style = style);
    }
}

impl Log for Registry {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.destination_kind(metadata.level().into())
            .is_some_and(|kind| kind != DestinationKind::Discard)
    }

    fn log(&self, record: &Record) {
        let caller = Caller {
            file: record.file(),
            line: record.line(),
            function: record.module_path(),
        };
        let _ = self.emit(record.level().into(), caller, *record.args());
    }

    fn flush(&self) {
        let _ = Registry::flush(self);
    }
}

/// Entry points of a single level.
#[derive(Clone, Copy)]
pub struct ChannelHandle<'a> {
    registry: &'a Registry,
    level: Level,
}

impl ChannelHandle<'_> {
    pub fn level(&self) -> Level {
        self.level
    }

    /// False when the level is currently discarded.
    pub fn is_enabled(&self) -> bool {
        self.registry
            .destination_kind(self.level)
            .is_some_and(|kind| kind != DestinationKind::Discard)
    }

    /// Writes the values back to back.
    #[track_caller]
    pub fn print(&self, values: &[&dyn Display]) -> Result<()> {
        let message: String = values.iter().map(|value| value.to_string()).collect();
        self.registry
            .emit(self.level, Caller::here(), format_args!("{message}"))
    }

    /// Writes the values separated by single spaces.
    #[track_caller]
    pub fn println(&self, values: &[&dyn Display]) -> Result<()> {
        let message = values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.registry
            .emit(self.level, Caller::here(), format_args!("{message}"))
    }

    /// `handle.printf(format_args!("{} of {}", done, total))`
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.registry.emit(self.level, Caller::here(), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lgr_core::{LgrError, MemorySink};

    fn captured() -> (Registry, MemorySink, MemorySink) {
        let registry = Registry::new();
        let file = MemorySink::new();
        let console = MemorySink::new();
        registry.set_file_sink(file.clone());
        registry.set_console_destination(console.clone());
        registry.set_flags(Flags::empty());
        (registry, file, console)
    }

    #[test]
    fn test_defaults() {
        let registry = Registry::new();
        assert_eq!(registry.log_threshold(), Level::Info);
        assert_eq!(registry.output_threshold(), Level::Msg);
        assert_eq!(registry.flags(), Flags::default());
        assert!(registry.file_path().is_none());
        assert!(registry.routing().iter().all(|(_, kind)| kind.is_some()));
        assert_eq!(
            registry.destination_kind(Level::Debug),
            Some(DestinationKind::Discard)
        );
        assert_eq!(
            registry.destination_kind(Level::Info),
            Some(DestinationKind::File)
        );
        assert_eq!(
            registry.destination_kind(Level::Msg),
            Some(DestinationKind::Both)
        );
    }

    #[test]
    fn test_thresholds_are_clamped() {
        let registry = Registry::new();
        assert_eq!(registry.set_log_threshold(-5), Level::Trace);
        assert_eq!(registry.set_output_threshold(99), Level::Fatal);
        assert_eq!(registry.log_threshold(), Level::Trace);
        assert_eq!(registry.output_threshold(), Level::Fatal);
        assert_eq!(
            registry.destination_kind(Level::Error),
            Some(DestinationKind::File)
        );
    }

    #[test]
    fn test_file_only_and_both() {
        let (registry, file, console) = captured();
        registry.set_output_threshold(Level::Warn);
        registry.set_log_threshold(Level::Debug);

        registry.info().println(&[&"cache", &"warmed"]).unwrap();
        assert_eq!(file.contents(), "INFO: cache warmed\n");
        assert!(console.is_empty());

        registry.error().print(&[&"disk ", &"full"]).unwrap();
        assert_eq!(file.lines(), vec!["INFO: cache warmed", "ERROR: disk full"]);
        assert_eq!(console.lines().len(), 1);
        assert!(console.contents().contains("ERROR: disk full"));
    }

    #[test]
    fn test_discarded_levels_write_nothing() {
        let (registry, file, console) = captured();
        registry.trace().printf(format_args!("noise")).unwrap();
        assert!(file.is_empty());
        assert!(console.is_empty());
        assert!(!registry.trace().is_enabled());
        assert!(registry.info().is_enabled());
    }

    #[test]
    fn test_console_verbosity_follows_channel() {
        let (registry, file, console) = captured();
        registry.set_flags(Flags::SHORT_FILE);
        registry.set_output_threshold(Level::Trace);
        registry.msg().printf(format_args!("terse")).unwrap();
        registry.warn().printf(format_args!("chatty")).unwrap();
        let shown = console.lines();
        assert!(shown[0].contains("MSG: terse"));
        assert!(shown[1].contains("WARN: registry.rs:"));
        for line in file.lines() {
            assert!(line.contains("registry.rs:"), "{line}");
        }

        registry.set_verbose(Level::Msg, true);
        console.clear();
        registry.msg().printf(format_args!("now verbose")).unwrap();
        assert!(console.contents().contains("MSG: registry.rs:"));
    }

    #[test]
    fn test_prefixes() {
        let (registry, file, _) = captured();
        registry.set_prefix("[app] ");
        registry.append_channel_prefix(Level::Warn, "(db) ");
        registry.warn().printf(format_args!("slow query")).unwrap();
        registry.append_prefix("> ");
        registry.info().printf(format_args!("started")).unwrap();
        registry.set_prefix_name(false);
        registry.set_channel_prefix(Level::Error, "");
        registry.error().printf(format_args!("bare")).unwrap();
        assert_eq!(
            file.lines(),
            vec!["[app] (db) WARN: slow query", "[app] > INFO: started", "bare"]
        );
        assert_eq!(registry.prefix(Level::Info), "[app] > ");
    }

    #[test]
    fn test_discard_logging_keeps_console() {
        let (registry, file, console) = captured();
        registry.discard_logging();
        registry.set_output_threshold(Level::Msg);
        registry.fatal().printf(format_args!("meltdown")).unwrap();
        assert!(file.is_empty());
        assert!(console.contents().contains("FATAL: meltdown"));
    }

    #[test]
    fn test_failed_file_destination_leaves_state() {
        let (registry, file, _) = captured();
        let dir = tempfile::tempdir().unwrap();
        let result = registry.set_file_destination(dir.path().join("no/such/dir/x.log"));
        assert!(matches!(result, Err(LgrError::Configuration { .. })));
        assert!(registry.file_path().is_none());
        registry.info().printf(format_args!("still here")).unwrap();
        assert_eq!(file.contents(), "INFO: still here\n");
    }

    #[test]
    fn test_feedback() {
        let (registry, file, console) = captured();
        registry.set_log_threshold(Level::Fatal);
        registry.set_output_threshold(Level::Fatal);
        registry
            .feedback(Caller::unknown(), format_args!("3 files copied"))
            .unwrap();
        assert_eq!(console.contents(), "3 files copied\n");
        assert_eq!(file.contents(), "LOG: 3 files copied\n");
    }

    #[test]
    fn test_write_error_is_returned_and_logging_continues() {
        struct Full;
        impl Sink for Full {
            fn write(&self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"))
            }
        }
        let (registry, _, console) = captured();
        registry.set_file_sink(Full);
        let err = registry.error().printf(format_args!("first")).unwrap_err();
        assert!(matches!(err, LgrError::Write(_)));
        assert!(console.contents().contains("first"));
        assert!(registry.error().printf(format_args!("second")).is_err());
        assert!(console.contents().contains("second"));
    }

    #[test]
    fn test_log_facade_records() {
        let (registry, file, _) = captured();
        registry.set_flags(Flags::SHORT_FILE | Flags::FUNCTION);
        registry.log(
            &Record::builder()
                .args(format_args!("from log"))
                .level(log::Level::Warn)
                .file(Some("src/worker.rs"))
                .line(Some(12))
                .module_path(Some("app::worker"))
                .build(),
        );
        registry.log(
            &Record::builder()
                .args(format_args!("no location"))
                .level(log::Level::Info)
                .build(),
        );
        assert_eq!(
            file.lines(),
            vec![
                "WARN: worker.rs:12 app::worker: from log",
                "INFO: ???:0 ???: no location",
            ]
        );
        assert!(!registry.enabled(&Metadata::builder().level(log::Level::Trace).build()));
    }
}
