use std::panic::Location;

use bitflags::bitflags;
use chrono::{Local, NaiveDateTime, Utc};

bitflags! {
    /// Selects the metadata rendered in front of every message.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u32 {
        /// the date: 2009/01/23
        const DATE = 1;
        /// the time: 01:23:23
        const TIME = 1 << 1;
        /// microsecond resolution: 01:23:23.123123, assumes TIME
        const MICROSECONDS = 1 << 2;
        /// full file name and line number: /a/b/c/d.rs:23
        const LONG_FILE = 1 << 3;
        /// final file name element and line number: d.rs:23, overrides LONG_FILE
        const SHORT_FILE = 1 << 4;
        /// function or module path of the caller
        const FUNCTION = 1 << 5;
        /// use UTC rather than the local time zone
        const UTC = 1 << 6;
    }
}

impl Default for Flags {
    fn default() -> Self {
        Flags::DATE | Flags::TIME | Flags::SHORT_FILE
    }
}

/// Rendered for caller parts that could not be resolved.
pub const UNKNOWN_CALLER: &str = "???";

/// Where a log call came from. Every part is optional: a missing part is
/// rendered with [`UNKNOWN_CALLER`] rather than failing the log call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caller<'a> {
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    pub function: Option<&'a str>,
}

impl Caller<'static> {
    /// Location of the (tracked) caller, without function name.
    #[track_caller]
    pub fn here() -> Self {
        let location = Location::caller();
        Self {
            file: Some(location.file()),
            line: Some(location.line()),
            function: None,
        }
    }
}

impl<'a> Caller<'a> {
    pub fn new(file: &'a str, line: u32, function: &'a str) -> Self {
        Self {
            file: Some(file),
            line: Some(line),
            function: Some(function),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    fn file_line(&self, short: bool) -> String {
        let file = match self.file {
            Some(file) if short => file.rsplit(['/', '\\']).next().unwrap_or(file),
            Some(file) => file,
            None => UNKNOWN_CALLER,
        };
        format!("{file}:{}", self.line.unwrap_or(0))
    }
}

/// Renders the metadata header for `flags` at the instant `now`.
pub fn render_header(flags: Flags, caller: &Caller<'_>, now: NaiveDateTime) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if flags.contains(Flags::DATE) {
        parts.push(now.format("%Y/%m/%d").to_string());
    }
    if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
        let time = if flags.contains(Flags::MICROSECONDS) {
            now.format("%H:%M:%S%.6f")
        } else {
            now.format("%H:%M:%S")
        };
        parts.push(time.to_string());
    }
    let mut location = String::new();
    if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
        location = caller.file_line(flags.contains(Flags::SHORT_FILE));
    }
    if flags.contains(Flags::FUNCTION) {
        if !location.is_empty() {
            location.push(' ');
        }
        location.push_str(caller.function.unwrap_or(UNKNOWN_CALLER));
    }
    if location.is_empty() {
        return parts.into_iter().map(|part| part + " ").collect();
    }
    parts.push(location);
    parts.join(" ") + ": "
}

/// Renders the header for the current wall-clock time.
pub fn header_now(flags: Flags, caller: &Caller<'_>) -> String {
    if flags.is_empty() {
        return String::new();
    }
    let now = if flags.contains(Flags::UTC) {
        Utc::now().naive_utc()
    } else {
        Local::now().naive_local()
    };
    render_header(flags, caller, now)
}

/// One formatted log line, split into the pieces sinks pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub prefix: String,
    pub header: String,
    pub message: String,
}

impl Line {
    pub fn new(
        prefix: impl Into<String>,
        header: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut message = message.into();
        if message.ends_with('\n') {
            message.pop();
        }
        Self {
            prefix: prefix.into(),
            header: header.into(),
            message,
        }
    }

    /// Prefix, header and message, without the newline.
    pub fn verbose_text(&self) -> String {
        format!("{}{}{}", self.prefix, self.header, self.message)
    }

    /// Prefix and message, without the newline.
    pub fn plain_text(&self) -> String {
        format!("{}{}", self.prefix, self.message)
    }

    /// The persisted form: everything, newline terminated.
    pub fn full(&self) -> String {
        self.verbose_text() + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2009, 1, 23)
            .unwrap()
            .and_hms_micro_opt(1, 23, 23, 123_123)
            .unwrap()
    }

    #[test]
    fn test_default_header() {
        let caller = Caller::new("/a/b/c/d.rs", 23, "d::main");
        assert_eq!(
            render_header(Flags::default(), &caller, instant()),
            "2009/01/23 01:23:23 d.rs:23: "
        );
    }

    #[test]
    fn test_long_file_microseconds_function() {
        let caller = Caller::new("/a/b/c/d.rs", 23, "d::main");
        let flags = Flags::TIME | Flags::MICROSECONDS | Flags::LONG_FILE | Flags::FUNCTION;
        assert_eq!(
            render_header(flags, &caller, instant()),
            "01:23:23.123123 /a/b/c/d.rs:23 d::main: "
        );
    }

    #[test]
    fn test_short_file_overrides_long_file() {
        let caller = Caller::new("src\\nested\\x.rs", 7, "x");
        let flags = Flags::LONG_FILE | Flags::SHORT_FILE;
        assert_eq!(render_header(flags, &caller, instant()), "x.rs:7: ");
    }

    #[test]
    fn test_unknown_caller_uses_sentinels() {
        let flags = Flags::SHORT_FILE | Flags::FUNCTION;
        assert_eq!(
            render_header(flags, &Caller::unknown(), instant()),
            "???:0 ???: "
        );
    }

    #[test]
    fn test_date_only_header() {
        assert_eq!(
            render_header(Flags::DATE, &Caller::unknown(), instant()),
            "2009/01/23 "
        );
        assert_eq!(header_now(Flags::empty(), &Caller::unknown()), "");
    }

    #[test]
    fn test_caller_here_points_at_this_file() {
        let caller = Caller::here();
        assert!(caller.file.unwrap().ends_with("line.rs"));
        assert!(caller.function.is_none());
    }

    #[test]
    fn test_line_renderings() {
        let line = Line::new("WARN: ", "01:23:23 d.rs:23: ", "disk almost full\n");
        assert_eq!(line.message, "disk almost full");
        assert_eq!(line.full(), "WARN: 01:23:23 d.rs:23: disk almost full\n");
        assert_eq!(line.plain_text(), "WARN: disk almost full");
    }
}
