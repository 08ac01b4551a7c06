use std::{convert::Infallible, fmt, str::FromStr};

/// Severity of a log line, from the chattiest to the most urgent.
///
/// The order is fixed; only the thresholds move along it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Excessive user output
    Trace = 0,
    /// Detailed user output
    Debug = 1,
    /// Elevated user output
    Info = 2,
    /// Standard user output
    Msg = 3,
    /// Non-critical errors
    Warn = 4,
    /// Important errors
    Error = 5,
    /// Disrupting errors
    Critical = 6,
    /// System destroying, flee the building errors
    Fatal = 7,
}

/// Returned by [`name_by_rank`] when the rank matches no level.
pub const UNKNOWN_LEVEL_NAME: &str = "<unknown level name>";

impl Level {
    /// Every level, in ascending order.
    pub const ALL: [Level; 8] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Msg,
        Level::Warn,
        Level::Error,
        Level::Critical,
        Level::Fatal,
    ];

    /// Level returned by [`Level::by_name`] when nothing matches.
    pub const DEFAULT: Level = Level::Info;

    pub fn rank(self) -> i64 {
        self as i64
    }

    /// Position of the level in [`Level::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Brings any rank back into `[Trace, Fatal]`.
    pub fn clamp(rank: i64) -> Level {
        match rank {
            i64::MIN..=0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Msg,
            4 => Level::Warn,
            5 => Level::Error,
            6 => Level::Critical,
            _ => Level::Fatal,
        }
    }

    /// Case-insensitive lookup of a level by its canonical name.
    ///
    /// Unknown names resolve to [`Level::DEFAULT`] instead of failing, so a
    /// typo in a configuration value never stops the program from logging.
    pub fn by_name(name: &str) -> Level {
        let name = name.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
            .unwrap_or(Level::DEFAULT)
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Msg => "MSG",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Fatal => "FATAL",
        }
    }
}

/// Canonical name of the level with the given rank, or [`UNKNOWN_LEVEL_NAME`].
pub fn name_by_rank(rank: i64) -> &'static str {
    Level::ALL
        .into_iter()
        .find(|level| level.rank() == rank)
        .map_or(UNKNOWN_LEVEL_NAME, Level::name)
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Level {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Level::by_name(s))
    }
}

impl From<Level> for i64 {
    fn from(level: Level) -> Self {
        level.rank()
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}
