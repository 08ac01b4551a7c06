use lgr_core::{Color, Level, SharedSink, Style};

use crate::router::DestinationKind;

/// Per-level configuration bundle. One exists for every [`Level`].
///
/// The destination is derived by the router from the global thresholds and
/// is overwritten on every refresh.
#[derive(Clone)]
pub struct Channel {
    level: Level,
    pub(crate) prefix: String,
    pub(crate) prefix_name: bool,
    pub(crate) style: Style,
    pub(crate) verbose: bool,
    pub(crate) kind: Option<DestinationKind>,
    pub(crate) destination: Option<SharedSink>,
}

impl Channel {
    /// An unrouted channel with the default prefix, style and verbosity of `level`.
    pub fn new(level: Level) -> Self {
        Self {
            level,
            prefix: String::new(),
            prefix_name: true,
            style: default_style(level),
            verbose: default_verbose(level),
            kind: None,
            destination: None,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn name(&self) -> &'static str {
        self.level.name()
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// `None` until the channel has been routed once.
    pub fn kind(&self) -> Option<DestinationKind> {
        self.kind
    }

    /// The text written in front of each line of this channel.
    pub fn rendered_prefix(&self) -> String {
        if self.prefix_name {
            format!("{}{}: ", self.prefix, self.name())
        } else {
            self.prefix.clone()
        }
    }
}

/// All eight channels, ordered by level.
pub(crate) fn default_channels() -> [Channel; 8] {
    Level::ALL.map(Channel::new)
}

pub fn default_style(level: Level) -> Style {
    match level {
        Level::Trace => Style::new(Color::Cyan),
        Level::Debug => Style::new(Color::Magenta),
        Level::Info => Style::new(Color::Blue),
        Level::Msg => Style::new(Color::White),
        Level::Warn => Style::new(Color::Yellow).underline(),
        Level::Error => Style::new(Color::Red),
        Level::Critical => Style::new(Color::Red).underline(),
        Level::Fatal => Style::new(Color::Red).underline().bold(),
    }
}

/// Info and Msg are meant for the user and stay terse on the console.
pub fn default_verbose(level: Level) -> bool {
    !matches!(level, Level::Info | Level::Msg)
}
