//! # lgr-core
//! Core building blocks for lgr: levels, sinks, console styles and line formatting.

mod config;
mod error;
mod level;
mod line;
mod sink;
mod style;

pub use colored::Color;
pub use config::{LGR_CONFIG, LgrConfig};
pub use error::{LgrError, Result};
pub use level::{Level, UNKNOWN_LEVEL_NAME, name_by_rank};
pub use line::{Caller, Flags, Line, UNKNOWN_CALLER, header_now, render_header};
pub use sink::{
    CombinedSink, ConsoleSink, DiscardSink, FileSink, MemorySink, SharedSink, Sink, StyledSink,
    WriterSink,
};
pub use style::{Style, set_color_override};
