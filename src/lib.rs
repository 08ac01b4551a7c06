//! # lgr
//! Leveled logger routing every line to a log file, the console, both or
//! nowhere, depending on two independent thresholds.
//!
//! Eight levels are available, from `Trace` to `Fatal`. Levels at or above the
//! *log threshold* are persisted to the file destination; levels at or above
//! the *output threshold* are shown on the console, styled per level.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! lgr = "0.2.0"
//! ```
//!
//! ```rust
//! use lgr::{Level, Registry};
//!
//! let registry = Registry::new();
//! // keep everything from Debug in the file, only show warnings and above
//! registry.set_log_threshold(Level::Debug);
//! registry.set_output_threshold(Level::Warn);
//! let path = registry.use_temporary_file_destination("lgr-doc-").unwrap();
//!
//! lgr::info!(logger: &registry, "indexed {} documents", 42);
//! lgr::error!(logger: &registry, "lost connection to {}", "db-1");
//!
//! let persisted = std::fs::read_to_string(&path).unwrap();
//! assert!(persisted.contains("indexed 42 documents"));
//! assert!(persisted.contains("lost connection to db-1"));
//! # std::fs::remove_file(path).ok();
//! ```
//!
//! ## Process-wide registry
//! The macros without `logger:` use [`global()`], which reads its initial
//! thresholds from `LGR_LOG_THRESHOLD` and `LGR_OUTPUT_THRESHOLD`.
//! [`init_log_facade`] additionally routes the `log` crate macros through it.
//!
//! ```rust
//! lgr::global().discard_logging();
//! lgr::msg!("ready");
//! lgr::feedback!("{} files copied", 3);
//! ```
//!
//! ## Concurrency
//! Log calls may come from any number of threads. Each physical destination
//! serializes its writes, so the bytes of one line are never interleaved with
//! another's, style escape sequences included. Threshold or destination
//! changes re-route all levels atomically.

mod channel;
mod global;
mod macros;
mod registry;
mod router;

pub use channel::{default_style, default_verbose};
pub use global::{global, init_log_facade};
pub use lgr_core::{
    Caller, Color, CombinedSink, ConsoleSink, DiscardSink, FileSink, Flags, Level, LgrConfig,
    LgrError, Line, MemorySink, Result, SharedSink, Sink, Style, StyledSink, WriterSink,
    name_by_rank, set_color_override,
};
pub use registry::{ChannelHandle, FEEDBACK_PREFIX, Registry};
pub use router::{DestinationKind, compute_destination};
