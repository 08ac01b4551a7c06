use std::sync::Arc;

use lgr_core::{CombinedSink, DiscardSink, Level, SharedSink, StyledSink};

use crate::channel::Channel;

/// Which physical outputs a channel writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationKind {
    Discard,
    File,
    Console,
    Both,
}

impl DestinationKind {
    pub fn includes_file(self) -> bool {
        matches!(self, DestinationKind::File | DestinationKind::Both)
    }

    pub fn includes_console(self) -> bool {
        matches!(self, DestinationKind::Console | DestinationKind::Both)
    }
}

/// The single routing authority.
///
/// A level reaches the console when it is at or above `output_threshold` and
/// the file when it is at or above `log_threshold`.
pub fn compute_destination(
    level: Level,
    output_threshold: Level,
    log_threshold: Level,
) -> DestinationKind {
    match (level < output_threshold, level < log_threshold) {
        (true, true) => DestinationKind::Discard,
        (false, false) => DestinationKind::Both,
        (false, true) => DestinationKind::Console,
        (true, false) => DestinationKind::File,
    }
}

fn build(
    kind: DestinationKind,
    channel: &Channel,
    file: &SharedSink,
    console: &SharedSink,
) -> SharedSink {
    let styled = || -> SharedSink {
        Arc::new(StyledSink::new(
            Arc::clone(console),
            channel.style(),
            channel.verbose(),
        ))
    };
    match kind {
        DestinationKind::Discard => Arc::new(DiscardSink),
        DestinationKind::File => Arc::clone(file),
        DestinationKind::Console => styled(),
        DestinationKind::Both => Arc::new(CombinedSink::new(vec![Arc::clone(file), styled()])),
    }
}

/// Recomputes the destination of every channel.
pub(crate) fn refresh(
    channels: &mut [Channel],
    output_threshold: Level,
    log_threshold: Level,
    file: &SharedSink,
    console: &SharedSink,
) {
    for channel in channels.iter_mut() {
        let kind = compute_destination(channel.level(), output_threshold, log_threshold);
        channel.destination = Some(build(kind, channel, file, console));
        channel.kind = Some(kind);
    }
}
