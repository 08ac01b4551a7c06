use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum LgrError {
    /// The requested file destination could not be opened or created.
    #[error("unable to open log file {}: {source}", path.display())]
    Configuration { path: PathBuf, source: io::Error },
    /// A sink failed while a line was being written.
    #[error("unable to write log line: {0}")]
    Write(#[from] io::Error),
}

pub type Result<T, E = LgrError> = std::result::Result<T, E>;
