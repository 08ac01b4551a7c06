use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use uuid::Uuid;

use crate::{error::LgrError, line::Line, style::Style};

/// A destination able to accept bytes.
///
/// Implementations serialize their own writes so that a single call is never
/// interleaved with a concurrent one on the same physical destination.
pub trait Sink: Send + Sync {
    fn write(&self, buf: &[u8]) -> io::Result<usize>;

    /// Writes a formatted line. Persisting sinks take the full rendering;
    /// console adapters override this to pick and style their own.
    fn write_line(&self, line: &Line) -> io::Result<usize> {
        self.write(line.full().as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}

pub type SharedSink = Arc<dyn Sink>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Accepts everything, keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl Sink for DiscardSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    /// Reports the length of the full rendering without building it.
    fn write_line(&self, line: &Line) -> io::Result<usize> {
        Ok(line.prefix.len() + line.header.len() + line.message.len() + 1)
    }
}

/// A log file opened in append mode.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Opens `path` for appending, creating it if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LgrError> {
        let path = path.as_ref().to_path_buf();
        let file = File::options()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LgrError::Configuration {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Creates a fresh file named `{prefix}{uuid}.log` in the system temp directory.
    pub fn temporary(prefix: &str) -> Result<Self, LgrError> {
        let path = std::env::temp_dir().join(format!("{prefix}{}.log", Uuid::new_v4()));
        let file = File::options()
            .create_new(true)
            .append(true)
            .open(&path)
            .map_err(|source| LgrError::Configuration {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.file).write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        lock(&self.file).flush()
    }
}

/// Fans every write out to all of its members.
///
/// A failing member does not stop the remaining ones; the first error seen is
/// returned once every member has been tried.
#[derive(Clone, Default)]
pub struct CombinedSink {
    members: Vec<SharedSink>,
}

impl CombinedSink {
    pub fn new(members: Vec<SharedSink>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[SharedSink] {
        &self.members
    }

    fn each<F>(&self, mut op: F) -> io::Result<usize>
    where
        F: FnMut(&dyn Sink) -> io::Result<usize>,
    {
        let mut written = 0;
        let mut first_error = None;
        for member in &self.members {
            match op(member.as_ref()) {
                Ok(n) => written += n,
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(written),
        }
    }
}

impl Sink for CombinedSink {
    /// Returns `buf.len()` when every member accepted the buffer.
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.each(|member| member.write(buf)).map(|_| buf.len())
    }

    /// Returns the total number of bytes written across members.
    fn write_line(&self, line: &Line) -> io::Result<usize> {
        self.each(|member| member.write_line(line))
    }

    fn flush(&self) -> io::Result<()> {
        self.each(|member| member.flush().map(|_| 0)).map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Standard output or standard error. Each write holds the stream lock for
/// the whole buffer.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    stream: Stream,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            stream: Stream::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        match self.stream {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(buf)?;
                out.flush()?;
            }
            Stream::Stderr => io::stderr().lock().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
        }
    }
}

/// Console side of one channel: chooses between the plain and verbose
/// rendering, applies the channel style, and emits the result in one write.
#[derive(Clone)]
pub struct StyledSink {
    console: SharedSink,
    style: Style,
    verbose: bool,
}

impl StyledSink {
    pub fn new(console: SharedSink, style: Style, verbose: bool) -> Self {
        Self {
            console,
            style,
            verbose,
        }
    }

    pub fn render(&self, line: &Line) -> String {
        let text = if self.verbose {
            line.verbose_text()
        } else {
            line.plain_text()
        };
        format!("{}\n", self.style.apply(&text))
    }
}

impl Sink for StyledSink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.console.write(buf)
    }

    fn write_line(&self, line: &Line) -> io::Result<usize> {
        self.console.write(self.render(line).as_bytes())
    }

    fn flush(&self) -> io::Result<()> {
        self.console.flush()
    }
}

/// Any [`Write`] implementation used as a destination.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.inner).write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        lock(&self.inner).flush()
    }
}

/// In-memory destination; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.buf)).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.buf).is_empty()
    }

    pub fn clear(&self) {
        lock(&self.buf).clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        lock(&self.buf).extend_from_slice(buf);
        Ok(buf.len())
    }
}
