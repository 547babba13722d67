//! Process-wide output and error destinations.
//!
//! Instrumented code writes through [`stdout`], [`stderr`] or the
//! `cprint!` family of macros instead of the `std` handles. Those writes go
//! to whatever [`Destinations`] currently occupy the process-wide slot, which
//! is how a capture scope redirects them. The slot starts out pointing at the
//! real standard streams.
//!
//! The slot is global, not per-thread. Only one thread should be swapping it
//! at a time.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type Sink = Box<dyn Write + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Output,
    Error,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output => f.write_str("stdout"),
            Self::Error => f.write_str("stderr"),
        }
    }
}

/// The pair of sinks output and error writes are routed to.
pub struct Destinations {
    output: Sink,
    error: Sink,
}

impl Destinations {
    pub fn new(output: Sink, error: Sink) -> Self {
        Self { output, error }
    }

    /// The process' real standard output and error.
    pub fn standard() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    fn sink_mut(&mut self, stream: Stream) -> &mut Sink {
        match stream {
            Stream::Output => &mut self.output,
            Stream::Error => &mut self.error,
        }
    }

    fn flush(&mut self) {
        let _ = self.output.flush();
        let _ = self.error.flush();
    }
}

impl fmt::Debug for Destinations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destinations").finish_non_exhaustive()
    }
}

static SLOT: Mutex<Option<Destinations>> = Mutex::new(None);

// Writers never panic while holding the slot, but a sink might. Recovering
// keeps one bad sink from disabling output for the rest of the process.
fn slot() -> MutexGuard<'static, Option<Destinations>> {
    SLOT.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Installs `destinations` and returns the ones they replace.
///
/// The outgoing sinks are flushed first so buffered text lands before
/// anything written to the new ones.
pub fn install(destinations: Destinations) -> Destinations {
    let mut slot = slot();
    let mut previous = slot.take().unwrap_or_else(Destinations::standard);
    previous.flush();
    *slot = Some(destinations);
    previous
}

pub fn write_all(stream: Stream, buf: &[u8]) -> io::Result<()> {
    let mut slot = slot();
    let sink = slot
        .get_or_insert_with(Destinations::standard)
        .sink_mut(stream);
    sink.write_all(buf)?;
    if stream == Stream::Error {
        sink.flush()?;
    }
    Ok(())
}

pub fn write_fmt(stream: Stream, args: fmt::Arguments<'_>) -> io::Result<()> {
    match args.as_str() {
        Some(text) => write_all(stream, text.as_bytes()),
        None => write_all(stream, args.to_string().as_bytes()),
    }
}

pub fn flush(stream: Stream) -> io::Result<()> {
    slot()
        .get_or_insert_with(Destinations::standard)
        .sink_mut(stream)
        .flush()
}

/// A handle writing to the current destination for one stream.
///
/// The destination is looked up on every write, so a handle taken before a
/// capture scope starts still writes into that scope.
#[derive(Debug, Clone, Copy)]
pub struct StreamWriter {
    stream: Stream,
}

impl Write for StreamWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        write_all(self.stream, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        flush(self.stream)
    }
}

pub fn stdout() -> StreamWriter {
    StreamWriter {
        stream: Stream::Output,
    }
}

pub fn stderr() -> StreamWriter {
    StreamWriter {
        stream: Stream::Error,
    }
}

#[doc(hidden)]
pub fn _print(stream: Stream, args: fmt::Arguments<'_>) {
    if let Err(err) = write_fmt(stream, args) {
        panic!("failed printing to {stream}: {err}");
    }
}

/// An in-memory sink that can be read back while shared.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn bytes(&self) -> MutexGuard<'_, Vec<u8>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The text written so far. Invalid UTF-8 is replaced.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Prints to the current output destination.
#[macro_export]
macro_rules! cprint {
    ($($arg:tt)*) => {
        $crate::streams::_print($crate::streams::Stream::Output, format_args!($($arg)*))
    };
}

/// Prints a line to the current output destination.
#[macro_export]
macro_rules! cprintln {
    () => {
        $crate::cprint!("\n")
    };
    ($($arg:tt)*) => {
        $crate::streams::_print(
            $crate::streams::Stream::Output,
            format_args!("{}\n", format_args!($($arg)*)),
        )
    };
}

/// Prints to the current error destination.
#[macro_export]
macro_rules! ceprint {
    ($($arg:tt)*) => {
        $crate::streams::_print($crate::streams::Stream::Error, format_args!($($arg)*))
    };
}

/// Prints a line to the current error destination.
#[macro_export]
macro_rules! ceprintln {
    () => {
        $crate::ceprint!("\n")
    };
    ($($arg:tt)*) => {
        $crate::streams::_print(
            $crate::streams::Stream::Error,
            format_args!("{}\n", format_args!($($arg)*)),
        )
    };
}
