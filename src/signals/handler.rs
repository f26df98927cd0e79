//! Delivered-signal output.
//!
//! Every delivered signal becomes exactly one line on the output sink, flushed
//! before the handler returns so the line is visible while the process idles.

use std::io::{self, Write};
use std::sync::Arc;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::signals::registry::SignalRegistry;

/// Line format used when a signal is received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `SIGNAL RECEIVED: 2)`, kept byte-for-byte for existing log scrapers.
    #[default]
    Legacy,
    /// `SIGNAL RECEIVED: 2 (SIGINT)`.
    Named,
}

/// Errors raised while reporting a signal.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The output sink could not be written or flushed.
    #[error("failed to write signal {signal}: {source}")]
    Output {
        signal: i32,
        #[source]
        source: io::Error,
    },
}

/// Writes one line per delivered signal.
pub struct SignalHandler<W> {
    registry: Arc<SignalRegistry>,
    format: OutputFormat,
    out: W,
}

impl<W: Write> SignalHandler<W> {
    pub fn new(registry: Arc<SignalRegistry>, format: OutputFormat, out: W) -> Self {
        Self { registry, format, out }
    }

    /// Report a delivered signal.
    pub fn handle(&mut self, signal: i32) -> Result<(), HandlerError> {
        let line = self.format_line(signal);
        tracing::debug!(signal, name = %self.registry.describe(signal), "Signal received");

        self.out
            .write_all(line.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|source| HandlerError::Output { signal, source })
    }

    /// Render the output line for `signal`, including the trailing newline.
    pub fn format_line(&self, signal: i32) -> String {
        match self.format {
            OutputFormat::Legacy => format!("SIGNAL RECEIVED: {})\n", signal),
            OutputFormat::Named => {
                format!("SIGNAL RECEIVED: {} ({})\n", signal, self.registry.describe(signal))
            }
        }
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Arc<SignalRegistry> {
        Arc::new(SignalRegistry::from_entries([("SIGINT", 2), ("SIGUSR1", 10)]))
    }

    /// Sink that counts flushes and can be made to fail.
    #[derive(Default)]
    struct Sink {
        data: Vec<u8>,
        flushes: usize,
        broken: bool,
    }

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.broken {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_legacy_line() {
        let mut handler = SignalHandler::new(registry(), OutputFormat::Legacy, Sink::default());
        handler.handle(2).unwrap();

        let sink = handler.into_writer();
        assert_eq!(String::from_utf8(sink.data).unwrap(), "SIGNAL RECEIVED: 2)\n");
        assert_eq!(sink.flushes, 1);
    }

    #[test]
    fn test_named_line() {
        let handler = SignalHandler::new(registry(), OutputFormat::Named, Vec::new());
        assert_eq!(handler.format_line(10), "SIGNAL RECEIVED: 10 (SIGUSR1)\n");
        assert_eq!(handler.format_line(77), "SIGNAL RECEIVED: 77 (Unknown signal 77)\n");
    }

    #[test]
    fn test_each_signal_flushed_separately() {
        let mut handler = SignalHandler::new(registry(), OutputFormat::Legacy, Sink::default());
        for _ in 0..5 {
            handler.handle(2).unwrap();
        }

        let sink = handler.into_writer();
        assert_eq!(sink.flushes, 5);
        assert_eq!(String::from_utf8(sink.data).unwrap().lines().count(), 5);
    }

    #[test]
    fn test_output_failure() {
        let sink = Sink { broken: true, ..Sink::default() };
        let mut handler = SignalHandler::new(registry(), OutputFormat::Legacy, sink);

        let err = handler.handle(2).unwrap_err();
        assert!(err.to_string().contains("signal 2"));
    }

    #[test]
    fn test_format_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: OutputFormat,
        }

        let parsed: Wrapper = toml::from_str("format = \"named\"").unwrap();
        assert_eq!(parsed.format, OutputFormat::Named);
        assert_eq!(OutputFormat::default(), OutputFormat::Legacy);
    }
}
