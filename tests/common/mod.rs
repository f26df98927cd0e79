//! Shared helpers for tests that drive the compiled binary.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};

/// Upper bound for a single output line to appear.
pub const LINE_TIMEOUT: Duration = Duration::from_secs(5);

pub const BIN: &str = env!("CARGO_BIN_EXE_signal-logger");

/// A running `signal-logger` child with its stdout split into lines.
pub struct LoggerProcess {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

impl LoggerProcess {
    /// Spawn the logger. The child is killed when this value is dropped.
    pub fn spawn(args: &[&str]) -> Self {
        let mut child = Command::new(BIN)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn signal-logger");

        let stdout = child.stdout.take().expect("stdout not piped");
        Self {
            child,
            lines: BufReader::new(stdout).lines(),
        }
    }

    /// Next stdout line, or `None` on timeout or end of stream.
    pub async fn next_line(&mut self) -> Option<String> {
        match tokio::time::timeout(LINE_TIMEOUT, self.lines.next_line()).await {
            Ok(Ok(line)) => line,
            _ => None,
        }
    }

    /// Consume the startup announcement and return the announced PID.
    pub async fn read_pid(&mut self) -> u32 {
        let blank = self.next_line().await.expect("no startup output");
        assert_eq!(blank, "", "startup announcement must begin with a blank line");

        let line = self.next_line().await.expect("no PID line");
        line.strip_prefix("PID: ")
            .unwrap_or_else(|| panic!("unexpected PID line: {line:?}"))
            .parse()
            .expect("PID is not a number")
    }

    pub fn pid(&self) -> u32 {
        self.child.id().expect("child already reaped")
    }

    pub fn send(&self, signal: Signal) {
        kill(Pid::from_raw(self.pid() as i32), signal).expect("failed to send signal");
    }

    /// Send a signal and return the line it produced.
    pub async fn send_and_read(&mut self, signal: Signal) -> String {
        self.send(signal);
        self.next_line().await.unwrap_or_else(|| panic!("no output for {signal:?}"))
    }

    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    pub async fn wait(&mut self) -> ExitStatus {
        tokio::time::timeout(LINE_TIMEOUT, self.child.wait())
            .await
            .expect("process did not exit")
            .expect("failed to wait on child")
    }
}
