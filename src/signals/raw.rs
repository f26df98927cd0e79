//! Listeners for fault signals.
//!
//! Tokio refuses to register `SIGILL`, `SIGFPE` and `SIGSEGV`, although the
//! platform lets a process catch them. These (and `SIGBUS`) are registered
//! through `signal_hook_registry` directly. The action writes one byte per
//! delivery into a non-blocking socket pair that the idle loop reads.
//!
//! A delivery generated by the kernel for a real fault cannot be handled in
//! user space: returning would re-run the faulting instruction forever. Such
//! deliveries restore the default disposition so the fault terminates the
//! process as usual. Only signals sent by a process (`kill`, `raise`,
//! `sigqueue`) are reported.

use std::io;
use std::os::fd::AsRawFd;
use std::os::unix::net::UnixStream as StdUnixStream;
use std::sync::Once;

use libc::c_int;
use signal_hook_registry::SigId;
use tokio::io::AsyncReadExt;
use tokio::net::UnixStream;

/// Signals that go through this module instead of Tokio.
pub const FAULT_SIGNALS: [c_int; 4] = [libc::SIGILL, libc::SIGFPE, libc::SIGSEGV, libc::SIGBUS];

/// Signals the Rust runtime claims for stack-overflow detection.
const OVERFLOW_GUARDED: [c_int; 2] = [libc::SIGSEGV, libc::SIGBUS];

static OVERFLOW_GUARD_RELEASED: Once = Once::new();

pub fn is_fault_signal(number: c_int) -> bool {
    FAULT_SIGNALS.contains(&number)
}

/// A registered fault-signal action and the stream it reports into.
pub struct RawListener {
    id: SigId,
    rx: UnixStream,
    // Kept open for the action, which writes to its raw descriptor.
    _tx: StdUnixStream,
}

impl RawListener {
    /// Register an action for `number`. Must be called within a Tokio runtime.
    pub fn register(number: c_int) -> io::Result<Self> {
        release_overflow_guard();

        let (tx, rx) = StdUnixStream::pair()?;
        tx.set_nonblocking(true)?;
        rx.set_nonblocking(true)?;
        let rx = UnixStream::from_std(rx)?;

        let fd = tx.as_raw_fd();
        // SAFETY: the action only calls async-signal-safe functions
        // (`write`, `signal`) and touches no shared state besides `fd`, which
        // stays open until the action is unregistered in `Drop`.
        let id = unsafe {
            signal_hook_registry::register_unchecked(number, move |info: &libc::siginfo_t| {
                if !sent_by_process(info.si_code) {
                    libc::signal(number, libc::SIG_DFL);
                    return;
                }
                let byte = 1u8;
                libc::write(fd, &byte as *const u8 as *const libc::c_void, 1);
            })
        }?;

        Ok(Self { id, rx, _tx: tx })
    }

    /// Wait for the next delivery. Each delivery is reported once.
    pub async fn recv(&mut self) -> Option<()> {
        let mut byte = [0u8; 1];
        match self.rx.read(&mut byte).await {
            Ok(1) => Some(()),
            _ => None,
        }
    }
}

impl Drop for RawListener {
    fn drop(&mut self) {
        signal_hook_registry::unregister(self.id);
    }
}

/// `si_code` of a signal sent with `kill`, `raise`, `tkill` or `sigqueue`.
///
/// Linux uses zero and negative codes for these; kernel fault codes
/// (`SEGV_MAPERR`, `FPE_INTDIV`, ...) are small positive values.
#[cfg(any(target_os = "linux", target_os = "android"))]
fn sent_by_process(code: c_int) -> bool {
    code <= 0
}

/// The BSDs and macOS number user-sent codes from `SI_USER` (0x10001) upwards.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn sent_by_process(code: c_int) -> bool {
    const SI_USER: c_int = 0x10001;
    code <= 0 || code >= SI_USER
}

/// Reset the Rust runtime's stack-overflow handlers to the default action.
///
/// `signal_hook_registry` chains to whatever handler was installed before it,
/// and the runtime's handler resets the disposition to default on any signal
/// that is not a guard-page hit. Left in place, it would make the second sent
/// `SIGSEGV` fatal. Runs once per process, before the first registration.
fn release_overflow_guard() {
    OVERFLOW_GUARD_RELEASED.call_once(|| {
        for number in OVERFLOW_GUARDED {
            // SAFETY: installing the default disposition has no handler to
            // run and replaces nothing signal_hook_registry has installed yet.
            unsafe {
                libc::signal(number, libc::SIG_DFL);
            }
        }
    });
}
