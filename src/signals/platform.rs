//! Host signal enumeration.

use nix::sys::signal::Signal;

/// Enumerate the symbolic signal constants available on this host.
///
/// Canonical names come first, followed by platform aliases and the realtime
/// bounds. Later entries win when a registry is built, so an alias replaces the
/// canonical name of the number it shares.
pub fn signal_constants() -> Vec<(&'static str, i32)> {
    let mut entries: Vec<(&'static str, i32)> = Signal::iterator()
        .map(|signal| (signal.as_str(), signal as i32))
        .collect();

    entries.extend(aliases());
    entries.extend(realtime_bounds());
    entries
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn aliases() -> Vec<(&'static str, i32)> {
    vec![
        ("SIGCLD", libc::SIGCHLD),
        ("SIGIOT", libc::SIGIOT),
        ("SIGPOLL", libc::SIGPOLL),
    ]
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn aliases() -> Vec<(&'static str, i32)> {
    Vec::new()
}

#[cfg(target_os = "linux")]
fn realtime_bounds() -> Vec<(&'static str, i32)> {
    vec![("SIGRTMIN", libc::SIGRTMIN()), ("SIGRTMAX", libc::SIGRTMAX())]
}

#[cfg(not(target_os = "linux"))]
fn realtime_bounds() -> Vec<(&'static str, i32)> {
    Vec::new()
}
