//! Signal number to name registry.
//!
//! # Responsibilities
//! - Filter platform constants down to real, resolvable signals
//! - Map signal numbers to display names
//! - Resolve configured names (`SIGINT`, `INT`, `int`) back to numbers
//!
//! # Design Decisions
//! - Built once, never mutated afterwards
//! - Aliases resolve last-write-wins in enumeration order for display; every
//!   enumerated name (alias or canonical) stays resolvable by `lookup`
//! - Iteration is in ascending numeric order

use std::collections::BTreeMap;

use crate::signals::platform;

/// Immutable mapping from signal number to symbolic name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalRegistry {
    names: BTreeMap<i32, String>,
    /// Every accepted constant, keyed by its upper-case name without `SIG`.
    numbers: BTreeMap<String, i32>,
}

impl SignalRegistry {
    /// Build a registry from `(name, number)` pairs.
    ///
    /// Pseudo-entries (`SIG_DFL`, `SIG_BLOCK`, anything not prefixed with `SIG`)
    /// and non-positive numbers are skipped.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: AsRef<str>,
    {
        let mut names = BTreeMap::new();
        let mut numbers = BTreeMap::new();

        for (name, number) in entries {
            let name = name.as_ref();
            if !is_signal_name(name) || number <= 0 {
                continue;
            }
            names.insert(number, name.to_string());
            numbers.insert(lookup_key(name), number);
        }

        Self { names, numbers }
    }

    /// Build the registry for the host platform.
    pub fn from_platform() -> Self {
        Self::from_entries(platform::signal_constants())
    }

    /// Symbolic name for a signal number, if known.
    pub fn name(&self, number: i32) -> Option<&str> {
        self.names.get(&number).map(String::as_str)
    }

    /// Name for display, falling back to `Unknown signal <n>`.
    pub fn describe(&self, number: i32) -> String {
        match self.name(number) {
            Some(name) => name.to_string(),
            None => format!("Unknown signal {}", number),
        }
    }

    /// Resolve a signal name to its number.
    ///
    /// Matching ignores case and the optional `SIG` prefix, so `SIGUSR1`,
    /// `USR1` and `usr1` are equivalent. Names displayed under an alias
    /// (`SIGABRT` shown as `SIGIOT`) still resolve.
    pub fn lookup(&self, name: &str) -> Option<i32> {
        self.numbers.get(&lookup_key(name)).copied()
    }

    /// Iterate `(number, name)` pairs in ascending numeric order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.names.iter().map(|(number, name)| (*number, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn is_signal_name(name: &str) -> bool {
    name.starts_with("SIG") && !name.starts_with("SIG_") && name.len() > 3
}

fn lookup_key(name: &str) -> String {
    let name = name.trim();
    let bare = match name.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("SIG") => &name[3..],
        _ => name,
    };
    bare.to_ascii_uppercase()
}
