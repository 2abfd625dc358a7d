//! Jump-target labels.
//!
//! A [`Label`] names a position in the program, never a value. Labels come
//! from a single process-wide counter, so an identity handed out once is never
//! handed out again, no matter which library or function asked for it.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Opaque jump-target identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(u32);

impl Label {
    /// Raw index, for diagnostics and disassembly only.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}

static NEXT_LABEL: AtomicU32 = AtomicU32::new(0);

/// Mint a fresh label.
///
/// # Panics
///
/// Panics when the label space is exhausted.
pub fn new_label() -> Label {
    match NEXT_LABEL.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1)) {
        Ok(n) => Label(n),
        Err(_) => panic!("label space exhausted after {} labels", u32::MAX),
    }
}

/// Number of labels minted so far in this process.
pub fn labels_issued() -> u32 {
    NEXT_LABEL.load(Ordering::Relaxed)
}
