//! Ordering guard for overlapping advisor requests
//!
//! Each request takes a ticket before it is sent. When it resolves, its
//! value is stored only if no later ticket has already been settled, so a
//! slow response can never replace the result of a newer request.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Position of a request in issue order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Holds the value of the newest settled request
#[derive(Debug, Default)]
pub struct Latest<T> {
    issued: AtomicU64,
    slot: Mutex<Option<(Ticket, T)>>,
}

impl<T: Clone> Latest<T> {
    pub fn new() -> Self {
        Self { issued: AtomicU64::new(0), slot: Mutex::new(None) }
    }

    /// Reserve the next ticket
    pub fn ticket(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Store `value` unless a newer ticket has already settled.
    /// Returns whether the value was kept.
    pub fn settle(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        match slot.as_ref() {
            Some((settled, _)) if *settled > ticket => {
                tracing::debug!("Discarding stale response {:?} (have {:?})", ticket, settled);
                false
            }
            _ => {
                *slot = Some((ticket, value));
                true
            }
        }
    }

    /// The newest settled value
    pub fn get(&self) -> Option<T> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).as_ref().map(|(_, v)| v.clone())
    }
}
