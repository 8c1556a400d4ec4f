//! In-memory trail of dispatched actions.
//!
//! Keeps the most recent action names for the debug overlay, bounded so a
//! long session cannot grow it without limit.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

/// How many dispatches the log retains.
pub const ACTION_LOG_CAPACITY: usize = 100;

/// One dispatched action.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub name: &'static str,
    pub at: Instant,
}

/// Bounded, shareable ring of recent dispatches.
#[derive(Clone, Default)]
pub struct ActionLog {
    inner: Arc<Mutex<VecDeque<ActionRecord>>>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &'static str) {
        let mut log = self.inner.lock();
        if log.len() == ACTION_LOG_CAPACITY {
            log.pop_front();
        }
        log.push_back(ActionRecord {
            name,
            at: Instant::now(),
        });
    }

    /// Recent dispatches, newest first.
    pub fn snapshot(&self) -> Vec<ActionRecord> {
        self.inner.lock().iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
