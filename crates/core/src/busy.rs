//! Loading flag for one asynchronous action.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{Error, Result};

/// Set while an action is in flight. Cloning shares the flag.
#[derive(Debug, Default, Clone)]
pub struct BusyFlag {
    busy: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Mark the action as running. The flag is cleared when the guard drops,
    /// whichever way the action exits.
    pub fn acquire(&self, action: &str) -> Result<BusyGuard> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::Precondition(format!("{} already in progress", action)));
        }
        Ok(BusyGuard {
            busy: Arc::clone(&self.busy),
        })
    }
}

#[derive(Debug)]
pub struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
