//! Cooperative cancellation, polled once per relaxation round.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait Cancel {
    /// Returning `true` ends the running phase after the current round.
    fn should_cancel(&mut self) -> bool;
}

impl<F> Cancel for F
where
    F: FnMut() -> bool,
{
    fn should_cancel(&mut self) -> bool {
        self()
    }
}

/// Never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl Cancel for Never {
    fn should_cancel(&mut self) -> bool {
        false
    }
}

/// Cancellation flag that can be raised from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Cancel for CancelToken {
    fn should_cancel(&mut self) -> bool {
        self.is_cancelled()
    }
}
