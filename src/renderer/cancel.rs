use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cooperative cancellation signal shared between a render caller and the
/// render workers.
///
/// The token can be cancelled repeatedly and from any thread. Render entry
/// points drain it before starting, so a stale signal raised before the call
/// cannot abort it; a signal raised during the call makes the render return
/// early with whatever pixels were already written. Cancellation is a defined
/// early-return path, not an error.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    /// Requests cancellation of the render this token was passed to.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Clears any pending signal, returns whether one was pending.
    pub(crate) fn drain(&self) -> bool {
        self.cancelled.swap(false, Ordering::AcqRel)
    }
}
