use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

/// A one-shot signal for the completion of a turn.
///
/// The turn loop waits on it, and the call that completes the turn releases
/// it. Clones share the same signal. A new latch is made for every prompt.
#[derive(Clone, Debug, Default)]
pub struct TurnLatch {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl TurnLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases all waiters. Further calls do nothing.
    pub fn count_down(&self) {
        let (released, cvar) = &*self.inner;
        *released.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    pub fn is_released(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Blocks until released, or until the timeout elapses.
    /// Returns whether the latch was released.
    pub fn wait(&self, timeout: Option<Duration>) -> bool {
        let (released, cvar) = &*self.inner;
        let guard = released.lock().unwrap_or_else(PoisonError::into_inner);
        match timeout {
            None => {
                let guard = cvar
                    .wait_while(guard, |released| !*released)
                    .unwrap_or_else(PoisonError::into_inner);
                *guard
            }
            Some(timeout) => {
                let (guard, _) = cvar
                    .wait_timeout_while(guard, timeout, |released| !*released)
                    .unwrap_or_else(PoisonError::into_inner);
                *guard
            }
        }
    }
}
