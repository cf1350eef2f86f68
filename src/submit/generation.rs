/// Generation counter for submissions
///
/// Every prepared submission takes the next generation. A result is only
/// applied when its generation is still the one marked in flight, so a
/// cancelled or superseded request can never clear the cart.
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing counter; generation 0 is never handed out
#[derive(Debug)]
pub struct GenerationClock {
    value: AtomicU64,
}

impl GenerationClock {
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Increment and return the new generation
    pub fn next(&self) -> u64 {
        self.value.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Last generation handed out, 0 if none
    pub fn current(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }
}

impl Default for GenerationClock {
    fn default() -> Self {
        Self::new()
    }
}
