//! Source of the index used by the random pick.

use std::time::{SystemTime, UNIX_EPOCH};

use mockall::automock;

/// Chooses an index in `0..len` for the random pick.
///
/// Implementations are called with `len > 0`.
#[automock]
pub trait RandomSource {
    fn pick_index(&self, len: usize) -> usize;
}

/// Uses the current wall-clock milliseconds modulo `len`.
///
/// Best-effort pseudo-random: two picks within the same millisecond return the
/// same index, and nothing guarantees a fair distribution over members.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClockRandom;

impl RandomSource for ClockRandom {
    fn pick_index(&self, len: usize) -> usize {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();

        (millis % len as u128) as usize
    }
}
