//! Gravity clock - one forced row of fall per elapsed wall-clock second

use crate::ports::Clock;

/// Remembers the last whole second it observed.
#[derive(Debug, Clone, Default)]
pub struct GravityClock {
    last_second: Option<u64>,
}

impl GravityClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of forced fall for this tick: 1 when the wall-clock second has
    /// changed since the last poll (or on the very first poll), else 0.
    pub fn poll(&mut self, clock: &impl Clock) -> i32 {
        let now = clock.unix_seconds();
        if self.last_second == Some(now) {
            return 0;
        }
        self.last_second = Some(now);
        1
    }

    /// Forget the observed second so the next poll forces a drop.
    pub fn reset(&mut self) {
        self.last_second = None;
    }
}
