use crate::debounce::Instant;

pub const SLEEP_AFTER_SECONDS: u64 = 60;

/// Tracks when the display should go dark.
pub struct SleepCountdown {
    is_asleep: bool,
    touched_last: Instant,
}

impl SleepCountdown {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            is_asleep: false,
            touched_last: Instant::from_ticks(0),
        }
    }

    /// Any key activity, returns true if this woke it up
    #[inline]
    pub fn touch(&mut self, now: Instant) -> bool {
        self.touched_last = now;
        core::mem::replace(&mut self.is_asleep, false)
    }

    #[inline]
    #[must_use]
    pub fn should_sleep(&self, now: Instant) -> bool {
        !self.is_asleep
            && now
                .checked_duration_since(self.touched_last)
                .is_some_and(|dur| dur.to_secs() >= SLEEP_AFTER_SECONDS)
    }

    #[inline]
    pub fn set_sleeping(&mut self) {
        self.is_asleep = true;
    }

    #[inline]
    #[must_use]
    pub fn is_awake(&self) -> bool {
        !self.is_asleep
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Instant {
        Instant::from_ticks(s * 1_000_000)
    }

    #[test]
    fn sleeps_after_idle() {
        let mut sleep = SleepCountdown::new();
        assert!(!sleep.touch(secs(1)));
        assert!(!sleep.should_sleep(secs(SLEEP_AFTER_SECONDS)));
        assert!(sleep.should_sleep(secs(SLEEP_AFTER_SECONDS + 1)));
        sleep.set_sleeping();
        assert!(!sleep.is_awake());
        // Already asleep, nothing more to do
        assert!(!sleep.should_sleep(secs(SLEEP_AFTER_SECONDS + 2)));
        assert!(sleep.touch(secs(SLEEP_AFTER_SECONDS + 3)));
        assert!(sleep.is_awake());
    }
}
