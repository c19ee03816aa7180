/// Microsecond timer instant, same tick rate as the rp2040 timer
pub type Instant = fugit::Instant<u64, 1, 1_000_000>;

// A key can change state at most once per 10 millis, which is far beyond any typist
pub const QUARANTINE_MICROS: u64 = 10_000;

/// Longest wait for the rows to read high after a column is released
pub const SETTLE_TIMEOUT_MICROS: u64 = 10;

/// Waits until `is_settled`, returns false if it gave up after
/// [`SETTLE_TIMEOUT_MICROS`], a shorted row must not stall the scan.
pub fn settle(mut now: impl FnMut() -> Instant, mut is_settled: impl FnMut() -> bool) -> bool {
    let start = now();
    loop {
        if is_settled() {
            return true;
        }
        if now()
            .checked_duration_since(start)
            .is_some_and(|dur| dur.to_micros() >= SETTLE_TIMEOUT_MICROS)
        {
            return false;
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct PinDebouncer {
    last_touch: Option<Instant>,
    quarantined: Option<bool>,
}

impl PinDebouncer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_touch: None,
            quarantined: None,
        }
    }

    /// Feed a raw reading, returns the new state if it should be acted on.
    pub fn update(&mut self, now: Instant, raw: bool, accepted: bool) -> Option<bool> {
        if raw == accepted {
            // Bounced back before the quarantine ran out
            self.quarantined = None;
            return None;
        }
        // A quarantined state passes once it has been seen for the full window
        self.try_submit(now, raw).then_some(raw)
    }

    fn try_submit(&mut self, now: Instant, state: bool) -> bool {
        let Some(earlier) = self.last_touch else {
            self.last_touch = Some(now);
            return true;
        };
        let Some(diff) = now.checked_duration_since(earlier) else {
            self.last_touch = Some(now);
            return true;
        };
        if diff.to_micros() < QUARANTINE_MICROS {
            if self.quarantined != Some(state) {
                self.quarantined = Some(state);
                self.last_touch = Some(now);
            }
            return false;
        }

        self.last_touch = Some(now);
        self.quarantined.take();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(micros: u64) -> Instant {
        Instant::from_ticks(micros)
    }

    #[test]
    fn first_press_is_immediate() {
        let mut db = PinDebouncer::new();
        assert_eq!(Some(true), db.update(at(5), true, false));
    }

    #[test]
    fn chatter_is_quarantined_then_released() {
        let mut db = PinDebouncer::new();
        assert_eq!(Some(true), db.update(at(0), true, false));
        // Release right after the press
        assert_eq!(None, db.update(at(2_000), false, true));
        assert_eq!(None, db.update(at(8_000), false, true));
        // Stable for the full window from when it was first seen
        assert_eq!(Some(false), db.update(at(12_000), false, true));
    }

    #[test]
    fn quarantine_ends_exactly_at_window() {
        let mut db = PinDebouncer::new();
        assert_eq!(Some(true), db.update(at(0), true, false));
        assert_eq!(None, db.update(at(3_000), false, true));
        assert_eq!(None, db.update(at(3_000 + QUARANTINE_MICROS - 1), false, true));
        assert_eq!(Some(false), db.update(at(3_000 + QUARANTINE_MICROS), false, true));
        // Accepted, the next change starts a fresh window
        assert_eq!(None, db.update(at(3_000 + QUARANTINE_MICROS + 1), true, false));
    }

    #[test]
    fn bounce_back_drops_quarantine() {
        let mut db = PinDebouncer::new();
        assert_eq!(Some(true), db.update(at(0), true, false));
        assert_eq!(None, db.update(at(1_000), false, true));
        // Reads pressed again, the release was noise
        assert_eq!(None, db.update(at(2_000), true, true));
        assert_eq!(None, db.update(at(30_000), true, true));
    }

    #[test]
    fn settle_gives_up_on_stuck_row() {
        let mut ticks = 0;
        let clock = || {
            ticks += 1;
            at(ticks)
        };
        assert!(!settle(clock, || false));
        assert!(ticks > SETTLE_TIMEOUT_MICROS);
    }

    #[test]
    fn settle_returns_once_high() {
        let mut reads = 0;
        assert!(settle(|| at(0), || {
            reads += 1;
            reads == 3
        }));
        assert_eq!(3, reads);
    }

    #[test]
    fn slow_presses_pass() {
        let mut db = PinDebouncer::new();
        let mut accepted = false;
        for step in 0..10 {
            let raw = !accepted;
            assert_eq!(Some(raw), db.update(at(step * QUARANTINE_MICROS), raw, accepted));
            accepted = raw;
        }
    }
}
