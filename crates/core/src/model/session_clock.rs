/// Outcome of a single countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// No countdown was configured for this session.
    Disabled,
    /// Still counting down.
    Running { remaining_secs: u32 },
    /// Reached zero on this tick. Reported exactly once per session.
    Expired,
    /// Zero was already reported; the caller should have stopped ticking.
    AlreadyExpired,
}

/// Pure tick state for one quiz session: an unbounded count-up of elapsed
/// seconds and an optional saturating countdown.
///
/// The two counters are independent; the periodic drivers that feed them are
/// owned elsewhere. `Expired` fires exactly once no matter how many more
/// countdown ticks arrive, which keeps the auto-submit transition idempotent
/// against repeated zero-crossings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClock {
    elapsed_secs: u64,
    countdown: Option<Countdown>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Countdown {
    remaining_secs: u32,
    expired: bool,
}

impl SessionClock {
    /// Start a clock, counting down from `minutes * 60` when a duration
    /// estimate is known.
    #[must_use]
    pub fn new(estimated_minutes: Option<u32>) -> Self {
        Self {
            elapsed_secs: 0,
            countdown: estimated_minutes.map(|minutes| Countdown {
                remaining_secs: minutes.saturating_mul(60),
                expired: false,
            }),
        }
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Seconds left on the countdown, or `None` when no countdown exists.
    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        self.countdown.as_ref().map(|c| c.remaining_secs)
    }

    #[must_use]
    pub fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    /// Advance the elapsed counter by one second.
    pub fn tick_elapsed(&mut self) -> u64 {
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        self.elapsed_secs
    }

    /// Advance the countdown by one second, saturating at zero.
    pub fn tick_countdown(&mut self) -> CountdownTick {
        let Some(countdown) = self.countdown.as_mut() else {
            return CountdownTick::Disabled;
        };
        if countdown.expired {
            return CountdownTick::AlreadyExpired;
        }

        countdown.remaining_secs = countdown.remaining_secs.saturating_sub(1);
        if countdown.remaining_secs == 0 {
            countdown.expired = true;
            CountdownTick::Expired
        } else {
            CountdownTick::Running {
                remaining_secs: countdown.remaining_secs,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_counts_up_without_bound() {
        let mut clock = SessionClock::new(None);
        for expected in 1..=120 {
            assert_eq!(clock.tick_elapsed(), expected);
        }
        assert_eq!(clock.elapsed_secs(), 120);
    }

    #[test]
    fn no_estimate_means_no_countdown() {
        let mut clock = SessionClock::new(None);
        assert!(!clock.has_countdown());
        assert_eq!(clock.remaining_secs(), None);
        assert_eq!(clock.tick_countdown(), CountdownTick::Disabled);
    }

    #[test]
    fn countdown_expires_after_exactly_m_times_60_ticks() {
        let minutes = 2;
        let mut clock = SessionClock::new(Some(minutes));
        let total = minutes * 60;

        for tick in 1..total {
            assert_eq!(
                clock.tick_countdown(),
                CountdownTick::Running {
                    remaining_secs: total - tick
                }
            );
        }
        assert_eq!(clock.tick_countdown(), CountdownTick::Expired);
        assert_eq!(clock.remaining_secs(), Some(0));
    }

    #[test]
    fn expiry_fires_only_once() {
        let mut clock = SessionClock::new(Some(1));
        let mut expirations = 0;
        for _ in 0..120 {
            if clock.tick_countdown() == CountdownTick::Expired {
                expirations += 1;
            }
        }
        assert_eq!(expirations, 1);
        assert_eq!(clock.remaining_secs(), Some(0));
    }

    #[test]
    fn countdown_never_goes_negative() {
        let mut clock = SessionClock::new(Some(1));
        for _ in 0..100 {
            clock.tick_countdown();
            assert!(clock.remaining_secs().unwrap() <= 60);
        }
        assert_eq!(clock.remaining_secs(), Some(0));
    }
}
