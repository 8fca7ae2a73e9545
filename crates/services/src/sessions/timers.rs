use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// A one-second heartbeat for the session clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Add one second of elapsed time.
    ElapsedTick,
    /// Take one second off the countdown.
    CountdownTick,
}

/// Drives the two counters of a session from real time.
///
/// Two independent interval tasks, mirroring the two counters they feed: an
/// unbounded elapsed ticker and, when the quiz carries a duration estimate,
/// a countdown ticker that stops itself after the final tick. Events are
/// applied to the session by whoever owns the receiver, so tick state stays
/// single-owner. Dropping the handle aborts both tasks.
pub struct SessionTimers {
    elapsed: JoinHandle<()>,
    countdown: Option<JoinHandle<()>>,
}

impl SessionTimers {
    /// Start the tickers with the production one-second period.
    #[must_use]
    pub fn start(countdown_total_secs: Option<u32>, events: UnboundedSender<TimerEvent>) -> Self {
        Self::start_with_period(Duration::from_secs(1), countdown_total_secs, events)
    }

    /// Start the tickers with an explicit period. Tests use short periods.
    #[must_use]
    pub fn start_with_period(
        period: Duration,
        countdown_total_secs: Option<u32>,
        events: UnboundedSender<TimerEvent>,
    ) -> Self {
        let elapsed_events = events.clone();
        let elapsed = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // the first tick is immediate
            loop {
                interval.tick().await;
                if elapsed_events.send(TimerEvent::ElapsedTick).is_err() {
                    break;
                }
            }
        });

        let countdown = countdown_total_secs.map(|total| {
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                interval.tick().await;
                for _ in 0..total {
                    interval.tick().await;
                    if events.send(TimerEvent::CountdownTick).is_err() {
                        break;
                    }
                }
            })
        });

        Self { elapsed, countdown }
    }
}

impl Drop for SessionTimers {
    fn drop(&mut self) {
        self.elapsed.abort();
        if let Some(countdown) = &self.countdown {
            countdown.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    const TICK: Duration = Duration::from_millis(5);
    const WAIT: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn emits_both_tick_kinds() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _timers = SessionTimers::start_with_period(TICK, Some(3), tx);

        let mut elapsed = 0;
        let mut countdown = 0;
        while elapsed == 0 || countdown == 0 {
            match timeout(WAIT, rx.recv()).await.unwrap().unwrap() {
                TimerEvent::ElapsedTick => elapsed += 1,
                TimerEvent::CountdownTick => countdown += 1,
            }
        }
    }

    #[tokio::test]
    async fn countdown_stops_after_the_final_tick() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let total = 4;
        let _timers = SessionTimers::start_with_period(TICK, Some(total), tx);

        let mut countdown = 0;
        while countdown < total {
            if timeout(WAIT, rx.recv()).await.unwrap().unwrap() == TimerEvent::CountdownTick {
                countdown += 1;
            }
        }

        // Read well past the countdown's lifetime; only elapsed ticks keep coming.
        for _ in 0..(total * 5) {
            assert_eq!(
                timeout(WAIT, rx.recv()).await.unwrap().unwrap(),
                TimerEvent::ElapsedTick
            );
        }
    }

    #[tokio::test]
    async fn no_estimate_means_no_countdown_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _timers = SessionTimers::start_with_period(TICK, None, tx);

        for _ in 0..5 {
            assert_eq!(
                timeout(WAIT, rx.recv()).await.unwrap().unwrap(),
                TimerEvent::ElapsedTick
            );
        }
    }

    #[tokio::test]
    async fn dropping_the_handle_stops_the_tasks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timers = SessionTimers::start_with_period(TICK, Some(10), tx);
        drop(timers);

        // Both senders are gone once the tasks are aborted, so the channel
        // drains to a close instead of ticking forever.
        while timeout(WAIT, rx.recv()).await.unwrap().is_some() {}
    }
}
