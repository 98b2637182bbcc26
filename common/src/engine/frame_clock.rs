use std::time::{Duration, Instant};

/// Fixed-rate tick scheduler. The caller sleeps (or schedules a repaint) for
/// `time_until_next` and calls `poll` once per frame.
#[derive(Clone, Debug)]
pub struct FrameClock {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    /// Returns `true` if a tick is due at `now` and schedules the following one.
    /// A late frame never produces a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(next) if now < next => false,
            Some(next) => {
                let following = next + self.interval;
                self.next_tick = Some(if following <= now { now + self.interval } else { following });
                true
            }
            None => {
                self.next_tick = Some(now + self.interval);
                true
            }
        }
    }

    /// Remainder of the current frame budget.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next_tick
            .map(|next| next.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_first_poll_ticks_immediately() {
        let mut clock = FrameClock::new(INTERVAL);
        let start = Instant::now();
        assert_eq!(clock.time_until_next(start), Duration::ZERO);
        assert!(clock.poll(start));
        assert_eq!(clock.time_until_next(start), INTERVAL);
    }

    #[test]
    fn test_no_tick_before_interval_elapsed() {
        let mut clock = FrameClock::new(INTERVAL);
        let start = Instant::now();
        clock.poll(start);
        assert!(!clock.poll(start + Duration::from_millis(40)));
        assert_eq!(clock.time_until_next(start + Duration::from_millis(40)), Duration::from_millis(60));
        assert!(clock.poll(start + INTERVAL));
    }

    #[test]
    fn test_keeps_cadence_when_slightly_late() {
        let mut clock = FrameClock::new(INTERVAL);
        let start = Instant::now();
        clock.poll(start);
        assert!(clock.poll(start + Duration::from_millis(130)));
        assert_eq!(clock.time_until_next(start + Duration::from_millis(130)), Duration::from_millis(70));
    }

    #[test]
    fn test_long_stall_does_not_burst() {
        let mut clock = FrameClock::new(INTERVAL);
        let start = Instant::now();
        clock.poll(start);
        let late = start + Duration::from_secs(2);
        assert!(clock.poll(late));
        assert!(!clock.poll(late + Duration::from_millis(1)));
        assert_eq!(clock.time_until_next(late), INTERVAL);
    }
}
