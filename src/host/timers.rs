//! Delayed callbacks for the host: one-shot and repeating timers advanced by
//! elapsed milliseconds.

use crate::rules::engine::TimerId;

#[derive(Debug, Clone)]
struct Timer {
    id: TimerId,
    delay_ms: u64,
    repeat: bool,
    elapsed_ms: u64,
    finished: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    timers: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timer, replacing any running timer with the same id.
    pub fn start(&mut self, id: TimerId, delay_ms: u64, repeat: bool) {
        self.stop(id);
        self.timers.push(Timer {
            id,
            delay_ms: delay_ms.max(1),
            repeat,
            elapsed_ms: 0,
            finished: false,
        });
    }

    pub fn stop(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Advance every timer and return the ids that fired, in firing order.
    /// A repeating timer fires once per whole period elapsed; one-shot timers
    /// are dropped after firing.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            timer.elapsed_ms += elapsed_ms;
            while timer.elapsed_ms >= timer.delay_ms {
                timer.elapsed_ms -= timer.delay_ms;
                fired.push(timer.id);
                if !timer.repeat {
                    timer.finished = true;
                    break;
                }
            }
        }
        self.timers.retain(|t| !t.finished);
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_fires_once() {
        let mut timers = Timers::new();
        timers.start(TimerId::Restart, 1000, false);
        assert!(timers.advance(999).is_empty());
        assert_eq!(timers.advance(1), vec![TimerId::Restart]);
        assert!(!timers.is_active(TimerId::Restart));
        assert!(timers.advance(5000).is_empty());
    }

    #[test]
    fn test_one_shot_fires_once_on_large_step() {
        let mut timers = Timers::new();
        timers.start(TimerId::Restart, 1000, false);
        assert_eq!(timers.advance(3500), vec![TimerId::Restart]);
    }

    #[test]
    fn test_repeating_fires_each_period() {
        let mut timers = Timers::new();
        timers.start(TimerId::Countdown, 1000, true);
        assert_eq!(timers.advance(1000), vec![TimerId::Countdown]);
        assert!(timers.advance(500).is_empty());
        assert_eq!(
            timers.advance(1500),
            vec![TimerId::Countdown, TimerId::Countdown]
        );
        assert!(timers.is_active(TimerId::Countdown));
    }

    #[test]
    fn test_stop_and_restart() {
        let mut timers = Timers::new();
        timers.start(TimerId::Countdown, 1000, true);
        timers.advance(900);
        timers.start(TimerId::Countdown, 1000, true);
        assert!(timers.advance(900).is_empty());
        timers.stop(TimerId::Countdown);
        assert!(timers.advance(2000).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut timers = Timers::new();
        timers.start(TimerId::Countdown, 1000, true);
        timers.start(TimerId::Restart, 1000, false);
        timers.clear();
        assert!(timers.advance(1000).is_empty());
    }
}
