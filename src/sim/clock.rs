//! Elapsed-time clock

use super::schedule::{Scheduler, TimerEvent, TimerId};
use crate::consts::CLOCK_INTERVAL_MS;

/// Owns the repeating clock timer of the current game
#[derive(Debug, Clone, Default)]
pub struct Clock {
    timer: Option<TimerId>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the tick timer, cancelling any previous one first so at most one
    /// clock ever ticks
    pub fn start(&mut self, scheduler: &mut impl Scheduler) {
        self.stop(scheduler);
        self.timer = Some(scheduler.schedule_repeating(CLOCK_INTERVAL_MS, TimerEvent::ClockTick));
    }

    /// Disarm the tick timer. Safe to call when already stopped.
    pub fn stop(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(id) = self.timer.take() {
            scheduler.cancel(id);
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether a fired timer is this clock's current tick
    pub fn owns(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::schedule::SimScheduler;

    #[test]
    fn test_start_stop() {
        let mut s = SimScheduler::new();
        let mut clock = Clock::new();
        clock.start(&mut s);
        assert!(clock.is_running());
        assert_eq!(s.pending(), 1);

        clock.stop(&mut s);
        clock.stop(&mut s);
        assert!(!clock.is_running());
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_restart_leaves_one_timer() {
        let mut s = SimScheduler::new();
        let mut clock = Clock::new();
        clock.start(&mut s);
        let old = s.pop_due(100).unwrap().id;
        clock.start(&mut s);
        assert_eq!(s.pending(), 1);
        assert!(!clock.owns(old));
    }
}
