//! Timer scheduling
//!
//! Every timed behaviour (clock ticks, fades, removals) is a timer armed on
//! a `Scheduler`. Timers carry a `TimerEvent` value instead of a callback;
//! whoever drains the scheduler dispatches the event. `SimScheduler` runs on
//! virtual milliseconds, so a game can be driven deterministically by
//! feeding it elapsed time from any source (frame loop, test, replay).

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Handle for an armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer means when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Elapsed-time clock tick
    ClockTick,
    /// Fade step for the target with this id
    FadeTick(u32),
    /// Delayed removal of the target with this id
    Removal(u32),
}

/// A timer that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub at_ms: u64,
    pub event: TimerEvent,
}

/// Source of timed events
pub trait Scheduler {
    /// Current time in milliseconds
    fn now_ms(&self) -> u64;

    /// Fire `event` once, `delay_ms` from now
    fn schedule_once(&mut self, delay_ms: u64, event: TimerEvent) -> TimerId;

    /// Fire `event` every `interval_ms`, first firing one interval from now
    fn schedule_repeating(&mut self, interval_ms: u64, event: TimerEvent) -> TimerId;

    /// Disarm a timer. Returns false if it was not armed.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Number of armed timers
    fn pending(&self) -> usize;

    /// Take the earliest timer due at or before `until_ms`, moving the clock
    /// to its deadline. Repeating timers are re-armed.
    fn pop_due(&mut self, until_ms: u64) -> Option<FiredTimer>;

    /// Move the clock forward to `until_ms` (never backwards)
    fn advance_to(&mut self, until_ms: u64);
}

#[derive(Debug, Clone)]
struct Armed {
    event: TimerEvent,
    interval_ms: Option<u64>,
    /// Matches the live queue entry; older entries are stale
    seq: u64,
}

/// Virtual-time scheduler
///
/// Timers fire in deadline order, ties in the order they were armed.
#[derive(Debug, Clone, Default)]
pub struct SimScheduler {
    now_ms: u64,
    next_id: u64,
    next_seq: u64,
    armed: HashMap<TimerId, Armed>,
    queue: BinaryHeap<Reverse<(u64, u64, TimerId)>>,
}

impl SimScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn arm(&mut self, delay_ms: u64, event: TimerEvent, interval_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.push(id, self.now_ms.saturating_add(delay_ms));
        self.armed.insert(
            id,
            Armed {
                event,
                interval_ms,
                seq,
            },
        );
        id
    }

    fn push(&mut self, id: TimerId, deadline: u64) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((deadline, seq, id)));
        seq
    }
}

impl Scheduler for SimScheduler {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn schedule_once(&mut self, delay_ms: u64, event: TimerEvent) -> TimerId {
        self.arm(delay_ms, event, None)
    }

    fn schedule_repeating(&mut self, interval_ms: u64, event: TimerEvent) -> TimerId {
        // Zero would fire forever without time passing
        let interval_ms = interval_ms.max(1);
        self.arm(interval_ms, event, Some(interval_ms))
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        // Queue entry is left behind and skipped when popped
        self.armed.remove(&id).is_some()
    }

    fn pending(&self) -> usize {
        self.armed.len()
    }

    fn pop_due(&mut self, until_ms: u64) -> Option<FiredTimer> {
        while let Some(&Reverse((deadline, seq, id))) = self.queue.peek() {
            if deadline > until_ms {
                return None;
            }
            self.queue.pop();

            let Some(armed) = self.armed.get(&id) else {
                continue;
            };
            if armed.seq != seq {
                continue;
            }

            let (event, interval_ms) = (armed.event, armed.interval_ms);
            match interval_ms {
                Some(interval) => match deadline.checked_add(interval) {
                    Some(next) => {
                        let seq = self.push(id, next);
                        if let Some(armed) = self.armed.get_mut(&id) {
                            armed.seq = seq;
                        }
                    }
                    // No later instant to fire at
                    None => {
                        self.armed.remove(&id);
                    }
                },
                None => {
                    self.armed.remove(&id);
                }
            }

            self.now_ms = self.now_ms.max(deadline);
            return Some(FiredTimer {
                id,
                at_ms: deadline,
                event,
            });
        }
        None
    }

    fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
