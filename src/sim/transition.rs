//! Fade and removal of cleared targets
//!
//! A correctly clicked target gets two independent timers: a repeating fade
//! tick that reddens it, and a one-shot removal that takes it off the board
//! a fixed delay after the click. Removal is time-gated only; a target can
//! vanish before its fade reaches full red.

use std::collections::BTreeMap;

use super::schedule::{Scheduler, TimerEvent, TimerId};
use super::state::GameState;
use crate::consts::{FADE_INTERVAL_MS, FADE_STEP, REMOVAL_DELAY_MS};

#[derive(Debug, Clone, Copy)]
struct Clearing {
    fade: TimerId,
    removal: TimerId,
}

/// Tracks the timers of every target currently clearing
#[derive(Debug, Clone, Default)]
pub struct TransitionScheduler {
    clearing: BTreeMap<u32, Clearing>,
}

impl TransitionScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start clearing target `id`. A target already clearing keeps its
    /// original timers; returns false in that case.
    pub fn begin(&mut self, id: u32, scheduler: &mut impl Scheduler) -> bool {
        if self.clearing.contains_key(&id) {
            return false;
        }
        let fade = scheduler.schedule_repeating(FADE_INTERVAL_MS, TimerEvent::FadeTick(id));
        let removal = scheduler.schedule_once(REMOVAL_DELAY_MS, TimerEvent::Removal(id));
        self.clearing.insert(id, Clearing { fade, removal });
        true
    }

    pub fn is_clearing(&self, id: u32) -> bool {
        self.clearing.contains_key(&id)
    }

    pub fn active(&self) -> usize {
        self.clearing.len()
    }

    /// Advance the fade of `id`. Returns true if the colour changed.
    pub fn on_fade_tick(&mut self, id: u32, timer: TimerId, state: &mut GameState) -> bool {
        let Some(entry) = self.clearing.get(&id) else {
            return false;
        };
        if entry.fade != timer {
            return false;
        }
        let Some(target) = state.target_mut(id) else {
            return false;
        };
        let before = target.progress;
        let after = target.advance_fade(FADE_STEP);
        log::trace!("target {} fade {:.2}", id, after);
        after != before
    }

    /// Removal deadline for `id`: stop its fade and drop it from the board.
    /// Returns true if a live target was removed.
    pub fn on_removal(
        &mut self,
        id: u32,
        timer: TimerId,
        state: &mut GameState,
        scheduler: &mut impl Scheduler,
    ) -> bool {
        match self.clearing.get(&id) {
            Some(entry) if entry.removal == timer => {}
            _ => return false,
        }
        let Some(entry) = self.clearing.remove(&id) else {
            return false;
        };
        scheduler.cancel(entry.fade);
        let removed = state.remove_target(id).is_some();
        log::debug!("target {} removed (live {})", id, state.live_count());
        removed
    }

    /// Disarm every outstanding fade and removal
    pub fn cancel_all(&mut self, scheduler: &mut impl Scheduler) {
        for (_, entry) in std::mem::take(&mut self.clearing) {
            scheduler.cancel(entry.fade);
            scheduler.cancel(entry.removal);
        }
    }
}
