//! Game state and core simulation types
//!
//! The canonical data of one game. Timers and input never touch these
//! fields directly; they go through the methods below, which keep the
//! invariants (ordered pointer, frozen clock, terminal statuses).

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hit::sd_circle;
use crate::consts::CLOCK_STEP_SECONDS;
use crate::render::Rgb;

/// Overall game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// No game started yet
    #[default]
    Idle,
    /// Clock running, clicks accepted
    Playing,
    /// Every target cleared in order
    Won,
    /// Wrong target clicked
    Lost,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Idle => "Idle",
            GameStatus::Playing => "Playing",
            GameStatus::Won => "Won",
            GameStatus::Lost => "Lost",
        }
    }

    /// Won and Lost hold until the next restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// A numbered circle on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Fade progress in [0, 1]; 0 is white, 1 is fully red
    pub progress: f32,
}

impl Target {
    pub fn new(id: u32, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            progress: 0.0,
        }
    }

    /// Fill colour, derived from progress at draw time
    pub fn color(&self) -> Rgb {
        Rgb::lerp_white_to_red(self.progress)
    }

    /// Whether `point` lies inside or on the circle
    pub fn contains(&self, point: Vec2) -> bool {
        sd_circle(point, self.pos, self.radius) <= 0.0
    }

    /// Step the fade forward, never past 1. Returns the new progress.
    pub fn advance_fade(&mut self, step: f32) -> f32 {
        self.progress = (self.progress + step.max(0.0)).min(1.0);
        self.progress
    }
}

/// Complete state of one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Live targets keyed by id (ascending iteration = draw order)
    targets: BTreeMap<u32, Target>,
    /// The only id that currently counts as a correct click
    next_expected_id: u32,
    /// Clock ticks while Playing (tenths of a second)
    elapsed_ticks: u64,
    status: GameStatus,
    /// Number of targets generated at restart
    target_count: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            targets: BTreeMap::new(),
            next_expected_id: 1,
            elapsed_ticks: 0,
            status: GameStatus::Idle,
            target_count: 0,
        }
    }

    /// Replace everything with a freshly generated board and start playing
    pub fn reset(&mut self, targets: Vec<Target>) {
        self.target_count = targets.len() as u32;
        self.targets = targets.into_iter().map(|t| (t.id, t)).collect();
        self.next_expected_id = 1;
        self.elapsed_ticks = 0;
        self.status = GameStatus::Playing;
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn next_expected_id(&self) -> u32 {
        self.next_expected_id
    }

    pub fn target_count(&self) -> u32 {
        self.target_count
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_ticks as f64 * CLOCK_STEP_SECONDS
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    pub fn live_count(&self) -> usize {
        self.targets.len()
    }

    pub fn target(&self, id: u32) -> Option<&Target> {
        self.targets.get(&id)
    }

    pub(crate) fn target_mut(&mut self, id: u32) -> Option<&mut Target> {
        self.targets.get_mut(&id)
    }

    pub(crate) fn remove_target(&mut self, id: u32) -> Option<Target> {
        self.targets.remove(&id)
    }

    /// Count one clock tick. Ignored unless Playing, so time freezes the
    /// moment the game ends.
    pub(crate) fn add_clock_tick(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.elapsed_ticks += 1;
        true
    }

    /// Move the pointer past a correctly clicked target
    pub(crate) fn advance_expected(&mut self) {
        debug_assert!(self.next_expected_id <= self.target_count);
        self.next_expected_id += 1;
    }

    pub(crate) fn mark_lost(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Lost;
        }
    }

    /// Live set empty and every id clicked
    pub fn win_condition_holds(&self) -> bool {
        self.targets.is_empty() && self.next_expected_id > self.target_count
    }

    /// Enter Won if Playing and the win condition holds
    pub(crate) fn check_won(&mut self) -> bool {
        if self.status == GameStatus::Playing && self.win_condition_holds() {
            self.status = GameStatus::Won;
            return true;
        }
        false
    }
}
