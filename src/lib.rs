//! Click Order - a numbered-circle reaction game
//!
//! Core modules:
//! - `sim`: Deterministic game logic (targets, timers, state machine)
//! - `render`: Drawing surface and status display boundary
//! - `input`: Pointer events and target-count parsing
//! - `settings`: Board configuration

pub mod error;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use input::{Cursor, PointerEvent, PointerOutcome, parse_target_count};
pub use render::{DrawSurface, NullView, Rgb, StatusDisplay, StatusLine, View};
pub use settings::Settings;
pub use sim::{ClickOutcome, GameController, GameState, GameStatus, SimScheduler, Target};

/// Game configuration constants
pub mod consts {
    /// Board defaults (pixels)
    pub const DEFAULT_WIDTH: f32 = 500.0;
    pub const DEFAULT_HEIGHT: f32 = 450.0;
    /// Shared radius of every target
    pub const TARGET_RADIUS: f32 = 24.0;

    /// Elapsed-time clock: one tick every 100 ms adds a tenth of a second
    pub const CLOCK_INTERVAL_MS: u64 = 100;
    pub const CLOCK_STEP_SECONDS: f64 = 0.1;

    /// Fade: progress grows by FADE_STEP every FADE_INTERVAL_MS
    pub const FADE_INTERVAL_MS: u64 = 50;
    pub const FADE_STEP: f32 = 0.02;

    /// A cleared target disappears this long after its correct click,
    /// whatever its fade progress
    pub const REMOVAL_DELAY_MS: u64 = 2000;

    /// Upper bound on targets per game (input is clamped to this)
    pub const MAX_TARGET_COUNT: u32 = 10_000;
}
