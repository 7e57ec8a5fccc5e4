//! Game logic module
//!
//! All gameplay lives here and stays deterministic:
//! - Time only advances through a `Scheduler`
//! - Seeded RNG when a seed is configured
//! - Stable iteration order (by target id)
//! - No drawing or platform dependencies beyond the `View` boundary

pub mod clock;
pub mod controller;
pub mod generate;
pub mod hit;
pub mod schedule;
pub mod state;
pub mod transition;

pub use clock::Clock;
pub use controller::{ClickOutcome, GameController};
pub use generate::{EntropySource, OsEntropy, TargetGenerator, generate_targets};
pub use hit::{resolve, sd_circle};
pub use schedule::{FiredTimer, Scheduler, SimScheduler, TimerEvent, TimerId};
pub use state::{GameState, GameStatus, Target};
pub use transition::TransitionScheduler;
