//! Input boundary: pointer events and the target-count field

use glam::Vec2;

use crate::consts::MAX_TARGET_COUNT;
use crate::sim::ClickOutcome;

/// Pointer event, already in board-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Click(Vec2),
    Move(Vec2),
}

/// Cursor affordance over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Over a target
    Pointer,
    #[default]
    Default,
}

impl Cursor {
    pub fn from_hover(over_target: bool) -> Self {
        if over_target {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    /// CSS cursor keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Cursor::Pointer => "pointer",
            Cursor::Default => "default",
        }
    }
}

/// Result of feeding one pointer event to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Click(ClickOutcome),
    Hover(Cursor),
}

/// Read the target-count field.
///
/// Missing, empty, non-numeric, non-finite and non-positive input all mean 0.
/// Fractions round up and huge values are clamped to `MAX_TARGET_COUNT`.
pub fn parse_target_count(input: Option<&str>) -> u32 {
    let Some(text) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return 0;
    };
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.ceil().min(MAX_TARGET_COUNT as f64) as u32,
        _ => 0,
    }
}
