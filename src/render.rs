//! Rendering boundary
//!
//! The game never draws pixels itself. It issues calls on a `DrawSurface`
//! and pushes a `StatusLine` to a `StatusDisplay`; the host supplies both
//! (canvas, terminal, test recorder).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameStatus, Target};

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White at 0, red at 1; progress outside [0, 1] is clamped
    pub fn lerp_white_to_red(progress: f32) -> Self {
        let p = progress.clamp(0.0, 1.0);
        let fade = (255.0 * (1.0 - p)).round() as u8;
        Self::new(255, fade, fade)
    }

    /// CSS `rgb()` notation
    pub fn to_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Something targets can be drawn on
pub trait DrawSurface {
    fn clear(&mut self);
    fn draw_circle(&mut self, center: Vec2, radius: f32, fill: Rgb);
    fn draw_label(&mut self, text: &str, center: Vec2);
}

/// Something that shows the status headline and timer
pub trait StatusDisplay {
    fn refresh(&mut self, line: &StatusLine);
}

/// Everything the game talks to on the output side
pub trait View: DrawSurface + StatusDisplay {}

impl<T: DrawSurface + StatusDisplay> View for T {}

/// Snapshot of what the status area shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusLine {
    pub status: GameStatus,
    pub elapsed_seconds: f64,
}

impl StatusLine {
    /// Elapsed time to one decimal place
    pub fn time_text(&self) -> String {
        format!("{:.1}", self.elapsed_seconds)
    }

    /// Headline shown above the board
    pub fn banner(&self) -> &'static str {
        match self.status {
            GameStatus::Idle | GameStatus::Playing => "LET'S PLAY",
            GameStatus::Won => "ALL CLEARED",
            GameStatus::Lost => "GAME OVER",
        }
    }
}

impl std::fmt::Display for StatusLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] Time: {}s",
            self.banner(),
            self.status.as_str(),
            self.time_text()
        )
    }
}

/// Redraw the whole board: one clear, then each target (circle, then its
/// number) in the order given
pub fn render_targets<'a, D, I>(surface: &mut D, targets: I)
where
    D: DrawSurface + ?Sized,
    I: IntoIterator<Item = &'a Target>,
{
    surface.clear();
    for target in targets {
        surface.draw_circle(target.pos, target.radius, target.color());
        surface.draw_label(&target.id.to_string(), target.pos);
    }
}

/// Discards all output
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl DrawSurface for NullView {
    fn clear(&mut self) {}
    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _fill: Rgb) {}
    fn draw_label(&mut self, _text: &str, _center: Vec2) {}
}

impl StatusDisplay for NullView {
    fn refresh(&mut self, _line: &StatusLine) {}
}

/// One call made on a `DrawSurface`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Circle { center: Vec2, radius: f32, fill: Rgb },
    Label { text: String, center: Vec2 },
}

/// Keeps every call for later inspection (replays, headless checks)
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    pub calls: Vec<DrawCall>,
    pub status_lines: Vec<StatusLine>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls since (and including) the most recent clear
    pub fn last_frame(&self) -> &[DrawCall] {
        let start = self
            .calls
            .iter()
            .rposition(|c| *c == DrawCall::Clear)
            .unwrap_or(0);
        &self.calls[start..]
    }

    pub fn frames(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Clear).count()
    }

    pub fn last_status(&self) -> Option<&StatusLine> {
        self.status_lines.last()
    }
}

impl DrawSurface for RecordingView {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, fill: Rgb) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            fill,
        });
    }

    fn draw_label(&mut self, text: &str, center: Vec2) {
        self.calls.push(DrawCall::Label {
            text: text.to_string(),
            center,
        });
    }
}

impl StatusDisplay for RecordingView {
    fn refresh(&mut self, line: &StatusLine) {
        self.status_lines.push(*line);
    }
}
