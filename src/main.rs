//! Click Order native entry point
//!
//! Headless demo: a scripted player works through a board in real time.
//! Each frame measures wall-clock time with `Instant` and feeds the delta to
//! the game.
//!
//! Usage: `click-order [count] [seed]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{Duration, Instant};

    use anyhow::Context;
    use glam::Vec2;

    use click_order::render::{DrawSurface, Rgb, StatusDisplay, StatusLine};
    use click_order::sim::{ClickOutcome, GameController, GameStatus};
    use click_order::{PointerEvent, PointerOutcome, Settings, parse_target_count};

    /// Target frame length (about 60 Hz)
    const FRAME: Duration = Duration::from_millis(16);
    /// Scripted player clicks this often
    const CLICK_EVERY_MS: u64 = 350;
    /// Give up after this much game time
    const MAX_RUN_MS: u64 = 10 * 60 * 1000;

    /// Writes draw calls and status changes to the log
    #[derive(Default)]
    struct LogView {
        last_line: Option<StatusLine>,
    }

    impl DrawSurface for LogView {
        fn clear(&mut self) {
            log::trace!("clear");
        }

        fn draw_circle(&mut self, center: Vec2, radius: f32, fill: Rgb) {
            log::trace!(
                "circle ({:.0}, {:.0}) r={} {}",
                center.x,
                center.y,
                radius,
                fill.to_css()
            );
        }

        fn draw_label(&mut self, text: &str, center: Vec2) {
            log::trace!("label {} at ({:.0}, {:.0})", text, center.x, center.y);
        }
    }

    impl StatusDisplay for LogView {
        fn refresh(&mut self, line: &StatusLine) {
            if self.last_line.map(|l| l.status) != Some(line.status) {
                log::info!("{}", line);
            }
            self.last_line = Some(*line);
        }
    }

    struct Demo {
        game: GameController<LogView>,
        accumulator_ms: f32,
        since_click_ms: u64,
    }

    impl Demo {
        /// Feed one frame of wall time into the game, whole milliseconds only
        fn update(&mut self, dt: f32) {
            // Clamp long stalls (suspended process, debugger)
            let dt = dt.min(0.1);
            self.accumulator_ms += dt * 1000.0;
            let whole = self.accumulator_ms.floor();
            self.accumulator_ms -= whole;
            let step = whole as u64;

            self.game.advance(step);
            self.since_click_ms += step;

            if self.since_click_ms >= CLICK_EVERY_MS {
                self.since_click_ms = 0;
                self.click_next();
            }
        }

        /// Click the expected target somewhere no lower live id covers
        fn click_next(&mut self) {
            let state = self.game.state();
            let expected = state.next_expected_id();
            let Some(target) = state.target(expected) else {
                return;
            };
            let point = free_spot(self.game.state(), expected, target.pos, target.radius);

            match self.game.handle_pointer(PointerEvent::Click(point)) {
                PointerOutcome::Click(ClickOutcome::Wrong { id, expected }) => {
                    log::warn!("Bot hit {} while aiming for {}", id, expected);
                }
                PointerOutcome::Click(outcome) => log::debug!("{:?}", outcome),
                PointerOutcome::Hover(_) => {}
            }
        }
    }

    /// A point inside target `id` not covered by any smaller live id, or the
    /// centre if the target is fully buried
    fn free_spot(
        state: &click_order::GameState,
        id: u32,
        center: Vec2,
        radius: f32,
    ) -> Vec2 {
        let candidates = std::iter::once(center).chain((0..16).flat_map(|i| {
            let theta = i as f32 * std::f32::consts::TAU / 16.0;
            let dir = Vec2::new(theta.cos(), theta.sin());
            [center + dir * radius * 0.5, center + dir * radius * 0.9]
        }));
        candidates
            .into_iter()
            .find(|p| {
                state
                    .targets()
                    .filter(|t| t.id < id)
                    .all(|t| !t.contains(*p))
            })
            .unwrap_or(center)
    }

    pub fn run() -> anyhow::Result<()> {
        let mut args = std::env::args().skip(1);
        let count_arg = args.next();
        let seed = args
            .next()
            .map(|s| s.parse::<u64>())
            .transpose()
            .context("seed must be an unsigned integer")?;

        let mut settings = Settings::default();
        settings.seed = seed;
        let count = match count_arg.as_deref() {
            Some(raw) => parse_target_count(Some(raw)),
            None => settings.target_count,
        };

        let mut game = GameController::new(settings, LogView::default())?;
        game.restart(count).context("could not start a game")?;

        let mut demo = Demo {
            game,
            accumulator_ms: 0.0,
            since_click_ms: 0,
        };
        let mut last_time = Instant::now();
        while demo.game.status() == GameStatus::Playing && demo.game.now_ms() < MAX_RUN_MS {
            std::thread::sleep(FRAME);
            let now = Instant::now();
            let dt = now.duration_since(last_time).as_secs_f32();
            last_time = now;
            demo.update(dt);
        }

        let line = demo.game.status_line();
        println!("{} ({} targets, {}s)", line.banner(), count, line.time_text());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Click Order (native) starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly; nothing to run here
}
