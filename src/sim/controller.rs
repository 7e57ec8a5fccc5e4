//! Game orchestration
//!
//! `GameController` owns the state, every timer handle and the scheduler
//! they live on. Input calls (`restart`, `on_click`, `on_hover`) apply their
//! effects fully before returning; `advance` then lets time pass, firing due
//! timers one at a time in deadline order.

use glam::Vec2;

use super::clock::Clock;
use super::generate::TargetGenerator;
use super::hit;
use super::schedule::{FiredTimer, Scheduler, SimScheduler, TimerEvent};
use super::state::{GameState, GameStatus, Target};
use super::transition::TransitionScheduler;
use crate::consts::MAX_TARGET_COUNT;
use crate::error::GameError;
use crate::input::{Cursor, PointerEvent, PointerOutcome, parse_target_count};
use crate::render::{StatusLine, View, render_targets};
use crate::settings::Settings;

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Game not in progress
    Ignored,
    /// No target under the pointer
    Miss,
    /// Expected target hit; it starts clearing
    Correct { id: u32 },
    /// Out-of-order target hit; the game is lost
    Wrong { id: u32, expected: u32 },
}

/// Runs games on a board
pub struct GameController<V: View, S: Scheduler = SimScheduler> {
    settings: Settings,
    state: GameState,
    generator: TargetGenerator,
    clock: Clock,
    transitions: TransitionScheduler,
    scheduler: S,
    view: V,
}

impl<V: View> GameController<V, SimScheduler> {
    /// Controller on virtual time, advanced with `advance`
    pub fn new(settings: Settings, view: V) -> Result<Self, GameError> {
        Self::with_scheduler(settings, view, SimScheduler::new())
    }
}

impl<V: View, S: Scheduler> GameController<V, S> {
    pub fn with_scheduler(settings: Settings, view: V, scheduler: S) -> Result<Self, GameError> {
        let generator = match settings.seed {
            Some(seed) => TargetGenerator::seeded(seed),
            None => TargetGenerator::from_entropy(),
        };
        Self::with_generator(settings, view, scheduler, generator)
    }

    /// Full control over where layouts come from
    pub fn with_generator(
        settings: Settings,
        view: V,
        scheduler: S,
        generator: TargetGenerator,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        let mut controller = Self {
            settings,
            state: GameState::new(),
            generator,
            clock: Clock::new(),
            transitions: TransitionScheduler::new(),
            scheduler,
            view,
        };
        controller.refresh_status();
        Ok(controller)
    }

    /// Throw away the current game and start a new one with `count` targets.
    ///
    /// On error (no randomness) the current game is left exactly as it was.
    pub fn restart(&mut self, count: u32) -> Result<(), GameError> {
        let count = count.min(MAX_TARGET_COUNT);
        let targets = self.generator.generate(
            count,
            self.settings.width,
            self.settings.height,
            self.settings.radius,
        )?;
        self.begin_game(targets);
        Ok(())
    }

    /// Restart on a fixed board (replays, puzzles). Ids must run 1..=N in
    /// order, every radius must be positive and every centre must lie on
    /// the board.
    pub fn restart_with_layout(&mut self, targets: Vec<Target>) -> Result<(), GameError> {
        if targets.len() > MAX_TARGET_COUNT as usize {
            return Err(GameError::InvalidLayout(format!(
                "{} targets exceeds the limit of {}",
                targets.len(),
                MAX_TARGET_COUNT
            )));
        }
        for (i, target) in targets.iter().enumerate() {
            if target.id != i as u32 + 1 {
                return Err(GameError::InvalidLayout(format!(
                    "target at position {} has id {}",
                    i, target.id
                )));
            }
            if !target.radius.is_finite() || target.radius <= 0.0 {
                return Err(GameError::InvalidLayout(format!(
                    "target {} has radius {}",
                    target.id, target.radius
                )));
            }
            let on_board = target.pos.is_finite()
                && (0.0..=self.settings.width).contains(&target.pos.x)
                && (0.0..=self.settings.height).contains(&target.pos.y);
            if !on_board {
                return Err(GameError::InvalidLayout(format!(
                    "target {} centre ({}, {}) is off the board",
                    target.id, target.pos.x, target.pos.y
                )));
            }
        }
        let targets = targets
            .into_iter()
            .map(|t| Target::new(t.id, t.pos, t.radius))
            .collect();
        self.begin_game(targets);
        Ok(())
    }

    fn begin_game(&mut self, targets: Vec<Target>) {
        // Stale timers must never touch the new board
        self.clock.stop(&mut self.scheduler);
        self.transitions.cancel_all(&mut self.scheduler);

        self.state.reset(targets);
        log::info!("New game with {} targets", self.state.target_count());

        if self.state.check_won() {
            log::info!("Empty board, won immediately");
        } else {
            self.clock.start(&mut self.scheduler);
        }

        self.redraw();
        self.refresh_status();
    }

    /// Restart from the raw target-count field
    pub fn restart_from_input(&mut self, input: Option<&str>) -> Result<(), GameError> {
        self.restart(parse_target_count(input))
    }

    /// Handle a click at `point`
    pub fn on_click(&mut self, point: Vec2) -> ClickOutcome {
        if self.state.status() != GameStatus::Playing {
            return ClickOutcome::Ignored;
        }
        let Some(id) = hit::resolve(point, self.state.targets()).map(|t| t.id) else {
            return ClickOutcome::Miss;
        };

        let expected = self.state.next_expected_id();
        if id == expected {
            self.state.advance_expected();
            self.transitions.begin(id, &mut self.scheduler);
            log::debug!("Target {} cleared in order", id);
            ClickOutcome::Correct { id }
        } else {
            // Clearings already running are left to finish on their own
            self.state.mark_lost();
            self.clock.stop(&mut self.scheduler);
            log::info!(
                "Game over: clicked {} expecting {} at {:.1}s",
                id,
                expected,
                self.state.elapsed_seconds()
            );
            self.refresh_status();
            ClickOutcome::Wrong { id, expected }
        }
    }

    /// Whether a target is under `point`. Never changes state.
    pub fn on_hover(&self, point: Vec2) -> bool {
        hit::resolve(point, self.state.targets()).is_some()
    }

    pub fn cursor_at(&self, point: Vec2) -> Cursor {
        Cursor::from_hover(self.on_hover(point))
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        match event {
            PointerEvent::Click(point) => PointerOutcome::Click(self.on_click(point)),
            PointerEvent::Move(point) => PointerOutcome::Hover(self.cursor_at(point)),
        }
    }

    /// Let `ms` milliseconds pass, firing every timer that comes due
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(ms);
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.dispatch(fired);
        }
        self.scheduler.advance_to(until);
    }

    fn dispatch(&mut self, fired: FiredTimer) {
        match fired.event {
            TimerEvent::ClockTick => {
                if self.clock.owns(fired.id) && self.state.add_clock_tick() {
                    self.refresh_status();
                }
            }
            TimerEvent::FadeTick(id) => {
                if self.transitions.on_fade_tick(id, fired.id, &mut self.state) {
                    self.redraw();
                }
            }
            TimerEvent::Removal(id) => {
                let removed = self.transitions.on_removal(
                    id,
                    fired.id,
                    &mut self.state,
                    &mut self.scheduler,
                );
                if removed {
                    self.redraw();
                }
                if self.state.check_won() {
                    self.clock.stop(&mut self.scheduler);
                    log::info!("All cleared in {:.1}s", self.state.elapsed_seconds());
                    self.refresh_status();
                }
            }
        }
    }

    fn redraw(&mut self) {
        render_targets(&mut self.view, self.state.targets());
    }

    fn refresh_status(&mut self) {
        let line = self.status_line();
        self.view.refresh(&line);
    }

    pub fn status_line(&self) -> StatusLine {
        StatusLine {
            status: self.state.status(),
            elapsed_seconds: self.state.elapsed_seconds(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Armed timers (clock plus every fade and removal)
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub fn is_clearing(&self, id: u32) -> bool {
        self.transitions.is_clearing(id)
    }

    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DrawCall, NullView, RecordingView};
    use crate::sim::generate::EntropySource;
    use rand_pcg::Pcg32;

    fn controller(count: u32) -> GameController<RecordingView> {
        let mut c =
            GameController::new(Settings::default().with_seed(12345), RecordingView::new()).unwrap();
        c.restart(count).unwrap();
        c
    }

    fn center(c: &GameController<RecordingView>, id: u32) -> Vec2 {
        c.state().target(id).unwrap().pos
    }

    #[test]
    fn test_restart_starts_playing() {
        let c = controller(3);
        assert_eq!(c.status(), GameStatus::Playing);
        assert_eq!(c.state().live_count(), 3);
        assert_eq!(c.state().next_expected_id(), 1);
        assert!(c.clock_running());
        assert_eq!(c.pending_timers(), 1);
    }

    #[test]
    fn test_restart_draws_board() {
        let c = controller(2);
        let frame = c.view().last_frame();
        assert_eq!(frame.len(), 5);
        assert_eq!(frame[0], DrawCall::Clear);
        assert!(matches!(&frame[2], DrawCall::Label { text, .. } if text == "1"));
        assert!(matches!(&frame[4], DrawCall::Label { text, .. } if text == "2"));
    }

    #[test]
    fn test_clock_counts_tenths() {
        let mut c = controller(1);
        c.advance(1050);
        assert_eq!(c.state().elapsed_ticks(), 10);
        assert_eq!(c.status_line().time_text(), "1.0");
    }

    #[test]
    fn test_miss_is_noop() {
        let mut c = controller(1);
        let far = Vec2::new(-100.0, -100.0);
        assert_eq!(c.on_click(far), ClickOutcome::Miss);
        assert_eq!(c.status(), GameStatus::Playing);
        assert!(!c.on_hover(far));
    }

    #[test]
    fn test_hover_does_not_mutate() {
        let c = controller(2);
        let p = center(&c, 2);
        let before = c.state().clone();
        assert!(c.on_hover(p));
        assert_eq!(c.cursor_at(p), Cursor::Pointer);
        assert_eq!(c.state().next_expected_id(), before.next_expected_id());
        assert_eq!(c.state().live_count(), before.live_count());
    }

    #[test]
    fn test_clicks_ignored_before_first_restart() {
        let mut c =
            GameController::new(Settings::default().with_seed(1), RecordingView::new()).unwrap();
        assert_eq!(c.status(), GameStatus::Idle);
        assert_eq!(c.on_click(Vec2::new(250.0, 225.0)), ClickOutcome::Ignored);
        assert_eq!(c.view().last_status().unwrap().status, GameStatus::Idle);
    }

    #[test]
    fn test_restart_from_input() {
        let mut c =
            GameController::new(Settings::default().with_seed(1), RecordingView::new()).unwrap();
        c.restart_from_input(Some("4")).unwrap();
        assert_eq!(c.state().target_count(), 4);
        c.restart_from_input(Some("lots")).unwrap();
        assert_eq!(c.state().target_count(), 0);
        assert_eq!(c.status(), GameStatus::Won);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = Settings {
            width: -1.0,
            ..Settings::default()
        };
        assert!(GameController::new(settings, RecordingView::new()).is_err());
    }

    #[test]
    fn test_layout_validation() {
        let mut c = controller(1);
        let bad = vec![Target::new(2, Vec2::new(50.0, 50.0), 24.0)];
        assert!(matches!(
            c.restart_with_layout(bad),
            Err(GameError::InvalidLayout(_))
        ));
        // Failed restart leaves the running game alone
        assert_eq!(c.state().target_count(), 1);
        assert!(c.clock_running());

        let mut faded = Target::new(1, Vec2::new(50.0, 50.0), 24.0);
        faded.progress = 0.7;
        c.restart_with_layout(vec![faded]).unwrap();
        assert_eq!(c.state().target(1).unwrap().progress, 0.0);
    }

    #[test]
    fn test_layout_rejects_off_board_centres() {
        let mut c = controller(1);
        for pos in [
            Vec2::new(f32::NAN, 50.0),
            Vec2::new(50.0, f32::INFINITY),
            Vec2::new(-10.0, 50.0),
            Vec2::new(50.0, 451.0),
        ] {
            assert!(matches!(
                c.restart_with_layout(vec![Target::new(1, pos, 24.0)]),
                Err(GameError::InvalidLayout(_))
            ));
        }
        assert_eq!(c.status(), GameStatus::Playing);
        assert!(c.state().target(1).unwrap().pos.is_finite());
    }

    struct Unavailable;

    impl EntropySource for Unavailable {
        fn fresh_rng(&mut self) -> Result<Pcg32, GameError> {
            Err(GameError::Entropy("no device".to_string()))
        }
    }

    #[test]
    fn test_entropy_failure_keeps_current_game() {
        let mut c = GameController::with_generator(
            Settings::default(),
            RecordingView::new(),
            SimScheduler::new(),
            TargetGenerator::with_source(Unavailable),
        )
        .unwrap();
        let layout = vec![
            Target::new(1, Vec2::new(50.0, 50.0), 24.0),
            Target::new(2, Vec2::new(150.0, 50.0), 24.0),
        ];
        c.restart_with_layout(layout).unwrap();
        c.on_click(Vec2::new(50.0, 50.0));
        c.advance(300);

        let before = c.state().clone();
        let pending = c.pending_timers();
        let frames = c.view().frames();

        assert!(matches!(c.restart(5), Err(GameError::Entropy(_))));

        assert_eq!(c.status(), GameStatus::Playing);
        assert_eq!(c.state().target_count(), 2);
        assert_eq!(c.state().next_expected_id(), before.next_expected_id());
        assert_eq!(c.state().elapsed_ticks(), before.elapsed_ticks());
        let ids: Vec<u32> = c.state().targets().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(c.clock_running());
        assert!(c.is_clearing(1));
        assert_eq!(c.pending_timers(), pending);
        assert_eq!(c.view().frames(), frames);

        c.advance(100);
        assert_eq!(c.state().elapsed_ticks(), before.elapsed_ticks() + 1);
    }

    #[test]
    fn test_huge_advance_saturates() {
        let mut c = GameController::new(Settings::default().with_seed(1), NullView).unwrap();
        c.advance(10);
        c.advance(u64::MAX);
        assert_eq!(c.now_ms(), u64::MAX);
        c.advance(5);
        assert_eq!(c.now_ms(), u64::MAX);
    }

    #[test]
    fn test_pointer_events() {
        let mut c = controller(1);
        let p = center(&c, 1);
        assert_eq!(
            c.handle_pointer(PointerEvent::Move(p)),
            PointerOutcome::Hover(Cursor::Pointer)
        );
        assert_eq!(
            c.handle_pointer(PointerEvent::Click(p)),
            PointerOutcome::Click(ClickOutcome::Correct { id: 1 })
        );
    }
}
