//! Swipe gesture interpreter
//!
//! Idle → Dragging on pointer down, Dragging → Airborne on a valid release,
//! back to Idle on any rejected release. Screen coordinates throughout, so
//! "up" is negative y.
//!
//! Throw direction: velocity = (release point − press point) × power. A swipe
//! toward the top of the screen therefore launches the ball upward.

use glam::Vec2;

use super::state::{BallPhase, GameEvent, GameState};
use crate::clamp_length;
use crate::tuning::Tuning;

/// Raw pointer input (mouse or first touch), in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
    /// Touch cancelled or pointer left the play area
    Cancel,
}

/// What a release turned into
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThrowOutcome {
    /// Ball launched with this velocity (pixels per tick)
    Thrown { velocity: Vec2 },
    /// Swipe went down the screen
    Downward,
    /// Swipe too short, treated as a tap
    TooShort,
    /// No drag was in progress
    Ignored,
}

/// Convert a finished swipe into a launch velocity
pub fn throw_velocity(start: Vec2, current: Vec2, tuning: &Tuning) -> ThrowOutcome {
    let swipe = current - start;

    if swipe.y > 0.0 {
        return ThrowOutcome::Downward;
    }
    if swipe.length() <= tuning.min_swipe {
        return ThrowOutcome::TooShort;
    }

    let swipe = clamp_length(swipe, tuning.max_drag_distance);
    ThrowOutcome::Thrown {
        velocity: swipe * tuning.swipe_power,
    }
}

impl GameState {
    /// Apply one pointer event
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(p) => {
                self.pointer_down(p);
            }
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up => {
                self.pointer_up();
            }
            PointerEvent::Cancel => self.pointer_cancel(),
        }
    }

    /// Begin a swipe; returns false when the press is ignored
    pub fn pointer_down(&mut self, p: Vec2) -> bool {
        if !self.is_playing() || !self.ball.is_idle() {
            return false;
        }
        if let Some(grab) = self.tuning.grab_radius {
            if p.distance(self.ball.pos) > grab {
                return false;
            }
        }

        self.ball.phase = BallPhase::Dragging { start: p, current: p };
        true
    }

    /// Track the swipe for the indicator line
    pub fn pointer_move(&mut self, p: Vec2) {
        if let BallPhase::Dragging { ref mut current, .. } = self.ball.phase {
            *current = p;
        }
    }

    /// Finish the swipe, launching the ball if it qualifies
    pub fn pointer_up(&mut self) -> ThrowOutcome {
        let Some((start, current)) = self.ball.drag_points() else {
            return ThrowOutcome::Ignored;
        };

        if !self.is_playing() {
            self.ball.phase = BallPhase::Idle;
            return ThrowOutcome::Ignored;
        }

        let outcome = throw_velocity(start, current, &self.tuning);
        match outcome {
            ThrowOutcome::Thrown { velocity } => {
                self.ball.vel = velocity;
                self.ball.phase = BallPhase::Airborne;
                self.session.shots_taken += 1;
                self.events.push(GameEvent::Thrown {
                    shots_taken: self.session.shots_taken,
                });
                log::debug!("Throw #{} at {:?}", self.session.shots_taken, velocity);
            }
            rejected => {
                self.ball.phase = BallPhase::Idle;
                log::debug!("Swipe rejected: {:?}", rejected);
            }
        }
        outcome
    }

    /// Drop the swipe without throwing
    pub fn pointer_cancel(&mut self) {
        if self.ball.is_dragging() {
            self.ball.phase = BallPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, Viewport};
    use proptest::prelude::*;

    fn playing() -> GameState {
        let mut state = GameState::new(Tuning::default(), Viewport::new(400.0, 800.0));
        state.phase = GamePhase::Playing;
        state
    }

    fn swipe(state: &mut GameState, from: Vec2, to: Vec2) -> ThrowOutcome {
        assert!(state.pointer_down(from));
        state.pointer_move(to);
        state.pointer_up()
    }

    #[test]
    fn test_upward_swipe_throws() {
        let mut state = playing();
        let outcome = swipe(&mut state, Vec2::new(200.0, 500.0), Vec2::new(200.0, 300.0));

        assert!(matches!(outcome, ThrowOutcome::Thrown { .. }));
        assert_eq!(state.session.shots_taken, 1);
        assert!(state.ball.is_airborne());
        assert!(state.ball.vel.y < 0.0);
        assert!((state.ball.vel.y - -200.0 * 0.345).abs() < 0.001);
        assert_eq!(state.ball.vel.x, 0.0);
        assert_eq!(state.take_events(), vec![GameEvent::Thrown { shots_taken: 1 }]);
    }

    #[test]
    fn test_tap_is_not_a_throw() {
        let mut state = playing();
        let outcome = swipe(&mut state, Vec2::new(200.0, 500.0), Vec2::new(203.0, 496.0));

        assert_eq!(outcome, ThrowOutcome::TooShort);
        assert_eq!(state.session.shots_taken, 0);
        assert!(state.ball.is_idle());
        assert!(state.ball.drag_points().is_none());
    }

    #[test]
    fn test_downward_swipe_rejected() {
        let mut state = playing();
        let outcome = swipe(&mut state, Vec2::new(200.0, 300.0), Vec2::new(150.0, 600.0));

        assert_eq!(outcome, ThrowOutcome::Downward);
        assert_eq!(state.session.shots_taken, 0);
        assert!(state.ball.is_idle());
    }

    #[test]
    fn test_long_swipe_is_clamped() {
        let velocity = match throw_velocity(
            Vec2::new(200.0, 800.0),
            Vec2::new(200.0, 0.0),
            &Tuning::default(),
        ) {
            ThrowOutcome::Thrown { velocity } => velocity,
            other => panic!("expected throw, got {:?}", other),
        };
        assert!((velocity.y - -250.0 * 0.345).abs() < 0.001);
    }

    #[test]
    fn test_horizontal_swipe_allowed() {
        let outcome = throw_velocity(Vec2::new(100.0, 400.0), Vec2::new(200.0, 400.0), &Tuning::default());
        assert!(matches!(outcome, ThrowOutcome::Thrown { velocity } if velocity.x > 0.0));
    }

    #[test]
    fn test_no_drag_while_airborne() {
        let mut state = playing();
        swipe(&mut state, Vec2::new(200.0, 500.0), Vec2::new(200.0, 300.0));
        assert!(!state.pointer_down(Vec2::new(200.0, 500.0)));
        assert_eq!(state.pointer_up(), ThrowOutcome::Ignored);
        assert_eq!(state.session.shots_taken, 1);
    }

    #[test]
    fn test_no_drag_outside_round() {
        let mut state = GameState::new(Tuning::default(), Viewport::default());
        assert!(!state.pointer_down(Vec2::new(200.0, 500.0)));
        assert!(state.ball.is_idle());
    }

    #[test]
    fn test_grab_radius() {
        let mut state = playing();
        state.tuning.grab_radius = Some(80.0);
        // Ball rests at (200, 700)
        assert!(!state.pointer_down(Vec2::new(200.0, 300.0)));
        assert!(state.pointer_down(Vec2::new(230.0, 690.0)));
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut state = playing();
        state.pointer_down(Vec2::new(200.0, 500.0));
        state.handle_pointer(PointerEvent::Cancel);
        assert!(state.ball.is_idle());
        assert_eq!(state.session.shots_taken, 0);
    }

    #[test]
    fn test_round_end_mid_drag_drops_swipe() {
        let mut state = playing();
        state.pointer_down(Vec2::new(200.0, 500.0));
        state.pointer_move(Vec2::new(200.0, 200.0));
        state.phase = GamePhase::GameOver;
        assert_eq!(state.pointer_up(), ThrowOutcome::Ignored);
        assert!(state.ball.is_idle());
        assert_eq!(state.session.shots_taken, 0);
    }

    proptest! {
        #[test]
        fn prop_downward_swipes_never_throw(
            x0 in 0.0f32..1000.0,
            y0 in 0.0f32..1000.0,
            dx in -1000.0f32..1000.0,
            dy in 0.001f32..1000.0,
        ) {
            let mut state = playing();
            state.pointer_down(Vec2::new(x0, y0));
            state.pointer_move(Vec2::new(x0 + dx, y0 + dy));
            prop_assert_eq!(state.pointer_up(), ThrowOutcome::Downward);
            prop_assert_eq!(state.session.shots_taken, 0);
            prop_assert!(state.ball.is_idle());
        }

        #[test]
        fn prop_throw_speed_is_bounded(
            dx in -2000.0f32..2000.0,
            dy in -2000.0f32..0.0,
        ) {
            let tuning = Tuning::default();
            if let ThrowOutcome::Thrown { velocity } =
                throw_velocity(Vec2::ZERO, Vec2::new(dx, dy), &tuning)
            {
                prop_assert!(velocity.length() <= tuning.max_drag_distance * tuning.swipe_power + 0.01);
            }
        }
    }
}
