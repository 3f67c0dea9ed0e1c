//! Round lifecycle
//!
//! Menu/GameOver → Playing on start, Playing → GameOver when the one-second
//! countdown runs out. The countdown is driven by a wall clock outside the
//! simulation tick.

use super::state::{GameEvent, GamePhase, GameState, RoundSession, RoundSummary};

impl GameState {
    /// Start (or restart) a round with fresh counters and a resting ball
    pub fn start_round(&mut self) {
        self.session = RoundSession::new(self.tuning.round_seconds);
        self.net_flex_ticks = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.reset_ball();
        self.events.push(GameEvent::RoundStarted);
        log::info!("Round started ({}s)", self.session.time_left);
    }

    /// One wall-clock second elapsed
    ///
    /// Returns the final totals exactly once, on the second that ends the
    /// round. Seconds arriving outside a round are ignored.
    pub fn countdown_second(&mut self) -> Option<RoundSummary> {
        if !self.is_playing() {
            return None;
        }

        if self.session.time_left <= 1 {
            self.session.time_left = 0;
            self.phase = GamePhase::GameOver;

            let summary = self.session.summary();
            self.events.push(GameEvent::RoundOver(summary));
            log::info!(
                "Round over: {} points from {} shots",
                summary.score,
                summary.shots_taken
            );
            return Some(summary);
        }

        self.session.time_left -= 1;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;
    use crate::sim::tick::{TickInput, tick};
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_round_over_fires_once() {
        let mut state = GameState::new(Tuning::default(), Viewport::default());
        state.start_round();
        state.session.score = 4;
        state.session.shots_taken = 9;

        let mut handoffs = Vec::new();
        for _ in 0..45 {
            if let Some(summary) = state.countdown_second() {
                handoffs.push(summary);
            }
        }

        assert_eq!(
            handoffs,
            vec![RoundSummary {
                score: 4,
                shots_taken: 9
            }]
        );
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.session.time_left, 0);

        let over_events = state
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::RoundOver(_)))
            .count();
        assert_eq!(over_events, 1);
    }

    #[test]
    fn test_round_lasts_thirty_seconds() {
        let mut state = GameState::new(Tuning::default(), Viewport::default());
        state.start_round();
        for second in 1..30 {
            assert!(state.countdown_second().is_none(), "ended early at {}", second);
            assert_eq!(state.session.time_left, 30 - second);
        }
        assert!(state.countdown_second().is_some());
    }

    #[test]
    fn test_countdown_ignored_on_menu() {
        let mut state = GameState::new(Tuning::default(), Viewport::default());
        assert!(state.countdown_second().is_none());
        assert_eq!(state.session.time_left, 30);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = GameState::new(Tuning::default(), Viewport::default());
        state.start_round();
        state.session.score = 7;
        state.session.shots_taken = 10;
        while state.countdown_second().is_none() {}

        state.start_round();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session, RoundSession::new(30));
        assert!(state.ball.is_idle());
    }

    #[test]
    fn test_frame_loop_runs_only_during_round() {
        // The browser frame loop re-arms itself only while this holds
        let mut state = GameState::new(Tuning::default(), Viewport::default());
        assert!(!state.is_playing());

        state.start_round();
        assert!(state.is_playing());
        for _ in 1..30 {
            state.countdown_second();
            assert!(state.is_playing());
        }
        state.countdown_second();
        assert!(!state.is_playing());

        state.start_round();
        assert!(state.is_playing());
    }

    #[test]
    fn test_physics_stops_after_round() {
        let viewport = Viewport::default();
        let mut state = GameState::new(Tuning::default(), viewport);
        state.start_round();
        state.pointer_down(Vec2::new(200.0, 600.0));
        state.pointer_move(Vec2::new(200.0, 400.0));
        state.pointer_up();
        assert!(state.ball.is_airborne());

        while state.countdown_second().is_none() {}
        let frozen = state.ball.pos;
        tick(&mut state, &TickInput::default(), viewport);
        assert_eq!(state.ball.pos, frozen);
        assert!(!state.pointer_down(Vec2::new(200.0, 600.0)));
    }
}
