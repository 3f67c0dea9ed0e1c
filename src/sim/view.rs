//! Presentation snapshots
//!
//! The simulation runs every tick, but the page only needs touching when
//! something visible changed. [`ChangeTracker`] hands out a snapshot only when
//! it differs from the last one it handed out.

use glam::Vec2;

use super::state::{GamePhase, GameState};

/// Scoreboard values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub time_left: u32,
    pub shots_taken: u32,
    /// Last few seconds, for the warning style
    pub hurry: bool,
}

/// Court drawing values, rounded to whole pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub phase: GamePhase,
    pub ball_x: i32,
    pub ball_y: i32,
    pub ball_radius: i32,
    /// Spin in degrees, follows horizontal position
    pub ball_rotation: i32,
    pub dragging: bool,
    /// Swipe indicator from press to current point
    pub swipe: Option<(Vec2, Vec2)>,
    pub hoop_x: i32,
    pub hoop_y: i32,
    pub hoop_radius: i32,
    pub net_scale: f32,
}

/// Seconds left at which the clock turns red
pub const HURRY_SECONDS: u32 = 5;

impl Hud {
    pub fn of(state: &GameState) -> Self {
        Self {
            score: state.session.score,
            time_left: state.session.time_left,
            shots_taken: state.session.shots_taken,
            hurry: state.session.time_left <= HURRY_SECONDS,
        }
    }
}

impl Scene {
    pub fn of(state: &GameState) -> Self {
        let pos = state.ball.pos;
        Self {
            phase: state.phase,
            ball_x: pos.x.round() as i32,
            ball_y: pos.y.round() as i32,
            ball_radius: state.ball.radius.round() as i32,
            ball_rotation: (pos.x * 2.0).round() as i32,
            dragging: state.ball.is_dragging(),
            swipe: state
                .ball
                .drag_points()
                .map(|(start, current)| (start.round(), current.round())),
            hoop_x: state.hoop.x.round() as i32,
            hoop_y: state.hoop.y.round() as i32,
            hoop_radius: state.hoop.radius.round() as i32,
            net_scale: state.net_scale(),
        }
    }
}

/// Remembers what was last shown
#[derive(Debug, Default)]
pub struct ChangeTracker {
    hud: Option<Hud>,
    scene: Option<Scene>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// New scoreboard values, if they changed
    pub fn hud(&mut self, state: &GameState) -> Option<Hud> {
        let hud = Hud::of(state);
        if self.hud == Some(hud) {
            return None;
        }
        self.hud = Some(hud);
        Some(hud)
    }

    /// New court values, if they changed
    pub fn scene(&mut self, state: &GameState) -> Option<Scene> {
        let scene = Scene::of(state);
        if self.scene == Some(scene) {
            return None;
        }
        self.scene = Some(scene);
        Some(scene)
    }

    /// Forget everything so the next call redraws
    pub fn invalidate(&mut self) {
        self.hud = None;
        self.scene = None;
    }
}
