//! Game state and core simulation types
//!
//! One ball, one hoop, one round. Everything the tick mutates lives here.

use glam::Vec2;

use crate::tuning::Tuning;

/// Current screen of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for "play"
    Menu,
    /// Round in progress
    Playing,
    /// Round ended, results card showing
    GameOver,
}

/// What the ball is doing right now
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BallPhase {
    /// Resting at the throw spot
    Idle,
    /// Player is swiping; points are in screen coordinates
    Dragging { start: Vec2, current: Vec2 },
    /// In flight, physics running
    Airborne,
}

/// Visible drawing area in CSS pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 800.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// The basketball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub phase: BallPhase,
}

impl Ball {
    pub fn new(radius: f32, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            phase: BallPhase::Idle,
        }
    }

    /// Canonical resting spot: horizontally centered, a fixed height above the bottom
    pub fn rest_position(viewport: Viewport, tuning: &Tuning) -> Vec2 {
        Vec2::new(viewport.center_x(), viewport.height - tuning.floor_y_offset)
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase == BallPhase::Idle
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.phase == BallPhase::Airborne
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, BallPhase::Dragging { .. })
    }

    /// `(start, current)` of the swipe in progress
    pub fn drag_points(&self) -> Option<(Vec2, Vec2)> {
        match self.phase {
            BallPhase::Dragging { start, current } => Some((start, current)),
            _ => None,
        }
    }

    /// Put the ball back at `pos`, stationary and idle
    pub fn settle_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.phase = BallPhase::Idle;
    }
}

/// Hoop geometry; only `x` ever changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hoop {
    /// Horizontal center (tracks the viewport center)
    pub x: f32,
    /// Rim height from the top of the viewport
    pub y: f32,
    pub radius: f32,
}

impl Hoop {
    pub fn centered(viewport: Viewport, tuning: &Tuning) -> Self {
        Self {
            x: viewport.center_x(),
            y: tuning.hoop_y,
            radius: tuning.hoop_radius,
        }
    }

    #[inline]
    pub fn left_edge(&self) -> Vec2 {
        Vec2::new(self.x - self.radius, self.y)
    }

    #[inline]
    pub fn right_edge(&self) -> Vec2 {
        Vec2::new(self.x + self.radius, self.y)
    }
}

/// Per-round counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSession {
    pub score: u32,
    pub shots_taken: u32,
    /// Whole seconds remaining
    pub time_left: u32,
    /// Set by a make, cleared on reset; stops one pass through the rim counting twice
    pub score_cooldown: bool,
}

impl RoundSession {
    pub fn new(seconds: u32) -> Self {
        Self {
            time_left: seconds,
            ..Default::default()
        }
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            score: self.score,
            shots_taken: self.shots_taken,
        }
    }
}

/// Final totals handed off when the clock runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    pub shots_taken: u32,
}

impl RoundSummary {
    /// Makes per throw as a rounded percentage (0 when nothing was thrown)
    pub fn accuracy_percent(&self) -> u32 {
        if self.shots_taken == 0 {
            0
        } else {
            (self.score as f32 / self.shots_taken as f32 * 100.0).round() as u32
        }
    }
}

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    Thrown { shots_taken: u32 },
    FloorBounce,
    RimHit,
    Scored { score: u32 },
    BallReset,
    RoundOver(RoundSummary),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Viewport the geometry was last derived from
    pub viewport: Viewport,
    pub ball: Ball,
    pub hoop: Hoop,
    pub session: RoundSession,
    /// Skip the net flex on a make
    pub reduced_motion: bool,
    /// Simulation tick counter (Playing only)
    pub time_ticks: u64,
    /// Ticks left on the net flex
    pub(crate) net_flex_ticks: u32,
    /// Events since the last `take_events`
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game sitting on the menu screen
    pub fn new(tuning: Tuning, viewport: Viewport) -> Self {
        let ball = Ball::new(tuning.ball_radius, Ball::rest_position(viewport, &tuning));
        let hoop = Hoop::centered(viewport, &tuning);
        let session = RoundSession::new(tuning.round_seconds);
        Self {
            tuning,
            phase: GamePhase::Menu,
            viewport,
            ball,
            hoop,
            session,
            reduced_motion: false,
            time_ticks: 0,
            net_flex_ticks: 0,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Current net scale for drawing (1.0 at rest)
    pub fn net_scale(&self) -> f32 {
        if self.net_flex_ticks > 0 {
            self.tuning.net_flex_scale
        } else {
            1.0
        }
    }

    /// Return the ball to its resting spot and clear the scoring cooldown
    ///
    /// Geometry is re-derived from the current viewport, which also applies a
    /// resize that happened while the ball was in flight.
    pub fn reset_ball(&mut self) {
        self.hoop = Hoop::centered(self.viewport, &self.tuning);
        self.ball.settle_at(Ball::rest_position(self.viewport, &self.tuning));
        self.session.score_cooldown = false;
        self.events.push(GameEvent::BallReset);
    }

    /// Adopt a new viewport size
    ///
    /// Hoop and ball only move while the ball is idle; otherwise the next
    /// reset picks up the new size.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        if self.ball.is_idle() {
            self.hoop = Hoop::centered(viewport, &self.tuning);
            self.ball.pos = Ball::rest_position(viewport, &self.tuning);
        }
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
