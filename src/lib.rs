//! Street Hoops - A swipe-to-shoot basketball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, gestures, scoring, round clock)
//! - `tuning`: Data-driven physics coefficients
//! - `settings`: Player and deployment preferences
//! - `remark`: Coach comment request shown on the results card

pub mod remark;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{RemarkSettings, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
///
/// Velocities are in pixels per tick, accelerations in pixels per tick².
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per nominal frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Round length in seconds
    pub const GAME_DURATION: u32 = 30;

    /// Physics
    pub const GRAVITY: f32 = 0.6;
    /// Horizontal air resistance (multiplier on vx per tick)
    pub const FRICTION: f32 = 0.99;
    /// Floor and wall restitution
    pub const BOUNCE_DAMPING: f32 = 0.7;
    /// Rim restitution (harder bounce than the floor)
    pub const RIM_DAMPING: f32 = 0.8;
    /// Below this |vy| after a floor bounce the ball is at rest
    pub const REST_SPEED: f32 = 2.0;

    /// Swipe-to-velocity conversion
    pub const DRAG_POWER_SCALE: f32 = 0.23;
    pub const SWIPE_POWER: f32 = DRAG_POWER_SCALE * 1.5;
    pub const MAX_DRAG_DISTANCE: f32 = 250.0;
    /// Swipes this short or shorter are taps, not throws
    pub const MIN_SWIPE: f32 = 20.0;

    /// Ball and court geometry (CSS pixels)
    pub const BALL_RADIUS: f32 = 20.0;
    pub const HOOP_RADIUS: f32 = 35.0;
    /// Rim height, measured from the top of the viewport
    pub const HOOP_Y: f32 = 130.0;
    /// Resting ball height, measured from the bottom of the viewport
    pub const FLOOR_Y_OFFSET: f32 = 100.0;
    /// Extra reach of the rim-edge point colliders
    pub const RIM_TOLERANCE: f32 = 5.0;

    /// Scoring window
    pub const SCORE_MARGIN: f32 = 10.0;
    pub const SCORE_BAND: f32 = 20.0;

    /// Net flex on a make (presentational only)
    pub const NET_FLEX_SCALE: f32 = 1.15;
    /// ~150 ms at 60 Hz
    pub const NET_FLEX_TICKS: u32 = 9;
}

/// Scale `v` down so its length is at most `max`, keeping its direction
#[inline]
pub fn clamp_length(v: Vec2, max: f32) -> Vec2 {
    let len = v.length();
    if len > max { v * (max / len) } else { v }
}
