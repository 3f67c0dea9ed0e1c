//! Data-driven game balance
//!
//! Every coefficient the simulation reads lives here so it can be tweaked
//! from JSON without recompiling. Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and geometry coefficients for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Round length in seconds
    pub round_seconds: u32,

    // === Physics ===
    pub gravity: f32,
    pub friction: f32,
    pub bounce_damping: f32,
    pub rim_damping: f32,
    pub rest_speed: f32,

    // === Throwing ===
    pub swipe_power: f32,
    pub max_drag_distance: f32,
    pub min_swipe: f32,
    /// When set, a drag must start within this distance of the ball
    pub grab_radius: Option<f32>,

    // === Geometry ===
    pub ball_radius: f32,
    pub hoop_radius: f32,
    pub hoop_y: f32,
    pub floor_y_offset: f32,
    pub rim_tolerance: f32,

    // === Scoring ===
    pub score_margin: f32,
    pub score_band: f32,

    // === Net animation ===
    pub net_flex_scale: f32,
    pub net_flex_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_seconds: GAME_DURATION,

            gravity: GRAVITY,
            friction: FRICTION,
            bounce_damping: BOUNCE_DAMPING,
            rim_damping: RIM_DAMPING,
            rest_speed: REST_SPEED,

            swipe_power: SWIPE_POWER,
            max_drag_distance: MAX_DRAG_DISTANCE,
            min_swipe: MIN_SWIPE,
            grab_radius: None,

            ball_radius: BALL_RADIUS,
            hoop_radius: HOOP_RADIUS,
            hoop_y: HOOP_Y,
            floor_y_offset: FLOOR_Y_OFFSET,
            rim_tolerance: RIM_TOLERANCE,

            score_margin: SCORE_MARGIN,
            score_band: SCORE_BAND,

            net_flex_scale: NET_FLEX_SCALE,
            net_flex_ticks: NET_FLEX_TICKS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Horizontal half-width of the scoring window around the hoop center
    #[inline]
    pub fn score_half_width(&self) -> f32 {
        self.hoop_radius - self.ball_radius + self.score_margin
    }

    /// Distance from a rim edge at which the ball bounces off it
    #[inline]
    pub fn rim_contact_distance(&self) -> f32 {
        self.ball_radius + self.rim_tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.9, "grab_radius": 120.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.9);
        assert_eq!(tuning.grab_radius, Some(120.0));
        assert_eq!(tuning.friction, FRICTION);
        assert_eq!(tuning.round_seconds, 30);
    }

    #[test]
    fn test_derived_windows() {
        let tuning = Tuning::default();
        assert_eq!(tuning.score_half_width(), 25.0);
        assert_eq!(tuning.rim_contact_distance(), 25.0);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ gravity: }").is_err());
    }
}
