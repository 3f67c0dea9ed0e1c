//! Collision detection and response for the court
//!
//! Three hardcoded colliders: the floor line, the two side walls, and the two
//! rim edges (treated as points). Each resolver clamps the ball and flips the
//! relevant velocity component in place.

use glam::Vec2;

use super::state::{Ball, Hoop, Viewport};

/// Result of a floor check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorContact {
    /// Bounce left too little vertical speed to keep going
    pub at_rest: bool,
}

/// Which rim edge the ball touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RimEdge {
    Left,
    Right,
}

/// Bounce off the floor line (`viewport.height - radius`)
pub fn resolve_floor(
    ball: &mut Ball,
    viewport: Viewport,
    damping: f32,
    rest_speed: f32,
) -> Option<FloorContact> {
    let floor_y = viewport.height - ball.radius;
    if ball.pos.y <= floor_y {
        return None;
    }

    ball.pos.y = floor_y;
    ball.vel.y *= -damping;

    Some(FloorContact {
        at_rest: ball.vel.y.abs() < rest_speed,
    })
}

/// Bounce off the left/right viewport edges; returns true on contact
pub fn resolve_walls(ball: &mut Ball, viewport: Viewport, damping: f32) -> bool {
    let min_x = ball.radius;
    let max_x = viewport.width - ball.radius;

    if ball.pos.x < min_x {
        ball.pos.x = min_x;
    } else if ball.pos.x > max_x {
        ball.pos.x = max_x;
    } else {
        return false;
    }

    ball.vel.x *= -damping;
    true
}

/// Bounce off a rim edge if the ball is within `contact_distance` of it
///
/// Not a true circle-circle response: horizontal velocity is forced away from
/// the edge and vertical velocity flips. The left edge is tested first. A fast
/// ball can skip past an edge in one tick.
pub fn resolve_rim(
    ball: &mut Ball,
    hoop: &Hoop,
    contact_distance: f32,
    damping: f32,
) -> Option<RimEdge> {
    let edge = if ball.pos.distance(hoop.left_edge()) < contact_distance {
        RimEdge::Left
    } else if ball.pos.distance(hoop.right_edge()) < contact_distance {
        RimEdge::Right
    } else {
        return None;
    };

    let push = match edge {
        RimEdge::Left => 1.0,
        RimEdge::Right => -1.0,
    };
    ball.vel = Vec2::new(push * ball.vel.x.abs() * damping, -ball.vel.y * damping);

    Some(edge)
}

/// Whether the ball sits inside the scoring window on the way down
pub fn in_scoring_window(ball: &Ball, hoop: &Hoop, half_width: f32, band: f32) -> bool {
    (ball.pos.x - hoop.x).abs() < half_width
        && (ball.pos.y - hoop.y).abs() < band
        && ball.vel.y > 0.0
}
