//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Viewport and input passed in, never looked up
//! - No rendering or platform dependencies

pub mod collision;
pub mod gesture;
pub mod round;
pub mod state;
pub mod tick;
pub mod view;

pub use collision::{FloorContact, RimEdge, in_scoring_window, resolve_floor, resolve_rim, resolve_walls};
pub use gesture::{PointerEvent, ThrowOutcome, throw_velocity};
pub use state::{
    Ball, BallPhase, GameEvent, GamePhase, GameState, Hoop, RoundSession, RoundSummary, Viewport,
};
pub use tick::{TickInput, tick};
pub use view::{ChangeTracker, Hud, Scene};
