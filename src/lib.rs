//! Arena Football - a circular arena football physics toy
//!
//! Core modules:
//! - `sim`: Fixed-timestep disc physics (integration, collisions, goal detection)
//! - `matchplay`: Match clock and half/full-time state machine
//! - `audio`: Maps simulation events to audio cues
//! - `settings`: Tunable physics and match constants

pub mod audio;
pub mod error;
pub mod matchplay;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use matchplay::{MatchController, MatchPhase};
pub use settings::{MatchConfig, PhysicsConfig};

use glam::DVec2;
use std::f64::consts::TAU;

/// Game configuration constants
///
/// Tuned against a fixed 80 Hz frame loop. Nothing here is scaled by
/// elapsed time.
pub mod consts {
    /// Frames per real second the constants are tuned for
    pub const FPS: u32 = 80;
    /// Frames per simulated match minute
    pub const FRAMES_PER_SIM_MINUTE: u32 = 31;

    /// Arena dimensions
    pub const ARENA_RADIUS: f64 = 250.0;
    pub const DISC_RADIUS: f64 = 38.0;
    pub const DISC_MASS: f64 = 1.0;

    /// Goal mouth
    pub const GOAL_WIDTH_RADIANS: f64 = 0.32;
    pub const POST_RADIUS: f64 = 7.0;
    /// Initial goal angle (straight down in screen coordinates)
    pub const GOAL_START_ANGLE: f64 = std::f64::consts::FRAC_PI_2;
    /// Goal drift once the first goal has gone in (radians per tick)
    pub const GOAL_ROT_SPEED: f64 = 0.015;
    /// Distance from the wall at which the goal test kicks in
    pub const GOAL_MARGIN: f64 = 5.0;

    /// Launch speed per axis
    pub const SPEED: f64 = 5.6;
    /// Speed floor (never visibly stalls)
    pub const MIN_SPEED: f64 = 3.9;
    /// Speed multiplier while nerfed
    pub const NERF_SPEED_MULTIPLIER: f64 = 0.8;

    pub const GRAVITY: f64 = 0.022;
    pub const FRICTION: f64 = 0.99999;
    pub const BOUNCE_DAMPING: f64 = 0.95;
    pub const ELASTICITY: f64 = 0.96;
    /// Posts add energy on purpose
    pub const POST_ELASTICITY: f64 = 1.04;

    /// Wall/pair resolution passes per tick
    pub const SUBSTEPS: u32 = 8;
    /// Stand-in distance for coincident centers
    pub const DEGENERATE_DISTANCE: f64 = 0.1;

    /// Gap kept between a fresh spawn and the wall
    pub const SPAWN_CLEARANCE: f64 = 10.0;
    /// Rejection-sampling draws before falling back to the arena center
    pub const SPAWN_ATTEMPTS: u32 = 1000;
}

/// Wrap an angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Shorter-arc distance between two angles, in [0, π]
#[inline]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = (wrap_angle(a) - wrap_angle(b)).abs();
    if diff > std::f64::consts::PI {
        TAU - diff
    } else {
        diff
    }
}

/// Convert polar (r, theta) around `center` to cartesian
#[inline]
pub fn polar_to_cartesian(center: DVec2, r: f64, theta: f64) -> DVec2 {
    center + DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian to polar (r, theta) around `center`
#[inline]
pub fn cartesian_to_polar(center: DVec2, pos: DVec2) -> (f64, f64) {
    let d = pos - center;
    (d.length(), d.y.atan2(d.x))
}
