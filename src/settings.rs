//! Tunable physics and match settings
//!
//! Loaded from JSON; any field missing from the file falls back to the
//! tuned default. Values are per-session, never per-entity.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Physics constants for one match session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // === Integration ===
    /// Added to vy every tick (screen coordinates, +y is down)
    pub gravity: f64,
    /// Multiplicative velocity decay per tick, in (0, 1]
    pub friction: f64,
    /// Launch speed per axis
    pub speed: f64,
    /// Speed floor
    pub min_speed: f64,
    /// Floor/target multiplier while a disc is nerfed
    pub nerf_speed_multiplier: f64,

    // === Collisions ===
    /// Energy kept after a wall reflection
    pub boundary_bounce_damping: f64,
    /// Restitution between discs
    pub disc_elasticity: f64,
    /// Restitution off a post (may exceed 1.0)
    pub post_elasticity: f64,
    /// Wall/pair resolution passes per tick
    pub substeps: u32,

    // === Geometry ===
    pub arena_radius: f64,
    pub disc_radius: f64,
    pub disc_mass: f64,
    pub post_radius: f64,
    /// Full angular width of the goal mouth
    pub goal_width: f64,
    pub goal_start_angle: f64,
    /// Radians per tick once the goal starts drifting
    pub goal_rot_speed: f64,
    pub goal_margin: f64,

    // === Serve ===
    /// Per-axis speed jitter applied when re-serving after a goal
    pub serve_jitter_min: f64,
    pub serve_jitter_max: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            speed: SPEED,
            min_speed: MIN_SPEED,
            nerf_speed_multiplier: NERF_SPEED_MULTIPLIER,

            boundary_bounce_damping: BOUNCE_DAMPING,
            disc_elasticity: ELASTICITY,
            post_elasticity: POST_ELASTICITY,
            substeps: SUBSTEPS,

            arena_radius: ARENA_RADIUS,
            disc_radius: DISC_RADIUS,
            disc_mass: DISC_MASS,
            post_radius: POST_RADIUS,
            goal_width: GOAL_WIDTH_RADIANS,
            goal_start_angle: GOAL_START_ANGLE,
            goal_rot_speed: GOAL_ROT_SPEED,
            goal_margin: GOAL_MARGIN,

            serve_jitter_min: 0.8,
            serve_jitter_max: 1.2,
        }
    }
}

impl PhysicsConfig {
    /// Half of the goal mouth's angular width
    #[inline]
    pub fn goal_half_width(&self) -> f64 {
        self.goal_width / 2.0
    }

    /// Parse and validate from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the ranges the physics relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("speed", self.speed)?;
        positive("min_speed", self.min_speed)?;
        positive("arena_radius", self.arena_radius)?;
        positive("disc_radius", self.disc_radius)?;
        positive("disc_mass", self.disc_mass)?;
        positive("post_radius", self.post_radius)?;
        positive("goal_width", self.goal_width)?;
        positive("substeps", self.substeps as f64)?;
        in_range("friction", self.friction, f64::MIN_POSITIVE, 1.0)?;
        in_range(
            "nerf_speed_multiplier",
            self.nerf_speed_multiplier,
            f64::MIN_POSITIVE,
            1.0,
        )?;
        in_range(
            "boundary_bounce_damping",
            self.boundary_bounce_damping,
            0.0,
            1.0,
        )?;
        in_range("disc_elasticity", self.disc_elasticity, 0.0, 1.0)?;
        in_range("post_elasticity", self.post_elasticity, 0.0, 2.0)?;
        in_range(
            "goal_width",
            self.goal_width,
            0.0,
            std::f64::consts::PI,
        )?;
        in_range(
            "disc_radius",
            self.disc_radius,
            0.0,
            self.arena_radius / 2.0,
        )?;
        // Spawn sampling needs room for a disc plus clearance
        positive(
            "arena_radius - disc_radius - spawn clearance",
            self.arena_radius - self.disc_radius - SPAWN_CLEARANCE,
        )?;
        positive("serve_jitter_min", self.serve_jitter_min)?;
        in_range(
            "serve_jitter_max",
            self.serve_jitter_max,
            self.serve_jitter_min,
            f64::MAX,
        )?;
        Ok(())
    }
}

/// Match clock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub frames_per_sim_minute: u32,
    pub half_length_minutes: u32,
    /// Inclusive stoppage-time range for each half, in sim minutes
    pub first_half_added: (u32, u32),
    pub second_half_added: (u32, u32),
    /// Pause between halves, in ticks
    pub halftime_ticks: u32,
    /// Ticks after fulltime before returning to the menu is allowed
    pub fulltime_lockout_ticks: u32,
    /// Nerf length handed out by a red card, in ticks
    pub red_card_nerf_ticks: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            frames_per_sim_minute: FRAMES_PER_SIM_MINUTE,
            half_length_minutes: 45,
            first_half_added: (2, 4),
            second_half_added: (3, 9),
            // 1.5 seconds
            halftime_ticks: FPS * 3 / 2,
            fulltime_lockout_ticks: FPS * 2,
            red_card_nerf_ticks: 20 * FRAMES_PER_SIM_MINUTE,
        }
    }
}

impl MatchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("frames_per_sim_minute", self.frames_per_sim_minute as f64)?;
        positive("half_length_minutes", self.half_length_minutes as f64)?;
        for (field, (lo, hi)) in [
            ("first_half_added", self.first_half_added),
            ("second_half_added", self.second_half_added),
        ] {
            in_range(field, hi as f64, lo as f64, f64::MAX)?;
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
