//! Goal mouth geometry
//!
//! The goal is an angular gap in the arena wall centered on `angle`, with
//! a static post at each edge. Once the first goal of a match goes in the
//! mouth starts drifting around the wall and never stops.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::settings::PhysicsConfig;
use crate::{angular_distance, polar_to_cartesian, wrap_angle};

/// The rotating goal opening
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalMouth {
    /// Center of the opening (radians, wrapped to [0, 2π))
    pub angle: f64,
    /// Half of the opening's angular width
    pub half_width: f64,
    /// Radius of each post
    pub post_radius: f64,
    /// One-way latch: set by the first goal, cleared only by a new match
    pub rotating: bool,
    /// Radians per tick while rotating
    pub rot_speed: f64,
}

impl GoalMouth {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            angle: wrap_angle(config.goal_start_angle),
            half_width: config.goal_half_width(),
            post_radius: config.post_radius,
            rotating: false,
            rot_speed: config.goal_rot_speed,
        }
    }

    /// Check if an angle falls strictly inside the opening (shorter arc)
    #[inline]
    pub fn contains_angle(&self, theta: f64) -> bool {
        angular_distance(theta, self.angle) < self.half_width
    }

    /// Angles of the two posts (start edge, end edge)
    pub fn post_angles(&self) -> (f64, f64) {
        (self.angle - self.half_width, self.angle + self.half_width)
    }

    /// Post centers on the arena wall
    pub fn post_positions(&self, center: DVec2, arena_radius: f64) -> [DVec2; 2] {
        let (start, end) = self.post_angles();
        [
            polar_to_cartesian(center, arena_radius, start),
            polar_to_cartesian(center, arena_radius, end),
        ]
    }

    /// Advance the drift by one tick (no-op until latched)
    pub fn advance(&mut self) {
        if self.rotating {
            self.angle = wrap_angle(self.angle + self.rot_speed);
        }
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = wrap_angle(angle);
    }

    pub fn start_rotating(&mut self) {
        if !self.rotating {
            log::info!("Goal mouth starts rotating at {:.3} rad", self.angle);
        }
        self.rotating = true;
    }
}
