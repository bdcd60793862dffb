//! Pitch state and core simulation types
//!
//! Exactly two discs are live at a time, one per side. The pitch state owns
//! them, the arena, the score, and the seeded RNG used for every random draw.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::goal::GoalMouth;
use crate::cartesian_to_polar;
use crate::consts::{SPAWN_ATTEMPTS, SPAWN_CLEARANCE};
use crate::settings::PhysicsConfig;

/// Which side a disc plays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscId {
    Home,
    Away,
}

impl DiscId {
    pub const ALL: [DiscId; 2] = [DiscId::Home, DiscId::Away];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            DiscId::Home => 0,
            DiscId::Away => 1,
        }
    }
}

/// Something the presentation layer may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Disc touched the arena wall
    WallHit { disc: DiscId },
    /// Discs collided with an impulse exchange
    PairHit,
    /// Disc bounced off a goal post
    PostHit { disc: DiscId },
    /// Disc went through the goal mouth
    GoalScored { disc: DiscId },
}

/// A side's disc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disc {
    pub id: DiscId,
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    pub mass: f64,
    /// Ticks of nerf remaining (decremented once per integrate)
    pub nerf_ticks: u32,
    /// Multiplier applied to the speed floor this tick
    pub speed_multiplier: f64,
}

impl Disc {
    /// Panics on a non-positive radius or mass: those are caller bugs
    pub fn new(id: DiscId, pos: DVec2, vel: DVec2, radius: f64, mass: f64) -> Self {
        assert!(radius > 0.0, "disc radius must be positive, got {radius}");
        assert!(mass > 0.0, "disc mass must be positive, got {mass}");
        Self {
            id,
            pos,
            vel,
            radius,
            mass,
            nerf_ticks: 0,
            speed_multiplier: 1.0,
        }
    }

    /// Create a disc at `pos` moving diagonally at `speed` per axis
    pub fn spawn<R: Rng + ?Sized>(
        id: DiscId,
        pos: DVec2,
        config: &PhysicsConfig,
        rng: &mut R,
    ) -> Self {
        let vel = random_diagonal(rng) * config.speed;
        Self::new(id, pos, vel, config.disc_radius, config.disc_mass)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }

    #[inline]
    pub fn is_nerfed(&self) -> bool {
        self.nerf_ticks > 0
    }

    /// Advance one tick: gravity, friction, speed floor, then move
    ///
    /// Not energy conserving: the floor keeps the disc from ever stalling.
    pub fn integrate<R: Rng + ?Sized>(&mut self, config: &PhysicsConfig, rng: &mut R) {
        self.vel.y += config.gravity;

        if self.nerf_ticks > 0 {
            self.nerf_ticks -= 1;
            self.speed_multiplier = config.nerf_speed_multiplier;
        } else {
            self.speed_multiplier = 1.0;
        }

        self.vel *= config.friction;

        let target_min = config.min_speed * self.speed_multiplier;
        let speed = self.vel.length();
        if speed > 0.0 && speed < target_min {
            self.vel *= target_min / speed;
        } else if speed == 0.0 {
            log::warn!("{:?} disc stalled at {:?}, re-seeding velocity", self.id, self.pos);
            self.vel = random_diagonal(rng).normalize() * target_min;
        }

        self.pos += self.vel;
    }

    /// Slow the disc's speed floor for `ticks` ticks
    pub fn apply_nerf(&mut self, ticks: u32) {
        self.nerf_ticks = ticks;
    }

    pub fn reset_position(&mut self, pos: DVec2) {
        self.pos = pos;
    }

    /// Fresh diagonal velocity with per-axis jitter, used after a goal
    pub fn serve<R: Rng + ?Sized>(&mut self, config: &PhysicsConfig, rng: &mut R) {
        let dir = random_diagonal(rng);
        let jitter = DVec2::new(
            rng.random_range(config.serve_jitter_min..=config.serve_jitter_max),
            rng.random_range(config.serve_jitter_min..=config.serve_jitter_max),
        );
        self.vel = dir * jitter * config.speed;
    }
}

/// (±1, ±1) with independent signs
fn random_diagonal<R: Rng + ?Sized>(rng: &mut R) -> DVec2 {
    let sign = |flip: bool| if flip { -1.0 } else { 1.0 };
    DVec2::new(sign(rng.random_bool(0.5)), sign(rng.random_bool(0.5)))
}

/// The circular playing field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub center: DVec2,
    pub radius: f64,
    pub goal: GoalMouth,
}

impl Arena {
    pub fn new(center: DVec2, config: &PhysicsConfig) -> Self {
        Self {
            center,
            radius: config.arena_radius,
            goal: GoalMouth::new(config),
        }
    }

    pub fn post_positions(&self) -> [DVec2; 2] {
        self.goal.post_positions(self.center, self.radius)
    }

    /// Check if the disc has reached the wall inside the goal mouth
    pub fn is_goal(&self, disc: &Disc, margin: f64) -> bool {
        let (dist, theta) = cartesian_to_polar(self.center, disc.pos);
        if dist <= self.radius - disc.radius - margin {
            return false;
        }
        self.goal.contains_angle(theta)
    }

    /// Rejection-sample a spawn point in the upper-middle of the pitch
    ///
    /// Falls back to the center when no draw fits, which only happens for
    /// arenas too small to hold a disc plus the spawn clearance.
    pub fn random_spawn<R: Rng + ?Sized>(&self, disc_radius: f64, rng: &mut R) -> DVec2 {
        let limit = self.radius - disc_radius - SPAWN_CLEARANCE;
        for _ in 0..SPAWN_ATTEMPTS {
            let offset = DVec2::new(
                rng.random_range(-150..=150) as f64,
                rng.random_range(-200..=50) as f64,
            );
            if offset.length() < limit {
                return self.center + offset;
            }
        }
        log::warn!(
            "No spawn point fits (radius {}, disc {}), using center",
            self.radius,
            disc_radius
        );
        self.center
    }
}

/// Running score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn add(&mut self, side: DiscId) {
        match side {
            DiscId::Home => self.home += 1,
            DiscId::Away => self.away += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.home + self.away
    }

    pub fn get(&self, side: DiscId) -> u32 {
        match side {
            DiscId::Home => self.home,
            DiscId::Away => self.away,
        }
    }
}

/// Everything the step mutates
#[derive(Debug, Clone)]
pub struct PitchState {
    pub config: PhysicsConfig,
    /// Indexed by `DiscId::index`
    pub discs: [Disc; 2],
    pub arena: Arena,
    pub score: Score,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl PitchState {
    /// Arena centered on the origin, discs at random spawn points
    pub fn new(config: PhysicsConfig, seed: u64) -> Self {
        Self::with_center(config, DVec2::ZERO, seed)
    }

    pub fn with_center(config: PhysicsConfig, center: DVec2, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let arena = Arena::new(center, &config);
        let discs = DiscId::ALL.map(|id| {
            let pos = arena.random_spawn(config.disc_radius, &mut rng);
            Disc::spawn(id, pos, &config, &mut rng)
        });
        Self {
            config,
            discs,
            arena,
            score: Score::default(),
            time_ticks: 0,
            rng,
        }
    }

    /// Run one fixed-timestep tick
    pub fn step(&mut self) -> Vec<Event> {
        super::tick::tick(self)
    }

    #[inline]
    pub fn disc(&self, id: DiscId) -> &Disc {
        &self.discs[id.index()]
    }

    #[inline]
    pub fn disc_mut(&mut self, id: DiscId) -> &mut Disc {
        &mut self.discs[id.index()]
    }

    pub fn reset_disc_position(&mut self, id: DiscId, pos: DVec2) {
        self.disc_mut(id).reset_position(pos);
    }

    pub fn apply_nerf(&mut self, id: DiscId, ticks: u32) {
        log::info!("{id:?} disc nerfed for {ticks} ticks");
        self.disc_mut(id).apply_nerf(ticks);
    }

    pub fn set_goal_angle(&mut self, angle: f64) {
        self.arena.goal.set_angle(angle);
    }

    pub fn goal_angle(&self) -> f64 {
        self.arena.goal.angle
    }

    pub fn post_positions(&self) -> [DVec2; 2] {
        self.arena.post_positions()
    }

    /// Move both discs to fresh spawn points, keeping their velocities
    pub fn respawn_discs(&mut self) {
        for disc in &mut self.discs {
            disc.pos = self.arena.random_spawn(disc.radius, &mut self.rng);
        }
    }

    /// New match: zero score, stop the goal drift, fresh spawns and launch
    pub fn kickoff(&mut self) {
        self.score = Score::default();
        self.time_ticks = 0;
        self.arena.goal = GoalMouth::new(&self.config);
        for id in DiscId::ALL {
            let pos = self.arena.random_spawn(self.config.disc_radius, &mut self.rng);
            self.discs[id.index()] = Disc::spawn(id, pos, &self.config, &mut self.rng);
        }
    }

    /// Draw from the pitch RNG (match-level randomness shares the seed)
    pub fn random_range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        self.rng.random_range(lo..=hi)
    }
}
