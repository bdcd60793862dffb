//! Fixed-timestep disc simulation
//!
//! All physics lives here. This module must stay free of presentation:
//! - Fixed timestep only (no elapsed-time scaling)
//! - Seeded RNG only
//! - Emits events; never plays sounds or draws

pub mod collision;
pub mod goal;
pub mod state;
pub mod tick;

pub use collision::{Contact, reflect_velocity, resolve_pair, resolve_post, resolve_wall};
pub use goal::GoalMouth;
pub use state::{Arena, Disc, DiscId, Event, PitchState, Score};
pub use tick::{check_goal, tick};
