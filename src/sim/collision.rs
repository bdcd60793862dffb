//! Collision detection and response for discs
//!
//! Three contact kinds: disc vs arena wall (from the inside), disc vs disc,
//! and disc vs goal post. Each resolver corrects position so nothing stays
//! interpenetrating, and returns whether the contact should be audible.

use glam::DVec2;

use super::state::{Arena, Disc};
use crate::consts::DEGENERATE_DISTANCE;

/// A detected overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal; meaning depends on the contact kind
    pub normal: DVec2,
    /// Overlap depth (>= 0)
    pub penetration: f64,
}

/// Unit vector along `delta`, falling back to +x for coincident centers
fn contact_normal(delta: DVec2) -> (DVec2, f64) {
    let dist = delta.length();
    if dist == 0.0 {
        log::warn!("coincident centers, using fallback normal");
        (DVec2::X, DEGENERATE_DISTANCE)
    } else {
        (delta / dist, dist)
    }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check a disc against the arena wall
///
/// Normal points outward from the arena center toward the disc.
pub fn disc_wall_contact(disc: &Disc, arena: &Arena) -> Option<Contact> {
    let delta = disc.pos - arena.center;
    let dist = delta.length();
    if dist + disc.radius < arena.radius {
        return None;
    }
    let (normal, dist) = contact_normal(delta);
    Some(Contact {
        normal,
        penetration: dist + disc.radius - arena.radius,
    })
}

/// Check two discs against each other
///
/// Normal points from `a` to `b`.
pub fn disc_disc_contact(a: &Disc, b: &Disc) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let reach = a.radius + b.radius;
    if delta.length() >= reach {
        return None;
    }
    let (normal, dist) = contact_normal(delta);
    Some(Contact {
        normal,
        penetration: reach - dist,
    })
}

/// Check a disc against a static post
///
/// Normal points from the post to the disc.
pub fn disc_post_contact(disc: &Disc, post: DVec2, post_radius: f64) -> Option<Contact> {
    let delta = disc.pos - post;
    let reach = disc.radius + post_radius;
    if delta.length() >= reach {
        return None;
    }
    let (normal, dist) = contact_normal(delta);
    Some(Contact {
        normal,
        penetration: reach - dist,
    })
}

/// Keep a disc inside the arena
///
/// Reflects (and damps) only when the disc is moving outward, so a disc
/// already heading back in is not flipped again on a later substep. Any
/// touch counts as a hit.
pub fn resolve_wall(disc: &mut Disc, arena: &Arena, damping: f64) -> bool {
    let Some(contact) = disc_wall_contact(disc, arena) else {
        return false;
    };
    if disc.vel.dot(contact.normal) > 0.0 {
        disc.vel = reflect_velocity(disc.vel, contact.normal) * damping;
    }
    disc.pos -= contact.normal * contact.penetration;
    true
}

/// Resolve overlap and exchange impulse between two discs
///
/// Overlap is split inversely to mass. Returns true only if an impulse was
/// applied; discs already separating are pushed apart silently.
pub fn resolve_pair(a: &mut Disc, b: &mut Disc, elasticity: f64) -> bool {
    let Some(contact) = disc_disc_contact(a, b) else {
        return false;
    };
    let n = contact.normal;

    let total_mass = a.mass + b.mass;
    a.pos -= n * contact.penetration * (b.mass / total_mass);
    b.pos += n * contact.penetration * (a.mass / total_mass);

    let vel_along_normal = (b.vel - a.vel).dot(n);
    if vel_along_normal > 0.0 {
        return false;
    }

    let j = -(1.0 + elasticity) * vel_along_normal / (1.0 / a.mass + 1.0 / b.mass);
    let impulse = n * j;
    a.vel -= impulse / a.mass;
    b.vel += impulse / b.mass;
    log::debug!("pair impulse {j:.3}");
    true
}

/// Bounce a disc off a static post
///
/// Reflection is scaled by `elasticity`, which may exceed 1.0 to kick the
/// disc away harder than it arrived. Only an approaching disc reflects.
pub fn resolve_post(disc: &mut Disc, post: DVec2, post_radius: f64, elasticity: f64) -> bool {
    let Some(contact) = disc_post_contact(disc, post, post_radius) else {
        return false;
    };
    let approaching = disc.vel.dot(contact.normal) < 0.0;
    if approaching {
        disc.vel = reflect_velocity(disc.vel, contact.normal) * elasticity;
    }
    disc.pos += contact.normal * contact.penetration;
    approaching
}
