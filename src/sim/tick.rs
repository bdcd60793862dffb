//! Fixed timestep simulation tick
//!
//! One call per rendered frame. Constants are tuned per tick, so there is
//! deliberately no `dt`: running at a different frame rate changes the feel.

use super::collision::{resolve_pair, resolve_post, resolve_wall};
use super::state::{DiscId, Event, PitchState};

/// Advance the pitch by one tick and report what happened
///
/// Order: goal drift, integrate + posts per disc, then `substeps` passes
/// of wall-then-pair resolution, then the goal test for each disc.
pub fn tick(state: &mut PitchState) -> Vec<Event> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    state.arena.goal.advance();

    let posts = state.arena.post_positions();
    let post_radius = state.arena.goal.post_radius;
    for disc in &mut state.discs {
        disc.integrate(&state.config, &mut state.rng);
        for post in posts {
            if resolve_post(disc, post, post_radius, state.config.post_elasticity) {
                events.push(Event::PostHit { disc: disc.id });
            }
        }
    }

    for _ in 0..state.config.substeps {
        for disc in &mut state.discs {
            if resolve_wall(disc, &state.arena, state.config.boundary_bounce_damping) {
                events.push(Event::WallHit { disc: disc.id });
            }
        }
        let [home, away] = &mut state.discs;
        if resolve_pair(home, away, state.config.disc_elasticity) {
            events.push(Event::PairHit);
        }
    }

    for id in DiscId::ALL {
        if let Some(event) = check_goal(state, id) {
            events.push(event);
        }
    }

    events
}

/// Score for `id` if it has reached the wall inside the goal mouth
///
/// The scorer is recentered and both discs are served again; the first
/// goal of the match latches the goal drift on.
pub fn check_goal(state: &mut PitchState, id: DiscId) -> Option<Event> {
    if !state.arena.is_goal(state.disc(id), state.config.goal_margin) {
        return None;
    }

    state.score.add(id);
    log::info!(
        "GOAL {:?} at tick {} ({}-{})",
        id,
        state.time_ticks,
        state.score.home,
        state.score.away
    );

    let center = state.arena.center;
    state.disc_mut(id).reset_position(center);
    for disc in &mut state.discs {
        disc.serve(&state.config, &mut state.rng);
    }

    if state.score.total() >= 1 {
        state.arena.goal.start_rotating();
    }

    Some(Event::GoalScored { disc: id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PhysicsConfig;
    use glam::DVec2;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    /// Pitch with both discs parked where nothing touches
    fn parked_state() -> PitchState {
        let mut state = PitchState::new(PhysicsConfig::default(), 1234);
        state.discs[0].pos = DVec2::new(-80.0, -60.0);
        state.discs[0].vel = DVec2::new(0.0, -4.0);
        state.discs[1].pos = DVec2::new(80.0, -60.0);
        state.discs[1].vel = DVec2::new(0.0, -4.0);
        state
    }

    #[test]
    fn test_goal_scenario_straight_down() {
        let mut state = parked_state();
        let home = state.disc_mut(DiscId::Home);
        home.pos = DVec2::new(0.0, 250.0 - 38.0 - 1.0);
        home.vel = DVec2::new(0.0, 5.0);

        let events = tick(&mut state);
        assert!(events.contains(&Event::GoalScored { disc: DiscId::Home }));
        assert_eq!(state.score.home, 1);
        assert_eq!(state.score.away, 0);
        assert_eq!(state.disc(DiscId::Home).pos, state.arena.center);
        assert!(state.arena.goal.rotating);
        // Both discs re-served within jitter
        for disc in &state.discs {
            for axis in [disc.vel.x, disc.vel.y] {
                assert!(axis.abs() >= 0.8 * state.config.speed - 1e-12);
                assert!(axis.abs() <= 1.2 * state.config.speed + 1e-12);
            }
        }
        // Only the scorer moves to the center
        assert_ne!(state.disc(DiscId::Away).pos, state.arena.center);
    }

    #[test]
    fn test_away_goal_recenters_only_away() {
        let mut state = parked_state();
        let away_before = DVec2::new(0.0, 211.0);
        let away = state.disc_mut(DiscId::Away);
        away.pos = away_before;
        away.vel = DVec2::new(0.0, 5.0);

        let event = check_goal(&mut state, DiscId::Away);
        assert_eq!(event, Some(Event::GoalScored { disc: DiscId::Away }));
        assert_eq!(state.score.away, 1);
        assert_eq!(state.disc(DiscId::Away).pos, state.arena.center);
        assert_eq!(state.disc(DiscId::Home).pos, DVec2::new(-80.0, -60.0));
    }

    #[test]
    fn test_both_discs_score_same_tick() {
        // Wide mouth so both discs fit inside it without touching the posts
        let mut state = PitchState::new(
            PhysicsConfig {
                gravity: 0.0,
                friction: 1.0,
                goal_width: 1.2,
                ..Default::default()
            },
            77,
        );
        state.discs[0].pos = DVec2::new(-42.0, 205.0);
        state.discs[0].vel = DVec2::new(0.0, 5.0);
        state.discs[1].pos = DVec2::new(42.0, 205.0);
        state.discs[1].vel = DVec2::new(0.0, 5.0);

        let events = tick(&mut state);
        let goals: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::GoalScored { .. }))
            .copied()
            .collect();
        assert_eq!(
            goals,
            vec![
                Event::GoalScored { disc: DiscId::Home },
                Event::GoalScored { disc: DiscId::Away },
            ]
        );
        assert_eq!(state.score, crate::sim::Score { home: 1, away: 1 });
        assert_eq!(state.disc(DiscId::Home).pos, state.arena.center);
        assert_eq!(state.disc(DiscId::Away).pos, state.arena.center);
        assert!(state.arena.goal.rotating);
    }

    #[test]
    fn test_no_goal_away_from_mouth() {
        let mut state = parked_state();
        let home = state.disc_mut(DiscId::Home);
        home.pos = DVec2::new(211.0, 0.0);
        home.vel = DVec2::new(5.0, 0.0);

        let events = tick(&mut state);
        assert!(events.contains(&Event::WallHit { disc: DiscId::Home }));
        assert!(!events.iter().any(|e| matches!(e, Event::GoalScored { .. })));
        assert!(!state.arena.goal.rotating);
        assert_eq!(state.goal_angle(), FRAC_PI_2);
    }

    #[test]
    fn test_goal_rotation_only_after_first_goal() {
        let mut state = parked_state();
        let start = state.goal_angle();
        tick(&mut state);
        assert_eq!(state.goal_angle(), start);

        state.arena.goal.start_rotating();
        tick(&mut state);
        tick(&mut state);
        assert!((state.goal_angle() - (start + 2.0 * state.config.goal_rot_speed)).abs() < 1e-12);
    }

    #[test]
    fn test_head_on_pair_event() {
        let mut state = PitchState::new(
            PhysicsConfig {
                gravity: 0.0,
                friction: 1.0,
                ..Default::default()
            },
            5,
        );
        state.discs[0].pos = DVec2::new(-40.0, 0.0);
        state.discs[0].vel = DVec2::new(5.0, 0.0);
        state.discs[1].pos = DVec2::new(40.0, 0.0);
        state.discs[1].vel = DVec2::new(-5.0, 0.0);

        let events = tick(&mut state);
        assert_eq!(events, vec![Event::PairHit]);
        let separating = state.discs[1].vel.x - state.discs[0].vel.x;
        assert!((separating - 9.6).abs() < 1e-9);
        let gap = (state.discs[1].pos - state.discs[0].pos).length();
        assert!(gap >= 76.0 - 1e-9);
    }

    #[test]
    fn test_post_hit_event() {
        let mut state = parked_state();
        let [left_post, _] = state.post_positions();
        let home = state.disc_mut(DiscId::Home);
        // Just outside the post, heading straight at it
        let dir = (left_post - DVec2::new(-120.0, 150.0)).normalize();
        home.pos = left_post - dir * 50.0;
        home.vel = dir * 6.0;

        let events = tick(&mut state);
        assert!(events.contains(&Event::PostHit { disc: DiscId::Home }));
    }

    #[test]
    fn test_substeps_drive_wall_resolution() {
        let mut state = parked_state();
        state.config.substeps = 0;
        let home = state.disc_mut(DiscId::Home);
        home.pos = DVec2::new(-211.0, 0.0);
        home.vel = DVec2::new(-5.0, 0.0);

        // No passes: the disc is left poking through the wall
        let events = tick(&mut state);
        assert!(events.is_empty());
        assert!(state.disc(DiscId::Home).pos.length() + 38.0 > 250.0);

        state.config.substeps = 3;
        let events = tick(&mut state);
        let walls = events
            .iter()
            .filter(|e| **e == Event::WallHit { disc: DiscId::Home })
            .count();
        assert!((1..=3).contains(&walls));
        assert!(state.disc(DiscId::Home).pos.length() + 38.0 <= 250.0 + 1e-9);
    }

    #[test]
    fn test_determinism() {
        let mut a = PitchState::new(PhysicsConfig::default(), 99999);
        let mut b = PitchState::new(PhysicsConfig::default(), 99999);
        for _ in 0..2000 {
            assert_eq!(tick(&mut a), tick(&mut b));
        }
        assert_eq!(a.discs, b.discs);
        assert_eq!(a.score, b.score);
        assert_eq!(a.goal_angle(), b.goal_angle());
    }

    #[test]
    fn test_long_run_stays_sane() {
        let mut state = PitchState::new(PhysicsConfig::default(), 2024);
        for _ in 0..20_000 {
            tick(&mut state);
            for disc in &state.discs {
                assert!(disc.pos.is_finite());
                assert!(disc.speed() > 0.0);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_speed_floor_after_integrate(
            vx in -12.0f64..12.0,
            vy in -12.0f64..12.0,
            nerf in 0u32..3,
        ) {
            let config = PhysicsConfig::default();
            let mut state = PitchState::new(config.clone(), 7);
            let disc = &mut state.discs[0];
            disc.pos = DVec2::ZERO;
            disc.vel = DVec2::new(vx, vy);
            disc.apply_nerf(nerf);
            disc.integrate(&config, &mut state.rng);
            let floor = config.min_speed * disc.speed_multiplier;
            prop_assert!(disc.speed() >= floor - 1e-9);
        }

        #[test]
        fn prop_wall_containment(
            r in 0.0f64..212.0,
            theta in 0.25f64..(std::f64::consts::PI - 0.25),
            vx in -10.0f64..10.0,
            vy in -10.0f64..10.0,
        ) {
            // One disc anywhere in the lower half, the other parked up top
            let mut state = parked_state();
            state.discs[1].pos = DVec2::new(0.0, -150.0);
            state.discs[0].pos = DVec2::new(r * theta.cos(), r * theta.sin());
            state.discs[0].vel = DVec2::new(vx, vy);
            tick(&mut state);
            for disc in &state.discs {
                let d = (disc.pos - state.arena.center).length();
                prop_assert!(d + disc.radius <= state.arena.radius + 1e-6);
            }
        }

        #[test]
        fn prop_wall_containment_both_near_wall(
            r0 in 140.0f64..212.0,
            r1 in 140.0f64..212.0,
            theta in 0.0f64..std::f64::consts::TAU,
            spread in 0.0f64..std::f64::consts::TAU,
            v in prop::array::uniform4(-10.0f64..10.0),
        ) {
            let mut state = parked_state();
            let a = DVec2::new(r0 * theta.cos(), r0 * theta.sin());
            let b = DVec2::new(r1 * (theta + spread).cos(), r1 * (theta + spread).sin());
            prop_assume!((b - a).length() >= 76.0);
            state.discs[0].pos = a;
            state.discs[0].vel = DVec2::new(v[0], v[1]);
            state.discs[1].pos = b;
            state.discs[1].vel = DVec2::new(v[2], v[3]);
            tick(&mut state);
            // A disc wedged between the wall and the other disc keeps a
            // residual from the last pair pass; it stays well under this.
            const PAIR_WALL_SLACK: f64 = 0.05;
            for disc in &state.discs {
                let d = (disc.pos - state.arena.center).length();
                prop_assert!(d + disc.radius <= state.arena.radius + PAIR_WALL_SLACK);
            }
        }

        #[test]
        fn prop_pair_non_overlap(
            ax in -60.0f64..60.0,
            ay in -60.0f64..60.0,
            bx in -60.0f64..60.0,
            by in -60.0f64..60.0,
            vx in -8.0f64..8.0,
            vy in -8.0f64..8.0,
        ) {
            let mut state = parked_state();
            state.discs[0].pos = DVec2::new(ax, ay);
            state.discs[0].vel = DVec2::new(vx, vy);
            state.discs[1].pos = DVec2::new(bx, by);
            state.discs[1].vel = DVec2::new(-vx, -vy);
            tick(&mut state);
            let gap = (state.discs[1].pos - state.discs[0].pos).length();
            prop_assert!(gap >= 76.0 - 1e-6);
        }
    }
}
