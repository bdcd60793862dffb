//! Arena Football headless runner
//!
//! Plays one seeded match to fulltime and logs the report.
//!
//! Usage: `arena-football [physics.json] [seed]`

use std::process::ExitCode;

use arena_football::audio::{AudioDirector, AudioSink, Cue};
use arena_football::sim::DiscId;
use arena_football::{MatchConfig, MatchController, MatchPhase, PhysicsConfig};

/// Counts cues instead of playing them
#[derive(Default)]
struct CueCounter {
    collisions: u32,
    goals: u32,
}

impl AudioSink for CueCounter {
    fn play(&mut self, cue: Cue) {
        use arena_football::audio::SoundEffect;
        match cue.effect {
            SoundEffect::Collision => self.collisions += 1,
            SoundEffect::GoalMusic { .. } => self.goals += 1,
            _ => {}
        }
    }
}

fn load_physics(path: Option<&str>) -> Result<PhysicsConfig, String> {
    let Some(path) = path else {
        return Ok(PhysicsConfig::default());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    PhysicsConfig::from_json(&json).map_err(|e| format!("{path}: {e}"))
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let physics = match load_physics(args.first().map(String::as_str)) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load physics config: {e}");
            return ExitCode::FAILURE;
        }
    };
    let seed = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED_F00D_u64);

    log::info!("Arena Football (headless) starting with seed {seed}");

    let mut game = MatchController::new(physics, MatchConfig::default(), seed);
    let audio = AudioDirector::new();
    let mut sink = CueCounter::default();

    game.start_match();
    while game.phase() != MatchPhase::Fulltime {
        let events = game.tick();
        audio.dispatch(&events, &mut sink);
    }

    let score = game.score();
    log::info!("Fulltime: {} - {}", score.home, score.away);
    for side in DiscId::ALL {
        log::info!("{:?}: {}", side, score.get(side));
        for entry in game.entries_for(side) {
            log::info!("  {:?} {}", entry.kind, entry.time_mark);
        }
    }
    log::info!(
        "{} ticks, {} collision cues, {} goal cues",
        game.pitch().time_ticks,
        sink.collisions,
        sink.goals
    );

    println!("{} - {}", score.home, score.away);
    ExitCode::SUCCESS
}
