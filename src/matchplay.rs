//! Match flow: menu, two halves with stoppage time, halftime, fulltime
//!
//! The controller owns the pitch and decides when physics runs. Physics
//! only advances during a half and while not paused.

use serde::{Deserialize, Serialize};

use crate::settings::{MatchConfig, PhysicsConfig};
use crate::sim::{DiscId, Event, PitchState, Score};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Team selection; nothing moves
    Menu,
    FirstHalf,
    /// Short pause between halves
    Halftime,
    SecondHalf,
    /// Match over, waiting to return to the menu
    Fulltime,
}

impl MatchPhase {
    pub fn is_half(self) -> bool {
        matches!(self, MatchPhase::FirstHalf | MatchPhase::SecondHalf)
    }
}

/// What went into the match report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Goal,
    RedCard,
}

/// One line of the match report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub side: DiscId,
    pub kind: LogKind,
    /// Display minute, e.g. `37'` or `45+2'`
    pub time_mark: String,
    /// Frame within the half when it happened
    pub frame: u32,
    pub phase: MatchPhase,
}

/// Format a match minute, showing stoppage time past the end of a half
pub fn time_mark(phase: MatchPhase, minute: u32, half_length: u32) -> String {
    let stoppage_from = match phase {
        MatchPhase::FirstHalf | MatchPhase::Halftime => half_length,
        MatchPhase::SecondHalf | MatchPhase::Fulltime => half_length * 2,
        MatchPhase::Menu => return format!("{minute}'"),
    };
    if minute > stoppage_from {
        format!("{stoppage_from}+{}'", minute - stoppage_from)
    } else {
        format!("{minute}'")
    }
}

/// Owns a pitch and runs it through a full match
#[derive(Debug, Clone)]
pub struct MatchController {
    config: MatchConfig,
    pitch: PitchState,
    phase: MatchPhase,
    paused: bool,
    /// Frames elapsed in the current half
    frame_counter: u32,
    /// Stoppage minutes for (first, second) half
    added_time: (u32, u32),
    halftime_timer: u32,
    fulltime_timer: u32,
    log: Vec<LogEntry>,
}

impl MatchController {
    pub fn new(physics: PhysicsConfig, config: MatchConfig, seed: u64) -> Self {
        Self {
            config,
            pitch: PitchState::new(physics, seed),
            phase: MatchPhase::Menu,
            paused: false,
            frame_counter: 0,
            added_time: (0, 0),
            halftime_timer: 0,
            fulltime_timer: 0,
            log: Vec::new(),
        }
    }

    /// Kick off a fresh match from any phase
    pub fn start_match(&mut self) {
        self.pitch.kickoff();
        let (lo1, hi1) = self.config.first_half_added;
        let (lo2, hi2) = self.config.second_half_added;
        self.added_time = (
            self.pitch.random_range_inclusive(lo1, hi1),
            self.pitch.random_range_inclusive(lo2, hi2),
        );
        self.frame_counter = 0;
        self.halftime_timer = 0;
        self.fulltime_timer = 0;
        self.paused = false;
        self.log.clear();
        self.phase = MatchPhase::FirstHalf;
        log::info!(
            "Kick off (added time {}+{} / {}+{})",
            self.config.half_length_minutes,
            self.added_time.0,
            self.config.half_length_minutes * 2,
            self.added_time.1
        );
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }

    /// Advance one frame; returns the physics events raised this frame
    pub fn tick(&mut self) -> Vec<Event> {
        if self.paused {
            return Vec::new();
        }
        match self.phase {
            MatchPhase::Menu => Vec::new(),
            MatchPhase::FirstHalf | MatchPhase::SecondHalf => self.tick_half(),
            MatchPhase::Halftime => {
                self.halftime_timer += 1;
                if self.halftime_timer > self.config.halftime_ticks {
                    self.start_second_half();
                }
                Vec::new()
            }
            MatchPhase::Fulltime => {
                self.fulltime_timer = self.fulltime_timer.saturating_add(1);
                Vec::new()
            }
        }
    }

    fn tick_half(&mut self) -> Vec<Event> {
        self.frame_counter += 1;
        let minute = self.sim_minute();
        let half = self.config.half_length_minutes;

        if self.phase == MatchPhase::FirstHalf && minute >= half + self.added_time.0 {
            log::info!("Halftime {}-{}", self.score().home, self.score().away);
            self.phase = MatchPhase::Halftime;
            self.halftime_timer = 0;
            return Vec::new();
        }
        if self.phase == MatchPhase::SecondHalf && minute >= half * 2 + self.added_time.1 {
            log::info!("Fulltime {}-{}", self.score().home, self.score().away);
            self.phase = MatchPhase::Fulltime;
            self.fulltime_timer = 0;
            return Vec::new();
        }

        let events = self.pitch.step();
        for event in &events {
            if let Event::GoalScored { disc } = *event {
                self.record(disc, LogKind::Goal, minute);
            }
        }
        events
    }

    fn start_second_half(&mut self) {
        self.phase = MatchPhase::SecondHalf;
        self.frame_counter = 0;
        self.pitch.respawn_discs();
        log::info!("Second half under way");
    }

    fn record(&mut self, side: DiscId, kind: LogKind, minute: u32) {
        let entry = LogEntry {
            side,
            kind,
            time_mark: time_mark(self.phase, minute, self.config.half_length_minutes),
            frame: self.frame_counter,
            phase: self.phase,
        };
        log::info!("{:?} {:?} {}", entry.kind, entry.side, entry.time_mark);
        self.log.push(entry);
    }

    /// Red-card side effect: nerf the offending side and note it
    ///
    /// Only valid while a half is being played; returns whether it applied.
    pub fn apply_red_card(&mut self, side: DiscId) -> bool {
        if !self.phase.is_half() {
            return false;
        }
        self.pitch.apply_nerf(side, self.config.red_card_nerf_ticks);
        let minute = self.sim_minute();
        self.record(side, LogKind::RedCard, minute);
        true
    }

    /// Leave fulltime for the menu once the lockout has passed
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase != MatchPhase::Fulltime
            || self.fulltime_timer <= self.config.fulltime_lockout_ticks
        {
            return false;
        }
        let start = self.pitch.config.goal_start_angle;
        self.pitch.set_goal_angle(start);
        self.phase = MatchPhase::Menu;
        true
    }

    /// Match minute shown on the clock
    pub fn sim_minute(&self) -> u32 {
        let played = self.frame_counter / self.config.frames_per_sim_minute;
        match self.phase {
            MatchPhase::Menu => 0,
            MatchPhase::FirstHalf | MatchPhase::Halftime => played,
            MatchPhase::SecondHalf | MatchPhase::Fulltime => {
                self.config.half_length_minutes + played
            }
        }
    }

    /// Clock is into stoppage time for the current half
    pub fn in_added_time(&self) -> bool {
        let half = self.config.half_length_minutes;
        match self.phase {
            MatchPhase::FirstHalf => self.sim_minute() >= half,
            MatchPhase::SecondHalf => self.sim_minute() >= half * 2,
            _ => false,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> Score {
        self.pitch.score
    }

    pub fn added_time(&self) -> (u32, u32) {
        self.added_time
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Report entries for one side
    pub fn entries_for(&self, side: DiscId) -> impl Iterator<Item = &LogEntry> {
        self.log.iter().filter(move |e| e.side == side)
    }

    pub fn pitch(&self) -> &PitchState {
        &self.pitch
    }

    pub fn pitch_mut(&mut self) -> &mut PitchState {
        &mut self.pitch
    }
}
