//! Audio cue selection
//!
//! The simulation only reports events. This module decides which sound each
//! event deserves and how loud, then hands cues to whatever backend is
//! plugged in through `AudioSink`.

use serde::{Deserialize, Serialize};

use crate::sim::{DiscId, Event};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Any wall, post or disc-disc knock
    Collision,
    /// Scoring side's goal anthem (restarts if already playing)
    GoalMusic { side: DiscId },
    /// Red card whistle
    RedCardWhistle,
    /// Looping crowd bed
    StadiumAmbience,
}

impl SoundEffect {
    /// Base mix level before master/channel volume
    pub fn base_volume(self) -> f32 {
        match self {
            SoundEffect::Collision => 0.02,
            SoundEffect::GoalMusic { .. } => 0.6,
            SoundEffect::RedCardWhistle => 0.4,
            SoundEffect::StadiumAmbience => 0.4,
        }
    }

    /// Music channel vs effects channel
    pub fn is_music(self) -> bool {
        matches!(
            self,
            SoundEffect::GoalMusic { .. } | SoundEffect::StadiumAmbience
        )
    }
}

/// A sound to start now
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub effect: SoundEffect,
    pub volume: f32,
    /// Stop any earlier instance of the same effect first
    pub restart: bool,
}

/// Playback backend
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Turns simulation events into cues
#[derive(Debug, Clone)]
pub struct AudioDirector {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDirector {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Final volume for an effect (0 when muted)
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        let channel = if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        effect.base_volume() * self.master_volume * channel
    }

    fn cue(&self, effect: SoundEffect) -> Option<Cue> {
        let volume = self.effective_volume(effect);
        (volume > 0.0).then_some(Cue {
            effect,
            volume,
            restart: matches!(effect, SoundEffect::GoalMusic { .. }),
        })
    }

    /// Cues for one tick's events
    ///
    /// Sub-stepping can report the same contact several times per tick, so
    /// all knocks in a tick collapse into a single collision cue.
    pub fn cues_for(&self, events: &[Event]) -> Vec<Cue> {
        let mut cues = Vec::new();
        let knocked = events.iter().any(|e| {
            matches!(
                e,
                Event::WallHit { .. } | Event::PairHit | Event::PostHit { .. }
            )
        });
        if knocked {
            cues.extend(self.cue(SoundEffect::Collision));
        }
        for event in events {
            if let Event::GoalScored { disc } = *event {
                cues.extend(self.cue(SoundEffect::GoalMusic { side: disc }));
            }
        }
        cues
    }

    pub fn red_card_cue(&self) -> Option<Cue> {
        self.cue(SoundEffect::RedCardWhistle)
    }

    pub fn ambience_cue(&self) -> Option<Cue> {
        self.cue(SoundEffect::StadiumAmbience)
    }

    /// Select and play everything for one tick
    pub fn dispatch(&self, events: &[Event], sink: &mut impl AudioSink) {
        for cue in self.cues_for(events) {
            sink.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<Cue>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: Cue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn test_knocks_collapse_to_one_cue() {
        let director = AudioDirector::new();
        let events = [
            Event::WallHit { disc: DiscId::Home },
            Event::WallHit { disc: DiscId::Home },
            Event::PairHit,
            Event::PostHit { disc: DiscId::Away },
        ];
        let cues = director.cues_for(&events);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].effect, SoundEffect::Collision);
        assert!((cues[0].volume - 0.02 * 0.8).abs() < 1e-6);
        assert!(!cues[0].restart);
    }

    #[test]
    fn test_goal_music_per_scorer() {
        let director = AudioDirector::new();
        let events = [
            Event::GoalScored { disc: DiscId::Away },
            Event::GoalScored { disc: DiscId::Home },
        ];
        let cues = director.cues_for(&events);
        assert_eq!(
            cues.iter().map(|c| c.effect).collect::<Vec<_>>(),
            vec![
                SoundEffect::GoalMusic { side: DiscId::Away },
                SoundEffect::GoalMusic { side: DiscId::Home },
            ]
        );
        assert!(cues.iter().all(|c| c.restart));
        assert!((cues[0].volume - 0.6 * 0.8 * 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_quiet_tick_plays_nothing() {
        assert!(AudioDirector::new().cues_for(&[]).is_empty());
    }

    #[test]
    fn test_mute_suppresses_everything() {
        let mut director = AudioDirector::new();
        director.set_muted(true);
        let mut sink = Recorder::default();
        director.dispatch(
            &[Event::PairHit, Event::GoalScored { disc: DiscId::Home }],
            &mut sink,
        );
        assert!(sink.0.is_empty());
        assert!(director.red_card_cue().is_none());
        assert!(director.ambience_cue().is_none());
    }

    #[test]
    fn test_volume_clamped() {
        let mut director = AudioDirector::new();
        director.set_master_volume(3.0);
        director.set_sfx_volume(-1.0);
        assert_eq!(director.effective_volume(SoundEffect::Collision), 0.0);
        director.set_sfx_volume(1.0);
        assert!((director.effective_volume(SoundEffect::RedCardWhistle) - 0.4).abs() < 1e-6);
    }
}
