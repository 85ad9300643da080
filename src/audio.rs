//! Sound effect routing
//!
//! The simulation only raises [`GameEvent`]s. This module maps them to
//! procedural 8-bit sound recipes and hands them, with the player's volume
//! and mute preferences applied, to whatever backend the host provides.
//! The background melody is stepped here too, so the host only needs a
//! square-wave oscillator.

use crate::platform::MAX_FRAME_SECS;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameStatus};

/// One square-wave note of a sound recipe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub freq_hz: f32,
    /// Delay from the start of the effect
    pub offset_ms: u32,
    pub duration_ms: u32,
}

const fn note(freq_hz: f32, offset_ms: u32, duration_ms: u32) -> Note {
    Note {
        freq_hz,
        offset_ms,
        duration_ms,
    }
}

mod recipes {
    use super::{Note, note};

    // C5
    pub const JUMP: &[Note] = &[note(523.0, 0, 100)];
    // G5
    pub const COIN: &[Note] = &[note(784.0, 0, 150)];
    // C-E-G-C arpeggio
    pub const POWER_UP: &[Note] = &[
        note(523.0, 0, 100),
        note(659.0, 100, 100),
        note(784.0, 200, 100),
        note(1047.0, 300, 200),
    ];
    // Low G
    pub const ENEMY_DEFEAT: &[Note] = &[note(196.0, 0, 200)];
    // Descending C-A-F-C
    pub const PIPE: &[Note] = &[
        note(523.0, 0, 150),
        note(440.0, 150, 150),
        note(349.0, 300, 150),
        note(262.0, 450, 200),
    ];
    pub const BLOCK_BUMP: &[Note] = &[note(262.0, 0, 80)];
    pub const BRICK_BREAK: &[Note] = &[note(110.0, 0, 60), note(82.0, 60, 120)];
    pub const PLAYER_HURT: &[Note] = &[note(392.0, 0, 100), note(262.0, 100, 150)];
    pub const LIFE_LOST: &[Note] = &[
        note(494.0, 0, 150),
        note(349.0, 150, 150),
        note(262.0, 300, 300),
    ];
    pub const GAME_OVER: &[Note] = &[
        note(392.0, 0, 300),
        note(330.0, 300, 300),
        note(262.0, 600, 600),
    ];
    pub const VICTORY: &[Note] = &[
        note(523.0, 0, 150),
        note(659.0, 150, 150),
        note(784.0, 300, 150),
        note(1047.0, 450, 150),
        note(1319.0, 600, 400),
    ];
}

/// Background loop, one entry per step; 0 is a rest
pub const MELODY: &[f32] = &[
    659.0, 659.0, 0.0, 659.0, 0.0, 523.0, 659.0, 0.0, 784.0, 0.0, 0.0, 0.0, 392.0, 0.0, 0.0, 0.0,
    523.0, 0.0, 0.0, 392.0, 0.0, 0.0, 330.0, 0.0, 0.0, 440.0, 0.0, 494.0, 0.0, 466.0, 0.0, 440.0,
    0.0, 392.0, 659.0, 784.0, 880.0, 0.0, 698.0, 784.0, 0.0, 659.0, 0.0, 523.0, 587.0, 494.0,
    0.0, 523.0, 0.0, 0.0, 392.0, 0.0, 0.0, 330.0, 0.0, 0.0, 440.0, 0.0, 494.0, 0.0, 466.0, 0.0,
    440.0,
];

/// Length of one melody step; each note rings for the whole step
pub const MUSIC_STEP_MS: u32 = 300;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player left the ground
    Jump,
    /// Coin collected
    Coin,
    /// Mushroom or fire flower collected
    PowerUp,
    /// Enemy stomped
    EnemyDefeat,
    /// Pipe entered
    Pipe,
    /// Question block used
    BlockBump,
    /// Brick destroyed
    BrickBreak,
    /// Dropped a tier
    PlayerHurt,
    LifeLost,
    GameOver,
    Victory,
}

impl SoundEffect {
    pub fn from_event(event: GameEvent) -> Self {
        match event {
            GameEvent::Jump => SoundEffect::Jump,
            GameEvent::Coin => SoundEffect::Coin,
            GameEvent::PowerUp => SoundEffect::PowerUp,
            GameEvent::EnemyDefeat => SoundEffect::EnemyDefeat,
            GameEvent::Pipe => SoundEffect::Pipe,
            GameEvent::BlockBump => SoundEffect::BlockBump,
            GameEvent::BrickBreak => SoundEffect::BrickBreak,
            GameEvent::PlayerHurt => SoundEffect::PlayerHurt,
            GameEvent::LifeLost => SoundEffect::LifeLost,
            GameEvent::GameOver => SoundEffect::GameOver,
            GameEvent::Victory => SoundEffect::Victory,
        }
    }

    /// Square-wave notes that make up this effect
    pub fn notes(self) -> &'static [Note] {
        match self {
            SoundEffect::Jump => recipes::JUMP,
            SoundEffect::Coin => recipes::COIN,
            SoundEffect::PowerUp => recipes::POWER_UP,
            SoundEffect::EnemyDefeat => recipes::ENEMY_DEFEAT,
            SoundEffect::Pipe => recipes::PIPE,
            SoundEffect::BlockBump => recipes::BLOCK_BUMP,
            SoundEffect::BrickBreak => recipes::BRICK_BREAK,
            SoundEffect::PlayerHurt => recipes::PLAYER_HURT,
            SoundEffect::LifeLost => recipes::LIFE_LOST,
            SoundEffect::GameOver => recipes::GAME_OVER,
            SoundEffect::Victory => recipes::VICTORY,
        }
    }

    /// Total length including the last note's tail
    pub fn duration_ms(self) -> u32 {
        self.notes()
            .iter()
            .map(|n| n.offset_ms + n.duration_ms)
            .max()
            .unwrap_or(0)
    }
}

/// Audio backend provided by the host
pub trait AudioSink {
    /// Start `effect` at `volume` (0.0 - 1.0); must not block
    fn play(&mut self, effect: SoundEffect, volume: f32);

    /// Start one background music note
    fn play_note(&mut self, note: Note, volume: f32);

    /// Background music started or stopped
    fn music_changed(&mut self, _playing: bool) {}
}

/// Backend for headless runs: logs what would be heard
#[derive(Debug, Default)]
pub struct LogSink {
    pub played: usize,
    pub music_notes: usize,
}

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.played += 1;
        log::debug!(
            "sfx {:?} at {:.2} ({} ms)",
            effect,
            volume,
            effect.duration_ms()
        );
    }

    fn play_note(&mut self, note: Note, volume: f32) {
        self.music_notes += 1;
        log::trace!("music {:.0} Hz at {:.2}", note.freq_hz, volume);
    }

    fn music_changed(&mut self, playing: bool) {
        log::debug!("music {}", if playing { "on" } else { "off" });
    }
}

/// A note scheduled for the host's oscillator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub freq_hz: f32,
    /// Delay from when the host collects it
    pub offset_ms: u32,
    pub duration_ms: u32,
    pub volume: f32,
}

/// Backend that buffers expanded notes for a host to collect later
#[derive(Debug, Default)]
pub struct QueueSink {
    voices: Vec<Voice>,
    music_playing: bool,
}

impl QueueSink {
    /// Take the buffered notes in the order they were raised
    pub fn drain_voices(&mut self) -> Vec<Voice> {
        std::mem::take(&mut self.voices)
    }

    /// Whether the host should let music notes ring
    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    fn push(&mut self, note: Note, volume: f32) {
        self.voices.push(Voice {
            freq_hz: note.freq_hz,
            offset_ms: note.offset_ms,
            duration_ms: note.duration_ms,
            volume,
        });
    }
}

impl AudioSink for QueueSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        for &note in effect.notes() {
            self.push(note, volume);
        }
    }

    fn play_note(&mut self, note: Note, volume: f32) {
        self.push(note, volume);
    }

    fn music_changed(&mut self, playing: bool) {
        self.music_playing = playing;
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
    /// Next melody index
    music_step: usize,
    /// Time into the current step
    music_clock_ms: f32,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            music_playing: false,
            music_step: 0,
            music_clock_ms: 0.0,
        }
    }

    /// Apply the player's audio preferences
    pub fn from_settings(settings: &Settings, sink: S) -> Self {
        let mut manager = Self::new(sink);
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_music_volume(settings.music_volume);
        manager.set_muted(settings.muted);
        manager
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

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective effect volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective volume for background music notes
    pub fn music_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the effect for every event, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for &event in events {
            self.play(SoundEffect::from_event(event));
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Step the background melody by `dt` seconds of real time
    ///
    /// Music runs only while the game is playing and unmuted. Every start
    /// begins the melody from its first step.
    pub fn update_music(&mut self, status: GameStatus, dt: f32) {
        let wanted = status == GameStatus::Playing && !self.muted;
        if wanted != self.music_playing {
            self.music_playing = wanted;
            self.music_step = 0;
            self.music_clock_ms = 0.0;
            self.sink.music_changed(wanted);
        }
        if !self.music_playing {
            return;
        }

        self.music_clock_ms += dt.clamp(0.0, MAX_FRAME_SECS) * 1000.0;
        let step_ms = MUSIC_STEP_MS as f32;
        while self.music_clock_ms >= step_ms {
            self.music_clock_ms -= step_ms;
            let freq_hz = MELODY[self.music_step];
            self.music_step = (self.music_step + 1) % MELODY.len();

            let gain = self.music_gain();
            if freq_hz > 0.0 && gain > 0.0 {
                self.sink.play_note(note(freq_hz, 0, MUSIC_STEP_MS), gain);
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
