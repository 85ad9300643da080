//! Browser binding
//!
//! JS owns the canvas, the keyboard and the Web Audio graph. It pushes the
//! control vector in, calls `frame` from `requestAnimationFrame`, then reads
//! a JSON snapshot to draw and a flat list of square-wave notes to play.

use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, QueueSink};
use crate::autopilot::Autopilot;
use crate::platform::FrameClock;
use crate::settings::Settings;
use crate::sim::{Controls, GameState, tick};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // A logger is already installed (hot reload)
        return;
    }
    log::info!("Pipe Runner starting...");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    clock: FrameClock,
    controls: Controls,
    audio: AudioManager<QueueSink>,
    demo: Option<Autopilot>,
}

#[wasm_bindgen]
impl WebGame {
    /// `settings_json` may be omitted or malformed; defaults are used then
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> WebGame {
        let settings = match settings_json.as_deref().map(Settings::from_json) {
            Some(Ok(settings)) => settings,
            Some(Err(err)) => {
                log::warn!("Bad settings JSON ({}), using defaults", err);
                Settings::default()
            }
            None => Settings::default(),
        };

        WebGame {
            state: GameState::new(),
            clock: FrameClock::from_settings(&settings),
            controls: Controls::default(),
            audio: AudioManager::from_settings(&settings, QueueSink::default()),
            demo: None,
        }
    }

    pub fn set_controls(&mut self, left: bool, right: bool, jump: bool, run: bool, crouch: bool) {
        self.controls = Controls {
            left,
            right,
            jump,
            run,
            crouch,
        };
    }

    /// Attract mode: the autopilot drives instead of the player
    pub fn set_demo(&mut self, seed: Option<u64>) {
        self.demo = seed.map(Autopilot::new);
    }

    /// Advance by real frame time; returns the number of ticks run
    pub fn frame(&mut self, dt: f32) -> u32 {
        let steps = self.clock.accumulate(dt);
        for _ in 0..steps {
            let controls = match self.demo.as_mut() {
                Some(pilot) => pilot.controls(&self.state),
                None => self.controls,
            };
            tick(&mut self.state, &controls, self.clock.dt());
        }
        let events = self.state.drain_events();
        self.audio.handle_events(&events);
        self.audio.update_music(self.state.status, dt);
        steps
    }

    /// Render interpolation between the last two ticks
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }

    pub fn start(&mut self) {
        self.state.start();
    }

    pub fn pause(&mut self) {
        self.state.pause();
    }

    pub fn resume(&mut self) {
        self.state.resume();
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    pub fn restart(&mut self) {
        self.state.restart();
        self.clock.reset();
    }

    pub fn to_menu(&mut self) {
        self.state.to_menu();
        self.clock.reset();
    }

    /// Full game state for the renderer
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Notes raised since the last call, flattened as
    /// `[freq_hz, offset_ms, duration_ms, volume]` per note
    pub fn drain_sounds(&mut self) -> Vec<f32> {
        self.audio
            .sink_mut()
            .drain_voices()
            .into_iter()
            .flat_map(|v| [v.freq_hz, v.offset_ms as f32, v.duration_ms as f32, v.volume])
            .collect()
    }

    /// False once the music stopped; the host should cut ringing notes
    pub fn music_playing(&self) -> bool {
        self.audio.sink().music_playing()
    }

    pub fn effect_volume(&self) -> f32 {
        self.audio.effective_volume()
    }

    pub fn music_gain(&self) -> f32 {
        self.audio.music_gain()
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.audio.toggle_mute()
    }
}
