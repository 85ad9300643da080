//! Pipe Runner entry point
//!
//! Native: plays a seeded autopilot demo headless and prints a JSON summary.
//! `pipe-runner [settings.json] [--write-settings]` writes the effective
//! settings back to the file before playing.
//! The browser build is driven from JS through `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::Context;
    use serde::Serialize;

    use pipe_runner::audio::{AudioManager, LogSink};
    use pipe_runner::platform::FrameClock;
    use pipe_runner::sim::{GameState, GameStatus, SizeTier, SubLevel, tick};
    use pipe_runner::{Autopilot, Settings};

    /// Display refresh the demo pretends to run at
    const FRAME_SECS: f32 = 1.0 / 60.0;

    const WRITE_SETTINGS_FLAG: &str = "--write-settings";

    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        ticks: u64,
        status: GameStatus,
        sub_level: SubLevel,
        score: u64,
        coins: u32,
        lives: u32,
        tier: SizeTier,
        player_x: f32,
        time_left: f32,
        sounds_played: usize,
        music_notes: usize,
    }

    pub fn run() -> anyhow::Result<()> {
        let (path_arg, write_settings): (Vec<String>, Vec<String>) = std::env::args()
            .skip(1)
            .partition(|arg| arg != WRITE_SETTINGS_FLAG);
        let path = Settings::resolve_path(path_arg.into_iter().next());
        let settings = Settings::load_or_default(&path);
        if !write_settings.is_empty() {
            settings.save(&path)?;
        }
        log::info!(
            "Pipe Runner (native) demo: seed {}, {} s",
            settings.demo_seed,
            settings.demo_seconds
        );

        let mut state = GameState::new();
        let mut clock = FrameClock::from_settings(&settings);
        let mut pilot = Autopilot::new(settings.demo_seed);
        let mut audio = AudioManager::from_settings(&settings, LogSink::default());

        state.start();
        let frames = (settings.demo_seconds / FRAME_SECS).ceil() as u64;
        for _ in 0..frames {
            for _ in 0..clock.accumulate(FRAME_SECS) {
                let controls = pilot.controls(&state);
                tick(&mut state, &controls, clock.dt());
            }
            let events = state.drain_events();
            audio.handle_events(&events);
            audio.update_music(state.status, FRAME_SECS);

            if state.status != GameStatus::Playing {
                break;
            }
        }

        let summary = Summary {
            seed: pilot.seed(),
            ticks: state.time_ticks,
            status: state.status,
            sub_level: state.sub_level,
            score: state.score,
            coins: state.coins,
            lives: state.player.lives,
            tier: state.player.tier,
            player_x: state.player.pos.x,
            time_left: state.time,
            sounds_played: audio.sink().played,
            music_notes: audio.sink().music_notes,
        };
        let json = serde_json::to_string_pretty(&summary).context("serializing run summary")?;
        println!("{json}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}
