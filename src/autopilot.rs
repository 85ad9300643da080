//! Demo driver that plays the game
//!
//! Produces the same control sequence for the same seed and game, so a
//! headless run is reproducible. It walks right, hops over walls and
//! enemies, and sometimes crouches on pipes to visit the underground.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::pipe::find_enterable_pipe;
use crate::sim::{Controls, GameState, Rect, overlaps};

/// How far ahead walls trigger a jump
const WALL_LOOKAHEAD: f32 = 40.0;
/// How far ahead enemies trigger a jump
const ENEMY_LOOKAHEAD: f32 = 60.0;
/// Ticks spent crouching once a pipe is chosen
const CROUCH_TICKS: u32 = 8;

/// Seeded autopilot
pub struct Autopilot {
    seed: u64,
    rng: Pcg32,
    crouch_ticks: u32,
    running: bool,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            crouch_ticks: 0,
            running: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Controls for the next tick
    pub fn controls(&mut self, state: &GameState) -> Controls {
        let player = &state.player;

        if self.crouch_ticks > 0 {
            self.crouch_ticks -= 1;
            return Controls {
                crouch: true,
                ..Default::default()
            };
        }

        if player.on_ground
            && !state.transition.is_active()
            && find_enterable_pipe(player, &state.blocks).is_some()
            && self.rng.random_bool(0.5)
        {
            log::debug!("Autopilot taking the pipe at x={:.0}", player.pos.x);
            self.crouch_ticks = CROUCH_TICKS;
            return Controls {
                crouch: true,
                ..Default::default()
            };
        }

        // Switch gait now and then
        if self.rng.random_range(0..60) == 0 {
            self.running = !self.running;
        }

        let body = player.bounds();
        let jump = wall_ahead(&body, state)
            || enemy_ahead(&body, state)
            || self.rng.random_bool(0.02);

        Controls {
            right: true,
            run: self.running,
            jump,
            ..Default::default()
        }
    }
}

fn wall_ahead(body: &Rect, state: &GameState) -> bool {
    let probe = Rect::new(body.right(), body.top(), WALL_LOOKAHEAD, body.size.y - 1.0);
    state
        .blocks
        .iter()
        .filter(|b| b.is_solid())
        .any(|b| overlaps(&probe, &b.bounds()))
}

fn enemy_ahead(body: &Rect, state: &GameState) -> bool {
    state.enemies.iter().filter(|e| e.is_live()).any(|e| {
        let dx = e.pos.x - body.right();
        (0.0..ENEMY_LOOKAHEAD).contains(&dx)
    })
}
