//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically, plus the
//! lifecycle transitions the host drives between ticks.

use super::block::resolve_block_hits;
use super::enemy::{resolve_enemy_contacts, step_enemy};
use super::pipe::{advance_transition, check_pipe_entry};
use super::player::step_player;
use super::powerup::{collect_power_ups, step_power_ups};
use super::state::{Controls, GameEvent, GameState, GameStatus};
use crate::consts::*;

/// Advance the game state by one fixed timestep
///
/// Does nothing unless the game is playing. Order within a tick:
/// 1. Timers (invulnerability, pending pipe swap)
/// 2. Physics: player, then each enemy, then power-ups
/// 3. Pipe entry check
/// 4. Contacts: enemies, then power-ups, then blocks
/// 5. Camera, goal line, countdown clock
///
/// A negative `dt` is treated as zero; the clock and timers never run back.
pub fn tick(state: &mut GameState, controls: &Controls, dt: f32) {
    if state.status != GameStatus::Playing {
        return;
    }
    let dt = dt.max(0.0);

    state.time_ticks += 1;

    if state.player.advance_invulnerability(dt) {
        log::debug!("Invulnerability ended at tick {}", state.time_ticks);
    }
    advance_transition(state, dt);

    if step_player(&mut state.player, controls, &state.blocks, dt) {
        state.emit(GameEvent::Jump);
    }
    for enemy in state.enemies.iter_mut() {
        step_enemy(enemy, &state.blocks);
    }
    step_power_ups(&mut state.power_ups);

    check_pipe_entry(state);

    resolve_enemy_contacts(state);
    collect_power_ups(state);
    resolve_block_hits(state);

    state.camera.follow(&state.player);

    if state.status == GameStatus::Playing
        && !state.is_underground()
        && state.player.pos.x >= GOAL_X
    {
        state.status = GameStatus::Victory;
        state.emit(GameEvent::Victory);
        log::info!("Victory with score {}", state.score);
    }

    state.time = (state.time - dt).max(0.0);
    if state.time <= 0.0 && state.status == GameStatus::Playing {
        state.status = GameStatus::GameOver;
        state.emit(GameEvent::GameOver);
        log::info!("Game over: time is up");
    }
}

impl GameState {
    /// Menu -> Playing
    pub fn start(&mut self) {
        if self.status == GameStatus::Menu {
            self.status = GameStatus::Playing;
            log::info!("Game started");
        } else {
            log::debug!("start() ignored in {:?}", self.status);
        }
    }

    /// Playing -> Paused
    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
            log::info!("Paused at tick {}", self.time_ticks);
        } else {
            log::debug!("pause() ignored in {:?}", self.status);
        }
    }

    /// Paused -> Playing
    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
            log::info!("Resumed at tick {}", self.time_ticks);
        } else {
            log::debug!("resume() ignored in {:?}", self.status);
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Playing => self.pause(),
            GameStatus::Paused => self.resume(),
            other => log::debug!("toggle_pause() ignored in {:?}", other),
        }
    }

    /// Fresh world, straight into play
    ///
    /// Pending timers belong to the old world and are dropped with it.
    pub fn restart(&mut self) {
        *self = GameState::new();
        self.status = GameStatus::Playing;
        log::info!("Restarted");
    }

    /// Fresh world, back at the title screen
    pub fn to_menu(&mut self) {
        *self = GameState::new();
        log::info!("Returned to menu");
    }
}
