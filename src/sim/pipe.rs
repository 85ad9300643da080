//! Pipe transitions between the surface and the underground
//!
//! Idle -> Active{direction} when the player crouches on an enterable pipe.
//! The swap happens when the transition's countdown runs out. The countdown
//! is part of `GameState`, so it only runs while ticks run: pausing freezes
//! it, and restarting drops it along with the rest of the world.

use glam::Vec2;

use super::level::{SubLevel, load_sub_level};
use super::state::{Block, Countdown, GameEvent, GameState, PipeDirection, Player, Transition};
use crate::consts::*;

/// Enterable pipe the player is standing on, if any
pub fn find_enterable_pipe<'a>(player: &Player, blocks: &'a [Block]) -> Option<&'a Block> {
    let body = player.bounds();
    let feet = body.bottom();
    let center_x = body.center().x;

    blocks.iter().filter(|b| b.is_enterable_pipe()).find(|pipe| {
        let top = pipe.bounds();
        (center_x - top.center().x).abs() < top.size.x / 2.0 + PIPE_CENTER_TOLERANCE
            && feet >= top.top() - PIPE_TOP_ABOVE
            && feet <= top.top() + PIPE_TOP_BELOW
    })
}

/// Start a transition if the player is crouching on an enterable pipe
///
/// Returns true if a transition started.
pub fn check_pipe_entry(state: &mut GameState) -> bool {
    if state.transition.is_active() || !state.player.crouching || !state.player.on_ground {
        return false;
    }

    let Some(pipe_id) = find_enterable_pipe(&state.player, &state.blocks).map(|p| p.id) else {
        return false;
    };

    let direction = match state.sub_level {
        SubLevel::Surface => PipeDirection::Entering,
        SubLevel::Underground => PipeDirection::Exiting,
    };
    state.transition = Transition::Active {
        direction,
        timer: Countdown::new(PIPE_SWAP_DELAY_SECS),
    };
    state.emit(GameEvent::Pipe);
    log::info!("Pipe #{} {:?}", pipe_id, direction);
    true
}

/// Run a pending transition; performs the swap when its delay is over
///
/// Returns true on the tick the swap happened. The swap runs at most once
/// per trigger because the transition returns to idle in the same step.
pub fn advance_transition(state: &mut GameState, dt: f32) -> bool {
    let Transition::Active { direction, timer } = &mut state.transition else {
        return false;
    };
    if !timer.advance(dt) {
        return false;
    }

    let direction = *direction;
    state.transition = Transition::Idle;
    swap_sub_level(state, direction.target());
    true
}

fn swap_sub_level(state: &mut GameState, target: SubLevel) {
    load_sub_level(state, target);

    let player = &mut state.player;
    player.pos = Vec2::new(target.entry_x(), GROUND_LEVEL - player.size.y);
    player.vel = Vec2::ZERO;
    player.on_ground = true;
    state.camera.follow(&state.player);

    log::info!(
        "Arrived in {:?} at x={}, camera x={}",
        target,
        state.player.pos.x,
        state.camera.pos.x
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameStatus;

    /// Playing state with the player crouched centered on the entry pipe
    fn crouched_on_pipe() -> GameState {
        let mut state = GameState::new();
        state.status = GameStatus::Playing;
        let pipe = state
            .blocks
            .iter()
            .find(|b| b.is_enterable_pipe())
            .map(|b| b.bounds())
            .unwrap();
        let player = &mut state.player;
        player.pos = Vec2::new(pipe.center().x - player.size.x / 2.0, pipe.top() - player.size.y);
        player.on_ground = true;
        player.crouching = true;
        state
    }

    fn run_until_swap(state: &mut GameState) -> u32 {
        let mut ticks = 0;
        while !advance_transition(state, SIM_DT) {
            ticks += 1;
            assert!(ticks < 200, "swap never happened");
        }
        ticks + 1
    }

    #[test]
    fn test_entry_requires_crouch_and_ground() {
        let mut state = crouched_on_pipe();
        state.player.crouching = false;
        assert!(!check_pipe_entry(&mut state));

        state.player.crouching = true;
        state.player.on_ground = false;
        assert!(!check_pipe_entry(&mut state));

        state.player.on_ground = true;
        assert!(check_pipe_entry(&mut state));
        assert_eq!(state.transition.direction(), Some(PipeDirection::Entering));
        assert_eq!(state.events(), &[GameEvent::Pipe]);
    }

    #[test]
    fn test_no_retrigger_while_active() {
        let mut state = crouched_on_pipe();
        assert!(check_pipe_entry(&mut state));
        assert!(!check_pipe_entry(&mut state));
        assert_eq!(state.events().len(), 1);
    }

    #[test]
    fn test_horizontal_tolerance() {
        let mut state = crouched_on_pipe();
        let pipe = state
            .blocks
            .iter()
            .find(|b| b.is_enterable_pipe())
            .map(|b| b.bounds())
            .unwrap();
        // Centre just outside half-width plus tolerance
        let half = state.player.size.x / 2.0;
        state.player.pos.x = pipe.center().x + pipe.size.x / 2.0 + PIPE_CENTER_TOLERANCE + 1.0 - half;
        assert!(find_enterable_pipe(&state.player, &state.blocks).is_none());

        state.player.pos.x -= 2.0;
        assert!(find_enterable_pipe(&state.player, &state.blocks).is_some());
    }

    #[test]
    fn test_sealed_pipe_ignored() {
        let mut state = GameState::new();
        let sealed = state
            .blocks
            .iter()
            .find(|b| matches!(b.kind, crate::sim::BlockKind::Pipe { enterable: false }))
            .map(|b| b.bounds())
            .unwrap();
        state.player.pos = Vec2::new(sealed.left() + 20.0, sealed.top() - state.player.size.y);
        assert!(find_enterable_pipe(&state.player, &state.blocks).is_none());
    }

    #[test]
    fn test_swap_after_delay_enters_underground() {
        let mut state = crouched_on_pipe();
        state.score = 1234;
        check_pipe_entry(&mut state);

        let ticks = run_until_swap(&mut state);
        assert!((59..=61).contains(&ticks));

        assert!(state.is_underground());
        assert!(!state.transition.is_active());
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.pos.x, SubLevel::Underground.entry_x());
        assert_eq!(state.player.bounds().bottom(), GROUND_LEVEL);
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.camera.pos.x, 0.0);
        assert_eq!(state.score, 1234);
    }

    #[test]
    fn test_round_trip_back_to_surface() {
        let mut state = crouched_on_pipe();
        check_pipe_entry(&mut state);
        run_until_swap(&mut state);

        let exit = state
            .blocks
            .iter()
            .find(|b| b.is_enterable_pipe())
            .map(|b| b.bounds())
            .unwrap();
        let player = &mut state.player;
        player.pos = Vec2::new(exit.center().x - player.size.x / 2.0, exit.top() - player.size.y);
        player.crouching = true;
        player.on_ground = true;

        assert!(check_pipe_entry(&mut state));
        assert_eq!(state.transition.direction(), Some(PipeDirection::Exiting));
        run_until_swap(&mut state);

        assert!(!state.is_underground());
        assert_eq!(state.enemies.len(), 15);
        assert_eq!(state.player.pos.x, SubLevel::Surface.entry_x());
        assert_eq!(state.camera.pos.x, SubLevel::Surface.entry_x() - VIEWPORT_WIDTH / 2.0);
    }

    #[test]
    fn test_idle_transition_does_nothing() {
        let mut state = GameState::new();
        assert!(!advance_transition(&mut state, 10.0));
        assert!(!state.is_underground());
    }
}
