//! Power-up lifecycle: spawn, drift/fall, collection

use super::rect::{Rect, overlaps};
use super::state::{GameEvent, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Move every live power-up by one tick
///
/// Coins drift weightlessly; mushrooms and flowers fall at reduced gravity
/// and rest on the ground line. Anything that leaves the world is retired
/// without being collected.
pub fn step_power_ups(power_ups: &mut [PowerUp]) {
    for power_up in power_ups.iter_mut().filter(|p| p.is_live()) {
        power_up.pos += power_up.vel;

        if !power_up.kind.is_weightless() {
            power_up.vel.y += GRAVITY * POWER_UP_GRAVITY_SCALE;
            if power_up.pos.y >= GROUND_LEVEL - power_up.size.y {
                power_up.pos.y = GROUND_LEVEL - power_up.size.y;
                power_up.vel.y = 0.0;
            }
        }

        if left_world(&power_up.bounds()) {
            power_up.active = false;
        }
    }
}

fn left_world(bounds: &Rect) -> bool {
    bounds.bottom() < 0.0 || bounds.left() > WORLD_WIDTH || bounds.right() < 0.0
}

/// Add a power-up popped out of `block`
pub fn spawn_from_block(state: &mut GameState, kind: PowerUpKind, block: &Rect) {
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp::spawn_above(id, kind, block));
    log::debug!("Spawned {:?} #{} above block at x={}", kind, id, block.left());
}

/// Player vs power-up contacts; each instance pays out at most once
pub fn collect_power_ups(state: &mut GameState) {
    let GameState {
        player,
        power_ups,
        blocks,
        score,
        coins,
        events,
        ..
    } = state;

    for power_up in power_ups.iter_mut() {
        if !power_up.is_live() || !overlaps(&player.bounds(), &power_up.bounds()) {
            continue;
        }

        power_up.collect();
        match power_up.kind {
            PowerUpKind::Coin => {
                *coins += 1;
                *score += SCORE_COIN;
                events.push(GameEvent::Coin);
            }
            PowerUpKind::Mushroom => {
                if player.collect_mushroom() {
                    player.fit_under_ceiling(blocks);
                }
                *score += SCORE_POWER_UP;
                events.push(GameEvent::PowerUp);
            }
            PowerUpKind::FireFlower => {
                player.collect_fire_flower();
                player.fit_under_ceiling(blocks);
                *score += SCORE_POWER_UP;
                events.push(GameEvent::PowerUp);
            }
        }
        log::debug!("Collected {:?} #{}", power_up.kind, power_up.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SizeTier;
    use glam::Vec2;

    fn empty_state() -> GameState {
        let mut state = GameState::new();
        state.power_ups.clear();
        state.enemies.clear();
        state
    }

    #[test]
    fn test_coin_drifts_without_gravity() {
        let mut power_ups = vec![PowerUp::new(
            1,
            PowerUpKind::Coin,
            Vec2::new(100.0, 300.0),
            Vec2::new(0.0, -5.0),
        )];
        for _ in 0..3 {
            step_power_ups(&mut power_ups);
        }
        assert_eq!(power_ups[0].pos.y, 285.0);
        assert_eq!(power_ups[0].vel.y, -5.0);
    }

    #[test]
    fn test_mushroom_falls_to_ground_line() {
        let mut power_ups = vec![PowerUp::spawn_above(
            1,
            PowerUpKind::Mushroom,
            &Rect::new(300.0, 400.0, 32.0, 32.0),
        )];
        for _ in 0..200 {
            step_power_ups(&mut power_ups);
        }
        let mushroom = &power_ups[0];
        assert!(mushroom.is_live());
        assert_eq!(mushroom.pos.y, GROUND_LEVEL - mushroom.size.y);
        assert_eq!(mushroom.vel.y, 0.0);
        assert_eq!(mushroom.pos.x, 300.0 + 200.0);
    }

    #[test]
    fn test_power_up_leaving_world_is_retired() {
        let mut power_ups = vec![PowerUp::new(
            1,
            PowerUpKind::Coin,
            Vec2::new(100.0, 10.0),
            Vec2::new(0.0, -5.0),
        )];
        for _ in 0..10 {
            step_power_ups(&mut power_ups);
        }
        assert!(!power_ups[0].active);
        assert!(!power_ups[0].collected);
    }

    #[test]
    fn test_spawn_position_above_block() {
        let mut state = empty_state();
        let block = Rect::new(300.0, 400.0, 32.0, 32.0);
        spawn_from_block(&mut state, PowerUpKind::Coin, &block);
        let coin = &state.power_ups[0];
        assert_eq!(coin.pos, Vec2::new(300.0, 380.0));
        assert_eq!(coin.vel, Vec2::new(0.0, -5.0));
        assert!(coin.is_live());
    }

    #[test]
    fn test_collect_coin_once() {
        let mut state = empty_state();
        let pos = state.player.pos;
        let id = state.next_entity_id();
        state
            .power_ups
            .push(PowerUp::new(id, PowerUpKind::Coin, pos, Vec2::ZERO));

        collect_power_ups(&mut state);
        collect_power_ups(&mut state);

        assert_eq!(state.coins, 1);
        assert_eq!(state.score, SCORE_COIN);
        assert!(state.power_ups[0].collected);
        assert!(!state.power_ups[0].active);
        assert_eq!(state.events(), &[GameEvent::Coin]);
    }

    #[test]
    fn test_collect_mushroom_grows_small_player() {
        let mut state = empty_state();
        let pos = state.player.pos;
        let id = state.next_entity_id();
        state
            .power_ups
            .push(PowerUp::new(id, PowerUpKind::Mushroom, pos, Vec2::ZERO));

        collect_power_ups(&mut state);

        assert_eq!(state.player.tier, SizeTier::Super);
        assert_eq!(state.score, SCORE_POWER_UP);
        assert_eq!(state.events(), &[GameEvent::PowerUp]);
    }

    #[test]
    fn test_growing_under_a_block_keeps_head_out_of_it() {
        // Small player rising just under the fire flower block at x=1200
        let mut state = empty_state();
        let block = state
            .blocks
            .iter()
            .find(|b| b.pos == Vec2::new(1200.0, BLOCK_ROW_Y))
            .map(|b| b.bounds())
            .unwrap();
        state.player.pos = Vec2::new(1190.5, block.bottom() + 4.0);
        state.player.vel.y = -12.6;
        state.player.on_ground = false;
        let pos = state.player.pos;
        let id = state.next_entity_id();
        state
            .power_ups
            .push(PowerUp::new(id, PowerUpKind::FireFlower, pos, Vec2::ZERO));

        collect_power_ups(&mut state);

        let body = state.player.bounds();
        assert_eq!(state.player.tier, SizeTier::Fire);
        assert_eq!(body.top(), block.bottom());
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.pos.x, 1190.5);
        assert!(!overlaps(&body, &block));
    }

    #[test]
    fn test_collect_fire_flower_from_super() {
        let mut state = empty_state();
        state.player.set_tier(SizeTier::Super);
        let pos = state.player.pos;
        let id = state.next_entity_id();
        state
            .power_ups
            .push(PowerUp::new(id, PowerUpKind::FireFlower, pos, Vec2::ZERO));

        collect_power_ups(&mut state);

        assert_eq!(state.player.tier, SizeTier::Fire);
        assert_eq!(state.score, SCORE_POWER_UP);
    }

    #[test]
    fn test_inconsistent_power_up_is_skipped() {
        let mut state = empty_state();
        let pos = state.player.pos;
        let id = state.next_entity_id();
        let mut coin = PowerUp::new(id, PowerUpKind::Coin, pos, Vec2::ZERO);
        coin.collected = true;
        state.power_ups.push(coin);

        collect_power_ups(&mut state);

        assert_eq!(state.coins, 0);
        assert!(state.events().is_empty());
    }
}
