//! Enemy patrol AI and player contact
//!
//! Enemies walk at a constant speed and turn around on walls, at the world
//! edges, and before walking off a ledge. Kind only changes size and score.

use glam::Vec2;

use super::collision::{WallResponse, clamp_to_floor, resolve_horizontal, resolve_vertical};
use super::player::DamageOutcome;
use super::rect::overlaps;
use super::state::{Block, Enemy, GameEvent, GameState, GameStatus};
use crate::consts::*;

/// Advance one enemy by one tick
pub fn step_enemy(enemy: &mut Enemy, blocks: &[Block]) {
    if !enemy.is_live() {
        return;
    }

    let size = enemy.size;

    // Wall bounce: the move is undone and the heading flips
    if resolve_horizontal(
        &mut enemy.pos,
        &mut enemy.vel,
        size,
        blocks,
        WallResponse::Revert,
    ) {
        enemy.reverse();
    }

    // Enemies keep no ground flag; the floor snap cancels gravity each tick
    enemy.vel.y += GRAVITY;
    resolve_vertical(&mut enemy.pos, &mut enemy.vel, size, blocks);
    clamp_to_floor(&mut enemy.pos, &mut enemy.vel, size);

    if enemy.pos.x <= 0.0 || enemy.pos.x >= WORLD_EDGE_X {
        enemy.reverse();
    }

    // Checked every tick, even right after a wall bounce
    if !ground_ahead(enemy, blocks) {
        enemy.reverse();
    }
}

/// Probe point ahead of and below the enemy's feet
pub fn cliff_probe(enemy: &Enemy) -> Vec2 {
    Vec2::new(
        enemy.pos.x + enemy.vel.x * CLIFF_LEAD,
        enemy.pos.y + enemy.size.y + CLIFF_PROBE_DEPTH,
    )
}

/// Whether there is something to stand on along the current heading
pub fn ground_ahead(enemy: &Enemy, blocks: &[Block]) -> bool {
    let probe = cliff_probe(enemy);
    probe.y >= GROUND_LEVEL
        || blocks
            .iter()
            .filter(|b| b.is_solid())
            .any(|b| b.bounds().contains_point(probe))
}

/// Player vs enemy contacts
///
/// Falling onto an enemy from above defeats it; any other touch damages
/// the player. Enemies are handled one at a time, so the first damaging
/// contact opens the invulnerability window and later ones are ignored.
pub fn resolve_enemy_contacts(state: &mut GameState) {
    let GameState {
        player,
        enemies,
        score,
        status,
        events,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        if !enemy.is_live() || !overlaps(&player.bounds(), &enemy.bounds()) {
            continue;
        }

        if player.vel.y > 0.0 && player.pos.y < enemy.pos.y {
            enemy.defeat();
            player.stomp_bounce();
            *score += enemy.kind.score_value();
            events.push(GameEvent::EnemyDefeat);
            log::debug!("Stomped {:?} #{}", enemy.kind, enemy.id);
            continue;
        }

        match player.take_damage() {
            DamageOutcome::Ignored => {}
            DamageOutcome::Shrunk(tier) => {
                events.push(GameEvent::PlayerHurt);
                log::debug!("Hit by {:?} #{}, now {:?}", enemy.kind, enemy.id, tier);
            }
            DamageOutcome::LifeLost { remaining } => {
                events.push(GameEvent::LifeLost);
                log::debug!("Hit by {:?} #{}, {} lives left", enemy.kind, enemy.id, remaining);
                if remaining == 0 {
                    *status = GameStatus::GameOver;
                    events.push(GameEvent::GameOver);
                    log::info!("Game over: out of lives");
                }
            }
        }
    }
}
