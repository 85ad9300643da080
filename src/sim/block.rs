//! Block interaction: question blocks and bricks hit from below

use super::powerup::spawn_from_block;
use super::rect::{Rect, overlaps};
use super::state::{Block, BlockKind, GameEvent, GameState, Player, PowerUpKind, SizeTier};
use crate::consts::SCORE_BLOCK;

/// What hitting a block from below did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockHit {
    /// Question block used up; may release an item
    Bumped { item: Option<PowerUpKind> },
    /// Brick destroyed
    Broken,
    /// Nothing happened (already hit, small player on a brick, ground, pipe)
    Absorbed,
}

impl Block {
    /// Apply a hit from underneath by a player of `tier`
    ///
    /// Question blocks pay out exactly once; bricks only break for the
    /// super and fire tiers.
    pub fn hit_from_below(&mut self, tier: SizeTier) -> BlockHit {
        if !self.active {
            return BlockHit::Absorbed;
        }

        match &mut self.kind {
            BlockKind::Question { hit, item } if !*hit => {
                *hit = true;
                BlockHit::Bumped { item: item.take() }
            }
            BlockKind::Brick if tier != SizeTier::Small => {
                self.active = false;
                BlockHit::Broken
            }
            _ => BlockHit::Absorbed,
        }
    }
}

/// Thin strip just above the player's head, inset from the sides
pub fn head_probe(player: &Player) -> Rect {
    let body = player.bounds();
    Rect::new(body.left() + 2.0, body.top() - 2.0, body.size.x - 4.0, 4.0)
}

/// Resolve blocks hit by the player's head this tick
///
/// Applies while the player is moving up, or when the vertical pass just
/// snapped the player under a block (which zeroes the upward velocity).
pub fn resolve_block_hits(state: &mut GameState) {
    let player = &state.player;
    if player.vel.y >= 0.0 && !player.head_bump {
        return;
    }

    let probe = head_probe(player);
    let tier = player.tier;
    let mut spawns = Vec::new();

    for block in state.blocks.iter_mut() {
        if !block.active || !overlaps(&probe, &block.bounds()) {
            continue;
        }

        match block.hit_from_below(tier) {
            BlockHit::Bumped { item } => {
                state.score += SCORE_BLOCK;
                state.events.push(GameEvent::BlockBump);
                log::debug!("Bumped question block #{}", block.id);
                if let Some(kind) = item {
                    spawns.push((kind, block.bounds()));
                }
            }
            BlockHit::Broken => {
                state.score += SCORE_BLOCK;
                state.events.push(GameEvent::BrickBreak);
                log::debug!("Broke brick #{}", block.id);
            }
            BlockHit::Absorbed => {}
        }
    }

    for (kind, bounds) in spawns {
        spawn_from_block(state, kind, &bounds);
    }
}
