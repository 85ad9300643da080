//! Fixed level layouts
//!
//! Both sub-levels are generated from the parameter tables below. Block
//! order matters to the resolver: ground, then ceiling, then question
//! blocks, bricks and pipes in table order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Block, BlockKind, Enemy, EnemyKind, GameState, PowerUp, PowerUpKind};
use crate::consts::*;

/// Question block placements on the surface
const SURFACE_QUESTIONS: &[(f32, PowerUpKind)] = &[
    (300.0, PowerUpKind::Mushroom),
    (500.0, PowerUpKind::Coin),
    (800.0, PowerUpKind::Coin),
    (1200.0, PowerUpKind::FireFlower),
    (1600.0, PowerUpKind::Coin),
    (2000.0, PowerUpKind::Coin),
];

const SURFACE_BRICKS: &[f32] = &[
    350.0, 450.0, 550.0, 750.0, 850.0, 950.0, 1150.0, 1250.0, 1350.0, 1550.0, 1650.0, 1750.0,
];

/// Pipe x and whether it leads underground
const SURFACE_PIPES: &[(f32, bool)] = &[(700.0, true), (1400.0, false), (2200.0, false), (3000.0, false)];

const SURFACE_GOOMBAS: &[f32] = &[500.0, 900.0, 1300.0, 1700.0, 2100.0, 2500.0, 2900.0, 3300.0];
const SURFACE_KOOPAS: &[f32] = &[800.0, 1100.0, 1500.0, 1900.0, 2300.0, 2700.0, 3100.0];

const UNDERGROUND_QUESTIONS: &[(f32, PowerUpKind)] = &[
    (200.0, PowerUpKind::Coin),
    (400.0, PowerUpKind::Coin),
    (600.0, PowerUpKind::Coin),
    (800.0, PowerUpKind::Coin),
    (1000.0, PowerUpKind::Coin),
];

const UNDERGROUND_BRICKS: &[f32] = &[250.0, 350.0, 450.0, 550.0, 650.0, 750.0, 850.0, 950.0];

const UNDERGROUND_PIPES: &[(f32, bool)] = &[(1200.0, true)];

/// Stationary coins hover just above the brick row, reachable by standing on it
const UNDERGROUND_COIN_Y: f32 = BLOCK_ROW_Y - 30.0;

/// Which layout is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubLevel {
    #[default]
    Surface,
    Underground,
}

impl SubLevel {
    /// Player x at the start of a fresh game
    pub fn start_x(self) -> f32 {
        100.0
    }

    /// Player x after arriving through a pipe
    ///
    /// The surface return point sits right of the entry pipe so the player
    /// does not reappear inside it.
    pub fn entry_x(self) -> f32 {
        match self {
            SubLevel::Surface => 780.0,
            SubLevel::Underground => 100.0,
        }
    }

    fn ground_tiles(self) -> usize {
        match self {
            SubLevel::Surface => SURFACE_GROUND_TILES,
            SubLevel::Underground => UNDERGROUND_TILES,
        }
    }

    fn has_ceiling(self) -> bool {
        self == SubLevel::Underground
    }

    fn questions(self) -> &'static [(f32, PowerUpKind)] {
        match self {
            SubLevel::Surface => SURFACE_QUESTIONS,
            SubLevel::Underground => UNDERGROUND_QUESTIONS,
        }
    }

    fn bricks(self) -> &'static [f32] {
        match self {
            SubLevel::Surface => SURFACE_BRICKS,
            SubLevel::Underground => UNDERGROUND_BRICKS,
        }
    }

    fn pipes(self) -> &'static [(f32, bool)] {
        match self {
            SubLevel::Surface => SURFACE_PIPES,
            SubLevel::Underground => UNDERGROUND_PIPES,
        }
    }
}

/// Replace blocks, enemies and power-ups with the layout of `sub_level`
///
/// Player, score, timers and status are left alone; the caller positions
/// the player.
pub fn load_sub_level(state: &mut GameState, sub_level: SubLevel) {
    state.blocks.clear();
    state.enemies.clear();
    state.power_ups.clear();

    for i in 0..sub_level.ground_tiles() {
        let id = state.next_entity_id();
        state.blocks.push(Block::new(
            id,
            BlockKind::Ground,
            Vec2::new(i as f32 * TILE_SIZE, GROUND_LEVEL),
            Vec2::new(TILE_SIZE, TILE_SIZE * 3.0),
        ));
    }

    if sub_level.has_ceiling() {
        for i in 0..UNDERGROUND_TILES {
            let id = state.next_entity_id();
            state.blocks.push(Block::new(
                id,
                BlockKind::Ground,
                Vec2::new(i as f32 * TILE_SIZE, CEILING_Y),
                Vec2::splat(TILE_SIZE),
            ));
        }
    }

    for &(x, item) in sub_level.questions() {
        let id = state.next_entity_id();
        state.blocks.push(Block::new(
            id,
            BlockKind::Question {
                hit: false,
                item: Some(item),
            },
            Vec2::new(x, BLOCK_ROW_Y),
            Vec2::splat(TILE_SIZE),
        ));
    }

    for &x in sub_level.bricks() {
        let id = state.next_entity_id();
        state.blocks.push(Block::new(
            id,
            BlockKind::Brick,
            Vec2::new(x, BLOCK_ROW_Y),
            Vec2::splat(TILE_SIZE),
        ));
    }

    for &(x, enterable) in sub_level.pipes() {
        let id = state.next_entity_id();
        state.blocks.push(Block::new(
            id,
            BlockKind::Pipe { enterable },
            Vec2::new(x, GROUND_LEVEL - PIPE_SIZE),
            Vec2::splat(PIPE_SIZE),
        ));
    }

    match sub_level {
        SubLevel::Surface => {
            spawn_enemies(state, EnemyKind::Goomba, SURFACE_GOOMBAS);
            spawn_enemies(state, EnemyKind::Koopa, SURFACE_KOOPAS);
        }
        SubLevel::Underground => {
            let coin_size = PowerUpKind::Coin.size();
            for &x in UNDERGROUND_BRICKS {
                let id = state.next_entity_id();
                let pos = Vec2::new(x + (TILE_SIZE - coin_size.x) / 2.0, UNDERGROUND_COIN_Y);
                state
                    .power_ups
                    .push(PowerUp::new(id, PowerUpKind::Coin, pos, Vec2::ZERO));
            }
        }
    }

    state.sub_level = sub_level;
    log::info!(
        "Loaded {:?}: {} blocks, {} enemies, {} power-ups",
        sub_level,
        state.blocks.len(),
        state.enemies.len(),
        state.power_ups.len()
    );
}

fn spawn_enemies(state: &mut GameState, kind: EnemyKind, positions: &[f32]) {
    for &x in positions {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, kind, x));
    }
}
