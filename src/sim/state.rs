//! Game state and core simulation types
//!
//! Everything the renderer draws and the orchestrator mutates lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::level::{self, SubLevel};
use super::rect::Rect;
use crate::consts::*;

/// Overall game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Title screen, world built but not simulating
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives or out of time
    GameOver,
    /// Reached the goal
    Victory,
}

/// Control signal vector, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub run: bool,
    pub crouch: bool,
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Player power level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizeTier {
    #[default]
    Small,
    Super,
    Fire,
}

impl SizeTier {
    /// Height when standing upright
    pub fn standing_height(self) -> f32 {
        match self {
            SizeTier::Small => SMALL_HEIGHT,
            SizeTier::Super | SizeTier::Fire => TALL_HEIGHT,
        }
    }
}

/// A one-shot countdown measured in simulated seconds
///
/// Only advanced by the orchestrator while the game is playing, so it
/// freezes on pause and disappears with the world on restart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: f32,
    duration: f32,
}

impl Countdown {
    pub fn new(secs: f32) -> Self {
        Self {
            remaining: secs,
            duration: secs,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Fraction of the duration already elapsed (0-1)
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (1.0 - self.remaining / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Advance by `dt`; returns true once the countdown has run out
    ///
    /// Negative steps are treated as zero, so a countdown never rewinds.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.remaining <= 0.0
    }
}

/// Side effects reported to the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jump,
    Coin,
    PowerUp,
    EnemyDefeat,
    Pipe,
    BlockBump,
    BrickBreak,
    PlayerHurt,
    LifeLost,
    GameOver,
    Victory,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub on_ground: bool,
    pub facing: Facing,
    pub tier: SizeTier,
    /// Damage immunity window; `None` when vulnerable
    pub invulnerability: Option<Countdown>,
    pub lives: u32,
    pub walking: bool,
    pub crouching: bool,
    /// Walk cycle frame (0..ANIM_FRAMES)
    pub anim_frame: u8,
    /// Seconds accumulated toward the next walk frame
    pub anim_timer: f32,
    /// Set when this tick's vertical pass snapped the player under a block
    #[serde(skip)]
    pub head_bump: bool,
}

impl Player {
    /// Create a small player standing on the ground line at `x`
    pub fn new(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, GROUND_LEVEL - SMALL_HEIGHT),
            size: Vec2::new(PLAYER_WIDTH, SMALL_HEIGHT),
            vel: Vec2::ZERO,
            on_ground: true,
            facing: Facing::Right,
            tier: SizeTier::Small,
            invulnerability: None,
            lives: START_LIVES,
            walking: false,
            crouching: false,
            anim_frame: 0,
            anim_timer: 0.0,
            head_bump: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability.is_some()
    }

    /// Height implied by tier and crouch state
    pub fn target_height(&self) -> f32 {
        if self.crouching && self.tier != SizeTier::Small {
            CROUCH_HEIGHT
        } else {
            self.tier.standing_height()
        }
    }

    /// Apply `target_height`, keeping the feet where they are
    pub fn refresh_height(&mut self) {
        let height = self.target_height();
        self.pos.y += self.size.y - height;
        self.size.y = height;
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Ground patrol
    Goomba,
    /// Shelled patrol
    Koopa,
}

impl EnemyKind {
    pub fn size(self) -> Vec2 {
        match self {
            EnemyKind::Goomba => Vec2::new(24.0, 24.0),
            EnemyKind::Koopa => Vec2::new(24.0, 32.0),
        }
    }

    /// Score awarded for a stomp
    pub fn score_value(self) -> u64 {
        match self {
            EnemyKind::Goomba => SCORE_GOOMBA,
            EnemyKind::Koopa => SCORE_KOOPA,
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub defeated: bool,
    pub active: bool,
}

impl Enemy {
    /// Create an enemy standing on the ground line at `x`, walking left
    pub fn new(id: u32, kind: EnemyKind, x: f32) -> Self {
        let size = kind.size();
        Self {
            id,
            kind,
            pos: Vec2::new(x, GROUND_LEVEL - size.y),
            size,
            vel: Vec2::new(-ENEMY_SPEED, 0.0),
            facing: Facing::Left,
            defeated: false,
            active: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Active and not defeated; anything else is skipped by every pass
    pub fn is_live(&self) -> bool {
        self.active && !self.defeated
    }

    pub fn defeat(&mut self) {
        self.defeated = true;
        self.active = false;
    }

    /// Turn around
    pub fn reverse(&mut self) {
        self.vel.x = -self.vel.x;
        self.facing = self.facing.flipped();
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Coin,
    Mushroom,
    FireFlower,
}

impl PowerUpKind {
    pub fn size(self) -> Vec2 {
        match self {
            PowerUpKind::Coin => Vec2::splat(16.0),
            PowerUpKind::Mushroom | PowerUpKind::FireFlower => Vec2::splat(20.0),
        }
    }

    /// Velocity given when popped out of a question block
    pub fn spawn_velocity(self) -> Vec2 {
        match self {
            PowerUpKind::Mushroom => Vec2::new(1.0, -5.0),
            PowerUpKind::Coin | PowerUpKind::FireFlower => Vec2::new(0.0, -5.0),
        }
    }

    /// Coins drift without gravity
    pub fn is_weightless(self) -> bool {
        self == PowerUpKind::Coin
    }
}

/// A collectible entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub collected: bool,
    pub active: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size: kind.size(),
            vel,
            collected: false,
            active: true,
        }
    }

    /// Pop a power-up out of the top of `block`
    pub fn spawn_above(id: u32, kind: PowerUpKind, block: &Rect) -> Self {
        let pos = Vec2::new(block.left(), block.top() - POWER_UP_SPAWN_RISE);
        Self::new(id, kind, pos, kind.spawn_velocity())
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn is_live(&self) -> bool {
        self.active && !self.collected
    }

    pub fn collect(&mut self) {
        self.collected = true;
        self.active = false;
    }
}

/// Block types, each carrying only the state that is legal for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Ground,
    /// Breakable by super and fire tiers
    Brick,
    /// One-shot item box
    Question {
        hit: bool,
        item: Option<PowerUpKind>,
    },
    Pipe {
        enterable: bool,
    },
}

/// A static level block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub kind: BlockKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
}

impl Block {
    pub fn new(id: u32, kind: BlockKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            active: true,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Every block kind is solid while active
    pub fn is_solid(&self) -> bool {
        self.active
    }

    pub fn is_breakable(&self) -> bool {
        matches!(self.kind, BlockKind::Brick)
    }

    pub fn is_enterable_pipe(&self) -> bool {
        self.active && matches!(self.kind, BlockKind::Pipe { enterable: true })
    }
}

/// Which way a pipe transition travels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeDirection {
    /// Surface to underground
    Entering,
    /// Underground back to surface
    Exiting,
}

impl PipeDirection {
    pub fn target(self) -> SubLevel {
        match self {
            PipeDirection::Entering => SubLevel::Underground,
            PipeDirection::Exiting => SubLevel::Surface,
        }
    }
}

/// Pipe transition state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Transition {
    #[default]
    Idle,
    /// Swap pending until `timer` runs out
    Active {
        direction: PipeDirection,
        timer: Countdown,
    },
}

impl Transition {
    pub fn is_active(&self) -> bool {
        matches!(self, Transition::Active { .. })
    }

    pub fn direction(&self) -> Option<PipeDirection> {
        match self {
            Transition::Idle => None,
            Transition::Active { direction, .. } => Some(*direction),
        }
    }

    /// Animation progress for the renderer (0-1)
    pub fn progress(&self) -> f32 {
        match self {
            Transition::Idle => 0.0,
            Transition::Active { timer, .. } => timer.progress(),
        }
    }
}

/// Complete game state, exclusively owned by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    /// Enemy roster (defeated enemies stay, flagged inactive)
    pub enemies: Vec<Enemy>,
    /// Level blocks in resolution order
    pub blocks: Vec<Block>,
    pub power_ups: Vec<PowerUp>,
    pub score: u64,
    pub coins: u32,
    /// Remaining time in seconds (never negative)
    pub time: f32,
    pub world: String,
    pub level: u32,
    pub status: GameStatus,
    pub camera: Camera,
    pub sub_level: SubLevel,
    pub transition: Transition,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Build a fresh world on the surface, sitting at the menu
    pub fn new() -> Self {
        let mut state = Self {
            player: Player::new(SubLevel::Surface.start_x()),
            enemies: Vec::new(),
            blocks: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            coins: 0,
            time: START_TIME_SECS,
            world: "1".to_string(),
            level: 1,
            status: GameStatus::Menu,
            camera: Camera::default(),
            sub_level: SubLevel::Surface,
            transition: Transition::Idle,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };

        level::load_sub_level(&mut state, SubLevel::Surface);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_underground(&self) -> bool {
        self.sub_level == SubLevel::Underground
    }

    /// HUD label such as "1-1"
    pub fn level_label(&self) -> String {
        format!("{}-{}", self.world, self.level)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain, oldest first
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Hand pending events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
