//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One call to `tick` per frame, no wall-clock reads
//! - Timers live inside `GameState` and only advance inside `tick`
//! - Stable iteration order (blocks resolve first-match in insertion order)
//! - No rendering or platform dependencies

pub mod block;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod level;
pub mod pipe;
pub mod player;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use collision::{VerticalContact, WallResponse};
pub use level::SubLevel;
pub use rect::{Rect, overlaps};
pub use state::{
    Block, BlockKind, Controls, Countdown, Enemy, EnemyKind, Facing, GameEvent,
    GameState, GameStatus, PipeDirection, Player, PowerUp, PowerUpKind, SizeTier, Transition,
};
pub use tick::tick;
