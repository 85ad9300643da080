//! Side-scrolling camera

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Rect, overlaps};
use super::state::Player;
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Viewport offset in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    /// Center horizontally on the player, never scrolling left of the world
    pub fn follow(&mut self, player: &Player) {
        self.pos.x = (player.pos.x - VIEWPORT_WIDTH / 2.0).max(0.0);
    }

    /// Project a world position into viewport coordinates
    pub fn to_viewport(&self, world: Vec2) -> Vec2 {
        world - self.pos
    }

    /// Visible world rectangle
    pub fn view_rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }

    /// Whether any part of `rect` is on screen (renderer culling)
    pub fn is_visible(&self, rect: &Rect) -> bool {
        overlaps(&self.view_rect(), rect)
    }
}
