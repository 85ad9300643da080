//! Collision resolution against static blocks
//!
//! Motion is resolved one axis at a time: move on x and fix up, then move on
//! y and fix up. Each pass only corrects against the FIRST overlapping solid
//! block in block order. Fast movers can tunnel through thin geometry; that
//! is accepted behavior and must not be replaced with multi-block resolution.

use glam::Vec2;

use super::rect::{Rect, overlaps};
use super::state::Block;
use crate::consts::GROUND_LEVEL;

/// How a horizontal hit is corrected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallResponse {
    /// Snap flush against the block's near edge and stop (player)
    Snap,
    /// Return to the pre-move x, keeping velocity for the caller to flip (enemies)
    Revert,
}

/// Result of the vertical pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalContact {
    /// No block was hit
    None,
    /// Landed on top of a block
    Floor,
    /// Bumped the underside of a block
    Ceiling,
}

/// First active solid block overlapping `body`, in block order
pub fn first_solid_overlap<'a>(body: &Rect, blocks: &'a [Block]) -> Option<&'a Block> {
    blocks
        .iter()
        .filter(|b| b.is_solid())
        .find(|b| overlaps(body, &b.bounds()))
}

/// Integrate x and resolve against the first overlapping block
///
/// Returns true if a block was hit.
pub fn resolve_horizontal(
    pos: &mut Vec2,
    vel: &mut Vec2,
    size: Vec2,
    blocks: &[Block],
    response: WallResponse,
) -> bool {
    let old_x = pos.x;
    pos.x += vel.x;

    let body = Rect::from_pos_size(*pos, size);
    let Some(block) = first_solid_overlap(&body, blocks) else {
        return false;
    };

    match response {
        WallResponse::Snap => {
            if vel.x > 0.0 {
                pos.x = block.bounds().left() - size.x;
            } else if vel.x < 0.0 {
                pos.x = block.bounds().right();
            }
            vel.x = 0.0;
        }
        WallResponse::Revert => {
            pos.x = old_x;
        }
    }
    true
}

/// Integrate y and resolve against the first overlapping block
pub fn resolve_vertical(
    pos: &mut Vec2,
    vel: &mut Vec2,
    size: Vec2,
    blocks: &[Block],
) -> VerticalContact {
    pos.y += vel.y;

    let body = Rect::from_pos_size(*pos, size);
    let Some(block) = first_solid_overlap(&body, blocks) else {
        return VerticalContact::None;
    };

    if vel.y > 0.0 {
        pos.y = block.bounds().top() - size.y;
        vel.y = 0.0;
        VerticalContact::Floor
    } else if vel.y < 0.0 {
        pos.y = block.bounds().bottom();
        vel.y = 0.0;
        VerticalContact::Ceiling
    } else {
        VerticalContact::None
    }
}

/// Push a body that reaches into a block above it back down
///
/// For bodies that grew taller around their feet: the top is moved flush
/// with the first such block's underside and upward motion stops. Blocks
/// the body overlaps from above are left to the regular passes.
pub fn settle_under_ceiling(pos: &mut Vec2, vel: &mut Vec2, size: Vec2, blocks: &[Block]) -> bool {
    let body = Rect::from_pos_size(*pos, size);
    let Some(ceiling) = blocks
        .iter()
        .filter(|b| b.is_solid())
        .map(|b| b.bounds())
        .find(|b| overlaps(&body, b) && b.top() <= body.top())
    else {
        return false;
    };

    pos.y = ceiling.bottom();
    vel.y = vel.y.max(0.0);
    true
}

/// Whether `body` is resting flush on top of a solid block
///
/// A body standing still on a block only touches it, which `overlaps`
/// does not count, so support is probed one pixel below the feet.
pub fn is_supported(body: &Rect, blocks: &[Block]) -> bool {
    let feet = Rect::new(body.left(), body.bottom(), body.size.x, 1.0);
    first_solid_overlap(&feet, blocks).is_some()
}

/// Fallback floor: never sink below the world ground line
///
/// Returns true if the body was clamped.
pub fn clamp_to_floor(pos: &mut Vec2, vel: &mut Vec2, size: Vec2) -> bool {
    if pos.y + size.y >= GROUND_LEVEL {
        pos.y = GROUND_LEVEL - size.y;
        vel.y = 0.0;
        true
    } else {
        false
    }
}

/// Left world boundary
#[inline]
pub fn clamp_to_world_left(pos: &mut Vec2) {
    pos.x = pos.x.max(0.0);
}
