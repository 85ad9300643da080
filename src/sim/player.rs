//! Player movement and power-tier state machine
//!
//! Tiers: Small -> Super (mushroom) -> Fire (fire flower). Damage steps down
//! one tier; damage while Small costs a life. Every damage opens a fixed
//! invulnerability window that only the window's own timer can close.

use super::collision::{
    VerticalContact, WallResponse, clamp_to_floor, clamp_to_world_left, is_supported,
    resolve_horizontal, resolve_vertical, settle_under_ceiling,
};
use super::state::{Block, Controls, Countdown, Facing, Player, SizeTier};
use crate::consts::*;

/// What a damaging contact did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable; nothing changed
    Ignored,
    /// Dropped to the given tier
    Shrunk(SizeTier),
    /// Lost a life while small
    LifeLost { remaining: u32 },
}

/// Advance player physics by one tick
///
/// Returns true if a jump was started this tick.
pub fn step_player(player: &mut Player, controls: &Controls, blocks: &[Block], dt: f32) -> bool {
    let speed = if controls.run { RUN_SPEED } else { WALK_SPEED };

    // Crouch only counts while standing on something
    player.crouching = controls.crouch && player.on_ground;
    player.refresh_height();

    if player.crouching {
        player.vel.x *= FRICTION;
        player.walking = false;
    } else if controls.left {
        player.vel.x = -speed;
        player.facing = Facing::Left;
        player.walking = true;
    } else if controls.right {
        player.vel.x = speed;
        player.facing = Facing::Right;
        player.walking = true;
    } else {
        player.vel.x *= FRICTION;
        player.walking = false;
    }

    advance_walk_cycle(player, dt);

    let jumped = controls.jump && player.on_ground && !player.crouching;
    if jumped {
        player.vel.y = -JUMP_POWER;
        player.on_ground = false;
    }

    if !player.on_ground {
        player.vel.y += GRAVITY;
    }

    let size = player.size;
    resolve_horizontal(
        &mut player.pos,
        &mut player.vel,
        size,
        blocks,
        WallResponse::Snap,
    );

    let contact = resolve_vertical(&mut player.pos, &mut player.vel, size, blocks);
    player.head_bump = contact == VerticalContact::Ceiling;
    player.on_ground = contact == VerticalContact::Floor
        || (player.vel.y == 0.0 && is_supported(&player.bounds(), blocks));

    if clamp_to_floor(&mut player.pos, &mut player.vel, size) {
        player.on_ground = true;
    }
    clamp_to_world_left(&mut player.pos);

    jumped
}

/// Walk animation: cycle frames while walking on the ground, else stand
fn advance_walk_cycle(player: &mut Player, dt: f32) {
    if player.walking && player.on_ground && player.vel.x.abs() > ANIM_MIN_SPEED {
        player.anim_timer += dt;
        if player.anim_timer > ANIM_FRAME_SECS {
            player.anim_frame = (player.anim_frame + 1) % ANIM_FRAMES;
            player.anim_timer = 0.0;
        }
    } else {
        player.anim_frame = 0;
        player.anim_timer = 0.0;
    }
}

impl Player {
    /// Change tier, resizing around the feet
    pub fn set_tier(&mut self, tier: SizeTier) {
        self.tier = tier;
        self.refresh_height();
    }

    /// Keep a player that just grew out of the block above its head
    ///
    /// Growth keeps the feet in place, so under a low block the new head
    /// can end up inside it. Returns true if the player was moved down.
    pub fn fit_under_ceiling(&mut self, blocks: &[Block]) -> bool {
        let size = self.size;
        settle_under_ceiling(&mut self.pos, &mut self.vel, size, blocks)
    }

    /// Mushroom: Small grows to Super, other tiers are unchanged
    ///
    /// Returns true if the player grew.
    pub fn collect_mushroom(&mut self) -> bool {
        if self.tier == SizeTier::Small {
            self.set_tier(SizeTier::Super);
            true
        } else {
            false
        }
    }

    /// Fire flower: any tier becomes Fire
    pub fn collect_fire_flower(&mut self) {
        self.set_tier(SizeTier::Fire);
    }

    /// Enemy contact that was not a stomp
    pub fn take_damage(&mut self) -> DamageOutcome {
        if self.is_invulnerable() {
            return DamageOutcome::Ignored;
        }

        let outcome = match self.tier {
            SizeTier::Fire => {
                self.set_tier(SizeTier::Super);
                DamageOutcome::Shrunk(SizeTier::Super)
            }
            SizeTier::Super => {
                self.set_tier(SizeTier::Small);
                DamageOutcome::Shrunk(SizeTier::Small)
            }
            SizeTier::Small => {
                self.lives = self.lives.saturating_sub(1);
                DamageOutcome::LifeLost {
                    remaining: self.lives,
                }
            }
        };

        self.invulnerability = Some(Countdown::new(INVULNERABILITY_SECS));
        outcome
    }

    /// Upward kick after stomping an enemy
    pub fn stomp_bounce(&mut self) {
        self.vel.y = -STOMP_BOUNCE;
    }

    /// Run the invulnerability timer; returns true when the window closes
    pub fn advance_invulnerability(&mut self, dt: f32) -> bool {
        let Some(timer) = self.invulnerability.as_mut() else {
            return false;
        };
        if timer.advance(dt) {
            self.invulnerability = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BlockKind;
    use glam::Vec2;

    fn ground() -> Vec<Block> {
        (0..20)
            .map(|i| {
                Block::new(
                    i,
                    BlockKind::Ground,
                    Vec2::new(i as f32 * TILE_SIZE, GROUND_LEVEL),
                    Vec2::new(TILE_SIZE, TILE_SIZE * 3.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_walk_right_sets_speed_and_facing() {
        let blocks = ground();
        let mut player = Player::new(100.0);
        let controls = Controls {
            right: true,
            ..Default::default()
        };
        step_player(&mut player, &controls, &blocks, SIM_DT);
        assert_eq!(player.vel.x, WALK_SPEED);
        assert_eq!(player.pos.x, 100.0 + WALK_SPEED);
        assert_eq!(player.facing, Facing::Right);
        assert!(player.walking);
        assert!(player.on_ground);
    }

    #[test]
    fn test_run_uses_run_speed() {
        let blocks = ground();
        let mut player = Player::new(100.0);
        let controls = Controls {
            left: true,
            run: true,
            ..Default::default()
        };
        step_player(&mut player, &controls, &blocks, SIM_DT);
        assert_eq!(player.vel.x, -RUN_SPEED);
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn test_friction_without_input() {
        let blocks = ground();
        let mut player = Player::new(100.0);
        player.vel.x = 5.0;
        step_player(&mut player, &Controls::default(), &blocks, SIM_DT);
        assert!((player.vel.x - 4.0).abs() < 1e-5);
        assert!(!player.walking);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let blocks = ground();
        let mut player = Player::new(100.0);
        let jump = Controls {
            jump: true,
            ..Default::default()
        };
        assert!(step_player(&mut player, &jump, &blocks, SIM_DT));
        assert!(player.vel.y < 0.0);
        assert!(!player.on_ground);

        // Still airborne: holding jump does nothing
        assert!(!step_player(&mut player, &jump, &blocks, SIM_DT));
    }

    #[test]
    fn test_crouch_blocks_jump_and_movement() {
        let blocks = ground();
        let mut player = Player::new(100.0);
        player.set_tier(SizeTier::Super);
        let controls = Controls {
            crouch: true,
            jump: true,
            right: true,
            ..Default::default()
        };
        assert!(!step_player(&mut player, &controls, &blocks, SIM_DT));
        assert!(player.crouching);
        assert_eq!(player.size.y, CROUCH_HEIGHT);
        assert_eq!(player.vel.x, 0.0);
        assert_eq!(player.bounds().bottom(), GROUND_LEVEL);
        assert!(player.on_ground);
    }

    #[test]
    fn test_stands_still_on_raised_block() {
        let mut blocks = ground();
        blocks.push(Block::new(
            99,
            BlockKind::Pipe { enterable: false },
            Vec2::new(200.0, GROUND_LEVEL - 64.0),
            Vec2::new(64.0, 64.0),
        ));
        let mut player = Player::new(210.0);
        player.pos.y = GROUND_LEVEL - 64.0 - player.size.y;
        player.on_ground = true;

        for _ in 0..10 {
            step_player(&mut player, &Controls::default(), &blocks, SIM_DT);
            assert!(player.on_ground);
            assert_eq!(player.bounds().bottom(), GROUND_LEVEL - 64.0);
        }
    }

    #[test]
    fn test_walk_cycle_advances_and_resets() {
        let blocks = ground();
        let mut player = Player::new(100.0);
        let right = Controls {
            right: true,
            ..Default::default()
        };
        for _ in 0..12 {
            step_player(&mut player, &right, &blocks, SIM_DT);
        }
        assert!(player.anim_frame > 0);
        assert!(player.anim_frame < ANIM_FRAMES);

        step_player(&mut player, &Controls::default(), &blocks, SIM_DT);
        assert_eq!(player.anim_frame, 0);
        assert_eq!(player.anim_timer, 0.0);
    }

    #[test]
    fn test_tier_transitions() {
        let mut player = Player::new(100.0);

        // small + mushroom -> super
        assert!(player.collect_mushroom());
        assert_eq!(player.tier, SizeTier::Super);
        assert_eq!(player.size.y, TALL_HEIGHT);
        assert_eq!(player.bounds().bottom(), GROUND_LEVEL);

        // super + mushroom -> super
        assert!(!player.collect_mushroom());

        // super + fire flower -> fire
        player.collect_fire_flower();
        assert_eq!(player.tier, SizeTier::Fire);

        // fire + damage -> super
        assert_eq!(player.take_damage(), DamageOutcome::Shrunk(SizeTier::Super));
        player.invulnerability = None;

        // super + damage -> small
        assert_eq!(player.take_damage(), DamageOutcome::Shrunk(SizeTier::Small));
        assert_eq!(player.size.y, SMALL_HEIGHT);
        player.invulnerability = None;

        // small + damage -> one life fewer
        assert_eq!(
            player.take_damage(),
            DamageOutcome::LifeLost {
                remaining: START_LIVES - 1
            }
        );
        assert_eq!(player.tier, SizeTier::Small);
    }

    #[test]
    fn test_small_fire_flower_grows() {
        let mut player = Player::new(100.0);
        player.collect_fire_flower();
        assert_eq!(player.tier, SizeTier::Fire);
        assert_eq!(player.size.y, TALL_HEIGHT);
        assert_eq!(player.pos.y, GROUND_LEVEL - TALL_HEIGHT);
    }

    #[test]
    fn test_invulnerability_blocks_repeat_damage() {
        let mut player = Player::new(100.0);
        player.set_tier(SizeTier::Fire);
        player.take_damage();
        assert!(player.is_invulnerable());
        assert_eq!(player.take_damage(), DamageOutcome::Ignored);
        assert_eq!(player.tier, SizeTier::Super);
    }

    #[test]
    fn test_invulnerability_window_expires() {
        let mut player = Player::new(100.0);
        player.take_damage();

        let ticks = (INVULNERABILITY_SECS / SIM_DT).ceil() as u32;
        for _ in 0..ticks - 1 {
            assert!(!player.advance_invulnerability(SIM_DT));
            assert!(player.is_invulnerable());
        }
        // Allow one extra tick for float rounding
        let closed = player.advance_invulnerability(SIM_DT)
            || player.advance_invulnerability(SIM_DT);
        assert!(closed);
        assert!(!player.is_invulnerable());
    }

    #[test]
    fn test_lives_never_underflow() {
        let mut player = Player::new(100.0);
        player.lives = 0;
        assert_eq!(
            player.take_damage(),
            DamageOutcome::LifeLost { remaining: 0 }
        );
    }
}
