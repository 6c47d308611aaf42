//! Per-frame game logic for individual entities.
//!
//! Entities never touch the collections that own them.  Anything they
//! create (projectiles) or schedule (fire-gate re-enables) goes through the
//! `FrameContext`, and the controller applies it once every entity has
//! advanced.  All randomness comes through the context's `RandomSource` so
//! tests control every draw.

use glam::Vec2;

use crate::config::GameConfig;
use crate::entities::{Effect, Entity, EntityId, Fighter, Kind, Projectile, Ship, Side};
use crate::input::{Control, InputState};
use crate::random::RandomSource;
use crate::timer::{Deferred, Timers};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box overlap.  An entity never overlaps itself.
pub fn overlapping(a: &Entity, b: &Entity) -> bool {
    if a.id() == b.id() {
        return false;
    }
    let (ha, hb) = (a.half(), b.half());
    !(a.pos.x + ha.x < b.pos.x - hb.x
        || a.pos.y + ha.y < b.pos.y - hb.y
        || a.pos.x - ha.x > b.pos.x + hb.x
        || a.pos.y - ha.y > b.pos.y + hb.y)
}

/// Whether an entity is still in combat bounds.  Only projectiles can leave.
///
/// The bottom edge is compared against the playfield *width*; see DESIGN.md.
pub fn in_playfield(entity: &Entity, playfield: Vec2) -> bool {
    if !entity.is_projectile() {
        return true;
    }
    let h = entity.half();
    entity.pos.x + h.x > 0.0
        && entity.pos.x - h.x < playfield.x
        && entity.pos.y + h.y > 0.0
        && entity.pos.y - h.y < playfield.x
}

// ── Frame context ─────────────────────────────────────────────────────────────

/// Everything an entity may read or request while advancing one frame.
pub struct FrameContext<'a> {
    pub now_ms: u64,
    pub config: &'a GameConfig,
    pub input: &'a dyn InputState,
    pub rng: &'a mut dyn RandomSource,
    pub timers: &'a mut Timers,
    /// Entities created this frame, tagged with the side that will own them.
    pub spawned: Vec<(Side, Entity)>,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        now_ms: u64,
        config: &'a GameConfig,
        input: &'a dyn InputState,
        rng: &'a mut dyn RandomSource,
        timers: &'a mut Timers,
    ) -> Self {
        Self {
            now_ms,
            config,
            input,
            rng,
            timers,
            spawned: Vec::new(),
        }
    }

    fn fire(&mut self, pos: Vec2, velocity: Vec2, player_owned: bool) {
        let side = if player_owned { Side::Player } else { Side::Enemy };
        let projectile = Entity::projectile(self.config, pos, velocity, player_owned);
        self.spawned.push((side, projectile));
    }
}

// ── Advance ───────────────────────────────────────────────────────────────────

/// Move `entity` forward one frame.
pub fn advance(entity: &mut Entity, ctx: &mut FrameContext) {
    let id = entity.id();
    let half = entity.half();
    let Entity { pos, life, kind, .. } = entity;
    match kind {
        Kind::Ship(ship) => advance_ship(id, pos, half, ship, ctx),
        Kind::Fighter(fighter) => advance_fighter(pos, half, fighter, ctx),
        Kind::Projectile(projectile) => advance_projectile(pos, projectile),
        Kind::Effect(effect) => advance_effect(life, effect, ctx.now_ms),
    }
}

fn advance_ship(
    id: EntityId,
    pos: &mut Vec2,
    half: Vec2,
    ship: &mut Ship,
    ctx: &mut FrameContext,
) {
    let width = ctx.config.playfield.x;
    // Bounds are checked before the move, so the ship can overshoot an edge
    // by less than one step.
    if ctx.input.is_down(Control::Left) && pos.x - half.x > 0.0 {
        pos.x -= ship.move_speed;
    } else if ctx.input.is_down(Control::Right) && pos.x + half.x < width {
        pos.x += ship.move_speed;
    }

    if ship.can_fire && ctx.input.is_down(Control::Fire) {
        let speed = ctx.config.projectile_speed;
        ctx.fire(Vec2::new(pos.x, pos.y - half.y), Vec2::new(0.0, -speed), true);
        ship.can_fire = false;
        ship.fire_generation += 1;
        ctx.timers.schedule(
            ctx.now_ms,
            ship.fire_cooldown_ms,
            Deferred::EnableFire {
                ship: id,
                generation: ship.fire_generation,
            },
        );
    }
}

fn advance_fighter(pos: &mut Vec2, half: Vec2, fighter: &mut Fighter, ctx: &mut FrameContext) {
    let width = ctx.config.playfield.x;
    let ceiling = ctx.config.patrol_ceiling;
    let threshold = ctx.config.direction_change_threshold;
    let dir = &mut fighter.direction;

    if pos.x - half.x <= 0.0 {
        dir.x = 1;
    } else if pos.x + half.x >= width {
        dir.x = -1;
    } else if ctx.rng.next_f64() > threshold {
        dir.x = -dir.x;
    }

    if pos.y - half.y <= 0.0 {
        dir.y = 1;
    } else if pos.y + half.y >= ceiling {
        dir.y = -1;
    } else if ctx.rng.next_f64() > threshold {
        dir.y = -dir.y;
    }

    pos.x += fighter.move_speed * dir.x as f32;
    pos.y += fighter.move_speed * dir.y as f32;

    if ctx.rng.next_f64() > 1.0 - fighter.fire_probability {
        let jitter = (ctx.rng.next_f64() - 0.5) as f32;
        let speed = ctx.config.projectile_speed;
        ctx.fire(Vec2::new(pos.x, pos.y + half.y), Vec2::new(jitter, speed), false);
    }
}

fn advance_projectile(pos: &mut Vec2, projectile: &Projectile) {
    *pos += projectile.velocity;
}

fn advance_effect(life: &mut u32, effect: &Effect, now_ms: u64) {
    if now_ms.saturating_sub(effect.spawned_at_ms) > effect.duration_ms {
        *life = 0;
    }
}
