//! All game entity types. Pure data, no per-frame logic.

use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec2;

use crate::config::GameConfig;

// ── Identity ──────────────────────────────────────────────────────────────────

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of an entity for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(u64);

impl EntityId {
    pub fn next() -> Self {
        EntityId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// ── Factions ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Ship plus player-fired projectiles.
    Player,
    /// Fighters plus enemy-fired projectiles.
    Enemy,
    /// Effects; never collision-checked.
    Neutral,
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Images the renderer knows how to blit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    Fighter,
    PlayerBolt,
    EnemyBolt,
    Explosion,
}

impl Sprite {
    /// Pixel size of the image, which matches the box of the entity it depicts.
    pub fn size(self, config: &GameConfig) -> Vec2 {
        match self {
            Sprite::Ship => config.ship_size,
            Sprite::Fighter => config.fighter_size,
            Sprite::PlayerBolt | Sprite::EnemyBolt => config.projectile_size,
            Sprite::Explosion => config.effect_size,
        }
    }
}

// ── Kind-specific state ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub move_speed: f32,
    pub max_life: u32,
    pub can_fire: bool,
    pub fire_cooldown_ms: u64,
    /// Bumped on every shot; a re-enable only applies to the shot that scheduled it.
    pub fire_generation: u64,
}

/// Each component is -1 or +1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Direction {
    pub x: i8,
    pub y: i8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fighter {
    pub move_speed: f32,
    /// Per-frame chance of firing, in [0, 1).
    pub fire_probability: f64,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub velocity: Vec2,
    pub player_owned: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub spawned_at_ms: u64,
    pub duration_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    Ship(Ship),
    Fighter(Fighter),
    Projectile(Projectile),
    Effect(Effect),
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// Anything on the playfield.  `pos` is the centre of its box.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    id: EntityId,
    pub pos: Vec2,
    size: Vec2,
    half: Vec2,
    pub life: u32,
    pub kind: Kind,
}

impl Entity {
    pub fn new(pos: Vec2, size: Vec2, life: u32, kind: Kind) -> Self {
        Self {
            id: EntityId::next(),
            pos,
            size,
            half: (size / 2.0).floor(),
            life,
            kind,
        }
    }

    /// The player's ship, centred horizontally and resting on the bottom edge.
    pub fn ship(config: &GameConfig) -> Self {
        let size = config.ship_size;
        let pos = Vec2::new(
            (config.playfield.x / 2.0).floor() - (size.x / 2.0).floor(),
            config.playfield.y - (size.y / 2.0).floor(),
        );
        Self::new(
            pos,
            size,
            config.ship_max_life,
            Kind::Ship(Ship {
                move_speed: config.ship_speed,
                max_life: config.ship_max_life,
                can_fire: true,
                fire_cooldown_ms: config.fire_cooldown_ms,
                fire_generation: 0,
            }),
        )
    }

    pub fn fighter(config: &GameConfig, pos: Vec2, move_speed: f32, fire_probability: f64) -> Self {
        Self::new(
            pos,
            config.fighter_size,
            config.fighter_life,
            Kind::Fighter(Fighter {
                move_speed,
                fire_probability,
                direction: Direction { x: 1, y: 1 },
            }),
        )
    }

    pub fn projectile(config: &GameConfig, pos: Vec2, velocity: Vec2, player_owned: bool) -> Self {
        Self::new(
            pos,
            config.projectile_size,
            1,
            Kind::Projectile(Projectile { velocity, player_owned }),
        )
    }

    pub fn effect(config: &GameConfig, pos: Vec2, now_ms: u64) -> Self {
        Self::new(
            pos,
            config.effect_size,
            1,
            Kind::Effect(Effect {
                spawned_at_ms: now_ms,
                duration_ms: config.effect_duration_ms,
            }),
        )
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Floor of half the size on each axis.
    pub fn half(&self) -> Vec2 {
        self.half
    }

    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Top-left corner of the box.
    pub fn origin(&self) -> Vec2 {
        self.pos - self.half
    }

    /// Bottom-right corner of the box.
    pub fn far_corner(&self) -> Vec2 {
        self.pos + self.half
    }

    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, Kind::Projectile(_))
    }

    pub fn as_ship(&self) -> Option<&Ship> {
        match &self.kind {
            Kind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_ship_mut(&mut self) -> Option<&mut Ship> {
        match &mut self.kind {
            Kind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn as_fighter(&self) -> Option<&Fighter> {
        match &self.kind {
            Kind::Fighter(fighter) => Some(fighter),
            _ => None,
        }
    }

    pub fn as_fighter_mut(&mut self) -> Option<&mut Fighter> {
        match &mut self.kind {
            Kind::Fighter(fighter) => Some(fighter),
            _ => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&Projectile> {
        match &self.kind {
            Kind::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }
}
