//! Drawing contracts.
//!
//! `Renderer` is the abstract 2D surface the game draws onto, in playfield
//! pixels.  The functions here are pure reads of entity state; they decide
//! what goes where and leave the how to the surface.

use std::io;

use glam::Vec2;

use crate::entities::{Entity, Kind, Ship, Sprite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Red,
    Yellow,
    Green,
}

/// How a sprite is blitted relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    /// Anchor is the top-left corner.
    Upright,
    /// Turned 180°; anchor is the bottom-right corner.
    HalfTurn,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

pub trait Renderer {
    fn clear(&mut self) -> io::Result<()>;
    fn draw_sprite(&mut self, sprite: Sprite, anchor: Vec2, rotation: Rotation) -> io::Result<()>;
    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()>;
    fn draw_text_centered(&mut self, text: &str, center: Vec2) -> io::Result<()>;
}

// ── Entities ──────────────────────────────────────────────────────────────────

pub fn render(entity: &Entity, playfield: Vec2, out: &mut dyn Renderer) -> io::Result<()> {
    match &entity.kind {
        Kind::Ship(ship) => {
            out.draw_sprite(Sprite::Ship, entity.origin(), Rotation::Upright)?;
            draw_ship_life(entity.life, ship, playfield, out)
        }
        Kind::Fighter(_) => out.draw_sprite(Sprite::Fighter, entity.far_corner(), Rotation::HalfTurn),
        Kind::Projectile(p) if p.player_owned => {
            out.draw_sprite(Sprite::PlayerBolt, entity.origin(), Rotation::Upright)
        }
        Kind::Projectile(_) => out.draw_sprite(Sprite::EnemyBolt, entity.far_corner(), Rotation::HalfTurn),
        Kind::Effect(_) => out.draw_sprite(Sprite::Explosion, entity.origin(), Rotation::Upright),
    }
}

/// Health bar in the top-right corner.
fn draw_ship_life(life: u32, ship: &Ship, playfield: Vec2, out: &mut dyn Renderer) -> io::Result<()> {
    out.fill_rect(Rect::new(playfield.x - 112.0, 10.0, 102.0, 12.0), Color::White)?;
    let fill = if ship.max_life == 0 {
        0.0
    } else {
        life as f32 * 100.0 / ship.max_life as f32
    };
    out.fill_rect(Rect::new(playfield.x - 111.0, 11.0, fill, 10.0), Color::Red)
}

// ── Fighter health stages ─────────────────────────────────────────────────────

pub const STAGE_CELL: f32 = 10.0;

pub fn stage_color(life: u32) -> Option<Color> {
    match life {
        3 => Some(Color::Green),
        2 => Some(Color::Yellow),
        1 => Some(Color::Red),
        _ => None,
    }
}

/// One cell per fighter in `entities`, in order, top-left of the playfield.
/// Projectiles and anything else that isn't a fighter are skipped.
pub fn draw_health_stages<'a>(
    entities: impl IntoIterator<Item = &'a Entity>,
    out: &mut dyn Renderer,
) -> io::Result<()> {
    let fighters: Vec<&Entity> = entities
        .into_iter()
        .filter(|e| e.as_fighter().is_some())
        .collect();

    out.fill_rect(
        Rect::new(10.0, 10.0, STAGE_CELL * fighters.len() as f32 + 2.0, 12.0),
        Color::White,
    )?;
    for (idx, fighter) in fighters.iter().enumerate() {
        // A fighter past its three stages keeps its slot but gets no fill.
        let Some(color) = stage_color(fighter.life) else {
            continue;
        };
        let x = STAGE_CELL * idx as f32 + 11.0;
        out.fill_rect(Rect::new(x, 11.0, STAGE_CELL, STAGE_CELL), color)?;
    }
    Ok(())
}
