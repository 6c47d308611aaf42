//! Terminal rendering. All terminal I/O lives here.
//!
//! `TerminalRenderer` implements the game's `Renderer` surface on top of
//! crossterm.  The playfield is measured in pixels; every draw command is
//! scaled down to character cells.  No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use crate::config::GameConfig;
use crate::entities::Sprite;
use crate::render::{Color, Rect, Renderer, Rotation};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_SHIP: style::Color = style::Color::White;
const C_FIGHTER: style::Color = style::Color::Green;
const C_BOLT_PLAYER: style::Color = style::Color::Cyan;
const C_BOLT_ENEMY: style::Color = style::Color::Magenta;
const C_EXPLOSION: style::Color = style::Color::Yellow;
const C_TEXT: style::Color = style::Color::White;
const C_HINT: style::Color = style::Color::DarkGrey;

fn palette(color: Color) -> style::Color {
    match color {
        Color::White => style::Color::White,
        Color::Red => style::Color::Red,
        Color::Yellow => style::Color::Yellow,
        Color::Green => style::Color::Green,
    }
}

const ART_SHIP: &[&str] = &["▲", "/█\\"];
const ART_FIGHTER: &[&str] = &["\\▼/", "<█>"];
const ART_PLAYER_BOLT: &[&str] = &["║"];
const ART_ENEMY_BOLT: &[&str] = &["↓"];
const ART_EXPLOSION: &[&str] = &["\\|/", "-*-", "/|\\"];

/// Glyph rows for each sprite, drawn centred on the sprite's box.  Half-turn
/// art is already flipped, so rotation only affects where the box lands.
fn art(sprite: Sprite) -> (&'static [&'static str], style::Color) {
    match sprite {
        Sprite::Ship => (ART_SHIP, C_SHIP),
        Sprite::Fighter => (ART_FIGHTER, C_FIGHTER),
        Sprite::PlayerBolt => (ART_PLAYER_BOLT, C_BOLT_PLAYER),
        Sprite::EnemyBolt => (ART_ENEMY_BOLT, C_BOLT_ENEMY),
        Sprite::Explosion => (ART_EXPLOSION, C_EXPLOSION),
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    config: GameConfig,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    /// `rows` includes one line at the bottom reserved for the controls hint.
    pub fn new(out: W, config: &GameConfig, cols: u16, rows: u16) -> Self {
        Self {
            out,
            config: config.clone(),
            cols: cols.max(1),
            rows: rows.max(2),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(2);
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn field_rows(&self) -> u16 {
        self.rows - 1
    }

    /// Map a playfield point to a cell, or `None` when it is off screen.
    pub fn cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let col = (p.x / self.config.playfield.x * self.cols as f32).floor();
        let row = (p.y / self.config.playfield.y * self.field_rows() as f32).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.field_rows() as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn print_clipped(&mut self, col: i32, row: i32, text: &str) -> std::io::Result<()> {
        if row < 0 || row >= self.field_rows() as i32 {
            return Ok(());
        }
        let visible: String = text
            .chars()
            .enumerate()
            .filter(|(i, _)| {
                let c = col + *i as i32;
                c >= 0 && c < self.cols as i32
            })
            .map(|(_, ch)| ch)
            .collect();
        if visible.is_empty() {
            return Ok(());
        }
        let start = col.max(0) as u16;
        self.out.queue(cursor::MoveTo(start, row as u16))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    /// Controls legend on the last row, then flush the frame.
    pub fn present(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, self.rows - 1))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print("← → / A D : Move   SPACE : Fire   R : Restart   Q : Quit"))?;
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows - 1))?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite, anchor: Vec2, rotation: Rotation) -> std::io::Result<()> {
        let half = sprite.size(&self.config) / 2.0;
        let center = match rotation {
            Rotation::Upright => anchor + half,
            Rotation::HalfTurn => anchor - half,
        };
        let sx = self.cols as f32 / self.config.playfield.x;
        let sy = self.field_rows() as f32 / self.config.playfield.y;
        let cc = ((center.x * sx).floor()) as i32;
        let cr = ((center.y * sy).floor()) as i32;

        let (lines, color) = art(sprite);
        self.out.queue(style::SetForegroundColor(color))?;
        let top = cr - lines.len() as i32 / 2;
        for (i, line) in lines.iter().enumerate() {
            let left = cc - line.chars().count() as i32 / 2;
            self.print_clipped(left, top + i as i32, line)?;
        }
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> std::io::Result<()> {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return Ok(());
        }
        let sx = self.cols as f32 / self.config.playfield.x;
        let sy = self.field_rows() as f32 / self.config.playfield.y;
        let c0 = (rect.x * sx).floor() as i32;
        let c1 = (((rect.x + rect.w) * sx).ceil() as i32).max(c0 + 1);
        let r0 = (rect.y * sy).floor() as i32;
        let r1 = (((rect.y + rect.h) * sy).ceil() as i32).max(r0 + 1);

        self.out.queue(style::SetBackgroundColor(palette(color)))?;
        for row in r0..r1 {
            let width = (c1 - c0).max(0) as usize;
            self.print_clipped(c0, row, &" ".repeat(width))?;
        }
        self.out.queue(style::SetBackgroundColor(style::Color::Reset))?;
        Ok(())
    }

    fn draw_text_centered(&mut self, text: &str, center: Vec2) -> std::io::Result<()> {
        let Some((col, row)) = self.cell(center) else {
            return Ok(());
        };
        let left = col as i32 - text.chars().count() as i32 / 2;
        self.out.queue(style::SetForegroundColor(C_TEXT))?;
        self.print_clipped(left, row as i32, text)
    }
}
