//! Tuning constants for a session.
//!
//! Every number the simulation depends on lives here so a JSON file can
//! override any subset of them.  `Default` reproduces the stock game.

use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playfield bounds in pixels.
    pub playfield: Vec2,

    // ── Ship ──────────────────────────────────────────────────────────────────
    pub ship_size: Vec2,
    pub ship_speed: f32,
    pub ship_max_life: u32,
    /// Cooldown before the first wave and the value the per-wave step starts from.
    pub fire_cooldown_ms: u64,
    pub fire_cooldown_step_ms: u64,
    pub fire_cooldown_min_ms: u64,

    // ── Fighters ──────────────────────────────────────────────────────────────
    pub fighter_size: Vec2,
    pub fighter_life: u32,
    /// Lowest y the bottom edge of a fighter may patrol to.
    pub patrol_ceiling: f32,
    /// A per-axis random draw above this flips that axis' direction.
    pub direction_change_threshold: f64,

    // ── Projectiles & effects ─────────────────────────────────────────────────
    pub projectile_size: Vec2,
    pub projectile_speed: f32,
    pub effect_size: Vec2,
    pub effect_duration_ms: u64,

    // ── Waves ─────────────────────────────────────────────────────────────────
    pub wave_size: usize,
    pub wave_columns: usize,
    pub wave_rows: usize,
    /// Vertical position of the first grid row (negative = above the screen).
    pub wave_origin_y: f32,
    /// Extra spacing added to the fighter size between grid cells.
    pub wave_spacing: f32,
    /// Patrol speed goes up by one every this many waves.
    pub wave_speed_divisor: u32,
    pub fire_probability_base: f64,
    pub fire_probability_step: f64,

    // ── Messages ──────────────────────────────────────────────────────────────
    pub message_duration_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Vec2::new(800.0, 600.0),
            ship_size: Vec2::new(67.0, 100.0),
            ship_speed: 8.0,
            ship_max_life: 5,
            fire_cooldown_ms: 200,
            fire_cooldown_step_ms: 50,
            fire_cooldown_min_ms: 50,
            fighter_size: Vec2::new(51.0, 60.0),
            fighter_life: 3,
            patrol_ceiling: 350.0,
            direction_change_threshold: 0.990,
            projectile_size: Vec2::new(6.0, 20.0),
            projectile_speed: 3.0,
            effect_size: Vec2::new(115.0, 100.0),
            effect_duration_ms: 150,
            wave_size: 24,
            wave_columns: 8,
            wave_rows: 3,
            wave_origin_y: -200.0,
            wave_spacing: 10.0,
            wave_speed_divisor: 2,
            fire_probability_base: 0.001,
            fire_probability_step: 0.002,
            message_duration_ms: 1500,
        }
    }
}

impl GameConfig {
    /// Read a JSON config; missing fields fall back to the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with: empty boxes, and zero
    /// counts that would make every frame start a new wave.
    pub fn validate(&self) -> anyhow::Result<()> {
        let sizes = [
            ("playfield", self.playfield),
            ("ship_size", self.ship_size),
            ("fighter_size", self.fighter_size),
            ("projectile_size", self.projectile_size),
            ("effect_size", self.effect_size),
        ];
        for (name, size) in sizes {
            if !(size.x > 0.0 && size.y > 0.0) {
                anyhow::bail!("{name} must be positive on both axes, got [{}, {}]", size.x, size.y);
            }
        }

        let counts = [
            ("ship_max_life", self.ship_max_life as usize),
            ("fighter_life", self.fighter_life as usize),
            ("wave_size", self.wave_size),
            ("wave_columns", self.wave_columns),
            ("wave_rows", self.wave_rows),
            ("wave_speed_divisor", self.wave_speed_divisor as usize),
        ];
        for (name, count) in counts {
            if count == 0 {
                anyhow::bail!("{name} must be at least 1");
            }
        }
        Ok(())
    }

    /// Cooldown the ship gets when wave `completed` (the counter before the
    /// increment) is replaced by the next one.
    pub fn fire_cooldown_for(&self, completed: u32) -> u64 {
        self.fire_cooldown_ms
            .saturating_sub(self.fire_cooldown_step_ms * completed as u64)
            .max(self.fire_cooldown_min_ms)
    }

    /// Patrol speed for wave number `wave` (1-based).
    pub fn wave_speed(&self, wave: u32) -> f32 {
        wave.div_ceil(self.wave_speed_divisor.max(1)) as f32
    }

    /// Per-frame firing chance for wave number `wave` (1-based).
    pub fn wave_fire_probability(&self, wave: u32) -> f64 {
        self.fire_probability_base + self.fire_probability_step * wave as f64
    }
}
