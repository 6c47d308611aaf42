//! The game controller.
//!
//! `Game` exclusively owns every entity, split into three sides.  Each frame
//! runs, in this order:
//!
//! 1. collision resolution and pruning
//! 2. rebuilding the unified element list (neutral, enemy, player)
//! 3. advancing every listed element
//! 4. game-over check (player side empty)
//! 5. wave check (enemy side empty)
//!
//! Once the game is over, `update` is a no-op while `draw` keeps rendering
//! the last state.

use std::io;

use glam::Vec2;

use crate::audio::{play_best_effort, Audio, Sound};
use crate::compute::{advance, in_playfield, overlapping, FrameContext};
use crate::config::GameConfig;
use crate::entities::{Entity, EntityId, Side};
use crate::input::InputState;
use crate::random::RandomSource;
use crate::render::{draw_health_stages, render, Renderer};
use crate::timer::{Deferred, Timers};

pub const GAME_OVER_TEXT: &str = "Game Over!!!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
}

/// Position of an element inside one of the side collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    side: Side,
    index: usize,
}

pub struct Game {
    config: GameConfig,
    wave: u32,
    phase: Phase,
    message: String,
    message_generation: u64,
    ship_id: EntityId,
    player_side: Vec<Entity>,
    enemy_side: Vec<Entity>,
    neutral: Vec<Entity>,
    elements: Vec<Slot>,
    timers: Timers,
    rng: Box<dyn RandomSource>,
    audio: Box<dyn Audio>,
}

impl Game {
    /// Start a session: the ship is created and joins the player side.  The
    /// first wave arrives on the first update.
    pub fn new(config: GameConfig, rng: Box<dyn RandomSource>, audio: Box<dyn Audio>) -> Self {
        let ship = Entity::ship(&config);
        log::info!(
            "new session on a {}x{} playfield",
            config.playfield.x,
            config.playfield.y
        );
        Self {
            ship_id: ship.id(),
            player_side: vec![ship],
            enemy_side: Vec::new(),
            neutral: Vec::new(),
            elements: Vec::new(),
            wave: 0,
            phase: Phase::Running,
            message: String::new(),
            message_generation: 0,
            timers: Timers::new(),
            config,
            rng,
            audio,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn size(&self) -> Vec2 {
        self.config.playfield
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Current overlay text, if any.
    pub fn message(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }

    pub fn player_side(&self) -> &[Entity] {
        &self.player_side
    }

    pub fn enemy_side(&self) -> &[Entity] {
        &self.enemy_side
    }

    pub fn neutral(&self) -> &[Entity] {
        &self.neutral
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn ship(&self) -> Option<&Entity> {
        self.player_side.iter().find(|e| e.id() == self.ship_id)
    }

    pub fn ship_mut(&mut self) -> Option<&mut Entity> {
        let id = self.ship_id;
        self.player_side.iter_mut().find(|e| e.id() == id)
    }

    /// The unified element list from the last update, in draw order.
    pub fn elements(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.elements.iter().filter_map(move |slot| self.get(*slot))
    }

    // ── Collections ───────────────────────────────────────────────────────────

    pub fn add_player(&mut self, entity: Entity) {
        self.player_side.push(entity);
    }

    pub fn add_enemy(&mut self, entity: Entity) {
        self.enemy_side.push(entity);
    }

    pub fn add_neutral(&mut self, entity: Entity) {
        self.neutral.push(entity);
    }

    fn add(&mut self, side: Side, entity: Entity) {
        match side {
            Side::Player => self.add_player(entity),
            Side::Enemy => self.add_enemy(entity),
            Side::Neutral => self.add_neutral(entity),
        }
    }

    fn side(&self, side: Side) -> &Vec<Entity> {
        match side {
            Side::Player => &self.player_side,
            Side::Enemy => &self.enemy_side,
            Side::Neutral => &self.neutral,
        }
    }

    fn get(&self, slot: Slot) -> Option<&Entity> {
        self.side(slot.side).get(slot.index)
    }

    // ── Frame ─────────────────────────────────────────────────────────────────

    /// One full display refresh: due timers, simulation, then drawing.
    pub fn refresh(
        &mut self,
        now_ms: u64,
        input: &dyn InputState,
        out: &mut dyn Renderer,
    ) -> io::Result<()> {
        self.run_timers(now_ms);
        self.update(now_ms, input);
        self.draw(out)
    }

    /// Fire every deferred action that has come due.  Actions whose target
    /// has moved on since they were scheduled do nothing.
    pub fn run_timers(&mut self, now_ms: u64) {
        for action in self.timers.take_due(now_ms) {
            match action {
                Deferred::EnableFire { ship, generation } => {
                    let current = self
                        .player_side
                        .iter_mut()
                        .filter(|e| e.id() == ship)
                        .find_map(|e| e.as_ship_mut())
                        .filter(|s| s.fire_generation == generation);
                    match current {
                        Some(s) => s.can_fire = true,
                        None => log::trace!("stale fire re-enable (generation {generation})"),
                    }
                }
                Deferred::ClearMessage { generation } => {
                    if generation == self.message_generation {
                        self.message.clear();
                    } else {
                        log::trace!("stale message clear (generation {generation})");
                    }
                }
            }
        }
    }

    pub fn update(&mut self, now_ms: u64, input: &dyn InputState) {
        if self.is_over() {
            return;
        }

        self.handle_collisions(now_ms);
        self.compute_elements();

        let mut ctx = FrameContext::new(
            now_ms,
            &self.config,
            input,
            self.rng.as_mut(),
            &mut self.timers,
        );
        for slot in &self.elements {
            let entity = match slot.side {
                Side::Player => self.player_side.get_mut(slot.index),
                Side::Enemy => self.enemy_side.get_mut(slot.index),
                Side::Neutral => self.neutral.get_mut(slot.index),
            };
            if let Some(entity) = entity {
                advance(entity, &mut ctx);
            }
        }
        let spawned = std::mem::take(&mut ctx.spawned);
        for (side, entity) in spawned {
            play_best_effort(self.audio.as_mut(), Sound::Raygun);
            self.add(side, entity);
        }

        if self.player_side.is_empty() {
            self.game_over();
            return;
        }
        if self.enemy_side.is_empty() {
            self.create_wave(now_ms);
        }
    }

    /// Damage every overlapping player/enemy pair, then drop the dead and
    /// any projectile that has left the playfield.
    pub fn handle_collisions(&mut self, now_ms: u64) {
        let mut impacts = Vec::new();
        for a in self.player_side.iter_mut() {
            for b in self.enemy_side.iter_mut() {
                if !overlapping(a, b) {
                    continue;
                }
                a.life = a.life.saturating_sub(1);
                b.life = b.life.saturating_sub(1);
                impacts.push(if a.area() > b.area() { a.pos } else { b.pos });
            }
        }
        for pos in impacts {
            play_best_effort(self.audio.as_mut(), Sound::Explosion);
            let effect = Entity::effect(&self.config, pos, now_ms);
            self.neutral.push(effect);
        }

        let playfield = self.config.playfield;
        self.enemy_side.retain(|e| e.is_alive() && in_playfield(e, playfield));
        self.player_side.retain(|e| e.is_alive() && in_playfield(e, playfield));
        self.neutral.retain(Entity::is_alive);
    }

    /// Snapshot the draw/update order: effects, then enemies, then the player side.
    pub fn compute_elements(&mut self) {
        self.elements.clear();
        for side in [Side::Neutral, Side::Enemy, Side::Player] {
            let len = self.side(side).len();
            self.elements.extend((0..len).map(|index| Slot { side, index }));
        }
    }

    fn game_over(&mut self) {
        log::info!("game over on wave {}", self.wave);
        self.phase = Phase::GameOver;
        self.show_text(GAME_OVER_TEXT, true, 0);
    }

    /// Reset the ship and send in the next grid of fighters.
    pub fn create_wave(&mut self, now_ms: u64) {
        let max_life = self.config.ship_max_life;
        let cooldown = self.config.fire_cooldown_for(self.wave);
        match self.ship_mut() {
            Some(ship) => {
                ship.life = max_life;
                if let Some(s) = ship.as_ship_mut() {
                    s.fire_cooldown_ms = cooldown;
                }
            }
            None => log::debug!("wave starting without a ship"),
        }

        self.wave += 1;
        self.show_text(&format!("Wave: {}", self.wave), false, now_ms);

        let cfg = &self.config;
        let speed = cfg.wave_speed(self.wave);
        let fire_probability = cfg.wave_fire_probability(self.wave);
        let margin = cfg.fighter_size + Vec2::splat(cfg.wave_spacing);
        let columns = cfg.wave_columns.max(1);
        let rows = cfg.wave_rows.max(1);
        let fighters: Vec<Entity> = (0..cfg.wave_size)
            .map(|i| {
                let pos = Vec2::new(
                    margin.x + (i % columns) as f32 * margin.x,
                    cfg.wave_origin_y + (i % rows) as f32 * margin.y,
                );
                Entity::fighter(cfg, pos, speed, fire_probability)
            })
            .collect();
        log::info!(
            "wave {}: {} fighters, speed {}, fire probability {:.3}",
            self.wave,
            fighters.len(),
            speed,
            fire_probability
        );
        self.enemy_side.extend(fighters);
    }

    /// Show an overlay message.  Unless `permanent`, it clears itself after
    /// the configured duration.
    pub fn show_text(&mut self, text: &str, permanent: bool, now_ms: u64) {
        self.message = text.to_string();
        self.message_generation += 1;
        if !permanent {
            self.timers.schedule(
                now_ms,
                self.config.message_duration_ms,
                Deferred::ClearMessage {
                    generation: self.message_generation,
                },
            );
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    pub fn draw(&self, out: &mut dyn Renderer) -> io::Result<()> {
        out.clear()?;
        let playfield = self.config.playfield;
        for entity in self.elements() {
            render(entity, playfield, out)?;
        }
        draw_health_stages(&self.enemy_side, out)?;
        if let Some(text) = self.message() {
            out.draw_text_centered(text, playfield / 2.0)?;
        }
        Ok(())
    }
}
