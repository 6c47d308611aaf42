use glam::Vec2;

use space_invader::config::GameConfig;
use space_invader::entities::*;

fn cfg() -> GameConfig {
    GameConfig::default()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn half_extents_are_floored() {
    let c = cfg();
    let ship = Entity::ship(&c);
    assert_eq!(ship.half(), Vec2::new(33.0, 50.0)); // 67 × 100
    let fighter = Entity::fighter(&c, Vec2::ZERO, 1.0, 0.0);
    assert_eq!(fighter.half(), Vec2::new(25.0, 30.0)); // 51 × 60
    let bolt = Entity::projectile(&c, Vec2::ZERO, Vec2::ZERO, true);
    assert_eq!(bolt.half(), Vec2::new(3.0, 10.0));
    let boom = Entity::effect(&c, Vec2::ZERO, 0);
    assert_eq!(boom.half(), Vec2::new(57.0, 50.0)); // 115 × 100
}

#[test]
fn ship_starts_centred_on_bottom_edge() {
    let ship = Entity::ship(&cfg());
    // floor(800/2) - floor(67/2), 600 - floor(100/2)
    assert_eq!(ship.pos, Vec2::new(367.0, 550.0));
    assert_eq!(ship.life, 5);
    let s = ship.as_ship().expect("ship kind");
    assert!(s.can_fire);
    assert_eq!(s.fire_cooldown_ms, 200);
    assert_eq!(s.max_life, 5);
    assert_eq!(s.move_speed, 8.0);
}

#[test]
fn fighter_starts_with_three_stages_heading_down_right() {
    let f = Entity::fighter(&cfg(), Vec2::new(10.0, 20.0), 2.0, 0.01);
    assert_eq!(f.life, 3);
    let fighter = f.as_fighter().expect("fighter kind");
    assert_eq!(fighter.direction, Direction { x: 1, y: 1 });
    assert_eq!(fighter.move_speed, 2.0);
    assert_eq!(fighter.fire_probability, 0.01);
}

#[test]
fn projectile_has_one_life_and_fixed_faction() {
    let c = cfg();
    let mine = Entity::projectile(&c, Vec2::ZERO, Vec2::new(0.0, -3.0), true);
    let theirs = Entity::projectile(&c, Vec2::ZERO, Vec2::new(0.1, 3.0), false);
    assert_eq!(mine.life, 1);
    assert!(mine.is_projectile());
    assert!(mine.as_projectile().unwrap().player_owned);
    assert!(!theirs.as_projectile().unwrap().player_owned);
}

#[test]
fn effect_records_spawn_time() {
    let e = Entity::effect(&cfg(), Vec2::new(5.0, 5.0), 1234);
    assert_eq!(e.life, 1);
    match &e.kind {
        Kind::Effect(effect) => {
            assert_eq!(effect.spawned_at_ms, 1234);
            assert_eq!(effect.duration_ms, 150);
        }
        other => panic!("expected effect, got {other:?}"),
    }
}

// ── Identity & liveness ───────────────────────────────────────────────────────

#[test]
fn every_entity_gets_a_distinct_id() {
    let c = cfg();
    let a = Entity::fighter(&c, Vec2::ZERO, 1.0, 0.0);
    let b = Entity::fighter(&c, Vec2::ZERO, 1.0, 0.0);
    assert_ne!(a.id(), b.id());
    // A clone is the same entity.
    assert_eq!(a.clone().id(), a.id());
}

#[test]
fn alive_iff_life_positive() {
    let mut f = Entity::fighter(&cfg(), Vec2::ZERO, 1.0, 0.0);
    for life in [3, 2, 1] {
        f.life = life;
        assert!(f.is_alive());
    }
    f.life = 0;
    assert!(!f.is_alive());
}

#[test]
fn corners_and_area() {
    let f = Entity::fighter(&cfg(), Vec2::new(100.0, 100.0), 1.0, 0.0);
    assert_eq!(f.origin(), Vec2::new(75.0, 70.0));
    assert_eq!(f.far_corner(), Vec2::new(125.0, 130.0));
    assert_eq!(f.area(), 51.0 * 60.0);
}

#[test]
fn sprite_sizes_follow_config() {
    let c = cfg();
    assert_eq!(Sprite::Ship.size(&c), c.ship_size);
    assert_eq!(Sprite::Fighter.size(&c), c.fighter_size);
    assert_eq!(Sprite::EnemyBolt.size(&c), c.projectile_size);
    assert_eq!(Sprite::Explosion.size(&c), c.effect_size);
}
