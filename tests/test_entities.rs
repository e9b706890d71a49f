use space_adventure::config::Rules;
use space_adventure::entities::*;
use space_adventure::pool::Pool;
use space_adventure::stars::Starfield;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn field() -> Playfield {
    Playfield::default()
}

fn enemy_at(x: f32, y: f32, vx: f32, vy: f32) -> Enemy {
    Enemy {
        body: Body::new(x, y, (48.0, 48.0)).with_velocity(vx, vy),
        shoot_timer: 0,
        shoot_interval: 100,
    }
}

fn player_at(x: f32, y: f32) -> Player {
    Player {
        body: Body::new(x, y, (64.0, 64.0)),
        health: 3,
        speed: 5.0,
        invulnerable_until: None,
    }
}

// ── Body::advance ─────────────────────────────────────────────────────────────

#[test]
fn advance_n_frames_is_linear() {
    let start = Body::new(10.0, 20.0, (4.0, 4.0)).with_velocity(0.3, -1.7);
    let mut body = start;
    let n = 500;
    for _ in 0..n {
        body.advance(1);
    }
    assert!((body.x - (start.x + n as f32 * 0.3)).abs() < 1e-2);
    assert!((body.y - (start.y + n as f32 * -1.7)).abs() < 1e-2);
}

#[test]
fn advance_scales_with_dt() {
    let mut body = Body::new(0.0, 0.0, (1.0, 1.0)).with_velocity(2.0, 3.0);
    body.advance(4);
    assert_eq!((body.x, body.y), (8.0, 12.0));
}

// ── Body::intersects ──────────────────────────────────────────────────────────

#[test]
fn overlapping_boxes_intersect() {
    let a = Body::new(100.0, 100.0, (20.0, 20.0));
    let b = Body::new(115.0, 105.0, (20.0, 20.0));
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn touching_edges_do_not_intersect() {
    let a = Body::new(100.0, 100.0, (20.0, 20.0));
    let b = Body::new(120.0, 100.0, (20.0, 20.0));
    assert!(!a.intersects(&b));
}

#[test]
fn separated_on_one_axis_do_not_intersect() {
    let a = Body::new(100.0, 100.0, (20.0, 20.0));
    let b = Body::new(105.0, 200.0, (20.0, 20.0));
    assert!(!a.intersects(&b));
}

// ── Bullets ───────────────────────────────────────────────────────────────────

#[test]
fn player_bullet_dies_once_fully_above_top() {
    let mut bullet = Bullet {
        body: Body::new(100.0, 9.0, (8.0, 16.0)).with_velocity(0.0, -8.0),
        owner: BulletOwner::Player,
    };
    bullet.update(&field()); // y=1, bottom=9
    assert!(bullet.body.alive);
    bullet.update(&field()); // y=-7, bottom=1
    assert!(bullet.body.alive);
    bullet.update(&field()); // y=-15, bottom=-7
    assert!(!bullet.body.alive);
}

#[test]
fn enemy_bullet_dies_below_bottom() {
    let mut bullet = Bullet {
        body: Body::new(100.0, 640.0, (4.0, 10.0)).with_velocity(0.0, 5.0),
        owner: BulletOwner::Enemy,
    };
    bullet.update(&field()); // top = 640
    assert!(bullet.body.alive);
    bullet.update(&field()); // top = 645
    assert!(!bullet.body.alive);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_past_bottom_is_flagged_and_swept() {
    let mut enemies = Pool::new();
    enemies.insert(enemy_at(400.0, 663.0, 0.0, 2.0)); // top = 639
    enemies.insert(enemy_at(200.0, 100.0, 0.0, 2.0));

    for enemy in enemies.iter_mut() {
        enemy.update(&field());
    }
    assert_eq!(enemies.live().count(), 1);
    assert_eq!(enemies.len(), 2);

    assert_eq!(enemies.sweep(), 1);
    assert_eq!(enemies.len(), 1);
    assert_eq!(enemies.iter().next().map(|e| e.body.x), Some(200.0));
}

#[test]
fn enemy_bounces_off_side_walls() {
    let mut left = enemy_at(25.0, 100.0, -3.0, 2.0);
    left.update(&field());
    assert_eq!(left.body.x, 24.0);
    assert_eq!(left.body.vx, 3.0);

    let mut right = enemy_at(775.0, 100.0, 3.0, 2.0);
    right.update(&field());
    assert_eq!(right.body.x, 776.0);
    assert_eq!(right.body.vx, -3.0);
}

#[test]
fn enemy_without_drift_only_descends() {
    let mut enemy = enemy_at(400.0, 100.0, 0.0, 2.0);
    for _ in 0..10 {
        enemy.update(&field());
    }
    assert_eq!(enemy.body.x, 400.0);
    assert_eq!(enemy.body.y, 120.0);
}

#[test]
fn enemy_fires_on_its_interval_once_on_screen() {
    let rules = Rules::default();
    let mut enemy = enemy_at(300.0, 200.0, 0.0, 2.0);
    enemy.shoot_interval = 3;

    assert!(enemy.tick_fire(&rules).is_none());
    assert!(enemy.tick_fire(&rules).is_none());
    let shot = enemy.tick_fire(&rules).expect("third frame fires");
    assert_eq!(shot.owner, BulletOwner::Enemy);
    assert_eq!(shot.body.x, 300.0);
    assert_eq!(shot.body.y, enemy.body.bottom());
    assert_eq!(shot.body.vy, rules.enemy_bullet_speed);
    assert_eq!(enemy.shoot_timer, 0);
}

#[test]
fn enemy_above_screen_holds_fire() {
    let rules = Rules::default();
    let mut enemy = enemy_at(300.0, -50.0, 0.0, 2.0);
    enemy.shoot_interval = 1;
    assert!(enemy.tick_fire(&rules).is_none());
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_moves_diagonally() {
    let mut player = player_at(400.0, 300.0);
    let controls = Controls {
        right: true,
        up: true,
        ..Controls::default()
    };
    player.steer(controls, &field(), 0);
    assert_eq!((player.body.x, player.body.y), (405.0, 295.0));
}

#[test]
fn opposite_keys_cancel() {
    let mut player = player_at(400.0, 300.0);
    let controls = Controls {
        left: true,
        right: true,
        ..Controls::default()
    };
    player.steer(controls, &field(), 0);
    assert_eq!(player.body.x, 400.0);
}

#[test]
fn player_clamps_each_axis_into_corner() {
    let mut player = player_at(34.0, 34.0);
    let controls = Controls {
        left: true,
        up: true,
        ..Controls::default()
    };
    player.steer(controls, &field(), 0);
    assert_eq!((player.body.x, player.body.y), (32.0, 32.0));

    // Pinned on x, still free on y
    let controls = Controls {
        left: true,
        down: true,
        ..Controls::default()
    };
    player.steer(controls, &field(), 0);
    assert_eq!((player.body.x, player.body.y), (32.0, 37.0));
}

#[test]
fn player_clamps_at_bottom_right() {
    let mut player = player_at(766.0, 606.0);
    let controls = Controls {
        right: true,
        down: true,
        ..Controls::default()
    };
    player.steer(controls, &field(), 0);
    assert_eq!((player.body.x, player.body.y), (768.0, 608.0));
}

#[test]
fn hit_costs_one_health_without_invulnerability() {
    let mut player = player_at(400.0, 300.0);
    assert!(player.take_hit(0, 0));
    assert!(player.take_hit(0, 0));
    assert_eq!(player.health, 1);
    assert!(!player.is_invulnerable(0));
}

#[test]
fn invulnerability_window_blocks_hits_until_expiry() {
    let mut player = player_at(400.0, 300.0);
    assert!(player.take_hit(1_000, 500));
    assert!(player.is_invulnerable(1_500));
    assert!(!player.take_hit(1_200, 500));
    assert_eq!(player.health, 2);

    // Expires on the first frame after the window
    player.steer(Controls::default(), &field(), 1_501);
    assert_eq!(player.invulnerable_until, None);
    assert!(player.take_hit(1_501, 500));
    assert_eq!(player.health, 1);
}

#[test]
fn health_never_goes_below_zero() {
    let mut player = player_at(400.0, 300.0);
    player.health = 0;
    assert!(!player.take_hit(0, 0));
    assert_eq!(player.health, 0);
}

#[test]
fn endless_invulnerability_saturates() {
    let mut player = player_at(400.0, 300.0);
    player.make_invulnerable(5_000, u64::MAX);
    assert_eq!(player.invulnerable_until, Some(u64::MAX));
    assert!(player.is_invulnerable(u64::MAX));
}

// ── Explosion ─────────────────────────────────────────────────────────────────

#[test]
fn explosion_lives_exactly_frames_times_frame_time() {
    for (frames, frame_time) in [(1, 1), (6, 4), (3, 7)] {
        let mut explosion = Explosion::new(0.0, 0.0, frames, frame_time);
        let total = frames as u32 * frame_time;
        for call in 1..total {
            explosion.advance();
            assert!(explosion.alive, "died early at call {call} of {total}");
        }
        explosion.advance();
        assert!(!explosion.alive);
        assert_eq!(explosion.current_frame(), None);
    }
}

#[test]
fn explosion_steps_through_frames_in_order() {
    let mut explosion = Explosion::new(0.0, 0.0, 3, 2);
    let mut seen = Vec::new();
    while let Some(frame) = explosion.current_frame() {
        seen.push(frame);
        explosion.advance();
    }
    assert_eq!(seen, vec![0, 0, 1, 1, 2, 2]);

    // Finished explosions stay finished
    explosion.advance();
    assert!(!explosion.alive);
}

#[test]
fn explosion_without_frames_starts_dead() {
    let explosion = Explosion::new(0.0, 0.0, 0, 4);
    assert!(!explosion.alive);
}

// ── Pool ──────────────────────────────────────────────────────────────────────

#[test]
fn sweep_is_idempotent() {
    let mut pool = Pool::new();
    for i in 0..6 {
        let mut explosion = Explosion::new(i as f32, 0.0, 2, 1);
        explosion.alive = i % 2 == 0;
        pool.insert(explosion);
    }

    assert_eq!(pool.sweep(), 3);
    let first: Vec<f32> = pool.iter().map(|e| e.x).collect();
    assert_eq!(pool.sweep(), 0);
    let second: Vec<f32> = pool.iter().map(|e| e.x).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![0.0, 2.0, 4.0]);
}

#[test]
fn empty_pool_sweeps_cleanly() {
    let mut pool: Pool<Bullet> = Pool::new();
    assert!(pool.is_empty());
    assert_eq!(pool.sweep(), 0);
}

// ── Starfield ─────────────────────────────────────────────────────────────────

#[test]
fn stars_wrap_to_top() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut stars = Starfield::new(20, &field(), &mut rng);
    assert_eq!(stars.stars.len(), 20);
    for star in &stars.stars {
        assert!((1..=3).contains(&star.size));
        assert!((0.5..2.0).contains(&star.speed));
    }

    stars.stars[0].y = 639.9;
    stars.stars[0].speed = 1.0;
    stars.update(&mut rng);
    assert_eq!(stars.stars[0].y, 0.0);
    assert!((0.0..=800.0).contains(&stars.stars[0].x));
}
