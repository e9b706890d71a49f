/// Entity creation: the periodic enemy spawner and enemy fire.
///
/// Randomness always comes through the caller's RNG so a seeded generator
/// replays the same waves.
use rand::Rng;

use crate::config::Rules;
use crate::entities::{Body, Bullet, BulletOwner, Enemy, Playfield};

#[derive(Clone, Debug, PartialEq)]
pub struct Spawner {
    /// Frames since the last spawn.
    pub counter: u32,
    pub interval: u32,
    /// Keeps spawns this far from either side wall.
    pub margin: f32,
}

impl Spawner {
    pub fn new(interval: u32, margin: f32) -> Self {
        Self {
            counter: 0,
            interval: interval.max(1),
            margin,
        }
    }

    /// Count one frame; every `interval` frames return a fresh enemy.
    pub fn tick(&mut self, field: &Playfield, rules: &Rules, rng: &mut impl Rng) -> Option<Enemy> {
        self.counter += 1;
        if self.counter < self.interval {
            return None;
        }
        self.counter = 0;

        let lo = self.margin;
        let hi = field.width - self.margin;
        let x = if lo < hi {
            rng.gen_range(lo..=hi)
        } else {
            field.width / 2.0
        };
        let enemy = spawn_enemy(x, rules, rng);
        tracing::trace!(x, "enemy spawned");
        Some(enemy)
    }
}

/// Build an enemy at `x`, just above the visible area.
pub fn spawn_enemy(x: f32, rules: &Rules, rng: &mut impl Rng) -> Enemy {
    let drift = if rules.enemy_drift > 0.0 {
        rng.gen_range(-rules.enemy_drift..=rules.enemy_drift)
    } else {
        0.0
    };
    let (lo, hi) = rules.enemy_shoot_interval;
    let shoot_interval = if lo <= hi { rng.gen_range(lo..=hi) } else { lo };

    Enemy {
        body: Body::new(x, rules.spawn_y, rules.enemy_size).with_velocity(drift, rules.enemy_speed),
        shoot_timer: 0,
        shoot_interval: shoot_interval.max(1),
    }
}

impl Enemy {
    /// Count one frame towards the next shot.  Enemies hold fire until they
    /// are on screen.
    pub fn tick_fire(&mut self, rules: &Rules) -> Option<Bullet> {
        if !self.body.alive {
            return None;
        }
        self.shoot_timer += 1;
        if self.shoot_timer < self.shoot_interval {
            return None;
        }
        self.shoot_timer = 0;
        if self.body.bottom() <= 0.0 {
            return None;
        }

        let body = Body::new(self.body.x, self.body.bottom(), rules.enemy_bullet_size)
            .with_velocity(0.0, rules.enemy_bullet_speed);
        Some(Bullet {
            body,
            owner: BulletOwner::Enemy,
        })
    }
}
