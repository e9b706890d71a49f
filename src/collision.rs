/// Pairwise AABB collision passes.
///
/// Passes only flag entities dead and report what happened; scoring,
/// damage and explosions are applied by the caller.  Dead entities are
/// skipped, so a bullet destroys at most one enemy and an enemy can only
/// be destroyed once per frame.
use crate::entities::{Bullet, Enemy, Player};
use crate::pool::Pool;

/// Player bullets against enemies.  Returns the centres of destroyed enemies.
pub fn bullets_vs_enemies(bullets: &mut Pool<Bullet>, enemies: &mut Pool<Enemy>) -> Vec<(f32, f32)> {
    let mut kills = Vec::new();

    for bullet in bullets.iter_mut() {
        if !bullet.body.alive {
            continue;
        }
        for enemy in enemies.iter_mut() {
            if enemy.body.alive && bullet.body.intersects(&enemy.body) {
                bullet.body.alive = false;
                enemy.body.alive = false;
                kills.push((enemy.body.x, enemy.body.y));
                break;
            }
        }
    }

    kills
}

/// Enemies ramming the player.  Every enemy touching the ship is destroyed;
/// returns how many.
pub fn player_vs_enemies(player: &Player, enemies: &mut Pool<Enemy>) -> u32 {
    let mut rams = 0;
    for enemy in enemies.iter_mut() {
        if enemy.body.alive && enemy.body.intersects(&player.body) {
            enemy.body.alive = false;
            rams += 1;
        }
    }
    rams
}

/// Enemy bullets striking the player.  Returns how many hit.
pub fn enemy_bullets_vs_player(player: &Player, bullets: &mut Pool<Bullet>) -> u32 {
    let mut hits = 0;
    for bullet in bullets.iter_mut() {
        if bullet.body.alive && bullet.body.intersects(&player.body) {
            bullet.body.alive = false;
            hits += 1;
        }
    }
    hits
}
