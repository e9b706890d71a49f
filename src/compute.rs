/// Session game logic.
///
/// `tick` advances a `GameSession` by exactly one frame.  Randomness comes
/// through the injected RNG and time through `now_ms`, so tests drive it
/// with a seeded RNG and a fake clock.
use rand::Rng;

use crate::collision;
use crate::config::Rules;
use crate::entities::{
    Body, Bullet, BulletOwner, Controls, Death, Explosion, GameSession, Player, Playfield,
    SoundCue,
};
use crate::pool::Pool;
use crate::spawner::Spawner;
use crate::stars::Starfield;

const SESSION_STARS: usize = 50;

/// What a frame produced besides the new state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub cues: Vec<SoundCue>,
    pub death: Option<Death>,
}

// ── Constructor ──────────────────────────────────────────────────────────────

/// Fresh session: full health, no score, empty pools.  The player starts
/// centred just above the bottom edge.
pub fn new_session(
    rules: &Rules,
    playfield: Playfield,
    high_score: u32,
    explosion_frames: usize,
    rng: &mut impl Rng,
) -> GameSession {
    let player = Player {
        body: Body::new(playfield.width / 2.0, playfield.height - 50.0, rules.player_size),
        health: rules.initial_health,
        speed: rules.player_speed,
        invulnerable_until: None,
    };

    GameSession {
        player,
        player_bullets: Pool::new(),
        enemy_bullets: Pool::new(),
        enemies: Pool::new(),
        explosions: Pool::new(),
        spawner: Spawner::new(rules.spawn_interval, rules.spawn_margin),
        stars: Starfield::new(SESSION_STARS, &playfield, rng),
        score: 0,
        high_score,
        frame: 0,
        explosion_frames,
        playfield,
        rules: rules.clone(),
        death: None,
    }
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Fire one bullet from the nose of the ship.
pub fn player_shoot(session: &mut GameSession) -> Option<SoundCue> {
    if session.death.is_some() {
        return None;
    }
    let nose = &session.player.body;
    let body = Body::new(nose.x, nose.top(), session.rules.player_bullet_size)
        .with_velocity(0.0, session.rules.player_bullet_speed);
    session.player_bullets.insert(Bullet {
        body,
        owner: BulletOwner::Player,
    });
    Some(SoundCue::Shoot)
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the session by one frame.  Once the player has died the session
/// is frozen and every further call just repeats the death.
pub fn tick(
    session: &mut GameSession,
    controls: Controls,
    rng: &mut impl Rng,
    now_ms: u64,
) -> FrameReport {
    let mut report = FrameReport::default();
    if session.death.is_some() {
        report.death = session.death;
        return report;
    }
    session.frame += 1;
    let field = session.playfield;

    // ── 1. Spawn ─────────────────────────────────────────────────────────────
    if let Some(enemy) = session.spawner.tick(&field, &session.rules, rng) {
        session.enemies.insert(enemy);
    }

    // ── 2. Move everything ───────────────────────────────────────────────────
    session.player.steer(controls, &field, now_ms);
    for bullet in session.player_bullets.iter_mut() {
        bullet.update(&field);
    }
    for bullet in session.enemy_bullets.iter_mut() {
        bullet.update(&field);
    }
    let mut shots = Vec::new();
    for enemy in session.enemies.iter_mut() {
        enemy.update(&field);
        if let Some(shot) = enemy.tick_fire(&session.rules) {
            shots.push(shot);
        }
    }
    for shot in shots {
        session.enemy_bullets.insert(shot);
    }
    for explosion in session.explosions.iter_mut() {
        explosion.advance();
    }
    session.stars.update(rng);

    // ── 3. Collisions: bullets first, then the ship ──────────────────────────
    let kills = collision::bullets_vs_enemies(&mut session.player_bullets, &mut session.enemies);
    for (x, y) in kills {
        session.score += session.rules.score_per_kill;
        spawn_explosion(session, x, y);
        report.cues.push(SoundCue::Explosion);
    }

    // Every touching enemy and bullet is destroyed, but the ship takes at
    // most one point of damage and one explosion per frame.
    let rams = collision::player_vs_enemies(&session.player, &mut session.enemies);
    let hits = collision::enemy_bullets_vs_player(&session.player, &mut session.enemy_bullets);
    if rams + hits > 0 {
        session
            .player
            .take_hit(now_ms, session.rules.invulnerability_ms);
        let (x, y) = (session.player.body.x, session.player.body.y);
        spawn_explosion(session, x, y);
        report.cues.push(SoundCue::Explosion);
        tracing::debug!(
            frame = session.frame,
            rams,
            hits,
            health = session.player.health,
            "player hit"
        );
    }

    // ── 4. Death ─────────────────────────────────────────────────────────────
    if session.player.health == 0 {
        let death = Death {
            final_score: session.score,
            high_score: session.high_score.max(session.score),
        };
        session.high_score = death.high_score;
        session.death = Some(death);
        report.death = Some(death);
        tracing::info!(
            final_score = death.final_score,
            high_score = death.high_score,
            frames = session.frame,
            "player died"
        );
    }

    // ── 5. Sweep ─────────────────────────────────────────────────────────────
    session.player_bullets.sweep();
    session.enemy_bullets.sweep();
    session.enemies.sweep();
    session.explosions.sweep();

    report
}

fn spawn_explosion(session: &mut GameSession, x: f32, y: f32) {
    session.explosions.insert(Explosion::new(
        x,
        y,
        session.explosion_frames,
        session.rules.explosion_frame_time,
    ));
}
