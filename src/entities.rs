/// All game entity types: pure data, no logic.
///
/// Positions are logical playfield units (the playfield is 800×640), not
/// terminal cells; the renderer scales them onto whatever terminal it gets.
use crate::config::{Rules, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::pool::Pool;
use crate::spawner::Spawner;
use crate::stars::Starfield;

// ── Playfield ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

// ── Kinematic body ────────────────────────────────────────────────────────────

/// Axis-aligned bounding box with a velocity.  `x`/`y` is the box centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Units per frame.
    pub vx: f32,
    pub vy: f32,
    pub alive: bool,
}

impl Body {
    pub fn new(x: f32, y: f32, (w, h): (f32, f32)) -> Self {
        Self {
            x,
            y,
            w,
            h,
            vx: 0.0,
            vy: 0.0,
            alive: true,
        }
    }

    pub fn with_velocity(self, vx: f32, vy: f32) -> Self {
        Self { vx, vy, ..self }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub body: Body,
    pub owner: BulletOwner,
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    /// `vy` is the descent speed, `vx` the lateral drift (may be zero).
    pub body: Body,
    /// Frames since the last shot.
    pub shoot_timer: u32,
    /// Frames between shots, rolled once per spawn.
    pub shoot_interval: u32,
}

// ── Explosion ─────────────────────────────────────────────────────────────────

/// Sprite-sheet playback.  Never collides and is never removed from outside:
/// it flags itself dead once the last frame has been shown.
#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    /// Number of frames in the sheet.
    pub frames: usize,
    pub index: usize,
    pub timer: u32,
    /// Advances per frame of the sheet.
    pub frame_time: u32,
    pub alive: bool,
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    pub health: u32,
    pub speed: f32,
    /// Milliseconds-since-start at which invulnerability wears off.
    pub invulnerable_until: Option<u64>,
}

/// Directional keys held during a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Shoot,
    Explosion,
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Death {
    pub final_score: u32,
    pub high_score: u32,
}

/// One play-through, from entering the Playing screen to death or quit.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub player_bullets: Pool<Bullet>,
    pub enemy_bullets: Pool<Bullet>,
    pub enemies: Pool<Enemy>,
    pub explosions: Pool<Explosion>,
    pub spawner: Spawner,
    pub stars: Starfield,
    pub score: u32,
    /// Best score known when the session started, raised on death.
    pub high_score: u32,
    pub frame: u64,
    pub explosion_frames: usize,
    pub playfield: Playfield,
    pub rules: Rules,
    pub death: Option<Death>,
}
