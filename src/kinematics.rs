/// Per-frame motion: `position += velocity`, bounds policy, player steering.
use crate::entities::{Body, Bullet, BulletOwner, Controls, Enemy, Player, Playfield};
use crate::pool::Alive;

impl Body {
    /// Move by `dt_frames` frames of the current velocity.
    pub fn advance(&mut self, dt_frames: u32) {
        let dt = dt_frames as f32;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }

    pub fn left(&self) -> f32 {
        self.x - self.w / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.h / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Strict overlap: boxes that only share an edge do not touch.
    pub fn intersects(&self, other: &Body) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Keep the box inside the playfield.  Each axis is handled on its own,
    /// so sliding along an edge or into a corner works.
    pub fn clamp_to(&mut self, field: &Playfield) {
        let half_w = self.w / 2.0;
        let half_h = self.h / 2.0;
        if self.left() < 0.0 {
            self.x = half_w;
        } else if self.right() > field.width {
            self.x = field.width - half_w;
        }
        if self.top() < 0.0 {
            self.y = half_h;
        } else if self.bottom() > field.height {
            self.y = field.height - half_h;
        }
    }
}

// ── Bullets ───────────────────────────────────────────────────────────────────

impl Bullet {
    pub fn update(&mut self, field: &Playfield) {
        if !self.body.alive {
            return;
        }
        self.body.advance(1);
        let gone = match self.owner {
            BulletOwner::Player => self.body.bottom() < 0.0,
            BulletOwner::Enemy => self.body.top() > field.height,
        };
        if gone {
            self.body.alive = false;
        }
    }
}

impl Alive for Bullet {
    fn is_alive(&self) -> bool {
        self.body.alive
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

impl Enemy {
    /// Descend, bounce off the side walls, and die below the playfield.
    pub fn update(&mut self, field: &Playfield) {
        if !self.body.alive {
            return;
        }
        self.body.advance(1);

        let body = &mut self.body;
        if body.left() < 0.0 {
            body.x = body.w / 2.0;
            body.vx = body.vx.abs();
        } else if body.right() > field.width {
            body.x = field.width - body.w / 2.0;
            body.vx = -body.vx.abs();
        }

        if body.top() > field.height {
            body.alive = false;
        }
    }
}

impl Alive for Enemy {
    fn is_alive(&self) -> bool {
        self.body.alive
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

impl Player {
    /// Apply held keys for one frame and clamp to the playfield.
    pub fn steer(&mut self, controls: Controls, field: &Playfield, now_ms: u64) {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        self.body.vx = axis(controls.left, controls.right) * self.speed;
        self.body.vy = axis(controls.up, controls.down) * self.speed;
        self.body.advance(1);
        self.body.clamp_to(field);

        if self.invulnerable_until.is_some_and(|until| now_ms > until) {
            self.invulnerable_until = None;
        }
    }

    pub fn is_invulnerable(&self, now_ms: u64) -> bool {
        self.invulnerable_until.is_some_and(|until| now_ms <= until)
    }

    pub fn make_invulnerable(&mut self, now_ms: u64, duration_ms: u64) {
        self.invulnerable_until = Some(now_ms.saturating_add(duration_ms));
    }

    /// Take one point of damage unless invulnerable.  A damaging hit opens
    /// a new invulnerability window when `invulnerability_ms` is non-zero.
    /// Returns whether health was lost.
    pub fn take_hit(&mut self, now_ms: u64, invulnerability_ms: u64) -> bool {
        if self.is_invulnerable(now_ms) || self.health == 0 {
            return false;
        }
        self.health -= 1;
        if invulnerability_ms > 0 {
            self.make_invulnerable(now_ms, invulnerability_ms);
        }
        true
    }
}
