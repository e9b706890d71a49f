use crate::entities::Explosion;
use crate::pool::Alive;

impl Explosion {
    pub fn new(x: f32, y: f32, frames: usize, frame_time: u32) -> Self {
        Self {
            x,
            y,
            frames,
            index: 0,
            timer: 0,
            frame_time: frame_time.max(1),
            alive: frames > 0,
        }
    }

    /// One frame of playback.  After `frames * frame_time` calls the
    /// explosion is dead; it never restarts.
    pub fn advance(&mut self) {
        if !self.alive {
            return;
        }
        self.timer += 1;
        if self.timer >= self.frame_time {
            self.timer = 0;
            self.index += 1;
            if self.index >= self.frames {
                self.alive = false;
            }
        }
    }

    /// Index into the sprite sheet, or `None` once finished.
    pub fn current_frame(&self) -> Option<usize> {
        self.alive.then_some(self.index)
    }
}

impl Alive for Explosion {
    fn is_alive(&self) -> bool {
        self.alive
    }
}
