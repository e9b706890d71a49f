/// Scrolling starfield drawn behind every screen.
use rand::Rng;

use crate::entities::Playfield;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// 1 (faint) to 3 (bright).
    pub size: u8,
}

#[derive(Clone, Debug, Default)]
pub struct Starfield {
    pub stars: Vec<Star>,
    width: f32,
    height: f32,
}

impl Starfield {
    pub fn new(count: usize, field: &Playfield, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: rng.gen_range(0.0..=field.width),
                y: rng.gen_range(0.0..=field.height),
                speed: rng.gen_range(0.5..2.0),
                size: rng.gen_range(1..=3),
            })
            .collect();
        Self {
            stars,
            width: field.width,
            height: field.height,
        }
    }

    /// Drift every star down; stars leaving the bottom re-enter at the top
    /// in a new column.
    pub fn update(&mut self, rng: &mut impl Rng) {
        for star in &mut self.stars {
            star.y += star.speed;
            if star.y > self.height {
                star.y = 0.0;
                star.x = rng.gen_range(0.0..=self.width);
            }
        }
    }
}
