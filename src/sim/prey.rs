//! Prey ("bats") that wander the room
//!
//! A prey flies in a straight line, bouncing off walls, until the slime eats
//! it. Some respawns turn golden: faster and worth double for a few seconds.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, reflect_velocity};
use crate::SpriteSize;
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prey {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub vel: Vec2,
    /// Difficulty scaling applied on top of the base speed
    pub speed_multiplier: f32,
    pub golden: bool,
    /// Seconds of golden time left
    pub golden_timer: f32,
}

impl Prey {
    pub fn new(speed_multiplier: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            speed_multiplier,
            golden: false,
            golden_timer: 0.0,
        }
    }

    /// Speed for the current golden state
    pub fn speed(&self) -> f32 {
        let speed = PREY_SPEED * self.speed_multiplier;
        if self.golden {
            speed * GOLDEN_SPEED_MULTIPLIER
        } else {
            speed
        }
    }

    /// Pick a new random heading, possibly turning golden
    pub fn randomize_velocity<R: Rng>(&mut self, rng: &mut R) {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let direction = Vec2::from_angle(angle);

        if rng.random::<f32>() < GOLDEN_CHANCE {
            self.golden = true;
            self.golden_timer = GOLDEN_DURATION;
        } else {
            self.golden = false;
            self.golden_timer = 0.0;
        }

        self.vel = direction * self.speed();
    }

    /// Count down golden time and fly
    pub fn update(&mut self, dt: f32) {
        if self.golden {
            self.golden_timer -= dt;
            if self.golden_timer <= 0.0 {
                self.golden = false;
                self.golden_timer = 0.0;
                // Same heading, normal speed
                self.vel = self.vel.normalize_or_zero() * self.speed();
            }
        }

        self.pos += self.vel * dt;
    }

    /// Push off a wall whose inward normal is `normal`
    pub fn bounce(&mut self, normal: Vec2, sprite: SpriteSize) {
        self.pos += normal * Vec2::new(sprite.width, sprite.height) * 0.1;
        self.vel = reflect_velocity(self.vel, normal.normalize());
    }

    /// Circle centered on the sprite, a quarter of its width across
    pub fn bounds(&self, sprite: SpriteSize) -> Circle {
        Circle::new(self.pos + sprite.half_extent(), sprite.width * 0.25)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LEFT, RIGHT};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SPRITE: SpriteSize = SpriteSize::new(64.0, 64.0);

    #[test]
    fn test_randomize_velocity_speed() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut prey = Prey::new(1.0);
        for _ in 0..50 {
            prey.randomize_velocity(&mut rng);
            let expected = if prey.golden { 600.0 } else { 300.0 };
            assert!((prey.vel.length() - expected).abs() < 0.01);
        }
    }

    #[test]
    fn test_golden_expires_to_normal_speed() {
        let mut prey = Prey::new(2.0);
        prey.golden = true;
        prey.golden_timer = 0.05;
        prey.vel = RIGHT * prey.speed();
        assert!((prey.vel.length() - 1200.0).abs() < 0.01);

        prey.update(0.1);
        assert!(!prey.golden);
        assert!((prey.vel - RIGHT * 600.0).length() < 0.01);
        assert!((prey.pos.x - 60.0).abs() < 0.01);
    }

    #[test]
    fn test_bounce_reflects_and_nudges() {
        let mut prey = Prey::new(1.0);
        prey.pos = Vec2::new(100.0, 100.0);
        prey.vel = Vec2::new(300.0, 50.0);

        prey.bounce(LEFT, SPRITE);
        assert!((prey.pos - Vec2::new(93.6, 100.0)).length() < 1e-3);
        assert!((prey.vel - Vec2::new(-300.0, 50.0)).length() < 1e-3);
    }

    #[test]
    fn test_bounds() {
        let mut prey = Prey::new(1.0);
        prey.pos = Vec2::new(10.0, 20.0);
        let bounds = prey.bounds(SPRITE);
        assert_eq!(bounds.center, Vec2::new(42.0, 52.0));
        assert_eq!(bounds.radius, 16.0);
    }
}
