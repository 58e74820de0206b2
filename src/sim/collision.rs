//! Collision shapes and tests for the room
//!
//! Everything collides as a circle: the slime head, the prey. The room is an
//! axis-aligned rectangle in screen space (+Y down), so "top" is the smallest
//! Y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{DOWN, LEFT, RIGHT, UP};

/// Circular bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.radius
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.radius
    }

    /// Overlap test; touching edges do not count
    pub fn intersects(&self, other: &Circle) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) < reach * reach
    }
}

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom
    pub fn deflate(&self, dx: f32, dy: f32) -> Self {
        Self {
            min: self.min + Vec2::new(dx, dy),
            max: self.max - Vec2::new(dx, dy),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }
}

/// Walls a circle pokes through, each as the normal pointing back inside.
///
/// At most one vertical and one horizontal wall; top wins over bottom and
/// left over right when the circle is larger than the room.
pub fn wall_contacts(circle: &Circle, room: &Rect) -> (Option<Vec2>, Option<Vec2>) {
    let vertical = if circle.top() < room.min.y {
        Some(DOWN)
    } else if circle.bottom() > room.max.y {
        Some(UP)
    } else {
        None
    };

    let horizontal = if circle.left() < room.min.x {
        Some(RIGHT)
    } else if circle.right() > room.max.x {
        Some(LEFT)
    } else {
        None
    };

    (vertical, horizontal)
}

/// Whether any part of the circle lies outside the room
pub fn circle_leaves_room(circle: &Circle, room: &Rect) -> bool {
    let (vertical, horizontal) = wall_contacts(circle, room);
    vertical.is_some() || horizontal.is_some()
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
