//! Overlap tests between circles and axis-aligned rectangles
//!
//! Pure functions, no state. Either argument may be absent (an entity that does not
//! exist this tick); absent arguments never collide.

use serde::{Deserialize, Serialize};

use crate::util::vec2::Vec2;

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Nearest point of the rectangle to the circle centre lies strictly inside the circle
pub fn circle_intersects_rect(circle: Option<Circle>, rect: Option<Rect>) -> bool {
    let (Some(circle), Some(rect)) = (circle, rect) else {
        return false;
    };
    let nearest = circle.center.clamp(rect.min(), rect.max());
    circle.center.distance_sq_to(nearest) < circle.radius * circle.radius
}

/// Strict four-way overlap; touching edges do not count
pub fn rect_intersects_rect(a: Option<Rect>, b: Option<Rect>) -> bool {
    let (Some(a), Some(b)) = (a, b) else {
        return false;
    };
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
