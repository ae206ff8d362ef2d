//! Axis-aligned rectangle geometry and collision primitives
//!
//! Everything on the play field (paddle, ball, blocks) is an AABB in screen
//! space: x grows to the right, y grows downward.

use glam::Vec2;

use crate::consts::SIDE_THRESHOLD;

/// An axis-aligned box in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Move the box by a displacement
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }
}

/// Strict AABB overlap test
///
/// Boxes that only share an edge do not intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Face of a target rectangle struck by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Ball came down onto the top face
    Top,
    /// Ball came up into the bottom face
    Bottom,
    /// Ball moved right into the left face
    Left,
    /// Ball moved left into the right face
    Right,
}

impl Side {
    /// Reflect the velocity component normal to this face
    #[inline]
    pub fn reflect(self, vel: Vec2) -> Vec2 {
        match self {
            Side::Top | Side::Bottom => Vec2::new(vel.x, -vel.y),
            Side::Left | Side::Right => Vec2::new(-vel.x, vel.y),
        }
    }
}

/// Decide which face of `target` the ball struck
///
/// A face is a candidate only when the facing ball edge is within
/// `SIDE_THRESHOLD` of it and the ball is moving toward it. Candidates are
/// checked in fixed priority order (top, bottom, left, right face) and the
/// first match wins; this is not a minimum-penetration resolution, so corner
/// hits always resolve vertically when both axes qualify.
pub fn struck_side(ball: &Rect, vel: Vec2, target: &Rect) -> Option<Side> {
    if (ball.bottom() - target.top()).abs() < SIDE_THRESHOLD && vel.y > 0.0 {
        Some(Side::Top)
    } else if (ball.top() - target.bottom()).abs() < SIDE_THRESHOLD && vel.y < 0.0 {
        Some(Side::Bottom)
    } else if (ball.right() - target.left()).abs() < SIDE_THRESHOLD && vel.x > 0.0 {
        Some(Side::Left)
    } else if (ball.left() - target.right()).abs() < SIDE_THRESHOLD && vel.x < 0.0 {
        Some(Side::Right)
    } else {
        None
    }
}
