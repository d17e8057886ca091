//! Value types shared across the host boundary
//!
//! Positions and sizes are in screen pixels (floats), colors are straight
//! RGBA floats in 0..1. Both convert into the vector types imgui takes.

use imgui::sys;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// 2D vector in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(v: [f32; 2]) -> Self {
        Vec2::new(v[0], v[1])
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

impl From<sys::ImVec2> for Vec2 {
    fn from(v: sys::ImVec2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

impl From<Vec2> for sys::ImVec2 {
    fn from(v: Vec2) -> Self {
        sys::ImVec2::new(v.x, v.y)
    }
}

/// RGBA color with float channels in 0..1
///
/// Serialized as a plain `[r, g, b, a]` array so config files stay terse.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct ColorF {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorF {
    pub const TRANSPARENT: ColorF = ColorF::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: ColorF = ColorF::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        ColorF { r, g, b, a }
    }

    /// Same value on all three color channels
    pub const fn grey(v: f32, a: f32) -> Self {
        ColorF::new(v, v, v, a)
    }
}

impl From<[f32; 4]> for ColorF {
    fn from(c: [f32; 4]) -> Self {
        ColorF::new(c[0], c[1], c[2], c[3])
    }
}

impl From<ColorF> for [f32; 4] {
    fn from(c: ColorF) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

impl From<ColorF> for sys::ImVec4 {
    fn from(c: ColorF) -> Self {
        sys::ImVec4::new(c.r, c.g, c.b, c.a)
    }
}

/// Hashed widget identity, derived from a label and the window it lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u32);

/// Handle to a font registered with the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_deserializes_from_array() {
        let c: ColorF = serde_json::from_str("[1.0, 0.5, 0.0, 0.25]").unwrap();
        assert_eq!(c, ColorF::new(1.0, 0.5, 0.0, 0.25));
        assert_eq!(serde_json::to_string(&c).unwrap(), "[1.0,0.5,0.0,0.25]");
    }

    #[test]
    fn test_short_color_array_is_rejected() {
        let result: Result<ColorF, _> = serde_json::from_str("[1.0, 0.5]");
        assert!(result.is_err());
    }

    #[test]
    fn test_vec2_converts_to_imgui_vectors() {
        let v = Vec2::new(3.0, 4.0) - Vec2::new(1.0, 1.0);
        let raw: sys::ImVec2 = v.into();
        assert_eq!((raw.x, raw.y), (2.0, 3.0));
        assert_eq!(<[f32; 2]>::from(v + Vec2::ZERO), [2.0, 3.0]);
        assert_eq!(Vec2::from([5.0, 6.0]), Vec2::new(5.0, 6.0));
    }
}
