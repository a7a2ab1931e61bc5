//! Linear RGB color

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul};

/// A linear RGB color with `f32` channels, nominally in `[0, 1]`.
///
/// Channels are allowed to leave that range while lighting is accumulated;
/// clamping happens when the color is quantized.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    /// Create a new color
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// A gray with all three channels set to `v`
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Multiply every channel by `s`
    pub fn scale(self, s: f32) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s)
    }

    /// Component-wise product
    pub fn modulate(self, other: Color) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    /// Clamp every channel into `[0, 1]`
    pub fn clamp(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    /// Quantize to 8-bit channels
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = self.clamp();
        [quantize(c.r), quantize(c.g), quantize(c.b)]
    }

    /// Whether every channel is a finite number
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    // NaN clamps to 0 via the saturating cast
    (v * 255.0).round() as u8
}

impl From<[f32; 3]> for Color {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Color> for [f32; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

impl Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        self.r += rhs.r;
        self.g += rhs.g;
        self.b += rhs.b;
    }
}

impl Mul<f32> for Color {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul for Color {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.modulate(rhs)
    }
}
