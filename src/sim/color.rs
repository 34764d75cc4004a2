//! RGB color, consumed only by rendering

use serde::{Deserialize, Serialize};

/// Color channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// RGBA for GPU vertices (opaque)
    pub fn to_rgba(self) -> [f32; 4] {
        [self.r as f32, self.g as f32, self.b as f32, 1.0]
    }
}
