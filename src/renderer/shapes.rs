//! Shape generation for 2D primitives
//!
//! `MeshPainter` turns draw calls into triangle lists ready for upload.

use glam::Vec2;
use std::f32::consts::PI;

use super::Painter;
use super::vertex::Vertex;
use crate::sim::{Color, Point};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an axis-aligned filled quad
fn quad(min: Vec2, max: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a rectangle outline drawn inside its bounds
pub fn rectangle_outline(top_left: Vec2, bottom_right: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness;
    let (min, max) = (top_left, bottom_right);

    let mut vertices = Vec::with_capacity(24);
    // Top, bottom, left, right edges
    vertices.extend(quad(min, Vec2::new(max.x, min.y + t), color));
    vertices.extend(quad(Vec2::new(min.x, max.y - t), max, color));
    vertices.extend(quad(Vec2::new(min.x, min.y + t), Vec2::new(min.x + t, max.y - t), color));
    vertices.extend(quad(Vec2::new(max.x - t, min.y + t), Vec2::new(max.x, max.y - t), color));
    vertices
}

/// Painter that accumulates a triangle list
#[derive(Debug, Clone)]
pub struct MeshPainter {
    pub vertices: Vec<Vertex>,
    /// Triangles per circle
    pub circle_segments: u32,
    /// Width of rectangle outlines
    pub line_width: f32,
}

impl Default for MeshPainter {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            circle_segments: 24,
            line_width: 2.0,
        }
    }
}

impl MeshPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame, keeping the allocation
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Packed vertex buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl Painter for MeshPainter {
    fn draw_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.vertices.extend(circle(
            center.as_vec2(),
            radius as f32,
            color.to_rgba(),
            self.circle_segments,
        ));
    }

    fn draw_rectangle(&mut self, top_left: Point, bottom_right: Point, color: Color) {
        self.vertices.extend(rectangle_outline(
            top_left.as_vec2(),
            bottom_right.as_vec2(),
            self.line_width,
            color.to_rgba(),
        ));
    }
}
