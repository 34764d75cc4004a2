//! Rendering contract
//!
//! The simulation never touches pixels. It issues primitive draw calls to a
//! `Painter`; hosts decide what a circle or rectangle becomes.

pub mod shapes;
pub mod vertex;

pub use shapes::MeshPainter;
pub use vertex::Vertex;

use crate::sim::{Color, Point};

/// Receiver of primitive draw calls
pub trait Painter {
    fn draw_circle(&mut self, center: Point, radius: f64, color: Color);
    fn draw_rectangle(&mut self, top_left: Point, bottom_right: Point, color: Color);
}

/// A single recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
    Rectangle {
        top_left: Point,
        bottom_right: Point,
        color: Color,
    },
}

/// Painter that keeps every call in order (headless hosts, tests)
#[derive(Debug, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Painter for CommandRecorder {
    fn draw_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_rectangle(&mut self, top_left: Point, bottom_right: Point, color: Color) {
        self.commands.push(DrawCommand::Rectangle {
            top_left,
            bottom_right,
            color,
        });
    }
}
