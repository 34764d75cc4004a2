//! Rigid circular body

use std::f64::consts::PI;

use super::{Color, Point, Velocity};
use crate::renderer::Painter;

/// A moving, collidable ball
///
/// Radius is fixed at construction; mass is always derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    velocity: Velocity,
    center: Point,
    radius: f64,
    color: Color,
    collidable: bool,
}

impl Ball {
    pub fn new(velocity: Velocity, center: Point, radius: f64, color: Color, collidable: bool) -> Self {
        Self {
            velocity,
            center,
            radius,
            color,
            collidable,
        }
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Uniform density: mass equals the volume of a sphere of this radius
    pub fn mass(&self) -> f64 {
        sphere_volume(self.radius)
    }

    pub fn collidable(&self) -> bool {
        self.collidable
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        painter.draw_circle(self.center, self.radius, self.color);
    }
}

#[inline]
pub(crate) fn sphere_volume(radius: f64) -> f64 {
    4.0 / 3.0 * PI * radius.powi(3)
}
