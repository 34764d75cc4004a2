//! Short-lived decorative particle

use super::{Color, Point, Velocity};
use crate::renderer::Painter;

/// A dust particle
///
/// Never tested for collisions. Once dead it stays dead.
#[derive(Debug, Clone, PartialEq)]
pub struct Dust {
    velocity: Velocity,
    center: Point,
    radius: f64,
    color: Color,
    collidable: bool,
    /// Simulation seconds left before the particle dies
    lifetime: f64,
    alive: bool,
}

impl Dust {
    pub fn new(
        velocity: Velocity,
        center: Point,
        radius: f64,
        color: Color,
        collidable: bool,
        lifetime: f64,
    ) -> Self {
        Self {
            velocity,
            center,
            radius,
            color,
            collidable,
            lifetime,
            alive: true,
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

    pub fn collidable(&self) -> bool {
        self.collidable
    }

    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    /// Count down the remaining lifetime, dying at or below zero
    pub fn age(&mut self, dt: f64) {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.alive = false;
        }
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        painter.draw_circle(self.center, self.radius, self.color);
    }
}
