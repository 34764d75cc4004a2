//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (insertion order of balls and dust)
//! - No rendering or platform dependencies beyond the `Painter` trait

pub mod ball;
pub mod color;
pub mod dust;
pub mod physics;
pub mod velocity;
pub mod world;

pub use ball::Ball;
pub use color::Color;
pub use dust::Dust;
pub use physics::{Physics, TickReport};
pub use velocity::Velocity;
pub use world::World;

/// A 2D position or free vector
pub type Point = glam::DVec2;
