//! Dustbox - a 2D bouncing-ball world
//!
//! Core modules:
//! - `sim`: Deterministic fixed-step physics (balls, dust, collisions, world driver)
//! - `scene`: Loading initial scenes (text, JSON, seeded random)
//! - `settings`: Data-driven simulation constants
//! - `renderer`: Draw-call contract plus a CPU vertex builder

pub mod renderer;
pub mod scene;
pub mod settings;
pub mod sim;

pub use scene::{BallSpec, Scene, SceneError};
pub use settings::{DustSettings, SettingsError, SimSettings};
pub use sim::{Ball, Color, Dust, Physics, Point, TickReport, Velocity, World};

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (1 kHz)
    pub const TIME_PER_TICK: f64 = 0.001;

    /// Particles emitted per collision event
    pub const DUST_BURST_COUNT: u32 = 10;
    /// Speed increment between consecutive burst particles
    pub const DUST_SPEED_STEP: f64 = 100.0;
    pub const DUST_RADIUS: f64 = 8.0;
    /// Lifetime of a fresh particle, in simulation seconds
    pub const DUST_LIFETIME: f64 = 0.8;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> Point {
    Point::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Point) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}
