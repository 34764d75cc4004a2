//! Velocity as direction + speed
//!
//! Stored in polar form; the cartesian vector is produced on demand.

use serde::{Deserialize, Serialize};

use super::Point;
use crate::{cartesian_to_polar, polar_to_cartesian};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Magnitude (units per simulation second)
    speed: f64,
    /// Direction in radians, counter-clockwise from +x
    angle: f64,
}

impl Velocity {
    pub fn from_magnitude_angle(speed: f64, angle: f64) -> Self {
        Self { speed, angle }
    }

    pub fn from_vector(v: Point) -> Self {
        let (speed, angle) = cartesian_to_polar(v);
        Self { speed, angle }
    }

    #[inline]
    pub fn to_vector(&self) -> Point {
        polar_to_cartesian(self.speed, self.angle)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }
}

impl From<Point> for Velocity {
    fn from(v: Point) -> Self {
        Self::from_vector(v)
    }
}
