//! Scene descriptions
//!
//! A scene is the world box plus the initial balls. Scenes come from a
//! whitespace-separated text format, JSON, or a seeded generator.
//!
//! Text format:
//! ```text
//! left top
//! right bottom
//! cx cy vx vy r g b radius collidable   (repeated, collidable = true|false)
//! ```

use std::fmt;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::settings::SettingsError;
use crate::sim::{Ball, Color, Point, Velocity};

/// Initial description of one ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSpec {
    pub center: Point,
    /// Velocity as a cartesian vector
    pub velocity: Point,
    pub color: Color,
    pub radius: f64,
    pub collidable: bool,
}

impl From<&BallSpec> for Ball {
    fn from(spec: &BallSpec) -> Self {
        Ball::new(
            Velocity::from_vector(spec.velocity),
            spec.center,
            spec.radius,
            spec.color,
            spec.collidable,
        )
    }
}

/// World box and initial population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub top_left: Point,
    pub bottom_right: Point,
    #[serde(default)]
    pub balls: Vec<BallSpec>,
}

/// Failure to load or validate a scene
#[derive(Debug)]
pub enum SceneError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Settings(SettingsError),
    /// A token that should have been a number or boolean
    BadToken { token: String, expected: &'static str },
    /// Input ended inside the header
    MissingBounds,
    /// Input ended part-way through a ball record
    Truncated { ball: usize },
    InvalidBounds { top_left: Point, bottom_right: Point },
    InvalidRadius { ball: usize, radius: f64 },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "scene I/O error: {e}"),
            SceneError::Json(e) => write!(f, "scene JSON error: {e}"),
            SceneError::Settings(e) => write!(f, "{e}"),
            SceneError::BadToken { token, expected } => {
                write!(f, "expected {expected}, found {token:?}")
            }
            SceneError::MissingBounds => write!(f, "scene is missing its bounding box"),
            SceneError::Truncated { ball } => write!(f, "ball #{ball} is truncated"),
            SceneError::InvalidBounds {
                top_left,
                bottom_right,
            } => write!(
                f,
                "degenerate bounds ({}, {}) - ({}, {})",
                top_left.x, top_left.y, bottom_right.x, bottom_right.y
            ),
            SceneError::InvalidRadius { ball, radius } => {
                write!(f, "ball #{ball} has non-positive radius {radius}")
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            SceneError::Json(e) => Some(e),
            SceneError::Settings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::Json(e)
    }
}

impl From<SettingsError> for SceneError {
    fn from(e: SettingsError) -> Self {
        SceneError::Settings(e)
    }
}

fn parse_number(token: &str) -> Result<f64, SceneError> {
    token.parse::<f64>().map_err(|_| SceneError::BadToken {
        token: token.to_string(),
        expected: "number",
    })
}

fn parse_bool(token: &str) -> Result<bool, SceneError> {
    match token {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(SceneError::BadToken {
            token: token.to_string(),
            expected: "true or false",
        }),
    }
}

/// Tokens per ball record
const BALL_FIELDS: usize = 9;

/// Palette for generated scenes
const PALETTE: [Color; 5] = [
    Color::new(0.9, 0.3, 0.3),
    Color::new(0.3, 0.8, 0.4),
    Color::new(0.3, 0.5, 0.95),
    Color::new(0.95, 0.8, 0.3),
    Color::new(0.8, 0.4, 0.9),
];

impl Scene {
    /// An empty scene with the given box
    pub fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
            balls: Vec::new(),
        }
    }

    /// Parse the whitespace-separated text format
    pub fn parse(text: &str) -> Result<Self, SceneError> {
        let mut tokens = text.split_whitespace();

        let mut header = [0.0; 4];
        for slot in &mut header {
            let token = tokens.next().ok_or(SceneError::MissingBounds)?;
            *slot = parse_number(token)?;
        }
        let mut scene = Scene::new(
            Point::new(header[0], header[1]),
            Point::new(header[2], header[3]),
        );

        while let Some(first) = tokens.next() {
            let ball = scene.balls.len();

            let mut fields = [first; BALL_FIELDS];
            for slot in fields.iter_mut().skip(1) {
                *slot = tokens.next().ok_or(SceneError::Truncated { ball })?;
            }

            let mut nums = [0.0; BALL_FIELDS - 1];
            for (num, token) in nums.iter_mut().zip(&fields) {
                *num = parse_number(token)?;
            }
            let collidable = parse_bool(fields[BALL_FIELDS - 1])?;

            scene.balls.push(BallSpec {
                center: Point::new(nums[0], nums[1]),
                velocity: Point::new(nums[2], nums[3]),
                color: Color::new(nums[4], nums[5], nums[6]),
                radius: nums[7],
                collidable,
            });
        }

        Ok(scene)
    }

    /// Render back into the text format
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "{} {}\n{} {}\n",
            self.top_left.x, self.top_left.y, self.bottom_right.x, self.bottom_right.y
        );
        for b in &self.balls {
            out.push_str(&format!(
                "{} {} {} {} {} {} {} {} {}\n",
                b.center.x,
                b.center.y,
                b.velocity.x,
                b.velocity.y,
                b.color.r,
                b.color.g,
                b.color.b,
                b.radius,
                b.collidable
            ));
        }
        out
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a scene file (`.json` as JSON, anything else as text), validated
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let scene = if is_json {
            Self::from_json(&contents)?
        } else {
            Self::parse(&contents)?
        };
        scene.validate()?;

        log::info!("Loaded scene {} ({} balls)", path.display(), scene.balls.len());
        Ok(scene)
    }

    /// Reject degenerate boxes and non-positive radii
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.top_left.x >= self.bottom_right.x || self.top_left.y >= self.bottom_right.y {
            return Err(SceneError::InvalidBounds {
                top_left: self.top_left,
                bottom_right: self.bottom_right,
            });
        }
        for (ball, spec) in self.balls.iter().enumerate() {
            if !(spec.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    ball,
                    radius: spec.radius,
                });
            }
        }
        Ok(())
    }

    /// Deterministic scene of up to `count` non-overlapping balls
    ///
    /// About one ball in eight is non-collidable. Placement gives up after a
    /// bounded number of attempts, so crowded boxes may get fewer balls.
    pub fn random(seed: u64, count: usize, top_left: Point, bottom_right: Point) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut scene = Scene::new(top_left, bottom_right);
        let size = bottom_right - top_left;
        if !top_left.is_finite() || !bottom_right.is_finite() || !size.is_finite() {
            log::warn!("Scene box {top_left} - {bottom_right} is not finite, generating no balls");
            return scene;
        }
        let max_radius = (size.x.min(size.y) / 4.0).min(20.0);

        if max_radius <= 2.0 {
            log::warn!("Scene box too small for generated balls");
            return scene;
        }

        let max_attempts = count.saturating_mul(100);
        let mut attempts = 0;
        while scene.balls.len() < count && attempts < max_attempts {
            attempts += 1;

            let radius = rng.random_range(2.0..max_radius);
            let center = Point::new(
                rng.random_range(top_left.x + radius..bottom_right.x - radius),
                rng.random_range(top_left.y + radius..bottom_right.y - radius),
            );

            // Check it doesn't overlap with an existing ball
            let overlaps = scene
                .balls
                .iter()
                .any(|other| other.center.distance(center) <= other.radius + radius);
            if overlaps {
                continue;
            }

            let angle = rng.random_range(0.0..std::f64::consts::TAU);
            let speed = rng.random_range(20.0..200.0);
            scene.balls.push(BallSpec {
                center,
                velocity: crate::polar_to_cartesian(speed, angle),
                color: PALETTE[rng.random_range(0..PALETTE.len())],
                radius,
                collidable: !rng.random_ratio(1, 8),
            });
        }

        if scene.balls.len() < count {
            log::warn!(
                "Placed {} of {} balls after {} attempts",
                scene.balls.len(),
                count,
                attempts
            );
        }
        scene
    }
}
