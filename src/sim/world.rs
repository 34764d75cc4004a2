//! World driver
//!
//! Owns the ball and dust populations and turns arbitrary elapsed wall time
//! into whole fixed-size physics ticks, carrying the remainder forward.

use super::{Ball, Color, Dust, Physics, Point};
use crate::renderer::Painter;
use crate::scene::{Scene, SceneError};
use crate::settings::SimSettings;

/// The simulated world
#[derive(Debug, Clone)]
pub struct World {
    settings: SimSettings,
    physics: Physics,
    top_left: Point,
    bottom_right: Point,
    /// Balls in scene order
    balls: Vec<Ball>,
    /// Live (and just-died) dust in spawn order
    dust: Vec<Dust>,
    /// Sub-tick time not yet simulated, always in [0, time_per_tick)
    rest_time: f64,
    /// Total ticks simulated since construction
    elapsed_ticks: u64,
}

impl World {
    /// Build a world from a scene using default settings
    pub fn new(scene: Scene) -> Result<Self, SceneError> {
        Self::with_settings(scene, SimSettings::default())
    }

    pub fn with_settings(scene: Scene, settings: SimSettings) -> Result<Self, SceneError> {
        scene.validate()?;
        settings.validate()?;

        let mut physics = Physics::new(&settings);
        physics.configure_bounds(scene.top_left, scene.bottom_right);

        let balls: Vec<Ball> = scene.balls.iter().map(Ball::from).collect();
        log::info!(
            "World created: {} balls, bounds ({}, {}) - ({}, {})",
            balls.len(),
            scene.top_left.x,
            scene.top_left.y,
            scene.bottom_right.x,
            scene.bottom_right.y
        );

        Ok(Self {
            settings,
            physics,
            top_left: scene.top_left,
            bottom_right: scene.bottom_right,
            balls,
            dust: Vec::new(),
            rest_time: 0.0,
            elapsed_ticks: 0,
        })
    }

    /// Advance by `elapsed` wall seconds, returning the number of ticks run
    ///
    /// Dust ages by exactly one `time_per_tick` per call, no matter how many
    /// ticks ran. Particles that die are removed before returning.
    pub fn update(&mut self, elapsed: f64) -> u64 {
        let dt = self.physics.time_per_tick();

        let time = elapsed + self.rest_time;
        let ticks = (time / dt).floor().max(0.0) as u64;
        // Rounding can leave a hair below zero when `time` is a whole tick count
        self.rest_time = (time - ticks as f64 * dt).max(0.0);

        let report = self.physics.advance(&mut self.balls, &mut self.dust, ticks);
        self.elapsed_ticks += ticks;

        for particle in &mut self.dust {
            particle.age(dt);
        }
        let before = self.dust.len();
        self.dust.retain(Dust::alive);

        log::debug!(
            "update: {} ticks, {} wall hits, {} ball hits, +{} dust, -{} dust",
            ticks,
            report.wall_hits,
            report.ball_hits,
            report.dust_spawned,
            before - self.dust.len()
        );

        ticks
    }

    /// Boundary first (white), then balls, then live dust
    pub fn render<P: Painter + ?Sized>(&self, painter: &mut P) {
        painter.draw_rectangle(self.top_left, self.bottom_right, Color::WHITE);

        for ball in &self.balls {
            ball.draw(painter);
        }
        for particle in self.dust.iter().filter(|d| d.alive()) {
            particle.draw(painter);
        }
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn dust(&self) -> &[Dust] {
        &self.dust
    }

    pub fn rest_time(&self) -> f64 {
        self.rest_time
    }

    pub fn bounds(&self) -> (Point, Point) {
        (self.top_left, self.bottom_right)
    }

    pub fn time_per_tick(&self) -> f64 {
        self.physics.time_per_tick()
    }

    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Sum of m·v over all balls
    ///
    /// Wall reflections change it, and so do collisions between balls of
    /// different radii, so this is a diagnostic rather than an invariant.
    pub fn total_momentum(&self) -> Point {
        self.balls
            .iter()
            .map(|b| b.velocity().to_vector() * b.mass())
            .fold(Point::ZERO, |acc, p| acc + p)
    }

    /// Sum of ½·m·|v|² over all balls
    pub fn kinetic_energy(&self) -> f64 {
        self.balls
            .iter()
            .map(|b| 0.5 * b.mass() * b.velocity().speed().powi(2))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandRecorder, DrawCommand};
    use crate::scene::BallSpec;

    fn empty_scene() -> Scene {
        Scene::new(Point::new(0.0, 0.0), Point::new(800.0, 600.0))
    }

    fn spec(center: Point, velocity: Point, collidable: bool) -> BallSpec {
        BallSpec {
            center,
            velocity,
            color: Color::new(0.2, 0.4, 0.6),
            radius: 10.0,
            collidable,
        }
    }

    #[test]
    fn test_tick_accounting() {
        let mut world = World::new(empty_scene()).unwrap();

        assert_eq!(world.update(0.0035), 3);
        assert!((world.rest_time() - 0.0005).abs() < 1e-9);

        assert_eq!(world.update(0.0007), 1);
        assert!((world.rest_time() - 0.0002).abs() < 1e-9);
        assert_eq!(world.elapsed_ticks(), 4);
    }

    #[test]
    fn test_rest_time_never_negative() {
        let mut world = World::new(empty_scene()).unwrap();
        assert_eq!(world.update(0.009), 9);
        assert!(world.rest_time() >= 0.0 && world.rest_time() < world.time_per_tick());

        for elapsed in [0.003, 0.007, 0.1, 0.3, 1.0 / 60.0, 0.0] {
            world.update(elapsed);
            assert!(world.rest_time() >= 0.0, "rest {} after {}", world.rest_time(), elapsed);
            assert!(world.rest_time() < world.time_per_tick());
        }
    }

    #[test]
    fn test_bounds_and_settings() {
        let mut settings = SimSettings::default();
        settings.time_per_tick = 0.002;
        let world = World::with_settings(empty_scene(), settings.clone()).unwrap();
        assert_eq!(world.bounds(), (Point::new(0.0, 0.0), Point::new(800.0, 600.0)));
        assert_eq!(world.settings(), &settings);
        assert_eq!(world.time_per_tick(), 0.002);
    }

    #[test]
    fn test_empty_world_update_and_render() {
        let mut world = World::new(empty_scene()).unwrap();
        world.update(0.5);
        world.update(0.0);
        let mut recorder = CommandRecorder::new();
        world.render(&mut recorder);
        assert_eq!(
            recorder.commands,
            vec![DrawCommand::Rectangle {
                top_left: Point::new(0.0, 0.0),
                bottom_right: Point::new(800.0, 600.0),
                color: Color::WHITE,
            }]
        );
        assert!(world.rest_time() >= 0.0 && world.rest_time() < world.time_per_tick());
    }

    #[test]
    fn test_dust_ages_once_per_update() {
        let mut scene = empty_scene();
        // Crosses the left wall on the first tick
        scene.balls.push(spec(Point::new(10.0005, 300.0), Point::new(-1.0, 0.0), true));
        let mut world = World::new(scene).unwrap();

        // A long frame still ages the burst by a single step
        world.update(0.05);
        assert!(!world.dust().is_empty());
        let expected = crate::consts::DUST_LIFETIME - world.time_per_tick();
        assert!(world.dust().iter().all(|d| (d.lifetime() - expected).abs() < 1e-12));
    }

    #[test]
    fn test_dust_dies_and_is_removed() {
        let mut scene = empty_scene();
        scene.balls.push(spec(Point::new(10.0005, 300.0), Point::new(-1.0, 0.0), true));
        let mut world = World::new(scene).unwrap();
        world.update(0.001);
        let spawned = world.dust().len();
        assert_eq!(spawned, 10);

        // Stop producing more dust: zero-time updates run no ticks but still age
        let mut calls = 1;
        while !world.dust().is_empty() {
            world.update(0.0);
            calls += 1;
            assert!(calls <= 802, "dust outlived its lifetime");
        }
        assert!(calls >= 799);
        assert!(world.dust().iter().all(Dust::alive));
    }

    #[test]
    fn test_render_order() {
        let mut scene = empty_scene();
        scene.balls.push(spec(Point::new(10.0005, 300.0), Point::new(-1.0, 0.0), true));
        scene.balls.push(spec(Point::new(400.0, 300.0), Point::ZERO, true));
        let mut world = World::new(scene).unwrap();
        world.update(0.001);

        let mut recorder = CommandRecorder::new();
        world.render(&mut recorder);
        assert!(matches!(recorder.commands[0], DrawCommand::Rectangle { .. }));
        assert_eq!(recorder.circle_count(), 2 + world.dust().len());
        match recorder.commands[1] {
            DrawCommand::Circle { radius, .. } => assert_eq!(radius, 10.0),
            _ => panic!("expected ball circle"),
        }
    }

    #[test]
    fn test_rejects_bad_scene() {
        let scene = Scene::new(Point::new(10.0, 0.0), Point::new(0.0, 100.0));
        assert!(matches!(World::new(scene), Err(SceneError::InvalidBounds { .. })));
    }
}
