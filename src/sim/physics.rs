//! Fixed timestep physics
//!
//! Each tick runs, in order: integrate balls, integrate live dust, reflect
//! balls off the world box, then resolve ball-ball overlaps. Every wall hit by
//! a collidable ball and every ball-ball overlap emits a dust burst.

use std::f64::consts::TAU;

use super::{Ball, Color, Dust, Point, Velocity};
use crate::settings::{DustSettings, SimSettings};

/// Collision counts accumulated over one `advance` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub ticks: u64,
    pub wall_hits: u32,
    pub ball_hits: u32,
    pub dust_spawned: usize,
}

/// The physics engine: world box plus fixed step
#[derive(Debug, Clone)]
pub struct Physics {
    time_per_tick: f64,
    dust: DustSettings,
    top_left: Point,
    bottom_right: Point,
}

impl Physics {
    pub fn new(settings: &SimSettings) -> Self {
        Self {
            time_per_tick: settings.time_per_tick,
            dust: settings.dust,
            top_left: Point::ZERO,
            bottom_right: Point::ZERO,
        }
    }

    pub fn time_per_tick(&self) -> f64 {
        self.time_per_tick
    }

    /// Set the rectangle used for wall reflection
    pub fn configure_bounds(&mut self, top_left: Point, bottom_right: Point) {
        self.top_left = top_left;
        self.bottom_right = bottom_right;
    }

    /// Rectangle used for wall reflection
    pub fn bounds(&self) -> (Point, Point) {
        (self.top_left, self.bottom_right)
    }

    /// Run `ticks` fixed steps over the given population
    pub fn advance(&self, balls: &mut [Ball], dust: &mut Vec<Dust>, ticks: u64) -> TickReport {
        let mut report = TickReport {
            ticks,
            ..Default::default()
        };
        let dust_before = dust.len();

        for _ in 0..ticks {
            self.move_balls(balls);
            self.move_dust(dust);
            report.wall_hits += self.collide_with_box(balls, dust);
            report.ball_hits += self.collide_balls(balls, dust);
        }

        report.dust_spawned = dust.len() - dust_before;
        report
    }

    fn move_balls(&self, balls: &mut [Ball]) {
        for ball in balls.iter_mut() {
            let pos = ball.center() + ball.velocity().to_vector() * self.time_per_tick;
            ball.set_center(pos);
        }
    }

    /// Dead particles stay where they died
    fn move_dust(&self, dust: &mut [Dust]) {
        for particle in dust.iter_mut().filter(|d| d.alive()) {
            let pos = particle.center() + particle.velocity().to_vector() * self.time_per_tick;
            particle.set_center(pos);
        }
    }

    /// Reflect off the box, x checked before y (one axis per ball per tick)
    fn collide_with_box(&self, balls: &mut [Ball], dust: &mut Vec<Dust>) -> u32 {
        let out_of_range = |v: f64, lo: f64, hi: f64| v < lo || v > hi;
        let mut hits = 0;

        for ball in balls.iter_mut() {
            let p = ball.center();
            let r = ball.radius();
            let mut v = ball.velocity().to_vector();

            if out_of_range(p.x, self.top_left.x + r, self.bottom_right.x - r) {
                v.x = -v.x;
            } else if out_of_range(p.y, self.top_left.y + r, self.bottom_right.y - r) {
                v.y = -v.y;
            } else {
                continue;
            }

            ball.set_velocity(Velocity::from_vector(v));
            hits += 1;
            log::trace!("wall hit at ({:.2}, {:.2})", p.x, p.y);

            if ball.collidable() {
                dust.extend(self.dust_burst(ball.center(), ball.color(), true));
            }
        }

        hits
    }

    /// O(n²) pairwise overlap test between collidable balls
    fn collide_balls(&self, balls: &mut [Ball], dust: &mut Vec<Dust>) -> u32 {
        let mut hits = 0;

        for i in 0..balls.len() {
            let (head, tail) = balls.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if !(a.collidable() && b.collidable()) {
                    continue;
                }
                let distance2 = a.center().distance_squared(b.center());
                let reach = a.radius() + b.radius();
                if distance2 < reach * reach {
                    process_collision(a, b, distance2);
                    hits += 1;
                    log::trace!("ball hit at ({:.2}, {:.2})", a.center().x, a.center().y);
                    // Ball-ball dust is never collidable, unlike wall dust
                    dust.extend(self.dust_burst(a.center(), a.color(), false));
                }
            }
        }

        hits
    }

    /// Particles fanned evenly around a circle with linearly increasing speed
    pub fn dust_burst(
        &self,
        center: Point,
        color: Color,
        collidable: bool,
    ) -> impl Iterator<Item = Dust> {
        let DustSettings {
            count,
            speed_step,
            radius,
            lifetime,
        } = self.dust;

        (0..count).map(move |i| {
            let angle = i as f64 * TAU / count as f64;
            let velocity = Velocity::from_magnitude_angle(speed_step * i as f64, angle);
            Dust::new(velocity, center, radius, color, collidable, lifetime)
        })
    }
}

/// Elastic, mass-weighted impulse exchange along the contact normal
///
/// Tangential components are untouched. `distance2` is the squared distance
/// between the centers and must be non-zero.
pub fn process_collision(a: &mut Ball, b: &mut Ball, distance2: f64) {
    let normal = (b.center() - a.center()) / distance2.sqrt();

    let a_v = a.velocity().to_vector();
    let b_v = b.velocity().to_vector();
    let a_mass = a.mass();
    let b_mass = b.mass();

    let p = 2.0 * (a_v.dot(normal) - b_v.dot(normal)) / (a_mass + b_mass);

    a.set_velocity(Velocity::from_vector(a_v - normal * p * a_mass));
    b.set_velocity(Velocity::from_vector(b_v + normal * p * b_mass));
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn physics() -> Physics {
        let mut physics = Physics::new(&SimSettings::default());
        physics.configure_bounds(Point::new(0.0, 0.0), Point::new(1000.0, 1000.0));
        physics
    }

    fn ball(center: Point, v: Point, radius: f64, collidable: bool) -> Ball {
        Ball::new(Velocity::from_vector(v), center, radius, Color::new(0.5, 0.2, 0.1), collidable)
    }

    fn momentum(balls: &[&Ball]) -> Point {
        balls
            .iter()
            .map(|b| b.velocity().to_vector() * b.mass())
            .fold(Point::ZERO, |acc, m| acc + m)
    }

    #[test]
    fn test_free_motion() {
        let physics = physics();
        let mut balls = vec![ball(Point::new(500.0, 500.0), Point::new(100.0, -50.0), 10.0, true)];
        let mut dust = Vec::new();
        physics.advance(&mut balls, &mut dust, 10);
        let c = balls[0].center();
        assert!((c.x - 501.0).abs() < 1e-9);
        assert!((c.y - 499.5).abs() < 1e-9);
        assert!(dust.is_empty());
    }

    #[test]
    fn test_zero_ticks_is_noop() {
        let physics = physics();
        let mut balls = vec![ball(Point::new(5.0, 5.0), Point::new(100.0, 0.0), 10.0, true)];
        let before = balls.clone();
        let mut dust = Vec::new();
        let report = physics.advance(&mut balls, &mut dust, 0);
        assert_eq!(balls, before);
        assert_eq!(report, TickReport::default());
    }

    #[test]
    fn test_wall_reflection_x_takes_priority() {
        let physics = physics();
        // Out of range on both axes after one tick
        let mut balls = vec![ball(Point::new(5.0, 5.0), Point::new(-100.0, -100.0), 10.0, true)];
        let mut dust = Vec::new();
        let report = physics.advance(&mut balls, &mut dust, 1);
        let v = balls[0].velocity().to_vector();
        assert!((v.x - 100.0).abs() < 1e-9);
        assert!((v.y + 100.0).abs() < 1e-9);
        assert_eq!(report.wall_hits, 1);
        assert_eq!(dust.len(), 10);
        assert!(dust.iter().all(|d| d.collidable()));
        assert_eq!(dust[0].center(), balls[0].center());
    }

    #[test]
    fn test_wall_reflection_y() {
        let physics = physics();
        let mut balls = vec![ball(Point::new(500.0, 995.0), Point::new(0.0, 100.0), 10.0, true)];
        let mut dust = Vec::new();
        physics.advance(&mut balls, &mut dust, 1);
        let v = balls[0].velocity().to_vector();
        assert!(v.x.abs() < 1e-9);
        assert!((v.y + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_collidable_wall_hit_spawns_no_dust() {
        let physics = physics();
        let mut balls = vec![ball(Point::new(995.0, 500.0), Point::new(100.0, 0.0), 10.0, false)];
        let mut dust = Vec::new();
        let report = physics.advance(&mut balls, &mut dust, 1);
        assert_eq!(report.wall_hits, 1);
        assert!(dust.is_empty());
        assert!(balls[0].velocity().to_vector().x < 0.0);
    }

    #[test]
    fn test_dust_burst_shape() {
        let physics = physics();
        let color = Color::new(0.1, 0.2, 0.3);
        let burst: Vec<Dust> = physics.dust_burst(Point::new(1.0, 2.0), color, true).collect();
        assert_eq!(burst.len(), 10);
        for (i, d) in burst.iter().enumerate() {
            assert!((d.velocity().speed() - 100.0 * i as f64).abs() < 1e-9);
            assert!((d.velocity().angle() - i as f64 * TAU / 10.0).abs() < 1e-12);
            assert_eq!(d.radius(), 8.0);
            assert_eq!(d.lifetime(), 0.8);
            assert_eq!(d.color(), color);
            assert!(d.alive());
        }
    }

    #[test]
    fn test_head_on_equal_masses_swap() {
        let mut a = ball(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 5.0, true);
        let mut b = ball(Point::new(9.0, 0.0), Point::new(-10.0, 0.0), 5.0, true);
        let d2 = a.center().distance_squared(b.center());
        process_collision(&mut a, &mut b, d2);
        assert!((a.velocity().to_vector().x + 10.0).abs() < 1e-9);
        assert!((b.velocity().to_vector().x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_tangential_component_untouched() {
        let mut a = ball(Point::new(0.0, 0.0), Point::new(10.0, 7.0), 5.0, true);
        let mut b = ball(Point::new(9.0, 0.0), Point::new(0.0, -3.0), 5.0, true);
        let d2 = a.center().distance_squared(b.center());
        process_collision(&mut a, &mut b, d2);
        assert!((a.velocity().to_vector().y - 7.0).abs() < 1e-9);
        assert!((b.velocity().to_vector().y + 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_ball_collision_spawns_dust_at_first_ball() {
        let physics = physics();
        let mut balls = vec![
            ball(Point::new(500.0, 500.0), Point::new(0.0, 0.0), 10.0, true),
            ball(Point::new(515.0, 500.0), Point::new(0.0, 0.0), 10.0, true),
        ];
        let mut dust = Vec::new();
        let report = physics.advance(&mut balls, &mut dust, 1);
        assert_eq!(report.ball_hits, 1);
        assert_eq!(report.dust_spawned, 10);
        assert!(dust.iter().all(|d| !d.collidable()));
        assert!(dust.iter().all(|d| d.center() == balls[0].center()));
        assert!(dust.iter().all(|d| d.color() == balls[0].color()));
    }

    #[test]
    fn test_non_collidable_balls_pass_through() {
        let physics = physics();
        let mut balls = vec![
            ball(Point::new(500.0, 500.0), Point::new(10.0, 0.0), 10.0, true),
            ball(Point::new(505.0, 500.0), Point::new(-10.0, 0.0), 10.0, false),
        ];
        let mut dust = Vec::new();
        let report = physics.advance(&mut balls, &mut dust, 1);
        assert_eq!(report.ball_hits, 0);
        assert!(dust.is_empty());
        assert!((balls[0].velocity().to_vector().x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_dead_dust_is_frozen() {
        let physics = physics();
        let mut dead = Dust::new(
            Velocity::from_magnitude_angle(100.0, 0.0),
            Point::new(10.0, 10.0),
            8.0,
            Color::WHITE,
            false,
            0.1,
        );
        dead.age(1.0);
        let live = Dust::new(
            Velocity::from_magnitude_angle(100.0, 0.0),
            Point::new(10.0, 10.0),
            8.0,
            Color::WHITE,
            false,
            1.0,
        );
        let mut dust = vec![dead, live];
        physics.advance(&mut [], &mut dust, 5);
        assert_eq!(dust[0].center(), Point::new(10.0, 10.0));
        assert!((dust[1].center().x - 10.5).abs() < 1e-9);
    }

    #[test]
    fn test_unequal_masses_follow_impulse_rule() {
        let mut a = ball(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 1.0, true);
        let mut b = ball(Point::new(2.5, 0.0), Point::new(0.0, 0.0), 2.0, true);
        let before = momentum(&[&a, &b]);
        let d2 = a.center().distance_squared(b.center());
        process_collision(&mut a, &mut b, d2);

        // Each side is pushed by its own mass, so the lighter ball barely slows
        let (va, vb) = (a.velocity().to_vector(), b.velocity().to_vector());
        assert!((va.x - 70.0 / 9.0).abs() < 1e-9);
        assert!((vb.x - 160.0 / 9.0).abs() < 1e-9);
        assert!(va.y.abs() < 1e-9 && vb.y.abs() < 1e-9);
        // Total momentum is only invariant when the masses match
        assert!(momentum(&[&a, &b]).x > before.x);
    }

    #[test]
    fn test_configure_bounds() {
        let physics = physics();
        assert_eq!(physics.bounds(), (Point::ZERO, Point::new(1000.0, 1000.0)));
        assert_eq!(Physics::new(&SimSettings::default()).bounds(), (Point::ZERO, Point::ZERO));
    }

    proptest! {
        #[test]
        fn momentum_is_conserved_for_equal_radii(
            ax in -50.0f64..50.0, ay in -50.0f64..50.0,
            avx in -500.0f64..500.0, avy in -500.0f64..500.0,
            bvx in -500.0f64..500.0, bvy in -500.0f64..500.0,
            angle in 0.0f64..TAU, gap in 0.5f64..1.0,
            radius in 1.0f64..40.0,
        ) {
            let a_center = Point::new(ax, ay);
            let b_center = a_center + crate::polar_to_cartesian(2.0 * radius * gap, angle);
            let mut a = ball(a_center, Point::new(avx, avy), radius, true);
            let mut b = ball(b_center, Point::new(bvx, bvy), radius, true);

            let before = momentum(&[&a, &b]);
            let magnitude = momentum(&[&a]).length() + momentum(&[&b]).length() + 1.0;
            let d2 = a.center().distance_squared(b.center());
            process_collision(&mut a, &mut b, d2);
            let after = momentum(&[&a, &b]);

            prop_assert!((before - after).length() <= magnitude * 1e-9);
        }
    }
}
