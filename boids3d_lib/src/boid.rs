use glam::f32::Vec3;

use crate::{
    math_helpers::distance_boid,
    obstacle::Obstacle,
    options::{RunOptions, WorldBounds},
};

/// Smallest distance treated as nonzero when weighting by proximity, keeps
/// coincident boids from producing a non-finite force.
const EPSILON: f32 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct Boid {
    // sequential id starting from 0, equals the boid's slot in the flock
    pub id: usize,
    pub position: Vec3,
    pub velocity: Vec3,
    acceleration: Vec3,
    pub max_speed: f32,
    pub max_force: f32,
}

impl Boid {
    /// Creates a new [`Boid`].
    pub fn new(position: Vec3, velocity: Vec3, id: usize, max_speed: f32, max_force: f32) -> Self {
        let acceleration = Vec3::ZERO;

        Boid {
            id,
            position,
            velocity,
            acceleration,
            max_speed,
            max_force,
        }
    }

    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    /// Runs the three flocking rules against the current collection and
    /// accumulates their weighted forces.
    pub fn flock(&mut self, boids: &[Boid], run_options: &RunOptions) {
        let separation = self.separation(boids, run_options);
        let alignment = self.alignment(boids, run_options);
        let cohesion = self.cohesion(boids, run_options);

        self.apply_force(separation * run_options.separation_coefficient);
        self.apply_force(alignment * run_options.alignment_coefficient);
        self.apply_force(cohesion * run_options.cohesion_coefficient);
    }

    /// Steers away from boids closer than the separation distance, each
    /// repulsion weighted inversely by how close the offender is.
    pub fn separation(&self, boids: &[Boid], run_options: &RunOptions) -> Vec3 {
        let mut res = Vec3::ZERO;
        let mut count = 0;

        for other in boids {
            if other.id == self.id {
                continue;
            }

            let distance = distance_boid(self, other);
            if distance < run_options.separation_distance {
                let diff = (self.position - other.position).normalize_or_zero();
                res += diff / distance.max(EPSILON);
                count += 1;
            }
        }

        if count > 0 {
            res /= count as f32;
        }

        if res.length() > 0. {
            self.steer(res)
        } else {
            Vec3::ZERO
        }
    }

    /// Steers towards the average heading of boids within the neighbor
    /// distance.
    pub fn alignment(&self, boids: &[Boid], run_options: &RunOptions) -> Vec3 {
        let mut avg = Vec3::ZERO;
        let mut count = 0.;

        for other in boids {
            if other.id == self.id {
                continue;
            }

            let distance = distance_boid(self, other);
            if distance < run_options.neighbor_distance {
                avg += other.velocity;
                count += 1.;
            }
        }

        if count > 0. {
            avg /= count;
            self.steer(avg)
        } else {
            Vec3::ZERO
        }
    }

    /// Steers towards the center of mass of boids within the neighbor
    /// distance.
    pub fn cohesion(&self, boids: &[Boid], run_options: &RunOptions) -> Vec3 {
        let mut center = Vec3::ZERO;
        let mut count = 0.;

        for other in boids {
            if other.id == self.id {
                continue;
            }

            let distance = distance_boid(self, other);
            if distance < run_options.neighbor_distance {
                center += other.position;
                count += 1.;
            }
        }

        if count > 0. {
            center /= count;
            self.steer(center - self.position)
        } else {
            Vec3::ZERO
        }
    }

    /// Turns the desired direction into a steering force: full speed along
    /// the direction, minus the current velocity, clamped to the boid's
    /// turning authority.
    ///
    /// A zero direction degenerates to braking against the current velocity.
    fn steer(&self, desired: Vec3) -> Vec3 {
        (desired.normalize_or_zero() * self.max_speed - self.velocity)
            .clamp_length_max(self.max_force)
    }

    /// Looks ahead along the current heading and pushes away from the center
    /// of every obstacle the projected point ends up inside of.
    pub fn avoid_obstacles(&mut self, obstacles: &[Obstacle], run_options: &RunOptions) {
        // a standing boid degenerates the projection to its own position
        let future = self.position + self.velocity.normalize_or_zero() * run_options.look_ahead;

        for obstacle in obstacles {
            if !obstacle.contains_point(future) {
                continue;
            }

            let mut away = future - obstacle.position;
            if away.length() < EPSILON {
                // the projection sits exactly on the obstacle center, push
                // away from where the boid stands instead
                away = self.position - obstacle.position;
            }

            self.apply_force(
                away.normalize_or_zero() * (self.max_force * run_options.avoidance_gain),
            );
        }
    }

    /// Applies a constant turn on every axis where the boid strays within
    /// the margin of a wall. Axes are independent, a boid in a corner picks
    /// up one force per nearby wall.
    pub fn borders(&mut self, bounds: &WorldBounds, run_options: &RunOptions) {
        let margin = run_options.boundary_margin;
        let turn = run_options.turn_factor;

        if self.position.x < margin {
            self.acceleration.x += turn;
        }
        if self.position.x > bounds.width - margin {
            self.acceleration.x -= turn;
        }

        if self.position.y < margin {
            self.acceleration.y += turn;
        }
        if self.position.y > bounds.height - margin {
            self.acceleration.y -= turn;
        }

        if self.position.z < margin {
            self.acceleration.z += turn;
        }
        if self.position.z > bounds.depth - margin {
            self.acceleration.z -= turn;
        }
    }

    // Actually shifts the individual's location
    pub fn update_location(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;

        self.velocity = self.velocity.clamp_length_max(self.max_speed);

        self.position += self.velocity * dt;

        self.acceleration *= 0.0;
    }
}
