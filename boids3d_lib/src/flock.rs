use glam::f32::Vec3;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::boid::Boid;
use crate::obstacle::Obstacle;
use crate::options::{RunOptions, WorldBounds};

/// The simulation engine. Owns the boids and the world they live in,
/// obstacles stay with the caller and are lent to every tick.
pub struct Flock {
    boids: Vec<Boid>,
    bounds: WorldBounds,
    rng: Xoshiro256PlusPlus,
}

impl Flock {
    pub fn new(run_options: &RunOptions) -> Self {
        let mut rng = match run_options.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };

        let boids = get_boids(run_options, &mut rng);

        Flock {
            boids,
            bounds: run_options.world,
            rng,
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    /// Advances the simulation by one tick of `dt` simulated seconds.
    ///
    /// Boids run their whole pipeline one at a time in collection order and
    /// are written back as they finish, so a boid later in the collection
    /// reads the already-moved state of the boids before it. Keep that in
    /// mind before reordering anything here.
    pub fn update(&mut self, dt: f32, obstacles: &[Obstacle], run_options: &RunOptions) {
        for i_cur in 0..self.boids.len() {
            let mut boid = self.boids[i_cur];

            boid.flock(&self.boids, run_options);
            boid.avoid_obstacles(obstacles, run_options);
            boid.update_location(dt);
            boid.borders(&self.bounds, run_options);

            self.boids[i_cur] = boid;
        }
    }

    /// Spawns one extra boid at a random spot.
    pub fn insert(&mut self, run_options: &RunOptions) {
        let b = get_boid(run_options, self.boids.len(), &mut self.rng);
        self.insert_boid(b);
    }

    /// Adopts a boid built by the caller. The flock owns identity, the
    /// incoming id is replaced with the boid's slot.
    pub fn insert_boid(&mut self, mut b: Boid) {
        b.id = self.boids.len();
        self.boids.push(b);
    }

    pub fn delete_last(&mut self) -> Option<usize> {
        self.boids.pop().map(|b| b.id)
    }

    /// Replaces the population with a fresh spawn, same world, same rng.
    pub fn restart(&mut self, run_options: &RunOptions) {
        self.boids = get_boids(run_options, &mut self.rng);
    }
}

fn get_boids(run_options: &RunOptions, rng: &mut impl Rng) -> Vec<Boid> {
    (0..run_options.init_boids)
        .map(|id| get_boid(run_options, id, rng))
        .collect()
}

fn get_boid(run_options: &RunOptions, id: usize, rng: &mut impl Rng) -> Boid {
    let WorldBounds {
        width,
        height,
        depth,
    } = run_options.world;

    let position = Vec3::new(
        rng.gen::<f32>() * width,
        rng.gen::<f32>() * height,
        rng.gen::<f32>() * depth,
    );

    Boid::new(
        position,
        Vec3::ZERO,
        id,
        run_options.max_speed,
        run_options.max_force,
    )
}

#[cfg(test)]
mod tests {
    use glam::f32::Vec3;

    use super::Flock;
    use crate::boid::Boid;
    use crate::obstacle::Obstacle;
    use crate::options::RunOptions;

    fn seeded_options() -> RunOptions {
        RunOptions {
            seed: Some(42),
            ..Default::default()
        }
    }

    fn empty_flock(run_options: &RunOptions) -> Flock {
        let ro = RunOptions {
            init_boids: 0,
            ..run_options.clone()
        };
        Flock::new(&ro)
    }

    #[test]
    fn spawns_inside_bounds_with_zero_velocity() {
        let ro = seeded_options();
        let flock = Flock::new(&ro);

        assert_eq!(flock.boids().len(), ro.init_boids);

        for (i, b) in flock.boids().iter().enumerate() {
            assert_eq!(b.id, i);
            assert_eq!(b.velocity, Vec3::ZERO);
            assert!(b.position.x >= 0. && b.position.x <= ro.world.width);
            assert!(b.position.y >= 0. && b.position.y <= ro.world.height);
            assert!(b.position.z >= 0. && b.position.z <= ro.world.depth);
        }
    }

    #[test]
    fn same_seed_same_run() {
        let ro = seeded_options();
        let mut a = Flock::new(&ro);
        let mut b = Flock::new(&ro);

        for _ in 0..10 {
            a.update(ro.dt, &[], &ro);
            b.update(ro.dt, &[], &ro);
        }

        for (ba, bb) in a.boids().iter().zip(b.boids().iter()) {
            assert_eq!(ba.position, bb.position);
            assert_eq!(ba.velocity, bb.velocity);
        }
    }

    #[test]
    fn insert_extends_the_flock() {
        let ro = seeded_options();
        let mut flock = Flock::new(&ro);

        flock.insert(&ro);

        assert_eq!(flock.boids().len(), ro.init_boids + 1);
        assert_eq!(flock.boids().last().map(|b| b.id), Some(ro.init_boids));
    }

    #[test]
    fn insert_boid_reassigns_the_id() {
        let ro = seeded_options();
        let mut flock = empty_flock(&ro);

        flock.insert_boid(Boid::new(Vec3::new(5., 5., 5.), Vec3::ZERO, 999, 2.0, 0.05));

        assert_eq!(flock.boids()[0].id, 0);
    }

    #[test]
    fn delete_last_returns_the_dropped_id() {
        let ro = seeded_options();
        let mut flock = Flock::new(&ro);

        assert_eq!(flock.delete_last(), Some(ro.init_boids - 1));
        assert_eq!(flock.boids().len(), ro.init_boids - 1);
    }

    #[test]
    fn delete_last_on_empty_flock() {
        let ro = seeded_options();
        let mut flock = empty_flock(&ro);

        assert_eq!(flock.delete_last(), None);
    }

    #[test]
    fn restart_repopulates() {
        let ro = seeded_options();
        let mut flock = Flock::new(&ro);

        for _ in 0..5 {
            flock.update(ro.dt, &[], &ro);
        }
        flock.delete_last();
        flock.restart(&ro);

        assert_eq!(flock.boids().len(), ro.init_boids);
        assert!(flock.boids().iter().all(|b| b.velocity == Vec3::ZERO));
    }

    #[test]
    fn lone_standing_boid_stays_put() {
        let ro = seeded_options();
        let mut flock = empty_flock(&ro);
        flock.insert_boid(Boid::new(Vec3::new(5., 5., 5.), Vec3::ZERO, 0, 2.0, 0.05));

        flock.update(ro.dt, &[], &ro);

        assert_eq!(flock.boids()[0].position, Vec3::new(5., 5., 5.));
        assert_eq!(flock.boids()[0].velocity, Vec3::ZERO);
    }

    #[test]
    fn update_is_sequential_in_collection_order() {
        // the first boid steps out of its own neighborhood radius and into
        // the second's before the second runs its rules, so the second
        // reacts to the moved position within the same tick
        let ro = RunOptions {
            alignment_coefficient: 0.,
            ..seeded_options()
        };
        let mut flock = empty_flock(&ro);
        flock.insert_boid(Boid::new(
            Vec3::new(3., 5., 5.),
            Vec3::new(2., 0., 0.),
            0,
            2.0,
            0.05,
        ));
        flock.insert_boid(Boid::new(Vec3::new(6.05, 5., 5.), Vec3::ZERO, 1, 2.0, 0.05));

        flock.update(ro.dt, &[], &ro);

        assert!(flock.boids()[1].velocity.x < 0.);
    }

    #[test]
    fn borders_follow_the_move() {
        // a boid drifting past the margin picks the turn force up after
        // moving, so it shows in the accumulator next tick, not in this
        // tick's velocity
        let ro = seeded_options();
        let mut flock = empty_flock(&ro);
        flock.insert_boid(Boid::new(
            Vec3::new(1.04, 5., 5.),
            Vec3::new(-2., 0., 0.),
            0,
            2.0,
            0.05,
        ));

        flock.update(ro.dt, &[], &ro);

        let b = flock.boids()[0];
        assert_eq!(b.velocity, Vec3::new(-2., 0., 0.));

        flock.update(ro.dt, &[], &ro);

        let b = flock.boids()[0];
        assert!(b.velocity.x > -2.);
    }

    #[test]
    fn obstacle_deflects_an_incoming_boid() {
        let ro = seeded_options();
        let obstacles = [Obstacle::new(Vec3::new(5., 5., 5.), Vec3::new(1., 1., 1.))];
        let mut flock = empty_flock(&ro);
        flock.insert_boid(Boid::new(
            Vec3::new(3.5, 5., 5.),
            Vec3::new(2., 0., 0.),
            0,
            2.0,
            0.05,
        ));

        flock.update(ro.dt, &obstacles, &ro);

        // look-ahead of (3.5, 5, 5) + (1, 0, 0) lands inside the box and
        // the boid starts losing x velocity on the next integration
        let b = flock.boids()[0];
        assert!(b.velocity.x < 2.);
    }
}
