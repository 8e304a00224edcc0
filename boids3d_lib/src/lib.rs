use birdwatcher::{Birdwatcher, BoidData};
use flock::Flock;
use obstacle::Obstacle;
use options::RunOptions;

pub mod boid;
pub mod flock;
pub mod obstacle;

pub mod birdwatcher;
pub mod math_helpers;
pub mod options;

/// Runs a flock without a window for a fixed number of ticks and hands back
/// whatever the birdwatcher collected, saving it per the save options.
pub fn flock_base(no_iter: u64, run_options: RunOptions, obstacles: &[Obstacle]) -> Vec<BoidData> {
    let ro = run_options;
    let mut flock = Flock::new(&ro);
    let mut bird_watcher = Birdwatcher::new(ro.sample_rate);

    (0..no_iter).for_each(|_| {
        flock.update(ro.dt, obstacles, &ro);
        bird_watcher.watch(&flock);
    });

    bird_watcher.pop_data_save(&ro.save_options)
}

#[cfg(test)]
mod tests {
    use glam::f32::Vec3;

    use crate::obstacle::Obstacle;
    use crate::options::RunOptions;

    #[test]
    fn headless_run_collects_everything() {
        let ro = RunOptions {
            init_boids: 8,
            seed: Some(3),
            ..Default::default()
        };
        let obstacles = [Obstacle::new(Vec3::new(5., 5., 5.), Vec3::new(1., 1., 1.))];

        let data = super::flock_base(20, ro, &obstacles);

        assert_eq!(data.len(), 8 * 20);
        assert!(data.iter().all(|d| d.id < 8));
    }
}
