use thiserror::Error;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub init_boids: usize,
    pub world: WorldBounds,

    /// simulated seconds per tick, fixed regardless of wall clock
    pub dt: f32,

    pub max_speed: f32,
    pub max_force: f32,

    pub separation_distance: f32,
    pub neighbor_distance: f32,

    pub separation_coefficient: f32,
    pub alignment_coefficient: f32,
    pub cohesion_coefficient: f32,

    pub boundary_margin: f32,
    pub turn_factor: f32,

    pub look_ahead: f32,
    pub avoidance_gain: f32,

    /// fixed seed for reproducible runs, `None` draws one from the system
    pub seed: Option<u64>,

    pub sample_rate: u64,
    pub save_options: SaveOptions,
}

impl RunOptions {
    /// Checks that the options describe a world a flock can actually live in.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;

        let scalars = [
            ("dt", self.dt),
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("separation_distance", self.separation_distance),
            ("neighbor_distance", self.neighbor_distance),
            ("separation_coefficient", self.separation_coefficient),
            ("alignment_coefficient", self.alignment_coefficient),
            ("cohesion_coefficient", self.cohesion_coefficient),
            ("boundary_margin", self.boundary_margin),
            ("turn_factor", self.turn_factor),
            ("look_ahead", self.look_ahead),
            ("avoidance_gain", self.avoidance_gain),
        ];

        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteParameter { name, value });
            }
            if value < 0. {
                return Err(ConfigError::NegativeParameter { name, value });
            }
        }

        if self.sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }

        Ok(())
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        let init_boids = 50;
        let world = WorldBounds::new(10., 10., 10.);

        let dt = 0.05;

        let max_speed = 2.0;
        let max_force = 0.05;

        let separation_distance = 1.0;
        let neighbor_distance = 3.0;

        let separation_coefficient = 1.5;
        let alignment_coefficient = 1.0;
        let cohesion_coefficient = 1.0;

        let boundary_margin = 1.0;
        let turn_factor = 0.05;

        let look_ahead = 1.0;
        let avoidance_gain = 2.0;

        let sample_rate = 1_u64;

        RunOptions {
            init_boids,
            world,
            dt,
            max_speed,
            max_force,
            separation_distance,
            neighbor_distance,
            separation_coefficient,
            alignment_coefficient,
            cohesion_coefficient,
            boundary_margin,
            turn_factor,
            look_ahead,
            avoidance_gain,
            seed: None,
            sample_rate,
            save_options: SaveOptions {
                save_locations: false,
                save_locations_path: Some("./".to_owned()),
                save_locations_timestamp: true,
            },
        }
    }
}

/// Extents of the simulated volume, a box spanning `[0, width]` x `[0, height]`
/// x `[0, depth]` with its corner at the origin.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32, depth: f32) -> WorldBounds {
        WorldBounds {
            width,
            height,
            depth,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let axes = [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ];

        for (axis, extent) in axes {
            if !extent.is_finite() || extent <= 0. {
                return Err(ConfigError::WorldDimensions { axis, extent });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub save_locations: bool,
    pub save_locations_path: Option<String>,
    pub save_locations_timestamp: bool,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("world {axis} must be positive and finite, got {extent}")]
    WorldDimensions { axis: &'static str, extent: f32 },
    #[error("{name} must not be negative, got {value}")]
    NegativeParameter { name: &'static str, value: f32 },
    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter { name: &'static str, value: f32 },
    #[error("obstacle center must be finite, got ({x}, {y}, {z})")]
    ObstacleCenter { x: f32, y: f32, z: f32 },
    #[error("obstacle half-extents must be non-negative and finite, got ({x}, {y}, {z})")]
    ObstacleHalfExtent { x: f32, y: f32, z: f32 },
    #[error("sample_rate must be at least 1")]
    ZeroSampleRate,
}
