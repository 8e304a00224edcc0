use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};

#[derive(Parser)]
#[derive(ClapSerde)]
#[command(version, about, long_about = None)]
/// Flocking boids in a boxed 3D volume, watched through a fixed camera.
pub struct Args {
    /// Config file
    #[arg(short, long = "config", default_value = "config.yaml")]
    pub config_path: std::path::PathBuf,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the `-c` or `--config` arg option
pub struct Config {
    #[default(50)]
    #[arg(short = 'n', long)]
    /// number of boids
    pub no_boids: usize,

    #[default(10.)]
    #[arg(short = 'x', long)]
    /// world extent along x
    pub width: f32,

    #[default(10.)]
    #[arg(short = 'y', long)]
    /// world extent along y
    pub height: f32,

    #[default(10.)]
    #[arg(short = 'z', long)]
    /// world extent along z
    pub depth: f32,

    #[default(0.05)]
    #[arg(long)]
    /// simulated seconds per tick
    pub dt: f32,

    #[default(2.0)]
    #[arg(long = "max_speed")]
    pub max_speed: f32,
    #[default(0.05)]
    #[arg(long = "max_force")]
    pub max_force: f32,

    #[default(1.0)]
    #[arg(long = "sep_dist")]
    pub separation_distance: f32,
    #[default(3.0)]
    #[arg(long = "neigh_dist")]
    pub neighbor_distance: f32,

    #[default(1.5)]
    #[arg(long = "sep_coef")]
    pub separation_coefficient: f32,
    #[default(1.0)]
    #[arg(long = "ali_coef")]
    pub alignment_coefficient: f32,
    #[default(1.0)]
    #[arg(long = "coh_coef")]
    pub cohesion_coefficient: f32,

    #[default(1.0)]
    #[arg(long = "margin")]
    /// distance from a wall at which the turn force kicks in
    pub boundary_margin: f32,
    #[default(0.05)]
    #[arg(long = "turn_factor")]
    pub turn_factor: f32,

    #[default(1.0)]
    #[arg(long = "look_ahead")]
    /// distance ahead at which obstacles are probed
    pub look_ahead: f32,
    #[default(2.0)]
    #[arg(long = "avoidance_gain")]
    /// obstacle push strength as a multiple of max_force
    pub avoidance_gain: f32,

    #[default(1)]
    #[arg(short = 'r', long)]
    /// ratio of updates/sample_rate, e.g. 4 = sample every 4th update
    pub sample_rate: u64,

    #[default(false)]
    #[arg(short = 's', long)]
    pub save: bool,

    #[default(false)]
    #[arg(short = 't', long)]
    pub save_timestamp: bool,

    #[default(0)]
    #[arg(long)]
    /// seed for reproducible runs, 0 draws one from the system
    pub seed: u64,
}
