extern crate nannou;
use std::{fs::File, io::BufReader};

use clap_serde_derive::{clap::Parser, ClapSerde};
use nannou::draw::properties::ColorScalar;
use nannou::{color::*, prelude::*};
use nannou_egui::{egui, Egui};

use boids3d_lib::birdwatcher::Birdwatcher;
use boids3d_lib::boid::Boid;
use boids3d_lib::flock::Flock;
use boids3d_lib::obstacle::Obstacle;
use boids3d_lib::options::{RunOptions, SaveOptions, WorldBounds};

mod cliargs;
use cliargs::{Args, Config};

// the view mirrors the reference scene: a 45 degree vertical field of view
// from an eye on the volume's center axis, looking straight down -z
const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
const NEAR: f32 = 0.1;

fn main() {
    nannou::app(model).update(update).run();
}

struct ControlsState {
    execution_paused: bool,
    controls_open: bool,
}

struct Model {
    egui: Egui,
    color: Hsv,
    flock: Flock,
    obstacles: Vec<Obstacle>,
    camera: Camera,
    run_options: RunOptions,
    boid_size: f32,
    control_state: ControlsState,
    bird_watcher: Birdwatcher,
}

pub struct Camera {
    eye: Vec3,
}

impl Camera {
    /// Places the eye on the volume's center axis, far enough back to frame
    /// the whole box.
    fn framing(bounds: &WorldBounds) -> Self {
        Camera {
            eye: vec3(bounds.width / 2., bounds.height / 2., bounds.depth * 2.5),
        }
    }

    /// Projects a world point onto the window plane, `None` for points
    /// behind the near plane.
    fn project(&self, point: Vec3, win: &Rect) -> Option<Vec2> {
        let depth = self.eye.z - point.z;
        if depth <= NEAR {
            return None;
        }

        let focal = Camera::focal(win);

        Some(vec2(
            (point.x - self.eye.x) * focal / depth,
            (point.y - self.eye.y) * focal / depth,
        ))
    }

    /// Window pixels per world unit at the point's depth.
    fn scale(&self, point: Vec3, win: &Rect) -> f32 {
        Camera::focal(win) / (self.eye.z - point.z).max(NEAR)
    }

    fn focal(win: &Rect) -> f32 {
        win.h() * 0.5 / (FOV_Y * 0.5).tan()
    }
}

fn model(app: &App) -> Model {
    // Parse whole args with clap
    let mut args = Args::parse();

    // Get config file
    let config = if let Ok(f) = File::open(&args.config_path) {
        // Parse config with serde
        match serde_yaml::from_reader::<_, <Config as ClapSerde>::Opt>(BufReader::new(f)) {
            // merge config already parsed from clap
            Ok(config) => Config::from(config).merge(&mut args.config),
            Err(err) => panic!("Error in configuration file:\n{}", err),
        }
    } else {
        // If there is not config file return only config parsed from clap
        Config::from(&mut args.config)
    };

    let mut run_options: RunOptions = Default::default();

    run_options.init_boids = config.no_boids;
    run_options.world = WorldBounds::new(config.width, config.height, config.depth);
    run_options.dt = config.dt;
    run_options.max_speed = config.max_speed;
    run_options.max_force = config.max_force;
    run_options.separation_distance = config.separation_distance;
    run_options.neighbor_distance = config.neighbor_distance;
    run_options.separation_coefficient = config.separation_coefficient;
    run_options.alignment_coefficient = config.alignment_coefficient;
    run_options.cohesion_coefficient = config.cohesion_coefficient;
    run_options.boundary_margin = config.boundary_margin;
    run_options.turn_factor = config.turn_factor;
    run_options.look_ahead = config.look_ahead;
    run_options.avoidance_gain = config.avoidance_gain;
    run_options.sample_rate = config.sample_rate;
    run_options.seed = match config.seed {
        0 => None,
        seed => Some(seed),
    };

    let save_options = SaveOptions {
        save_locations: config.save,
        save_locations_timestamp: config.save_timestamp,

        // default
        save_locations_path: run_options.save_options.save_locations_path,
    };

    run_options.save_options = save_options;

    if let Err(err) = run_options.validate() {
        panic!("Error in configuration:\n{}", err);
    }

    // the reference scene: one box in the middle of the volume, a smaller
    // one off towards a corner
    let obstacles = vec![
        Obstacle::new(vec3(5., 5., 5.), vec3(1., 1., 1.)),
        Obstacle::new(vec3(2., 2., 7.), vec3(0.8, 0.8, 0.8)),
    ];

    for obstacle in &obstacles {
        if let Err(err) = obstacle.validate() {
            panic!("Error in obstacle scene:\n{}", err);
        }
    }

    let main_window = app
        .new_window()
        .key_pressed(key_pressed)
        .closed(window_closed)
        .size(800, 600)
        .title("boids 3d")
        .raw_event(raw_window_event)
        .view(view)
        .build()
        .unwrap();

    let window = app.window(main_window).unwrap();

    let bird_watcher = Birdwatcher::new(run_options.sample_rate);
    let camera = Camera::framing(&run_options.world);

    Model {
        egui: Egui::from_window(&window),
        color: Hsv::new(RgbHue::from_degrees(217.), 0.8, 1.0),
        flock: Flock::new(&run_options),
        obstacles,
        camera,
        run_options,
        boid_size: 0.25,
        control_state: ControlsState {
            execution_paused: false,
            controls_open: false,
        },
        bird_watcher,
    }
}

fn update(_app: &App, model: &mut Model, update: Update) {
    let Model {
        ref mut egui,
        ref mut color,
        ref mut flock,
        ref mut run_options,
        ref mut bird_watcher,
        ref obstacles,
        ..
    } = *model;

    // update controls UI
    egui.set_elapsed_time(update.since_start);
    let ctx = egui.begin_frame();
    egui::Window::new("controls")
        .default_size(egui::vec2(0.0, 200.0))
        .open(&mut model.control_state.controls_open)
        .show(&ctx, |ui| {
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("color");
                edit_hsv(ui, color);
            });

            ui.horizontal(|ui| {
                ui.label("dt");
                ui.add(egui::Slider::new(&mut run_options.dt, 0.01..=0.2))
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("separation coef");
                ui.add(egui::Slider::new(
                    &mut run_options.separation_coefficient,
                    0.0..=10.0,
                ))
            });

            ui.horizontal(|ui| {
                ui.label("alignment coef");
                ui.add(egui::Slider::new(
                    &mut run_options.alignment_coefficient,
                    0.0..=10.0,
                ))
            });

            ui.horizontal(|ui| {
                ui.label("cohesion coef");
                ui.add(egui::Slider::new(
                    &mut run_options.cohesion_coefficient,
                    0.0..=10.0,
                ))
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("separation distance");
                ui.add(egui::Slider::new(
                    &mut run_options.separation_distance,
                    0.0..=5.0,
                ))
            });

            ui.horizontal(|ui| {
                ui.label("neighbor distance");
                ui.add(egui::Slider::new(
                    &mut run_options.neighbor_distance,
                    0.0..=5.0,
                ))
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("turn factor");
                ui.add(egui::Slider::new(&mut run_options.turn_factor, 0.0..=0.5))
            });

            ui.horizontal(|ui| {
                ui.label("size");
                ui.add(egui::Slider::new(&mut model.boid_size, 0.05..=1.0))
            });

            ui.horizontal(|ui| {
                ui.label(format!("No. boids: {n:3.}", n = run_options.init_boids));
            });
        });

    // update model
    if model.control_state.execution_paused {
        return;
    }

    flock.update(run_options.dt, obstacles, run_options);
    bird_watcher.watch(flock);
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) -> () {
    let Model {
        ref mut run_options,
        ..
    } = model;

    if key == Key::Space {  // pause the whole simulation
        model.control_state.execution_paused = !model.control_state.execution_paused
    } else if key == Key::C { // show/hide controls
        model.control_state.controls_open = !model.control_state.controls_open
    } else if key == Key::I { // double the flock
        for _ in 0..run_options.init_boids {
            model.flock.insert(run_options);
        }
        run_options.init_boids *= 2;
    } else if key == Key::D { // halve the flock
        if run_options.init_boids == 1 {return}

        let to_delete = run_options.init_boids / 2;
        for _ in 0..to_delete {
            model.flock.delete_last();
        }
        run_options.init_boids -= to_delete;
    } else if key == Key::R { // restart the flock, not the simulation
        model.flock.restart(run_options);
    }
}

fn window_closed(_app: &App, model: &mut Model) {
    let _ = model.bird_watcher.pop_data_save(&model.run_options.save_options);
}

pub trait Drawable {
    fn draw(&self, draw: &Draw, camera: &Camera, win: &Rect, color: &Hsv, size: f32);
}

impl Drawable for Flock {
    fn draw(&self, draw: &Draw, camera: &Camera, win: &Rect, color: &Hsv, size: f32) {
        for b in self.boids() {
            b.draw(draw, camera, win, color, size);
        }
    }
}

impl Drawable for Boid {
    fn draw(&self, draw: &Draw, camera: &Camera, win: &Rect, color: &Hsv, size: f32) {
        let center = match camera.project(self.position, win) {
            Some(p) => p,
            None => return,
        };

        // heading on screen, taken from a point one world unit ahead
        let nose = self.position + self.velocity.normalize_or_zero();
        let theta = match camera.project(nose, win) {
            Some(tip) => (tip - center).angle(),
            None => 0.,
        };

        let s = size * camera.scale(self.position, win);
        // an arrow with a triangle cutout, nose towards the heading
        let vertices = vec![
            pt2(-0.8 * s, 0.6 * s),
            pt2(s, 0.),
            pt2(-0.8 * s, -0.6 * s),
            pt2(-0.5 * s, 0.),
        ];

        draw.polygon()
            .stroke(AZURE)
            .stroke_weight(1.0)
            .points(vertices)
            .xy(center)
            .rotate(theta)
            .hsv(
                color.hue.to_positive_degrees() / 360.,
                color.saturation,
                color.value,
            );
    }
}

fn draw_wire_box<C>(draw: &Draw, camera: &Camera, win: &Rect, min: Vec3, max: Vec3, color: C)
where
    C: IntoLinSrgba<ColorScalar> + Copy,
{
    // corner i encodes its axes bitwise, x = bit 0, y = bit 1, z = bit 2
    let corners: Vec<Option<Vec2>> = (0..8)
        .map(|i| {
            let corner = vec3(
                if i & 1 == 0 { min.x } else { max.x },
                if i & 2 == 0 { min.y } else { max.y },
                if i & 4 == 0 { min.z } else { max.z },
            );
            camera.project(corner, win)
        })
        .collect();

    const EDGES: [(usize, usize); 12] = [
        (0, 1),
        (2, 3),
        (4, 5),
        (6, 7),
        (0, 2),
        (1, 3),
        (4, 6),
        (5, 7),
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];

    for (a, b) in EDGES {
        if let (Some(pa), Some(pb)) = (corners[a], corners[b]) {
            draw.line().start(pa).end(pb).color(color).weight(1.5);
        }
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let win = app.window_rect();

    draw.background().color(srgb(0.10, 0.10, 0.15));

    // faint outline of the volume for orientation
    let bounds = model.flock.bounds();
    draw_wire_box(
        &draw,
        &model.camera,
        &win,
        Vec3::ZERO,
        vec3(bounds.width, bounds.height, bounds.depth),
        srgba(1., 1., 1., 0.12),
    );

    for obstacle in &model.obstacles {
        draw_wire_box(
            &draw,
            &model.camera,
            &win,
            obstacle.position - obstacle.size,
            obstacle.position + obstacle.size,
            srgba(1., 0.15, 0.15, 0.9),
        );
    }

    model
        .flock
        .draw(&draw, &model.camera, &win, &model.color, model.boid_size);

    draw.to_frame(app, &frame).unwrap();
    model.egui.draw_to_frame(&frame).unwrap();
}

fn edit_hsv(ui: &mut egui::Ui, color: &mut Hsv) {
    let mut egui_hsv = egui::color::Hsva::new(
        color.hue.to_positive_radians() as f32 / (std::f32::consts::PI * 2.0),
        color.saturation,
        color.value,
        1.0,
    );

    if egui::color_picker::color_edit_button_hsva(
        ui,
        &mut egui_hsv,
        egui::color_picker::Alpha::Opaque,
    )
    .changed()
    {
        *color = nannou::color::hsv(egui_hsv.h, egui_hsv.s, egui_hsv.v);
    }
}
