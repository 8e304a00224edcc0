use std::{fs::OpenOptions, mem};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{flock::Flock, options::SaveOptions};

/// One sampled boid position, flattened for CSV.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct BoidData {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub time: u64,
}

/// Accumulates positional samples of a flock for offline analysis.
pub struct Birdwatcher {
    locations: Vec<BoidData>,
    render_ticker: u64,
    sample_rate: u64,
}

const PREFIX: &'static str = "boids3d-data";

impl Birdwatcher {
    pub fn new(sample_rate: u64) -> Self {
        Birdwatcher {
            locations: Vec::new(),
            render_ticker: 0,
            sample_rate,
        }
    }

    /// Triggers data collection, records every `sample_rate`-th call
    pub fn watch(&mut self, flock: &Flock) {
        if !self.should_sample() {
            return;
        }

        let mut current_locations: Vec<BoidData> = flock
            .boids()
            .iter()
            .map(|b| BoidData {
                id: b.id,
                x: b.position.x,
                y: b.position.y,
                z: b.position.z,
                time: self.render_ticker / self.sample_rate,
            })
            .collect();

        self.locations.append(&mut current_locations);
    }

    pub fn restart(&mut self) {
        self.locations.clear();
    }

    pub fn pop_data(&mut self) -> Vec<BoidData> {
        mem::take(&mut self.locations)
    }

    /// Saves the latest data in CSV format, then returns it while emptying the birdwatcher's memory
    ///
    /// Depending on save options, either attempts to overwrite the current file or writes a new timestamped file
    pub fn pop_data_save(&mut self, save_options: &SaveOptions) -> Vec<BoidData> {
        let data = self.pop_data();

        if !save_options.save_locations {
            return data;
        }

        if let Some(path) = &save_options.save_locations_path {
            let file_path = format!(
                "{path}{file_name}",
                file_name = Birdwatcher::get_dataset_name(save_options, Utc::now())
            );

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(file_path)
                .expect("Can't open file");
            let mut wtr = csv::Writer::from_writer(file);

            data.iter().for_each(|b| {
                wtr.serialize(b).expect("Can't serialize data point");
            });
            wtr.flush().expect("Can't write data file");
        }

        data
    }

    fn get_dataset_name(save_options: &SaveOptions, now: DateTime<Utc>) -> String {
        match save_options.save_locations_timestamp {
            true => {
                let datetime_part = now.timestamp_millis();
                format!(
                    "{prefix}_{datetime}.csv",
                    prefix = PREFIX,
                    datetime = datetime_part
                )
            }
            false => format!("{prefix}.csv", prefix = PREFIX),
        }
    }

    fn should_sample(&mut self) -> bool {
        self.render_ticker += 1;

        self.render_ticker % self.sample_rate == 0
    }
}
