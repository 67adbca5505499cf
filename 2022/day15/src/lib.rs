use std::{error, fmt::Display, path::Path};

use anyhow::Result;
use clap::Parser;
use once_cell::sync::Lazy;
use regex::Regex;
use toolkit::{interval, Coord, Interval, SparseGraph};
use tracing::debug;

#[derive(Debug)]
pub enum Error {
    InvalidSensorText(String),
    NoDistressBeacon(i64),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidSensorText(s) => write!(
                f,
                "Invalid text({}) for sensor, expect \"Sensor at x=<x>, y=<y>: closest beacon is at x=<x>, y=<y>\".",
                s
            ),
            Error::NoDistressBeacon(max_coord) => write!(
                f,
                "Every position within [0, {}] is covered by some sensor.",
                max_coord
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
#[group(id = "Day15CLIArgs")]
pub struct CLIArgs {
    #[command(flatten)]
    pub common: toolkit::cli::CLIArgs,
    /// Row to count positions without beacon on, in part one.
    #[arg(long, default_value_t = 2_000_000)]
    pub row: i64,
    /// Largest coordinate the distress beacon may have, in part two.
    #[arg(long, default_value_t = 4_000_000)]
    pub max_coord: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Sensor,
    Beacon,
}

#[derive(Debug, Clone, Copy)]
pub struct Sensor {
    pos: Coord,
    beacon: Coord,
}

impl TryFrom<&str> for Sensor {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        static SENSOR_PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^Sensor at x=(-?\d+), y=(-?\d+): closest beacon is at x=(-?\d+), y=(-?\d+)$",
            )
            .unwrap()
        });

        let invalid = || Error::InvalidSensorText(value.to_string());
        let caps = SENSOR_PATTERN.captures(value.trim()).ok_or_else(invalid)?;
        let number = |ind: usize| caps[ind].parse::<i64>().map_err(|_| invalid());

        Ok(Self {
            pos: Coord::new(number(1)?, number(2)?),
            beacon: Coord::new(number(3)?, number(4)?),
        })
    }
}

impl Sensor {
    /// Distance within which no other beacon can be.
    pub fn radius(&self) -> u64 {
        self.pos.manhattan(&self.beacon)
    }

    pub fn covers(&self, coord: &Coord) -> bool {
        self.pos.manhattan(coord) <= self.radius()
    }

    /// Positions of row `y` within this sensor's radius.
    pub fn row_coverage(&self, y: i64) -> Option<Interval> {
        let radius = i64::try_from(self.radius()).ok()?;
        let half_width = radius - (self.pos.y - y).abs();
        Interval::new(self.pos.x - half_width, self.pos.x + half_width)
    }

    /// Positions just out of reach, at distance radius + 1.
    pub fn perimeter(&self) -> impl Iterator<Item = Coord> + '_ {
        let dist = i64::try_from(self.radius()).unwrap_or(i64::MAX - 1) + 1;
        (-dist..=dist).flat_map(move |dx| {
            let dy = dist - dx.abs();
            let upper = self.pos.offset(dx, -dy);
            let lower = (dy != 0).then(|| self.pos.offset(dx, dy));
            std::iter::once(upper).chain(lower)
        })
    }
}

pub struct SensorField {
    sensors: Vec<Sensor>,
    markers: SparseGraph<Coord, Marker>,
}

impl SensorField {
    pub fn new(sensors: Vec<Sensor>) -> Self {
        let mut markers = SparseGraph::new();
        for sensor in &sensors {
            markers.add_node(sensor.beacon, Marker::Beacon);
        }
        for sensor in &sensors {
            markers.add_node(sensor.pos, Marker::Sensor);
        }

        Self { sensors, markers }
    }

    /// Positions on row `y` where no undetected beacon can be.
    pub fn excluded_count(&self, y: i64) -> u64 {
        let reduced = interval::reduce(self.sensors.iter().filter_map(|s| s.row_coverage(y)));
        debug!(
            "Coverage of row {}: {}",
            y,
            reduced
                .iter()
                .map(Interval::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut occupied_n = 0;
        self.markers.for_each_node(|coord, marker| {
            if coord.y == y && reduced.iter().any(|i| i.contains_point(coord.x)) {
                debug!("{:?} at {} is not counted", marker, coord);
                occupied_n += 1;
            }
        });

        interval::covered_len(&reduced) - occupied_n
    }

    /// The only position in `[0, max_coord]` on both axes no sensor covers.
    pub fn distress_beacon(&self, max_coord: i64) -> Option<Coord> {
        let in_range = |c: &Coord| (0..=max_coord).contains(&c.x) && (0..=max_coord).contains(&c.y);
        self.sensors.iter().find_map(|sensor| {
            sensor
                .perimeter()
                .filter(in_range)
                .find(|c| !self.sensors.iter().any(|s| s.covers(c)))
        })
    }
}

pub fn tuning_frequency(coord: &Coord) -> i64 {
    coord.x * 4_000_000 + coord.y
}

pub fn read_sensors<P: AsRef<Path>>(path: P) -> Result<Vec<Sensor>> {
    toolkit::input::parse_lines(path, |s| Sensor::try_from(s))
}

pub fn part_one(input_path: &Path, row: i64) -> Result<u64> {
    let field = SensorField::new(read_sensors(input_path)?);
    Ok(field.excluded_count(row))
}

pub fn part_two(input_path: &Path, max_coord: i64) -> Result<i64> {
    let field = SensorField::new(read_sensors(input_path)?);
    let beacon = field
        .distress_beacon(max_coord)
        .ok_or(Error::NoDistressBeacon(max_coord))?;
    debug!("Distress beacon at {}", beacon);

    Ok(tuning_frequency(&beacon))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(text: &str) -> Sensor {
        Sensor::try_from(text).unwrap()
    }

    #[test]
    fn coverage_shrinks_away_from_sensor_row() {
        let s = sensor("Sensor at x=8, y=7: closest beacon is at x=2, y=10");
        assert_eq!(s.radius(), 9);
        assert_eq!(s.row_coverage(7), Interval::new(-1, 17));
        assert_eq!(s.row_coverage(16), Interval::new(8, 8));
        assert_eq!(s.row_coverage(17), None);
        assert_eq!(s.row_coverage(-3), None);
    }

    #[test]
    fn perimeter_is_just_out_of_reach() {
        let s = sensor("Sensor at x=0, y=0: closest beacon is at x=1, y=0");
        let perimeter = s.perimeter().collect::<Vec<_>>();
        assert_eq!(perimeter.len(), 8);
        assert!(perimeter.iter().all(|c| c.manhattan(&Coord::new(0, 0)) == 2));
        assert!(perimeter.iter().all(|c| !s.covers(c)));
    }

    #[test]
    fn markers_on_row_are_not_counted() {
        let field = SensorField::new(vec![sensor(
            "Sensor at x=0, y=0: closest beacon is at x=2, y=0",
        )]);
        assert_eq!(field.excluded_count(0), 3);
        assert_eq!(field.excluded_count(1), 3);
        assert_eq!(field.excluded_count(2), 1);
    }

    #[test]
    fn negative_coordinates_and_bad_lines() {
        let s = sensor("Sensor at x=-2, y=18: closest beacon is at x=-2, y=15");
        assert_eq!(s.radius(), 3);
        assert!(Sensor::try_from("Sensor at x=2, y=18").is_err());
        assert!(Sensor::try_from("Sensor at x=a, y=1: closest beacon is at x=1, y=1").is_err());
    }
}
