use std::{error, fmt::Display, path::Path};

use anyhow::Result;
use toolkit::{Coord, SparseGraph};
use tracing::trace;

#[derive(Debug)]
pub enum Error {
    InvalidPointText(String),
    DiagonalSegment(Coord, Coord),
    NoRock,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidPointText(s) => {
                write!(f, "Invalid text({}) for point, expect \"<x>,<y>\".", s)
            }
            Error::DiagonalSegment(from, to) => write!(
                f,
                "Rock segment from {} to {} is neither horizontal nor vertical.",
                from, to
            ),
            Error::NoRock => write!(f, "No rock found in the scan."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Rock,
    Sand,
    Source,
}

impl Cell {
    pub fn symbol(&self) -> char {
        match self {
            Cell::Rock => '#',
            Cell::Sand => 'o',
            Cell::Source => '+',
        }
    }
}

/// Rock path from a scan line, one point after another.
#[derive(Debug, Clone)]
pub struct RockPath {
    points: Vec<Coord>,
}

impl TryFrom<&str> for RockPath {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let points = value
            .split("->")
            .map(|point| {
                let invalid = || Error::InvalidPointText(point.trim().to_string());
                let (x, y) = point.trim().split_once(',').ok_or_else(invalid)?;
                Ok(Coord::new(
                    x.parse::<i64>().map_err(|_| invalid())?,
                    y.parse::<i64>().map_err(|_| invalid())?,
                ))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        for pair in points.windows(2) {
            if pair[0].x != pair[1].x && pair[0].y != pair[1].y {
                return Err(Error::DiagonalSegment(pair[0], pair[1]));
            }
        }

        Ok(Self { points })
    }
}

impl RockPath {
    fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        let single = self.points.first().filter(|_| self.points.len() == 1).copied();
        single.into_iter().chain(self.points.windows(2).flat_map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let (dx, dy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
            let len = (to.x - from.x).abs().max((to.y - from.y).abs());
            (0..=len).map(move |i| from.offset(dx * i, dy * i))
        }))
    }
}

/// Outcome of dropping one unit of sand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fall {
    Rest(Coord),
    Void,
}

pub struct Cave {
    cells: SparseGraph<Coord, Cell>,
    source: Coord,
    lowest_rock_y: i64,
    floor_y: Option<i64>,
}

impl Cave {
    pub const SOURCE: Coord = Coord { x: 500, y: 0 };

    pub fn new(paths: &[RockPath]) -> Result<Self, Error> {
        let mut cells = SparseGraph::new();
        for coord in paths.iter().flat_map(RockPath::coords) {
            cells.add_node(coord, Cell::Rock);
        }
        let mut lowest_rock_y = None;
        cells.for_each_node(|coord, _| {
            lowest_rock_y = Some(lowest_rock_y.map_or(coord.y, |y: i64| y.max(coord.y)));
        });
        let lowest_rock_y = lowest_rock_y.ok_or(Error::NoRock)?;
        cells.add_node(Self::SOURCE, Cell::Source);

        Ok(Self {
            cells,
            source: Self::SOURCE,
            lowest_rock_y,
            floor_y: None,
        })
    }

    /// Adds an infinite floor two levels below the lowest rock.
    pub fn with_floor(mut self) -> Self {
        self.floor_y = Some(self.lowest_rock_y + 2);
        self
    }

    pub fn is_blocked(&self, coord: &Coord) -> bool {
        self.floor_y.is_some_and(|floor_y| coord.y >= floor_y)
            || self
                .cells
                .node(coord)
                .is_some_and(|cell| *cell != Cell::Source)
    }

    /// Drops one unit of sand from the source, it tries down, down-left then down-right.
    pub fn drop_sand(&mut self) -> Fall {
        let mut pos = self.source;
        loop {
            if self.floor_y.is_none() && pos.y > self.lowest_rock_y {
                return Fall::Void;
            }

            let next = [pos.offset(0, 1), pos.offset(-1, 1), pos.offset(1, 1)]
                .into_iter()
                .find(|c| !self.is_blocked(c));
            match next {
                Some(next) => pos = next,
                None => {
                    self.cells.add_node(pos, Cell::Sand);
                    return Fall::Rest(pos);
                }
            }
        }
    }

    /// Units of sand coming to rest before one falls into the void or the source is blocked.
    pub fn fill(&mut self) -> usize {
        let mut rest_n = 0;
        while let Fall::Rest(pos) = self.drop_sand() {
            rest_n += 1;
            if pos == self.source {
                break;
            }
        }

        rest_n
    }

    /// Smallest region holding every rock, sand and the source.
    pub fn bounds(&self) -> (Coord, Coord) {
        let (mut min, mut max) = (self.source, self.source);
        self.cells.for_each_node(|coord, _| {
            min = Coord::new(min.x.min(coord.x), min.y.min(coord.y));
            max = Coord::new(max.x.max(coord.x), max.y.max(coord.y));
        });

        (min, max)
    }

    /// Picture of the region between `top_left` and `bottom_right`, inclusive.
    pub fn draw(&self, top_left: Coord, bottom_right: Coord) -> String {
        (top_left.y..=bottom_right.y)
            .map(|y| {
                (top_left.x..=bottom_right.x)
                    .map(|x| {
                        let coord = Coord::new(x, y);
                        match self.cells.node(&coord) {
                            Some(cell) => cell.symbol(),
                            None if self.floor_y.is_some_and(|f| y >= f) => '#',
                            None => '.',
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn trace_cave(cave: &Cave) {
    if tracing::enabled!(tracing::Level::TRACE) {
        let (top_left, bottom_right) = cave.bounds();
        trace!("Cave:\n{}", cave.draw(top_left, bottom_right));
    }
}

pub fn read_paths<P: AsRef<Path>>(path: P) -> Result<Vec<RockPath>> {
    toolkit::input::parse_lines(path, |s| RockPath::try_from(s))
}

pub fn part_one(input_path: &Path) -> Result<usize> {
    let mut cave = Cave::new(&read_paths(input_path)?)?;
    let rest_n = cave.fill();
    trace_cave(&cave);

    Ok(rest_n)
}

pub fn part_two(input_path: &Path) -> Result<usize> {
    let mut cave = Cave::new(&read_paths(input_path)?)?.with_floor();
    let rest_n = cave.fill();
    trace_cave(&cave);

    Ok(rest_n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cave() -> Cave {
        let paths = ["498,4 -> 498,6 -> 496,6", "503,4 -> 502,4 -> 502,9 -> 494,9"]
            .into_iter()
            .map(|s| RockPath::try_from(s).unwrap())
            .collect::<Vec<_>>();
        Cave::new(&paths).unwrap()
    }

    #[test]
    fn first_grains_settle_on_rock() {
        let mut cave = cave();
        assert_eq!(cave.drop_sand(), Fall::Rest(Coord::new(500, 8)));
        assert_eq!(cave.drop_sand(), Fall::Rest(Coord::new(499, 8)));
        assert_eq!(cave.drop_sand(), Fall::Rest(Coord::new(501, 8)));
    }

    #[test]
    fn drawing_shows_every_cell() {
        let mut cave = cave();
        cave.drop_sand();
        let (top_left, bottom_right) = cave.bounds();
        assert_eq!(top_left, Coord::new(494, 0));
        assert_eq!(bottom_right, Coord::new(503, 9));

        let picture = cave.draw(top_left, bottom_right);
        let rows = picture.lines().collect::<Vec<_>>();
        assert_eq!(rows[0], "......+...");
        assert_eq!(rows[4], "....#...##");
        assert_eq!(rows[8], "......o.#.");
        assert_eq!(rows[9], "#########.");
    }

    #[test]
    fn floor_catches_everything() {
        let paths = [RockPath::try_from("500,5").unwrap()];
        let mut cave = Cave::new(&paths).unwrap();
        assert_eq!(cave.drop_sand(), Fall::Void);

        let mut cave = Cave::new(&paths).unwrap().with_floor();
        assert_eq!(cave.drop_sand(), Fall::Rest(Coord::new(499, 6)));
        assert_eq!(cave.drop_sand(), Fall::Rest(Coord::new(498, 6)));
    }

    #[test]
    fn bad_scan_lines() {
        assert!(matches!(
            RockPath::try_from("1,1 -> 2,2"),
            Err(Error::DiagonalSegment(_, _))
        ));
        assert!(matches!(
            RockPath::try_from("1,1 -> 2"),
            Err(Error::InvalidPointText(_))
        ));
    }
}
