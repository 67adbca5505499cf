use std::{collections::HashSet, error, fmt::Display, path::Path};

use anyhow::Result;
use toolkit::Coord;

#[derive(Debug)]
pub enum Error {
    InvalidMotionText(String),
    InvalidDirectionText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidMotionText(s) => write!(
                f,
                "Invalid text({}) for motion, expect \"<direction> <steps>\".",
                s
            ),
            Error::InvalidDirectionText(s) => write!(
                f,
                "Invalid text({}) for direction, expect one of U, D, L and R.",
                s
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl TryFrom<&str> for Direction {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value {
            "U" => Ok(Direction::Up),
            "R" => Ok(Direction::Right),
            "D" => Ok(Direction::Down),
            "L" => Ok(Direction::Left),
            _ => Err(Error::InvalidDirectionText(value.to_string())),
        }
    }
}

impl Direction {
    fn step(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => coord.offset(0, -1),
            Direction::Right => coord.offset(1, 0),
            Direction::Down => coord.offset(0, 1),
            Direction::Left => coord.offset(-1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Motion {
    dir: Direction,
    steps: usize,
}

impl TryFrom<&str> for Motion {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let (dir, steps) = value
            .trim()
            .split_once(' ')
            .ok_or_else(|| Error::InvalidMotionText(value.to_string()))?;
        let steps = steps
            .parse::<usize>()
            .map_err(|_| Error::InvalidMotionText(value.to_string()))?;

        Ok(Self {
            dir: Direction::try_from(dir)?,
            steps,
        })
    }
}

/// Knots of a rope, the head first.
#[derive(Debug, Clone)]
pub struct Rope {
    knots: Vec<Coord>,
}

impl Rope {
    pub fn new(knot_n: usize) -> Self {
        assert!(knot_n > 0, "A rope needs at least one knot.");
        Self {
            knots: vec![Coord::new(0, 0); knot_n],
        }
    }

    pub fn tail(&self) -> Coord {
        self.knots[self.knots.len() - 1]
    }

    /// Moves the head one step, every other knot follows the one before it.
    pub fn step(&mut self, dir: Direction) {
        self.knots[0] = dir.step(&self.knots[0]);
        for ind in 1..self.knots.len() {
            let leader = self.knots[ind - 1];
            let knot = &mut self.knots[ind];
            let (dx, dy) = (leader.x - knot.x, leader.y - knot.y);
            if dx.abs().max(dy.abs()) <= 1 {
                break;
            }
            *knot = knot.offset(dx.signum(), dy.signum());
        }
    }
}

/// Number of distinct positions the tail of a `knot_n` rope visits.
pub fn tail_visit_count(motions: &[Motion], knot_n: usize) -> usize {
    let mut rope = Rope::new(knot_n);
    let mut visited = HashSet::from([rope.tail()]);
    for motion in motions {
        for _ in 0..motion.steps {
            rope.step(motion.dir);
            visited.insert(rope.tail());
        }
    }

    visited.len()
}

pub fn read_motions<P: AsRef<Path>>(path: P) -> Result<Vec<Motion>> {
    toolkit::input::parse_lines(path, |s| Motion::try_from(s))
}

pub fn part_one(input_path: &Path) -> Result<usize> {
    Ok(tail_visit_count(&read_motions(input_path)?, 2))
}

pub fn part_two(input_path: &Path) -> Result<usize> {
    Ok(tail_visit_count(&read_motions(input_path)?, 10))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tail_follows_diagonally() {
        let mut rope = Rope::new(2);
        rope.step(Direction::Up);
        rope.step(Direction::Right);
        assert_eq!(rope.tail(), Coord::new(0, 0));
        rope.step(Direction::Up);
        assert_eq!(rope.tail(), Coord::new(1, -1));
    }

    #[test]
    fn single_knot_rope_tracks_head() {
        let motions = [Motion::try_from("R 3").unwrap()];
        assert_eq!(tail_visit_count(&motions, 1), 4);
    }

    #[test]
    fn malformed_motions() {
        assert!(Motion::try_from("X 3").is_err());
        assert!(Motion::try_from("R three").is_err());
        assert!(Motion::try_from("R").is_err());
    }
}
