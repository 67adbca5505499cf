use std::{error, fmt::Display, path::Path};

use anyhow::Result;
use int_enum::IntEnum;

#[derive(Debug)]
pub enum Error {
    InvalidRoundText(String),
    InvalidShapeLetter(char),
    InvalidOutcomeLetter(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRoundText(s) => write!(
                f,
                "Invalid text({}) for round, expect two letters separated by a space.",
                s
            ),
            Error::InvalidShapeLetter(c) => write!(f, "Invalid letter({}) for shape.", c),
            Error::InvalidOutcomeLetter(c) => write!(f, "Invalid letter({}) for outcome.", c),
        }
    }
}

impl error::Error for Error {}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntEnum)]
pub enum Shape {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

impl TryFrom<char> for Shape {
    type Error = Error;

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        match value {
            'A' | 'X' => Ok(Shape::Rock),
            'B' | 'Y' => Ok(Shape::Paper),
            'C' | 'Z' => Ok(Shape::Scissors),
            _ => Err(Error::InvalidShapeLetter(value)),
        }
    }
}

impl Shape {
    pub fn score(&self) -> u64 {
        u64::from(u8::from(*self)) + 1
    }

    /// The shape this one defeats.
    pub fn defeats(&self) -> Shape {
        Shape::try_from((u8::from(*self) + 2) % 3).unwrap()
    }

    /// The shape that defeats this one.
    pub fn defeated_by(&self) -> Shape {
        Shape::try_from((u8::from(*self) + 1) % 3).unwrap()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Loss,
    Draw,
    Win,
}

impl TryFrom<char> for Outcome {
    type Error = Error;

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        match value {
            'X' => Ok(Outcome::Loss),
            'Y' => Ok(Outcome::Draw),
            'Z' => Ok(Outcome::Win),
            _ => Err(Error::InvalidOutcomeLetter(value)),
        }
    }
}

impl Outcome {
    pub fn of(opponent: Shape, mine: Shape) -> Self {
        if mine == opponent {
            Outcome::Draw
        } else if mine.defeats() == opponent {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    pub fn score(&self) -> u64 {
        match self {
            Outcome::Loss => 0,
            Outcome::Draw => 3,
            Outcome::Win => 6,
        }
    }

    /// The shape to throw against `opponent` to end with this outcome.
    pub fn shape_against(&self, opponent: Shape) -> Shape {
        match self {
            Outcome::Loss => opponent.defeats(),
            Outcome::Draw => opponent,
            Outcome::Win => opponent.defeated_by(),
        }
    }
}

/// The two letters of a strategy guide line, interpreted later.
#[derive(Debug, Clone, Copy)]
pub struct Round {
    left: char,
    right: char,
}

impl TryFrom<&str> for Round {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let mut letters = value.split_ascii_whitespace();
        match (letters.next(), letters.next(), letters.next()) {
            (Some(left), Some(right), None) if left.len() == 1 && right.len() == 1 => Ok(Self {
                left: left.chars().next().unwrap(),
                right: right.chars().next().unwrap(),
            }),
            _ => Err(Error::InvalidRoundText(value.to_string())),
        }
    }
}

impl Round {
    fn opponent(&self) -> Result<Shape, Error> {
        Shape::try_from(self.left).and_then(|shape| match self.left {
            'A'..='C' => Ok(shape),
            _ => Err(Error::InvalidShapeLetter(self.left)),
        })
    }

    /// Score when the right letter names the shape to throw.
    pub fn score_as_shape(&self) -> Result<u64, Error> {
        let opponent = self.opponent()?;
        let mine = Shape::try_from(self.right)?;
        Ok(mine.score() + Outcome::of(opponent, mine).score())
    }

    /// Score when the right letter names the outcome to reach.
    pub fn score_as_outcome(&self) -> Result<u64, Error> {
        let opponent = self.opponent()?;
        let outcome = Outcome::try_from(self.right)?;
        Ok(outcome.shape_against(opponent).score() + outcome.score())
    }
}

pub fn read_rounds<P: AsRef<Path>>(path: P) -> Result<Vec<Round>> {
    toolkit::input::parse_lines(path, |s| Round::try_from(s))
}

pub fn part_one(input_path: &Path) -> Result<u64> {
    read_rounds(input_path)?
        .iter()
        .map(|round| round.score_as_shape().map_err(anyhow::Error::from))
        .sum()
}

pub fn part_two(input_path: &Path) -> Result<u64> {
    read_rounds(input_path)?
        .iter()
        .map(|round| round.score_as_outcome().map_err(anyhow::Error::from))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_cycle() {
        assert_eq!(Shape::Rock.defeats(), Shape::Scissors);
        assert_eq!(Shape::Scissors.defeats(), Shape::Paper);
        assert_eq!(Shape::Paper.defeated_by(), Shape::Scissors);
        assert_eq!(Outcome::of(Shape::Paper, Shape::Rock), Outcome::Loss);
    }

    #[test]
    fn round_scores() {
        let round = Round::try_from("C Z").unwrap();
        assert_eq!(round.score_as_shape().unwrap(), 6);
        assert_eq!(round.score_as_outcome().unwrap(), 7);
        assert!(Round::try_from("X A").unwrap().score_as_shape().is_err());
        assert!(Round::try_from("A").is_err());
    }
}
