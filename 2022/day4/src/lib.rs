use std::{error, fmt::Display, path::Path};

use anyhow::Result;
use toolkit::Interval;

#[derive(Debug)]
pub enum Error {
    InvalidPairText(String),
    InvalidRangeText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidPairText(s) => write!(
                f,
                "Invalid text({}) for assignment pair, expect two ranges separated by a comma.",
                s
            ),
            Error::InvalidRangeText(s) => write!(
                f,
                "Invalid text({}) for section range, expect \"<first>-<last>\".",
                s
            ),
        }
    }
}

impl error::Error for Error {}

fn parse_range(text: &str) -> Result<Interval, Error> {
    let invalid = || Error::InvalidRangeText(text.to_string());
    let (lo, hi) = text.split_once('-').ok_or_else(invalid)?;
    let lo = lo.trim().parse::<i64>().map_err(|_| invalid())?;
    let hi = hi.trim().parse::<i64>().map_err(|_| invalid())?;

    Interval::new(lo, hi).ok_or_else(invalid)
}

/// Section ranges assigned to a pair of elves.
#[derive(Debug)]
pub struct AssignmentPair {
    left: Interval,
    right: Interval,
}

impl TryFrom<&str> for AssignmentPair {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let (left, right) = value
            .split_once(',')
            .ok_or_else(|| Error::InvalidPairText(value.to_string()))?;

        Ok(Self {
            left: parse_range(left)?,
            right: parse_range(right)?,
        })
    }
}

impl AssignmentPair {
    pub fn fully_contained(&self) -> bool {
        self.left.contains(&self.right) || self.right.contains(&self.left)
    }

    pub fn overlapped(&self) -> bool {
        self.left.overlaps(&self.right)
    }
}

pub fn read_pairs<P: AsRef<Path>>(path: P) -> Result<Vec<AssignmentPair>> {
    toolkit::input::parse_lines(path, |s| AssignmentPair::try_from(s))
}

pub fn part_one(input_path: &Path) -> Result<usize> {
    Ok(read_pairs(input_path)?
        .iter()
        .filter(|pair| pair.fully_contained())
        .count())
}

pub fn part_two(input_path: &Path) -> Result<usize> {
    Ok(read_pairs(input_path)?
        .iter()
        .filter(|pair| pair.overlapped())
        .count())
}
