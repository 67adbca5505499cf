use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};

#[derive(Debug)]
pub enum Error {
    InvalidCaloriesText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidCaloriesText(s) => write!(f, "Invalid text({}) for calories.", s),
        }
    }
}

impl error::Error for Error {}

/// Food carried by one elf, in calories per item.
#[derive(Debug)]
pub struct Elf {
    calories: Vec<u64>,
}

impl TryFrom<&[String]> for Elf {
    type Error = Error;

    fn try_from(value: &[String]) -> std::result::Result<Self, Self::Error> {
        let calories = value
            .iter()
            .map(|s| {
                s.trim()
                    .parse::<u64>()
                    .map_err(|_| Error::InvalidCaloriesText(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { calories })
    }
}

impl Elf {
    pub fn total(&self) -> u64 {
        self.calories.iter().sum()
    }
}

/// Sum of the `n` largest totals among given elves.
pub fn top_totals(elves: &[Elf], n: usize) -> u64 {
    let mut totals = elves.iter().map(Elf::total).collect::<Vec<_>>();
    totals.sort_unstable_by(|a, b| b.cmp(a));
    totals.iter().take(n).sum()
}

pub fn read_elves<P: AsRef<Path>>(path: P) -> Result<Vec<Elf>> {
    toolkit::input::read_records(&path)?
        .iter()
        .enumerate()
        .map(|(ind, record)| {
            Elf::try_from(record.as_slice()).with_context(|| {
                format!(
                    "Failed to read elf {} from given file({}).",
                    ind + 1,
                    path.as_ref().display()
                )
            })
        })
        .collect()
}

pub fn part_one(input_path: &Path) -> Result<u64> {
    Ok(top_totals(&read_elves(input_path)?, 1))
}

pub fn part_two(input_path: &Path) -> Result<u64> {
    Ok(top_totals(&read_elves(input_path)?, 3))
}
