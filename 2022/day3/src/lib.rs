use std::{error, fmt::Display, path::Path};

use anyhow::Result;

#[derive(Debug)]
pub enum Error {
    InvalidItemChar(char),
    OddItemCount(usize),
    IncompleteGroup(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidItemChar(c) => {
                write!(f, "Invalid character({}) for item, expect a letter.", c)
            }
            Error::OddItemCount(n) => write!(
                f,
                "Expect an even number of items in rucksack, given {}.",
                n
            ),
            Error::IncompleteGroup(n) => write!(
                f,
                "Expect rucksacks grouped by three, given {} left over.",
                n
            ),
        }
    }
}

impl error::Error for Error {}

/// Set of item types, one bit per priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ItemSet(u64);

impl ItemSet {
    fn from_items(items: &[u8]) -> Self {
        Self(items.iter().fold(0, |bits, p| bits | (1u64 << *p)))
    }

    fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Priority of the lowest item in the set, 0 when empty.
    fn min_priority(self) -> u64 {
        if self.0 == 0 {
            0
        } else {
            u64::from(self.0.trailing_zeros())
        }
    }
}

/// Lowercase items a through z have priorities 1 through 26, uppercase A through Z 27 through 52.
pub fn priority(item: char) -> Result<u8, Error> {
    match item {
        'a'..='z' => Ok(item as u8 - b'a' + 1),
        'A'..='Z' => Ok(item as u8 - b'A' + 27),
        _ => Err(Error::InvalidItemChar(item)),
    }
}

#[derive(Debug)]
pub struct Rucksack {
    items: Vec<u8>,
}

impl TryFrom<&str> for Rucksack {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let items = value
            .trim()
            .chars()
            .map(priority)
            .collect::<Result<Vec<_>, _>>()?;
        if items.len() % 2 != 0 {
            return Err(Error::OddItemCount(items.len()));
        }

        Ok(Self { items })
    }
}

impl Rucksack {
    /// Priority of the item type found in both compartments.
    pub fn misplaced_priority(&self) -> u64 {
        let (left, right) = self.items.split_at(self.items.len() / 2);
        ItemSet::from_items(left)
            .intersect(ItemSet::from_items(right))
            .min_priority()
    }

    fn item_set(&self) -> ItemSet {
        ItemSet::from_items(&self.items)
    }
}

/// Priority of the badge item shared by every rucksack of the group.
pub fn badge_priority(group: &[Rucksack]) -> u64 {
    group
        .iter()
        .map(Rucksack::item_set)
        .reduce(ItemSet::intersect)
        .map(ItemSet::min_priority)
        .unwrap_or(0)
}

pub fn read_rucksacks<P: AsRef<Path>>(path: P) -> Result<Vec<Rucksack>> {
    toolkit::input::parse_lines(path, |s| Rucksack::try_from(s))
}

pub fn part_one(input_path: &Path) -> Result<u64> {
    Ok(read_rucksacks(input_path)?
        .iter()
        .map(Rucksack::misplaced_priority)
        .sum())
}

pub fn part_two(input_path: &Path) -> Result<u64> {
    let rucksacks = read_rucksacks(input_path)?;
    let left_over = rucksacks.len() % 3;
    if left_over != 0 {
        return Err(Error::IncompleteGroup(left_over).into());
    }

    Ok(rucksacks.chunks(3).map(badge_priority).sum())
}
