use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug)]
pub enum Error {
    InvalidMoveText(String),
    InvalidStackNumber(usize),
    NotEnoughCrates {
        stack_n: usize,
        expect: usize,
        given: usize,
    },
    NoStackNumbering,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidMoveText(s) => write!(
                f,
                "Invalid text({}) for move, expect \"move <n> from <stack> to <stack>\".",
                s
            ),
            Error::InvalidStackNumber(n) => write!(f, "Invalid stack number({}).", n),
            Error::NotEnoughCrates {
                stack_n,
                expect,
                given,
            } => write!(
                f,
                "Expect at least {} crate(s) in stack {}, given {}.",
                expect, stack_n, given
            ),
            Error::NoStackNumbering => {
                write!(f, "No stack numbering line found after the crate drawing.")
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    count: usize,
    from: usize,
    to: usize,
}

impl TryFrom<&str> for Move {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        static MOVE_PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^move (\d+) from (\d+) to (\d+)$").unwrap());

        let caps = MOVE_PATTERN
            .captures(value.trim())
            .ok_or_else(|| Error::InvalidMoveText(value.to_string()))?;
        let number = |ind: usize| {
            caps[ind]
                .parse::<usize>()
                .map_err(|_| Error::InvalidMoveText(value.to_string()))
        };

        Ok(Self {
            count: number(1)?,
            from: number(2)?,
            to: number(3)?,
        })
    }
}

/// Stacks of crates, bottom first, numbered from 1.
#[derive(Debug, Clone)]
pub struct Supplies {
    stacks: Vec<Vec<char>>,
}

impl Supplies {
    /// Moves crates one at a time, so the moved ones end up reversed.
    pub fn move_one_by_one(&mut self, mv: &Move) -> Result<(), Error> {
        self.check(mv)?;
        for _ in 0..mv.count {
            if let Some(c) = self.stack_mut(mv.from)?.pop() {
                self.stack_mut(mv.to)?.push(c);
            }
        }

        Ok(())
    }

    /// Moves crates all at once, keeping their order.
    pub fn move_in_bulk(&mut self, mv: &Move) -> Result<(), Error> {
        let moved = self.take(mv)?;
        self.stack_mut(mv.to)?.extend(moved);

        Ok(())
    }

    /// Crates on top of every non-empty stack.
    pub fn tops(&self) -> String {
        self.stacks.iter().filter_map(|stack| stack.last()).collect()
    }

    fn take(&mut self, mv: &Move) -> Result<Vec<char>, Error> {
        self.check(mv)?;
        let stack = self.stack_mut(mv.from)?;

        Ok(stack.split_off(stack.len() - mv.count))
    }

    /// Both stacks must exist and the source must hold enough crates.
    fn check(&mut self, mv: &Move) -> Result<(), Error> {
        self.stack_mut(mv.to)?;
        let stack = self.stack_mut(mv.from)?;
        if stack.len() < mv.count {
            return Err(Error::NotEnoughCrates {
                stack_n: mv.from,
                expect: mv.count,
                given: stack.len(),
            });
        }

        Ok(())
    }

    fn stack_mut(&mut self, stack_n: usize) -> Result<&mut Vec<char>, Error> {
        stack_n
            .checked_sub(1)
            .and_then(|ind| self.stacks.get_mut(ind))
            .ok_or(Error::InvalidStackNumber(stack_n))
    }
}

#[derive(Debug, Default)]
struct SuppliesBuilder {
    stacks: Vec<Vec<char>>,
}

impl SuppliesBuilder {
    /// Crate letters sit at columns 1, 5, 9 and so on of a drawing row, top row first.
    fn add_row(&mut self, text: &str) {
        for (ind, c) in text.chars().skip(1).step_by(4).enumerate() {
            if self.stacks.len() <= ind {
                self.stacks.resize_with(ind + 1, Vec::new);
            }
            if c.is_ascii_alphabetic() {
                self.stacks[ind].push(c);
            }
        }
    }

    fn build(mut self, stack_count: usize) -> Supplies {
        if self.stacks.len() < stack_count {
            self.stacks.resize_with(stack_count, Vec::new);
        }
        for stack in self.stacks.iter_mut() {
            stack.reverse();
        }

        Supplies {
            stacks: self.stacks,
        }
    }
}

fn is_numbering_line(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit() || c == ' ')
}

pub fn read_procedure<P: AsRef<Path>>(path: P) -> Result<(Supplies, Vec<Move>)> {
    let mut lines = toolkit::input::lines(&path)?;
    let mut builder = SuppliesBuilder::default();
    let mut stack_count = None;
    for line in lines.by_ref() {
        let line = line?;
        if is_numbering_line(&line) {
            stack_count = Some(line.split_ascii_whitespace().count());
            break;
        }
        if !line.trim().is_empty() {
            builder.add_row(&line);
        }
    }
    let supplies = builder.build(stack_count.ok_or(Error::NoStackNumbering)?);

    let mut moves = Vec::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        moves.push(Move::try_from(line.as_str()).with_context(|| {
            format!(
                "Failed to read move from given file({}).",
                path.as_ref().display()
            )
        })?);
    }

    Ok((supplies, moves))
}

pub fn part_one(input_path: &Path) -> Result<String> {
    let (mut supplies, moves) = read_procedure(input_path)?;
    for mv in &moves {
        supplies.move_one_by_one(mv)?;
    }

    Ok(supplies.tops())
}

pub fn part_two(input_path: &Path) -> Result<String> {
    let (mut supplies, moves) = read_procedure(input_path)?;
    for mv in &moves {
        supplies.move_in_bulk(mv)?;
    }

    Ok(supplies.tops())
}
