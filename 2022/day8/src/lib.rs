use std::{error, fmt::Display, iter, path::Path};

use anyhow::{Context, Result};
use toolkit::Coord;

#[derive(Debug)]
pub enum Error {
    InconsistentRow(usize, usize),
    InvalidChar(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} tree(s) in one row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::InvalidChar(c) => write!(f, "Invalid character({}) for tree height.", c),
        }
    }
}

impl error::Error for Error {}

pub struct Forest {
    heights: Vec<u8>,
    row_n: usize,
    col_n: usize,
}

impl Forest {
    pub fn positions(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.row_n).flat_map(move |r| {
            (0..self.col_n).map(move |c| {
                Coord::new(i64::try_from(c).unwrap(), i64::try_from(r).unwrap())
            })
        })
    }

    /// Whether every tree between `pos` and some edge is shorter than the one at `pos`.
    pub fn is_visible(&self, pos: &Coord) -> bool {
        let Some(height) = self.height(pos) else {
            return false;
        };

        Coord::STEPS4
            .iter()
            .any(|step| self.sight_line(pos, *step).all(|h| h < height))
    }

    /// Product of the viewing distances in all four directions.
    pub fn scenic_score(&self, pos: &Coord) -> usize {
        let Some(height) = self.height(pos) else {
            return 0;
        };

        Coord::STEPS4
            .iter()
            .map(|step| {
                let mut distance = 0;
                for h in self.sight_line(pos, *step) {
                    distance += 1;
                    if h >= height {
                        break;
                    }
                }
                distance
            })
            .product()
    }

    /// Heights of the trees from `pos` (excluded) toward the edge, `step` at a time.
    fn sight_line(&self, pos: &Coord, step: (i64, i64)) -> impl Iterator<Item = u8> + '_ {
        let (dx, dy) = step;
        iter::successors(Some(*pos), move |p| Some(p.offset(dx, dy)))
            .skip(1)
            .map_while(|p| self.height(&p))
    }

    fn height(&self, pos: &Coord) -> Option<u8> {
        let r = usize::try_from(pos.y).ok()?;
        let c = usize::try_from(pos.x).ok()?;
        if r < self.row_n && c < self.col_n {
            self.heights.get(r * self.col_n + c).copied()
        } else {
            None
        }
    }
}

struct ForestBuilder {
    heights: Vec<u8>,
    row_n: usize,
    col_n: Option<usize>,
}

impl ForestBuilder {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            row_n: 0,
            col_n: None,
        }
    }

    pub fn add_row(&mut self, text: &str) -> Result<(), Error> {
        let this_col_n = text.chars().count();
        let col_n = *self.col_n.get_or_insert(this_col_n);
        if col_n != this_col_n {
            return Err(Error::InconsistentRow(col_n, this_col_n));
        }

        for c in text.chars() {
            let height = c.to_digit(10).ok_or(Error::InvalidChar(c))?;
            self.heights.push(u8::try_from(height).unwrap());
        }
        self.row_n += 1;

        Ok(())
    }

    pub fn build(self) -> Forest {
        Forest {
            heights: self.heights,
            row_n: self.row_n,
            col_n: self.col_n.unwrap_or(0),
        }
    }
}

pub fn read_forest<P: AsRef<Path>>(path: P) -> Result<Forest> {
    let mut builder = ForestBuilder::new();
    for (ind, line) in toolkit::input::lines(&path)?.enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        builder.add_row(line).with_context(|| {
            format!(
                "Failed to read row {} of given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
    }

    Ok(builder.build())
}

pub fn part_one(input_path: &Path) -> Result<usize> {
    let forest = read_forest(input_path)?;
    Ok(forest.positions().filter(|p| forest.is_visible(p)).count())
}

pub fn part_two(input_path: &Path) -> Result<usize> {
    let forest = read_forest(input_path)?;
    Ok(forest
        .positions()
        .map(|p| forest.scenic_score(&p))
        .max()
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Forest {
        let mut builder = ForestBuilder::new();
        for row in ["30373", "25512", "65332", "33549", "35390"] {
            builder.add_row(row).unwrap();
        }
        builder.build()
    }

    #[test]
    fn edges_are_visible() {
        let forest = forest();
        assert!(forest.is_visible(&Coord::new(2, 0)));
        assert!(forest.is_visible(&Coord::new(4, 4)));
        assert!(forest.is_visible(&Coord::new(1, 1)));
        assert!(!forest.is_visible(&Coord::new(2, 2)));
        assert!(!forest.is_visible(&Coord::new(5, 0)));
    }

    #[test]
    fn scenic_scores() {
        let forest = forest();
        assert_eq!(forest.scenic_score(&Coord::new(2, 1)), 4);
        assert_eq!(forest.scenic_score(&Coord::new(2, 3)), 8);
        assert_eq!(forest.scenic_score(&Coord::new(0, 0)), 0);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut builder = ForestBuilder::new();
        builder.add_row("123").unwrap();
        assert!(matches!(
            builder.add_row("12"),
            Err(Error::InconsistentRow(3, 2))
        ));
    }
}
