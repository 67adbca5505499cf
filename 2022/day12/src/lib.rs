use std::{error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use toolkit::{path::shortest_path_len, Coord, SparseGraph};

#[derive(Debug)]
pub enum Error {
    InvalidChar(char),
    DuplicateMarker(char, Coord, Coord),
    NoStart,
    NoEnd,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidChar(c) => write!(
                f,
                "Invalid character({}) in height map, expect S, E or a lowercase letter.",
                c
            ),
            Error::DuplicateMarker(c, first, second) => write!(
                f,
                "Found marker {} at both {} and {}, expect only one.",
                c, first, second
            ),
            Error::NoStart => write!(f, "No start(S) found in height map."),
            Error::NoEnd => write!(f, "No end(E) found in height map."),
        }
    }
}

impl error::Error for Error {}

/// Elevation grid where a step may climb at most one level and descend any number.
#[derive(Debug)]
pub struct HeightMap {
    graph: SparseGraph<Coord, u8>,
    start: Coord,
    end: Coord,
}

impl HeightMap {
    pub fn steps_from_start(&self) -> Option<usize> {
        shortest_path_len(&self.graph, [self.start], &self.end)
    }

    /// Fewest steps to the end from the start or any square at the lowest elevation.
    pub fn steps_from_lowest(&self) -> Option<usize> {
        let mut starts = vec![self.start];
        self.graph.for_each_node(|coord, elevation| {
            if *elevation == 0 {
                starts.push(*coord);
            }
        });

        shortest_path_len(&self.graph, starts, &self.end)
    }
}

#[derive(Debug, Default)]
struct HeightMapBuilder {
    graph: SparseGraph<Coord, u8>,
    row_n: i64,
    start: Option<Coord>,
    end: Option<Coord>,
}

impl HeightMapBuilder {
    fn add_row(&mut self, text: &str) -> Result<(), Error> {
        for (x, c) in (0..).zip(text.chars()) {
            let coord = Coord::new(x, self.row_n);
            let elevation = match c {
                'S' => {
                    Self::mark(&mut self.start, c, coord)?;
                    0
                }
                'E' => {
                    Self::mark(&mut self.end, c, coord)?;
                    b'z' - b'a'
                }
                'a'..='z' => c as u8 - b'a',
                _ => return Err(Error::InvalidChar(c)),
            };
            self.graph.add_node(coord, elevation);
        }
        self.row_n += 1;

        Ok(())
    }

    fn mark(marker: &mut Option<Coord>, c: char, coord: Coord) -> Result<(), Error> {
        match marker {
            Some(first) => Err(Error::DuplicateMarker(c, *first, coord)),
            None => {
                *marker = Some(coord);
                Ok(())
            }
        }
    }

    fn build(mut self) -> Result<HeightMap, Error> {
        let start = self.start.ok_or(Error::NoStart)?;
        let end = self.end.ok_or(Error::NoEnd)?;
        self.graph
            .link_grid_neighbors(|from, to| i16::from(*to) <= i16::from(*from) + 1);

        Ok(HeightMap {
            graph: self.graph,
            start,
            end,
        })
    }
}

pub fn read_height_map<P: AsRef<Path>>(path: P) -> Result<HeightMap> {
    let mut builder = HeightMapBuilder::default();
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

    builder.build().with_context(|| {
        format!(
            "Failed to build height map from given file({}).",
            path.as_ref().display()
        )
    })
}

/// Step count, or -1 when the end can't be reached.
fn steps_or_unreachable(steps: Option<usize>) -> i64 {
    steps.map_or(-1, |n| i64::try_from(n).unwrap())
}

pub fn part_one(input_path: &Path) -> Result<i64> {
    Ok(steps_or_unreachable(
        read_height_map(input_path)?.steps_from_start(),
    ))
}

pub fn part_two(input_path: &Path) -> Result<i64> {
    Ok(steps_or_unreachable(
        read_height_map(input_path)?.steps_from_lowest(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn height_map(rows: &[&str]) -> Result<HeightMap, Error> {
        let mut builder = HeightMapBuilder::default();
        for row in rows {
            builder.add_row(row)?;
        }
        builder.build()
    }

    #[test]
    fn climbing_one_level_at_a_time() {
        let map = height_map(&["SbcdE"]).unwrap();
        assert_eq!(map.steps_from_start(), None);

        let map = height_map(&["SbcdefghijklmnopqrstuvwxyE"]).unwrap();
        assert_eq!(map.steps_from_start(), Some(25));
    }

    #[test]
    fn descending_is_free() {
        // The only way to the end drops three levels from z to w.
        let map = height_map(&["SbcdefghijklmnopqrstuvwxyzwxyzE"]).unwrap();
        assert_eq!(map.steps_from_start(), Some(30));
        assert!(map.graph.has_edge(&Coord::new(25, 0), &Coord::new(26, 0)));
        assert!(!map.graph.has_edge(&Coord::new(26, 0), &Coord::new(25, 0)));

        let map = height_map(&["Sz", "bE"]).unwrap();
        assert!(map.graph.has_edge(&Coord::new(1, 0), &Coord::new(0, 0)));
        assert_eq!(map.steps_from_start(), None);
        let map = height_map(&["ay", "SE"]).unwrap();
        assert_eq!(steps_or_unreachable(map.steps_from_lowest()), -1);
    }

    #[test]
    fn lowest_squares_are_extra_starts() {
        let map = height_map(&["SzabcdefghijklmnopqrstuvwxyE"]).unwrap();
        assert_eq!(map.steps_from_start(), None);
        assert_eq!(map.steps_from_lowest(), Some(25));
    }

    #[test]
    fn markers_must_appear_once() {
        assert!(matches!(height_map(&["abc"]), Err(Error::NoStart)));
        assert!(matches!(height_map(&["Sbc"]), Err(Error::NoEnd)));
        assert!(matches!(
            height_map(&["SaS", "E"]),
            Err(Error::DuplicateMarker('S', _, _))
        ));
        assert!(matches!(height_map(&["S1E"]), Err(Error::InvalidChar('1'))));
    }
}
