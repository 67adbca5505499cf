use std::{error, fmt::Display, path::Path};

use anyhow::Result;

#[derive(Debug)]
pub enum Error {
    NoMarker { window: usize, line: String },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoMarker { window, line } => write!(
                f,
                "No window of {} distinct characters found in datastream({}).",
                window, line
            ),
        }
    }
}

impl error::Error for Error {}

/// Number of characters read when the first window of `window` distinct characters completes.
pub fn marker_end(stream: &[u8], window: usize) -> Option<usize> {
    // Last index seen for every byte, and the start of the current distinct run.
    let mut last_seen = [None::<usize>; 256];
    let mut run_start = 0;
    for (ind, &c) in stream.iter().enumerate() {
        if let Some(prev) = last_seen[usize::from(c)] {
            run_start = run_start.max(prev + 1);
        }
        last_seen[usize::from(c)] = Some(ind);
        if ind + 1 - run_start >= window {
            return Some(ind + 1);
        }
    }

    None
}

fn solve(input_path: &Path, window: usize) -> Result<String> {
    let ends = toolkit::input::parse_lines(input_path, |line| {
        let line = line.trim();
        marker_end(line.as_bytes(), window).ok_or_else(|| Error::NoMarker {
            window,
            line: line.to_string(),
        })
    })?;

    Ok(ends
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn part_one(input_path: &Path) -> Result<String> {
    solve(input_path, 4)
}

pub fn part_two(input_path: &Path) -> Result<String> {
    solve(input_path, 14)
}
