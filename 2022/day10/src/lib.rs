use std::{error, fmt::Display, path::Path};

use anyhow::Result;

const CRT_WIDTH: usize = 40;
const CRT_HEIGHT: usize = 6;

#[derive(Debug)]
pub enum Error {
    InvalidInstructionText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInstructionText(s) => write!(
                f,
                "Invalid text({}) for instruction, expect \"noop\" or \"addx <value>\".",
                s
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Noop,
    AddX(i64),
}

impl TryFrom<&str> for Instruction {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let invalid = || Error::InvalidInstructionText(value.to_string());
        let mut words = value.split_ascii_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some("noop"), None, None) => Ok(Instruction::Noop),
            (Some("addx"), Some(v), None) => {
                v.parse::<i64>().map(Instruction::AddX).map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }
}

impl Instruction {
    pub fn cycles(&self) -> usize {
        match self {
            Instruction::Noop => 1,
            Instruction::AddX(_) => 2,
        }
    }
}

/// Value of register X during every cycle, the first cycle at index 0.
///
/// The value after the last instruction completes is kept as one extra cycle.
pub fn register_trace(program: &[Instruction]) -> Vec<i64> {
    let mut x = 1;
    let mut trace = Vec::with_capacity(program.len() * 2 + 1);
    for inst in program {
        trace.extend(std::iter::repeat(x).take(inst.cycles()));
        if let Instruction::AddX(v) = inst {
            x += v;
        }
    }
    trace.push(x);

    trace
}

/// Sum of `cycle * X` at cycles 20, 60, 100, 140, 180 and 220.
pub fn signal_strength_sum(trace: &[i64]) -> i64 {
    (20..=220)
        .step_by(40)
        .filter_map(|cycle: usize| {
            trace
                .get(cycle - 1)
                .map(|x| i64::try_from(cycle).unwrap() * x)
        })
        .sum()
}

/// Draws the CRT, a pixel is lit when the 3-wide sprite centered at X covers it.
pub fn render(trace: &[i64]) -> String {
    (0..CRT_HEIGHT)
        .map(|r| {
            (0..CRT_WIDTH)
                .map(|c| {
                    let lit = trace
                        .get(r * CRT_WIDTH + c)
                        .is_some_and(|x| (i64::try_from(c).unwrap() - x).abs() <= 1);
                    if lit {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn read_program<P: AsRef<Path>>(path: P) -> Result<Vec<Instruction>> {
    toolkit::input::parse_lines(path, |s| Instruction::try_from(s))
}

pub fn part_one(input_path: &Path) -> Result<i64> {
    Ok(signal_strength_sum(&register_trace(&read_program(
        input_path,
    )?)))
}

pub fn part_two(input_path: &Path) -> Result<String> {
    Ok(render(&register_trace(&read_program(input_path)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_program_trace() {
        let program = ["noop", "addx 3", "addx -5"]
            .into_iter()
            .map(|s| Instruction::try_from(s).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(register_trace(&program), vec![1, 1, 1, 4, 4, -1]);
    }

    #[test]
    fn unknown_instructions_are_rejected() {
        assert!(Instruction::try_from("mulx 3").is_err());
        assert!(Instruction::try_from("addx").is_err());
        assert!(Instruction::try_from("noop 1").is_err());
    }

    #[test]
    fn short_trace_leaves_pixels_dark() {
        let picture = render(&[1, 1]);
        let rows = picture.lines().collect::<Vec<_>>();
        assert_eq!(rows.len(), 6);
        assert!(rows[0].starts_with("##."));
        assert!(rows[1].chars().all(|c| c == '.'));
    }
}
