use std::{
    error,
    fmt::Display,
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum Error {
    InvalidPartText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidPartText(s) => {
                write!(f, "Invalid text({}) for puzzle part, expect one or two.", s)
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    One,
    Two,
}

impl TryFrom<&str> for Part {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value {
            "one" => Ok(Part::One),
            "two" => Ok(Part::Two),
            _ => Err(Error::InvalidPartText(value.to_string())),
        }
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Part::One => write!(f, "one"),
            Part::Two => write!(f, "two"),
        }
    }
}

/// Arguments shared by every day program: `<input-file-path> <part>`.
///
/// Both are optional for clap, missing ones are reported by [`CLIArgs::selection`]
/// without failing the process.
#[derive(Debug, Parser)]
pub struct CLIArgs {
    /// Path of the puzzle input file.
    pub input_path: Option<PathBuf>,
    /// Part of the puzzle to solve, `one` or `two`.
    pub part: Option<String>,
}

impl CLIArgs {
    pub fn selection(&self) -> Option<(&Path, Part)> {
        let Some(input_path) = self.input_path.as_deref() else {
            eprintln!("must provide input file");
            return None;
        };
        let Some(part_text) = self.part.as_deref() else {
            eprintln!("must provide part 'one' or 'two'");
            return None;
        };

        match Part::try_from(part_text) {
            Ok(part) => Some((input_path, part)),
            Err(e) => {
                debug!("{}", e);
                None
            }
        }
    }
}

/// Installs the stderr log subscriber, `RUST_LOG` overrides the `warn` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when called from tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run<F1, F2, T1, T2>(part_one: F1, part_two: F2) -> Result<()>
where
    F1: FnOnce(&Path) -> Result<T1>,
    F2: FnOnce(&Path) -> Result<T2>,
    T1: Display,
    T2: Display,
{
    let args = CLIArgs::parse();
    dispatch(&args, part_one, part_two)
}

/// Solves the selected part and prints its answer on one line of stdout.
pub fn dispatch<F1, F2, T1, T2>(args: &CLIArgs, part_one: F1, part_two: F2) -> Result<()>
where
    F1: FnOnce(&Path) -> Result<T1>,
    F2: FnOnce(&Path) -> Result<T2>,
    T1: Display,
    T2: Display,
{
    init_logging();
    let Some((input_path, part)) = args.selection() else {
        return Ok(());
    };

    let context = || {
        format!(
            "Failed to solve part {} with given input file({}).",
            part,
            input_path.display()
        )
    };
    match part {
        Part::One => println!("{}", part_one(input_path).with_context(context)?),
        Part::Two => println!("{}", part_two(input_path).with_context(context)?),
    }

    Ok(())
}
