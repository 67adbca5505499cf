use std::{
    error,
    fs::{self, File},
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

/// Lazily reads the lines of given file, each one carrying its line number in errors.
pub fn lines<P: AsRef<Path>>(path: P) -> Result<impl Iterator<Item = Result<String>>> {
    let path = path.as_ref().to_path_buf();
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.display()))?;
    let reader = BufReader::new(file);

    Ok(reader.lines().enumerate().map(move |(ind, line)| {
        line.with_context(|| {
            format!(
                "Failed to read line {} of given file({}).",
                ind + 1,
                path.display()
            )
        })
    }))
}

pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    lines(path)?.collect()
}

pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
    fs::read_to_string(&path)
        .with_context(|| format!("Failed to read given file({}).", path.as_ref().display()))
}

/// Parses every non-blank line of given file with `parse`.
pub fn parse_lines<P, T, E, F>(path: P, mut parse: F) -> Result<Vec<T>>
where
    P: AsRef<Path>,
    F: FnMut(&str) -> std::result::Result<T, E>,
    E: error::Error + Send + Sync + 'static,
{
    let mut parsed = Vec::new();
    for (ind, line) in lines(&path)?.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        parsed.push(parse(line.as_str()).with_context(|| {
            format!(
                "Failed to parse line {}({}) of given file({}).",
                ind + 1,
                line,
                path.as_ref().display()
            )
        })?);
    }

    Ok(parsed)
}

/// Splits given file into records separated by blank lines, dropping empty records.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut cur_record = Vec::new();
    for line in lines(path)? {
        let line = line?;
        if line.trim().is_empty() {
            if !cur_record.is_empty() {
                records.push(std::mem::take(&mut cur_record));
            }
        } else {
            cur_record.push(line);
        }
    }
    if !cur_record.is_empty() {
        records.push(cur_record);
    }

    Ok(records)
}
