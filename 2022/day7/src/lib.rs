use std::{collections::BTreeMap, error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use tracing::debug;

const DISK_SIZE: u64 = 70_000_000;
const NEEDED_FREE_SIZE: u64 = 30_000_000;
const SMALL_DIR_LIMIT: u64 = 100_000;

#[derive(Debug)]
pub enum Error {
    UnknownDirectory(String),
    LeaveRoot,
    InvalidCommand(String),
    InvalidListingText(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownDirectory(name) => write!(
                f,
                "Can't change into directory({}), it hasn't been listed.",
                name
            ),
            Error::LeaveRoot => write!(f, "Can't leave the root directory."),
            Error::InvalidCommand(s) => write!(f, "Invalid command text({}).", s),
            Error::InvalidListingText(s) => write!(
                f,
                "Invalid text({}) in directory listing, expect \"dir <name>\" or \"<size> <name>\".",
                s
            ),
        }
    }
}

impl error::Error for Error {}

/// Node of the directory tree rebuilt from a terminal session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File { size: u64 },
    Directory { children: BTreeMap<String, Entry> },
}

impl Entry {
    fn empty_dir() -> Self {
        Entry::Directory {
            children: BTreeMap::new(),
        }
    }

    pub fn size(&self) -> u64 {
        self.fold_sizes().0
    }

    /// Total size of every directory in the tree, this one last.
    pub fn dir_sizes(&self) -> Vec<u64> {
        self.fold_sizes().1
    }

    fn fold_sizes(&self) -> (u64, Vec<u64>) {
        match self {
            Entry::File { size } => (*size, Vec::new()),
            Entry::Directory { children } => {
                let (total, mut sizes) = children.values().map(Entry::fold_sizes).fold(
                    (0, Vec::new()),
                    |(total, mut sizes), (child_total, child_sizes)| {
                        sizes.extend(child_sizes);
                        (total + child_total, sizes)
                    },
                );
                sizes.push(total);
                (total, sizes)
            }
        }
    }
}

/// Children of the directory at `path` below `entry`.
fn children_at<'a>(
    mut entry: &'a mut Entry,
    path: &[String],
) -> Option<&'a mut BTreeMap<String, Entry>> {
    for name in path {
        entry = match entry {
            Entry::Directory { children } => children.get_mut(name)?,
            Entry::File { .. } => return None,
        };
    }

    match entry {
        Entry::Directory { children } => Some(children),
        Entry::File { .. } => None,
    }
}

#[derive(Debug)]
struct SessionReplayer {
    root: Entry,
    cur_path: Vec<String>,
}

impl SessionReplayer {
    fn new() -> Self {
        Self {
            root: Entry::empty_dir(),
            cur_path: Vec::new(),
        }
    }

    fn cur_children(&mut self) -> Result<&mut BTreeMap<String, Entry>, Error> {
        let path = &self.cur_path;
        children_at(&mut self.root, path).ok_or_else(|| Error::UnknownDirectory(path.join("/")))
    }

    fn feed(&mut self, line: &str) -> Result<(), Error> {
        let line = line.trim();
        if let Some(command) = line.strip_prefix("$ ") {
            return self.run(command);
        }

        let (head, name) = line
            .split_once(' ')
            .ok_or_else(|| Error::InvalidListingText(line.to_string()))?;
        let entry = if head == "dir" {
            Entry::empty_dir()
        } else {
            Entry::File {
                size: head
                    .parse::<u64>()
                    .map_err(|_| Error::InvalidListingText(line.to_string()))?,
            }
        };
        let children = self.cur_children()?;
        // Listing a directory again must not drop what was found inside it.
        if !matches!(
            (children.get(name), &entry),
            (Some(Entry::Directory { .. }), Entry::Directory { .. })
        ) {
            children.insert(name.to_string(), entry);
        }

        Ok(())
    }

    fn run(&mut self, command: &str) -> Result<(), Error> {
        match command.split_once(' ') {
            None if command == "ls" => Ok(()),
            Some(("cd", "/")) => {
                self.cur_path.clear();
                Ok(())
            }
            Some(("cd", "..")) => self.cur_path.pop().map(|_| ()).ok_or(Error::LeaveRoot),
            Some(("cd", name)) => {
                let is_dir = matches!(
                    self.cur_children()?.get(name),
                    Some(Entry::Directory { .. })
                );
                if !is_dir {
                    return Err(Error::UnknownDirectory(name.to_string()));
                }
                self.cur_path.push(name.to_string());
                Ok(())
            }
            _ => Err(Error::InvalidCommand(command.to_string())),
        }
    }

    fn finish(self) -> Entry {
        self.root
    }
}

pub fn read_file_system<P: AsRef<Path>>(path: P) -> Result<Entry> {
    let mut replayer = SessionReplayer::new();
    for (ind, line) in toolkit::input::lines(&path)?.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        replayer.feed(&line).with_context(|| {
            format!(
                "Failed to replay line {}({}) of given file({}).",
                ind + 1,
                line,
                path.as_ref().display()
            )
        })?;
    }

    let root = replayer.finish();
    debug!("Rebuilt {} directories", root.dir_sizes().len());
    Ok(root)
}

pub fn part_one(input_path: &Path) -> Result<u64> {
    Ok(read_file_system(input_path)?
        .dir_sizes()
        .into_iter()
        .filter(|size| *size <= SMALL_DIR_LIMIT)
        .sum())
}

pub fn part_two(input_path: &Path) -> Result<u64> {
    let root = read_file_system(input_path)?;
    let used = root.size();
    let to_free = NEEDED_FREE_SIZE.saturating_sub(DISK_SIZE.saturating_sub(used));
    debug!("Used {}, need to free {}", used, to_free);

    Ok(root
        .dir_sizes()
        .into_iter()
        .filter(|size| *size >= to_free)
        .min()
        .unwrap_or(used))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(lines: &[&str]) -> Result<Entry, Error> {
        let mut replayer = SessionReplayer::new();
        for line in lines {
            replayer.feed(line)?;
        }
        Ok(replayer.finish())
    }

    #[test]
    fn sizes_include_nested_directories() {
        let root = replay(&[
            "$ cd /", "$ ls", "dir a", "10 b", "$ cd a", "$ ls", "dir c", "5 d", "$ cd c",
            "$ ls", "1 e",
        ])
        .unwrap();
        assert_eq!(root.size(), 16);
        assert_eq!(root.dir_sizes(), vec![1, 6, 16]);
    }

    #[test]
    fn tree_mirrors_listing() {
        let root = replay(&["$ ls", "dir a", "3 b", "$ cd a", "$ ls", "4 c"]).unwrap();
        let expect = Entry::Directory {
            children: BTreeMap::from([
                (
                    "a".to_string(),
                    Entry::Directory {
                        children: BTreeMap::from([("c".to_string(), Entry::File { size: 4 })]),
                    },
                ),
                ("b".to_string(), Entry::File { size: 3 }),
            ]),
        };
        assert_eq!(root, expect);
    }

    #[test]
    fn relisting_does_not_count_twice() {
        let root = replay(&["$ ls", "10 b", "$ ls", "10 b"]).unwrap();
        assert_eq!(root.dir_sizes(), vec![10]);

        let root = replay(&[
            "$ ls", "dir a", "$ cd a", "$ ls", "7 f", "$ cd ..", "$ ls", "dir a",
        ])
        .unwrap();
        assert_eq!(root.dir_sizes(), vec![7, 7]);
    }

    #[test]
    fn invalid_sessions_are_rejected() {
        assert!(matches!(
            replay(&["$ cd x"]),
            Err(Error::UnknownDirectory(_))
        ));
        assert!(matches!(
            replay(&["$ ls", "5 x", "$ cd x"]),
            Err(Error::UnknownDirectory(_))
        ));
        assert!(matches!(replay(&["$ cd .."]), Err(Error::LeaveRoot)));
        assert!(matches!(
            replay(&["$ ls", "ten b"]),
            Err(Error::InvalidListingText(_))
        ));
        assert!(matches!(replay(&["$ rm b"]), Err(Error::InvalidCommand(_))));
    }
}
