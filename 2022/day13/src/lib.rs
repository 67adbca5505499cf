use std::{cmp::Ordering, error, fmt::Display, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug)]
pub enum Error {
    InvalidPacketText(String, serde_json::Error),
    InvalidPairSize(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidPacketText(s, e) => {
                write!(f, "Invalid text({}) for packet, {}.", s, e)
            }
            Error::InvalidPairSize(n) => {
                write!(f, "Expect 2 packets in one pair, given {}.", n)
            }
        }
    }
}

impl error::Error for Error {}

/// Nested list of integers, read as JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Packet {
    Int(u32),
    List(Vec<Packet>),
}

impl Packet {
    fn divider(n: u32) -> Self {
        Packet::List(vec![Packet::List(vec![Packet::Int(n)])])
    }
}

impl TryFrom<&str> for Packet {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        serde_json::from_str(value.trim())
            .map_err(|e| Error::InvalidPacketText(value.to_string(), e))
    }
}

impl Display for Packet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Packet::Int(n) => write!(f, "{}", n),
            Packet::List(items) => {
                write!(f, "[")?;
                for (ind, item) in items.iter().enumerate() {
                    if ind > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl Ord for Packet {
    /// Integers compare by value and lists element-wise, then by length.
    /// An integer compared with a list is treated as a one-element list.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Int(a), Packet::Int(b)) => a.cmp(b),
            (Packet::List(a), Packet::List(b)) => a.cmp(b),
            (Packet::Int(a), Packet::List(b)) => [Packet::Int(*a)].as_slice().cmp(b.as_slice()),
            (Packet::List(a), Packet::Int(b)) => a.as_slice().cmp([Packet::Int(*b)].as_slice()),
        }
    }
}

impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Packet {}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn read_pairs<P: AsRef<Path>>(path: P) -> Result<Vec<(Packet, Packet)>> {
    toolkit::input::read_records(&path)?
        .iter()
        .enumerate()
        .map(|(ind, record)| {
            let read_pair = || -> std::result::Result<(Packet, Packet), Error> {
                match record.as_slice() {
                    [left, right] => Ok((
                        Packet::try_from(left.as_str())?,
                        Packet::try_from(right.as_str())?,
                    )),
                    _ => Err(Error::InvalidPairSize(record.len())),
                }
            };
            read_pair().with_context(|| {
                format!(
                    "Failed to read pair {} from given file({}).",
                    ind + 1,
                    path.as_ref().display()
                )
            })
        })
        .collect()
}

pub fn part_one(input_path: &Path) -> Result<usize> {
    Ok(read_pairs(input_path)?
        .iter()
        .enumerate()
        .filter(|(_, (left, right))| left < right)
        .map(|(ind, _)| ind + 1)
        .sum())
}

/// 1-based positions the dividers would take if added to `packets` and sorted.
///
/// A divider lands before any packet comparing equal to it.
pub fn divider_positions(packets: &[Packet], dividers: &[Packet]) -> Vec<usize> {
    dividers
        .iter()
        .map(|divider| {
            let smaller_packet_n = packets.iter().filter(|p| *p < divider).count();
            let smaller_divider_n = dividers.iter().filter(|d| *d < divider).count();
            smaller_packet_n + smaller_divider_n + 1
        })
        .collect()
}

pub fn part_two(input_path: &Path) -> Result<usize> {
    let packets = read_pairs(input_path)?
        .into_iter()
        .flat_map(|(left, right)| [left, right])
        .collect::<Vec<_>>();
    let positions = divider_positions(&packets, &[Packet::divider(2), Packet::divider(6)]);
    debug!("Divider positions: {:?}", positions);

    Ok(positions.into_iter().product())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(text: &str) -> Packet {
        Packet::try_from(text).unwrap()
    }

    #[test]
    fn mixed_comparisons_wrap_integers() {
        assert!(packet("[[1],[2,3,4]]") < packet("[[1],4]"));
        assert!(packet("[9]") > packet("[[8,7,6]]"));
        assert_eq!(packet("[[2]]").cmp(&packet("[2]")), Ordering::Equal);
    }

    #[test]
    fn shorter_list_runs_out_first() {
        assert!(packet("[]") < packet("[3]"));
        assert!(packet("[[[]]]") > packet("[[]]"));
        assert!(packet("[7,7,7,7]") > packet("[7,7,7]"));
    }

    #[test]
    fn packets_print_back_as_read() {
        let text = "[1,[2,[3,[4,[5,6,7]]]],8,9]";
        assert_eq!(packet(text).to_string(), text);
        assert!(Packet::try_from("[1,").is_err());
        assert!(Packet::try_from("[-1]").is_err());
    }

    #[test]
    fn dividers_go_before_equal_packets() {
        let packets = [packet("[2]"), packet("[1]"), packet("[[7]]")];
        let dividers = [Packet::divider(2), Packet::divider(6)];
        assert_eq!(divider_positions(&packets, &dividers), vec![2, 4]);
    }
}
