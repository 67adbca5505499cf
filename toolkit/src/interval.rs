use std::fmt::Display;

use tracing::trace;

/// Closed integer range `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    lo: i64,
    hi: i64,
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

impl Interval {
    pub fn new(lo: i64, hi: i64) -> Option<Self> {
        if lo <= hi {
            Some(Self { lo, hi })
        } else {
            None
        }
    }

    pub fn lo(&self) -> i64 {
        self.lo
    }

    pub fn hi(&self) -> i64 {
        self.hi
    }

    /// Count of integer points in the interval.
    pub fn len(&self) -> u64 {
        self.hi.abs_diff(self.lo) + 1
    }

    pub fn contains_point(&self, point: i64) -> bool {
        self.lo <= point && point <= self.hi
    }

    pub fn contains(&self, other: &Interval) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }
}

/// Merges intervals into a sorted set where no two of them overlap.
///
/// Two intervals merge when the later one starts at or before the end of the running
/// one, so `[1, 3]` and `[3, 6]` become `[1, 6]` while `[1, 3]` and `[4, 6]` stay apart.
pub fn reduce<I: IntoIterator<Item = Interval>>(intervals: I) -> Vec<Interval> {
    let mut intervals = intervals.into_iter().collect::<Vec<_>>();
    intervals.sort_unstable_by_key(|interval| interval.lo);

    let mut reduced = Vec::new();
    let mut cur_interval: Option<Interval> = None;
    for next in intervals {
        if let Some(last) = cur_interval.as_mut() {
            if last.contains(&next) {
                continue;
            }

            if next.lo <= last.hi {
                last.hi = last.hi.max(next.hi);
                trace!("Combined {} into {}.", next, last);
                continue;
            }

            trace!("Added {} to reduced intervals.", last);
            reduced.push(*last);
        }
        cur_interval = Some(next);
    }
    reduced.extend(cur_interval);

    reduced
}

/// Total points covered by an already reduced set.
pub fn covered_len(reduced: &[Interval]) -> u64 {
    reduced.iter().map(Interval::len).sum()
}
