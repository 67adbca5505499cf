use std::{
    collections::{HashSet, VecDeque},
    hash::Hash,
};

use crate::graph::SparseGraph;

/// Fewest edges from any of `starts` to `goal`, following directed edges only.
///
/// All starts are seeded at distance zero, as if a virtual source linked to each of
/// them, so one search covers every candidate. Starts missing from the graph are
/// skipped, and `None` means no start reaches the goal.
pub fn shortest_path_len<K, D, I>(graph: &SparseGraph<K, D>, starts: I, goal: &K) -> Option<usize>
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = K>,
{
    let mut search_keys = VecDeque::new();
    let mut searched_keys = HashSet::new();
    for start in starts {
        if graph.contains(&start) && searched_keys.insert(start.clone()) {
            search_keys.push_back((0, start));
        }
    }

    while let Some((cur_steps_n, cur_key)) = search_keys.pop_front() {
        if cur_key == *goal {
            return Some(cur_steps_n);
        }

        for next_key in graph.neighbors(&cur_key) {
            if searched_keys.insert(next_key.clone()) {
                search_keys.push_back((cur_steps_n + 1, next_key.clone()));
            }
        }
    }

    None
}
