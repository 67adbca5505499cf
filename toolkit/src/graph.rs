use std::{fmt::Display, hash::Hash};

use indexmap::{map::Entry, IndexMap, IndexSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Coord {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Unit steps up, right, down and left (y grows downward).
    pub const STEPS4: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

    /// Orthogonal neighbors, in the order of [`Coord::STEPS4`].
    pub fn neighbors4(&self) -> [Coord; 4] {
        Self::STEPS4.map(|(dx, dy)| self.offset(dx, dy))
    }

    pub fn manhattan(&self, other: &Coord) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Debug, Clone)]
struct Node<K, D> {
    data: D,
    edges: IndexSet<K>,
}

impl<K, D> Node<K, D> {
    fn new(data: D) -> Self {
        Self {
            data,
            edges: IndexSet::new(),
        }
    }
}

/// Nodes keyed by coordinate (or any hashable key), created on first reference and
/// never removed. Edges are directed and only exist where callers add them.
#[derive(Debug, Clone)]
pub struct SparseGraph<K, D> {
    nodes: IndexMap<K, Node<K, D>>,
}

impl<K, D> Default for SparseGraph<K, D> {
    fn default() -> Self {
        Self {
            nodes: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, D> SparseGraph<K, D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the node, or replaces the payload of an existing one keeping its edges.
    pub fn add_node(&mut self, key: K, data: D) {
        match self.nodes.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().data = data,
            Entry::Vacant(entry) => {
                entry.insert(Node::new(data));
            }
        }
    }

    pub fn node(&self, key: &K) -> Option<&D> {
        self.nodes.get(key).map(|node| &node.data)
    }

    pub fn node_mut(&mut self, key: &K) -> Option<&mut D> {
        self.nodes.get_mut(key).map(|node| &mut node.data)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn remove_edge(&mut self, from: &K, to: &K) -> bool {
        self.nodes
            .get_mut(from)
            .is_some_and(|node| node.edges.shift_remove(to))
    }

    pub fn has_edge(&self, from: &K, to: &K) -> bool {
        self.nodes
            .get(from)
            .is_some_and(|node| node.edges.contains(to))
    }

    pub fn neighbors<'a>(&'a self, key: &K) -> impl Iterator<Item = &'a K> + 'a {
        self.nodes
            .get(key)
            .into_iter()
            .flat_map(|node| node.edges.iter())
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&K, &D)> {
        self.nodes.iter().map(|(key, node)| (key, &node.data))
    }

    pub fn for_each_node<F: FnMut(&K, &D)>(&self, mut f: F) {
        for (key, node) in &self.nodes {
            f(key, &node.data);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.edges.len()).sum()
    }
}

impl<K: Hash + Eq + Clone, D: Default> SparseGraph<K, D> {
    /// Records the directed edge `from -> to`, creating missing endpoints with default payload.
    pub fn add_edge(&mut self, from: K, to: K) {
        if !self.nodes.contains_key(&to) {
            self.nodes.insert(to.clone(), Node::new(D::default()));
        }
        self.nodes
            .entry(from)
            .or_insert_with(|| Node::new(D::default()))
            .edges
            .insert(to);
    }
}

impl<D> SparseGraph<Coord, D> {
    /// Adds `a -> b` for every pair of existing orthogonal neighbors where `can_step(a, b)` holds.
    pub fn link_grid_neighbors<F>(&mut self, mut can_step: F)
    where
        F: FnMut(&D, &D) -> bool,
    {
        let mut links = Vec::new();
        for (coord, node) in &self.nodes {
            for neighbor in coord.neighbors4() {
                if let Some(other) = self.nodes.get(&neighbor) {
                    if can_step(&node.data, &other.data) {
                        links.push((*coord, neighbor));
                    }
                }
            }
        }

        for (from, to) in links {
            if let Some(node) = self.nodes.get_mut(&from) {
                node.edges.insert(to);
            }
        }
    }
}
