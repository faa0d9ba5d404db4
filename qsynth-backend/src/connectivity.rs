//! Qubit connectivity graphs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Undirected coupling map between physical qubits
///
/// Neighbour sets are ordered, so shortest paths are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityGraph {
    /// Number of physical qubits
    num_qubits: usize,

    /// Adjacency list: qubit -> connected qubits
    edges: BTreeMap<usize, BTreeSet<usize>>,
}

impl ConnectivityGraph {
    /// Graph with no edges
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            edges: BTreeMap::new(),
        }
    }

    pub fn from_edges(num_qubits: usize, edges: &[(usize, usize)]) -> Self {
        let mut graph = Self::new(num_qubits);
        for &(a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    pub fn all_to_all(num_qubits: usize) -> Self {
        let mut graph = Self::new(num_qubits);
        for i in 0..num_qubits {
            for j in i + 1..num_qubits {
                graph.add_edge(i, j);
            }
        }
        graph
    }

    /// Nearest-neighbour chain `0 - 1 - … - (n-1)`
    pub fn linear_chain(num_qubits: usize) -> Self {
        let mut graph = Self::new(num_qubits);
        for i in 1..num_qubits {
            graph.add_edge(i - 1, i);
        }
        graph
    }

    /// Chain with its ends joined
    pub fn ring(num_qubits: usize) -> Self {
        let mut graph = Self::linear_chain(num_qubits);
        if num_qubits > 2 {
            graph.add_edge(num_qubits - 1, 0);
        }
        graph
    }

    /// Row-major `rows × cols` lattice
    pub fn grid(rows: usize, cols: usize) -> Self {
        let mut graph = Self::new(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let qubit = row * cols + col;
                if col + 1 < cols {
                    graph.add_edge(qubit, qubit + 1);
                }
                if row + 1 < rows {
                    graph.add_edge(qubit, qubit + cols);
                }
            }
        }
        graph
    }

    /// Add an undirected edge; self-loops are ignored
    pub fn add_edge(&mut self, q1: usize, q2: usize) {
        if q1 == q2 {
            return;
        }
        self.num_qubits = self.num_qubits.max(q1 + 1).max(q2 + 1);
        self.edges.entry(q1).or_default().insert(q2);
        self.edges.entry(q2).or_default().insert(q1);
    }

    pub fn are_connected(&self, q1: usize, q2: usize) -> bool {
        self.edges
            .get(&q1)
            .map(|neighbors| neighbors.contains(&q2))
            .unwrap_or(false)
    }

    pub fn neighbors(&self, qubit: usize) -> impl Iterator<Item = usize> + '_ {
        self.edges.get(&qubit).into_iter().flatten().copied()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn degree(&self, qubit: usize) -> usize {
        self.edges.get(&qubit).map(|n| n.len()).unwrap_or(0)
    }

    /// Each undirected edge once, as `(low, high)`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .flat_map(|(&a, ns)| ns.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
    }

    /// Breadth-first shortest path including both endpoints
    pub fn shortest_path(&self, start: usize, end: usize) -> Option<Vec<usize>> {
        if start == end {
            return Some(vec![start]);
        }

        let mut parent: BTreeMap<usize, usize> = BTreeMap::new();
        let mut visited = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == end {
                let mut path = vec![end];
                let mut node = end;
                while let Some(&prev) = parent.get(&node) {
                    path.push(prev);
                    node = prev;
                }
                path.reverse();
                return Some(path);
            }
            for neighbor in self.neighbors(current) {
                if visited.insert(neighbor) {
                    parent.insert(neighbor, current);
                    queue.push_back(neighbor);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_to_all_connectivity() {
        let graph = ConnectivityGraph::all_to_all(5);
        assert!(graph.are_connected(0, 4));
        assert!(graph.are_connected(3, 2));
        assert_eq!(graph.edges().count(), 10);
    }

    #[test]
    fn test_linear_chain() {
        let graph = ConnectivityGraph::linear_chain(5);
        assert!(graph.are_connected(1, 2));
        assert!(!graph.are_connected(0, 2));
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(2), 2);
    }

    #[test]
    fn test_ring_closes() {
        let graph = ConnectivityGraph::ring(4);
        assert!(graph.are_connected(3, 0));
        assert_eq!(graph.shortest_path(0, 3).unwrap(), vec![0, 3]);
    }

    #[test]
    fn test_grid_connectivity() {
        // 0-1-2
        // | | |
        // 3-4-5
        let graph = ConnectivityGraph::grid(2, 3);
        assert!(graph.are_connected(0, 3));
        assert!(graph.are_connected(4, 5));
        assert!(!graph.are_connected(0, 4));
        assert_eq!(graph.shortest_path(0, 5).unwrap().len(), 4);
    }

    #[test]
    fn test_shortest_path() {
        let graph = ConnectivityGraph::linear_chain(5);
        assert_eq!(graph.shortest_path(0, 4).unwrap(), vec![0, 1, 2, 3, 4]);
        assert_eq!(graph.shortest_path(2, 2).unwrap(), vec![2]);
    }

    #[test]
    fn test_disconnected() {
        let graph = ConnectivityGraph::from_edges(4, &[(0, 1), (2, 3)]);
        assert!(graph.shortest_path(0, 3).is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let graph = ConnectivityGraph::ring(3);
        let json = serde_json::to_string(&graph).unwrap();
        let back: ConnectivityGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(graph, back);
    }
}
