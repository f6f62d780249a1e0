//! Dense undirected weighted graph stored as a square adjacency matrix.
//! Entry `(u, v)` holds the edge weight, or 0 when there is no edge.
use std::fmt;

use serde::Serialize;

use crate::error::{ApspError, Result};

pub type Vertex = usize;
pub type Weight = u64;

/// Distance reported for vertices the source cannot reach.
pub const INFINITY: Weight = Weight::MAX;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Graph {
    matrix: Vec<Vec<Weight>>,
}

impl Graph {
    /// Edgeless graph on `n` vertices.
    pub fn new(n: usize) -> Self { Self { matrix: vec![vec![0; n]; n] } }

    /// Builds a graph from undirected `(u, v, w)` triples.
    ///
    /// Self-loops, out-of-range endpoints and zero weights are rejected before
    /// anything is stored, as is any weight above [`Graph::max_edge_weight`].
    /// A repeated pair keeps the last weight.
    pub fn from_edges(n: usize, edges: &[(Vertex, Vertex, Weight)]) -> Result<Self> {
        let max_w = Self::max_edge_weight(n);
        for &(u, v, w) in edges {
            if u >= n || v >= n || u == v {
                return Err(ApspError::InvalidEdge { u, v, num_vertices: n });
            }
            if w == 0 {
                return Err(ApspError::ZeroWeight { u, v });
            }
            if w > max_w {
                return Err(ApspError::WeightOverflow { u, v, weight: w });
            }
        }
        let mut g = Self::new(n);
        for &(u, v, w) in edges { g.add_undirected_edge(u, v, w); }
        Ok(g)
    }

    /// Largest weight for which a simple path of `n - 1` edges stays below
    /// [`INFINITY`].
    pub fn max_edge_weight(n: usize) -> Weight {
        (INFINITY - 1) / (n.max(2) as Weight - 1)
    }

    pub fn len(&self) -> usize { self.matrix.len() }
    pub fn is_empty(&self) -> bool { self.matrix.is_empty() }

    pub fn weight(&self, u: Vertex, v: Vertex) -> Weight { self.matrix[u][v] }
    pub fn has_edge(&self, u: Vertex, v: Vertex) -> bool { self.matrix[u][v] > 0 }

    /// Sets `(u, v)` and `(v, u)` to `w`. Callers guarantee `u != v` and `w > 0`.
    pub fn add_undirected_edge(&mut self, u: Vertex, v: Vertex, w: Weight) {
        debug_assert!(u != v && w > 0);
        self.matrix[u][v] = w;
        self.matrix[v][u] = w;
    }

    pub fn row(&self, u: Vertex) -> &[Weight] { &self.matrix[u] }
    pub fn rows(&self) -> impl Iterator<Item = &[Weight]> + '_ {
        self.matrix.iter().map(Vec::as_slice)
    }

    /// Number of neighbours of `u`.
    pub fn degree(&self, u: Vertex) -> usize {
        self.matrix[u].iter().filter(|&&w| w > 0).count()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        (0..self.len()).map(|u| self.degree(u)).sum::<usize>() / 2
    }

    /// Approximate heap footprint of the matrix plus one solver's working set.
    pub fn memory_estimate_bytes(&self) -> usize {
        let n = self.len();
        let cells = n * n * std::mem::size_of::<Weight>();
        let row_headers = n * 3 * std::mem::size_of::<usize>();
        let outer_header = 3 * std::mem::size_of::<usize>();
        let dist_bytes = n * std::mem::size_of::<Weight>();
        let visited_bytes = n * std::mem::size_of::<bool>();
        cells + row_headers + outer_header + dist_bytes + visited_bytes
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .matrix
            .iter()
            .flatten()
            .max()
            .map_or(1, |w| w.to_string().len());
        for row in self.rows() {
            let cells: Vec<String> = row.iter().map(|w| format!("{w:>width$}")).collect();
            writeln!(f, "[{}]", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_edge_is_symmetric() {
        let mut g = Graph::new(3);
        g.add_undirected_edge(0, 2, 7);
        assert_eq!(g.weight(0, 2), 7);
        assert_eq!(g.weight(2, 0), 7);
        assert!(!g.has_edge(0, 1));
        assert_eq!(g.degree(0), 1);
        assert_eq!(g.degree(1), 0);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn from_edges_rejects_bad_input() {
        assert_eq!(
            Graph::from_edges(3, &[(0, 1, 1), (1, 3, 2)]),
            Err(ApspError::InvalidEdge { u: 1, v: 3, num_vertices: 3 })
        );
        assert_eq!(
            Graph::from_edges(3, &[(2, 2, 1)]),
            Err(ApspError::InvalidEdge { u: 2, v: 2, num_vertices: 3 })
        );
        assert_eq!(Graph::from_edges(3, &[(0, 1, 0)]), Err(ApspError::ZeroWeight { u: 0, v: 1 }));
        assert!(matches!(
            Graph::from_edges(2, &[(0, 1, INFINITY)]),
            Err(ApspError::WeightOverflow { .. })
        ));
    }

    #[test]
    fn path_sums_cannot_reach_sentinel() {
        assert_eq!(
            Graph::from_edges(3, &[(0, 1, INFINITY - 1), (1, 2, 5)]),
            Err(ApspError::WeightOverflow { u: 0, v: 1, weight: INFINITY - 1 })
        );
        let w = Graph::max_edge_weight(3);
        assert!(matches!(
            Graph::from_edges(3, &[(0, 1, 1), (1, 2, w + 1)]),
            Err(ApspError::WeightOverflow { u: 1, v: 2, .. })
        ));
        let g = Graph::from_edges(3, &[(0, 1, w), (1, 2, w)]).unwrap();
        let d = crate::dijkstra::shortest_paths(&g, 0).unwrap();
        assert_eq!(d[2], 2 * w);
        assert_ne!(d[2], INFINITY);
    }

    #[test]
    fn display_renders_matrix_rows() {
        let g = Graph::from_edges(3, &[(0, 1, 12), (1, 2, 3)]).unwrap();
        assert_eq!(g.to_string(), "[ 0 12  0]\n[12  0  3]\n[ 0  3  0]\n");
    }

    #[test]
    fn memory_estimate() {
        let g = Graph::from_edges(4, &[(0, 1, 1), (1, 2, 1), (2, 3, 1)]).unwrap();
        assert!(g.memory_estimate_bytes() >= 16 * std::mem::size_of::<Weight>());
    }
}
