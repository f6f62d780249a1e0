//! Array-based Dijkstra over the dense adjacency matrix.
//!
//! Selection is a linear scan over unvisited vertices, which makes each run
//! O(n^2) with no priority queue. Ties go to the lowest index because the
//! incumbent is only replaced on strict improvement.
use tracing::trace;

use crate::error::{ApspError, Result};
use crate::graph::{Graph, Vertex, Weight, INFINITY};

/// One distance vector per source, indexed by source vertex.
pub type DistanceMatrix = Vec<Vec<Weight>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsspResult {
    pub dist: Vec<Weight>,
    /// Vertices in the order they were settled.
    pub settled: Vec<Vertex>,
    pub edges_scanned: usize,
    pub relaxations: usize,
}

/// Shortest distances from `source` to every vertex; [`INFINITY`] marks
/// vertices the source cannot reach.
pub fn shortest_paths(g: &Graph, source: Vertex) -> Result<Vec<Weight>> {
    check_source(g, source)?;
    Ok(dense_distances(g, source))
}

/// Like [`shortest_paths`], also reporting settle order and work counters.
pub fn shortest_paths_with_stats(g: &Graph, source: Vertex) -> Result<SsspResult> {
    check_source(g, source)?;
    Ok(dense_dijkstra_traced(g, source))
}

fn check_source(g: &Graph, source: Vertex) -> Result<()> {
    if source >= g.len() {
        return Err(ApspError::InvalidSource { vertex: source, num_vertices: g.len() });
    }
    Ok(())
}

/// Closest unvisited vertex with a finite distance, lowest index on ties.
fn select_closest(dist: &[Weight], visited: &[bool]) -> Option<(Vertex, Weight)> {
    let mut best = None;
    let mut best_d = INFINITY;
    for (v, (&d, &done)) in dist.iter().zip(visited).enumerate() {
        if !done && d < best_d {
            best_d = d;
            best = Some((v, d));
        }
    }
    best
}

// The timed path: no settle log, no counters.
fn dense_distances(g: &Graph, source: Vertex) -> Vec<Weight> {
    let n = g.len();
    let mut dist = vec![INFINITY; n];
    let mut visited = vec![false; n];
    dist[source] = 0;

    for _ in 0..n {
        let Some((u, du)) = select_closest(&dist, &visited) else { break };
        visited[u] = true;
        for (v, &w) in g.row(u).iter().enumerate() {
            if w == 0 || visited[v] { continue; }
            let nd = du.saturating_add(w);
            if nd < dist[v] { dist[v] = nd; }
        }
    }
    dist
}

fn dense_dijkstra_traced(g: &Graph, source: Vertex) -> SsspResult {
    let n = g.len();
    let mut dist = vec![INFINITY; n];
    let mut visited = vec![false; n];
    let mut settled = Vec::with_capacity(n);
    let mut edges_scanned = 0usize;
    let mut relaxations = 0usize;
    dist[source] = 0;

    for _ in 0..n {
        let Some((u, du)) = select_closest(&dist, &visited) else { break };
        visited[u] = true;
        settled.push(u);
        for (v, &w) in g.row(u).iter().enumerate() {
            if w == 0 || visited[v] { continue; }
            edges_scanned += 1;
            let nd = du.saturating_add(w);
            if nd < dist[v] {
                dist[v] = nd;
                relaxations += 1;
            }
        }
    }

    trace!(source, settled = settled.len(), edges_scanned, relaxations, "dijkstra done");
    SsspResult { dist, settled, edges_scanned, relaxations }
}

/// Runs the solver once per vertex, in ascending source order.
pub fn all_pairs(g: &Graph) -> DistanceMatrix {
    (0..g.len()).map(|s| dense_distances(g, s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn line_graph(n: usize, w: Weight) -> Graph {
        let mut g = Graph::new(n);
        for i in 0..n - 1 {
            g.add_undirected_edge(i, i + 1, w);
        }
        g
    }

    #[test]
    fn four_vertex_scenario() {
        let g = Graph::from_edges(4, &[(0, 1, 1), (1, 2, 2), (2, 3, 1), (0, 3, 10)]).unwrap();
        assert_eq!(shortest_paths(&g, 0).unwrap(), vec![0, 1, 3, 4]);
    }

    #[test]
    fn line_distances() {
        let g = line_graph(6, 3);
        assert_eq!(shortest_paths(&g, 0).unwrap(), vec![0, 3, 6, 9, 12, 15]);
        assert_eq!(shortest_paths(&g, 5).unwrap(), vec![15, 12, 9, 6, 3, 0]);
    }

    #[test]
    fn out_of_range_source() {
        let g = line_graph(3, 1);
        assert_eq!(
            shortest_paths(&g, 3),
            Err(ApspError::InvalidSource { vertex: 3, num_vertices: 3 })
        );
    }

    #[test]
    fn unreachable_keeps_sentinel_and_stops_early() {
        let g = Graph::from_edges(4, &[(0, 1, 2), (2, 3, 5)]).unwrap();
        let r = shortest_paths_with_stats(&g, 0).unwrap();
        assert_eq!(r.dist, vec![0, 2, INFINITY, INFINITY]);
        assert_eq!(r.settled, vec![0, 1]);
    }

    #[test]
    fn ties_settle_lowest_index_first() {
        // 1 and 2 are both at distance 4 from 0; 1 must be settled first.
        let g = Graph::from_edges(4, &[(0, 2, 4), (0, 1, 4), (1, 3, 1), (2, 3, 1)]).unwrap();
        let r = shortest_paths_with_stats(&g, 0).unwrap();
        assert_eq!(r.settled, vec![0, 1, 2, 3]);
        assert_eq!(r.dist, vec![0, 4, 4, 5]);
    }

    #[test]
    fn counters_on_triangle() {
        let g = Graph::from_edges(3, &[(0, 1, 1), (1, 2, 1), (0, 2, 5)]).unwrap();
        let r = shortest_paths_with_stats(&g, 0).unwrap();
        assert_eq!(r.dist, vec![0, 1, 2]);
        // 0 scans 1 and 2, 1 scans 2, 2 scans nothing unvisited.
        assert_eq!(r.edges_scanned, 3);
        assert_eq!(r.relaxations, 3);
    }

    #[test]
    fn untraced_and_traced_runs_agree() {
        let mut rng = StdRng::seed_from_u64(31);
        let g = crate::generate::generate(40, 6, &mut rng).unwrap();
        let disconnected = Graph::from_edges(6, &[(0, 1, 4), (1, 2, 4), (0, 2, 4), (4, 5, 2)]).unwrap();
        for graph in [&g, &disconnected] {
            for s in 0..graph.len() {
                assert_eq!(dense_distances(graph, s), dense_dijkstra_traced(graph, s).dist, "source {}", s);
            }
        }
    }

    #[test]
    fn all_pairs_single_vertex() {
        assert_eq!(all_pairs(&Graph::new(1)), vec![vec![0]]);
    }

    #[test]
    fn all_pairs_rows_match_single_source() {
        let g = Graph::from_edges(4, &[(0, 1, 1), (1, 2, 2), (2, 3, 1), (0, 3, 10)]).unwrap();
        let m = all_pairs(&g);
        assert_eq!(m.len(), 4);
        for (s, row) in m.iter().enumerate() {
            assert_eq!(row, &shortest_paths(&g, s).unwrap());
        }
        assert_eq!(m[3], vec![4, 3, 1, 0]);
    }
}
