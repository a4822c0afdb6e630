//! Static and dynamic directed graphs with typed vertex/edge properties
//! (spec §4.J). `StaticGraph` pre-indexes adjacency as a forward-star (CSR)
//! table for O(deg) walks; `DynamicGraph` keeps the same per-vertex
//! adjacency lists but as growable `Vec`s so edges can be removed.

/// Which direction(s) a [`StaticGraph`] pre-indexes. `Bidirectional` also
/// builds the reverse (by-target) adjacency table, at roughly double the
/// index memory, for predecessor walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Bidirectional,
}

#[derive(Debug, Clone)]
struct Edge<E> {
    target: usize,
    label: E,
}

/// A directed graph with typed vertex labels `V` and edge labels `E`,
/// pre-indexed for O(deg) forward (and optionally backward) adjacency
/// walks. Construction is batch: collect all vertices and edges, then call
/// [`StaticGraph::build`], which sorts each per-vertex adjacency list by
/// target index so iteration order is deterministic.
#[derive(Debug, Clone)]
pub struct StaticGraph<V, E> {
    vertices: Vec<V>,
    forward: Vec<Vec<Edge<E>>>,
    backward: Option<Vec<Vec<Edge<E>>>>,
}

impl<V, E: Clone> StaticGraph<V, E> {
    pub fn build(vertices: Vec<V>, edges: Vec<(usize, usize, E)>, direction: Direction) -> Self {
        let n = vertices.len();
        let mut forward: Vec<Vec<Edge<E>>> = (0..n).map(|_| Vec::new()).collect();
        let mut backward = match direction {
            Direction::Bidirectional => Some((0..n).map(|_| Vec::new()).collect::<Vec<_>>()),
            Direction::Forward => None,
        };

        for (source, target, label) in edges {
            forward[source].push(Edge { target, label: label.clone() });
            if let Some(back) = backward.as_mut() {
                back[target].push(Edge { target: source, label });
            }
        }
        for adj in &mut forward {
            adj.sort_unstable_by_key(|e| e.target);
        }
        if let Some(back) = backward.as_mut() {
            for adj in back.iter_mut() {
                adj.sort_unstable_by_key(|e| e.target);
            }
        }

        StaticGraph { vertices, forward, backward }
    }
}

impl<V, E> StaticGraph<V, E> {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, index: usize) -> &V {
        &self.vertices[index]
    }

    pub fn out_degree(&self, vertex: usize) -> usize {
        self.forward[vertex].len()
    }

    pub fn out_neighbors(&self, vertex: usize) -> impl Iterator<Item = (usize, &E)> {
        self.forward[vertex].iter().map(|e| (e.target, &e.label))
    }

    /// Predecessors of `vertex`. Panics if built with [`Direction::Forward`]
    /// only — a static graph that never indexed the reverse direction has
    /// no O(deg) way to answer this.
    pub fn in_neighbors(&self, vertex: usize) -> impl Iterator<Item = (usize, &E)> {
        self.backward
            .as_ref()
            .expect("in_neighbors requires Direction::Bidirectional")[vertex]
            .iter()
            .map(|e| (e.target, &e.label))
    }
}

/// A directed graph supporting incremental edge/vertex removal. Adjacency
/// lists are kept sorted lazily: removal just filters the `Vec` in place,
/// which preserves sortedness without a full re-sort.
#[derive(Debug, Clone, Default)]
pub struct DynamicGraph<V, E> {
    vertices: Vec<Option<V>>,
    forward: Vec<Vec<Edge<E>>>,
}

impl<V, E> DynamicGraph<V, E> {
    pub fn new() -> Self {
        DynamicGraph { vertices: Vec::new(), forward: Vec::new() }
    }

    pub fn add_vertex(&mut self, label: V) -> usize {
        let index = self.vertices.len();
        self.vertices.push(Some(label));
        self.forward.push(Vec::new());
        index
    }

    pub fn add_edge(&mut self, source: usize, target: usize, label: E) {
        let pos = self.forward[source].partition_point(|e| e.target < target);
        self.forward[source].insert(pos, Edge { target, label });
    }

    /// Removes every edge `source -> target`, regardless of label.
    pub fn remove_edge(&mut self, source: usize, target: usize) {
        self.forward[source].retain(|e| e.target != target);
    }

    /// Removes a vertex and every edge touching it. The vertex's index is
    /// tombstoned (kept `None`) rather than reused, so existing indices
    /// into the graph stay valid.
    pub fn remove_vertex(&mut self, vertex: usize) {
        self.vertices[vertex] = None;
        self.forward[vertex].clear();
        for adj in &mut self.forward {
            adj.retain(|e| e.target != vertex);
        }
    }

    pub fn vertex(&self, index: usize) -> Option<&V> {
        self.vertices[index].as_ref()
    }

    pub fn out_neighbors(&self, vertex: usize) -> impl Iterator<Item = (usize, &E)> {
        self.forward[vertex].iter().map(|e| (e.target, &e.label))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_graph_sorts_adjacency_by_target() {
        let g = StaticGraph::build(vec!['a', 'b', 'c'], vec![(0, 2, "ac"), (0, 1, "ab")], Direction::Forward);
        let neighbors: Vec<_> = g.out_neighbors(0).map(|(t, _)| t).collect();
        assert_eq!(neighbors, vec![1, 2]);
    }

    #[test]
    fn bidirectional_graph_answers_in_neighbors() {
        let g = StaticGraph::build(vec!['a', 'b'], vec![(0, 1, ())], Direction::Bidirectional);
        let preds: Vec<_> = g.in_neighbors(1).map(|(s, _)| s).collect();
        assert_eq!(preds, vec![0]);
    }

    #[test]
    fn dynamic_graph_removal_drops_incident_edges() {
        let mut g: DynamicGraph<&str, ()> = DynamicGraph::new();
        let a = g.add_vertex("a");
        let b = g.add_vertex("b");
        g.add_edge(a, b, ());
        g.remove_vertex(b);
        assert!(g.out_neighbors(a).next().is_none());
        assert!(g.vertex(b).is_none());
    }
}
