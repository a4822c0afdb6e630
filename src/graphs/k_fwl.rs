//! k-dimensional Folklore Weisfeiler-Leman (spec §4.J): colors ordered
//! k-tuples of vertices, seeding each tuple's initial color from the
//! isomorphism type of its induced subgraph (via the [`NautyBridge`]) and
//! then refining by the standard k-FWL update rule until stable.

use std::collections::HashMap;

use super::nauty_bridge::NautyBridge;
use super::static_graph::StaticGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KFwlCertificate {
    pub colors: Vec<u32>,
    pub histogram: Vec<(u32, usize)>,
}

fn has_edge<V, E>(graph: &StaticGraph<V, E>, u: usize, v: usize) -> bool {
    graph.out_neighbors(u).any(|(target, _)| target == v)
}

fn cartesian_power(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut tuples = vec![Vec::new()];
    for _ in 0..k {
        let mut next = Vec::with_capacity(tuples.len() * n);
        for t in &tuples {
            for v in 0..n {
                let mut extended = t.clone();
                extended.push(v);
                next.push(extended);
            }
        }
        tuples = next;
    }
    tuples
}

/// Canonicalizes `adjacency`'s edge pattern into a fixed-size bit matrix
/// under the permutation `bridge.canonize` finds, so two tuples whose
/// induced subgraphs are isomorphic land on the same matrix regardless of
/// which underlying vertices they're built from.
fn canonical_adjacency_matrix(adjacency: &[Vec<usize>], bridge: &dyn NautyBridge) -> Vec<bool> {
    let k = adjacency.len();
    let (pi, _) = bridge.canonize(adjacency);
    let mut matrix = vec![false; k * k];
    for (u, neighbors) in adjacency.iter().enumerate() {
        for &v in neighbors {
            matrix[pi[u] * k + pi[v]] = true;
        }
    }
    matrix
}

/// A tuple's initial color: the pattern of which positions hold equal
/// vertices (already canonical since positions are fixed labels, not
/// subject to relabelling) paired with the canonicalized edge pattern
/// between positions.
fn initial_signature<V, E>(graph: &StaticGraph<V, E>, tuple: &[usize], bridge: &dyn NautyBridge) -> (Vec<bool>, Vec<bool>) {
    let k = tuple.len();
    let mut equal = vec![false; k * k];
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); k];
    for i in 0..k {
        for j in 0..k {
            if i == j {
                continue;
            }
            if tuple[i] == tuple[j] {
                equal[i * k + j] = true;
            }
            if has_edge(graph, tuple[i], tuple[j]) {
                adjacency[i].push(j);
            }
        }
    }
    let canonical = canonical_adjacency_matrix(&adjacency, bridge);
    (equal, canonical)
}

fn compress<K: std::hash::Hash + Eq>(keys: Vec<K>) -> Vec<u32> {
    let mut seen: HashMap<K, u32> = HashMap::new();
    let mut next = 0u32;
    keys.into_iter()
        .map(|k| {
            *seen.entry(k).or_insert_with(|| {
                let id = next;
                next += 1;
                id
            })
        })
        .collect()
}

pub fn k_fwl_certificate<V, E>(graph: &StaticGraph<V, E>, k: usize, bridge: &dyn NautyBridge) -> KFwlCertificate {
    let n = graph.vertex_count();
    let tuples = cartesian_power(n, k);
    let index_of: HashMap<Vec<usize>, usize> = tuples.iter().cloned().enumerate().map(|(i, t)| (t, i)).collect();

    let signatures: Vec<_> = tuples.iter().map(|t| initial_signature(graph, t, bridge)).collect();
    let mut colors = compress(signatures);
    let mut partition_count = colors.iter().collect::<std::collections::HashSet<_>>().len();

    loop {
        let round_signatures: Vec<Vec<u32>> = tuples
            .iter()
            .enumerate()
            .map(|(idx, tuple)| {
                // Canonical ordering of the k per-position swaps: sort each
                // position's row, then sort the rows, so two isomorphic
                // k-tuples always hash identically.
                let mut rows: Vec<Vec<u32>> = (0..k)
                    .map(|position| {
                        let mut row: Vec<u32> = (0..n)
                            .map(|w| {
                                let mut swapped = tuple.clone();
                                swapped[position] = w;
                                colors[index_of[&swapped]]
                            })
                            .collect();
                        row.sort_unstable();
                        row
                    })
                    .collect();
                rows.sort();

                let mut sig = vec![colors[idx]];
                for row in rows {
                    sig.extend(row);
                }
                sig
            })
            .collect();

        let new_colors = compress(round_signatures);
        let new_count = new_colors.iter().collect::<std::collections::HashSet<_>>().len();
        colors = new_colors;
        if new_count == partition_count {
            break;
        }
        partition_count = new_count;
    }

    let mut histogram_map: HashMap<u32, usize> = HashMap::new();
    for &c in &colors {
        *histogram_map.entry(c).or_insert(0) += 1;
    }
    let mut histogram: Vec<(u32, usize)> = histogram_map.into_iter().collect();
    histogram.sort_unstable_by_key(|&(color, _)| color);

    KFwlCertificate { colors, histogram }
}
