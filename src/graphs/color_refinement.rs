//! Color refinement / 1-dimensional Weisfeiler-Leman (spec §4.J): iterate
//! `color_{r+1}(v) = compress(color_r(v), multiset{color_r(u) : (v,u) ∈ E})`
//! until the partition stabilizes.

use std::collections::HashMap;

use super::static_graph::StaticGraph;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCertificate {
    /// Final compressed color per vertex.
    pub colors: Vec<u32>,
    /// Histogram of how many vertices hold each final color, sorted by
    /// color, so isomorphic graphs yield identical certificates regardless
    /// of vertex numbering.
    pub histogram: Vec<(u32, usize)>,
}

/// Compresses a signature (a vertex's prior color plus the sorted multiset
/// of its neighbors' colors) into a dense new color, by interning
/// signatures in first-seen order within this round.
fn compress_round(signatures: &[Vec<u32>]) -> Vec<u32> {
    let mut seen: HashMap<Vec<u32>, u32> = HashMap::new();
    let mut next = 0u32;
    signatures
        .iter()
        .map(|sig| {
            *seen.entry(sig.clone()).or_insert_with(|| {
                let id = next;
                next += 1;
                id
            })
        })
        .collect()
}

pub fn refine_colors<V, E>(graph: &StaticGraph<V, E>) -> ColorCertificate {
    let n = graph.vertex_count();
    let mut colors = vec![0u32; n];
    let mut partition_count = if n == 0 { 0 } else { 1 };

    loop {
        let signatures: Vec<Vec<u32>> = (0..n)
            .map(|v| {
                let mut neighbor_colors: Vec<u32> = graph.out_neighbors(v).map(|(u, _)| colors[u]).collect();
                neighbor_colors.sort_unstable();
                let mut sig = vec![colors[v]];
                sig.extend(neighbor_colors);
                sig
            })
            .collect();

        let new_colors = compress_round(&signatures);
        let new_partition_count = new_colors.iter().collect::<std::collections::HashSet<_>>().len();
        if new_partition_count == partition_count {
            colors = new_colors;
            break;
        }
        colors = new_colors;
        partition_count = new_partition_count;
    }

    let mut histogram_map: HashMap<u32, usize> = HashMap::new();
    for &c in &colors {
        *histogram_map.entry(c).or_insert(0) += 1;
    }
    let mut histogram: Vec<(u32, usize)> = histogram_map.into_iter().collect();
    histogram.sort_unstable_by_key(|&(color, _)| color);

    ColorCertificate { colors, histogram }
}
