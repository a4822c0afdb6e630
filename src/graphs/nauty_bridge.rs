//! Sparse nauty bridge (spec §4.J): canonizes a small graph and computes the
//! relabelling between two graphs with equal canonical forms.
//!
//! No nauty binding exists anywhere in the available crate ecosystem
//! sample, so `BruteForceNauty` is an exhaustive substitution behind the
//! same contract: it owns no external graph memory (there is none to own)
//! and is only ever handed the small induced subgraphs k-FWL canonizes per
//! tuple, where a full permutation search is affordable.

/// Canonizes small unlabelled directed graphs, given as adjacency lists.
pub trait NautyBridge {
    /// Returns the canonical permutation `π` (new index for each original
    /// vertex) and its inverse.
    fn canonize(&self, adjacency: &[Vec<usize>]) -> (Vec<usize>, Vec<usize>);

    /// If `source` and `target` have equal canonical forms, the relabelling
    /// that maps `source`'s canonical form onto `target`'s. `None` if their
    /// canonical forms differ (the source's failure case: "throws").
    fn compute_permutation(&self, source: &[Vec<usize>], target: &[Vec<usize>]) -> Option<Vec<usize>>;
}

pub struct BruteForceNauty;

impl BruteForceNauty {
    /// The adjacency matrix induced by `order`, read as a flat bitstring:
    /// `order[i]` is the original vertex placed at canonical position `i`.
    fn relabelled_matrix(adjacency: &[Vec<usize>], order: &[usize]) -> Vec<bool> {
        let n = adjacency.len();
        let mut position = vec![0usize; n];
        for (new_pos, &original) in order.iter().enumerate() {
            position[original] = new_pos;
        }
        let mut matrix = vec![false; n * n];
        for (u, neighbors) in adjacency.iter().enumerate() {
            for &v in neighbors {
                matrix[position[u] * n + position[v]] = true;
            }
        }
        matrix
    }

    /// The lexicographically smallest relabelling's permutation, by
    /// exhaustive search over all vertex orderings.
    fn best_permutation(adjacency: &[Vec<usize>]) -> Vec<usize> {
        let n = adjacency.len();
        let mut order: Vec<usize> = (0..n).collect();
        let mut best_order = order.clone();
        let mut best_matrix = Self::relabelled_matrix(adjacency, &order);

        permute(&mut order, 0, &mut |candidate| {
            let matrix = Self::relabelled_matrix(adjacency, candidate);
            if matrix < best_matrix {
                best_matrix = matrix;
                best_order = candidate.to_vec();
            }
        });

        // `best_order[new_pos] = original`; invert to get π(original) = new_pos.
        let mut pi = vec![0usize; n];
        for (new_pos, &original) in best_order.iter().enumerate() {
            pi[original] = new_pos;
        }
        pi
    }
}

impl NautyBridge for BruteForceNauty {
    fn canonize(&self, adjacency: &[Vec<usize>]) -> (Vec<usize>, Vec<usize>) {
        let pi = Self::best_permutation(adjacency);
        let mut inverse = vec![0usize; pi.len()];
        for (original, &new_pos) in pi.iter().enumerate() {
            inverse[new_pos] = original;
        }
        (pi, inverse)
    }

    fn compute_permutation(&self, source: &[Vec<usize>], target: &[Vec<usize>]) -> Option<Vec<usize>> {
        if source.len() != target.len() {
            return None;
        }
        let (source_pi, _) = self.canonize(source);
        let (target_pi, target_inverse) = self.canonize(target);

        let source_canonical = Self::relabelled_matrix(source, &{
            let mut order = vec![0usize; source_pi.len()];
            for (original, &new_pos) in source_pi.iter().enumerate() {
                order[new_pos] = original;
            }
            order
        });
        let target_canonical = Self::relabelled_matrix(target, &{
            let mut order = vec![0usize; target_pi.len()];
            for (original, &new_pos) in target_pi.iter().enumerate() {
                order[new_pos] = original;
            }
            order
        });
        if source_canonical != target_canonical {
            return None;
        }

        // relabelling[s] = t such that source vertex s and target vertex t
        // share a canonical position: source_pi[s] == target_pi[t].
        let mut relabelling = vec![0usize; source_pi.len()];
        for (s, &canon_pos) in source_pi.iter().enumerate() {
            relabelling[s] = target_inverse[canon_pos];
        }
        Some(relabelling)
    }
}

/// Heap's-algorithm-style exhaustive permutation generator, calling `visit`
/// once per ordering of `order[index..]`.
fn permute(order: &mut [usize], index: usize, visit: &mut impl FnMut(&[usize])) {
    if index == order.len() {
        visit(order);
        return;
    }
    for i in index..order.len() {
        order.swap(index, i);
        permute(order, index + 1, visit);
        order.swap(index, i);
    }
}
