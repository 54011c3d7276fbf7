//! Reads a reduced boundary matrix and produces a [`PersistencePairing`]
//! (`spec.md` §4.8), un-dualizing indices when needed.

use crate::boundary_matrix::BoundaryMatrix;
use crate::column::Column;
use crate::pairing::PersistencePairing;
use std::collections::HashSet;

/// Derives the persistence pairing of a *reduced* matrix `reduced`.
///
/// If `reduced.is_dualized()`, every emitted index pair is remapped back
/// into the original (non-dualized) complex's index space: a reduced pair
/// `(i, j)` corresponds to `(N - 1 - j, N - 1 - i)` in the original — note
/// the swap, since the dual's "lower becomes upper" — and an essential
/// candidate `c` corresponds to `N - 1 - c`.
///
/// `include_all_unpaired` controls the asymmetry in `spec.md` §4.8: in the
/// non-dualized case an empty column `j` is only kept as an essential
/// candidate when `dim(j) < max_dim` (a top-dimension column can never be
/// the boundary of anything absent from the complex, so treating it as
/// essential would be spurious); in the dualized case every empty column is
/// always kept. Setting this flag to `true` keeps *every* empty column as
/// an essential candidate regardless of dimension, in both cases.
pub fn compute_pairing<C: Column>(
    reduced: &BoundaryMatrix<C>,
    include_all_unpaired: bool,
) -> PersistencePairing {
    let n = reduced.num_columns();
    let dualized = reduced.is_dualized();
    let max_dim = reduced.max_dim();

    let mut essential_candidates: HashSet<usize> = HashSet::new();
    let mut pairing = PersistencePairing::new();

    for j in 0..n {
        match reduced.maximum_index(j) {
            Some(i) => {
                essential_candidates.remove(&i);
                let (birth, death) = remap_pair(i, j, n, dualized);
                pairing.add_pair(birth, death);
            }
            None => {
                let keep = include_all_unpaired
                    || dualized
                    || max_dim.map_or(true, |d| reduced.dim(j) < d);
                if keep {
                    essential_candidates.insert(j);
                }
            }
        }
    }

    let mut essentials: Vec<usize> = essential_candidates.into_iter().collect();
    essentials.sort_unstable();
    for c in essentials {
        let birth = remap_essential(c, n, dualized);
        pairing.add_essential(birth);
    }

    pairing.sort();
    pairing
}

fn remap_pair(i: usize, j: usize, n: usize, dualized: bool) -> (usize, usize) {
    if dualized {
        (n - 1 - j, n - 1 - i)
    } else {
        (i, j)
    }
}

fn remap_essential(c: usize, n: usize, dualized: bool) -> usize {
    if dualized {
        n - 1 - c
    } else {
        c
    }
}
