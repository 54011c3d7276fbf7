//! Boundary matrix reduction (`spec.md` §4.4).
//!
//! Both algorithms reduce a [`BoundaryMatrix`] in place to column-echelon
//! form over ℤ/2: for every non-empty reduced column, its maximum row
//! index (its *pivot*) is unique across the whole matrix. A lookup table
//! from pivot row to the column currently owning it lets each column find
//! the next column to add in `O(1)` amortized per addition.

use crate::boundary_matrix::BoundaryMatrix;
use crate::column::{Column, Index};
use log::debug;

/// Which reduction strategy to run; see `spec.md` §4.4.1 / §4.4.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionAlgorithm {
    /// Reduces every column in filtration order, independent of dimension.
    Standard,
    /// Reduces dimension-`k` columns before dimension-`(k-1)` columns, and
    /// clears a column as soon as it is claimed as someone's pivot target
    /// (it can never again receive an addition, since its own pivot has
    /// already been zeroed out as a boundary entry of a higher column).
    Twist,
}

/// Reduces `matrix` in place using `algorithm`, returning nothing: the
/// matrix itself now holds the reduced form.
pub fn reduce<C: Column>(matrix: &mut BoundaryMatrix<C>, algorithm: ReductionAlgorithm) {
    match algorithm {
        ReductionAlgorithm::Standard => standard_reduce(matrix),
        ReductionAlgorithm::Twist => twist_reduce(matrix),
    }
}

/// Standard algorithm (`spec.md` §4.4.1): columns are reduced left to
/// right, in filtration order, with no regard for dimension.
pub fn standard_reduce<C: Column>(matrix: &mut BoundaryMatrix<C>) {
    let n = matrix.num_columns();
    let mut pivot_owner: Vec<Option<Index>> = vec![None; n];

    for j in 0..n {
        reduce_column(matrix, &mut pivot_owner, j);
    }
    debug!("standard reduction finished over {n} columns");
}

/// Twist algorithm (`spec.md` §4.4.2): columns are reduced dimension by
/// dimension, from the top dimension down to `1`. Whenever a column `j`
/// claims a pivot row `i`, column `i` is cleared immediately, since `i`
/// is the index of a face whose own column (being a boundary of a lower
/// dimension) never needs to be reduced again once it is known to be
/// non-essential.
pub fn twist_reduce<C: Column>(matrix: &mut BoundaryMatrix<C>) {
    let n = matrix.num_columns();
    let max_dim = matrix.max_dim().unwrap_or(0);
    let mut pivot_owner: Vec<Option<Index>> = vec![None; n];

    let mut dim = max_dim;
    loop {
        for j in 0..n {
            if matrix.dim(j) == dim {
                if let Some(pivot) = reduce_column(matrix, &mut pivot_owner, j) {
                    matrix.clear_column(pivot);
                }
            }
        }
        if dim == 0 {
            break;
        }
        dim -= 1;
    }
    debug!("twist reduction finished over {n} columns, max dimension {max_dim}");
}

/// Reduces column `j` against previously-claimed pivots, recording `j` as
/// the new owner of whatever pivot it settles on. Returns the claimed
/// pivot row, if any.
fn reduce_column<C: Column>(
    matrix: &mut BoundaryMatrix<C>,
    pivot_owner: &mut [Option<Index>],
    j: usize,
) -> Option<Index> {
    loop {
        let pivot = matrix.maximum_index(j)?;
        match pivot_owner[pivot] {
            Some(owner) => matrix.add_columns(owner, j),
            None => {
                pivot_owner[pivot] = Some(j);
                return Some(pivot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::VecColumn;

    fn triangle() -> BoundaryMatrix<VecColumn> {
        // vertices 0,1,2 (dim 0); edges 3={0,1},4={0,2},5={1,2} (dim 1); face 6 (dim 2).
        let mut m: BoundaryMatrix<VecColumn> = BoundaryMatrix::new();
        m.set_num_columns(7);
        for j in 0..3 {
            m.set_column(j, vec![]);
            m.set_dim(j, 0);
        }
        m.set_column(3, vec![0, 1]);
        m.set_column(4, vec![0, 2]);
        m.set_column(5, vec![1, 2]);
        for j in 3..6 {
            m.set_dim(j, 1);
        }
        m.set_column(6, vec![3, 4, 5]);
        m.set_dim(6, 2);
        m
    }

    fn pivots<C: Column>(matrix: &BoundaryMatrix<C>) -> Vec<Option<Index>> {
        (0..matrix.num_columns())
            .map(|j| matrix.maximum_index(j))
            .collect()
    }

    #[test]
    fn standard_reduction_has_unique_pivots() {
        let mut m = triangle();
        standard_reduce(&mut m);
        let ps: Vec<Index> = pivots(&m).into_iter().flatten().collect();
        let mut sorted = ps.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ps.len(), sorted.len(), "pivots must be unique: {ps:?}");
    }

    #[test]
    fn standard_and_twist_agree_on_pivot_set() {
        let mut standard = triangle();
        standard_reduce(&mut standard);
        let mut twist = triangle();
        twist_reduce(&mut twist);

        let standard_pivots: Vec<Option<Index>> = pivots(&standard);
        let twist_pivots: Vec<Option<Index>> = pivots(&twist);
        assert_eq!(standard_pivots, twist_pivots);
    }

    #[test]
    fn reducing_an_already_reduced_matrix_is_idempotent() {
        let mut m = triangle();
        standard_reduce(&mut m);
        let reduced_once = pivots(&m);
        standard_reduce(&mut m);
        assert_eq!(pivots(&m), reduced_once);
    }
}
