//! Converts a filtered simplicial complex into a boundary matrix
//! (`spec.md` §4.6).

use crate::boundary_matrix::BoundaryMatrix;
use crate::column::Column;
use crate::error::{PersistenceError, Result};
use crate::simplicial_complex::SimplicialComplex;

/// Builds the boundary matrix of `complex`: column `j` lists
/// `complex.index(f)` for every face `f` of `complex[j]`, and
/// `dim(j) = complex[j].dim()`.
///
/// # Errors
/// Fails with [`PersistenceError::MissingFace`] if a face is absent from
/// the complex (should never happen on a closed complex), or with
/// [`PersistenceError::BrokenFiltration`] if a face's filtration index is
/// not strictly smaller than its coface's.
pub fn to_boundary_matrix<D: Clone, C: Column>(
    complex: &SimplicialComplex<D>,
) -> Result<BoundaryMatrix<C>> {
    let n = complex.size();
    let mut matrix = BoundaryMatrix::new();
    matrix.set_num_columns(n);

    for j in 0..n {
        let simplex = &complex.simplices()[j];
        let dim = simplex.dim().unwrap_or(0);
        matrix.set_dim(j, dim);

        if dim == 0 {
            matrix.set_column(j, Vec::new());
            continue;
        }

        let mut rows = Vec::with_capacity(dim + 1);
        for face in simplex.boundary()? {
            let i = complex
                .index(face.vertices())
                .map_err(|_| PersistenceError::MissingFace {
                    face: face.vertices().to_vec(),
                    simplex: simplex.vertices().to_vec(),
                })?;
            if i >= j {
                return Err(PersistenceError::BrokenFiltration {
                    face_index: i,
                    simplex_index: j,
                });
            }
            rows.push(i);
        }
        matrix.set_column(j, rows);
    }

    Ok(matrix)
}
