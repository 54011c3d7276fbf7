//! Simplices: ordered vertex sets carrying a filtration data value.

use crate::error::{PersistenceError, Result};
use std::cmp::Ordering;

/// A finite, ordered set of vertex identifiers together with a data value
/// `w` of type `D`.
///
/// Vertices are deduplicated and stored in ascending order on construction.
/// Equality, hashing, and ordering are defined purely on the vertex
/// sequence; the data value never participates (see `spec.md` §3).
#[derive(Debug, Clone)]
pub struct Simplex<D> {
    vertices: Vec<usize>,
    data: D,
}

impl<D> Simplex<D> {
    /// Builds a simplex from any iterable of vertices, deduplicating and
    /// sorting into canonical (ascending) order. The empty simplex is
    /// allowed and represents an invalid/default placeholder.
    pub fn new(vertices: impl IntoIterator<Item = usize>, data: D) -> Self {
        let mut vertices: Vec<usize> = vertices.into_iter().collect();
        vertices.sort_unstable();
        vertices.dedup();
        Self { vertices, data }
    }

    /// Like [`Simplex::new`], but fails if the resulting vertex set is
    /// empty.
    pub fn new_nonempty(
        vertices: impl IntoIterator<Item = usize>,
        data: D,
    ) -> Result<Self> {
        let simplex = Self::new(vertices, data);
        if simplex.vertices.is_empty() {
            Err(PersistenceError::EmptySimplex)
        } else {
            Ok(simplex)
        }
    }

    /// Number of vertices, i.e. `dim() + 1` for non-empty simplices.
    pub fn size(&self) -> usize {
        self.vertices.len()
    }

    /// Dimension of the simplex (`size() - 1`).
    ///
    /// # Errors
    /// Fails with [`PersistenceError::EmptySimplex`] for the empty simplex.
    pub fn dim(&self) -> Result<usize> {
        self.vertices
            .len()
            .checked_sub(1)
            .ok_or(PersistenceError::EmptySimplex)
    }

    /// Whether `v` is among this simplex's vertices.
    pub fn contains(&self, v: usize) -> bool {
        self.vertices.binary_search(&v).is_ok()
    }

    /// The vertex sequence, in canonical ascending order.
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// The simplex's data value.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Reassigns the simplex's data value.
    pub fn set_data(&mut self, data: D) {
        self.data = data;
    }
}

impl<D: Clone> Simplex<D> {
    /// Enumerates the codimension-1 faces of this simplex, obtained by
    /// removing one vertex at a time in vertex order. For a dimension-`k`
    /// simplex this produces `k + 1` faces of dimension `k - 1`, each
    /// carrying a copy of this simplex's data value (callers that need
    /// face-closure semantics, where `data(face) == s.data()` only when the
    /// face was newly introduced, overwrite it as needed — see
    /// [`crate::simplicial_complex::SimplicialComplex::insert`]).
    ///
    /// # Errors
    /// Fails with [`PersistenceError::EmptySimplex`] for the empty simplex.
    /// Returns an empty vector for 0-simplices (per `spec.md` §4.1).
    pub fn boundary(&self) -> Result<Vec<Simplex<D>>> {
        if self.vertices.is_empty() {
            return Err(PersistenceError::EmptySimplex);
        }
        if self.vertices.len() == 1 {
            return Ok(Vec::new());
        }
        let mut faces = Vec::with_capacity(self.vertices.len());
        for skip in 0..self.vertices.len() {
            let face_vertices: Vec<usize> = self
                .vertices
                .iter()
                .enumerate()
                .filter_map(|(i, &v)| if i == skip { None } else { Some(v) })
                .collect();
            faces.push(Simplex::new(face_vertices, self.data.clone()));
        }
        Ok(faces)
    }
}

impl<D> PartialEq for Simplex<D> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl<D> Eq for Simplex<D> {}

impl<D> std::hash::Hash for Simplex<D> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.vertices.hash(state);
    }
}

impl<D> PartialOrd for Simplex<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D> Ord for Simplex<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.vertices.cmp(&other.vertices)
    }
}

impl<D> std::ops::Index<usize> for Simplex<D> {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.vertices[i]
    }
}
