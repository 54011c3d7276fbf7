//! The boundary matrix: an array of sparse columns over ℤ/2, plus a
//! per-column dimension and a dualization flag.

use crate::column::{Column, Index};
use crate::error::Result;
use crate::io;
use log::debug;

/// Column-sparse matrix over ℤ/2 whose column `j` encodes the boundary of
/// simplex `j`, expressed as indices into the same filtration order.
///
/// Generic over the column representation `C` (see [`crate::column`]),
/// per `spec.md` §9 ("Polymorphism over column storage").
#[derive(Debug, Clone)]
pub struct BoundaryMatrix<C: Column> {
    columns: Vec<C>,
    dims: Vec<usize>,
    dualized: bool,
}

impl<C: Column> Default for BoundaryMatrix<C> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            dims: Vec::new(),
            dualized: false,
        }
    }
}

impl<C: Column> BoundaryMatrix<C> {
    /// An empty matrix with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns, `N`.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Resizes the matrix to `n` columns, each initially empty with
    /// dimension `0`. Shrinking drops trailing columns.
    pub fn set_num_columns(&mut self, n: usize) {
        self.columns.resize_with(n, C::default);
        self.dims.resize(n, 0);
    }

    /// Replaces column `j`'s contents. `rows` need not be pre-sorted.
    pub fn set_column(&mut self, j: usize, rows: Vec<Index>) {
        self.columns[j].set(rows);
    }

    /// Returns column `j`'s row indices in ascending order.
    pub fn get_column(&self, j: usize) -> Vec<Index> {
        self.columns[j].rows()
    }

    /// Empties column `j`.
    pub fn clear_column(&mut self, j: usize) {
        self.columns[j].clear();
    }

    /// The largest row index in column `j`, or `None` if empty.
    pub fn maximum_index(&self, j: usize) -> Option<Index> {
        self.columns[j].maximum_index()
    }

    /// `column[dst] <- column[dst] XOR column[src]`.
    pub fn add_columns(&mut self, src: usize, dst: usize) {
        // Split the slice so both columns can be borrowed simultaneously.
        if src == dst {
            return;
        }
        let (lo, hi) = if src < dst { (src, dst) } else { (dst, src) };
        let (left, right) = self.columns.split_at_mut(hi);
        if src < dst {
            right[0].add_assign(&left[lo]);
        } else {
            left[lo].add_assign(&right[0]);
        }
    }

    /// Dimension of column `j`.
    pub fn dim(&self, j: usize) -> usize {
        self.dims[j]
    }

    /// Sets the dimension of column `j`.
    pub fn set_dim(&mut self, j: usize, d: usize) {
        self.dims[j] = d;
    }

    /// The maximum column dimension across the whole matrix, or `None` if
    /// the matrix has no columns.
    pub fn max_dim(&self) -> Option<usize> {
        self.dims.iter().copied().max()
    }

    /// Whether this matrix is the anti-transpose of an original boundary
    /// matrix.
    pub fn is_dualized(&self) -> bool {
        self.dualized
    }

    /// Computes the anti-transpose of this matrix (§4.3).
    ///
    /// If the original has columns `c_0 .. c_{N-1}` over rows `0 .. N-1`,
    /// the dual has `c'_{N-1-i}` containing `N-1-j` for every `j` with
    /// `i` in `c_j`. Each dual column's dimension is `max_dim - dim(j)`.
    /// `dualized` is flipped. `dualize(dualize(M)) == M` (as a matrix, with
    /// the flag restored) per `spec.md` §8 property 4.
    pub fn dualize(&self) -> Self {
        let n = self.num_columns();
        let max_dim = self.max_dim().unwrap_or(0);

        // Pre-size every dual column to avoid reallocation while filling.
        let mut dual_sizes = vec![0usize; n];
        for j in 0..n {
            for &i in &self.columns[j].rows() {
                dual_sizes[n - 1 - i] += 1;
            }
        }
        let mut dual_rows: Vec<Vec<Index>> = dual_sizes.iter().map(|&s| Vec::with_capacity(s)).collect();

        for j in 0..n {
            for &i in &self.columns[j].rows() {
                dual_rows[n - 1 - i].push(n - 1 - j);
            }
        }

        let mut dual = Self::new();
        dual.set_num_columns(n);
        for j in 0..n {
            let mut rows = std::mem::take(&mut dual_rows[j]);
            rows.sort_unstable();
            dual.set_column(j, rows);
            dual.set_dim(j, max_dim - self.dim(n - 1 - j));
        }
        dual.dualized = !self.dualized;

        debug!("dualized matrix with {} columns", n);
        dual
    }

    /// Deserializes a boundary matrix from the textual boundary-list format
    /// described in `spec.md` §6.
    pub fn load(text: &str) -> Result<Self> {
        io::parse_boundary_matrix(text)
    }

    /// Serializes this matrix into the textual boundary-list format.
    pub fn to_text(&self) -> String {
        io::write_boundary_matrix(self)
    }
}

impl<C: Column + PartialEq> PartialEq for BoundaryMatrix<C> {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns && self.dims == other.dims && self.dualized == other.dualized
    }
}
