//! Crate-wide error type.
//!
//! Every fallible operation in this crate returns [`Result`], never panics
//! on malformed-but-reachable input, and never aborts the process.

use thiserror::Error;

/// Errors produced by the persistent homology pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// Dimension or boundary was requested of the empty simplex.
    #[error("the empty simplex has no dimension or boundary")]
    EmptySimplex,

    /// Dimension was requested of an empty complex.
    #[error("an empty complex has no dimension")]
    EmptyComplex,

    /// `index`/`find` was asked for a simplex that is not present.
    #[error("simplex with vertices {vertices:?} not found in complex")]
    NotFound {
        /// Vertex set of the simplex that was looked up.
        vertices: Vec<usize>,
    },

    /// Conversion found a face that is absent from the complex.
    #[error("face {face:?} of simplex {simplex:?} is missing from the complex")]
    MissingFace {
        /// Vertex set of the missing face.
        face: Vec<usize>,
        /// Vertex set of the simplex whose face is missing.
        simplex: Vec<usize>,
    },

    /// A face's filtration index is not strictly smaller than its coface's.
    #[error(
        "filtration is broken: face at index {face_index} does not precede coface at index {simplex_index}"
    )]
    BrokenFiltration {
        /// Filtration index of the offending face.
        face_index: usize,
        /// Filtration index of the coface it is supposed to precede.
        simplex_index: usize,
    },

    /// The text loader found a declared dimension inconsistent with the
    /// number of boundary indices on a line.
    #[error(
        "line {line}: column declares dimension {expected} but has {found} boundary indices"
    )]
    BoundaryDimensionMismatch {
        /// Dimension declared at the start of the line.
        expected: usize,
        /// Number of indices actually present.
        found: usize,
        /// 1-based line number within the input, for diagnostics.
        line: usize,
    },

    /// Any other malformed input (unsorted column, duplicate simplex, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PersistenceError>;
