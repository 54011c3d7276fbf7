//! Text formats for boundary matrices and persistence diagrams (`spec.md`
//! §6). These are the core's only input/output surface; richer formats
//! (edge lists, PLY, VTK, GML, Pajek, sparse adjacency matrices) are
//! external collaborators that ultimately produce the types in this crate
//! and are out of scope here.

use crate::boundary_matrix::BoundaryMatrix;
use crate::column::Column;
use crate::error::{PersistenceError, Result};

/// Parses the boundary-matrix text format: one column per non-blank,
/// non-`#` line, each line `d  r_1  r_2  ...  r_k` where `d` is the
/// column's dimension and `r_1 .. r_k` are its (already sorted) boundary
/// row indices. Blank lines and lines starting with `#` are ignored.
///
/// # Errors
/// Fails with [`PersistenceError::BoundaryDimensionMismatch`] if a line's
/// declared dimension does not match its number of boundary indices.
pub fn parse_boundary_matrix<C: Column>(text: &str) -> Result<BoundaryMatrix<C>> {
    let data_lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let mut matrix = BoundaryMatrix::new();
    matrix.set_num_columns(data_lines.len());

    for (column, (line_no, line)) in data_lines.into_iter().enumerate() {
        let mut tokens = line.split_whitespace();
        let dim_token = tokens.next().ok_or_else(|| {
            PersistenceError::InvalidInput(format!("line {line_no}: empty column"))
        })?;
        let dim: usize = dim_token.parse().map_err(|_| {
            PersistenceError::InvalidInput(format!(
                "line {line_no}: dimension '{dim_token}' is not a non-negative integer"
            ))
        })?;

        let mut rows = Vec::new();
        for token in tokens {
            let row: usize = token.parse().map_err(|_| {
                PersistenceError::InvalidInput(format!(
                    "line {line_no}: row index '{token}' is not a non-negative integer"
                ))
            })?;
            rows.push(row);
        }

        if rows.len() != dim {
            return Err(PersistenceError::BoundaryDimensionMismatch {
                expected: dim,
                found: rows.len(),
                line: line_no,
            });
        }

        matrix.set_column(column, rows);
        matrix.set_dim(column, dim);
    }

    Ok(matrix)
}

/// Serializes a boundary matrix into the text format parsed by
/// [`parse_boundary_matrix`].
pub fn write_boundary_matrix<C: Column>(matrix: &BoundaryMatrix<C>) -> String {
    let mut out = String::new();
    for j in 0..matrix.num_columns() {
        out.push_str(&matrix.dim(j).to_string());
        for row in matrix.get_column(j) {
            out.push(' ');
            out.push_str(&row.to_string());
        }
        out.push('\n');
    }
    out
}

/// Serializes a sequence of `(x, y)` pairs into the persistence-diagram
/// text format: one pair per line, tab separated. `y` is rendered via
/// `sentinel` whenever it represents an essential (unpaired) point; the
/// caller supplies the sentinel explicitly since `+∞` has no single
/// canonical textual form across downstream consumers.
pub fn write_diagram_points(points: &[(f64, Option<f64>)], sentinel: f64) -> String {
    let mut out = String::new();
    for &(x, y) in points {
        out.push_str(&x.to_string());
        out.push('\t');
        out.push_str(&y.unwrap_or(sentinel).to_string());
        out.push('\n');
    }
    out
}

/// Parses the persistence-diagram text format back into `(x, y)` pairs.
/// A `y` value equal to `sentinel` is interpreted as unpaired (`None`).
pub fn parse_diagram_points(text: &str, sentinel: f64) -> Result<Vec<(f64, Option<f64>)>> {
    let mut points = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let x: f64 = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| PersistenceError::InvalidInput(format!("line {}: missing x", i + 1)))?;
        let y: f64 = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| PersistenceError::InvalidInput(format!("line {}: missing y", i + 1)))?;
        points.push((x, if y == sentinel { None } else { Some(y) }));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::VecColumn;

    #[test]
    fn round_trips_boundary_matrix() {
        let text = "# a comment\n0\n0\n\n1 0 1\n2 2 3 4\n";
        let matrix: BoundaryMatrix<VecColumn> = parse_boundary_matrix(text).unwrap();
        assert_eq!(matrix.num_columns(), 4);
        assert_eq!(matrix.dim(2), 1);
        assert_eq!(matrix.get_column(2), vec![0, 1]);

        let serialized = write_boundary_matrix(&matrix);
        let reparsed: BoundaryMatrix<VecColumn> = parse_boundary_matrix(&serialized).unwrap();
        assert_eq!(matrix, reparsed);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let text = "1 0 1\n";
        let result: Result<BoundaryMatrix<VecColumn>> = parse_boundary_matrix(text);
        assert_eq!(
            result.unwrap_err(),
            PersistenceError::BoundaryDimensionMismatch {
                expected: 1,
                found: 2,
                line: 1,
            }
        );
    }

    #[test]
    fn diagram_points_round_trip_with_sentinel() {
        let points = vec![(0.0, Some(1.0)), (0.0, None)];
        let text = write_diagram_points(&points, -1.0);
        let parsed = parse_diagram_points(&text, -1.0).unwrap();
        assert_eq!(parsed, points);
    }
}
