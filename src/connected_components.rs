//! Direct 0-dimensional persistence via union–find, bypassing the boundary
//! matrix entirely (`spec.md` §4.10).

use crate::column::{Index, INVALID_INDEX};
use crate::error::Result;
use crate::pairing::PersistencePairing;
use crate::simplicial_complex::SimplicialComplex;
use crate::union_find::UnionFind;
use log::debug;

/// Computes the dimension-0 persistence pairing of `complex` directly from
/// its 1-skeleton, without ever building a boundary matrix.
///
/// Vertices are assumed to occupy filtration positions `0 .. num_vertices`
/// and 1-simplices are processed in filtration order thereafter, matching
/// the layout any [`SimplicialComplex`] produces after [`SimplicialComplex::sort_by`]
/// and friends (vertices always sort no later than their edges, since faces
/// precede cofaces).
///
/// For each edge `{u, v}` with `a = find(u)`, `b = find(v)`: if already
/// connected, skip. Otherwise the elder rule picks `a` as whichever root's
/// representative simplex has the *greater* filtration index (the younger
/// component), swapping if needed, emits pair `(idx(a), idx(edge))`, and
/// merges `b`'s set to keep `a`'s root. Every surviving root after all
/// edges are processed emits an essential point.
///
/// # Errors
/// Fails with [`crate::error::PersistenceError::EmptyComplex`] if `complex`
/// is empty.
pub fn connected_components<D: Clone>(complex: &SimplicialComplex<D>) -> Result<PersistencePairing> {
    complex.dim()?;

    let vertex_positions = complex.range(0).to_vec();
    let num_vertices = vertex_positions.len();

    // `local_of` maps a vertex *label* (the id carried by its 0-simplex) to
    // a dense union-find element; `filtration_index[local]` maps that
    // element back to its defining simplex's filtration position, which is
    // what the elder rule compares and what gets reported in the pairing.
    let mut uf = UnionFind::new(num_vertices);
    let mut local_of: std::collections::HashMap<usize, usize> = std::collections::HashMap::new();
    let mut filtration_index: Vec<usize> = Vec::with_capacity(num_vertices);
    for (local, &pos) in vertex_positions.iter().enumerate() {
        let label = complex.get(pos).vertices()[0];
        local_of.insert(label, local);
        filtration_index.push(pos);
    }

    let mut pairing = PersistencePairing::new();

    for &edge_idx in complex.range(1) {
        let edge = complex.get(edge_idx);
        let endpoints = edge.vertices();
        debug_assert_eq!(endpoints.len(), 2, "range(1) must only hold 1-simplices");
        let u = *local_of.get(&endpoints[0]).expect("edge endpoint must be a known vertex");
        let v = *local_of.get(&endpoints[1]).expect("edge endpoint must be a known vertex");

        let root_u = uf.find(u);
        let root_v = uf.find(v);
        if root_u == root_v {
            continue;
        }

        // Elder rule: `a` is the younger component (greater filtration index).
        let (younger, elder) = if filtration_index[root_u] > filtration_index[root_v] {
            (root_u, root_v)
        } else {
            (root_v, root_u)
        };

        pairing.add_pair(filtration_index[younger] as Index, edge_idx as Index);
        uf.merge(elder, younger);
    }

    let mut seen_roots = std::collections::HashSet::new();
    for local in 0..num_vertices {
        let root = uf.find(local);
        if seen_roots.insert(root) {
            pairing.add_essential(filtration_index[root] as Index);
        }
    }

    pairing.sort();
    debug!(
        "connected-components fast path: {} vertices, {} pairs",
        num_vertices,
        pairing.len()
    );
    Ok(pairing)
}
