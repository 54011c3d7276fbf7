//! Filtered simplicial complex (`spec.md` §4.5), re-architected per §9 from
//! the source's three-index container into one canonical storage plus two
//! auxiliary indices: a `HashMap` from vertex set to position, and a
//! dimension-bucketed secondary index. All three views are kept consistent
//! by funneling every mutation through [`SimplicialComplex::reindex`].

use crate::error::{PersistenceError, Result};
use crate::simplex::Simplex;
use std::cmp::Ordering;
use std::collections::HashMap;

/// A sequence of simplices in filtration order, with auxiliary indices for
/// lexicographic lookup and dimension-restricted queries.
#[derive(Debug, Clone)]
pub struct SimplicialComplex<D> {
    simplices: Vec<Simplex<D>>,
    lex_index: HashMap<Vec<usize>, usize>,
    dim_index: Vec<Vec<usize>>,
}

impl<D> Default for SimplicialComplex<D> {
    fn default() -> Self {
        Self {
            simplices: Vec::new(),
            lex_index: HashMap::new(),
            dim_index: Vec::new(),
        }
    }
}

impl<D> SimplicialComplex<D> {
    /// An empty complex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of simplices.
    pub fn size(&self) -> usize {
        self.simplices.len()
    }

    /// Whether the complex has no simplices.
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Highest dimension among the complex's simplices.
    ///
    /// # Errors
    /// Fails with [`PersistenceError::EmptyComplex`] if the complex is empty.
    pub fn dim(&self) -> Result<usize> {
        if self.dim_index.is_empty() {
            return Err(PersistenceError::EmptyComplex);
        }
        Ok(self.dim_index.len() - 1)
    }

    /// The simplex currently occupying filtration position `j`.
    pub fn get(&self, j: usize) -> &Simplex<D> {
        &self.simplices[j]
    }

    /// All simplices, in filtration order.
    pub fn simplices(&self) -> &[Simplex<D>] {
        &self.simplices
    }

    /// Ascending list of vertex identifiers (every 0-simplex's sole vertex).
    pub fn vertices(&self) -> Vec<usize> {
        let mut vs: Vec<usize> = self
            .dim_index
            .first()
            .into_iter()
            .flatten()
            .map(|&i| self.simplices[i].vertices()[0])
            .collect();
        vs.sort_unstable();
        vs
    }

    /// Whether a simplex with this exact vertex set is present.
    pub fn contains(&self, vertices: &[usize]) -> bool {
        self.lex_index.contains_key(vertices)
    }

    /// The simplex with this exact vertex set, if present.
    pub fn find(&self, vertices: &[usize]) -> Option<&Simplex<D>> {
        self.lex_index.get(vertices).map(|&i| &self.simplices[i])
    }

    /// Filtration position of the simplex with this exact vertex set.
    ///
    /// # Errors
    /// Fails with [`PersistenceError::NotFound`] if no such simplex exists.
    pub fn index(&self, vertices: &[usize]) -> Result<usize> {
        self.lex_index
            .get(vertices)
            .copied()
            .ok_or_else(|| PersistenceError::NotFound {
                vertices: vertices.to_vec(),
            })
    }

    /// Filtration-position indices of every simplex of dimension exactly
    /// `d`, in filtration order. Empty if `d` exceeds the complex's
    /// dimension.
    pub fn range(&self, d: usize) -> &[usize] {
        self.dim_index.get(d).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replaces the simplex at filtration position `pos`. The caller must
    /// guarantee `replacement` has the same vertex set as the simplex
    /// currently there; this is not re-validated.
    pub fn replace(&mut self, pos: usize, replacement: Simplex<D>) {
        self.simplices[pos] = replacement;
    }

    /// Appends `s` without running face closure. The caller takes on
    /// responsibility for the face-closure invariant.
    ///
    /// # Errors
    /// Fails with [`PersistenceError::EmptySimplex`] for the empty simplex.
    pub fn push_without_validation(&mut self, s: Simplex<D>) -> Result<usize> {
        self.append_raw(s)
    }

    fn append_raw(&mut self, s: Simplex<D>) -> Result<usize> {
        let d = s.dim()?;
        let idx = self.simplices.len();
        self.lex_index.insert(s.vertices().to_vec(), idx);
        if self.dim_index.len() <= d {
            self.dim_index.resize_with(d + 1, Vec::new);
        }
        self.dim_index[d].push(idx);
        self.simplices.push(s);
        Ok(idx)
    }

    /// Rebuilds the lexicographic and dimension indices from the current
    /// filtration order. Called after any operation that reorders or
    /// removes simplices.
    fn reindex(&mut self) {
        self.lex_index.clear();
        self.dim_index.clear();
        for (i, s) in self.simplices.iter().enumerate() {
            self.lex_index.insert(s.vertices().to_vec(), i);
            let d = s.dim().expect("a stored simplex is never empty");
            if self.dim_index.len() <= d {
                self.dim_index.resize_with(d + 1, Vec::new);
            }
            self.dim_index[d].push(i);
        }
    }

    /// Reorders the filtration view according to `cmp`. `cmp` must satisfy:
    /// for any simplex `s` and face `f` of `s`, `cmp(f, s)` is
    /// [`Ordering::Less`]; this is not checked here (see
    /// [`crate::diagram`]'s scenario tests for concrete predicates that do).
    pub fn sort_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&Simplex<D>, &Simplex<D>) -> Ordering,
    {
        self.simplices.sort_by(|a, b| cmp(a, b));
        self.reindex();
    }
}

impl<D: Clone> SimplicialComplex<D> {
    /// Inserts `s`, recursively adding any of its faces not already present
    /// (each newly-created face inherits `s`'s data value, same as every
    /// other face produced along the way — so a whole new subtree of faces
    /// ends up sharing one data value until [`SimplicialComplex::recalculate_weights`]
    /// is run). A no-op if a simplex with `s`'s vertex set is already
    /// present.
    ///
    /// # Errors
    /// Fails with [`PersistenceError::EmptySimplex`] if `s` or any
    /// recursively-discovered face is empty (never happens for non-empty
    /// `s`, since `Simplex::boundary` never yields the empty simplex).
    pub fn insert(&mut self, s: Simplex<D>) -> Result<usize> {
        if let Some(&idx) = self.lex_index.get(s.vertices()) {
            return Ok(idx);
        }
        if s.size() > 1 {
            for face in s.boundary()? {
                self.insert(face)?;
            }
        }
        self.append_raw(s)
    }

    /// Inserts every simplex in `simplices`, running face closure for each.
    /// All-or-nothing: if any simplex in the batch is empty, the complex is
    /// left exactly as it was before the call, per `spec.md` §7 ("insert of
    /// a batch is all-or-nothing with respect to face closure").
    pub fn insert_all(
        &mut self,
        simplices: impl IntoIterator<Item = Simplex<D>>,
    ) -> Result<()> {
        let checkpoint = self.clone();
        for s in simplices {
            if let Err(e) = self.insert(s) {
                *self = checkpoint;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Builds a complex from an iterable of simplices, running face closure
    /// for each (equivalent to [`SimplicialComplex::new`] followed by
    /// [`SimplicialComplex::insert_all`]).
    pub fn from_simplices(simplices: impl IntoIterator<Item = Simplex<D>>) -> Result<Self> {
        let mut complex = Self::new();
        complex.insert_all(simplices)?;
        Ok(complex)
    }

    /// Removes the simplex with vertex set `vertices`, then transitively
    /// removes every simplex left with a missing face, repeating until no
    /// such simplex remains.
    ///
    /// # Errors
    /// Fails with [`PersistenceError::NotFound`] if `vertices` is absent.
    pub fn remove(&mut self, vertices: &[usize]) -> Result<()> {
        let start = self.index(vertices)?;
        let mut removed = vec![false; self.simplices.len()];
        removed[start] = true;

        loop {
            let mut changed = false;
            for (i, s) in self.simplices.iter().enumerate() {
                if removed[i] || s.size() <= 1 {
                    continue;
                }
                let invalid = s.boundary().map(|faces| {
                    faces.iter().any(|f| match self.lex_index.get(f.vertices()) {
                        None => true,
                        Some(&fi) => removed[fi],
                    })
                })?;
                if invalid {
                    removed[i] = true;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        let mut kept = Vec::with_capacity(self.simplices.len());
        for (i, s) in std::mem::take(&mut self.simplices).into_iter().enumerate() {
            if !removed[i] {
                kept.push(s);
            }
        }
        self.simplices = kept;
        self.reindex();
        Ok(())
    }
}

impl<D: Clone + PartialOrd> SimplicialComplex<D> {
    /// Reorders the filtration view by ascending data value, ties broken by
    /// dimension then lexicographically on the vertex set.
    pub fn sort_by_data(&mut self) {
        self.sort_by(|a, b| {
            data_cmp(a.data(), b.data())
                .then_with(|| a.dim().unwrap_or(0).cmp(&b.dim().unwrap_or(0)))
                .then_with(|| a.vertices().cmp(b.vertices()))
        });
    }

    /// Reorders the filtration view by the lower-star filtration induced by
    /// `vertex_weights`: each simplex is assigned `max_{v∈s} vertex_weights[v]`,
    /// ties broken by dimension then lexicographically.
    ///
    /// Vertices absent from `vertex_weights` are treated as weight-less and
    /// ignored when computing the max; a simplex with no weighted vertex at
    /// all compares as less than every weighted simplex.
    pub fn sort_by_lower_star(&mut self, vertex_weights: &HashMap<usize, D>) {
        self.sort_by_star(vertex_weights, true);
    }

    /// Reorders the filtration view by the upper-star filtration: each
    /// simplex is assigned `min_{v∈s} vertex_weights[v]`, same tie-breaking
    /// as [`SimplicialComplex::sort_by_lower_star`].
    pub fn sort_by_upper_star(&mut self, vertex_weights: &HashMap<usize, D>) {
        self.sort_by_star(vertex_weights, false);
    }

    fn sort_by_star(&mut self, vertex_weights: &HashMap<usize, D>, lower: bool) {
        let star_weight = |s: &Simplex<D>| -> Option<D> {
            let mut best: Option<D> = None;
            for &v in s.vertices() {
                if let Some(w) = vertex_weights.get(&v) {
                    best = Some(match best {
                        None => w.clone(),
                        Some(cur) => {
                            let take_new = if lower {
                                data_cmp(w, &cur) == Ordering::Greater
                            } else {
                                data_cmp(w, &cur) == Ordering::Less
                            };
                            if take_new {
                                w.clone()
                            } else {
                                cur
                            }
                        }
                    });
                }
            }
            best
        };
        self.sort_by(|a, b| {
            let wa = star_weight(a);
            let wb = star_weight(b);
            let weight_order = if lower {
                option_data_cmp(&wa, &wb)
            } else {
                option_data_cmp(&wb, &wa)
            };
            weight_order
                .then_with(|| a.dim().unwrap_or(0).cmp(&b.dim().unwrap_or(0)))
                .then_with(|| a.vertices().cmp(b.vertices()))
        });
    }

    /// Reassigns every simplex of dimension ≥ 1 (or ≥ 2 if `skip_1d`) the
    /// value `max { data(f) : f face of s, f ∈ K }`, processing dimensions
    /// from `1` upward so that a dimension-`d` simplex always sees its
    /// faces' already-finalized values. Faces absent from the complex are
    /// silently ignored.
    ///
    /// # Errors
    /// Fails with [`PersistenceError::EmptyComplex`] if the complex is
    /// empty.
    pub fn recalculate_weights(&mut self, skip_1d: bool) -> Result<()> {
        let max_dim = self.dim()?;
        for d in 1..=max_dim {
            if skip_1d && d == 1 {
                continue;
            }
            let indices = self.dim_index[d].clone();
            for idx in indices {
                let faces = self.simplices[idx].boundary()?;
                let mut max_val: Option<D> = None;
                for face in &faces {
                    if let Some(&face_idx) = self.lex_index.get(face.vertices()) {
                        let face_val = self.simplices[face_idx].data().clone();
                        max_val = Some(match max_val {
                            None => face_val,
                            Some(cur) if data_cmp(&face_val, &cur) == Ordering::Greater => face_val,
                            Some(cur) => cur,
                        });
                    }
                }
                if let Some(v) = max_val {
                    self.simplices[idx].set_data(v);
                }
            }
        }
        Ok(())
    }

    /// Like [`SimplicialComplex::recalculate_weights`], but first sets
    /// `data(v) = vertex_weights[v]` for every 0-simplex before propagating
    /// upward. 0-simplices absent from `vertex_weights` keep their current
    /// value.
    ///
    /// # Errors
    /// Fails with [`PersistenceError::EmptyComplex`] if the complex is
    /// empty.
    pub fn recalculate_weights_from_vertices(
        &mut self,
        vertex_weights: &HashMap<usize, D>,
    ) -> Result<()> {
        if let Some(vertex_dim) = self.dim_index.first() {
            for &idx in vertex_dim.clone().iter() {
                let v = self.simplices[idx].vertices()[0];
                if let Some(w) = vertex_weights.get(&v) {
                    self.simplices[idx].set_data(w.clone());
                }
            }
        }
        self.recalculate_weights(false)
    }
}

fn data_cmp<D: PartialOrd>(a: &D, b: &D) -> Ordering {
    a.partial_cmp(b)
        .expect("simplex data must be totally ordered (wrap floats in ordered_float::OrderedFloat)")
}

fn option_data_cmp<D: PartialOrd>(a: &Option<D>, b: &Option<D>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => data_cmp(a, b),
    }
}

impl<D> PartialEq for SimplicialComplex<D> {
    fn eq(&self, other: &Self) -> bool {
        self.simplices == other.simplices
    }
}

impl<D> std::ops::Index<usize> for SimplicialComplex<D> {
    type Output = Simplex<D>;

    fn index(&self, j: usize) -> &Simplex<D> {
        &self.simplices[j]
    }
}
