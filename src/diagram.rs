//! Persistence diagrams and their construction from a pairing
//! (`spec.md` §4.9).

use crate::column::INVALID_INDEX;
use crate::error::Result;
use crate::pairing::PersistencePairing;
use crate::simplicial_complex::SimplicialComplex;
use std::collections::BTreeMap;

/// A multiset of `(birth, death)` points in a single homological
/// dimension. `death = None` represents `+∞` (an essential class).
#[derive(Debug, Clone)]
pub struct PersistenceDiagram<D> {
    dimension: usize,
    points: Vec<(D, Option<D>)>,
}

impl<D> PersistenceDiagram<D> {
    /// An empty diagram tagged with homological dimension `dimension`.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            points: Vec::new(),
        }
    }

    /// The homological dimension this diagram summarizes.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Adds an unpaired point `(x, +∞)`.
    pub fn add(&mut self, x: D) {
        self.points.push((x, None));
    }

    /// Adds a paired point `(x, y)`.
    pub fn add_pair(&mut self, x: D, y: D) {
        self.points.push((x, Some(y)));
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the diagram has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of unpaired points (`y = +∞`).
    pub fn betti(&self) -> usize {
        self.points.iter().filter(|(_, y)| y.is_none()).count()
    }

    /// Iterates the diagram's points in storage order (this order is not
    /// part of the diagram's identity; see [`PersistenceDiagram::eq`]).
    pub fn iter(&self) -> impl Iterator<Item = &(D, Option<D>)> {
        self.points.iter()
    }

    /// Removes all unpaired points.
    pub fn remove_unpaired(&mut self) {
        self.points.retain(|(_, y)| y.is_some());
    }
}

impl<D: Clone + std::ops::Sub<Output = D>> PersistenceDiagram<D> {
    /// `persistence(p) = y - x` for every point, in storage order. Unpaired
    /// points (`y = +∞`) yield `None` rather than forcing every `D` to
    /// represent infinity.
    pub fn persistences(&self) -> impl Iterator<Item = Option<D>> + '_ {
        self.points
            .iter()
            .map(|(x, y)| y.clone().map(|y| y - x.clone()))
    }
}

impl<D: PartialEq> PersistenceDiagram<D> {
    /// Removes all points with `x == y` (zero persistence). Unpaired
    /// points are never removed by this.
    pub fn remove_diagonal(&mut self) {
        self.points.retain(|(x, y)| y.as_ref() != Some(x));
    }
}

impl<D: Clone + PartialOrd> PartialEq for PersistenceDiagram<D> {
    /// Compares diagrams as multisets: equal iff they tag the same
    /// dimension and hold the same points up to reordering.
    fn eq(&self, other: &Self) -> bool {
        if self.dimension != other.dimension || self.points.len() != other.points.len() {
            return false;
        }
        let mut a = self.points.clone();
        let mut b = other.points.clone();
        a.sort_by(point_cmp);
        b.sort_by(point_cmp);
        a.len() == b.len() && a.iter().zip(&b).all(|(p, q)| points_eq(p, q))
    }
}

impl<D: Clone + PartialOrd + std::hash::Hash> std::hash::Hash for PersistenceDiagram<D> {
    /// Hashes the diagram as a multiset: points are sorted into a canonical
    /// order first, so two diagrams holding the same points in different
    /// storage order hash equally, matching [`PersistenceDiagram::eq`].
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.dimension.hash(state);
        let mut sorted = self.points.clone();
        sorted.sort_by(point_cmp);
        for (x, y) in &sorted {
            x.hash(state);
            y.hash(state);
        }
    }
}

fn point_cmp<D: PartialOrd>(a: &(D, Option<D>), b: &(D, Option<D>)) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    a.0.partial_cmp(&b.0)
        .expect("diagram data must be totally ordered (wrap floats in ordered_float::OrderedFloat)")
        .then_with(|| match (&a.1, &b.1) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => x
                .partial_cmp(y)
                .expect("diagram data must be totally ordered"),
        })
}

fn points_eq<D: PartialEq>(a: &(D, Option<D>), b: &(D, Option<D>)) -> bool {
    a.0 == b.0 && a.1 == b.1
}

/// Builds one diagram per distinct homological dimension appearing in
/// `pairing`, keyed (and iterable) in ascending dimension order.
///
/// For a pair `(i, j)`: `s = complex[i]`, `d = dim(s)`, `x = s.data()`; if
/// `j` is finite, `y = complex[j].data()` and `(x, y)` is added to the
/// dimension-`d` diagram, else `(x, +∞)` is added.
///
/// # Errors
/// Fails with [`crate::error::PersistenceError::EmptySimplex`] if a birth
/// index in `pairing` refers to the empty simplex (never happens for a
/// pairing produced by [`crate::pairing_computation::compute_pairing`]
/// over a well-formed complex).
pub fn diagrams_from_pairing<D: Clone + PartialOrd>(
    pairing: &PersistencePairing,
    complex: &SimplicialComplex<D>,
) -> Result<BTreeMap<usize, PersistenceDiagram<D>>> {
    let mut diagrams: BTreeMap<usize, PersistenceDiagram<D>> = BTreeMap::new();

    for pair in pairing.iter() {
        let birth_simplex = complex.get(pair.birth);
        let d = birth_simplex.dim()?;
        let x = birth_simplex.data().clone();
        let diagram = diagrams.entry(d).or_insert_with(|| PersistenceDiagram::new(d));
        if pair.death == INVALID_INDEX {
            diagram.add(x);
        } else {
            let y = complex.get(pair.death).data().clone();
            diagram.add_pair(x, y);
        }
    }

    Ok(diagrams)
}

/// Builds a single (implicitly dimension-0) diagram for sublevel-set
/// persistence of a 1D function: `values[i]` is the function value at
/// sample `i`, and `pairing` indexes directly into `values` rather than
/// into a simplicial complex.
pub fn diagram_from_function_values<D: Clone>(
    values: &[D],
    pairing: &PersistencePairing,
) -> PersistenceDiagram<D> {
    let mut diagram = PersistenceDiagram::new(0);
    for pair in pairing.iter() {
        let x = values[pair.birth].clone();
        if pair.death == INVALID_INDEX {
            diagram.add(x);
        } else {
            diagram.add_pair(x, values[pair.death].clone());
        }
    }
    diagram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simplex::Simplex;
    use ordered_float::OrderedFloat;

    #[test]
    fn add_and_remove_unpaired() {
        let mut d: PersistenceDiagram<OrderedFloat<f64>> = PersistenceDiagram::new(0);
        d.add(OrderedFloat(1.0));
        d.add_pair(OrderedFloat(0.0), OrderedFloat(2.0));
        assert_eq!(d.betti(), 1);
        d.remove_unpaired();
        assert_eq!(d.len(), 1);
        assert_eq!(d.betti(), 0);
    }

    #[test]
    fn persistences_computes_y_minus_x_and_none_for_unpaired() {
        let mut d: PersistenceDiagram<OrderedFloat<f64>> = PersistenceDiagram::new(0);
        d.add_pair(OrderedFloat(1.0), OrderedFloat(3.0));
        d.add(OrderedFloat(0.0));
        let values: Vec<Option<OrderedFloat<f64>>> = d.persistences().collect();
        assert_eq!(values, vec![Some(OrderedFloat(2.0)), None]);
    }

    #[test]
    fn remove_diagonal_drops_zero_persistence_points() {
        let mut d: PersistenceDiagram<OrderedFloat<f64>> = PersistenceDiagram::new(1);
        d.add_pair(OrderedFloat(1.0), OrderedFloat(1.0));
        d.add_pair(OrderedFloat(0.0), OrderedFloat(2.0));
        d.remove_diagonal();
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn hash_agrees_with_equality_across_point_order() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        fn hash_of(d: &PersistenceDiagram<OrderedFloat<f64>>) -> u64 {
            let mut h = DefaultHasher::new();
            d.hash(&mut h);
            h.finish()
        }

        let mut a: PersistenceDiagram<OrderedFloat<f64>> = PersistenceDiagram::new(0);
        a.add_pair(OrderedFloat(0.0), OrderedFloat(1.0));
        a.add(OrderedFloat(2.0));

        let mut b: PersistenceDiagram<OrderedFloat<f64>> = PersistenceDiagram::new(0);
        b.add(OrderedFloat(2.0));
        b.add_pair(OrderedFloat(0.0), OrderedFloat(1.0));

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn equality_ignores_point_order() {
        let mut a: PersistenceDiagram<OrderedFloat<f64>> = PersistenceDiagram::new(0);
        a.add_pair(OrderedFloat(0.0), OrderedFloat(1.0));
        a.add(OrderedFloat(2.0));

        let mut b: PersistenceDiagram<OrderedFloat<f64>> = PersistenceDiagram::new(0);
        b.add(OrderedFloat(2.0));
        b.add_pair(OrderedFloat(0.0), OrderedFloat(1.0));

        assert_eq!(a, b);
    }

    #[test]
    fn triangle_pairing_builds_three_dimension_zero_points() {
        let mut complex: SimplicialComplex<OrderedFloat<f64>> = SimplicialComplex::new();
        complex
            .insert(Simplex::new(vec![0, 1, 2], OrderedFloat(0.0)))
            .unwrap();
        complex.sort_by_data();

        let mut pairing = PersistencePairing::new();
        pairing.add_pair(1, 3);
        pairing.add_pair(2, 4);
        pairing.add_essential(0);

        let diagrams = diagrams_from_pairing(&pairing, &complex).unwrap();
        let dim0 = &diagrams[&0];
        assert_eq!(dim0.len(), 3);
        assert_eq!(dim0.betti(), 1);
    }

    #[test]
    fn function_values_diagram_ignores_simplex_structure() {
        let values = vec![0.0, 2.0, 1.0, 3.0];
        let mut pairing = PersistencePairing::new();
        pairing.add_pair(0, 2);
        pairing.add_essential(1);

        let diagram = diagram_from_function_values(&values, &pairing);
        assert_eq!(diagram.len(), 2);
        assert_eq!(diagram.dimension(), 0);
    }
}
