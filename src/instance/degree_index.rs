use fnv::FnvHashMap;

use super::ElementId;
use super::Hypergraph;
use crate::bounds::BoundError;
use crate::hs_assert_extreme;

/// For every element of a [`Hypergraph`], the number of edges containing it.
///
/// Every element of the universe is additionally assigned a dense position in `0..num_elements()`
/// (in order of first appearance), which allows bounds to keep per-element state in a plain
/// [`Vec`] rather than a map.
#[derive(Debug, Clone)]
pub struct DegreeIndex {
    positions: FnvHashMap<ElementId, usize>,
    elements: Vec<ElementId>,
    degrees: Vec<usize>,
}

impl DegreeIndex {
    /// Builds the index in time linear in the number of edge-element incidences.
    pub fn build(hypergraph: &Hypergraph) -> Self {
        let mut positions = FnvHashMap::default();
        let mut elements = Vec::new();
        let mut degrees = Vec::new();

        for edge in hypergraph.edges() {
            for &element in edge.elements() {
                let position = *positions.entry(element).or_insert_with(|| {
                    elements.push(element);
                    degrees.push(0);
                    elements.len() - 1
                });
                degrees[position] += 1;
            }
        }

        let index = DegreeIndex {
            positions,
            elements,
            degrees,
        };
        hs_assert_extreme!(
            index.total_incidences() == hypergraph.num_incidences(),
            "The degrees should sum up to the number of incidences"
        );
        index
    }

    /// The number of edges containing `element`.
    ///
    /// An element which does not occur in the hypergraph results in
    /// [`BoundError::UnknownElement`] rather than a degree of 0.
    pub fn degree(&self, element: ElementId) -> Result<usize, BoundError> {
        Ok(self.degrees[self.position(element)?])
    }

    /// The dense position assigned to `element`.
    pub fn position(&self, element: ElementId) -> Result<usize, BoundError> {
        self.positions
            .get(&element)
            .copied()
            .ok_or(BoundError::UnknownElement(element))
    }

    /// The element at dense position `position`.
    pub fn element_at(&self, position: usize) -> Option<ElementId> {
        self.elements.get(position).copied()
    }

    /// The largest degree of any element; [`BoundError::EmptyHypergraph`] if there are no edges.
    pub fn max_degree(&self) -> Result<usize, BoundError> {
        self.degrees
            .iter()
            .copied()
            .max()
            .ok_or(BoundError::EmptyHypergraph)
    }

    /// The degrees of all elements, indexed by dense position.
    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The sum of all degrees.
    pub fn total_incidences(&self) -> usize {
        self.degrees.iter().sum()
    }
}
