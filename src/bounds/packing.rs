use fnv::FnvHashSet;
use log::debug;

use super::BoundError;
use super::BoundKind;
use super::LowerBound;
use crate::hs_assert_extreme;
use crate::instance::DegreeIndex;
use crate::instance::Edge;
use crate::instance::Hypergraph;

/// A set of pairwise disjoint edges, identified by their index in [`Hypergraph::edges`].
///
/// Since no element can hit two edges of a packing, every hitting set contains at least
/// [`Packing::len`] elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packing {
    edges: Vec<usize>,
}

impl Packing {
    /// Builds a packing greedily.
    ///
    /// The edges are considered in ascending order of the sum of their element degrees; edges
    /// built from rarely occurring elements block fewer other edges. The sort is stable, so ties
    /// keep file order. An edge is added if none of its elements is used by a previously added
    /// edge; edges which are skipped are never reconsidered.
    pub fn greedy(hypergraph: &Hypergraph, degrees: &DegreeIndex) -> Result<Self, BoundError> {
        let keys = hypergraph
            .edges()
            .iter()
            .map(|edge| Self::order_key(edge, degrees))
            .collect::<Result<Vec<_>, _>>()?;

        let mut order: Vec<usize> = (0..hypergraph.num_edges()).collect();
        order.sort_by_key(|&edge_idx| keys[edge_idx]);

        let mut used = vec![false; degrees.num_elements()];
        let mut positions = Vec::new();
        let mut packed = Vec::new();
        for edge_idx in order {
            positions.clear();
            for &element in hypergraph.edges()[edge_idx].elements() {
                positions.push(degrees.position(element)?);
            }

            if positions.iter().any(|&position| used[position]) {
                continue;
            }
            for &position in &positions {
                used[position] = true;
            }
            packed.push(edge_idx);
        }

        Ok(Packing::from_disjoint(hypergraph, packed))
    }

    fn order_key(edge: &Edge, degrees: &DegreeIndex) -> Result<usize, BoundError> {
        edge.elements()
            .iter()
            .try_fold(0, |sum, &element| Ok(sum + degrees.degree(element)?))
    }

    /// Wraps edges which are known to be pairwise disjoint.
    pub(super) fn from_disjoint(hypergraph: &Hypergraph, edges: Vec<usize>) -> Self {
        let packing = Packing { edges };
        hs_assert_extreme!(
            packing.is_disjoint(hypergraph),
            "A packing should consist of pairwise disjoint edges"
        );
        packing
    }

    /// The indices of the packed edges in the order in which they were added.
    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether the packed edges of `hypergraph` are pairwise disjoint.
    pub fn is_disjoint(&self, hypergraph: &Hypergraph) -> bool {
        let mut seen = FnvHashSet::default();
        self.edges
            .iter()
            .flat_map(|&edge_idx| hypergraph.edges()[edge_idx].elements())
            .all(|&element| seen.insert(element))
    }
}

/// The size of a greedily built [`Packing`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PackingBound;

impl LowerBound for PackingBound {
    fn kind(&self) -> BoundKind {
        BoundKind::Packing
    }

    fn compute(
        &self,
        hypergraph: &Hypergraph,
        degrees: &DegreeIndex,
    ) -> Result<usize, BoundError> {
        if hypergraph.is_empty() {
            return Ok(0);
        }

        let packing = Packing::greedy(hypergraph, degrees)?;
        debug!(
            "Packed {} of {} edges",
            packing.len(),
            hypergraph.num_edges()
        );
        Ok(packing.len())
    }
}
