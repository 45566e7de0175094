use super::elements_needed;
use super::BoundError;
use super::BoundKind;
use super::LowerBound;
use super::Packing;
use crate::hs_assert_simple;
use crate::instance::DegreeIndex;
use crate::instance::Hypergraph;

/// Combines the [`PackingBound`](super::PackingBound) with the
/// [`SumDegreeBound`](super::SumDegreeBound).
///
/// Each packed edge needs its own element, which covers at most as many edges as the element of
/// largest degree in that packed edge. After charging those, the remaining edges have to be
/// covered by further elements; their degrees are reduced by the packed edge they are part of,
/// and the largest-degree element of each packed edge is not counted again. The bound is the
/// packing size plus the number of further elements needed according to the sum-degree argument.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumOverPackingBound;

impl SumOverPackingBound {
    /// Computes the bound on top of an existing packing of `hypergraph`.
    ///
    /// Panics if `packing` is not a set of pairwise disjoint edges of `hypergraph`.
    pub fn with_packing(
        &self,
        hypergraph: &Hypergraph,
        degrees: &DegreeIndex,
        packing: &Packing,
    ) -> Result<usize, BoundError> {
        hs_assert_simple!(
            packing
                .edges()
                .iter()
                .all(|&edge_idx| edge_idx < hypergraph.num_edges()),
            "The packing should consist of edges of this hypergraph"
        );
        hs_assert_simple!(
            packing.is_disjoint(hypergraph),
            "The packed edges should be pairwise disjoint in this hypergraph"
        );

        let mut adjusted_degrees = degrees.degrees().to_vec();
        let mut covered_edges = 0;

        for &edge_idx in packing.edges() {
            let edge = &hypergraph.edges()[edge_idx];

            let mut max_degree_position = None;
            let mut max_degree = 0;
            for &element in edge.elements() {
                let position = degrees.position(element)?;
                adjusted_degrees[position] -= 1;

                let degree = degrees.degrees()[position];
                if max_degree_position.is_none() || degree > max_degree {
                    max_degree_position = Some(position);
                    max_degree = degree;
                }
            }

            covered_edges += max_degree;
            if let Some(position) = max_degree_position {
                adjusted_degrees[position] = 0;
            }
        }

        adjusted_degrees.sort_unstable();
        let additional = elements_needed(
            adjusted_degrees.into_iter().rev(),
            covered_edges,
            hypergraph.num_edges(),
        );

        Ok(packing.len() + additional)
    }
}

impl LowerBound for SumOverPackingBound {
    fn kind(&self) -> BoundKind {
        BoundKind::SumOverPacking
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
        self.with_packing(hypergraph, degrees, &packing)
    }
}
