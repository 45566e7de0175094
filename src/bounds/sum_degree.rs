use super::elements_needed;
use super::BoundError;
use super::BoundKind;
use super::LowerBound;
use crate::instance::DegreeIndex;
use crate::instance::Hypergraph;

/// Sums the largest degrees until they reach the number of edges.
///
/// If `m` elements hit all edges then their degrees sum up to at least `|edges|`; the bound is the
/// smallest `m` for which the `m` largest degrees do so. Overlap between the edges of the chosen
/// elements is not taken into account, which keeps the bound sound but makes it coarse. It is
/// never weaker than the [`MaxDegreeBound`](super::MaxDegreeBound).
#[derive(Debug, Clone, Copy, Default)]
pub struct SumDegreeBound;

impl LowerBound for SumDegreeBound {
    fn kind(&self) -> BoundKind {
        BoundKind::SumDegree
    }

    fn compute(
        &self,
        hypergraph: &Hypergraph,
        degrees: &DegreeIndex,
    ) -> Result<usize, BoundError> {
        let num_edges = hypergraph.num_edges();
        if num_edges == 0 {
            return Ok(0);
        }

        let mut sorted = degrees.degrees().to_vec();
        sorted.sort_unstable();

        Ok(elements_needed(sorted.into_iter().rev(), 0, num_edges))
    }
}
