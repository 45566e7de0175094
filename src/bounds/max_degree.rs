use super::BoundError;
use super::BoundKind;
use super::LowerBound;
use crate::instance::DegreeIndex;
use crate::instance::Hypergraph;

/// A pigeonhole bound: if no element is contained in more than `D` edges, then at least
/// `ceil(|edges| / D)` elements are needed to hit all edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxDegreeBound;

impl LowerBound for MaxDegreeBound {
    fn kind(&self) -> BoundKind {
        BoundKind::MaxDegree
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

        let max_degree = degrees.max_degree()?;
        Ok(num_edges.div_ceil(max_degree))
    }
}
