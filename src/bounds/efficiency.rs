use super::BoundError;
use super::BoundKind;
use super::LowerBound;
use crate::instance::DegreeIndex;
use crate::instance::Hypergraph;

/// If the computed bound is less than this above an integer, it is rounded down instead of up to
/// avoid wrong bounds due to floating point inaccuracies.
const ROUNDING_EPSILON: f64 = 1e-9;

/// Distributes the cost of hitting each edge over its elements.
///
/// Every edge `e` contributes `1 / d(e)` where `d(e)` is the largest degree among its elements.
/// An element `v` of a hitting set is only part of edges with `d(e) >= deg(v)`, so all edges
/// containing it contribute at most `deg(v) / deg(v) = 1` in total; the sum over all edges is
/// therefore at most the size of any hitting set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EfficiencyBound;

impl EfficiencyBound {
    /// The unrounded bound.
    pub fn fractional(
        &self,
        hypergraph: &Hypergraph,
        degrees: &DegreeIndex,
    ) -> Result<f64, BoundError> {
        let mut bound = 0.0;
        for edge in hypergraph.edges() {
            let mut max_degree = 0;
            for &element in edge.elements() {
                max_degree = max_degree.max(degrees.degree(element)?);
            }
            bound += (max_degree as f64).recip();
        }
        Ok(bound)
    }
}

fn round(bound: f64) -> usize {
    let rounded = if bound < bound.floor() + ROUNDING_EPSILON {
        bound.floor()
    } else {
        bound.ceil()
    };
    rounded as usize
}

impl LowerBound for EfficiencyBound {
    fn kind(&self) -> BoundKind {
        BoundKind::Efficiency
    }

    fn compute(
        &self,
        hypergraph: &Hypergraph,
        degrees: &DegreeIndex,
    ) -> Result<usize, BoundError> {
        if hypergraph.is_empty() {
            return Ok(0);
        }
        Ok(round(self.fractional(hypergraph, degrees)?))
    }
}
