//! Lower bounds on the size of a minimum hitting set.
//!
//! Every bound implements [`LowerBound`] and is computed from a [`Hypergraph`] together with its
//! [`DegreeIndex`]. The bounds are independent of each other; none of them is guaranteed to be
//! tight, but each is guaranteed to never exceed the size of a minimum hitting set.
//!
//! All bounds are 0 on a hypergraph without edges. Bounds never divide by or take the maximum of
//! an empty degree set; such a hypergraph is handled before the degrees are inspected.
mod efficiency;
mod local_search;
mod max_degree;
mod packing;
mod sum_degree;
mod sum_over_packing;

use std::fmt::Display;

use clap::ValueEnum;
pub use efficiency::EfficiencyBound;
use enumset::EnumSet;
use enumset::EnumSetType;
pub use local_search::LocalSearchPackingBound;
pub use max_degree::MaxDegreeBound;
pub use packing::Packing;
pub use packing::PackingBound;
pub use sum_degree::SumDegreeBound;
pub use sum_over_packing::SumOverPackingBound;
use thiserror::Error;

use crate::instance::DegreeIndex;
use crate::instance::ElementId;
use crate::instance::Hypergraph;

/// Errors which can occur when computing a bound.
///
/// Neither of these is caused by bad input during normal use: [`BoundError::UnknownElement`]
/// means an index was queried for an element outside of its hypergraph, and
/// [`BoundError::EmptyHypergraph`] means a maximum was requested over an empty set of degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoundError {
    #[error("element {0} does not occur in any edge")]
    UnknownElement(ElementId),
    #[error("the hypergraph does not contain any edges")]
    EmptyHypergraph,
}

/// The kinds of bounds which can be computed.
#[derive(Debug, EnumSetType, ValueEnum)]
pub enum BoundKind {
    MaxDegree,
    SumDegree,
    Packing,
    Efficiency,
    SumOverPacking,
    LocalSearchPacking,
}

impl BoundKind {
    /// The bounds which are part of every report.
    pub fn mandatory() -> EnumSet<BoundKind> {
        BoundKind::MaxDegree | BoundKind::SumDegree | BoundKind::Packing
    }

    /// Computes the bound of this kind.
    pub fn compute(
        self,
        hypergraph: &Hypergraph,
        degrees: &DegreeIndex,
    ) -> Result<usize, BoundError> {
        match self {
            BoundKind::MaxDegree => MaxDegreeBound.compute(hypergraph, degrees),
            BoundKind::SumDegree => SumDegreeBound.compute(hypergraph, degrees),
            BoundKind::Packing => PackingBound.compute(hypergraph, degrees),
            BoundKind::Efficiency => EfficiencyBound.compute(hypergraph, degrees),
            BoundKind::SumOverPacking => SumOverPackingBound.compute(hypergraph, degrees),
            BoundKind::LocalSearchPacking => LocalSearchPackingBound.compute(hypergraph, degrees),
        }
    }
}

impl Display for BoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BoundKind::MaxDegree => "max-degree",
            BoundKind::SumDegree => "sum-degree",
            BoundKind::Packing => "packing",
            BoundKind::Efficiency => "efficiency",
            BoundKind::SumOverPacking => "sum-over-packing",
            BoundKind::LocalSearchPacking => "local-search-packing",
        };
        write!(f, "{name}")
    }
}

/// A lower bound on the size of a minimum hitting set.
///
/// Implementations are deterministic; computing a bound twice on the same hypergraph yields the
/// same value.
pub trait LowerBound {
    /// Which bound this is.
    fn kind(&self) -> BoundKind;

    /// Computes the bound for `hypergraph`, where `degrees` is the [`DegreeIndex`] built from that
    /// same hypergraph.
    fn compute(&self, hypergraph: &Hypergraph, degrees: &DegreeIndex)
        -> Result<usize, BoundError>;
}

/// The number of largest values of `degrees_descending` which have to be summed (on top of
/// `covered`) before the sum reaches `num_edges`.
pub(crate) fn elements_needed(
    degrees_descending: impl IntoIterator<Item = usize>,
    mut covered: usize,
    num_edges: usize,
) -> usize {
    degrees_descending
        .into_iter()
        .take_while(|&degree| {
            if covered < num_edges {
                covered += degree;
                true
            } else {
                false
            }
        })
        .count()
}
