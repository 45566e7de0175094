//! # hs-bounds
//! Cheap, sound lower bounds for the minimum hitting set problem.
//!
//! An instance is a [`Hypergraph`](instance::Hypergraph): a list of edges, each of which is a set
//! of elements. A hitting set picks elements such that every edge contains at least one picked
//! element. Computing a minimum hitting set is NP-hard; this crate only computes lower bounds on
//! its size, which are then compared against the optimum reported by an exact solver.
//!
//! The bounds are exposed through the [`LowerBound`](bounds::LowerBound) trait:
//! - [`MaxDegreeBound`](bounds::MaxDegreeBound)
//! - [`SumDegreeBound`](bounds::SumDegreeBound)
//! - [`PackingBound`](bounds::PackingBound)
//! - [`EfficiencyBound`](bounds::EfficiencyBound)
//! - [`SumOverPackingBound`](bounds::SumOverPackingBound)
//! - [`LocalSearchPackingBound`](bounds::LocalSearchPackingBound)
//!
//! ```rust
//! # use hs_bounds::instance::Hypergraph;
//! # use hs_bounds::instance::DegreeIndex;
//! # use hs_bounds::bounds::LowerBound;
//! # use hs_bounds::bounds::MaxDegreeBound;
//! let hypergraph = Hypergraph::from_edges([vec![1, 2], vec![2, 3], vec![3, 4]]);
//! let degrees = DegreeIndex::build(&hypergraph);
//!
//! let bound = MaxDegreeBound.compute(&hypergraph, &degrees).unwrap();
//! assert_eq!(bound, 2);
//! ```
//!
//! Batches of instances are processed by the [`ReportBuilder`](report::ReportBuilder), which pairs
//! every instance with its externally supplied optimum.
pub(crate) mod asserts;
pub mod bounds;
pub mod instance;
pub mod options;
pub mod report;

#[cfg(test)]
mod tests;

pub use bounds::BoundError;
pub use bounds::BoundKind;
pub use instance::Hypergraph;
pub use report::ReportBuilder;
pub use report::ReportError;
