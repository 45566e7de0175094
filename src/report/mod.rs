//! Builds reports comparing the lower bounds of a batch of instances against their optima.
//!
//! The [`ReportBuilder`] processes instances one at a time: it loads the hypergraph and the
//! externally computed optimum, computes the enabled bounds and produces one [`BoundRecord`] per
//! instance. Nothing is shared between instances, so separate builders (or separate batches on
//! the same builder) cannot influence each other.
mod output;
mod source;

use std::time::Instant;

use enumset::EnumSet;
use log::debug;
use log::info;
use log::warn;
pub use output::OutputFormat;
use serde::Serialize;
pub use source::read_optimum;
pub use source::DirectorySource;
pub use source::InMemorySource;
pub use source::InstanceSource;
pub use source::OptimumError;
use thiserror::Error;

use crate::bounds::BoundError;
use crate::bounds::BoundKind;
use crate::instance::DegreeIndex;
use crate::instance::InstanceError;
use crate::options::ReportOptions;

/// Errors which abort the construction of a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("missing optimum for instance `{instance}`")]
    MissingOptimum {
        instance: String,
        #[source]
        source: OptimumError,
    },
    #[error("failed to load instance `{instance}`")]
    Instance {
        instance: String,
        #[source]
        source: InstanceError,
    },
    #[error("failed to compute the {kind} bound of instance `{instance}`")]
    Bound {
        instance: String,
        kind: BoundKind,
        #[source]
        source: BoundError,
    },
}

/// The bounds of a single instance together with its optimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundRecord {
    pub name: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub optimum: usize,
    pub max_degree_bound: usize,
    pub sum_degree_bound: usize,
    pub packing_bound: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_bound: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_over_packing_bound: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_search_packing_bound: Option<usize>,
}

impl BoundRecord {
    /// The value of the bound of the provided kind, if it was computed.
    pub fn bound(&self, kind: BoundKind) -> Option<usize> {
        match kind {
            BoundKind::MaxDegree => Some(self.max_degree_bound),
            BoundKind::SumDegree => Some(self.sum_degree_bound),
            BoundKind::Packing => Some(self.packing_bound),
            BoundKind::Efficiency => self.efficiency_bound,
            BoundKind::SumOverPacking => self.sum_over_packing_bound,
            BoundKind::LocalSearchPacking => self.local_search_packing_bound,
        }
    }

    /// The bounds which are larger than the optimum. This is empty unless the supplied optimum is
    /// wrong or does not belong to this instance.
    pub fn exceeding_optimum(&self) -> EnumSet<BoundKind> {
        EnumSet::all()
            .iter()
            .filter(|&kind| self.bound(kind).is_some_and(|bound| bound > self.optimum))
            .collect()
    }
}

/// The records of a batch of instances, in the order in which the instances were processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundReport {
    pub records: Vec<BoundRecord>,
    /// The bounds computed for every record.
    pub bounds: EnumSet<BoundKind>,
}

impl BoundReport {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Computes the bounds of batches of instances provided by an [`InstanceSource`].
#[derive(Debug, Clone)]
pub struct ReportBuilder<Source> {
    source: Source,
    options: ReportOptions,
}

impl<Source: InstanceSource> ReportBuilder<Source> {
    pub fn new(source: Source, options: ReportOptions) -> Self {
        ReportBuilder { source, options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Processes the instances called `names`, in order, up to the configured limit.
    ///
    /// The first instance whose optimum cannot be read aborts the whole batch with
    /// [`ReportError::MissingOptimum`]; no partial report is returned.
    pub fn build<Name: AsRef<str>>(
        &self,
        names: impl IntoIterator<Item = Name>,
    ) -> Result<BoundReport, ReportError> {
        let limit = self.options.limit.unwrap_or(usize::MAX);

        let records = names
            .into_iter()
            .take(limit)
            .map(|name| self.process(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BoundReport {
            records,
            bounds: self.options.enabled_bounds(),
        })
    }

    /// Computes the record of the single instance called `name`.
    pub fn process(&self, name: &str) -> Result<BoundRecord, ReportError> {
        let time_before = Instant::now();

        let loaded = self
            .source
            .load_instance(name, &self.options.parser)
            .map_err(|source| ReportError::Instance {
                instance: name.to_owned(),
                source,
            })?;
        let optimum = self
            .source
            .load_optimum(name)
            .map_err(|source| ReportError::MissingOptimum {
                instance: name.to_owned(),
                source,
            })?;

        let hypergraph = loaded.hypergraph;
        let degrees = DegreeIndex::build(&hypergraph);

        let compute = |kind: BoundKind| -> Result<usize, ReportError> {
            let time_before = Instant::now();
            let bound = kind
                .compute(&hypergraph, &degrees)
                .map_err(|source| ReportError::Bound {
                    instance: name.to_owned(),
                    kind,
                    source,
                })?;
            debug!(
                "{name}: {kind} bound {bound} ({:.2?})",
                time_before.elapsed()
            );
            Ok(bound)
        };
        let compute_if_enabled = |kind: BoundKind| -> Result<Option<usize>, ReportError> {
            if self.options.enabled_bounds().contains(kind) {
                compute(kind).map(Some)
            } else {
                Ok(None)
            }
        };

        let record = BoundRecord {
            name: name.to_owned(),
            node_count: degrees.num_elements(),
            edge_count: hypergraph.num_edges(),
            optimum,
            max_degree_bound: compute(BoundKind::MaxDegree)?,
            sum_degree_bound: compute(BoundKind::SumDegree)?,
            packing_bound: compute(BoundKind::Packing)?,
            efficiency_bound: compute_if_enabled(BoundKind::Efficiency)?,
            sum_over_packing_bound: compute_if_enabled(BoundKind::SumOverPacking)?,
            local_search_packing_bound: compute_if_enabled(BoundKind::LocalSearchPacking)?,
        };

        info!(
            "{name}: {} elements, {} edges, optimum {}, max-degree {}, sum-degree {}, packing {} ({:.2?})",
            record.node_count,
            record.edge_count,
            record.optimum,
            record.max_degree_bound,
            record.sum_degree_bound,
            record.packing_bound,
            time_before.elapsed(),
        );
        for kind in record.exceeding_optimum() {
            warn!(
                "{name}: the {kind} bound {} exceeds the reported optimum {}",
                record.bound(kind).unwrap_or_default(),
                record.optimum,
            );
        }

        Ok(record)
    }
}
