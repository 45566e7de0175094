//! Options which control how reports are built.
use std::io::Read;

use enumset::EnumSet;
use serde::Deserialize;
use serde::Serialize;

use crate::bounds::BoundKind;
use crate::instance::InstanceParser;

/// Options for the [`ReportBuilder`](crate::report::ReportBuilder).
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// The maximum number of instances processed per batch; [`None`] processes all of them.
    pub limit: Option<usize>,
    /// The bounds which are computed. The bounds in [`BoundKind::mandatory`] are always computed,
    /// regardless of whether they are part of this set.
    pub bounds: EnumSet<BoundKind>,
    /// Determines which lines of an instance file become edges.
    pub parser: InstanceParser,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            limit: None,
            bounds: BoundKind::mandatory(),
            parser: InstanceParser::default(),
        }
    }
}

impl ReportOptions {
    /// The bounds which end up in a report.
    pub fn enabled_bounds(&self) -> EnumSet<BoundKind> {
        self.bounds | BoundKind::mandatory()
    }
}

/// Settings file enabling the optional bounds, stored as JSON.
///
/// Unknown fields are ignored, so settings files written for the exact solver (which contain
/// e.g. `packing_from_scratch_limit` or `greedy_mode`) can be passed as-is; only the flags for
/// the optional bounds are taken from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundSettings {
    /// Enable the efficiency bound
    pub enable_efficiency_bound: bool,

    /// Enable the sum-over-packing bound
    pub enable_sum_over_packing_bound: bool,

    /// Enable improving the greedy packing by 2-opt swaps, reported as a separate bound
    pub enable_local_search: bool,
}

impl BoundSettings {
    pub fn from_json(reader: impl Read) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    /// The bounds enabled by these settings, including the mandatory ones.
    pub fn bounds(&self) -> EnumSet<BoundKind> {
        let mut bounds = BoundKind::mandatory();
        if self.enable_efficiency_bound {
            let _ = bounds.insert(BoundKind::Efficiency);
        }
        if self.enable_sum_over_packing_bound {
            let _ = bounds.insert(BoundKind::SumOverPacking);
        }
        if self.enable_local_search {
            let _ = bounds.insert(BoundKind::LocalSearchPacking);
        }
        bounds
    }
}
