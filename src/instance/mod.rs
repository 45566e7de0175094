//! Contains the representation of a hitting set instance as a hypergraph.
//!
//! A [`Hypergraph`] is a sequence of [`Edge`]s, each of which is a set of [`ElementId`]s. The
//! element universe is exactly the union of all edges. Once loaded a [`Hypergraph`] is never
//! mutated; derived views such as the [`DegreeIndex`] are computed from it.
mod degree_index;
mod parser;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

pub use degree_index::DegreeIndex;
use fnv::FnvHashSet;
use log::info;
use log::warn;
pub use parser::InstanceParser;
pub use parser::DEFAULT_VARIABLE_MARKER;
pub use parser::MalformedInstanceLine;
pub use parser::ParsedLine;
use thiserror::Error;

/// The identifier of an element (a variable in the instance file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    pub fn new(id: u32) -> Self {
        ElementId(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        ElementId(id)
    }
}

impl Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hyperedge; at least one of its elements has to be part of any hitting set.
///
/// The elements are stored sorted and without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    elements: Box<[ElementId]>,
}

impl Edge {
    /// Creates a new edge from the provided elements. Returns [`None`] if no elements are
    /// provided, since an empty edge cannot be hit.
    pub fn new(elements: impl IntoIterator<Item = ElementId>) -> Option<Self> {
        let mut elements: Vec<ElementId> = elements.into_iter().collect();
        if elements.is_empty() {
            return None;
        }
        elements.sort_unstable();
        elements.dedup();

        Some(Edge {
            elements: elements.into_boxed_slice(),
        })
    }

    /// The elements of this edge, sorted by increasing identifier.
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`; edges are guaranteed to be non-empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.binary_search(&element).is_ok()
    }
}

/// Errors which can occur while loading a [`Hypergraph`].
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),
    #[error("instance `{0}` does not exist")]
    NotFound(String),
}

/// The result of loading a [`Hypergraph`] from an instance file.
#[derive(Debug)]
pub struct LoadedInstance {
    pub hypergraph: Hypergraph,
    /// The element tokens which were skipped while parsing.
    pub malformed: Vec<MalformedInstanceLine>,
}

/// An immutable hitting set instance.
#[derive(Debug, Clone, Default)]
pub struct Hypergraph {
    edges: Vec<Edge>,
}

impl Hypergraph {
    /// Creates a hypergraph from the provided edges, preserving their order.
    pub fn new(edges: Vec<Edge>) -> Self {
        Hypergraph { edges }
    }

    /// Creates a hypergraph from lists of element identifiers. Empty lists are dropped.
    ///
    /// # Example
    /// ```rust
    /// # use hs_bounds::instance::Hypergraph;
    /// let hypergraph = Hypergraph::from_edges([vec![1], vec![1], vec![2]]);
    /// assert_eq!(hypergraph.num_edges(), 3);
    /// assert_eq!(hypergraph.num_elements(), 2);
    /// ```
    pub fn from_edges<E, I>(edges: E) -> Self
    where
        E: IntoIterator<Item = I>,
        I: IntoIterator<Item = u32>,
    {
        Hypergraph {
            edges: edges
                .into_iter()
                .filter_map(|edge| Edge::new(edge.into_iter().map(ElementId::from)))
                .collect(),
        }
    }

    /// Reads a hypergraph from the lines provided by `reader`; see [`InstanceParser`] for which
    /// lines are turned into edges.
    pub fn parse(
        reader: impl BufRead,
        parser: &InstanceParser,
    ) -> Result<LoadedInstance, InstanceError> {
        let time_before = Instant::now();

        let mut edges = Vec::new();
        let mut malformed = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if let ParsedLine::Edge(edge) = parser.parse_line(index + 1, &line, &mut malformed) {
                edges.push(edge);
            }
        }

        for diagnostic in &malformed {
            warn!("{diagnostic}");
        }

        let hypergraph = Hypergraph { edges };
        info!(
            "Loaded instance with {} elements, {} edges in {:.2?}",
            hypergraph.num_elements(),
            hypergraph.num_edges(),
            time_before.elapsed(),
        );

        Ok(LoadedInstance {
            hypergraph,
            malformed,
        })
    }

    /// Opens and parses the instance file at `path`.
    pub fn load(
        path: impl AsRef<Path>,
        parser: &InstanceParser,
    ) -> Result<LoadedInstance, InstanceError> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file), parser)
    }

    /// The edges in the order in which they were read.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The set of all elements which are part of some edge.
    pub fn elements(&self) -> FnvHashSet<ElementId> {
        self.edges
            .iter()
            .flat_map(|edge| edge.elements().iter().copied())
            .collect()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_elements(&self) -> usize {
        self.elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The number of edge-element incidences, i.e. the sum of all edge sizes.
    pub fn num_incidences(&self) -> usize {
        self.edges.iter().map(Edge::len).sum()
    }
}
