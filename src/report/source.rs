use std::fs;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use fnv::FnvHashMap;
use thiserror::Error;

use crate::instance::Hypergraph;
use crate::instance::InstanceError;
use crate::instance::InstanceParser;
use crate::instance::LoadedInstance;

/// The reason why the optimum of an instance could not be read.
#[derive(Debug, Error)]
pub enum OptimumError {
    #[error("failed to read optimum: {0}")]
    Io(#[from] std::io::Error),
    #[error("the optimum file is empty")]
    Empty,
    #[error("`{0}` is not a valid optimum")]
    NotAnInteger(String),
}

/// Reads an optimum, which is the last whitespace-separated token on the first line.
pub fn read_optimum(mut reader: impl BufRead) -> Result<usize, OptimumError> {
    let mut line = String::new();
    let _ = reader.read_line(&mut line)?;

    let token = line
        .split_ascii_whitespace()
        .last()
        .ok_or(OptimumError::Empty)?;
    token
        .parse()
        .map_err(|_| OptimumError::NotAnInteger(token.to_owned()))
}

/// Provides the instances and their optima to a [`ReportBuilder`](super::ReportBuilder).
pub trait InstanceSource {
    /// Loads the hypergraph of the instance called `name`.
    fn load_instance(
        &self,
        name: &str,
        parser: &InstanceParser,
    ) -> Result<LoadedInstance, InstanceError>;

    /// Loads the externally computed optimum of the instance called `name`.
    fn load_optimum(&self, name: &str) -> Result<usize, OptimumError>;
}

/// Instances and optima stored as files in two directories.
///
/// The instance `name` is read from `<instance_dir>/<name>.lp` and its optimum from
/// `<optimum_dir>/<name>.sol`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    instance_dir: PathBuf,
    optimum_dir: PathBuf,
}

impl DirectorySource {
    pub const INSTANCE_EXTENSION: &'static str = "lp";
    pub const OPTIMUM_EXTENSION: &'static str = "sol";

    pub fn new(instance_dir: impl Into<PathBuf>, optimum_dir: impl Into<PathBuf>) -> Self {
        DirectorySource {
            instance_dir: instance_dir.into(),
            optimum_dir: optimum_dir.into(),
        }
    }

    pub fn instance_path(&self, name: &str) -> PathBuf {
        self.instance_dir
            .join(format!("{name}.{}", Self::INSTANCE_EXTENSION))
    }

    pub fn optimum_path(&self, name: &str) -> PathBuf {
        self.optimum_dir
            .join(format!("{name}.{}", Self::OPTIMUM_EXTENSION))
    }

    /// The names of all instances for which an optimum is available, sorted by name.
    pub fn discover(&self) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.optimum_dir)? {
            let path = entry?.path();
            if !path.is_file() || !has_extension(&path, Self::OPTIMUM_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort_unstable();
        Ok(names)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|found| found == extension)
}

impl InstanceSource for DirectorySource {
    fn load_instance(
        &self,
        name: &str,
        parser: &InstanceParser,
    ) -> Result<LoadedInstance, InstanceError> {
        Hypergraph::load(self.instance_path(name), parser)
    }

    fn load_optimum(&self, name: &str) -> Result<usize, OptimumError> {
        let file = File::open(self.optimum_path(name))?;
        read_optimum(BufReader::new(file))
    }
}

/// Instances and optima kept in memory, in the same text formats as their files.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    instances: FnvHashMap<String, String>,
    optima: FnvHashMap<String, String>,
}

impl InMemorySource {
    pub fn with_instance(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        let _ = self.instances.insert(name.into(), contents.into());
        self
    }

    pub fn with_optimum(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        let _ = self.optima.insert(name.into(), contents.into());
        self
    }
}

impl InstanceSource for InMemorySource {
    fn load_instance(
        &self,
        name: &str,
        parser: &InstanceParser,
    ) -> Result<LoadedInstance, InstanceError> {
        let contents = self
            .instances
            .get(name)
            .ok_or_else(|| InstanceError::NotFound(name.to_owned()))?;
        Hypergraph::parse(contents.as_bytes(), parser)
    }

    fn load_optimum(&self, name: &str) -> Result<usize, OptimumError> {
        let contents = self.optima.get(name).ok_or_else(|| {
            OptimumError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no optimum for `{name}`"),
            ))
        })?;
        read_optimum(contents.as_bytes())
    }
}
