use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use enumset::EnumSet;
use hs_bounds::instance::DegreeIndex;
use hs_bounds::instance::Hypergraph;
use hs_bounds::instance::InstanceParser;
use hs_bounds::instance::DEFAULT_VARIABLE_MARKER;
use hs_bounds::options::BoundSettings;
use hs_bounds::options::ReportOptions;
use hs_bounds::report::DirectorySource;
use hs_bounds::report::OutputFormat;
use hs_bounds::BoundKind;
use hs_bounds::ReportBuilder;
use log::info;

#[derive(Debug, Parser)]
#[command(name = "hs-bounds", version, about = "Lower bounds for minimum hitting set instances")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare the bounds of a batch of instances against their optima
    Report(ReportArgs),
    /// Compute the bounds of a single instance file
    Bounds(BoundsArgs),
}

#[derive(Debug, clap::Args)]
struct ReportArgs {
    /// The directory containing the `<name>.lp` instance files
    #[arg(long)]
    instances: PathBuf,

    /// The directory containing the `<name>.sol` optimum files
    #[arg(long)]
    optima: PathBuf,

    /// The instances to process. If none are given, every instance with an optimum file is
    /// processed, sorted by name.
    names: Vec<String>,

    /// The maximum number of instances to process
    #[arg(long, default_value_t = 10, conflicts_with = "all")]
    limit: usize,

    /// Process every instance rather than stopping at the limit
    #[arg(long)]
    all: bool,

    /// Additional bounds to compute; the max-degree, sum-degree and packing bounds are always
    /// computed
    #[arg(long, value_enum, value_delimiter = ',')]
    bounds: Vec<BoundKind>,

    /// A JSON settings file enabling additional bounds
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Write the report to this file instead of the standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// The prefix of element variables in the instance files
    #[arg(long, default_value_t = DEFAULT_VARIABLE_MARKER)]
    marker: char,
}

#[derive(Debug, clap::Args)]
struct BoundsArgs {
    /// The instance file
    file: PathBuf,

    /// Additional bounds to compute
    #[arg(long, value_enum, value_delimiter = ',')]
    bounds: Vec<BoundKind>,

    /// The prefix of element variables in the instance file
    #[arg(long, default_value_t = DEFAULT_VARIABLE_MARKER)]
    marker: char,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("HS_BOUNDS_LOG", "info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Report(args) => report(args),
        Command::Bounds(args) => bounds(args),
    }
}

fn report(args: ReportArgs) -> anyhow::Result<()> {
    let mut bounds: EnumSet<BoundKind> = args.bounds.iter().copied().collect();
    if let Some(path) = &args.settings {
        let file = File::open(path)
            .with_context(|| format!("Failed to open settings file {}", path.display()))?;
        let settings = BoundSettings::from_json(BufReader::new(file))
            .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
        bounds |= settings.bounds();
    }

    let options = ReportOptions {
        limit: (!args.all).then_some(args.limit),
        bounds,
        parser: InstanceParser::with_marker(args.marker),
    };

    let source = DirectorySource::new(&args.instances, &args.optima);
    let names = if args.names.is_empty() {
        source.discover().with_context(|| {
            format!("Failed to list optimum files in {}", args.optima.display())
        })?
    } else {
        args.names
    };
    info!("Found {} instances", names.len());

    let report = ReportBuilder::new(source, options).build(&names)?;
    info!("Computed bounds for {} instances", report.len());

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            report.write(args.format, &mut writer)?;
            writer.flush()?;
        }
        None => report.write(args.format, io::stdout().lock())?,
    }

    Ok(())
}

fn bounds(args: BoundsArgs) -> anyhow::Result<()> {
    let parser = InstanceParser::with_marker(args.marker);
    let loaded = Hypergraph::load(&args.file, &parser)
        .with_context(|| format!("Failed to load instance {}", args.file.display()))?;
    let hypergraph = loaded.hypergraph;
    let degrees = DegreeIndex::build(&hypergraph);

    let kinds = args
        .bounds
        .iter()
        .copied()
        .collect::<EnumSet<BoundKind>>()
        | BoundKind::mandatory();

    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "{} elements, {} edges",
        degrees.num_elements(),
        hypergraph.num_edges()
    )?;
    for kind in kinds {
        let bound = kind
            .compute(&hypergraph, &degrees)
            .with_context(|| format!("Failed to compute the {kind} bound"))?;
        writeln!(stdout, "{kind}: {bound}")?;
    }

    Ok(())
}
