use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use apsp::logging::{self, LoggingError};
use apsp::{run_benchmark, ApspError, BenchConfig, BenchObserver, BenchmarkRecord, Graph, SizeConfig, Weight};
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tracing::{error, info};

/// Time all-pairs Dijkstra over random connected graphs of increasing size.
#[derive(Parser, Debug)]
#[command(name = "apsp-cli", version, about)]
struct Cli {
    /// Graph size as VERTICES:MIN_EDGES; repeat for several sizes.
    #[arg(long = "size", value_name = "N:MIN")]
    sizes: Vec<SizeConfig>,
    /// Timed all-pairs runs per graph.
    #[arg(long)]
    repetitions: Option<u32>,
    /// Seed for graph generation.
    #[arg(long)]
    seed: Option<u64>,
    /// JSON file holding a benchmark configuration; flags override it.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print each generated adjacency matrix.
    #[arg(long)]
    print_graph: bool,
    /// Emit one JSON row per run and per size instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read config {}: {source}", path.display())]
    ReadConfig { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config {}: {source}", path.display())]
    ParseConfig { path: PathBuf, source: serde_json::Error },
    #[error(transparent)]
    Benchmark(#[from] ApspError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

fn load_config(cli: &Cli) -> Result<BenchConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|source| CliError::ReadConfig { path: path.clone(), source })?;
            serde_json::from_str(&raw).map_err(|source| CliError::ParseConfig { path: path.clone(), source })?
        }
        None => BenchConfig::default(),
    };
    if !cli.sizes.is_empty() { config.sizes = cli.sizes.clone(); }
    if let Some(r) = cli.repetitions { config.repetitions = r; }
    if let Some(s) = cli.seed { config.seed = s; }
    Ok(config)
}

#[derive(Serialize)]
struct RunRow {
    #[serde(rename = "impl")] impl_: &'static str,
    kind: &'static str,
    n: usize,
    min_edges: usize,
    m: usize,
    seed: u64,
    repetition: u32,
    time_ns: u128,
    mem_bytes: usize,
}

#[derive(Serialize)]
struct SummaryRow {
    #[serde(rename = "impl")] impl_: &'static str,
    kind: &'static str,
    n: usize,
    min_edges: usize,
    m: usize,
    repetitions: usize,
    mean_ns: u128,
    min_ns: u128,
    max_ns: u128,
}

#[derive(Serialize)]
struct GraphRow<'a> {
    #[serde(rename = "impl")] impl_: &'static str,
    kind: &'static str,
    n: usize,
    min_edges: usize,
    m: usize,
    matrix: Vec<&'a [Weight]>,
}

impl<'a> GraphRow<'a> {
    fn new(size: &SizeConfig, graph: &'a Graph) -> Self {
        GraphRow {
            impl_: "rust-apsp",
            kind: "graph",
            n: size.vertex_count,
            min_edges: size.min_edges,
            m: graph.edge_count(),
            matrix: graph.rows().collect(),
        }
    }
}

/// Prints progress as the harness reports it.
struct Printer {
    json: bool,
    print_graph: bool,
    seed: u64,
    edges: usize,
    mem_bytes: usize,
}

impl Printer {
    fn emit<T: Serialize>(&self, row: &T) {
        match serde_json::to_string(row) {
            Ok(line) => println!("{}", line),
            Err(err) => error!(error = %err, "failed to serialise row"),
        }
    }
}

impl BenchObserver for Printer {
    fn on_graph(&mut self, size: &SizeConfig, graph: &Graph) {
        self.edges = graph.edge_count();
        self.mem_bytes = graph.memory_estimate_bytes();
        if !self.json {
            println!();
            println!(
                "Graph with {} vertices (minimum {} edges per vertex, {} edges total):",
                size.vertex_count, size.min_edges, self.edges
            );
        }
        if self.print_graph {
            if self.json {
                self.emit(&GraphRow::new(size, graph));
            } else {
                println!("Adjacency Matrix:");
                print!("{}", graph);
            }
        }
    }

    fn on_repetition(&mut self, size: &SizeConfig, repetition: u32, elapsed: Duration) {
        if self.json {
            self.emit(&RunRow {
                impl_: "rust-apsp",
                kind: "run",
                n: size.vertex_count,
                min_edges: size.min_edges,
                m: self.edges,
                seed: self.seed,
                repetition,
                time_ns: elapsed.as_nanos(),
                mem_bytes: self.mem_bytes,
            });
        } else {
            println!(
                "Test {} for {} vertices: {:.6} seconds",
                repetition + 1,
                size.vertex_count,
                elapsed.as_secs_f64()
            );
        }
    }

    fn on_record(&mut self, record: &BenchmarkRecord) {
        if self.json {
            self.emit(&SummaryRow {
                impl_: "rust-apsp",
                kind: "summary",
                n: record.vertex_count,
                min_edges: record.min_edges,
                m: record.edge_count,
                repetitions: record.times.len(),
                mean_ns: record.mean.as_nanos(),
                min_ns: record.min().unwrap_or_default().as_nanos(),
                max_ns: record.max().unwrap_or_default().as_nanos(),
            });
        } else {
            println!(
                "Average time for {} vertices: {:.6} seconds",
                record.vertex_count,
                record.mean_secs()
            );
        }
    }
}

fn try_main() -> Result<(), CliError> {
    logging::init_logging()?;
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    info!(sizes = config.sizes.len(), repetitions = config.repetitions, seed = config.seed, "starting benchmark");

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut printer = Printer { json: cli.json, print_graph: cli.print_graph, seed: config.seed, edges: 0, mem_bytes: 0 };
    let report = run_benchmark(&config, &mut rng, &mut printer)?;

    if !cli.json {
        println!();
        println!("{:>8}  {:>14}", "vertices", "mean seconds");
        for (n, secs) in report.series() {
            println!("{:>8}  {:>14.6}", n, secs);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Logging(err)) => {
            eprintln!("failed to initialise logging: {}", err);
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(error = %err, "benchmark failed");
            ExitCode::FAILURE
        }
    }
}
