//! Timing harness: one generated graph per configured size, timed all-pairs
//! runs over it, and the aggregated statistics.
//!
//! Results are collected into a [`BenchmarkReport`] that the caller hands to
//! whatever renders them. Live progress is exposed through [`BenchObserver`].
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::dijkstra::all_pairs;
use crate::error::{ApspError, Result};
use crate::generate::generate;
use crate::graph::Graph;

/// One graph size to benchmark.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeConfig {
    pub vertex_count: usize,
    pub min_edges: usize,
}

impl SizeConfig {
    pub fn new(vertex_count: usize, min_edges: usize) -> Self { Self { vertex_count, min_edges } }
}

impl fmt::Display for SizeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vertex_count, self.min_edges)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected VERTICES:MIN_EDGES, got `{0}`")]
pub struct ParseSizeError(String);

impl FromStr for SizeConfig {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bad = || ParseSizeError(s.to_owned());
        let (n, m) = s.split_once(':').ok_or_else(bad)?;
        let vertex_count = n.trim().parse().map_err(|_| bad())?;
        let min_edges = m.trim().parse().map_err(|_| bad())?;
        Ok(Self { vertex_count, min_edges })
    }
}

/// Sizes, repetition count and seed for a benchmark run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub sizes: Vec<SizeConfig>,
    pub repetitions: u32,
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![
                SizeConfig::new(10, 3),
                SizeConfig::new(20, 4),
                SizeConfig::new(50, 10),
                SizeConfig::new(100, 20),
            ],
            repetitions: 5,
            seed: 42,
        }
    }
}

impl BenchConfig {
    /// Rejects configurations that could not produce a single timing.
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(ApspError::EmptySizes);
        }
        if self.repetitions == 0 {
            return Err(ApspError::ZeroRepetitions);
        }
        if let Some(bad) = self.sizes.iter().find(|s| s.vertex_count == 0) {
            return Err(ApspError::InvalidSize { num_vertices: bad.vertex_count });
        }
        Ok(())
    }
}

/// Timings for one configured size.
#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkRecord {
    pub vertex_count: usize,
    pub min_edges: usize,
    pub edge_count: usize,
    pub times: Vec<Duration>,
    pub mean: Duration,
}

impl BenchmarkRecord {
    fn from_times(size: SizeConfig, edge_count: usize, times: Vec<Duration>) -> Self {
        let mean = mean_of(&times);
        Self { vertex_count: size.vertex_count, min_edges: size.min_edges, edge_count, times, mean }
    }

    pub fn mean_secs(&self) -> f64 { self.mean.as_secs_f64() }
    pub fn min(&self) -> Option<Duration> { self.times.iter().min().copied() }
    pub fn max(&self) -> Option<Duration> { self.times.iter().max().copied() }
}

fn mean_of(times: &[Duration]) -> Duration {
    if times.is_empty() {
        return Duration::ZERO;
    }
    let total: u128 = times.iter().map(Duration::as_nanos).sum();
    Duration::from_nanos(saturating_nanos(total / times.len() as u128))
}

fn saturating_nanos(nanos: u128) -> u64 {
    u64::try_from(nanos).unwrap_or(u64::MAX)
}

/// Records in configuration order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BenchmarkReport {
    pub records: Vec<BenchmarkRecord>,
}

impl BenchmarkReport {
    /// `(vertex_count, mean seconds)` per record, ready for plotting.
    pub fn series(&self) -> Vec<(usize, f64)> {
        self.records.iter().map(|r| (r.vertex_count, r.mean_secs())).collect()
    }
}

/// Receives progress while the harness runs. All hooks default to no-ops.
pub trait BenchObserver {
    fn on_graph(&mut self, _size: &SizeConfig, _graph: &Graph) {}
    fn on_repetition(&mut self, _size: &SizeConfig, _repetition: u32, _elapsed: Duration) {}
    fn on_record(&mut self, _record: &BenchmarkRecord) {}
}

/// Observer that ignores everything.
pub struct Silent;
impl BenchObserver for Silent {}

/// Runs every configured size in order. Each size gets exactly one graph,
/// timed `config.repetitions` times; computed distances are discarded.
pub fn run_benchmark<R, O>(config: &BenchConfig, rng: &mut R, observer: &mut O) -> Result<BenchmarkReport>
where
    R: Rng + ?Sized,
    O: BenchObserver + ?Sized,
{
    config.validate()?;
    let mut report = BenchmarkReport { records: Vec::with_capacity(config.sizes.len()) };
    for size in &config.sizes {
        let record = run_size(*size, config.repetitions, rng, observer)?;
        report.records.push(record);
    }
    Ok(report)
}

/// Benchmarks a single size: generate once, time `repetitions` all-pairs runs.
pub fn run_size<R, O>(size: SizeConfig, repetitions: u32, rng: &mut R, observer: &mut O) -> Result<BenchmarkRecord>
where
    R: Rng + ?Sized,
    O: BenchObserver + ?Sized,
{
    let span = info_span!("size", n = size.vertex_count, min_edges = size.min_edges);
    let _enter = span.enter();

    let g = generate(size.vertex_count, size.min_edges, rng)?;
    observer.on_graph(&size, &g);

    let mut times = Vec::with_capacity(repetitions as usize);
    for rep in 0..repetitions {
        let start = Instant::now();
        std::hint::black_box(all_pairs(&g));
        let elapsed = start.elapsed();
        observer.on_repetition(&size, rep, elapsed);
        times.push(elapsed);
    }

    let record = BenchmarkRecord::from_times(size, g.edge_count(), times);
    info!(repetitions, edges = record.edge_count, mean_ns = saturating_nanos(record.mean.as_nanos()), "size done");
    observer.on_record(&record);
    Ok(record)
}
