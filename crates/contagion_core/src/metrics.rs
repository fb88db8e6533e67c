//! Run metrics and logging setup.
//!
//! [`Metrics`] is fed once per frame by the runner. It keeps the latest
//! epidemic gauges, tick timing, and named event counters, and can be read
//! from another thread while the simulation runs.

use contagion_data::PopulationStats;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// An INFO line is emitted every this many ticks.
pub const LOG_EVERY_TICKS: u64 = 1000;

pub struct Metrics {
    tick_count: AtomicU64,
    population: AtomicU64,
    infected: AtomicU64,
    contagious: AtomicU64,
    busy_micros: AtomicU64,
    slowest_micros: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

/// Point-in-time copy of [`Metrics`], suitable for printing as JSON.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub ticks: u64,
    pub population: u64,
    pub infected: u64,
    pub contagious: u64,
    pub mean_tick_us: f64,
    pub slowest_tick_us: u64,
    pub wall_ms: u128,
    pub counters: BTreeMap<String, u64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            population: AtomicU64::new(0),
            infected: AtomicU64::new(0),
            contagious: AtomicU64::new(0),
            busy_micros: AtomicU64::new(0),
            slowest_micros: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records one engine tick and the statistics it produced.
    pub fn record_tick(&self, duration: Duration, stats: &PopulationStats) {
        let micros = duration.as_micros() as u64;
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.population.store(stats.population as u64, Ordering::Relaxed);
        self.infected.store(stats.infected as u64, Ordering::Relaxed);
        self.contagious.store(stats.contagious as u64, Ordering::Relaxed);
        self.busy_micros.fetch_add(micros, Ordering::Relaxed);
        self.slowest_micros.fetch_max(micros, Ordering::Relaxed);

        if tick % LOG_EVERY_TICKS == 0 {
            tracing::info!(
                tick,
                population = stats.population,
                infected = stats.infected,
                deceased = stats.deceased,
                duration_us = micros,
                "Simulation tick"
            );
        }
    }

    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    pub fn add_to_counter(&self, name: &str, amount: u64) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(amount, Ordering::Relaxed);
    }

    /// Current value of a named counter; zero if it was never touched.
    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn infected(&self) -> u64 {
        self.infected.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    #[must_use]
    pub fn summary(&self) -> MetricsSummary {
        let ticks = self.tick_count();
        let busy = self.busy_micros.load(Ordering::Relaxed);
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        MetricsSummary {
            ticks,
            population: self.population.load(Ordering::Relaxed),
            infected: self.infected(),
            contagious: self.contagious.load(Ordering::Relaxed),
            mean_tick_us: if ticks == 0 {
                0.0
            } else {
                busy as f64 / ticks as f64
            },
            slowest_tick_us: self.slowest_micros.load(Ordering::Relaxed),
            wall_ms: self.elapsed().as_millis(),
            counters: counters
                .iter()
                .map(|(k, v)| (k.clone(), v.load(Ordering::Relaxed)))
                .collect(),
        }
    }
}

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Builds the log filter from `RUST_LOG`, falling back to [`DEFAULT_LOG_FILTER`].
#[must_use]
pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs a global fmt subscriber filtered by [`log_filter`]. Later calls
/// are no-ops.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(population: usize, infected: usize) -> PopulationStats {
        PopulationStats {
            population,
            healthy: population - infected,
            infected,
            contagious: infected / 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_record_tick_updates_gauges() {
        let metrics = Metrics::new();
        metrics.record_tick(Duration::from_micros(40), &stats(100, 8));
        metrics.record_tick(Duration::from_micros(20), &stats(99, 6));

        let summary = metrics.summary();
        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.population, 99);
        assert_eq!(summary.infected, 6);
        assert_eq!(summary.contagious, 3);
        assert_eq!(summary.slowest_tick_us, 40);
        assert!((summary.mean_tick_us - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_counters_accumulate() {
        let metrics = Metrics::new();
        metrics.increment_counter("deaths");
        metrics.add_to_counter("deaths", 2);
        assert_eq!(metrics.counter("deaths"), 3);
        assert_eq!(metrics.counter("missing"), 0);
        assert_eq!(metrics.summary().counters.get("deaths"), Some(&3));
    }

    #[test]
    fn test_empty_summary() {
        let summary = Metrics::new().summary();
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.mean_tick_us, 0.0);
        assert!(summary.counters.is_empty());
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_default_filter_enables_info() {
        let filter = EnvFilter::new(DEFAULT_LOG_FILTER);
        assert_eq!(filter.max_level_hint(), Some(tracing::level_filters::LevelFilter::INFO));
    }
}
