//! Item-stream generators for frequency-table benchmarks.
//!
//! Streams are deterministic for a given seed so runs are comparable.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stream_summary::FrequencyTable;

#[derive(Debug, Clone, Copy)]
pub enum Distribution {
    /// Uniform items in `[0, universe)`; almost every add replaces.
    Uniform,
    /// A small hot set receives `hot_prob` of the stream.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Zipfian skew. `theta`: 0.0 = uniform, 0.99 = highly skewed (YCSB default).
    Zipfian { theta: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    pub universe: u64,
    pub distribution: Distribution,
    pub seed: u64,
}

impl StreamConfig {
    pub fn generate(self, len: usize) -> Vec<u64> {
        let mut generator = StreamGenerator::new(self);
        (0..len).map(|_| generator.next_item()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct StreamGenerator {
    universe: u64,
    distribution: Distribution,
    rng: StdRng,
    zipfian: Option<ZipfianState>,
}

impl StreamGenerator {
    pub fn new(config: StreamConfig) -> Self {
        let universe = config.universe.max(2);
        let zipfian = match config.distribution {
            Distribution::Zipfian { theta } => Some(ZipfianState::new(universe, theta)),
            _ => None,
        };
        Self {
            universe,
            distribution: config.distribution,
            rng: StdRng::seed_from_u64(config.seed),
            zipfian,
        }
    }

    pub fn next_item(&mut self) -> u64 {
        match self.distribution {
            Distribution::Uniform => self.rng.random_range(0..self.universe),
            Distribution::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot_size =
                    ((self.universe as f64) * hot_fraction.clamp(0.0, 1.0)).round() as u64;
                let hot_size = hot_size.clamp(1, self.universe - 1);
                if self.rng.random_bool(hot_prob.clamp(0.0, 1.0)) {
                    self.rng.random_range(0..hot_size)
                } else {
                    self.rng.random_range(hot_size..self.universe)
                }
            },
            Distribution::Zipfian { .. } => match &self.zipfian {
                Some(zipf) => zipf.sample(self.rng.random::<f64>()),
                None => 0,
            },
        }
    }
}

/// Fraction of the true top-`k` items that the table also ranks in its top-`k`.
pub fn top_k_recall(table: &FrequencyTable<u64>, stream: &[u64], k: usize) -> f64 {
    let mut truth: HashMap<u64, u64> = HashMap::new();
    for &item in stream {
        *truth.entry(item).or_default() += 1;
    }
    let mut exact: Vec<(u64, u64)> = truth.into_iter().collect();
    exact.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    exact.truncate(k);
    if exact.is_empty() {
        return 1.0;
    }

    let reported: Vec<u64> = table.top_k(k).into_iter().map(|(item, _)| item).collect();
    let found = exact
        .iter()
        .filter(|(item, _)| reported.contains(item))
        .count();
    found as f64 / exact.len() as f64
}

/// Zipfian inverse-CDF sampler (YCSB). Pre-computes zeta values.
#[derive(Debug, Clone)]
struct ZipfianState {
    n: u64,
    theta: f64,
    zeta_n: f64,
    alpha: f64,
    eta: f64,
}

impl ZipfianState {
    fn new(n: u64, theta: f64) -> Self {
        let theta = theta.clamp(0.0, 0.9999);
        let zeta_2 = Self::zeta(2, theta);
        let zeta_n = Self::zeta(n, theta);
        let alpha = 1.0 / (1.0 - theta);
        let eta = (1.0 - (2.0 / n as f64).powf(1.0 - theta)) / (1.0 - zeta_2 / zeta_n);
        Self {
            n,
            theta,
            zeta_n,
            alpha,
            eta,
        }
    }

    fn zeta(n: u64, theta: f64) -> f64 {
        (1..=n).map(|i| 1.0 / (i as f64).powf(theta)).sum()
    }

    fn sample(&self, u: f64) -> u64 {
        let uz = u * self.zeta_n;
        if uz < 1.0 {
            return 0;
        }
        if uz < 1.0 + 0.5_f64.powf(self.theta) {
            return 1;
        }
        let spread = (self.n as f64) * (self.eta * u - self.eta + 1.0).powf(self.alpha);
        (spread as u64).min(self.n - 1)
    }
}
