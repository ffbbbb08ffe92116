use anyhow::{anyhow, bail};
use nalgebra::Point3;

/// One traced point and its polyline boundary flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawSample {
    pub position: Point3<f32>,
    pub flag: i32,
}

impl RawSample {
    pub fn new(position: Point3<f32>, flag: i32) -> Self {
        Self { position, flag }
    }
}

/// Read-only access to the traced samples. Every seed owns a run of exactly
/// `points_per_seed` samples starting at `seed * points_per_seed`.
pub trait SampleProvider: Sync {
    fn num_seeds(&self) -> usize;

    fn points_per_seed(&self) -> usize;

    fn sample(&self, index: usize) -> Option<RawSample>;

    /// Total number of samples. Fails when the shape does not fit a `usize`.
    fn len(&self) -> anyhow::Result<usize> {
        sample_count(self.num_seeds(), self.points_per_seed())
    }

    fn position(&self, index: usize) -> anyhow::Result<Point3<f32>> {
        self.sample(index).map(|s| s.position).ok_or_else(|| {
            anyhow!(
                "sample index {index} is out of range for {} seeds of {} points",
                self.num_seeds(),
                self.points_per_seed()
            )
        })
    }
}

pub(crate) fn sample_count(num_seeds: usize, points_per_seed: usize) -> anyhow::Result<usize> {
    num_seeds
        .checked_mul(points_per_seed)
        .ok_or_else(|| anyhow!("{num_seeds} seeds of {points_per_seed} points overflow"))
}

/// In-memory sample buffer.
#[derive(Clone, Debug, Default)]
pub struct RawData {
    num_seeds: usize,
    points_per_seed: usize,
    samples: Vec<RawSample>,
}

impl RawData {
    pub fn new(
        num_seeds: usize,
        points_per_seed: usize,
        samples: Vec<RawSample>,
    ) -> anyhow::Result<Self> {
        let expected = sample_count(num_seeds, points_per_seed)?;
        if samples.len() != expected {
            bail!(
                "expected {expected} samples for {num_seeds} seeds of {points_per_seed} points, \
                 got {}",
                samples.len()
            );
        }
        Ok(Self {
            num_seeds,
            points_per_seed,
            samples,
        })
    }

    /// Builds the buffer from equally long per-seed runs.
    pub fn from_seeds(seeds: Vec<Vec<RawSample>>) -> anyhow::Result<Self> {
        let num_seeds = seeds.len();
        let points_per_seed = seeds.first().map_or(0, Vec::len);
        if let Some(seed) = seeds.iter().position(|s| s.len() != points_per_seed) {
            bail!(
                "seed {seed} holds {} samples, expected {points_per_seed}",
                seeds[seed].len()
            );
        }
        Self::new(num_seeds, points_per_seed, seeds.concat())
    }

    pub fn samples(&self) -> &[RawSample] {
        &self.samples
    }
}

impl SampleProvider for RawData {
    fn num_seeds(&self) -> usize {
        self.num_seeds
    }

    fn points_per_seed(&self) -> usize {
        self.points_per_seed
    }

    fn sample(&self, index: usize) -> Option<RawSample> {
        self.samples.get(index).copied()
    }
}
