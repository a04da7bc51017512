//! Injected randomness.
//!
//! Every random decision in a turn is a single `next_f64` draw in `[0, 1)`,
//! so a turn can be replayed from the list of values it consumed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// True with probability `numerator / denominator`.
    fn chance(&mut self, numerator: u32, denominator: u32) -> bool {
        self.next_f64() * (denominator as f64) < numerator as f64
    }

    /// True with probability `percent / 100`.
    fn percent(&mut self, percent: u8) -> bool {
        self.chance(percent as u32, 100)
    }

    /// Uniform integer in `lo..=hi`.
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        let span = (hi - lo + 1) as f64;
        let offset = (self.next_f64() * span).floor() as u32;
        lo + offset.min(hi - lo)
    }
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// Reproducible source backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Plays back a fixed list of draws, then repeats `fallback`.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    index: usize,
    fallback: f64,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self::with_fallback(values, 0.5)
    }

    pub fn with_fallback(values: Vec<f64>, fallback: f64) -> Self {
        Self {
            values,
            index: 0,
            fallback,
        }
    }

    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let v = self.values.get(self.index).copied().unwrap_or(self.fallback);
        self.index += 1;
        v
    }
}

/// Wraps another source and keeps every value it hands out.
pub struct RecordingRandom<'a> {
    inner: &'a mut dyn RandomSource,
    draws: Vec<f64>,
}

impl<'a> RecordingRandom<'a> {
    pub fn new(inner: &'a mut dyn RandomSource) -> Self {
        Self {
            inner,
            draws: Vec::new(),
        }
    }

    pub fn into_draws(self) -> Vec<f64> {
        self.draws
    }
}

impl RandomSource for RecordingRandom<'_> {
    fn next_f64(&mut self) -> f64 {
        let v = self.inner.next_f64();
        self.draws.push(v);
        v
    }
}
