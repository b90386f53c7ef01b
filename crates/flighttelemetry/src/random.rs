//! Random draws used by the simulator.
//!
//! The engine-status toggles and the vibration reading are the only random
//! inputs. They go through [`RandomSource`] so a run can be seeded, or fed a
//! fixed script of draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform random draws.
pub trait RandomSource {
    /// Draw a real value uniformly from `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Draw an integer uniformly from `[0, bound)`.
    ///
    /// `bound` must be non-zero.
    fn below(&mut self, bound: u32) -> u32;
}

impl RandomSource for StdRng {
    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn below(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }
}

/// Build the production random source, seeded explicitly when `seed` is given.
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Replays fixed draws in order.
///
/// Once a queue runs dry, `unit` returns 0.5 and `below` returns `bound - 1`,
/// which never triggers an engine-status toggle.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    units: std::collections::VecDeque<f64>,
    integers: std::collections::VecDeque<u32>,
}

#[cfg(test)]
impl ScriptedSource {
    pub(crate) fn new(units: &[f64], integers: &[u32]) -> Self {
        Self {
            units: units.iter().copied().collect(),
            integers: integers.iter().copied().collect(),
        }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(0.5)
    }

    fn below(&mut self, bound: u32) -> u32 {
        self.integers
            .pop_front()
            .map_or(bound - 1, |value| value % bound)
    }
}
