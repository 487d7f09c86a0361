//! Random source injected into the simulation
//!
//! The tick never owns its randomness. Production code passes a seeded
//! `Pcg32` (any `rand::Rng` works); tests and replays pass a `ScriptedDice`
//! to pin every spawn position and enemy shot.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform integer source used by the tick
pub trait Dice {
    /// Uniform value in `[0, bound)`. A bound of 0 yields 0.
    fn roll(&mut self, bound: u32) -> u32;
}

impl<R: Rng> Dice for R {
    fn roll(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.random_range(0..bound)
    }
}

/// Seeded generator for a run
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Replays a fixed list of rolls.
///
/// Each scripted value is reduced modulo the requested bound. Once the script
/// runs out every roll returns `bound - 1`, which never triggers an enemy shot.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: Vec<u32>,
    cursor: usize,
    /// Bounds requested so far, in call order
    requests: Vec<u32>,
}

impl ScriptedDice {
    pub fn new(script: impl Into<Vec<u32>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
            requests: Vec::new(),
        }
    }

    /// A script with no entries: spawns at x = max, enemies never fire
    pub fn quiet() -> Self {
        Self::default()
    }

    /// Bounds of every roll made so far
    pub fn requests(&self) -> &[u32] {
        &self.requests
    }

    /// Scripted values not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.cursor)
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, bound: u32) -> u32 {
        self.requests.push(bound);
        if bound == 0 {
            return 0;
        }
        match self.script.get(self.cursor) {
            Some(&value) => {
                self.cursor += 1;
                value % bound
            }
            None => bound - 1,
        }
    }
}
