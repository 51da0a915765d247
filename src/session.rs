//! Search sessions owning the random generator
//!
//! Every randomized operation takes its generator explicitly. A `SearchSession` is the
//! outermost owner of one such generator, seeded from `SessionConfig`, so that
//! independent callers never share a stream and seeded runs are reproducible.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::ConfigurationResult;
use crate::search::{make_extended_set_by_shifting, ConfigurationSearchPoint, ConfigurationSearchSpace};

/// Configuration of a search session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Seed of the generator; drawn from the OS when absent
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    config: SessionConfig,
    rng: ChaCha8Rng,
}

impl SearchSession {
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        log::debug!("starting search session with seed {:?}", config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn initial_point(&mut self, space: &ConfigurationSearchSpace) -> ConfigurationSearchPoint {
        space.initial_point(&mut self.rng)
    }

    pub fn adjacent_shifted(&mut self, point: &ConfigurationSearchPoint) -> ConfigurationResult<ConfigurationSearchPoint> {
        point.make_adjacent_shifted(&mut self.rng)
    }

    pub fn random_shifted(
        &mut self,
        point: &ConfigurationSearchPoint,
        amount: usize,
    ) -> ConfigurationResult<BTreeSet<ConfigurationSearchPoint>> {
        point.make_random_shifted(amount, &mut self.rng)
    }

    pub fn extended_set(
        &mut self,
        sources: &BTreeSet<ConfigurationSearchPoint>,
        size: usize,
    ) -> ConfigurationResult<BTreeSet<ConfigurationSearchPoint>> {
        make_extended_set_by_shifting(sources, size, &mut self.rng)
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
