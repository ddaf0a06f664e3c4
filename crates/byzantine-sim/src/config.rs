//! Configuration for simulation runs.

use byzantine_protocol::AdversaryKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::params::Parameters;
use crate::Result;

/// Default number of trials for a batch run.
pub const DEFAULT_TRIALS: usize = 10_000;

/// Settings for a [`crate::Simulation`].
///
/// Missing fields in a JSON file fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Total number of generals, `N`.
    pub generals: usize,

    /// Number of traitors, `F`.
    pub traitors: usize,

    /// Seed for the random stream. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Strategy traitors use to pick their messages.
    pub adversary: AdversaryKind,

    /// Trials per batch run.
    pub trials: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generals: 4,
            traitors: 1,
            seed: None,
            adversary: AdversaryKind::Random,
            trials: DEFAULT_TRIALS,
        }
    }
}

impl SimulationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Sets the army size.
    pub fn with_parameters(mut self, generals: usize, traitors: usize) -> Self {
        self.generals = generals;
        self.traitors = traitors;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the traitor strategy.
    pub fn with_adversary(mut self, adversary: AdversaryKind) -> Self {
        self.adversary = adversary;
        self
    }

    /// Sets the batch size.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Checks `N > 3F` and returns the validated counts.
    pub fn validate(&self) -> Result<Parameters> {
        Parameters::new(self.generals, self.traitors)
    }
}
