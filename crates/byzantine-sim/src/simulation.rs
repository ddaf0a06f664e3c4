//! The trial driver.
//!
//! A [`Simulation`] owns the only random stream: it is seeded once at
//! construction and drives role assignment, top-level orders and (for the
//! random adversary) the traitor oracle's own seed. It is never reseeded,
//! so a fixed seed reproduces an entire batch.

use byzantine_protocol::{OralMessages, Order, RoleTable, TraitorOracle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::outcome::{TrialOutcome, TrialSummary};
use crate::params::Parameters;
use crate::Result;

/// Runs OM(F) trials for a fixed army size.
pub struct Simulation {
    params: Parameters,
    rng: StdRng,
    oracle: Box<dyn TraitorOracle>,
    trials: usize,
}

impl Simulation {
    /// Creates a simulation with the oracle named in `config`.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        let params = config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let oracle = config.adversary.build(rng.gen());

        info!(
            %params,
            adversary = %config.adversary,
            seed = ?config.seed,
            "simulation ready"
        );
        Ok(Self {
            params,
            rng,
            oracle,
            trials: config.trials,
        })
    }

    /// Creates a simulation with a caller-supplied oracle.
    pub fn with_oracle(config: &SimulationConfig, oracle: Box<dyn TraitorOracle>) -> Result<Self> {
        let mut sim = Self::new(config)?;
        sim.oracle = oracle;
        Ok(sim)
    }

    /// The validated army size.
    pub fn parameters(&self) -> Parameters {
        self.params
    }

    /// Name of the active traitor strategy.
    pub fn adversary(&self) -> &str {
        self.oracle.name()
    }

    /// Draws a uniformly random top-level order.
    pub fn random_order(&mut self) -> Order {
        self.rng.gen()
    }

    /// Assigns fresh roles and runs one trial with `order`.
    pub fn run_once(&mut self, order: Order) -> Result<TrialOutcome> {
        let roles = RoleTable::assign(
            self.params.generals(),
            self.params.traitors(),
            &mut self.rng,
        )?;
        self.run_with_roles(roles, order)
    }

    /// Runs one trial on a given role table.
    pub fn run_with_roles(&mut self, roles: RoleTable, order: Order) -> Result<TrialOutcome> {
        if roles.len() != self.params.generals() {
            return Err(SimError::Config(format!(
                "role table has {} generals, simulation expects {}",
                roles.len(),
                self.params.generals()
            )));
        }

        let mut engine =
            OralMessages::new(&roles, self.params.traitors(), self.oracle.as_mut())?;
        let decisions = engine.run(order)?;
        let messages = engine.messages_sent();

        debug!(
            commander = roles.commander(),
            commander_loyal = roles.commander_is_loyal(),
            %order,
            messages,
            "trial finished"
        );
        Ok(TrialOutcome {
            commander: roles.commander(),
            roles,
            order,
            decisions,
            messages,
        })
    }

    /// Runs the configured number of trials.
    pub fn run_batch(&mut self) -> Result<TrialSummary> {
        self.run_trials(self.trials)
    }

    /// Runs `count` verified trials, each with fresh roles and a random
    /// order. Stops at the first Agreement or Validity violation.
    pub fn run_trials(&mut self, count: usize) -> Result<TrialSummary> {
        let mut summary = TrialSummary::default();
        for trial in 0..count {
            let order = self.random_order();
            let outcome = self.run_once(order)?;
            let consensus = match outcome.verify() {
                Ok(consensus) => consensus,
                Err(err) => {
                    warn!(trial, error = %err, "trial violated consensus:\n{}", outcome);
                    return Err(err);
                }
            };
            summary.record(&outcome, &consensus);
        }

        info!(
            params = %self.params,
            trials = summary.trials,
            messages = summary.messages,
            "all trials reached consensus"
        );
        Ok(summary)
    }
}
