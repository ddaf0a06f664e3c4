//! # Byzantine Simulation
//!
//! Trial driver for the Oral-Messages engine in `byzantine-protocol`.
//!
//! ## Overview
//!
//! A trial assigns roles, picks the commander's order, runs OM(F) and
//! checks the two guarantees:
//!
//! | Property | Checked when | Failure |
//! |----------|--------------|---------|
//! | Agreement | always | [`SimError::Disagreement`] |
//! | Validity | commander is loyal | [`SimError::ValidityViolated`] |
//!
//! Both are fatal: with `N > 3F` they cannot fail unless the engine is
//! broken.
//!
//! ## Usage
//!
//! ```rust
//! use byzantine_sim::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::new().with_parameters(7, 2).with_seed(42);
//! let mut sim = Simulation::new(&config)?;
//!
//! let order = sim.random_order();
//! let outcome = sim.run_once(order)?;
//! let consensus = outcome.verify()?;
//! println!("loyal generals agreed on {}", consensus.order);
//!
//! let summary = sim.run_trials(100)?;
//! assert_eq!(summary.trials, 100);
//! # Ok::<(), byzantine_sim::SimError>(())
//! ```

mod config;
mod error;
mod outcome;
mod params;
mod simulation;

pub use config::{SimulationConfig, DEFAULT_TRIALS};
pub use error::SimError;
pub use outcome::{Consensus, TrialOutcome, TrialSummary};
pub use params::Parameters;
pub use simulation::Simulation;

// Re-export protocol types for convenience
pub use byzantine_protocol::{
    validate_parameters, AdversaryKind, DecisionVector, GeneralId, Order, Role, RoleTable,
    TraitorOracle,
};

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;
