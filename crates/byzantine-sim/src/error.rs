//! Error types for the trial driver.

use byzantine_protocol::{GeneralId, Order, ProtocolError};
use thiserror::Error;

/// Errors raised while configuring or running trials.
///
/// Disagreement and validity failures mean OM was run under conditions
/// where its guarantees should hold, so they are reported as fatal.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file is not valid JSON for [`crate::SimulationConfig`].
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Protocol error passthrough.
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Loyal lieutenants reached different decisions.
    #[error("loyal generals disagree: {attack:?} decided ATTACK, {retreat:?} decided RETREAT")]
    Disagreement {
        /// Loyal lieutenants that decided ATTACK.
        attack: Vec<GeneralId>,
        /// Loyal lieutenants that decided RETREAT.
        retreat: Vec<GeneralId>,
    },

    /// Loyal lieutenants did not adopt a loyal commander's order.
    #[error("loyal commander {commander} ordered {order} but loyal generals decided {decided}")]
    ValidityViolated {
        /// The loyal top-level commander.
        commander: GeneralId,
        /// What it ordered.
        order: Order,
        /// What the loyal lieutenants agreed on.
        decided: Order,
    },

    /// There was no loyal lieutenant to check.
    #[error("no loyal lieutenants in the trial")]
    NoLoyalLieutenants,
}
