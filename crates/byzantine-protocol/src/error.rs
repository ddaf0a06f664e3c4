//! Error types for the Oral-Messages engine.
//!
//! Every variant is fatal: the protocol tolerates traitors by outvoting
//! them, so nothing here is ever retried.

use thiserror::Error;

use crate::order::GeneralId;

/// Errors raised by role assignment, vote counting and the OM engine.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// `N > 3F` (with both positive) does not hold.
    #[error("precondition violated: {generals} generals cannot tolerate {traitors} traitors (need N > 3F)")]
    PreconditionViolated {
        /// Total number of generals.
        generals: usize,
        /// Number of traitors.
        traitors: usize,
    },

    /// An UNSET cell was about to be counted as a vote.
    #[error("unset value from general {sender} reached the vote of general {receiver}")]
    UnsetValue {
        /// General that never wrote the cell.
        sender: GeneralId,
        /// General whose vote was being counted.
        receiver: GeneralId,
    },

    /// Nothing was left to count after exclusions.
    #[error("empty ballot set for general {receiver}")]
    EmptyBallot {
        /// General whose vote was being counted.
        receiver: GeneralId,
    },

    /// A general was asked to act as commander twice on one recursion path.
    #[error("general {0} is already an acting commander on this path")]
    AlreadyActing(GeneralId),

    /// A lieutenant ended a frame without a decision.
    #[error("general {0} has no decision")]
    MissingDecision(GeneralId),

    /// A general id is outside the army.
    #[error("general {general} is out of range for {size} generals")]
    UnknownGeneral {
        /// The offending id.
        general: GeneralId,
        /// Number of generals.
        size: usize,
    },

    /// A message grid cell was written twice in one frame.
    #[error("duplicate message from general {sender} to general {receiver}")]
    DuplicateMessage {
        /// Sending general.
        sender: GeneralId,
        /// Receiving general.
        receiver: GeneralId,
    },

    /// The acting-commander chain does not match the recursion depth.
    #[error("acting chain has {actual} commanders at depth {depth}, expected {expected}")]
    ChainLength {
        /// Remaining recursion depth.
        depth: usize,
        /// Expected chain length (`rounds - depth + 1`).
        expected: usize,
        /// Observed chain length.
        actual: usize,
    },

    /// A role table could not be built from the given ids.
    #[error("invalid role table: {0}")]
    InvalidRoleTable(String),

    /// A fixed-sequence oracle was created without any values.
    #[error("fixed oracle sequence must not be empty")]
    EmptyOracleSequence,
}
