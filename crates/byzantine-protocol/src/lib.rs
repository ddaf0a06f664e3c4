//! # Byzantine Protocol
//!
//! Oral-Messages consensus, OM(m), for the Byzantine Generals Problem.
//!
//! ## Overview
//!
//! `N` generals, one of them the commander, must agree on ATTACK or
//! RETREAT while up to `F` of them are traitors relaying arbitrary,
//! inconsistent values. With `N > 3F` and `F` rounds of recursion, OM
//! guarantees:
//!
//! - **Agreement**: every loyal general decides the same order
//! - **Validity**: if the commander is loyal, that order is the commander's
//!
//! ## Threat Model
//!
//! Messages are unsigned ("oral"): a traitor can claim anything about what
//! it received, and can tell different lieutenants different things. Each
//! traitor message is chosen by a pluggable [`TraitorOracle`], so the same
//! engine runs against random, fixed-sequence or worst-case adversaries.
//!
//! ## Architecture
//!
//! ```text
//!  ┌──────────────┐   ┌───────────────┐
//!  │ Role Table   │   │ Traitor Oracle│
//!  └──────┬───────┘   └───────┬───────┘
//!         │                   │
//!         └─────────┬─────────┘
//!                   ▼
//!          ┌─────────────────┐  depth-1   ┌─────────────────┐
//!          │  OM(depth)      │ ─────────▶ │  OM(depth-1)    │ ...
//!          │  frame + grid   │ ◀───────── │  per lieutenant │
//!          └────────┬────────┘  decisions └─────────────────┘
//!                   ▼
//!          ┌─────────────────┐
//!          │ Majority Voter  │
//!          └─────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use byzantine_protocol::{OralMessages, Order, RandomOracle, RoleTable};
//!
//! let roles = RoleTable::fixed(4, 0, &[2])?;
//! let mut oracle = RandomOracle::from_seed(7);
//! let mut engine = OralMessages::for_traitors(&roles, &mut oracle)?;
//!
//! let decisions = engine.run(Order::Attack)?;
//! for general in roles.loyal_lieutenants() {
//!     assert_eq!(decisions.get(general), Some(Order::Attack));
//! }
//! # Ok::<(), byzantine_protocol::ProtocolError>(())
//! ```
//!
//! ## References
//!
//! - Lamport, L., Shostak, R., Pease, M. (1982). "The Byzantine Generals
//!   Problem". *ACM TOPLAS*, 4(3), 382-401.

mod acting;
mod engine;
mod error;
mod grid;
mod oracle;
mod order;
mod params;
mod roles;
mod vote;

pub use acting::ActingCommanders;
pub use engine::{DecisionVector, OralMessages};
pub use error::ProtocolError;
pub use grid::{Ballot, MessageGrid};
pub use oracle::{
    AdversaryKind, FixedSequenceOracle, InvertingOracle, RandomOracle, Relay, SplitBrainOracle,
    TraitorOracle,
};
pub use order::{GeneralId, Order, Role};
pub use params::{ensure_parameters, validate_parameters};
pub use roles::RoleTable;
pub use vote::{majority, Tally, TIE_BREAK};

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
