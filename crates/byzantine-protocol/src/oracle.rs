//! Traitor oracles.
//!
//! Whenever a traitor sends a message, the engine asks a [`TraitorOracle`]
//! what to send instead of the honest value. Strategies are swappable so
//! tests can pin the adversary to a fixed or worst-case sequence.
//!
//! # Implementors
//!
//! - [`RandomOracle`]: uniform, independent per message (reference behavior)
//! - [`FixedSequenceOracle`]: cycles a fixed list, for deterministic tests
//! - [`InvertingOracle`]: always sends the opposite of the honest value
//! - [`SplitBrainOracle`]: tells even receivers ATTACK and odd ones RETREAT

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;
use crate::order::{GeneralId, Order};
use crate::Result;

/// A message a traitor is about to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relay {
    /// The traitor sending the message.
    pub sender: GeneralId,
    /// The general receiving it.
    pub receiver: GeneralId,
    /// What a loyal general in the sender's place would send.
    pub honest: Order,
}

/// Adversarial strategy consulted for every message a traitor sends.
///
/// Never returns UNSET: the return type is a concrete [`Order`].
pub trait TraitorOracle: Send {
    /// Short name of the strategy, for logs.
    fn name(&self) -> &str;

    /// Chooses the value the traitor sends for `relay`.
    fn next_adversarial_value(&mut self, relay: &Relay) -> Order;
}

/// Uniformly random ATTACK/RETREAT, independent per message.
///
/// Owns its generator; seed it once and never reseed mid-run.
#[derive(Debug, Clone)]
pub struct RandomOracle {
    rng: StdRng,
}

impl RandomOracle {
    /// Creates an oracle with a reproducible stream.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates an oracle seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl TraitorOracle for RandomOracle {
    fn name(&self) -> &str {
        "random"
    }

    fn next_adversarial_value(&mut self, _relay: &Relay) -> Order {
        self.rng.gen()
    }
}

/// Replays a fixed sequence of orders, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct FixedSequenceOracle {
    sequence: Vec<Order>,
    cursor: usize,
}

impl FixedSequenceOracle {
    /// Creates an oracle over `sequence`, which must not be empty.
    pub fn new(sequence: Vec<Order>) -> Result<Self> {
        if sequence.is_empty() {
            return Err(ProtocolError::EmptyOracleSequence);
        }
        Ok(Self {
            sequence,
            cursor: 0,
        })
    }

    /// Number of values handed out so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl TraitorOracle for FixedSequenceOracle {
    fn name(&self) -> &str {
        "fixed"
    }

    fn next_adversarial_value(&mut self, _relay: &Relay) -> Order {
        let order = self.sequence[self.cursor % self.sequence.len()];
        self.cursor += 1;
        order
    }
}

/// Always lies: sends the opposite of the honest value.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvertingOracle;

impl TraitorOracle for InvertingOracle {
    fn name(&self) -> &str {
        "inverting"
    }

    fn next_adversarial_value(&mut self, relay: &Relay) -> Order {
        relay.honest.opposite()
    }
}

/// Splits the army: ATTACK to even-numbered receivers, RETREAT to odd ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitBrainOracle;

impl TraitorOracle for SplitBrainOracle {
    fn name(&self) -> &str {
        "split-brain"
    }

    fn next_adversarial_value(&mut self, relay: &Relay) -> Order {
        if relay.receiver % 2 == 0 {
            Order::Attack
        } else {
            Order::Retreat
        }
    }
}

/// Selects an oracle from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdversaryKind {
    /// [`RandomOracle`].
    #[default]
    Random,
    /// [`InvertingOracle`].
    Inverting,
    /// [`SplitBrainOracle`].
    SplitBrain,
}

impl AdversaryKind {
    /// Builds the oracle. `seed` only matters for [`AdversaryKind::Random`].
    pub fn build(self, seed: u64) -> Box<dyn TraitorOracle> {
        match self {
            AdversaryKind::Random => Box::new(RandomOracle::from_seed(seed)),
            AdversaryKind::Inverting => Box::new(InvertingOracle),
            AdversaryKind::SplitBrain => Box::new(SplitBrainOracle),
        }
    }
}

impl fmt::Display for AdversaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdversaryKind::Random => write!(f, "random"),
            AdversaryKind::Inverting => write!(f, "inverting"),
            AdversaryKind::SplitBrain => write!(f, "split-brain"),
        }
    }
}

impl FromStr for AdversaryKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(AdversaryKind::Random),
            "inverting" | "invert" => Ok(AdversaryKind::Inverting),
            "split-brain" | "split" => Ok(AdversaryKind::SplitBrain),
            other => Err(format!(
                "unknown adversary '{}' (expected random, inverting or split-brain)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay(receiver: GeneralId, honest: Order) -> Relay {
        Relay {
            sender: 0,
            receiver,
            honest,
        }
    }

    #[test]
    fn test_random_oracle_is_reproducible() {
        let mut a = RandomOracle::from_seed(99);
        let mut b = RandomOracle::from_seed(99);
        let r = relay(1, Order::Attack);
        let left: Vec<Order> = (0..32).map(|_| a.next_adversarial_value(&r)).collect();
        let right: Vec<Order> = (0..32).map(|_| b.next_adversarial_value(&r)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_fixed_sequence_wraps() {
        let mut oracle = FixedSequenceOracle::new(vec![Order::Attack, Order::Retreat]).unwrap();
        let r = relay(1, Order::Attack);
        let values: Vec<Order> = (0..5).map(|_| oracle.next_adversarial_value(&r)).collect();
        assert_eq!(
            values,
            vec![
                Order::Attack,
                Order::Retreat,
                Order::Attack,
                Order::Retreat,
                Order::Attack
            ]
        );
        assert_eq!(oracle.consumed(), 5);
    }

    #[test]
    fn test_fixed_sequence_rejects_empty() {
        assert!(matches!(
            FixedSequenceOracle::new(Vec::new()),
            Err(ProtocolError::EmptyOracleSequence)
        ));
    }

    #[test]
    fn test_inverting_oracle() {
        let mut oracle = InvertingOracle;
        assert_eq!(
            oracle.next_adversarial_value(&relay(3, Order::Attack)),
            Order::Retreat
        );
        assert_eq!(
            oracle.next_adversarial_value(&relay(3, Order::Retreat)),
            Order::Attack
        );
    }

    #[test]
    fn test_split_brain_oracle() {
        let mut oracle = SplitBrainOracle;
        assert_eq!(
            oracle.next_adversarial_value(&relay(2, Order::Retreat)),
            Order::Attack
        );
        assert_eq!(
            oracle.next_adversarial_value(&relay(3, Order::Attack)),
            Order::Retreat
        );
    }

    #[test]
    fn test_adversary_kind_parse_and_build() {
        assert_eq!("split".parse::<AdversaryKind>().unwrap(), AdversaryKind::SplitBrain);
        assert!("chaos".parse::<AdversaryKind>().is_err());
        assert_eq!(AdversaryKind::Inverting.build(0).name(), "inverting");
        assert_eq!(AdversaryKind::default().build(0).name(), "random");
    }

    #[test]
    fn test_adversary_kind_serialization() {
        let json = serde_json::to_string(&AdversaryKind::SplitBrain).unwrap();
        assert_eq!(json, "\"split-brain\"");
    }
}
