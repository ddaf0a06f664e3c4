//! Orders and roles.

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identity of a general: its index in `0..N`.
pub type GeneralId = usize;

/// A binary order relayed between generals.
///
/// The engine's UNSET sentinel is `Option<Order>::None`; an `Order` on its
/// own is always a concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    /// Attack the city.
    Attack,
    /// Retreat from the city.
    Retreat,
}

impl Order {
    /// Returns the other order.
    pub fn opposite(self) -> Self {
        match self {
            Order::Attack => Order::Retreat,
            Order::Retreat => Order::Attack,
        }
    }

    /// Single-letter form used in message grid dumps.
    pub fn short(self) -> char {
        match self {
            Order::Attack => 'A',
            Order::Retreat => 'R',
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Attack => write!(f, "ATTACK"),
            Order::Retreat => write!(f, "RETREAT"),
        }
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack" | "a" => Ok(Order::Attack),
            "retreat" | "r" => Ok(Order::Retreat),
            other => Err(format!("unknown order '{}' (expected attack or retreat)", other)),
        }
    }
}

impl Distribution<Order> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Order {
        if rng.gen_bool(0.5) {
            Order::Attack
        } else {
            Order::Retreat
        }
    }
}

/// Whether a general follows the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Relays exactly what it received.
    Loyal,
    /// May relay arbitrary, inconsistent values.
    Traitor,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Loyal => write!(f, "Loyal"),
            Role::Traitor => write!(f, "Traitor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_opposite() {
        assert_eq!(Order::Attack.opposite(), Order::Retreat);
        assert_eq!(Order::Retreat.opposite(), Order::Attack);
    }

    #[test]
    fn test_parse_order() {
        assert_eq!("attack".parse::<Order>().unwrap(), Order::Attack);
        assert_eq!(" RETREAT ".parse::<Order>().unwrap(), Order::Retreat);
        assert_eq!("r".parse::<Order>().unwrap(), Order::Retreat);
        assert!("charge".parse::<Order>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Order::Attack.to_string(), "ATTACK");
        assert_eq!(Role::Traitor.to_string(), "Traitor");
    }

    #[test]
    fn test_random_orders_cover_both_values() {
        let mut rng = StdRng::seed_from_u64(7);
        let orders: Vec<Order> = (0..64).map(|_| rng.gen()).collect();
        assert!(orders.contains(&Order::Attack));
        assert!(orders.contains(&Order::Retreat));
    }

    #[test]
    fn test_order_serialization() {
        let json = serde_json::to_string(&Order::Retreat).unwrap();
        assert_eq!(json, "\"Retreat\"");
    }
}
