//! Majority voting over received ballots.
//!
//! # Voting Rules
//!
//! - Strictly more ATTACK than RETREAT decides ATTACK
//! - Strictly more RETREAT than ATTACK decides RETREAT
//! - Equal counts decide RETREAT (conservative default)
//! - Ballots from excluded senders are ignored
//! - An UNSET ballot or an empty ballot set is an invariant violation

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::grid::Ballot;
use crate::order::{GeneralId, Order};
use crate::Result;

/// Order chosen when the counts are equal.
pub const TIE_BREAK: Order = Order::Retreat;

/// ATTACK/RETREAT counts for one receiver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Number of ATTACK ballots.
    pub attack: usize,
    /// Number of RETREAT ballots.
    pub retreat: usize,
}

impl Tally {
    /// Counts `ballots` for `receiver`, skipping senders in `excluding`.
    pub fn count<I>(receiver: GeneralId, ballots: I, excluding: &[GeneralId]) -> Result<Self>
    where
        I: IntoIterator<Item = Ballot>,
    {
        let mut tally = Self::default();
        for ballot in ballots {
            if excluding.contains(&ballot.sender) {
                continue;
            }
            match ballot.value {
                Some(Order::Attack) => tally.attack += 1,
                Some(Order::Retreat) => tally.retreat += 1,
                None => {
                    return Err(ProtocolError::UnsetValue {
                        sender: ballot.sender,
                        receiver,
                    })
                }
            }
        }
        Ok(tally)
    }

    /// Total ballots counted.
    pub fn total(&self) -> usize {
        self.attack + self.retreat
    }

    /// The strict-majority decision, or [`TIE_BREAK`] on equal counts.
    pub fn decision(&self) -> Order {
        if self.attack > self.retreat {
            Order::Attack
        } else if self.retreat > self.attack {
            Order::Retreat
        } else {
            TIE_BREAK
        }
    }
}

/// Reduces the ballots `receiver` holds to a single order.
pub fn majority<I>(receiver: GeneralId, ballots: I, excluding: &[GeneralId]) -> Result<Order>
where
    I: IntoIterator<Item = Ballot>,
{
    let tally = Tally::count(receiver, ballots, excluding)?;
    if tally.total() == 0 {
        return Err(ProtocolError::EmptyBallot { receiver });
    }
    Ok(tally.decision())
}
