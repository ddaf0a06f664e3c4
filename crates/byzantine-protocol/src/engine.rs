//! Recursive Oral-Messages engine, OM(m).
//!
//! Each frame has a commander (the last member of the acting chain) holding
//! a value. The commander sends it to every lieutenant, i.e. every general
//! not on the chain. With budget left, every lieutenant then takes command
//! of a sub-frame with one less round and relays what it received; a
//! lieutenant's decision is the majority of the commander's direct message
//! and what it learned about every other lieutenant in those sub-frames.
//!
//! Message volume grows as O(N^(F+1)). That is inherent to OM and accepted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use crate::acting::ActingCommanders;
use crate::error::ProtocolError;
use crate::grid::MessageGrid;
use crate::oracle::{Relay, TraitorOracle};
use crate::order::{GeneralId, Order, Role};
use crate::roles::RoleTable;
use crate::vote;
use crate::Result;

/// What each non-acting general holds at the end of a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionVector {
    decisions: BTreeMap<GeneralId, Order>,
}

impl DecisionVector {
    /// Decision of `general`, if it took part in the frame.
    pub fn get(&self, general: GeneralId) -> Option<Order> {
        self.decisions.get(&general).copied()
    }

    /// Decision of `general`; missing entries are an invariant violation.
    pub fn decision_for(&self, general: GeneralId) -> Result<Order> {
        self.get(general)
            .ok_or(ProtocolError::MissingDecision(general))
    }

    /// Iterates over `(general, decision)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (GeneralId, Order)> + '_ {
        self.decisions.iter().map(|(&g, &o)| (g, o))
    }

    /// Number of generals with a decision.
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    /// Returns true if nobody decided anything.
    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    fn insert(&mut self, general: GeneralId, order: Order) {
        self.decisions.insert(general, order);
    }
}

impl FromIterator<(GeneralId, Order)> for DecisionVector {
    fn from_iter<I: IntoIterator<Item = (GeneralId, Order)>>(iter: I) -> Self {
        Self {
            decisions: iter.into_iter().collect(),
        }
    }
}

/// OM(m) over a fixed role table.
///
/// The oracle is borrowed so the caller keeps one stream alive across
/// trials.
pub struct OralMessages<'a, O: TraitorOracle + ?Sized> {
    roles: &'a RoleTable,
    oracle: &'a mut O,
    rounds: usize,
    messages: u64,
}

impl<'a, O: TraitorOracle + ?Sized> OralMessages<'a, O> {
    /// Creates an engine running OM(`rounds`).
    ///
    /// Fails unless `N > 3 * rounds`.
    pub fn new(roles: &'a RoleTable, rounds: usize, oracle: &'a mut O) -> Result<Self> {
        let generals = roles.len();
        let tolerable = rounds.checked_mul(3).map_or(false, |bound| generals > bound);
        if !tolerable {
            return Err(ProtocolError::PreconditionViolated {
                generals,
                traitors: rounds,
            });
        }
        Ok(Self {
            roles,
            oracle,
            rounds,
            messages: 0,
        })
    }

    /// Creates an engine with one round of recursion per traitor.
    pub fn for_traitors(roles: &'a RoleTable, oracle: &'a mut O) -> Result<Self> {
        let rounds = roles.traitors().len();
        Self::new(roles, rounds, oracle)
    }

    /// Recursion budget of the top-level frame.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Messages sent so far, across every frame.
    pub fn messages_sent(&self) -> u64 {
        self.messages
    }

    /// Runs the full protocol for the table's commander issuing `order`.
    ///
    /// Returns a decision for every general except the commander.
    pub fn run(&mut self, order: Order) -> Result<DecisionVector> {
        let commander = self.roles.commander();
        let acting = ActingCommanders::new(commander);
        let decisions = self.consensus(self.rounds, &acting, order)?;

        for general in (0..self.roles.len()).filter(|&g| g != commander) {
            decisions.decision_for(general)?;
        }

        debug!(
            commander,
            %order,
            rounds = self.rounds,
            messages = self.messages,
            "oral messages finished"
        );
        Ok(decisions)
    }

    /// One frame of OM(`depth`) commanded by `acting.current()`, which holds
    /// `value_from_parent`.
    pub fn consensus(
        &mut self,
        depth: usize,
        acting: &ActingCommanders,
        value_from_parent: Order,
    ) -> Result<DecisionVector> {
        let expected = (self.rounds + 1).checked_sub(depth);
        if expected != Some(acting.len()) {
            return Err(ProtocolError::ChainLength {
                depth,
                expected: expected.unwrap_or(0),
                actual: acting.len(),
            });
        }

        let commander = acting.current();
        let lieutenants: Vec<GeneralId> = (0..self.roles.len())
            .filter(|&g| !acting.contains(g))
            .collect();

        let mut grid = MessageGrid::new(self.roles.len());
        for &lieutenant in &lieutenants {
            let sent = self.send(commander, lieutenant, value_from_parent)?;
            grid.record(commander, lieutenant, sent)?;
        }

        let mut senders = vec![commander];
        if depth > 0 {
            for &sub in &lieutenants {
                let held = grid.get(commander, sub).ok_or(ProtocolError::UnsetValue {
                    sender: commander,
                    receiver: sub,
                })?;
                let branch = acting.with(sub)?;
                let reports = self.consensus(depth - 1, &branch, held)?;

                for &receiver in lieutenants.iter().filter(|&&r| r != sub) {
                    grid.record(sub, receiver, reports.decision_for(receiver)?)?;
                }
            }
            senders.extend_from_slice(&lieutenants);
        }

        trace!(
            depth,
            commander,
            chain = ?acting.members(),
            "message grid:\n{}",
            grid.render(acting)
        );

        let mut decisions = DecisionVector::default();
        for &lieutenant in &lieutenants {
            let ballots = grid.ballots_for(lieutenant, &senders);
            let decision = vote::majority(lieutenant, ballots, acting.ancestors())?;
            decisions.insert(lieutenant, decision);
        }
        Ok(decisions)
    }

    fn send(&mut self, sender: GeneralId, receiver: GeneralId, honest: Order) -> Result<Order> {
        let role = self.roles.role(sender).ok_or(ProtocolError::UnknownGeneral {
            general: sender,
            size: self.roles.len(),
        })?;
        self.messages += 1;
        Ok(match role {
            Role::Loyal => honest,
            Role::Traitor => self.oracle.next_adversarial_value(&Relay {
                sender,
                receiver,
                honest,
            }),
        })
    }
}
