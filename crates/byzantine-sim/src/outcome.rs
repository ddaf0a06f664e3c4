//! Trial outcomes and their verification.

use byzantine_protocol::{DecisionVector, GeneralId, Order, RoleTable};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SimError;
use crate::Result;

/// Everything one trial produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// The top-level commander.
    pub commander: GeneralId,
    /// Roles for the trial.
    pub roles: RoleTable,
    /// The commander's order.
    pub order: Order,
    /// Final decision of every general except the commander.
    pub decisions: DecisionVector,
    /// Messages sent during the trial.
    pub messages: u64,
}

/// The order loyal lieutenants agreed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consensus {
    /// Agreed order.
    pub order: Order,
    /// Whether the top-level commander was loyal.
    pub loyal_commander: bool,
    /// Number of loyal lieutenants that took part.
    pub loyal_lieutenants: usize,
}

impl TrialOutcome {
    /// Checks Agreement and, for a loyal commander, Validity.
    pub fn verify(&self) -> Result<Consensus> {
        let mut attack = Vec::new();
        let mut retreat = Vec::new();
        for general in self.roles.loyal_lieutenants() {
            match self.decisions.decision_for(general)? {
                Order::Attack => attack.push(general),
                Order::Retreat => retreat.push(general),
            }
        }

        let agreed = match (attack.is_empty(), retreat.is_empty()) {
            (true, true) => return Err(SimError::NoLoyalLieutenants),
            (false, true) => Order::Attack,
            (true, false) => Order::Retreat,
            (false, false) => return Err(SimError::Disagreement { attack, retreat }),
        };

        let loyal_commander = self.roles.commander_is_loyal();
        if loyal_commander && agreed != self.order {
            return Err(SimError::ValidityViolated {
                commander: self.commander,
                order: self.order,
                decided: agreed,
            });
        }

        Ok(Consensus {
            order: agreed,
            loyal_commander,
            loyal_lieutenants: attack.len() + retreat.len(),
        })
    }
}

impl fmt::Display for TrialOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.roles)?;
        writeln!(f, "order: {}", self.order)?;
        write!(f, "decisions:")?;
        for (general, decision) in self.decisions.iter() {
            let role = self
                .roles
                .role(general)
                .map_or_else(|| "?".to_string(), |role| role.to_string());
            write!(f, "\n  general {:>3} ({}): {}", general, role, decision)?;
        }
        Ok(())
    }
}

/// Aggregate over a batch of verified trials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSummary {
    /// Trials run.
    pub trials: usize,
    /// Trials with a loyal commander.
    pub loyal_commander: usize,
    /// Trials with a traitor commander.
    pub traitor_commander: usize,
    /// Trials where loyal generals agreed on ATTACK.
    pub agreed_attack: usize,
    /// Trials where loyal generals agreed on RETREAT.
    pub agreed_retreat: usize,
    /// Messages sent across all trials.
    pub messages: u64,
}

impl TrialSummary {
    /// Adds one verified trial.
    pub fn record(&mut self, outcome: &TrialOutcome, consensus: &Consensus) {
        self.trials += 1;
        if consensus.loyal_commander {
            self.loyal_commander += 1;
        } else {
            self.traitor_commander += 1;
        }
        match consensus.order {
            Order::Attack => self.agreed_attack += 1,
            Order::Retreat => self.agreed_retreat += 1,
        }
        self.messages += outcome.messages;
    }
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "trials: {}", self.trials)?;
        writeln!(
            f,
            "commander: {} loyal, {} traitor",
            self.loyal_commander, self.traitor_commander
        )?;
        writeln!(
            f,
            "agreed: {} ATTACK, {} RETREAT",
            self.agreed_attack, self.agreed_retreat
        )?;
        write!(f, "messages: {}", self.messages)
    }
}
