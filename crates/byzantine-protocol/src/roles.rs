//! Role assignment.
//!
//! One commander and `F` distinct traitors are drawn uniformly from
//! `0..N`. The commander is drawn independently, so it may or may not be
//! one of the traitors.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::ProtocolError;
use crate::order::{GeneralId, Role};
use crate::Result;

/// Roles of every general for one trial, plus the top-level commander.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTable {
    commander: GeneralId,
    roles: Vec<Role>,
}

impl RoleTable {
    /// Draws a commander and `traitors` distinct traitors from `0..generals`.
    ///
    /// Traitor ids are retried on collision. `N > 3F` is the caller's
    /// responsibility; this only refuses inputs it cannot satisfy at all.
    pub fn assign<R: Rng + ?Sized>(generals: usize, traitors: usize, rng: &mut R) -> Result<Self> {
        if generals == 0 || traitors > generals {
            return Err(ProtocolError::InvalidRoleTable(format!(
                "cannot pick {} traitors among {} generals",
                traitors, generals
            )));
        }

        let commander = rng.gen_range(0..generals);
        let mut roles = vec![Role::Loyal; generals];
        for _ in 0..traitors {
            let mut candidate = rng.gen_range(0..generals);
            while roles[candidate] == Role::Traitor {
                candidate = rng.gen_range(0..generals);
            }
            roles[candidate] = Role::Traitor;
        }

        let table = Self { commander, roles };
        debug!(
            commander,
            traitors = ?table.traitors(),
            "assigned roles for {} generals", generals
        );
        Ok(table)
    }

    /// Builds a table with the given commander and traitor ids.
    pub fn fixed(generals: usize, commander: GeneralId, traitors: &[GeneralId]) -> Result<Self> {
        if commander >= generals {
            return Err(ProtocolError::InvalidRoleTable(format!(
                "commander {} out of range for {} generals",
                commander, generals
            )));
        }

        let mut roles = vec![Role::Loyal; generals];
        for &traitor in traitors {
            match roles.get_mut(traitor) {
                Some(role) if *role == Role::Loyal => *role = Role::Traitor,
                Some(_) => {
                    return Err(ProtocolError::InvalidRoleTable(format!(
                        "traitor {} listed twice",
                        traitor
                    )))
                }
                None => {
                    return Err(ProtocolError::InvalidRoleTable(format!(
                        "traitor {} out of range for {} generals",
                        traitor, generals
                    )))
                }
            }
        }

        Ok(Self { commander, roles })
    }

    /// The top-level commander.
    pub fn commander(&self) -> GeneralId {
        self.commander
    }

    /// Number of generals.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns true if there are no generals.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Role of `general`, or `None` if the id is not in the army.
    pub fn role(&self, general: GeneralId) -> Option<Role> {
        self.roles.get(general).copied()
    }

    /// Returns true if `general` is in the army and loyal.
    pub fn is_loyal(&self, general: GeneralId) -> bool {
        self.role(general) == Some(Role::Loyal)
    }

    /// Returns true if the top-level commander is loyal.
    pub fn commander_is_loyal(&self) -> bool {
        self.is_loyal(self.commander)
    }

    /// All roles, indexed by general id.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Traitor ids in ascending order.
    pub fn traitors(&self) -> Vec<GeneralId> {
        self.ids_with(Role::Traitor)
    }

    /// Loyal generals other than the commander, ascending.
    pub fn loyal_lieutenants(&self) -> Vec<GeneralId> {
        self.ids_with(Role::Loyal)
            .into_iter()
            .filter(|&g| g != self.commander)
            .collect()
    }

    fn ids_with(&self, wanted: Role) -> Vec<GeneralId> {
        self.roles
            .iter()
            .enumerate()
            .filter(|&(_, &role)| role == wanted)
            .map(|(id, _)| id)
            .collect()
    }
}

impl fmt::Display for RoleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "commander: {}", self.commander)?;
        let labels: Vec<String> = self.roles.iter().map(Role::to_string).collect();
        write!(f, "roles: {}", labels.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_assign_marks_exact_traitor_count() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let table = RoleTable::assign(7, 2, &mut rng).unwrap();
            assert_eq!(table.len(), 7);
            assert_eq!(table.traitors().len(), 2);
            assert!(table.commander() < 7);
        }
    }

    #[test]
    fn test_assign_picks_every_commander_eventually() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 4];
        for _ in 0..500 {
            seen[RoleTable::assign(4, 1, &mut rng).unwrap().commander()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_assign_rejects_impossible_counts() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(RoleTable::assign(0, 0, &mut rng).is_err());
        assert!(RoleTable::assign(2, 3, &mut rng).is_err());
    }

    #[test]
    fn test_fixed_table() {
        let table = RoleTable::fixed(4, 0, &[2]).unwrap();
        assert_eq!(table.commander(), 0);
        assert!(table.commander_is_loyal());
        assert_eq!(table.role(2), Some(Role::Traitor));
        assert_eq!(table.traitors(), vec![2]);
        assert_eq!(table.loyal_lieutenants(), vec![1, 3]);
    }

    #[test]
    fn test_role_out_of_range_is_none() {
        let table = RoleTable::fixed(4, 0, &[2]).unwrap();
        assert_eq!(table.role(3), Some(Role::Loyal));
        assert_eq!(table.role(4), None);
        assert!(!table.is_loyal(4));
    }

    #[test]
    fn test_fixed_rejects_bad_ids() {
        assert!(RoleTable::fixed(4, 4, &[]).is_err());
        assert!(RoleTable::fixed(4, 0, &[5]).is_err());
        assert!(RoleTable::fixed(4, 0, &[1, 1]).is_err());
    }

    #[test]
    fn test_display_lists_roles() {
        let table = RoleTable::fixed(3, 1, &[0]).unwrap();
        assert_eq!(table.to_string(), "commander: 1\nroles: Traitor, Loyal, Loyal");
    }
}
