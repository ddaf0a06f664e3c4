//! The chain of acting commanders on the current recursion path.
//!
//! Each recursive frame receives its own extended copy; siblings never see
//! each other's additions, so there is nothing to undo after a call returns.

use crate::error::ProtocolError;
use crate::order::GeneralId;
use crate::Result;

/// Generals currently playing commander somewhere above or at this frame,
/// top-level commander first and the frame's own commander last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingCommanders {
    chain: Vec<GeneralId>,
}

impl ActingCommanders {
    /// Starts a chain at the top-level commander.
    pub fn new(commander: GeneralId) -> Self {
        Self {
            chain: vec![commander],
        }
    }

    /// Returns a copy extended with `general` as the new current commander.
    pub fn with(&self, general: GeneralId) -> Result<Self> {
        if self.contains(general) {
            return Err(ProtocolError::AlreadyActing(general));
        }
        let mut chain = Vec::with_capacity(self.chain.len() + 1);
        chain.extend_from_slice(&self.chain);
        chain.push(general);
        Ok(Self { chain })
    }

    /// The commander of the current frame.
    pub fn current(&self) -> GeneralId {
        // `new` seeds the chain and `with` only appends.
        self.chain[self.chain.len() - 1]
    }

    /// Commanders above the current one.
    pub fn ancestors(&self) -> &[GeneralId] {
        &self.chain[..self.chain.len() - 1]
    }

    /// Returns true if `general` is on the chain.
    pub fn contains(&self, general: GeneralId) -> bool {
        self.chain.contains(&general)
    }

    /// Number of acting commanders.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false for a chain built through [`ActingCommanders::new`].
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Members in the order they took command.
    pub fn members(&self) -> &[GeneralId] {
        &self.chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_chain() {
        let acting = ActingCommanders::new(3);
        assert_eq!(acting.current(), 3);
        assert!(acting.ancestors().is_empty());
        assert_eq!(acting.len(), 1);
        assert!(!acting.is_empty());
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let root = ActingCommanders::new(0);
        let left = root.with(1).unwrap();
        let right = root.with(2).unwrap();

        assert_eq!(root.members(), &[0]);
        assert_eq!(left.members(), &[0, 1]);
        assert_eq!(right.members(), &[0, 2]);
        assert!(!right.contains(1));
        assert_eq!(left.ancestors(), &[0]);
        assert_eq!(left.current(), 1);
    }

    #[test]
    fn test_with_rejects_existing_member() {
        let acting = ActingCommanders::new(0).with(4).unwrap();
        assert!(matches!(acting.with(0), Err(ProtocolError::AlreadyActing(0))));
        assert!(matches!(acting.with(4), Err(ProtocolError::AlreadyActing(4))));
    }
}
