//! Per-frame message grid.

use std::fmt::Write;

use crate::acting::ActingCommanders;
use crate::error::ProtocolError;
use crate::order::{GeneralId, Order};
use crate::Result;

/// One value as seen by a receiver, tagged with who sent it.
///
/// `value` is `None` while the cell is UNSET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ballot {
    /// General that sent the value.
    pub sender: GeneralId,
    /// The value, or `None` if nothing was recorded.
    pub value: Option<Order>,
}

impl Ballot {
    /// A ballot carrying a concrete order.
    pub fn new(sender: GeneralId, value: Order) -> Self {
        Self {
            sender,
            value: Some(value),
        }
    }
}

/// Square (sender, receiver) table of the values exchanged in one
/// recursion frame.
///
/// Built fresh per frame, filled before any vote is counted, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageGrid {
    size: usize,
    cells: Vec<Option<Order>>,
}

impl MessageGrid {
    /// Creates an all-UNSET grid for `size` generals.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Records the value `sender` delivered to `receiver`.
    ///
    /// Each cell may be written once per frame; ids must be below the
    /// grid size.
    pub fn record(&mut self, sender: GeneralId, receiver: GeneralId, value: Order) -> Result<()> {
        let idx = self.index(sender, receiver)?;
        if self.cells[idx].is_some() {
            return Err(ProtocolError::DuplicateMessage { sender, receiver });
        }
        self.cells[idx] = Some(value);
        Ok(())
    }

    /// The value `sender` delivered to `receiver`, if any.
    ///
    /// Out-of-range ids read as UNSET.
    pub fn get(&self, sender: GeneralId, receiver: GeneralId) -> Option<Order> {
        self.index(sender, receiver)
            .ok()
            .and_then(|idx| self.cells[idx])
    }

    /// The column of `receiver` restricted to `senders`, skipping the
    /// receiver itself.
    pub fn ballots_for(&self, receiver: GeneralId, senders: &[GeneralId]) -> Vec<Ballot> {
        senders
            .iter()
            .filter(|&&sender| sender != receiver)
            .map(|&sender| Ballot {
                sender,
                value: self.get(sender, receiver),
            })
            .collect()
    }

    /// Renders the grid as `A`/`R`/`?` rows, one per sender.
    ///
    /// Rows of ancestors and columns of every acting commander are hidden,
    /// since none of them take part in this frame's exchange.
    pub fn render(&self, acting: &ActingCommanders) -> String {
        let mut out = String::new();
        for sender in (0..self.size).filter(|s| !acting.ancestors().contains(s)) {
            let _ = write!(out, "{:>3} |", sender);
            for receiver in (0..self.size).filter(|&r| !acting.contains(r)) {
                let cell = self.get(sender, receiver).map_or('?', Order::short);
                let _ = write!(out, " {}", cell);
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, sender: GeneralId, receiver: GeneralId) -> Result<usize> {
        for general in [sender, receiver] {
            if general >= self.size {
                return Err(ProtocolError::UnknownGeneral {
                    general,
                    size: self.size,
                });
            }
        }
        Ok(sender * self.size + receiver)
    }
}
