//! Validated army size.

use byzantine_protocol::ensure_parameters;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Result;

/// Generals and traitors satisfying `N > 3F` with both positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    generals: usize,
    traitors: usize,
}

impl Parameters {
    /// Checks the precondition and wraps the counts.
    pub fn new(generals: usize, traitors: usize) -> Result<Self> {
        ensure_parameters(generals, traitors)?;
        Ok(Self { generals, traitors })
    }

    /// Total number of generals, `N`.
    pub fn generals(&self) -> usize {
        self.generals
    }

    /// Number of traitors, `F`. Also the OM recursion depth.
    pub fn traitors(&self) -> usize {
        self.traitors
    }

    /// Message rounds per trial (`F + 1`).
    pub fn message_rounds(&self) -> usize {
        self.traitors + 1
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N={}, F={}", self.generals, self.traitors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimError;
    use byzantine_protocol::ProtocolError;

    #[test]
    fn test_valid_parameters() {
        let params = Parameters::new(7, 2).unwrap();
        assert_eq!(params.generals(), 7);
        assert_eq!(params.traitors(), 2);
        assert_eq!(params.message_rounds(), 3);
        assert_eq!(params.to_string(), "N=7, F=2");
    }

    #[test]
    fn test_invalid_parameters() {
        for (n, f) in [(4, 0), (0, 1), (3, 1), (6, 2)] {
            assert!(matches!(
                Parameters::new(n, f),
                Err(SimError::Protocol(ProtocolError::PreconditionViolated { .. }))
            ));
        }
    }
}
