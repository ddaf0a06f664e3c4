//! Parameter precondition.

use crate::error::ProtocolError;
use crate::Result;

/// Returns true iff both counts are positive and `generals > 3 * traitors`.
///
/// ```
/// use byzantine_protocol::validate_parameters;
///
/// assert!(!validate_parameters(4, 0));
/// assert!(!validate_parameters(3, 1));
/// assert!(validate_parameters(4, 1));
/// assert!(validate_parameters(7, 2));
/// ```
pub fn validate_parameters(generals: usize, traitors: usize) -> bool {
    generals != 0
        && traitors != 0
        && traitors
            .checked_mul(3)
            .map_or(false, |bound| generals > bound)
}

/// Like [`validate_parameters`], but returns the violation as an error.
pub fn ensure_parameters(generals: usize, traitors: usize) -> Result<()> {
    if validate_parameters(generals, traitors) {
        Ok(())
    } else {
        Err(ProtocolError::PreconditionViolated { generals, traitors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_counts() {
        assert!(!validate_parameters(0, 0));
        assert!(!validate_parameters(0, 1));
        assert!(!validate_parameters(10, 0));
    }

    #[test]
    fn test_boundary() {
        assert!(!validate_parameters(3, 1));
        assert!(validate_parameters(4, 1));
        assert!(!validate_parameters(6, 2));
        assert!(validate_parameters(7, 2));
        assert!(!validate_parameters(9, 3));
        assert!(validate_parameters(10, 3));
    }

    #[test]
    fn test_huge_traitor_count_does_not_overflow() {
        assert!(!validate_parameters(usize::MAX, usize::MAX));
    }

    #[test]
    fn test_ensure_reports_counts() {
        assert!(ensure_parameters(7, 2).is_ok());
        match ensure_parameters(6, 2) {
            Err(ProtocolError::PreconditionViolated { generals, traitors }) => {
                assert_eq!((generals, traitors), (6, 2));
            }
            other => panic!("Expected PreconditionViolated, got {:?}", other),
        }
    }
}
