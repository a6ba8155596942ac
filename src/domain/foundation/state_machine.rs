//! State machine trait for status enums.
//!
//! Implementors expose their transition graph as a static lookup table;
//! validation, terminal detection and error reporting are derived from it.

use std::fmt;

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ResumeStatus {
///     fn valid_transitions(&self) -> &'static [Self] {
///         match self {
///             Draft => &[Generated],
///             Generated => &[Reviewed, Draft],
///             // ... etc
///         }
///     }
/// }
///
/// let next = current.transition_to(ResumeStatus::Reviewed)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + fmt::Debug + fmt::Display + 'static {
    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> &'static [Self];

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot transition from {} to {}", self, target),
            )
            .with_detail("from", self.to_string())
            .with_detail("to", target.to_string()))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
