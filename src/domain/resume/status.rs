//! Resume lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};

/// Lifecycle of a tailored resume, from draft to the application outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeStatus {
    #[default]
    Draft,
    Generated,
    Reviewed,
    Submitted,
    Interview,
    Accepted,
    Rejected,
}

use ResumeStatus::*;

/// Full transition table, one row per source state.
static TRANSITIONS: [(ResumeStatus, &[ResumeStatus]); 7] = [
    (Draft, &[Generated]),
    (Generated, &[Reviewed, Draft]),
    (Reviewed, &[Submitted, Generated]),
    (Submitted, &[Interview]),
    (Interview, &[Accepted, Rejected]),
    (Accepted, &[]),
    (Rejected, &[]),
];

impl ResumeStatus {
    pub const ALL: [ResumeStatus; 7] = [
        Draft, Generated, Reviewed, Submitted, Interview, Accepted, Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Draft => "draft",
            Generated => "generated",
            Reviewed => "reviewed",
            Submitted => "submitted",
            Interview => "interview",
            Accepted => "accepted",
            Rejected => "rejected",
        }
    }

    /// True for the states a tailoring run may start from.
    pub fn allows_generation(&self) -> bool {
        matches!(self, Draft | Generated)
    }
}

impl StateMachine for ResumeStatus {
    fn valid_transitions(&self) -> &'static [Self] {
        TRANSITIONS
            .iter()
            .find(|(from, _)| from == self)
            .map(|(_, to)| *to)
            .unwrap_or(&[])
    }
}

impl fmt::Display for ResumeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResumeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == needle)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::InvalidResumeStatus,
                    format!("Unknown resume status '{}'", s),
                )
                .with_detail("value", s)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn allowed(from: ResumeStatus, to: ResumeStatus) -> bool {
        matches!(
            (from, to),
            (Draft, Generated)
                | (Generated, Reviewed)
                | (Generated, Draft)
                | (Reviewed, Submitted)
                | (Reviewed, Generated)
                | (Submitted, Interview)
                | (Interview, Accepted)
                | (Interview, Rejected)
        )
    }

    fn any_status() -> impl Strategy<Value = ResumeStatus> {
        prop::sample::select(ResumeStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn transition_succeeds_iff_listed(from in any_status(), to in any_status()) {
            let result = from.transition_to(to);
            prop_assert_eq!(result.is_ok(), allowed(from, to));
            if let Err(err) = result {
                prop_assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
                prop_assert_eq!(err.detail("from"), Some(from.as_str()));
                prop_assert_eq!(err.detail("to"), Some(to.as_str()));
            }
        }
    }

    #[test]
    fn every_state_has_a_table_row() {
        for status in ResumeStatus::ALL {
            assert!(TRANSITIONS.iter().any(|(from, _)| *from == status));
        }
    }

    #[test]
    fn only_outcomes_are_terminal() {
        let terminal: Vec<_> = ResumeStatus::ALL
            .into_iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![Accepted, Rejected]);
    }

    #[test]
    fn generation_is_legal_from_draft_and_generated() {
        assert!(Draft.allows_generation());
        assert!(Generated.allows_generation());
        assert!(!Reviewed.allows_generation());
        assert!(!Accepted.allows_generation());
    }

    #[test]
    fn parses_known_values_and_rejects_unknown() {
        assert_eq!("Interview".parse::<ResumeStatus>().unwrap(), Interview);
        let err = "hired".parse::<ResumeStatus>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidResumeStatus);
        assert_eq!(err.detail("value"), Some("hired"));
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Submitted).unwrap(), "\"submitted\"");
    }
}
