//! Submission status state machine.
//!
//! ```text
//! Draft ──submit──▶ Submitted ──review──▶ InReview ──review──▶ Approved
//!                       │                    └───────review──▶ Rejected
//!                       └──review──▶ Approved | Rejected
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubmissionStatus {
    /// Saved but not yet sent; editable by its owner.
    Draft,
    Submitted,
    #[serde(rename = "In Review")]
    InReview,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 5] = [
        SubmissionStatus::Draft,
        SubmissionStatus::Submitted,
        SubmissionStatus::InReview,
        SubmissionStatus::Approved,
        SubmissionStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Draft => "Draft",
            SubmissionStatus::Submitted => "Submitted",
            SubmissionStatus::InReview => "In Review",
            SubmissionStatus::Approved => "Approved",
            SubmissionStatus::Rejected => "Rejected",
        }
    }

    /// Targets reachable through review from this status.
    ///
    /// Drafts leave `Draft` only by being submitted, never through review.
    pub fn review_targets(&self) -> Vec<Self> {
        match self {
            SubmissionStatus::Draft => vec![],
            _ => self.valid_transitions(),
        }
    }

    /// Returns true if a reviewer may move this status to `target`.
    pub fn can_review_to(&self, target: &Self) -> bool {
        self.review_targets().contains(target)
    }

    pub fn is_draft(&self) -> bool {
        matches!(self, SubmissionStatus::Draft)
    }
}

impl StateMachine for SubmissionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubmissionStatus::*;
        matches!(
            (self, target),
            (Draft, Submitted)
                | (Submitted, InReview)
                | (Submitted, Approved)
                | (Submitted, Rejected)
                | (InReview, Approved)
                | (InReview, Rejected)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubmissionStatus::*;
        match self {
            Draft => vec![Submitted],
            Submitted => vec![InReview, Approved, Rejected],
            InReview => vec![Approved, Rejected],
            Approved | Rejected => vec![],
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(SubmissionStatus::Draft),
            "submitted" => Ok(SubmissionStatus::Submitted),
            "inreview" => Ok(SubmissionStatus::InReview),
            "approved" => Ok(SubmissionStatus::Approved),
            "rejected" => Ok(SubmissionStatus::Rejected),
            _ => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", s),
            )),
        }
    }
}
