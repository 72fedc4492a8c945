//! # Document Status State Machine
//!
//! Two orthogonal status axes, matching the record's persistence model:
//!
//! - [`DocStatus`] — the persistence lifecycle: Draft (0), Submitted (1),
//!   Cancelled (2). Submission is one-way; the engine only submits Drafts.
//! - [`DocumentStatus`] — the business status of the document itself,
//!   from intake (Draft, Under Review, Waiting Docs) through issuance
//!   (Approved, Issued, Active) to the terminal outcomes (Renewed,
//!   Extended, Expired, Rejected, Cancelled).
//!
//! The engine performs exactly one transition on a record other than the
//! one being saved: superseding a chain predecessor. [`DocumentStatus::supersede`]
//! is that transition, and it only accepts `Active | Issued` sources and
//! `Renewed | Extended` targets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Persistence Status ──────────────────────────────────────────────

/// The persistence lifecycle of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocStatus {
    /// Editable draft.
    Draft,
    /// Submitted; immutable to ordinary edits.
    Submitted,
    /// Cancelled after submission.
    Cancelled,
}

impl DocStatus {
    /// Numeric code used by the persistence convention (0/1/2).
    pub fn as_code(&self) -> u8 {
        match self {
            Self::Draft => 0,
            Self::Submitted => 1,
            Self::Cancelled => 2,
        }
    }

    /// Decode the numeric persistence convention.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Draft),
            1 => Some(Self::Submitted),
            2 => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Human label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for DocStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Document Status ─────────────────────────────────────────────────

/// The business status of a document application.
///
/// Serialized with the human labels ("Under Review", "Waiting Docs", ...)
/// so stored data matches what operators see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Record created, not yet routed.
    Draft,
    /// Routed for processing.
    Submitted,
    /// Under review by the issuing authority.
    #[serde(rename = "Under Review")]
    UnderReview,
    /// Waiting on supporting documents from the applicant.
    #[serde(rename = "Waiting Docs")]
    WaitingDocs,
    /// Approved, not yet issued.
    Approved,
    /// Rejected by the issuing authority.
    Rejected,
    /// Document issued to the applicant.
    Issued,
    /// Document in force.
    Active,
    /// Superseded by a submitted Renewal.
    Renewed,
    /// Superseded by a submitted Extension.
    Extended,
    /// Validity window has lapsed.
    Expired,
    /// Cancelled after issuance.
    Cancelled,
}

impl DocumentStatus {
    /// Whether a chain successor (Renewal/Extension) may attach to a
    /// document in this status.
    pub fn is_chainable(&self) -> bool {
        matches!(self, Self::Active | Self::Issued)
    }

    /// Human label, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under Review",
            Self::WaitingDocs => "Waiting Docs",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Issued => "Issued",
            Self::Active => "Active",
            Self::Renewed => "Renewed",
            Self::Extended => "Extended",
            Self::Expired => "Expired",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Supersede this document in favour of a submitted chain successor.
    ///
    /// The only cross-record transition in the system: `Active | Issued`
    /// into `Renewed | Extended`. Everything else is rejected.
    pub fn supersede(self, to: DocumentStatus) -> Result<DocumentStatus, StatusError> {
        if !self.is_chainable() || !matches!(to, Self::Renewed | Self::Extended) {
            return Err(StatusError::InvalidTransition { from: self, to });
        }
        Ok(to)
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by document status transitions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusError {
    /// Attempted transition is not allowed by the state machine.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status.
        from: DocumentStatus,
        /// Attempted target status.
        to: DocumentStatus,
    },
}

// ─── Tests ───────────────────────────────────────────────────────────
