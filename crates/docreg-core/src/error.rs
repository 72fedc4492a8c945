//! # Validation Error Taxonomy
//!
//! Every failure in the save/submit pipeline is a user-facing validation
//! error that aborts the whole operation. Each variant names the offending
//! entity where one exists, and [`ValidationError::class`] sorts the
//! variants into the four failure classes consumers report on.

use thiserror::Error;

use crate::identity::{ApplicationId, DocumentCategoryId, DocumentTypeId, EmployeeId};

/// The four classes of validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationClass {
    /// A conditionally required field is absent.
    MissingField,
    /// A referenced record could not be resolved.
    Lookup,
    /// Master data is misconfigured.
    DataIntegrity,
    /// A business rule was violated.
    BusinessRule,
}

/// A validation failure raised by the document lifecycle pipeline.
///
/// Failures are fail-fast: the first error aborts the save or submit and
/// nothing is persisted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    // ─── Missing required fields ─────────────────────────────────────

    /// Expiry override is enabled without a stated reason.
    #[error("Override Reason is required when Expiry Override is enabled")]
    OverrideReasonRequired,

    /// Applicant type is Employee but no employee link is set.
    #[error("Employee is required when Applicant Type is Employee")]
    EmployeeRequired,

    /// External applicant without a full name.
    #[error("Full Name is required for an External applicant")]
    FullNameRequired,

    /// Expiry derivation needs an issue date that is not set.
    #[error("Issue Date is required before Issuing")]
    IssueDateRequired,

    /// Renewal/Extension with no resolvable predecessor.
    #[error("Previous Document is required")]
    PredecessorRequired,

    // ─── Lookup failures ─────────────────────────────────────────────

    /// The linked employee has no usable name record.
    #[error("Unable to fetch Employee Name for {employee}")]
    EmployeeNameLookup {
        /// The employee key that failed to resolve.
        employee: EmployeeId,
    },

    /// The linked employee's personal details could not be fetched.
    #[error("Unable to fetch Employee details for {employee}")]
    EmployeeDetailsLookup {
        /// The employee key that failed to resolve.
        employee: EmployeeId,
    },

    /// The referenced document type does not exist.
    #[error("Document Type {document_type} could not be resolved")]
    DocumentTypeLookup {
        /// The document type key that failed to resolve.
        document_type: DocumentTypeId,
    },

    /// The referenced document category does not exist.
    #[error("Document Category {category} could not be resolved")]
    DocumentCategoryLookup {
        /// The category key that failed to resolve.
        category: DocumentCategoryId,
    },

    /// An explicit chain link points at a record that does not exist.
    #[error("Previous document {id} could not be resolved")]
    PredecessorLookup {
        /// The dangling predecessor reference.
        id: ApplicationId,
    },

    // ─── Master-data integrity ───────────────────────────────────────

    /// The document type has no category configured.
    #[error("Document Category is not defined in Document Type {document_type}")]
    CategoryNotConfigured {
        /// The misconfigured document type.
        document_type: DocumentTypeId,
    },

    /// The document type expires but has no validity window configured.
    #[error("Validity Days not defined in Document Type {document_type}")]
    ValidityDaysNotConfigured {
        /// The misconfigured document type.
        document_type: DocumentTypeId,
    },

    /// A chain predecessor carries no expiry date to carry forward.
    #[error("Previous document {id} has no expiry date to carry forward")]
    PredecessorMissingExpiry {
        /// The predecessor with the missing expiry date.
        id: ApplicationId,
    },

    /// The derived expiry window runs past the end of the calendar.
    #[error("Expiry window for Document Type {document_type} exceeds the supported calendar")]
    ExpiryOutOfRange {
        /// The document type whose window overflowed.
        document_type: DocumentTypeId,
    },

    // ─── Business rules ──────────────────────────────────────────────

    /// The derived category is flagged inactive.
    #[error("Selected Document Category is inactive")]
    CategoryInactive,

    /// The chosen document type is flagged inactive.
    #[error("Selected Document Type is inactive")]
    DocumentTypeInactive,

    /// The document type is not configured under the chosen category.
    #[error("Document Type does not belong to selected Category")]
    CategoryMismatch,

    /// The document type does not permit renewal.
    #[error("Renewal is not allowed for this Document Type")]
    RenewalNotAllowed,

    /// The chain predecessor was never submitted.
    #[error("This application cannot be {action} because the previous document {id} is not submitted")]
    PredecessorNotSubmitted {
        /// The unsubmitted predecessor.
        id: ApplicationId,
        /// "renewed" or "extended", per the transaction kind.
        action: String,
    },

    /// The chain predecessor is not in a chain-eligible status.
    #[error("Only Active / Issued documents can be {action}; {id} is {status}")]
    PredecessorNotChainable {
        /// The ineligible predecessor.
        id: ApplicationId,
        /// The predecessor's current status label.
        status: String,
        /// "renewed" or "extended", per the transaction kind.
        action: String,
    },

    /// The chain predecessor was issued for a different document type.
    #[error("Transaction must be for the same Document Type")]
    PredecessorTypeMismatch,

    /// Another Active document exists for the same applicant and type.
    #[error("Another Active document already exists for this applicant and document type")]
    DuplicateActive,

    /// Expiry date does not fall strictly after the issue date.
    #[error("Expiry Date must be after Issue Date")]
    ExpiryBeforeIssue,

    /// Submission attempted on a record that is not in Draft.
    #[error("Only Draft applications can be submitted; {id} is {docstatus}")]
    NotSubmittable {
        /// The record that cannot be submitted.
        id: ApplicationId,
        /// Its current docstatus label.
        docstatus: String,
    },
}

impl ValidationError {
    /// The failure class of this error.
    pub fn class(&self) -> ValidationClass {
        match self {
            Self::OverrideReasonRequired
            | Self::EmployeeRequired
            | Self::FullNameRequired
            | Self::IssueDateRequired
            | Self::PredecessorRequired => ValidationClass::MissingField,

            Self::EmployeeNameLookup { .. }
            | Self::EmployeeDetailsLookup { .. }
            | Self::DocumentTypeLookup { .. }
            | Self::DocumentCategoryLookup { .. }
            | Self::PredecessorLookup { .. } => ValidationClass::Lookup,

            Self::CategoryNotConfigured { .. }
            | Self::ValidityDaysNotConfigured { .. }
            | Self::PredecessorMissingExpiry { .. }
            | Self::ExpiryOutOfRange { .. } => ValidationClass::DataIntegrity,

            Self::CategoryInactive
            | Self::DocumentTypeInactive
            | Self::CategoryMismatch
            | Self::RenewalNotAllowed
            | Self::PredecessorNotSubmitted { .. }
            | Self::PredecessorNotChainable { .. }
            | Self::PredecessorTypeMismatch
            | Self::DuplicateActive
            | Self::ExpiryBeforeIssue
            | Self::NotSubmittable { .. } => ValidationClass::BusinessRule,
        }
    }
}
