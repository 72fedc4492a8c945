//! # Document Application Record
//!
//! The central entity: one compliance document per record, from intake
//! through issuance, renewal, and extension. Pure data — the save-time
//! pipeline that validates and derives fields lives in `docreg-engine`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use docreg_core::{ApplicantId, ApplicationId, DocumentCategoryId, DocumentTypeId, EmployeeId};

use crate::status::{DocStatus, DocumentStatus};

// ─── Applicant Type ──────────────────────────────────────────────────

/// Whether the applicant is an employee or an external person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicantType {
    /// Applicant is an employee; name and personal details are mirrored
    /// from the HR record on every save.
    Employee,
    /// External person; user-entered details are kept untouched.
    External,
}

// ─── Transaction Kind ────────────────────────────────────────────────

/// The renewal/extension chain link carried by a chain transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    /// The predecessor this transaction renews or extends. Left empty by
    /// the caller, it is auto-discovered at save time.
    pub predecessor: Option<ApplicationId>,
    /// Cached copy of the predecessor's expiry date, captured when the
    /// link is populated.
    pub cached_expiry: Option<NaiveDate>,
}

/// The transaction kind, with the chain link embedded in the variants
/// that have one. Which link a record uses is decided by pattern match,
/// not by field-name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "transaction_type")]
pub enum TransactionKind {
    /// First issuance of a document.
    #[serde(rename = "New Application")]
    NewApplication,
    /// Renewal of an Active or Issued predecessor.
    Renewal(ChainLink),
    /// Extension of an Active or Issued predecessor.
    Extension(ChainLink),
}

impl TransactionKind {
    /// Human label, matching the serialized tag.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NewApplication => "New Application",
            Self::Renewal(_) => "Renewal",
            Self::Extension(_) => "Extension",
        }
    }

    /// Whether this transaction participates in a predecessor chain.
    pub fn is_chain(&self) -> bool {
        self.chain().is_some()
    }

    /// The chain link, for Renewal and Extension transactions.
    pub fn chain(&self) -> Option<&ChainLink> {
        match self {
            Self::NewApplication => None,
            Self::Renewal(link) | Self::Extension(link) => Some(link),
        }
    }

    /// Mutable access to the chain link.
    pub fn chain_mut(&mut self) -> Option<&mut ChainLink> {
        match self {
            Self::NewApplication => None,
            Self::Renewal(link) | Self::Extension(link) => Some(link),
        }
    }

    /// Past-tense action label used in chain validation messages.
    pub fn action_label(&self) -> Option<&'static str> {
        match self {
            Self::NewApplication => None,
            Self::Renewal(_) => Some("renewed"),
            Self::Extension(_) => Some("extended"),
        }
    }

    /// The status a predecessor takes when this transaction is submitted.
    pub fn successor_status(&self) -> Option<DocumentStatus> {
        match self {
            Self::NewApplication => None,
            Self::Renewal(_) => Some(DocumentStatus::Renewed),
            Self::Extension(_) => Some(DocumentStatus::Extended),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ─── Supporting Documents ────────────────────────────────────────────

/// One row of the embedded supporting-document collection.
///
/// Rows derive their expiry independently of the parent record and of
/// each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportingDocument {
    /// The supporting document's type.
    pub document_type: Option<DocumentTypeId>,
    /// When the supporting document was issued.
    pub issue_date: Option<NaiveDate>,
    /// Derived at save time from the type's validity window.
    pub expiry_date: Option<NaiveDate>,
}

// ─── Document Application ────────────────────────────────────────────

/// A document application record.
///
/// Derived fields (`document_category`, `applicant_full_name`, the
/// mirrored personal details, `expiry_date`, `new_expiry_date`) are
/// overwritten by the save pipeline; values set by callers do not
/// survive a save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentApplication {
    /// Unique record identifier.
    pub id: ApplicationId,
    /// Persistence lifecycle state.
    pub docstatus: DocStatus,
    /// The applicant this document is issued to.
    pub applicant: ApplicantId,
    /// Employee or External.
    pub applicant_type: ApplicantType,
    /// HR employee link, required when `applicant_type` is Employee.
    pub employee: Option<EmployeeId>,
    /// Transaction kind with the embedded chain link.
    #[serde(flatten)]
    pub transaction: TransactionKind,
    /// The document type applied for.
    pub document_type: Option<DocumentTypeId>,
    /// Derived from the document type; never user-set.
    pub document_category: Option<DocumentCategoryId>,
    /// Business date of the application.
    pub posting_date: NaiveDate,
    /// When the document was (or will be) issued.
    pub issue_date: Option<NaiveDate>,
    /// Derived end of the validity window.
    pub expiry_date: Option<NaiveDate>,
    /// Prospective expiry of the next cycle, derived for chain
    /// transactions and kept separate from the carried-forward
    /// `expiry_date` until a downstream process promotes it.
    pub new_expiry_date: Option<NaiveDate>,
    /// Suppresses expiry derivation; requires `override_reason`.
    pub allow_expiry_override: bool,
    /// Stated reason for the expiry override.
    pub override_reason: Option<String>,
    /// Mirrored from the Employee record for Employee applicants.
    pub applicant_full_name: Option<String>,
    /// Mirrored from the Employee record for Employee applicants.
    pub date_of_birth: Option<NaiveDate>,
    /// Mirrored from the Employee record for Employee applicants.
    pub gender: Option<String>,
    /// Business status of the document.
    pub status: DocumentStatus,
    /// Embedded supporting-document rows.
    pub supporting_documents: Vec<SupportingDocument>,
    /// Creation instant, the ordering key for predecessor auto-discovery.
    pub created_at: DateTime<Utc>,
}

impl DocumentApplication {
    /// Create a new draft application.
    pub fn new(
        applicant: ApplicantId,
        applicant_type: ApplicantType,
        transaction: TransactionKind,
        posting_date: NaiveDate,
    ) -> Self {
        Self {
            id: ApplicationId::new(),
            docstatus: DocStatus::Draft,
            applicant,
            applicant_type,
            employee: None,
            transaction,
            document_type: None,
            document_category: None,
            posting_date,
            issue_date: None,
            expiry_date: None,
            new_expiry_date: None,
            allow_expiry_override: false,
            override_reason: None,
            applicant_full_name: None,
            date_of_birth: None,
            gender: None,
            status: DocumentStatus::Draft,
            supporting_documents: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft_renewal() -> DocumentApplication {
        DocumentApplication::new(
            ApplicantId::new("APP-0001"),
            ApplicantType::Employee,
            TransactionKind::Renewal(ChainLink::default()),
            date(2026, 4, 1),
        )
    }

    #[test]
    fn new_application_has_no_chain() {
        let kind = TransactionKind::NewApplication;
        assert!(!kind.is_chain());
        assert!(kind.chain().is_none());
        assert!(kind.action_label().is_none());
        assert!(kind.successor_status().is_none());
    }

    #[test]
    fn chain_kinds_expose_their_link() {
        let mut app = draft_renewal();
        let link = app.transaction.chain_mut().unwrap();
        link.predecessor = Some(ApplicationId::new());
        link.cached_expiry = Some(date(2026, 12, 31));

        let chain = app.transaction.chain().unwrap();
        assert!(chain.predecessor.is_some());
        assert_eq!(chain.cached_expiry, Some(date(2026, 12, 31)));
    }

    #[test]
    fn successor_statuses_follow_the_kind() {
        assert_eq!(
            TransactionKind::Renewal(ChainLink::default()).successor_status(),
            Some(DocumentStatus::Renewed)
        );
        assert_eq!(
            TransactionKind::Extension(ChainLink::default()).successor_status(),
            Some(DocumentStatus::Extended)
        );
    }

    #[test]
    fn action_labels_are_past_tense() {
        assert_eq!(
            TransactionKind::Renewal(ChainLink::default()).action_label(),
            Some("renewed")
        );
        assert_eq!(
            TransactionKind::Extension(ChainLink::default()).action_label(),
            Some("extended")
        );
    }

    #[test]
    fn transaction_tag_serializes_with_label() {
        let json = serde_json::to_value(TransactionKind::NewApplication).unwrap();
        assert_eq!(json["transaction_type"], "New Application");

        let json = serde_json::to_value(TransactionKind::Renewal(ChainLink::default())).unwrap();
        assert_eq!(json["transaction_type"], "Renewal");
        assert!(json.get("predecessor").is_some());
    }

    #[test]
    fn application_serde_roundtrip_keeps_chain_fields_flat() {
        let mut app = draft_renewal();
        app.transaction.chain_mut().unwrap().cached_expiry = Some(date(2026, 12, 31));

        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["transaction_type"], "Renewal");
        assert_eq!(json["cached_expiry"], "2026-12-31");

        let parsed: DocumentApplication = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.transaction, app.transaction);
        assert_eq!(parsed.id, app.id);
    }

    #[test]
    fn new_records_start_as_draft() {
        let app = draft_renewal();
        assert_eq!(app.docstatus, DocStatus::Draft);
        assert_eq!(app.status, DocumentStatus::Draft);
        assert!(app.supporting_documents.is_empty());
        assert!(app.document_category.is_none());
    }
}
