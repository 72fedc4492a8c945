//! # Application Store Seam
//!
//! The record store the lifecycle engine runs against. The contract is
//! deliberately small: point fetch, one filtered latest-first query for
//! predecessor auto-discovery, a duplicate-active probe, transactional
//! save, and the single privileged status write used by the submission
//! cascade.
//!
//! The duplicate probe and the auto-discovery query are snapshot reads;
//! two concurrent saves for the same (applicant, document type) can both
//! pass the duplicate check before either commits. The contract inherits
//! that race from the source design and does not add locking.

use dashmap::DashMap;
use thiserror::Error;

use docreg_core::{ApplicantId, ApplicationId, DocumentTypeId};
use docreg_model::{DocStatus, DocumentApplication, DocumentStatus};

// ─── Privilege ───────────────────────────────────────────────────────

/// Capability carried by a status write.
///
/// The submission cascade updates the predecessor with [`Privilege::Elevated`],
/// an explicit token in place of ambient session state: submitted records
/// are immutable to [`Privilege::Standard`] writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// An ordinary caller edit, subject to the submitted-record guard.
    Standard,
    /// A system-triggered cascade bypassing the caller-side guard.
    Elevated,
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record exists under the given identifier.
    #[error("document application {0} not found")]
    NotFound(ApplicationId),

    /// A standard-privilege write targeted a submitted record.
    #[error("document application {0} is submitted; updating it requires elevated privilege")]
    SubmittedImmutable(ApplicationId),
}

// ─── Store Contract ──────────────────────────────────────────────────

/// Transactional record store for document applications.
///
/// Implementations provide snapshot-consistent reads within one pipeline
/// execution. The engine persists a record only after the full validation
/// pipeline has passed; a failed save leaves the store untouched.
pub trait ApplicationStore {
    /// Point fetch by identifier, used to resolve explicit chain links.
    fn fetch(&self, id: &ApplicationId) -> Option<DocumentApplication>;

    /// The most recently created submitted record for the given applicant
    /// and document type whose status is in `statuses`. This is the
    /// predecessor auto-discovery query: ordered by creation descending,
    /// limit one.
    fn latest_submitted(
        &self,
        applicant: &ApplicantId,
        document_type: &DocumentTypeId,
        statuses: &[DocumentStatus],
    ) -> Option<DocumentApplication>;

    /// Whether any record other than `excluding` holds an Active document
    /// for the given applicant and document type.
    fn other_active_exists(
        &self,
        applicant: &ApplicantId,
        document_type: Option<&DocumentTypeId>,
        excluding: &ApplicationId,
    ) -> bool;

    /// Insert or replace a record.
    fn save(&self, app: DocumentApplication) -> Result<(), StoreError>;

    /// Update one record's status. The cascade that supersedes a chain
    /// predecessor passes [`Privilege::Elevated`]; standard writes to
    /// submitted records are rejected.
    fn set_status(
        &self,
        id: &ApplicationId,
        status: DocumentStatus,
        privilege: Privilege,
    ) -> Result<(), StoreError>;

    /// Every stored record, for read-only projections.
    fn all(&self) -> Vec<DocumentApplication>;
}

// ─── In-Memory Store ─────────────────────────────────────────────────

/// In-memory application store backed by `DashMap`, for tests and
/// embedders.
#[derive(Debug, Default)]
pub struct InMemoryApplicationStore {
    records: DashMap<ApplicationId, DocumentApplication>,
}

impl InMemoryApplicationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ApplicationStore for InMemoryApplicationStore {
    fn fetch(&self, id: &ApplicationId) -> Option<DocumentApplication> {
        self.records.get(id).map(|r| r.value().clone())
    }

    fn latest_submitted(
        &self,
        applicant: &ApplicantId,
        document_type: &DocumentTypeId,
        statuses: &[DocumentStatus],
    ) -> Option<DocumentApplication> {
        self.records
            .iter()
            .filter(|entry| {
                let app = entry.value();
                app.docstatus == DocStatus::Submitted
                    && &app.applicant == applicant
                    && app.document_type.as_ref() == Some(document_type)
                    && statuses.contains(&app.status)
            })
            .max_by_key(|entry| entry.value().created_at)
            .map(|entry| entry.value().clone())
    }

    fn other_active_exists(
        &self,
        applicant: &ApplicantId,
        document_type: Option<&DocumentTypeId>,
        excluding: &ApplicationId,
    ) -> bool {
        self.records.iter().any(|entry| {
            let app = entry.value();
            &app.id != excluding
                && &app.applicant == applicant
                && app.document_type.as_ref() == document_type
                && app.status == DocumentStatus::Active
        })
    }

    fn save(&self, app: DocumentApplication) -> Result<(), StoreError> {
        self.records.insert(app.id.clone(), app);
        Ok(())
    }

    fn set_status(
        &self,
        id: &ApplicationId,
        status: DocumentStatus,
        privilege: Privilege,
    ) -> Result<(), StoreError> {
        let mut entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if entry.docstatus == DocStatus::Submitted && privilege != Privilege::Elevated {
            return Err(StoreError::SubmittedImmutable(id.clone()));
        }
        entry.status = status;
        Ok(())
    }

    fn all(&self) -> Vec<DocumentApplication> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
