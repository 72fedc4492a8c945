//! # Document Lifecycle Engine
//!
//! The save-time validation pipeline and the submit-time cascade. Every
//! save runs the full ordered pipeline against reference data and the
//! store, derives the dependent fields, and persists only on success.
//! Submission additionally supersedes the chain predecessor.
//!
//! ## Pipeline Order
//!
//! Later steps read fields set by earlier ones, so the order is part of
//! the contract:
//!
//! 1. Predecessor auto-link (chain transactions with an empty link).
//! 2. Override-reason guard.
//! 3. Category derivation from the document type.
//! 4. Applicant-name derivation (Employee applicants).
//! 5. Personal-detail mirroring (Employee applicants).
//! 6. Master-data validation (active flags, category membership,
//!    renewal eligibility).
//! 7. Chain rules (predecessor submitted, chainable, same type).
//! 8. Duplicate-active guard.
//! 9. Expiry derivation for the record itself.
//! 10. Expiry derivation per supporting-document row.
//! 11. Expiry-after-issue ordering check.
//!
//! Fail-fast: the first error aborts the save and nothing is persisted.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use docreg_core::{validity_window_end, ValidationError};
use docreg_model::{
    ApplicantType, DocStatus, DocumentApplication, DocumentStatus, TransactionKind,
};
use docreg_refdata::{DocumentType, RefDataSource};

use crate::store::{ApplicationStore, Privilege, StoreError};

// ─── Errors ──────────────────────────────────────────────────────────

/// Failure of a save or submit operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The record failed the validation pipeline.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// The validation failure, when that is what this error is.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(_) => None,
        }
    }
}

// ─── Engine ──────────────────────────────────────────────────────────

/// Validates, derives, and persists document applications over an
/// abstract store and reference-data source.
#[derive(Debug)]
pub struct LifecycleEngine<S, R> {
    store: Arc<S>,
    refdata: Arc<R>,
}

impl<S, R> LifecycleEngine<S, R>
where
    S: ApplicationStore,
    R: RefDataSource,
{
    /// Create an engine over the given store and reference data.
    pub fn new(store: Arc<S>, refdata: Arc<R>) -> Self {
        Self { store, refdata }
    }

    /// The store this engine persists into.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Validate the record, derive its dependent fields, and persist it.
    pub fn save(&self, app: &mut DocumentApplication) -> Result<(), EngineError> {
        self.run_pipeline(app)?;
        self.store.save(app.clone())?;
        debug!(application = %app.id, status = %app.status, "saved document application");
        Ok(())
    }

    /// Submit a draft record: validate, persist as submitted, and
    /// supersede the chain predecessor.
    pub fn submit(&self, app: &mut DocumentApplication) -> Result<(), EngineError> {
        if app.docstatus != DocStatus::Draft {
            return Err(ValidationError::NotSubmittable {
                id: app.id.clone(),
                docstatus: app.docstatus.to_string(),
            }
            .into());
        }
        self.run_pipeline(app)?;
        app.docstatus = DocStatus::Submitted;
        self.store.save(app.clone())?;
        info!(application = %app.id, transaction = %app.transaction, "submitted document application");
        self.supersede_predecessor(app)?;
        Ok(())
    }

    /// The submit-time cascade: mark the chain predecessor Renewed or
    /// Extended, bypassing the submitted-record guard with an elevated
    /// write.
    ///
    /// Idempotent — a predecessor that is no longer Active or Issued is
    /// left untouched, so replaying the cascade is safe.
    pub fn supersede_predecessor(&self, app: &DocumentApplication) -> Result<(), EngineError> {
        let Some(successor_status) = app.transaction.successor_status() else {
            return Ok(());
        };
        let previous = self
            .resolve_predecessor(app)?
            .ok_or(ValidationError::PredecessorRequired)?;
        match previous.status.supersede(successor_status) {
            Ok(next) => {
                self.store
                    .set_status(&previous.id, next, Privilege::Elevated)?;
                info!(
                    predecessor = %previous.id,
                    from = %previous.status,
                    to = %next,
                    "superseded chain predecessor"
                );
            }
            Err(_) => {
                debug!(
                    predecessor = %previous.id,
                    status = %previous.status,
                    "predecessor no longer chainable; cascade skipped"
                );
            }
        }
        Ok(())
    }

    // ─── Pipeline ────────────────────────────────────────────────────

    fn run_pipeline(&self, app: &mut DocumentApplication) -> Result<(), ValidationError> {
        self.auto_link_predecessor(app);
        check_override_reason(app)?;
        self.derive_category(app)?;
        self.derive_applicant_name(app)?;
        self.mirror_personal_details(app)?;
        self.validate_master_data(app)?;
        self.validate_chain_rules(app)?;
        self.prevent_duplicate_active(app)?;
        self.calculate_expiry(app)?;
        self.calculate_supporting_expiry(app)?;
        check_expiry_ordering(app)
    }

    /// Fill an empty chain link with the most recently created submitted
    /// Active/Issued record for the same applicant and document type.
    /// No match leaves the link empty for the chain rules to reject.
    fn auto_link_predecessor(&self, app: &mut DocumentApplication) {
        let needs_link = app
            .transaction
            .chain()
            .is_some_and(|link| link.predecessor.is_none());
        if !needs_link {
            return;
        }
        let Some(document_type) = app.document_type.clone() else {
            return;
        };
        let previous = self.store.latest_submitted(
            &app.applicant,
            &document_type,
            &[DocumentStatus::Active, DocumentStatus::Issued],
        );
        if let Some(previous) = previous {
            debug!(
                application = %app.id,
                predecessor = %previous.id,
                "auto-linked chain predecessor"
            );
            if let Some(link) = app.transaction.chain_mut() {
                link.predecessor = Some(previous.id);
                link.cached_expiry = previous.expiry_date;
            }
        }
    }

    /// Derive `document_category` from the chosen document type.
    fn derive_category(&self, app: &mut DocumentApplication) -> Result<(), ValidationError> {
        let Some(type_id) = &app.document_type else {
            return Ok(());
        };
        let doc_type = self.lookup_document_type(type_id)?;
        let category =
            doc_type
                .document_category
                .ok_or_else(|| ValidationError::CategoryNotConfigured {
                    document_type: type_id.clone(),
                })?;
        app.document_category = Some(category);
        Ok(())
    }

    /// Overwrite `applicant_full_name` from the HR record.
    fn derive_applicant_name(&self, app: &mut DocumentApplication) -> Result<(), ValidationError> {
        if app.applicant_type != ApplicantType::Employee {
            return Ok(());
        }
        let employee_id = app
            .employee
            .clone()
            .ok_or(ValidationError::EmployeeRequired)?;
        let employee =
            self.refdata
                .employee(&employee_id)
                .ok_or_else(|| ValidationError::EmployeeNameLookup {
                    employee: employee_id.clone(),
                })?;
        if employee.employee_name.is_empty() {
            return Err(ValidationError::EmployeeNameLookup {
                employee: employee_id,
            });
        }
        app.applicant_full_name = Some(employee.employee_name);
        Ok(())
    }

    /// Overwrite the mirrored personal details from the HR record.
    /// External applicants keep their user-entered values.
    fn mirror_personal_details(
        &self,
        app: &mut DocumentApplication,
    ) -> Result<(), ValidationError> {
        if app.applicant_type != ApplicantType::Employee {
            return Ok(());
        }
        let Some(employee_id) = app.employee.clone() else {
            return Ok(());
        };
        let employee = self.refdata.employee(&employee_id).ok_or(
            ValidationError::EmployeeDetailsLookup {
                employee: employee_id,
            },
        )?;
        app.date_of_birth = employee.date_of_birth;
        app.gender = employee.gender;
        Ok(())
    }

    /// Active flags, category membership, and renewal eligibility.
    fn validate_master_data(&self, app: &DocumentApplication) -> Result<(), ValidationError> {
        if let Some(category_id) = &app.document_category {
            let category = self.refdata.document_category(category_id).ok_or_else(|| {
                ValidationError::DocumentCategoryLookup {
                    category: category_id.clone(),
                }
            })?;
            if !category.is_active {
                return Err(ValidationError::CategoryInactive);
            }
        }
        let Some(type_id) = &app.document_type else {
            return Ok(());
        };
        let doc_type = self.lookup_document_type(type_id)?;
        if !doc_type.is_active {
            return Err(ValidationError::DocumentTypeInactive);
        }
        if let Some(category_id) = &app.document_category {
            if doc_type.document_category.as_ref() != Some(category_id) {
                return Err(ValidationError::CategoryMismatch);
            }
        }
        if matches!(app.transaction, TransactionKind::Renewal(_)) && !doc_type.renewal_allowed {
            return Err(ValidationError::RenewalNotAllowed);
        }
        Ok(())
    }

    /// Chain transactions need a submitted, chainable predecessor of the
    /// same document type.
    fn validate_chain_rules(&self, app: &DocumentApplication) -> Result<(), ValidationError> {
        let Some(action) = app.transaction.action_label() else {
            return Ok(());
        };
        let previous = self
            .resolve_predecessor(app)?
            .ok_or(ValidationError::PredecessorRequired)?;
        if previous.docstatus != DocStatus::Submitted {
            return Err(ValidationError::PredecessorNotSubmitted {
                id: previous.id,
                action: action.to_string(),
            });
        }
        if !previous.status.is_chainable() {
            return Err(ValidationError::PredecessorNotChainable {
                id: previous.id,
                status: previous.status.to_string(),
                action: action.to_string(),
            });
        }
        if previous.document_type != app.document_type {
            return Err(ValidationError::PredecessorTypeMismatch);
        }
        Ok(())
    }

    /// At most one Active document per (applicant, document type).
    fn prevent_duplicate_active(&self, app: &DocumentApplication) -> Result<(), ValidationError> {
        if app.status != DocumentStatus::Active {
            return Ok(());
        }
        if self.store.other_active_exists(
            &app.applicant,
            app.document_type.as_ref(),
            &app.id,
        ) {
            return Err(ValidationError::DuplicateActive);
        }
        Ok(())
    }

    /// Derive `expiry_date` and `new_expiry_date` from the document
    /// type's validity window. Skipped entirely under an expiry override,
    /// for records not yet Issued, and without a document type.
    fn calculate_expiry(&self, app: &mut DocumentApplication) -> Result<(), ValidationError> {
        if app.allow_expiry_override || app.status != DocumentStatus::Issued {
            return Ok(());
        }
        let Some(type_id) = app.document_type.clone() else {
            return Ok(());
        };
        let doc_type = self.lookup_document_type(&type_id)?;
        if !doc_type.has_expiry {
            app.expiry_date = None;
            app.new_expiry_date = None;
            return Ok(());
        }
        let validity_days = doc_type.effective_validity_days().ok_or_else(|| {
            ValidationError::ValidityDaysNotConfigured {
                document_type: type_id.clone(),
            }
        })?;
        match &app.transaction {
            TransactionKind::NewApplication => {
                let issue = app.issue_date.ok_or(ValidationError::IssueDateRequired)?;
                let expiry = validity_window_end(issue, validity_days).ok_or_else(|| {
                    ValidationError::ExpiryOutOfRange {
                        document_type: type_id.clone(),
                    }
                })?;
                app.expiry_date = Some(expiry);
                debug!(application = %app.id, expiry = %expiry, "derived expiry window");
            }
            TransactionKind::Renewal(_) | TransactionKind::Extension(_) => {
                let previous = self
                    .resolve_predecessor(app)?
                    .ok_or(ValidationError::PredecessorRequired)?;
                // The current expiry is carried forward unchanged; the
                // prospective window is held in new_expiry_date until a
                // downstream process promotes it.
                let base = previous.expiry_date.ok_or_else(|| {
                    ValidationError::PredecessorMissingExpiry {
                        id: previous.id.clone(),
                    }
                })?;
                let new_expiry = validity_window_end(base, validity_days).ok_or_else(|| {
                    ValidationError::ExpiryOutOfRange {
                        document_type: type_id.clone(),
                    }
                })?;
                app.expiry_date = Some(base);
                app.new_expiry_date = Some(new_expiry);
                debug!(
                    application = %app.id,
                    carried = %base,
                    prospective = %new_expiry,
                    "derived chain expiry window"
                );
            }
        }
        Ok(())
    }

    /// Derive each supporting-document row's expiry independently.
    fn calculate_supporting_expiry(
        &self,
        app: &mut DocumentApplication,
    ) -> Result<(), ValidationError> {
        for row in &mut app.supporting_documents {
            let (Some(type_id), Some(issue)) = (row.document_type.clone(), row.issue_date) else {
                continue;
            };
            let doc_type = self
                .refdata
                .document_type(&type_id)
                .ok_or_else(|| ValidationError::DocumentTypeLookup {
                    document_type: type_id.clone(),
                })?;
            if !doc_type.has_expiry {
                row.expiry_date = None;
                continue;
            }
            let validity_days = doc_type.effective_validity_days().ok_or_else(|| {
                ValidationError::ValidityDaysNotConfigured {
                    document_type: type_id.clone(),
                }
            })?;
            row.expiry_date = Some(validity_window_end(issue, validity_days).ok_or_else(
                || ValidationError::ExpiryOutOfRange {
                    document_type: type_id,
                },
            )?);
        }
        Ok(())
    }

    // ─── Lookups ─────────────────────────────────────────────────────

    fn lookup_document_type(
        &self,
        type_id: &docreg_core::DocumentTypeId,
    ) -> Result<DocumentType, ValidationError> {
        self.refdata
            .document_type(type_id)
            .ok_or_else(|| ValidationError::DocumentTypeLookup {
                document_type: type_id.clone(),
            })
    }

    /// Resolve the explicit chain link, if the transaction carries one.
    fn resolve_predecessor(
        &self,
        app: &DocumentApplication,
    ) -> Result<Option<DocumentApplication>, ValidationError> {
        let Some(link) = app.transaction.chain() else {
            return Ok(None);
        };
        let Some(id) = &link.predecessor else {
            return Ok(None);
        };
        let previous = self
            .store
            .fetch(id)
            .ok_or_else(|| ValidationError::PredecessorLookup { id: id.clone() })?;
        Ok(Some(previous))
    }
}

// ─── Record-Only Checks ──────────────────────────────────────────────

fn check_override_reason(app: &DocumentApplication) -> Result<(), ValidationError> {
    if app.allow_expiry_override
        && app
            .override_reason
            .as_deref()
            .map_or(true, |reason| reason.trim().is_empty())
    {
        return Err(ValidationError::OverrideReasonRequired);
    }
    Ok(())
}

fn check_expiry_ordering(app: &DocumentApplication) -> Result<(), ValidationError> {
    if let (Some(issue), Some(expiry)) = (app.issue_date, app.expiry_date) {
        if expiry <= issue {
            return Err(ValidationError::ExpiryBeforeIssue);
        }
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use docreg_core::{ApplicantId, DocumentCategoryId, DocumentTypeId, EmployeeId};
    use docreg_model::{ChainLink, SupportingDocument};
    use docreg_refdata::{DocumentCategory, Employee, InMemoryRefData};

    use crate::store::InMemoryApplicationStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_refdata() -> InMemoryRefData {
        let refdata = InMemoryRefData::new();
        refdata.put_category(DocumentCategory {
            id: DocumentCategoryId::new("Travel Documents"),
            is_active: true,
        });
        refdata.put_category(DocumentCategory {
            id: DocumentCategoryId::new("Dormant"),
            is_active: false,
        });
        refdata.put_document_type(DocumentType {
            id: DocumentTypeId::new("Passport"),
            document_category: Some(DocumentCategoryId::new("Travel Documents")),
            is_active: true,
            has_expiry: true,
            validity_days: Some(30),
            renewal_allowed: true,
        });
        refdata.put_document_type(DocumentType {
            id: DocumentTypeId::new("Entry Pass"),
            document_category: Some(DocumentCategoryId::new("Travel Documents")),
            is_active: true,
            has_expiry: false,
            validity_days: None,
            renewal_allowed: false,
        });
        refdata.put_document_type(DocumentType {
            id: DocumentTypeId::new("Uncapped Visa"),
            document_category: Some(DocumentCategoryId::new("Travel Documents")),
            is_active: true,
            has_expiry: true,
            validity_days: None,
            renewal_allowed: true,
        });
        refdata.put_document_type(DocumentType {
            id: DocumentTypeId::new("Orphan Permit"),
            document_category: None,
            is_active: true,
            has_expiry: false,
            validity_days: None,
            renewal_allowed: false,
        });
        refdata.put_document_type(DocumentType {
            id: DocumentTypeId::new("Retired Visa"),
            document_category: Some(DocumentCategoryId::new("Travel Documents")),
            is_active: false,
            has_expiry: false,
            validity_days: None,
            renewal_allowed: false,
        });
        refdata.put_document_type(DocumentType {
            id: DocumentTypeId::new("Dormant Permit"),
            document_category: Some(DocumentCategoryId::new("Dormant")),
            is_active: true,
            has_expiry: false,
            validity_days: None,
            renewal_allowed: false,
        });
        refdata.put_employee(Employee {
            id: EmployeeId::new("HR-EMP-00042"),
            employee_name: "Ayesha Khan".to_string(),
            date_of_birth: Some(date(1991, 6, 14)),
            gender: Some("Female".to_string()),
        });
        refdata
    }

    fn engine() -> LifecycleEngine<InMemoryApplicationStore, InMemoryRefData> {
        LifecycleEngine::new(
            Arc::new(InMemoryApplicationStore::new()),
            Arc::new(sample_refdata()),
        )
    }

    fn external_app(doc_type: &str) -> DocumentApplication {
        let mut app = DocumentApplication::new(
            ApplicantId::new("APP-0001"),
            ApplicantType::External,
            TransactionKind::NewApplication,
            date(2026, 3, 1),
        );
        app.applicant_full_name = Some("Jordan Reyes".to_string());
        app.document_type = Some(DocumentTypeId::new(doc_type));
        app
    }

    fn employee_app(doc_type: &str) -> DocumentApplication {
        let mut app = DocumentApplication::new(
            ApplicantId::new("HR-EMP-00042"),
            ApplicantType::Employee,
            TransactionKind::NewApplication,
            date(2026, 3, 1),
        );
        app.employee = Some(EmployeeId::new("HR-EMP-00042"));
        app.document_type = Some(DocumentTypeId::new(doc_type));
        app
    }

    fn expect_validation(result: Result<(), EngineError>) -> ValidationError {
        match result {
            Err(EngineError::Validation(err)) => err,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    // ── Category derivation ──────────────────────────────────────────

    #[test]
    fn save_derives_category_from_document_type() {
        let engine = engine();
        let mut app = external_app("Passport");
        engine.save(&mut app).unwrap();
        assert_eq!(
            app.document_category,
            Some(DocumentCategoryId::new("Travel Documents"))
        );

        let stored = engine.store().fetch(&app.id).unwrap();
        assert_eq!(
            stored.document_category,
            Some(DocumentCategoryId::new("Travel Documents"))
        );
    }

    #[test]
    fn type_without_category_is_a_data_integrity_failure() {
        let engine = engine();
        let mut app = external_app("Orphan Permit");
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(
            err,
            ValidationError::CategoryNotConfigured {
                document_type: DocumentTypeId::new("Orphan Permit"),
            }
        );
        assert!(engine.store().is_empty(), "failed save must not persist");
    }

    #[test]
    fn unknown_document_type_fails_lookup() {
        let engine = engine();
        let mut app = external_app("No Such Type");
        let err = expect_validation(engine.save(&mut app));
        assert!(matches!(err, ValidationError::DocumentTypeLookup { .. }));
    }

    // ── Override guard ───────────────────────────────────────────────

    #[test]
    fn override_without_reason_fails() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.allow_expiry_override = true;
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(err, ValidationError::OverrideReasonRequired);
    }

    #[test]
    fn blank_override_reason_counts_as_missing() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.allow_expiry_override = true;
        app.override_reason = Some("   ".to_string());
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(err, ValidationError::OverrideReasonRequired);
    }

    #[test]
    fn override_skips_expiry_derivation() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.status = DocumentStatus::Issued;
        app.allow_expiry_override = true;
        app.override_reason = Some("Issued under legacy policy".to_string());
        app.issue_date = Some(date(2026, 3, 1));
        app.expiry_date = Some(date(2027, 3, 1));
        engine.save(&mut app).unwrap();
        assert_eq!(app.expiry_date, Some(date(2027, 3, 1)));
        assert!(app.new_expiry_date.is_none());
    }

    // ── Employee mirroring ───────────────────────────────────────────

    #[test]
    fn employee_fields_are_overwritten_from_hr() {
        let engine = engine();
        let mut app = employee_app("Passport");
        app.applicant_full_name = Some("Stale Name".to_string());
        app.gender = Some("Unspecified".to_string());
        engine.save(&mut app).unwrap();
        assert_eq!(app.applicant_full_name.as_deref(), Some("Ayesha Khan"));
        assert_eq!(app.date_of_birth, Some(date(1991, 6, 14)));
        assert_eq!(app.gender.as_deref(), Some("Female"));
    }

    #[test]
    fn employee_applicant_without_link_fails() {
        let engine = engine();
        let mut app = employee_app("Passport");
        app.employee = None;
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(err, ValidationError::EmployeeRequired);
    }

    #[test]
    fn unresolvable_employee_fails_lookup() {
        let engine = engine();
        let mut app = employee_app("Passport");
        app.employee = Some(EmployeeId::new("HR-EMP-99999"));
        let err = expect_validation(engine.save(&mut app));
        assert!(matches!(err, ValidationError::EmployeeNameLookup { .. }));
    }

    #[test]
    fn external_applicant_details_are_untouched() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.date_of_birth = Some(date(1984, 2, 2));
        app.gender = Some("Male".to_string());
        engine.save(&mut app).unwrap();
        assert_eq!(app.applicant_full_name.as_deref(), Some("Jordan Reyes"));
        assert_eq!(app.date_of_birth, Some(date(1984, 2, 2)));
        assert_eq!(app.gender.as_deref(), Some("Male"));
    }

    // ── Master data ──────────────────────────────────────────────────

    #[test]
    fn inactive_document_type_is_rejected() {
        let engine = engine();
        let mut app = external_app("Retired Visa");
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(err, ValidationError::DocumentTypeInactive);
    }

    #[test]
    fn inactive_category_is_rejected() {
        let engine = engine();
        let mut app = external_app("Dormant Permit");
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(err, ValidationError::CategoryInactive);
    }

    #[test]
    fn renewal_of_non_renewable_type_is_rejected() {
        let engine = engine();
        let mut app = external_app("Entry Pass");
        app.transaction = TransactionKind::Renewal(ChainLink::default());
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(err, ValidationError::RenewalNotAllowed);
    }

    // ── Expiry derivation ────────────────────────────────────────────

    #[test]
    fn new_application_expiry_is_inclusive() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.status = DocumentStatus::Issued;
        app.issue_date = Some(date(2026, 3, 1));
        engine.save(&mut app).unwrap();
        assert_eq!(app.expiry_date, Some(date(2026, 3, 30)));
        assert!(app.new_expiry_date.is_none());
    }

    #[test]
    fn non_expiring_type_clears_both_dates() {
        let engine = engine();
        let mut app = external_app("Entry Pass");
        app.status = DocumentStatus::Issued;
        app.issue_date = Some(date(2026, 3, 1));
        app.expiry_date = Some(date(2027, 3, 1));
        app.new_expiry_date = Some(date(2027, 3, 1));
        engine.save(&mut app).unwrap();
        assert!(app.expiry_date.is_none());
        assert!(app.new_expiry_date.is_none());
    }

    #[test]
    fn expiring_type_without_validity_days_fails() {
        let engine = engine();
        let mut app = external_app("Uncapped Visa");
        app.status = DocumentStatus::Issued;
        app.issue_date = Some(date(2026, 3, 1));
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(
            err,
            ValidationError::ValidityDaysNotConfigured {
                document_type: DocumentTypeId::new("Uncapped Visa"),
            }
        );
    }

    #[test]
    fn issued_new_application_without_issue_date_fails() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.status = DocumentStatus::Issued;
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(err, ValidationError::IssueDateRequired);
    }

    #[test]
    fn derivation_skipped_before_issuance() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.status = DocumentStatus::UnderReview;
        engine.save(&mut app).unwrap();
        assert!(app.expiry_date.is_none());
    }

    // ── Supporting documents ─────────────────────────────────────────

    #[test]
    fn supporting_rows_derive_independently() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.supporting_documents = vec![
            SupportingDocument {
                document_type: Some(DocumentTypeId::new("Passport")),
                issue_date: Some(date(2026, 3, 1)),
                expiry_date: None,
            },
            SupportingDocument {
                document_type: Some(DocumentTypeId::new("Entry Pass")),
                issue_date: Some(date(2026, 3, 1)),
                expiry_date: Some(date(2030, 1, 1)),
            },
            SupportingDocument {
                document_type: None,
                issue_date: Some(date(2026, 3, 1)),
                expiry_date: None,
            },
        ];
        engine.save(&mut app).unwrap();
        assert_eq!(
            app.supporting_documents[0].expiry_date,
            Some(date(2026, 3, 30))
        );
        assert!(app.supporting_documents[1].expiry_date.is_none());
        assert!(app.supporting_documents[2].expiry_date.is_none());
    }

    #[test]
    fn failing_row_aborts_the_whole_save() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.supporting_documents = vec![SupportingDocument {
            document_type: Some(DocumentTypeId::new("Uncapped Visa")),
            issue_date: Some(date(2026, 3, 1)),
            expiry_date: None,
        }];
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(
            err,
            ValidationError::ValidityDaysNotConfigured {
                document_type: DocumentTypeId::new("Uncapped Visa"),
            }
        );
        assert!(engine.store().is_empty());
    }

    // ── Duplicate-active guard ───────────────────────────────────────

    #[test]
    fn duplicate_active_is_rejected() {
        let engine = engine();
        let mut first = external_app("Passport");
        first.status = DocumentStatus::Active;
        first.issue_date = Some(date(2026, 3, 1));
        engine.save(&mut first).unwrap();

        let mut second = external_app("Passport");
        second.status = DocumentStatus::Active;
        let err = expect_validation(engine.save(&mut second));
        assert_eq!(err, ValidationError::DuplicateActive);
    }

    #[test]
    fn resaving_the_same_active_record_is_allowed() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.status = DocumentStatus::Active;
        engine.save(&mut app).unwrap();
        engine.save(&mut app).unwrap();
    }

    #[test]
    fn active_records_for_other_types_do_not_collide() {
        let engine = engine();
        let mut passport = external_app("Passport");
        passport.status = DocumentStatus::Active;
        engine.save(&mut passport).unwrap();

        let mut pass = external_app("Entry Pass");
        pass.status = DocumentStatus::Active;
        engine.save(&mut pass).unwrap();
    }

    // ── Ordering check ───────────────────────────────────────────────

    #[test]
    fn expiry_on_or_before_issue_is_rejected() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.issue_date = Some(date(2026, 5, 10));
        app.expiry_date = Some(date(2026, 5, 10));
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(err, ValidationError::ExpiryBeforeIssue);
    }

    // ── Chain rules ──────────────────────────────────────────────────

    #[test]
    fn renewal_without_predecessor_fails() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.transaction = TransactionKind::Renewal(ChainLink::default());
        let err = expect_validation(engine.save(&mut app));
        assert_eq!(err, ValidationError::PredecessorRequired);
    }

    #[test]
    fn renewal_auto_links_latest_submitted_predecessor() {
        let engine = engine();
        let mut predecessor = external_app("Passport");
        predecessor.status = DocumentStatus::Issued;
        predecessor.issue_date = Some(date(2026, 3, 1));
        engine.submit(&mut predecessor).unwrap();

        let mut renewal = external_app("Passport");
        renewal.transaction = TransactionKind::Renewal(ChainLink::default());
        engine.save(&mut renewal).unwrap();

        let link = renewal.transaction.chain().unwrap();
        assert_eq!(link.predecessor, Some(predecessor.id.clone()));
        assert_eq!(link.cached_expiry, Some(date(2026, 3, 30)));
    }

    #[test]
    fn draft_predecessor_is_rejected() {
        let engine = engine();
        let mut predecessor = external_app("Passport");
        predecessor.status = DocumentStatus::Issued;
        predecessor.issue_date = Some(date(2026, 3, 1));
        engine.save(&mut predecessor).unwrap();

        let mut renewal = external_app("Passport");
        renewal.transaction = TransactionKind::Renewal(ChainLink {
            predecessor: Some(predecessor.id.clone()),
            cached_expiry: None,
        });
        let err = expect_validation(engine.save(&mut renewal));
        assert_eq!(
            err,
            ValidationError::PredecessorNotSubmitted {
                id: predecessor.id,
                action: "renewed".to_string(),
            }
        );
    }

    #[test]
    fn superseded_predecessor_is_rejected() {
        let engine = engine();
        let mut predecessor = external_app("Passport");
        predecessor.status = DocumentStatus::Issued;
        predecessor.issue_date = Some(date(2026, 3, 1));
        engine.submit(&mut predecessor).unwrap();
        engine
            .store()
            .set_status(&predecessor.id, DocumentStatus::Renewed, Privilege::Elevated)
            .unwrap();

        let mut renewal = external_app("Passport");
        renewal.transaction = TransactionKind::Renewal(ChainLink {
            predecessor: Some(predecessor.id.clone()),
            cached_expiry: None,
        });
        let err = expect_validation(engine.save(&mut renewal));
        assert_eq!(
            err,
            ValidationError::PredecessorNotChainable {
                id: predecessor.id,
                status: "Renewed".to_string(),
                action: "renewed".to_string(),
            }
        );
    }

    #[test]
    fn predecessor_of_another_type_is_rejected() {
        let engine = engine();
        let mut predecessor = external_app("Passport");
        predecessor.status = DocumentStatus::Issued;
        predecessor.issue_date = Some(date(2026, 3, 1));
        engine.submit(&mut predecessor).unwrap();

        let mut extension = external_app("Entry Pass");
        extension.transaction = TransactionKind::Extension(ChainLink {
            predecessor: Some(predecessor.id.clone()),
            cached_expiry: None,
        });
        let err = expect_validation(engine.save(&mut extension));
        assert_eq!(err, ValidationError::PredecessorTypeMismatch);
    }

    #[test]
    fn dangling_chain_link_fails_lookup() {
        let engine = engine();
        let ghost = docreg_core::ApplicationId::new();
        let mut renewal = external_app("Passport");
        renewal.transaction = TransactionKind::Renewal(ChainLink {
            predecessor: Some(ghost.clone()),
            cached_expiry: None,
        });
        let err = expect_validation(engine.save(&mut renewal));
        assert_eq!(err, ValidationError::PredecessorLookup { id: ghost });
    }

    // ── Submission ───────────────────────────────────────────────────

    #[test]
    fn submit_rejects_non_draft_records() {
        let engine = engine();
        let mut app = external_app("Passport");
        app.docstatus = DocStatus::Submitted;
        let err = expect_validation(engine.submit(&mut app));
        assert!(matches!(err, ValidationError::NotSubmittable { .. }));
    }

    #[test]
    fn submit_persists_the_submitted_record() {
        let engine = engine();
        let mut app = external_app("Passport");
        engine.submit(&mut app).unwrap();
        assert_eq!(app.docstatus, DocStatus::Submitted);
        let stored = engine.store().fetch(&app.id).unwrap();
        assert_eq!(stored.docstatus, DocStatus::Submitted);
    }
}
