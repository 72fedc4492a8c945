//! # Reference Records
//!
//! The three reference entities consumed by the lifecycle engine. All are
//! owned by external master-data services; the registry only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use docreg_core::{DocumentCategoryId, DocumentTypeId, EmployeeId};

/// An HR employee record, the source of truth for the mirrored applicant
/// fields on Employee applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// The externally-issued employee key.
    pub id: EmployeeId,
    /// The employee's full name.
    pub employee_name: String,
    /// Date of birth, if recorded.
    pub date_of_birth: Option<NaiveDate>,
    /// Gender, if recorded.
    pub gender: Option<String>,
}

/// A configured document type (e.g., "Passport") with its expiry policy
/// and renewal eligibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentType {
    /// The externally-issued document type key.
    pub id: DocumentTypeId,
    /// The category this type is grouped under. A type without a category
    /// is misconfigured and rejected at validation time.
    pub document_category: Option<DocumentCategoryId>,
    /// Whether the type may be used on new applications.
    pub is_active: bool,
    /// Whether documents of this type expire.
    pub has_expiry: bool,
    /// Inclusive validity window in days. Zero counts as "not configured".
    pub validity_days: Option<u32>,
    /// Whether documents of this type may be renewed.
    pub renewal_allowed: bool,
}

impl DocumentType {
    /// The configured validity window, treating zero as unconfigured.
    pub fn effective_validity_days(&self) -> Option<u32> {
        self.validity_days.filter(|days| *days > 0)
    }
}

/// A grouping of document types with an active flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentCategory {
    /// The externally-issued category key.
    pub id: DocumentCategoryId,
    /// Whether the category may be used on new applications.
    pub is_active: bool,
}
