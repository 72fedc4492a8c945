//! # docreg-report — Document Application Report
//!
//! A read-only projection over the application store: one row per
//! application, filterable by posting-date range, transaction type,
//! applicant-name fragment, and status, sorted by posting date
//! descending. The report never mutates the records it reads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use docreg_core::{ApplicationId, DocumentCategoryId, DocumentTypeId};
use docreg_engine::ApplicationStore;
use docreg_model::{DocumentApplication, DocumentStatus};

// ─── Columns ─────────────────────────────────────────────────────────

/// Column metadata for report renderers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportColumn {
    /// Display label.
    pub label: &'static str,
    /// Row field the column reads.
    pub fieldname: &'static str,
    /// Suggested display width in pixels.
    pub width: u16,
}

/// The report's column layout.
pub const COLUMNS: &[ReportColumn] = &[
    ReportColumn {
        label: "Application ID",
        fieldname: "id",
        width: 180,
    },
    ReportColumn {
        label: "Applicant Full Name",
        fieldname: "applicant_full_name",
        width: 180,
    },
    ReportColumn {
        label: "Document Category",
        fieldname: "document_category",
        width: 160,
    },
    ReportColumn {
        label: "Document Type",
        fieldname: "document_type",
        width: 160,
    },
    ReportColumn {
        label: "Transaction Type",
        fieldname: "transaction_type",
        width: 140,
    },
    ReportColumn {
        label: "Posting Date",
        fieldname: "posting_date",
        width: 120,
    },
    ReportColumn {
        label: "Status",
        fieldname: "status",
        width: 120,
    },
];

// ─── Filters ─────────────────────────────────────────────────────────

/// Report filters. All are optional and conjunctive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportFilters {
    /// Earliest posting date, inclusive.
    pub from_date: Option<NaiveDate>,
    /// Latest posting date, inclusive.
    pub to_date: Option<NaiveDate>,
    /// Transaction type label ("New Application", "Renewal", "Extension").
    pub transaction_type: Option<String>,
    /// Case-insensitive fragment of the applicant's full name.
    pub applicant_full_name: Option<String>,
    /// Exact document status.
    pub status: Option<DocumentStatus>,
}

impl ReportFilters {
    fn matches(&self, app: &DocumentApplication) -> bool {
        if let Some(from) = self.from_date {
            if app.posting_date < from {
                return false;
            }
        }
        if let Some(to) = self.to_date {
            if app.posting_date > to {
                return false;
            }
        }
        if let Some(kind) = &self.transaction_type {
            if app.transaction.label() != kind {
                return false;
            }
        }
        if let Some(fragment) = &self.applicant_full_name {
            let Some(name) = &app.applicant_full_name else {
                return false;
            };
            if !name.to_lowercase().contains(&fragment.to_lowercase()) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if app.status != status {
                return false;
            }
        }
        true
    }
}

// ─── Rows ────────────────────────────────────────────────────────────

/// One report row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    /// The application's identifier.
    pub id: ApplicationId,
    /// Applicant name as stored on the record.
    pub applicant_full_name: Option<String>,
    /// Derived document category.
    pub document_category: Option<DocumentCategoryId>,
    /// The document type applied for.
    pub document_type: Option<DocumentTypeId>,
    /// Transaction type label.
    pub transaction_type: String,
    /// Business date of the application.
    pub posting_date: NaiveDate,
    /// Document status.
    pub status: DocumentStatus,
}

impl From<DocumentApplication> for ReportRow {
    fn from(app: DocumentApplication) -> Self {
        Self {
            id: app.id,
            applicant_full_name: app.applicant_full_name,
            document_category: app.document_category,
            document_type: app.document_type,
            transaction_type: app.transaction.label().to_string(),
            posting_date: app.posting_date,
            status: app.status,
        }
    }
}

// ─── Execution ───────────────────────────────────────────────────────

/// Run the report: filter every stored application and sort the rows by
/// posting date, newest first.
pub fn run_report<S: ApplicationStore>(store: &S, filters: &ReportFilters) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = store
        .all()
        .into_iter()
        .filter(|app| filters.matches(app))
        .map(ReportRow::from)
        .collect();
    rows.sort_by(|a, b| b.posting_date.cmp(&a.posting_date));
    rows
}

// ─── Tests ───────────────────────────────────────────────────────────
