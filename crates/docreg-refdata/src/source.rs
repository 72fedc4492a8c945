//! # Reference-Data Lookup Seam
//!
//! [`RefDataSource`] is the synchronous point-read interface the lifecycle
//! engine validates against. Lookups return `None` for unresolvable keys;
//! turning that into a user-facing error is the caller's concern.

use dashmap::DashMap;

use docreg_core::{DocumentCategoryId, DocumentTypeId, EmployeeId};

use crate::records::{DocumentCategory, DocumentType, Employee};

/// Synchronous point reads against the externally-owned reference stores.
///
/// All three lookups are snapshot reads within one pipeline execution;
/// the engine never mutates reference data.
pub trait RefDataSource {
    /// Resolve an employee by key.
    fn employee(&self, id: &EmployeeId) -> Option<Employee>;

    /// Resolve a document type by key.
    fn document_type(&self, id: &DocumentTypeId) -> Option<DocumentType>;

    /// Resolve a document category by key.
    fn document_category(&self, id: &DocumentCategoryId) -> Option<DocumentCategory>;
}

/// In-memory reference data backed by `DashMap`, for tests and embedders.
#[derive(Debug, Default)]
pub struct InMemoryRefData {
    employees: DashMap<EmployeeId, Employee>,
    document_types: DashMap<DocumentTypeId, DocumentType>,
    categories: DashMap<DocumentCategoryId, DocumentCategory>,
}

impl InMemoryRefData {
    /// Create an empty reference-data set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an employee record.
    pub fn put_employee(&self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Insert or replace a document type.
    pub fn put_document_type(&self, document_type: DocumentType) {
        self.document_types
            .insert(document_type.id.clone(), document_type);
    }

    /// Insert or replace a document category.
    pub fn put_category(&self, category: DocumentCategory) {
        self.categories.insert(category.id.clone(), category);
    }
}

impl RefDataSource for InMemoryRefData {
    fn employee(&self, id: &EmployeeId) -> Option<Employee> {
        self.employees.get(id).map(|r| r.value().clone())
    }

    fn document_type(&self, id: &DocumentTypeId) -> Option<DocumentType> {
        self.document_types.get(id).map(|r| r.value().clone())
    }

    fn document_category(&self, id: &DocumentCategoryId) -> Option<DocumentCategory> {
        self.categories.get(id).map(|r| r.value().clone())
    }
}
