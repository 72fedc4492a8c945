//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all identifier namespaces in the registry.
//! These prevent accidental identifier confusion — you cannot pass an
//! `EmployeeId` where a `DocumentTypeId` is expected.
//!
//! Application identifiers are generated (UUID); the reference-data keys
//! (`EmployeeId`, `DocumentTypeId`, `DocumentCategoryId`, `ApplicantId`)
//! are issued by the externally-owned master-data store and carried as
//! validated opaque strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a document application record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub Uuid);

/// Key of an applicant (employee or external person) in the master data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// Key of an employee record in the externally-owned HR store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Key of a configured document type (e.g., "Passport").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentTypeId(pub String);

/// Key of a document category (grouping of document types).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentCategoryId(pub String);

impl ApplicationId {
    /// Generate a new random application identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ApplicationId {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicantId {
    /// Wrap an externally-issued applicant key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the inner key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EmployeeId {
    /// Wrap an externally-issued employee key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the inner key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DocumentTypeId {
    /// Wrap an externally-issued document type key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the inner key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DocumentCategoryId {
    /// Wrap an externally-issued document category key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the inner key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "application:{}", self.0)
    }
}

impl std::fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for DocumentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for DocumentCategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
