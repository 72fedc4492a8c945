//! # docreg-core — Foundational Types for the Document Compliance Registry
//!
//! This crate is the bedrock of the registry workspace. It defines the
//! type-system primitives every other crate builds on; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain identifiers.** `ApplicationId`,
//!    `ApplicantId`, `EmployeeId`, `DocumentTypeId`, `DocumentCategoryId` —
//!    all newtypes. No bare strings for identifiers, so an employee key can
//!    never be passed where a document type key is expected.
//!
//! 2. **Inclusive validity windows.** All expiry arithmetic flows through
//!    [`dates::validity_window_end`]: a 30-day document issued on day 1
//!    expires on day 30, not day 31. There is exactly one place where the
//!    off-by-one convention lives.
//!
//! 3. **Structured validation errors.** [`error::ValidationError`] carries
//!    the offending entity in every variant and classifies itself into the
//!    four failure classes via [`error::ValidationError::class`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `docreg-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` where they cross a persistence boundary.

pub mod dates;
pub mod error;
pub mod identity;

// Re-export primary types for ergonomic imports.
pub use dates::validity_window_end;
pub use error::{ValidationClass, ValidationError};
pub use identity::{ApplicantId, ApplicationId, DocumentCategoryId, DocumentTypeId, EmployeeId};
