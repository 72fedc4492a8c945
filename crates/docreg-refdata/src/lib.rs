//! # docreg-refdata — Reference Data for the Document Compliance Registry
//!
//! Models the three externally-owned reference entities the lifecycle
//! engine reads (and never writes):
//!
//! - **Employee** — HR master record providing the mirrored name and
//!   personal details for Employee applicants.
//! - **DocumentType** — per-type expiry policy (`has_expiry`,
//!   `validity_days`), renewal eligibility, and category membership.
//! - **DocumentCategory** — grouping of document types with an active flag.
//!
//! [`RefDataSource`] is the synchronous point-read seam the engine depends
//! on; [`InMemoryRefData`] is the `DashMap`-backed implementation used by
//! tests and embedders.

pub mod records;
pub mod source;

pub use records::{DocumentCategory, DocumentType, Employee};
pub use source::{InMemoryRefData, RefDataSource};
