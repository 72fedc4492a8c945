//! # docreg-model — Data Model for the Document Compliance Registry
//!
//! Pure data: no I/O, no lookups. The lifecycle engine in `docreg-engine`
//! drives these types against the store and reference-data seams.
//!
//! ## Contents
//!
//! - **DocumentApplication** ([`application`]): the central record — one
//!   issued-or-in-flight compliance document per row, with its embedded
//!   supporting-document collection.
//!
//! - **TransactionKind** ([`application`]): a tagged enum carrying the
//!   renewal/extension chain link inline. There is no string-keyed dynamic
//!   field access — the link a transaction uses is the one its variant
//!   holds, resolved by pattern match.
//!
//! - **DocumentStatus** ([`status`]): the document status set with the one
//!   cross-record transition the engine performs, `supersede`, as a checked
//!   method. Ad-hoc string comparison of statuses cannot exist here.
//!
//! - **Applicant** ([`applicant`]): the applicant mirror-record whose
//!   Employee fields are overwritten from HR master data.

pub mod applicant;
pub mod application;
pub mod status;

pub use applicant::Applicant;
pub use application::{
    ApplicantType, ChainLink, DocumentApplication, SupportingDocument, TransactionKind,
};
pub use status::{DocStatus, DocumentStatus, StatusError};
