//! # Applicant Record
//!
//! The applicant master record. For Employee applicants the name and
//! personal details mirror the HR record and are overwritten on every
//! validation pass; External applicants own their entered values. The
//! mirroring itself runs in `docreg-engine`, which holds the lookup seam.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use docreg_core::EmployeeId;

use crate::application::ApplicantType;

/// A person a document can be issued to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
    /// Employee or External.
    pub applicant_type: ApplicantType,
    /// HR employee link, required when `applicant_type` is Employee.
    pub employee: Option<EmployeeId>,
    /// Mirrored for employees, user-entered for external applicants.
    pub full_name: Option<String>,
    /// Mirrored for employees.
    pub date_of_birth: Option<NaiveDate>,
    /// Mirrored for employees.
    pub gender: Option<String>,
}

impl Applicant {
    /// Create an employee applicant pending its mirror pass.
    pub fn employee(employee: EmployeeId) -> Self {
        Self {
            applicant_type: ApplicantType::Employee,
            employee: Some(employee),
            full_name: None,
            date_of_birth: None,
            gender: None,
        }
    }

    /// Create an external applicant with user-entered details.
    pub fn external(full_name: impl Into<String>) -> Self {
        Self {
            applicant_type: ApplicantType::External,
            employee: None,
            full_name: Some(full_name.into()),
            date_of_birth: None,
            gender: None,
        }
    }
}
