//! # Applicant Validation
//!
//! The applicant master record's own validation pass: Employee applicants
//! mirror name, date of birth, and gender from the HR record; External
//! applicants must carry a full name and keep their entered values.

use docreg_core::ValidationError;
use docreg_model::{Applicant, ApplicantType};
use docreg_refdata::RefDataSource;

/// Validate an applicant record, mirroring Employee details from HR.
pub fn validate_applicant<R: RefDataSource>(
    applicant: &mut Applicant,
    refdata: &R,
) -> Result<(), ValidationError> {
    match applicant.applicant_type {
        ApplicantType::Employee => {
            let employee_id = applicant
                .employee
                .clone()
                .ok_or(ValidationError::EmployeeRequired)?;
            let employee = refdata.employee(&employee_id).ok_or(
                ValidationError::EmployeeDetailsLookup {
                    employee: employee_id,
                },
            )?;
            applicant.full_name = Some(employee.employee_name);
            applicant.date_of_birth = employee.date_of_birth;
            applicant.gender = employee.gender;
        }
        ApplicantType::External => {
            if applicant
                .full_name
                .as_deref()
                .map_or(true, |name| name.trim().is_empty())
            {
                return Err(ValidationError::FullNameRequired);
            }
        }
    }
    Ok(())
}
