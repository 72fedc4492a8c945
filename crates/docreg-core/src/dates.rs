//! # Validity Window Arithmetic
//!
//! Civil-date helpers for document validity windows. The registry counts
//! validity inclusively: a document with a 30-day validity issued on day 1
//! is valid through day 30. The last valid day is therefore
//! `issue + (validity_days - 1)`.
//!
//! All expiry derivation in the workspace flows through
//! [`validity_window_end`] so the inclusive convention lives in one place.

use chrono::{Days, NaiveDate};

/// Compute the last valid day of an inclusive validity window.
///
/// Returns `None` when `validity_days` is zero (a window with no valid
/// days is a configuration defect, rejected upstream) or when the window
/// runs past the end of the supported calendar.
pub fn validity_window_end(issue: NaiveDate, validity_days: u32) -> Option<NaiveDate> {
    let span = validity_days.checked_sub(1)?;
    issue.checked_add_days(Days::new(u64::from(span)))
}
