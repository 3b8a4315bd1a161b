use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::model::{InstituteForm, StudentForm};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid contact regex"));

/// Input rejection raised before any store call is made. The message names
/// the failing rule and is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Contact number must be exactly 10 digits")]
    InvalidContact,

    #[error("Select an institute from the list")]
    UnknownInstitute,
}

/// Institute submissions require every field non-empty, a well-formed email
/// and a 10-digit contact number.
pub fn validate_institute(form: &InstituteForm) -> Result<(), ValidationError> {
    if form.name.is_empty()
        || form.address.is_empty()
        || form.contact.is_empty()
        || form.email.is_empty()
    {
        return Err(ValidationError::MissingFields);
    }
    if !EMAIL_RE.is_match(&form.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if !CONTACT_RE.is_match(&form.contact) {
        return Err(ValidationError::InvalidContact);
    }
    Ok(())
}

/// Student submissions only gate on the contact number; the remaining
/// fields are free text.
pub fn validate_student(form: &StudentForm) -> Result<(), ValidationError> {
    if !CONTACT_RE.is_match(&form.contact_no) {
        return Err(ValidationError::InvalidContact);
    }
    Ok(())
}
