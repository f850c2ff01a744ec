// Endpoint modules
//
// Each file adds inherent `SeriphClient` methods for one resource family.
// Required fields are checked here, before any request is built.

pub mod announcements;
pub mod comments;
pub mod feedback;
pub mod forms;
pub mod polls;
pub mod posts;
pub mod reactions;
pub mod subscribe;
pub mod views;
pub mod waitlist;

use crate::error::Error;

/// Reject blank required string fields.
pub(crate) fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(trimmed)
}

/// Minimal structural email check; the server does the real validation.
pub(crate) fn require_email(value: &str) -> Result<&str, Error> {
    let email = require("email", value)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(Error::validation("email", format!("not an email address: {email}"))),
    }
}
