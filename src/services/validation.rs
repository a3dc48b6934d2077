//! Bookmark form validation for Marksync.
//!
//! Validates the title and address a user typed before anything is sent to
//! the Store, and normalizes scheme-less addresses to https. Each failing
//! condition maps to its own `ValidationError` variant whose `Display` text
//! is the message shown in the form.

use url::Url;

use crate::types::bookmark::{ADDRESS_MAX_LEN, TITLE_MAX_LEN};
use crate::types::errors::ValidationError;

/// Prepend `https://` when the address carries no scheme at all.
///
/// Addresses with an explicit non-http scheme (`ftp://...`) are left alone
/// so the scheme check can reject them with a specific message.
pub fn normalize_address(address: &str) -> String {
    if address.starts_with("http://")
        || address.starts_with("https://")
        || address.contains("://")
    {
        address.to_string()
    } else {
        format!("https://{}", address)
    }
}

/// Title must be non-empty after trimming and within bounds.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if trimmed.chars().count() > TITLE_MAX_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(())
}

/// Validate an address and return its normalized form.
///
/// Accepts absolute http/https URLs whose hostname contains at least two
/// dot-separated non-empty labels, only alphanumerics, `.` and `-`, and an
/// alphabetic top-level label of 2-6 characters.
pub fn validate_address(address: &str) -> Result<String, ValidationError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::AddressRequired);
    }

    let normalized = normalize_address(trimmed);
    if normalized.chars().count() > ADDRESS_MAX_LEN {
        return Err(ValidationError::AddressTooLong);
    }

    let parsed = Url::parse(&normalized).map_err(|_| ValidationError::InvalidUrl)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::SchemeNotAllowed);
    }

    let host = match parsed.host_str() {
        Some(h) if !h.is_empty() => h,
        _ => return Err(ValidationError::MissingDomain),
    };
    if !host.contains('.') {
        return Err(ValidationError::MissingDomain);
    }
    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ValidationError::InvalidHostCharacters);
    }

    let labels: Vec<&str> = host.split('.').collect();
    // Covers both the top-level/domain label pair and inner labels like "a..b"
    if labels.iter().any(|l| l.is_empty()) {
        return Err(ValidationError::MissingDomain);
    }
    let top = labels[labels.len() - 1];
    if top.len() < 2 || top.len() > 6 || !top.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidTopLevelDomain);
    }

    Ok(normalized)
}

/// Validate a whole add-bookmark submission.
///
/// Returns the trimmed title and normalized address ready to send to the
/// Store. Nothing is mutated and no request is issued when this fails.
pub fn validate_new_bookmark(
    title: &str,
    address: &str,
) -> Result<(String, String), ValidationError> {
    validate_title(title)?;
    let normalized = validate_address(address)?;
    Ok((title.trim().to_string(), normalized))
}
