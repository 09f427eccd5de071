//! Client-side input validation.
//!
//! Drafts and patches are checked before any request is built, so invalid
//! input fails with [`ApiError::Validation`] and never reaches the network.

use crate::{ApiError, Result};

/// Input that can be checked before it is sent.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Require a non-blank value of at most `max` characters.
pub(crate) fn required(field: &str, value: &str, max: usize) -> Result<()> {
    length(field, value, 1, max)
}

/// Require the trimmed value to be between `min` and `max` characters.
pub(crate) fn length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len == 0 && min > 0 {
        return Err(ApiError::validation(field, "is required"));
    }
    if len < min {
        return Err(ApiError::validation(
            field,
            format!("must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err(ApiError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(())
}

/// Apply `check` to an optional patch field.
pub(crate) fn optional<F>(value: Option<&str>, check: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<()>,
{
    value.map_or(Ok(()), check)
}

/// `local@domain.tld`, no whitespace, one `@`.
pub(crate) fn email(field: &str, value: &str) -> Result<()> {
    let value = value.trim();
    let invalid = || ApiError::validation(field, "must be a valid email address");

    if value.is_empty() {
        return Err(ApiError::validation(field, "is required"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && tld.len() >= 2 => Ok(()),
        _ => Err(invalid()),
    }
}

/// Lowercase ASCII letters, digits and single inner hyphens.
pub(crate) fn slug(field: &str, value: &str) -> Result<()> {
    let well_formed = !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(ApiError::validation(
            field,
            "must contain only lowercase letters, digits and hyphens",
        ))
    }
}

/// Require `value <= max`.
pub(crate) fn at_most(field: &str, value: u8, max: u8) -> Result<()> {
    if value > max {
        return Err(ApiError::validation(field, format!("must be between 0 and {max}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_common_addresses() {
        assert!(email("email", "jane@example.com").is_ok());
        assert!(email("email", "first.last+tag@mail.example.co").is_ok());
    }

    #[test]
    fn email_rejects_malformed() {
        for bad in ["", "plain", "@example.com", "a@b", "a@.com", "a b@example.com", "a@b@c.com", "a@example.c"] {
            assert!(email("email", bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn slug_rules() {
        assert!(slug("slug", "hello-world-2").is_ok());
        for bad in ["", "Hello", "-lead", "trail-", "double--dash", "space here"] {
            assert!(slug("slug", bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(length("name", "Zoë", 3, 3).is_ok());
    }

    #[test]
    fn blank_is_required_error() {
        let err = required("title", "   ", 10).unwrap_err();
        assert_eq!(err, ApiError::validation("title", "is required"));
    }
}
