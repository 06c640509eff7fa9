//! Webhook identifiers.
//!
//! A tracked webhook is addressed by the decimal form of its GitHub hook ID. The hook ID
//! alone does not say which repository the hook belongs to, so importing an existing
//! webhook takes the composite form `<repository>/<hook id>` instead.

use crate::{ReconcileError, ReconcileResult};

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

/// Separator between the repository name and the hook ID in an import ID.
pub const IMPORT_ID_SEPARATOR: char = '/';

/// Encodes a hook ID as the opaque identifier stored by the caller.
pub fn encode_id(hook_id: u64) -> String {
    hook_id.to_string()
}

/// Decodes an identifier produced by [`encode_id`].
///
/// Only plain base-10 digits are accepted: signs, whitespace and values that do not fit
/// in 64 bits are rejected.
///
/// # Errors
///
/// Returns `ReconcileError::InvalidIdentifier`.
///
/// # Examples
///
/// ```rust
/// use hook_sync_core::identity::decode_id;
///
/// assert_eq!(decode_id("987654").unwrap(), 987654);
/// assert!(decode_id("-1").is_err());
/// assert!(decode_id("hook-1").is_err());
/// ```
pub fn decode_id(value: &str) -> ReconcileResult<u64> {
    if value.is_empty() {
        return Err(ReconcileError::invalid_identifier(
            value,
            "identifier is empty",
        ));
    }

    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReconcileError::invalid_identifier(
            value,
            "expected a base-10 integer",
        ));
    }

    value.parse::<u64>().map_err(|e| {
        ReconcileError::invalid_identifier(
            value,
            format!("not representable as a 64-bit integer: {}", e),
        )
    })
}

/// Builds the `<repository>/<hook id>` import identifier.
pub fn encode_import_id(repository: &str, hook_id: u64) -> String {
    format!("{}{}{}", repository, IMPORT_ID_SEPARATOR, hook_id)
}

/// Splits an import identifier into the repository name and the hook ID.
///
/// The split happens at the first separator, so everything after it must be the hook
/// ID.
///
/// # Errors
///
/// Returns `ReconcileError::InvalidIdentifier` when the separator is missing, the
/// repository part is empty, or the hook ID part fails [`decode_id`].
///
/// # Examples
///
/// ```rust
/// use hook_sync_core::identity::parse_import_id;
///
/// let (repository, hook_id) = parse_import_id("foo-abc12/987654").unwrap();
/// assert_eq!(repository, "foo-abc12");
/// assert_eq!(hook_id, 987654);
///
/// assert!(parse_import_id("no-slash-here").is_err());
/// ```
pub fn parse_import_id(value: &str) -> ReconcileResult<(String, u64)> {
    let (repository, hook_id) = value.split_once(IMPORT_ID_SEPARATOR).ok_or_else(|| {
        ReconcileError::invalid_identifier(value, "expected <repository>/<hook id>")
    })?;

    if repository.is_empty() {
        return Err(ReconcileError::invalid_identifier(
            value,
            "repository name is empty",
        ));
    }

    let hook_id = decode_id(hook_id).map_err(|e| match e {
        ReconcileError::InvalidIdentifier { reason, .. } => {
            ReconcileError::invalid_identifier(value, format!("invalid hook id: {}", reason))
        }
        other => other,
    })?;

    Ok((repository.to_string(), hook_id))
}
