//! Physical key construction

use crate::constants::CACHE_KEY_SEPARATOR;
use crate::error::{Error, Result};

/// Build the physical key sent to the backend.
///
/// Returns `prefix:key`, or `key` unchanged when `prefix` is empty.
/// Neither part is escaped: callers must keep prefixes and keys free of `:`
/// if they rely on the mapping being reversible.
///
/// # Errors
///
/// [`Error::EmptyKey`] when `key` is empty.
pub fn build_cache_key(prefix: &str, key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(Error::EmptyKey);
    }

    if prefix.is_empty() {
        return Ok(key.to_string());
    }

    Ok([prefix, key].join(CACHE_KEY_SEPARATOR))
}
