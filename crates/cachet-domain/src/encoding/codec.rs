//! Named codecs
//!
//! A codec converts a self-describing [`Document`] to bytes and back.
//! Working on a document tree rather than on concrete types keeps the trait
//! object safe, so codecs can be stored in the process-wide registry and
//! selected by name from configuration.

use crate::constants::{JSON_CODEC_NAME, YAML_CODEC_NAME};
use crate::error::{Error, Result};
use std::fmt;

/// Intermediate representation handed to codecs
pub type Document = serde_json::Value;

/// Marshal/unmarshal strategy resolvable by name
///
/// Implementations must be thread-safe; the same codec instance is shared
/// by every cache that resolved it from the registry.
pub trait Codec: Send + Sync + fmt::Debug {
    /// Name used as the registry key (case-insensitive)
    ///
    /// The result must be static: it may not change between calls.
    fn name(&self) -> &str;

    /// Encode a document into its wire form
    fn marshal(&self, document: &Document) -> Result<Vec<u8>>;

    /// Decode the wire form into a document
    fn unmarshal(&self, data: &[u8]) -> Result<Document>;
}

/// JSON codec backed by `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &str {
        JSON_CODEC_NAME
    }

    fn marshal(&self, document: &Document) -> Result<Vec<u8>> {
        serde_json::to_vec(document)
            .map_err(|e| Error::codec(format!("JSON marshal failed: {e}"), Some(Box::new(e))))
    }

    fn unmarshal(&self, data: &[u8]) -> Result<Document> {
        serde_json::from_slice(data)
            .map_err(|e| Error::codec(format!("JSON unmarshal failed: {e}"), Some(Box::new(e))))
    }
}

/// YAML codec backed by `serde_yaml`
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn name(&self) -> &str {
        YAML_CODEC_NAME
    }

    fn marshal(&self, document: &Document) -> Result<Vec<u8>> {
        serde_yaml::to_string(document)
            .map(String::into_bytes)
            .map_err(|e| Error::codec(format!("YAML marshal failed: {e}"), Some(Box::new(e))))
    }

    fn unmarshal(&self, data: &[u8]) -> Result<Document> {
        serde_yaml::from_slice(data)
            .map_err(|e| Error::codec(format!("YAML unmarshal failed: {e}"), Some(Box::new(e))))
    }
}
