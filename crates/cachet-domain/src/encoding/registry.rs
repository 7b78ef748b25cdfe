//! Process-wide codec registry
//!
//! Codecs are stored under the lower-cased result of [`Codec::name`], the
//! way content subtypes are matched. The JSON and YAML codecs are
//! registered on first access.
//!
//! Registration is meant to happen during start-up, before any cache
//! resolves a codec by name. Registering a name twice replaces the earlier
//! codec.

use crate::encoding::codec::{Codec, JsonCodec, YamlCodec};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

type CodecMap = HashMap<String, Arc<dyn Codec>>;

static REGISTERED_CODECS: LazyLock<RwLock<CodecMap>> = LazyLock::new(|| {
    let mut codecs: CodecMap = HashMap::new();
    for codec in [Arc::new(JsonCodec) as Arc<dyn Codec>, Arc::new(YamlCodec)] {
        codecs.insert(codec.name().to_lowercase(), codec);
    }
    RwLock::new(codecs)
});

/// Register a codec for every cache created afterwards
///
/// # Panics
///
/// Panics if `codec.name()` is empty. A nameless codec is a configuration
/// bug and is rejected at registration rather than at lookup.
pub fn register_codec(codec: Arc<dyn Codec>) {
    assert!(
        !codec.name().is_empty(),
        "cannot register Codec with empty string result for name()"
    );

    let content_subtype = codec.name().to_lowercase();
    tracing::debug!(codec = %content_subtype, "Registering codec");
    REGISTERED_CODECS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(content_subtype, codec);
}

/// Look up a registered codec by name
pub fn get_codec(content_subtype: &str) -> Option<Arc<dyn Codec>> {
    REGISTERED_CODECS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&content_subtype.to_lowercase())
        .cloned()
}

/// Names of all registered codecs, sorted
pub fn registered_codecs() -> Vec<String> {
    let mut names: Vec<String> = REGISTERED_CODECS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .keys()
        .cloned()
        .collect();
    names.sort();
    names
}
