//! Cacheable values and the marshal/unmarshal entry points

use crate::encoding::codec::Codec;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A value that can be stored in a cache
///
/// Every cache value is serde-serializable so any registered codec can
/// handle it. Types that also know how to write themselves as raw bytes
/// override [`marshal_binary`](Self::marshal_binary) and
/// [`unmarshal_binary`](Self::unmarshal_binary); those are used when no
/// codec is configured or when the codec fails.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct User { id: u64, name: String }
///
/// impl CacheValue for User {}
/// ```
pub trait CacheValue: Serialize + DeserializeOwned + Send + Sync {
    /// Raw byte form of the value, if the type has one
    fn marshal_binary(&self) -> Option<Result<Vec<u8>>> {
        None
    }

    /// Rebuild the value from its raw byte form, if the type has one
    fn unmarshal_binary(_data: &[u8]) -> Option<Result<Self>> {
        None
    }
}

/// Encode `value`, preferring `codec` and falling back to the raw form
pub fn marshal<T: CacheValue>(codec: Option<&dyn Codec>, value: &T) -> Result<Vec<u8>> {
    let Some(codec) = codec else {
        return value.marshal_binary().unwrap_or_else(|| {
            Err(Error::codec(
                "no codec configured and value has no binary form",
                None,
            ))
        });
    };

    let encoded = serde_json::to_value(value)
        .map_err(Error::from)
        .and_then(|document| codec.marshal(&document));

    match encoded {
        Ok(data) => Ok(data),
        Err(err) => value.marshal_binary().unwrap_or(Err(err)),
    }
}

/// Decode `data`, preferring `codec` and falling back to the raw form
pub fn unmarshal<T: CacheValue>(codec: Option<&dyn Codec>, data: &[u8]) -> Result<T> {
    let Some(codec) = codec else {
        return T::unmarshal_binary(data).unwrap_or_else(|| {
            Err(Error::codec(
                "no codec configured and value has no binary form",
                None,
            ))
        });
    };

    let decoded = codec
        .unmarshal(data)
        .and_then(|document| serde_json::from_value(document).map_err(Error::from));

    match decoded {
        Ok(value) => Ok(value),
        Err(err) => T::unmarshal_binary(data).unwrap_or(Err(err)),
    }
}

/// Opaque bytes stored verbatim when no codec is configured
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawBytes(pub Vec<u8>);

impl CacheValue for RawBytes {
    fn marshal_binary(&self) -> Option<Result<Vec<u8>>> {
        Some(Ok(self.0.clone()))
    }

    fn unmarshal_binary(data: &[u8]) -> Option<Result<Self>> {
        Some(Ok(Self(data.to_vec())))
    }
}

impl From<Vec<u8>> for RawBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl CacheValue for String {
    fn marshal_binary(&self) -> Option<Result<Vec<u8>>> {
        Some(Ok(self.as_bytes().to_vec()))
    }

    fn unmarshal_binary(data: &[u8]) -> Option<Result<Self>> {
        Some(String::from_utf8(data.to_vec()).map_err(|e| {
            Error::codec(format!("invalid UTF-8 in cached value: {e}"), Some(Box::new(e)))
        }))
    }
}

macro_rules! impl_cache_value {
    ($($ty:ty),* $(,)?) => {
        $(impl CacheValue for $ty {})*
    };
}

impl_cache_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    u8,
    u16,
    u32,
    u64,
    u128,
    isize,
    usize,
    f32,
    f64,
    char,
    serde_json::Value,
);

impl<T: CacheValue> CacheValue for Option<T> {}
impl<T: CacheValue> CacheValue for Vec<T> {}
impl<T: CacheValue> CacheValue for HashMap<String, T> {}
impl<T: CacheValue> CacheValue for BTreeMap<String, T> {}
