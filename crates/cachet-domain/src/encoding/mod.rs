//! Encoding layer
//!
//! Turns cache values into the bytes stored at a physical key and back.
//!
//! ## Resolution order
//!
//! | Codec configured | Codec result | Value has raw binary form | Outcome |
//! |------------------|--------------|---------------------------|---------|
//! | yes | ok | - | codec bytes |
//! | yes | error | yes | raw binary bytes |
//! | yes | error | no | codec error |
//! | no | - | yes | raw binary bytes |
//! | no | - | no | error |
//!
//! Decoding mirrors the table.

pub mod codec;
pub mod registry;
pub mod value;

pub use codec::{Codec, Document, JsonCodec, YamlCodec};
pub use registry::{get_codec, register_codec, registered_codecs};
pub use value::{CacheValue, RawBytes, marshal, unmarshal};
