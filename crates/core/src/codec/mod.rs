//! Typed codecs for storing nested content as opaque blobs in flat rows.

mod error;
mod json;
mod registry;

pub use error::{CodecError, Result};
pub use json::{JsonCodec, ABSENT};
pub use registry::{CodecRegistry, Registered};
