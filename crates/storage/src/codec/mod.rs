//! Value codec abstraction.
//!
//! The codec seam is where compressing buckets shrink and restore values.
//! A store holds a single codec; buckets opt in with their `compress` flag.
//!
//! - `ZstdCodec`: zstd frames (default)
//! - `IdentityCodec`: no transformation
//!
//! # Usage
//!
//! ```
//! use magnetic_storage::codec::{CodecError, ValueCodec, ZstdCodec};
//!
//! # fn main() -> Result<(), CodecError> {
//! let codec = ZstdCodec::default();
//! let stored = codec.compress(b"hello world")?;
//! let value = codec.decompress(&stored)?;
//! assert_eq!(value, b"hello world");
//! # Ok(())
//! # }
//! ```

mod identity;
mod traits;
mod zstd_codec;

pub use self::identity::IdentityCodec;
pub use self::traits::{CodecError, ValueCodec};
pub use self::zstd_codec::ZstdCodec;

use std::sync::Arc;

/// Look up a codec by its identifier
pub fn codec_for_id(id: &str) -> Result<Arc<dyn ValueCodec>, CodecError> {
    match id {
        "zstd" => Ok(Arc::new(ZstdCodec::default())),
        "identity" => Ok(Arc::new(IdentityCodec)),
        other => Err(CodecError::UnknownCodec(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_for_id() {
        assert_eq!(codec_for_id("zstd").unwrap().codec_id(), "zstd");
        assert_eq!(codec_for_id("identity").unwrap().codec_id(), "identity");
        assert!(matches!(
            codec_for_id("lz4"),
            Err(CodecError::UnknownCodec(_))
        ));
    }
}
