//! Identity codec (no transformation).
//!
//! Used when a store is configured without compression support, and in
//! tests that want to observe stored bytes directly.

use super::traits::{CodecError, ValueCodec};

/// Identity codec - bytes pass through unchanged.
///
/// # Example
///
/// ```
/// use magnetic_storage::codec::{IdentityCodec, ValueCodec};
///
/// let codec = IdentityCodec;
/// let data = b"hello world";
///
/// let stored = codec.compress(data).unwrap();
/// assert_eq!(data.as_slice(), stored.as_slice());
/// assert_eq!(codec.decompress(&stored).unwrap(), data.to_vec());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCodec;

impl ValueCodec for IdentityCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(data.to_vec())
    }

    fn codec_id(&self) -> &str {
        "identity"
    }
}
