//! Value codec trait definitions.

use magnetic_core::MagneticError;

/// Value codec trait.
///
/// Buckets created with compression enabled pass every stored value through
/// the codec: `compress` on write, `decompress` on read.
///
/// # Contract
///
/// `decompress(compress(x)) == x` for every byte sequence `x`. Failures are
/// reported as [`CodecError`], never swallowed.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync`; one codec instance serves all buckets and
/// is called concurrently from reader threads.
pub trait ValueCodec: Send + Sync {
    /// Compress bytes for storage.
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Restore bytes produced by [`ValueCodec::compress`].
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Unique codec identifier.
    ///
    /// Recorded in snapshots so that restored values are decoded with the
    /// codec that produced them.
    fn codec_id(&self) -> &str;
}

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Compression failed.
    #[error("Compress error: {0}")]
    CompressError(String),

    /// Decompression failed (e.g., truncated or corrupt input).
    #[error("Decompress error: {0}")]
    DecompressError(String),

    /// Unknown codec identifier.
    #[error("Unknown codec: {0}")]
    UnknownCodec(String),
}

impl From<CodecError> for MagneticError {
    fn from(e: CodecError) -> Self {
        MagneticError::CompressionFailure(e.to_string())
    }
}
