//! Zstandard value codec.
//!
//! The default codec for compressing buckets. Each value is an independent
//! zstd frame, so values can be decoded without any shared dictionary.

use super::traits::{CodecError, ValueCodec};

/// Zstandard codec with a fixed compression level.
#[derive(Debug, Clone, Copy)]
pub struct ZstdCodec {
    level: i32,
}

impl ZstdCodec {
    /// Codec with an explicit compression level (1-22)
    pub fn new(level: i32) -> Self {
        ZstdCodec { level }
    }

    /// Configured compression level
    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdCodec {
    fn default() -> Self {
        ZstdCodec::new(zstd::DEFAULT_COMPRESSION_LEVEL)
    }
}

impl ValueCodec for ZstdCodec {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        zstd::encode_all(data, self.level).map_err(|e| CodecError::CompressError(e.to_string()))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CodecError> {
        zstd::decode_all(data).map_err(|e| CodecError::DecompressError(e.to_string()))
    }

    fn codec_id(&self) -> &str {
        "zstd"
    }
}
