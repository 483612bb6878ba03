use super::Codec;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::{self, Read, Write};

/// Base64 alphabet and padding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Base64Variant {
    #[default]
    Standard,
    StandardNoPad,
    UrlSafe,
    UrlSafeNoPad,
}

impl Base64Variant {
    fn encode(self, data: &[u8]) -> String {
        match self {
            Base64Variant::Standard => STANDARD.encode(data),
            Base64Variant::StandardNoPad => STANDARD_NO_PAD.encode(data),
            Base64Variant::UrlSafe => URL_SAFE.encode(data),
            Base64Variant::UrlSafeNoPad => URL_SAFE_NO_PAD.encode(data),
        }
    }

    fn decode(self, text: &str) -> Result<Vec<u8>, base64::DecodeError> {
        match self {
            Base64Variant::Standard => STANDARD.decode(text),
            Base64Variant::StandardNoPad => STANDARD_NO_PAD.decode(text),
            Base64Variant::UrlSafe => URL_SAFE.decode(text),
            Base64Variant::UrlSafeNoPad => URL_SAFE_NO_PAD.decode(text),
        }
    }
}

/// Stores binary data as base64 text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Base64 {
    variant: Base64Variant,
}

impl Base64 {
    #[must_use]
    pub fn new(variant: Base64Variant) -> Self {
        Self { variant }
    }
}

impl Codec for Base64 {
    type Value = Vec<u8>;
    type Stored = String;

    fn encode(&self, value: &Vec<u8>) -> Option<String> {
        Some(self.variant.encode(value))
    }

    fn decode(&self, stored: &String) -> Option<Vec<u8>> {
        self.variant.decode(stored).ok()
    }
}

/// Stream format used by [`Compressed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionAlgorithm {
    #[default]
    Zlib,
    Deflate,
    Gzip,
    /// Zstandard at the given level (1-22)
    Zstd { level: i32 },
}

impl CompressionAlgorithm {
    fn compress(self, data: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            CompressionAlgorithm::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            CompressionAlgorithm::Deflate => {
                let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            CompressionAlgorithm::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            CompressionAlgorithm::Zstd { level } => zstd::stream::encode_all(data, level),
        }
    }

    fn decompress(self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        match self {
            CompressionAlgorithm::Zlib => {
                ZlibDecoder::new(data).read_to_end(&mut out)?;
            }
            CompressionAlgorithm::Deflate => {
                DeflateDecoder::new(data).read_to_end(&mut out)?;
            }
            CompressionAlgorithm::Gzip => {
                GzDecoder::new(data).read_to_end(&mut out)?;
            }
            CompressionAlgorithm::Zstd { .. } => {
                out = zstd::stream::decode_all(data)?;
            }
        }
        Ok(out)
    }
}

/// Stores binary data compressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Compressed {
    algorithm: CompressionAlgorithm,
}

impl Compressed {
    #[must_use]
    pub fn new(algorithm: CompressionAlgorithm) -> Self {
        Self { algorithm }
    }

    #[must_use]
    pub fn algorithm(&self) -> CompressionAlgorithm {
        self.algorithm
    }
}

impl Codec for Compressed {
    type Value = Vec<u8>;
    type Stored = Vec<u8>;

    fn encode(&self, value: &Vec<u8>) -> Option<Vec<u8>> {
        match self.algorithm.compress(value) {
            Ok(compressed) => Some(compressed),
            Err(e) => {
                tracing::debug!("Compression with {:?} failed: {}", self.algorithm, e);
                None
            }
        }
    }

    fn decode(&self, stored: &Vec<u8>) -> Option<Vec<u8>> {
        match self.algorithm.decompress(stored) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::debug!("Decompression with {:?} failed: {}", self.algorithm, e);
                None
            }
        }
    }
}
