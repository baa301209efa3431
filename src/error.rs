//! Error types for the neural PCM codec.

use thiserror::Error;

/// Error variants for encode and decode operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The input ended before a complete 44-byte WAV header could be read.
    #[error("truncated wav header (need 44 bytes)")]
    TruncatedHeader,

    /// The WAV header describes a format other than 16-bit mono PCM.
    #[error("unsupported wav format: {channels} channel(s), {bits_per_sample} bits per sample (need 16-bit mono)")]
    UnsupportedFormat {
        /// Channel count found at header offset 22.
        channels: u16,
        /// Sample width found at header offset 34.
        bits_per_sample: u16,
    },

    /// The compressed bit stream ended before the stop symbol was decoded.
    #[error("truncated bit stream")]
    TruncatedStream,

    /// An I/O error occurred during encoding or decoding.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;
