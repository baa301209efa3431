//! Opaque 44-byte WAV header handling.
//!
//! The codec never parses the container beyond two sanity fields; the header
//! is carried through both directions verbatim.

use std::io::{ErrorKind, Read, Write};

use crate::error::{Error, Result};

/// Length of the WAV header carried verbatim through the codec.
pub const HEADER_LEN: usize = 44;

/// A 44-byte WAV header, treated as opaque bytes.
///
/// Only the channel count (offset 22) and sample width (offset 34) are ever
/// inspected; everything else passes through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavHeader {
    bytes: [u8; HEADER_LEN],
}

impl WavHeader {
    /// Wrap raw header bytes.
    pub fn from_bytes(bytes: [u8; HEADER_LEN]) -> Self {
        Self { bytes }
    }

    /// Read a header from `reader`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_LEN];
        reader.read_exact(&mut bytes).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                Error::TruncatedHeader
            } else {
                Error::Io(e)
            }
        })?;
        Ok(Self { bytes })
    }

    /// Check that the header describes 16-bit mono PCM.
    pub fn validate(&self) -> Result<()> {
        let channels = u16::from_le_bytes([self.bytes[22], self.bytes[23]]);
        let bits_per_sample = u16::from_le_bytes([self.bytes[34], self.bytes[35]]);
        if channels != 1 || bits_per_sample != 16 {
            return Err(Error::UnsupportedFormat {
                channels,
                bits_per_sample,
            });
        }
        Ok(())
    }

    /// Write the header to `writer`, unchanged.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.bytes)?;
        Ok(())
    }

    /// The raw header bytes.
    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.bytes
    }
}
