//! MSB-first bit streams over byte-oriented readers and writers.
//!
//! The coder produces and consumes individual bits; these adapters pack them
//! into bytes, most significant bit first. The writer zero-pads its final
//! byte, and the reader serves a bounded run of zero bits once the byte
//! source is exhausted, mirroring that padding from the other side.

use std::io::{ErrorKind, Read, Write};

use crate::error::{Error, Result};

/// Zero bits a reader will serve past end of input before reporting
/// truncation. Twice the coder's register width: covers the initial register
/// fill of a minimal stream plus one final renormalization run.
const TAIL_ZERO_BITS: u32 = 34;

/// Packs bits MSB-first into an underlying byte writer.
pub struct BitWriter<W: Write> {
    inner: W,
    buf: u8,
    filled: u8,
}

impl<W: Write> BitWriter<W> {
    /// Create a writer over `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: 0,
            filled: 0,
        }
    }

    /// Append one bit.
    pub fn put(&mut self, bit: bool) -> Result<()> {
        self.buf = (self.buf << 1) | u8::from(bit);
        self.filled += 1;
        if self.filled == 8 {
            self.inner.write_all(&[self.buf])?;
            self.buf = 0;
            self.filled = 0;
        }
        Ok(())
    }

    /// Zero-pad any partial byte, write it out, and flush the underlying
    /// writer.
    pub fn flush(&mut self) -> Result<()> {
        if self.filled > 0 {
            self.buf <<= 8 - self.filled;
            self.inner.write_all(&[self.buf])?;
            self.buf = 0;
            self.filled = 0;
        }
        self.inner.flush()?;
        Ok(())
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Reads bits MSB-first from an underlying byte reader.
pub struct BitReader<R: Read> {
    inner: R,
    buf: u8,
    consumed: u8,
    tail_zeros: u32,
}

impl<R: Read> BitReader<R> {
    /// Create a reader over `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: 0,
            consumed: 8,
            tail_zeros: 0,
        }
    }

    /// Read one bit.
    ///
    /// After the byte source runs dry, a bounded run of zero bits is served
    /// (a well-formed stream reads a few bits past its zero-padded final
    /// byte); beyond that the stream is truncated.
    pub fn get(&mut self) -> Result<bool> {
        if self.consumed == 8 {
            let mut byte = [0u8; 1];
            match self.inner.read_exact(&mut byte) {
                Ok(()) => {
                    self.buf = byte[0];
                    self.consumed = 0;
                }
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    self.tail_zeros += 1;
                    if self.tail_zeros > TAIL_ZERO_BITS {
                        return Err(Error::TruncatedStream);
                    }
                    return Ok(false);
                }
                Err(e) => return Err(e.into()),
            }
        }
        let bit = (self.buf >> (7 - self.consumed)) & 1;
        self.consumed += 1;
        Ok(bit == 1)
    }
}
