//! Binary arithmetic coder with a 17-bit code register.
//!
//! The coder maintains a shrinking interval `[low, high]` inside a 17-bit
//! code space. Encoding a symbol narrows the interval in proportion to the
//! symbol's cumulative frequency range; whenever the interval falls entirely
//! into one half of the space, the settled top bit is emitted and the
//! interval is rescaled. An interval straddling the midpoint within the
//! middle half cannot settle a bit yet; those underflow steps are counted as
//! pending bits and resolved in a batch by the next settled bit.
//!
//! The coder is generic over its probability model, so it can be exercised
//! against a trivial fixed distribution independently of the adaptive model
//! that production streams use.

use std::io::{Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::error::Result;

/// Largest value representable in the 17-bit code registers.
pub const MAX_CODE: u32 = 0x1FFFF;
/// First-quarter boundary of the code space.
pub const INT25: u32 = 0x08000;
/// Midpoint of the code space.
pub const INT50: u32 = 0x10000;
/// Third-quarter boundary of the code space.
pub const INT75: u32 = 0x18000;
/// Width of the code registers in bits.
pub const CODE_BITS: u32 = 17;

/// Probability model driving the coder.
///
/// The coder only ever sees cumulative frequency intervals on a fixed scale;
/// everything about how those intervals adapt lives behind this trait.
pub trait Model {
    /// Number of symbols in the alphabet, including any reserved terminator.
    const NUM_SYMBOLS: u16;
    /// Top of the cumulative frequency scale. Must not exceed `INT25` so the
    /// renormalized interval always gives every symbol a nonempty range.
    const MAX_FREQUENCY: u16;

    /// Cumulative frequency interval `[low, high)` of `symbol` under the
    /// currently active distribution.
    fn symbol_interval(&self, symbol: u16) -> (u16, u16);

    /// The unique symbol whose interval contains the scaled frequency
    /// `freq`, together with that interval's bounds.
    fn frequency_symbol(&self, freq: u16) -> (u16, u16, u16);

    /// Advance the model after a symbol has been encoded or decoded.
    fn update_state(&mut self, symbol: u16);
}

/// Narrow `[low, high]` to the sub-interval owned by a symbol.
///
/// The intermediate products need 33 bits (17-bit range times 16-bit
/// frequency), hence the 64-bit arithmetic.
fn narrow_range(low: &mut u32, high: &mut u32, sym_low: u16, sym_high: u16, max_frequency: u16) {
    let range = u64::from(*high - *low + 1);
    *high = *low + (range * u64::from(sym_high) / u64::from(max_frequency)) as u32 - 1;
    *low += (range * u64::from(sym_low) / u64::from(max_frequency)) as u32;
}

/// Arithmetic encoder over a probability model.
pub struct ArithmeticEncoder<M: Model> {
    /// The probability model. Callers advance it with
    /// [`Model::update_state`] after each encoded symbol.
    pub model: M,
    /// Number of bits written so far.
    pub bits_written: u64,
    /// Number of symbols encoded so far.
    pub symbols_written: u64,
    low: u32,
    high: u32,
    pending_bits: u32,
}

impl<M: Model + Default> Default for ArithmeticEncoder<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M: Model> ArithmeticEncoder<M> {
    /// Create an encoder around `model`.
    pub fn new(model: M) -> Self {
        Self {
            model,
            bits_written: 0,
            symbols_written: 0,
            low: 0,
            high: MAX_CODE,
            pending_bits: 0,
        }
    }

    /// Encode one symbol, emitting any settled bits into `sink`.
    pub fn encode<W: Write>(&mut self, symbol: u16, sink: &mut BitWriter<W>) -> Result<()> {
        self.symbols_written += 1;

        let (sym_low, sym_high) = self.model.symbol_interval(symbol);
        debug_assert!(sym_low < sym_high && sym_high <= M::MAX_FREQUENCY);

        narrow_range(&mut self.low, &mut self.high, sym_low, sym_high, M::MAX_FREQUENCY);

        loop {
            if self.high < INT50 {
                // Interval settled in the lower half.
                self.write_bits(false, sink)?;
            } else if self.low >= INT50 {
                // Interval settled in the upper half.
                self.write_bits(true, sink)?;
            } else if self.low >= INT25 && self.high < INT75 {
                // Underflow: straddling the midpoint inside the middle half.
                self.pending_bits += 1;
                self.low -= INT25;
                self.high -= INT25;
            } else {
                break;
            }
            self.low = (self.low << 1) & MAX_CODE;
            self.high = ((self.high << 1) | 1) & MAX_CODE;
        }

        debug_assert!(self.low < self.high && self.high <= MAX_CODE);
        debug_assert!(self.high - self.low >= INT25);
        Ok(())
    }

    /// Terminate the stream: emit one disambiguating bit plus any pending
    /// complements. Must be called exactly once, after the final symbol.
    pub fn flush<W: Write>(&mut self, sink: &mut BitWriter<W>) -> Result<()> {
        self.pending_bits += 1;
        let bit = self.low >= INT25;
        self.write_bits(bit, sink)
    }

    fn write_bits<W: Write>(&mut self, bit: bool, sink: &mut BitWriter<W>) -> Result<()> {
        self.bits_written += 1 + u64::from(self.pending_bits);
        sink.put(bit)?;
        for _ in 0..self.pending_bits {
            sink.put(!bit)?;
        }
        self.pending_bits = 0;
        Ok(())
    }
}

/// Arithmetic decoder over a probability model.
pub struct ArithmeticDecoder<M: Model> {
    /// The probability model. Callers advance it with
    /// [`Model::update_state`] after each decoded symbol, mirroring the
    /// encoder step for step.
    pub model: M,
    /// Number of bits read so far.
    pub bits_read: u64,
    /// Number of symbols decoded so far.
    pub symbols_read: u64,
    low: u32,
    high: u32,
    value: u32,
}

impl<M: Model + Default> Default for ArithmeticDecoder<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M: Model> ArithmeticDecoder<M> {
    /// Create a decoder around `model`.
    pub fn new(model: M) -> Self {
        Self {
            model,
            bits_read: 0,
            symbols_read: 0,
            low: 0,
            high: MAX_CODE,
            value: 0,
        }
    }

    /// Fill the code register with the first [`CODE_BITS`] bits of the
    /// stream. Must be called exactly once, before the first decode.
    pub fn init<R: Read>(&mut self, source: &mut BitReader<R>) -> Result<()> {
        self.value = 0;
        for _ in 0..CODE_BITS {
            self.value = (self.value << 1) | u32::from(source.get()?);
            self.bits_read += 1;
        }
        Ok(())
    }

    /// Decode one symbol, consuming bits from `source` as the interval
    /// rescales.
    pub fn decode<R: Read>(&mut self, source: &mut BitReader<R>) -> Result<u16> {
        self.symbols_read += 1;

        let range = u64::from(self.high - self.low + 1);
        let scaled =
            ((u64::from(self.value - self.low + 1) * u64::from(M::MAX_FREQUENCY) - 1) / range)
                as u16;

        let (symbol, sym_low, sym_high) = self.model.frequency_symbol(scaled);

        narrow_range(&mut self.low, &mut self.high, sym_low, sym_high, M::MAX_FREQUENCY);

        loop {
            if self.high < INT50 {
                // Lower half: the shift alone rescales.
            } else if self.low >= INT50 {
                self.value -= INT50;
                self.low -= INT50;
                self.high -= INT50;
            } else if self.low >= INT25 && self.high < INT75 {
                self.value -= INT25;
                self.low -= INT25;
                self.high -= INT25;
            } else {
                break;
            }
            // The subtractions leave every register below INT50, so the
            // shifts cannot escape the 17-bit code space; no mask needed.
            debug_assert!(self.high < INT50);
            self.low <<= 1;
            self.high = (self.high << 1) | 1;
            self.value = (self.value << 1) | u32::from(source.get()?);
            self.bits_read += 1;
        }

        debug_assert!(self.low < self.high && self.high <= MAX_CODE);
        debug_assert!(self.high - self.low >= INT25);
        debug_assert!(self.low <= self.value && self.value <= self.high);
        Ok(symbol)
    }
}
