//! # Adaptive arithmetic coding for neural PCM
//!
//! *Bit-exact lossless compression for single-channel 16-bit neural
//! recordings.*
//!
//! ## Intuition First
//!
//! An arithmetic coder represents an entire message as one number inside
//! [0, 1). Each symbol narrows the current interval in proportion to its
//! probability: likely symbols shave off little (costing a fraction of a
//! bit), unlikely ones a lot. Emitting the binary expansion of the final
//! interval approaches the Shannon limit without rounding code lengths to
//! whole bits the way prefix codes must.
//!
//! The probability side is where the domain knowledge lives. Neural voltage
//! traces are locally stationary: the signal hovers around a slowly moving
//! baseline with episodes of higher volatility. Instead of adapting
//! per-symbol counts, the model tracks two summary statistics online (an
//! exponential moving mean and a GARCH(1,1) volatility estimate) and uses
//! them to pick one of four precomputed distributions and to rotate the
//! symbol alphabet so the distribution stays centered on the baseline.
//!
//! ## The Coder
//!
//! Classic integer implementation: a 17-bit code register, 15-bit
//! frequencies, interval narrowing with 64-bit intermediates, and
//! renormalization that emits settled top bits and counts underflow steps
//! as pending bits resolved by the next settled bit.
//!
//! ## The Container
//!
//! The samples arrive as 16-bit mono WAV. The 44-byte header is copied
//! through verbatim (only channel count and sample width are checked), the
//! payload is a single arithmetic-coded bit stream terminated by a reserved
//! stop symbol, and the low six bits of every sample carry a fixed device
//! pattern that a pair of calibration maps removes and restores.
//!
//! ## Example
//!
//! ```
//! use nwav::{decode_bytes, encode_bytes};
//!
//! // A minimal 16-bit mono WAV: 44-byte header, no samples.
//! let mut wav = vec![0u8; 44];
//! wav[..4].copy_from_slice(b"RIFF");
//! wav[8..12].copy_from_slice(b"WAVE");
//! wav[22..24].copy_from_slice(&1u16.to_le_bytes()); // mono
//! wav[34..36].copy_from_slice(&16u16.to_le_bytes()); // 16-bit
//!
//! let compressed = encode_bytes(&wav).unwrap();
//! assert_eq!(decode_bytes(&compressed).unwrap(), wav);
//! ```
//!
//! ## References
//!
//! - Witten, I., Neal, R., Cleary, J. (1987). "Arithmetic coding for data
//!   compression."
//! - Bollerslev, T. (1986). "Generalized autoregressive conditional
//!   heteroskedasticity."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitio;
pub mod codec;
pub mod coder;
pub mod error;
pub mod model;
pub mod pcm;
pub mod wav;

pub use codec::{decode_bytes, decode_stream, encode_bytes, encode_stream};
pub use coder::{ArithmeticDecoder, ArithmeticEncoder, Model};
pub use error::Error;
pub use model::SignalModel;
