//! Stream framing: WAV in, compressed stream out, and back.
//!
//! A compressed file is the input's 44-byte header copied verbatim,
//! followed by the arithmetic-coded payload. The payload ends with a
//! reserved stop symbol, so no length field is needed.

use std::io::{ErrorKind, Read, Write};

use crate::bitio::{BitReader, BitWriter};
use crate::coder::{ArithmeticDecoder, ArithmeticEncoder, Model};
use crate::error::Result;
use crate::model::{SignalModel, STOP_SYMBOL};
use crate::pcm::{sample_to_symbol, symbol_to_sample};
use crate::wav::WavHeader;

/// Read one little-endian sample, or `None` at end of input. A trailing odd
/// byte counts as end of input.
fn read_sample<R: Read>(reader: &mut R) -> Result<Option<i16>> {
    let mut buf = [0u8; 2];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(Some(i16::from_le_bytes(buf))),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Compress a 16-bit mono WAV stream.
///
/// Reads the header, validates it, and copies it through; then encodes every
/// sample, terminates with the stop symbol, and flushes the coder and the
/// bit sink.
pub fn encode_stream<R: Read, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
    let header = WavHeader::read_from(input)?;
    header.validate()?;
    header.write_to(output)?;

    let mut sink = BitWriter::new(&mut *output);
    let mut encoder = ArithmeticEncoder::new(SignalModel::new());

    while let Some(sample) = read_sample(input)? {
        let symbol = sample_to_symbol(sample);
        encoder.encode(symbol, &mut sink)?;
        encoder.model.update_state(symbol);
    }

    encoder.encode(STOP_SYMBOL, &mut sink)?;
    encoder.model.update_state(STOP_SYMBOL);
    encoder.flush(&mut sink)?;
    sink.flush()?;
    Ok(())
}

/// Decompress a stream produced by [`encode_stream`].
///
/// Copies the header through, then decodes symbols until the stop symbol,
/// writing one little-endian sample per payload symbol. Bytes past the
/// consumed payload are ignored.
pub fn decode_stream<R: Read, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
    let header = WavHeader::read_from(input)?;
    header.validate()?;
    header.write_to(output)?;

    let mut source = BitReader::new(&mut *input);
    let mut decoder = ArithmeticDecoder::new(SignalModel::new());
    decoder.init(&mut source)?;

    loop {
        let symbol = decoder.decode(&mut source)?;
        decoder.model.update_state(symbol);
        if symbol == STOP_SYMBOL {
            break;
        }
        output.write_all(&symbol_to_sample(symbol).to_le_bytes())?;
    }
    Ok(())
}

/// Compress an in-memory WAV image.
pub fn encode_bytes(input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = input;
    let mut output = Vec::new();
    encode_stream(&mut reader, &mut output)?;
    Ok(output)
}

/// Decompress an in-memory image produced by [`encode_bytes`].
pub fn decode_bytes(input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = input;
    let mut output = Vec::new();
    decode_stream(&mut reader, &mut output)?;
    Ok(output)
}
