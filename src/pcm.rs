//! Conversions between signed 16-bit PCM samples and 10-bit symbols.
//!
//! The recording device produces 16-bit samples whose low six bits carry a
//! fixed deterministic pattern rather than information, so the stream is
//! really 10-bit. The forward map discards those bits; the inverse map
//! reconstructs them.

/// Map a signed 16-bit sample to its 10-bit symbol in `[0, 1023]`.
pub fn sample_to_symbol(sample: i16) -> u16 {
    ((i32::from(sample) >> 6) + 512) as u16
}

/// Map a 10-bit symbol back to the signed 16-bit sample it came from.
///
/// The scale (64 + 1009/16384 ≈ 64.0616) and the half-sample biases were
/// recovered experimentally from reference recordings; they must be
/// reproduced exactly for decoded files to match the originals byte for
/// byte.
pub fn symbol_to_sample(symbol: u16) -> i16 {
    let temp = (f64::from(symbol) - 512.0 + 0.5) * (64.0 + 1009.0 / 16384.0) - 0.5;
    temp.trunc() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_roundtrip_is_exact_for_all_symbols() {
        for symbol in 0u16..1024 {
            assert_eq!(
                sample_to_symbol(symbol_to_sample(symbol)),
                symbol,
                "symbol {symbol} does not survive the roundtrip"
            );
        }
    }

    #[test]
    fn test_forward_map_covers_full_sample_range() {
        assert_eq!(sample_to_symbol(i16::MIN), 0);
        assert_eq!(sample_to_symbol(-32), 511);
        assert_eq!(sample_to_symbol(0), 512);
        assert_eq!(sample_to_symbol(31), 512);
        assert_eq!(sample_to_symbol(i16::MAX), 1023);
    }

    #[test]
    fn test_inverse_map_reference_values() {
        assert_eq!(symbol_to_sample(0), i16::MIN);
        assert_eq!(symbol_to_sample(511), -32);
        assert_eq!(symbol_to_sample(512), 31);
        assert_eq!(symbol_to_sample(1023), i16::MAX);
    }

    #[test]
    fn test_forward_map_stays_in_symbol_range() {
        for sample in [i16::MIN, -1, 0, 1, 63, 64, -64, -65, i16::MAX] {
            let symbol = sample_to_symbol(sample);
            assert!(symbol < 1024);
        }
    }
}
