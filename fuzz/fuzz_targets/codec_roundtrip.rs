#![no_main]
use libfuzzer_sys::fuzz_target;
use nwav::pcm::{sample_to_symbol, symbol_to_sample};
use nwav::{decode_bytes, encode_bytes};

fuzz_target!(|samples: Vec<i16>| {
    let mut wav = vec![0u8; 44];
    wav[..4].copy_from_slice(b"RIFF");
    wav[8..12].copy_from_slice(b"WAVE");
    wav[22..24].copy_from_slice(&1u16.to_le_bytes());
    wav[34..36].copy_from_slice(&16u16.to_le_bytes());
    for &sample in &samples {
        // Canonicalize so the byte roundtrip is exact.
        let device_value = symbol_to_sample(sample_to_symbol(sample));
        wav.extend_from_slice(&device_value.to_le_bytes());
    }

    let compressed = encode_bytes(&wav).expect("encoding a valid wav never fails");
    let decoded = decode_bytes(&compressed).expect("decoding our own output never fails");
    assert_eq!(decoded, wav);
});
