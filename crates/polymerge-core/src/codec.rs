//! Transport codec: optional zlib compression followed by base64.
//!
//! The output alphabet (`A-Z a-z 0-9 + / =`) survives being placed inside
//! single- or double-quoted literals in both grammars without escaping.
//! Compressed units use the zlib wrapper (RFC 1950), which is what Python's
//! `zlib.decompress` and the WHATWG `DecompressionStream('deflate')` expect.

use crate::traits::MergeError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use std::io::{Read, Write};

/// Whether a transport unit was compressed before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionFlag {
    #[default]
    Raw,
    Deflate,
}

/// One payload in transport form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportUnit {
    pub compression: CompressionFlag,
    /// Standard (padded) base64 text.
    pub encoded: String,
}

/// Encode a payload, compressing it first at the best level when `compress`
/// is set.
///
/// Every byte sequence is accepted; the only failure is the compressor
/// itself reporting an I/O error.
pub fn encode(payload: &[u8], compress: bool) -> Result<TransportUnit, MergeError> {
    if !compress {
        return Ok(TransportUnit {
            compression: CompressionFlag::Raw,
            encoded: STANDARD.encode(payload),
        });
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(payload)?;
    let deflated = encoder.finish()?;

    Ok(TransportUnit {
        compression: CompressionFlag::Deflate,
        encoded: STANDARD.encode(deflated),
    })
}

/// Recover the original payload bytes from a transport unit.
pub fn decode(unit: &TransportUnit) -> Result<Vec<u8>, MergeError> {
    let bytes = STANDARD
        .decode(&unit.encoded)
        .map_err(|e| MergeError::Decode(e.to_string()))?;

    match unit.compression {
        CompressionFlag::Raw => Ok(bytes),
        CompressionFlag::Deflate => {
            let mut out = Vec::new();
            ZlibDecoder::new(bytes.as_slice())
                .read_to_end(&mut out)
                .map_err(|e| MergeError::Decode(e.to_string()))?;
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_bytes() -> Vec<u8> {
        (0..=255u8).collect()
    }

    #[test]
    fn test_raw_encoding() {
        let unit = encode(b"print(\"hi\")", false).unwrap();
        assert_eq!(unit.compression, CompressionFlag::Raw);
        assert_eq!(unit.encoded, "cHJpbnQoImhpIik=");
    }

    #[test]
    fn test_empty_payload() {
        let raw = encode(b"", false).unwrap();
        assert_eq!(raw.encoded, "");
        assert_eq!(decode(&raw).unwrap(), b"");

        let deflated = encode(b"", true).unwrap();
        assert!(!deflated.encoded.is_empty());
        assert_eq!(decode(&deflated).unwrap(), b"");
    }

    #[test]
    fn test_roundtrip_all_byte_values() {
        for compress in [false, true] {
            let unit = encode(&all_bytes(), compress).unwrap();
            assert_eq!(decode(&unit).unwrap(), all_bytes(), "compress={compress}");
        }
    }

    #[test]
    fn test_compressed_has_zlib_header() {
        let unit = encode(b"console.log('hi')", true).unwrap();
        let bytes = STANDARD.decode(&unit.encoded).unwrap();
        // CMF: deflate with a 32K window; FLG check bits make the pair divisible by 31.
        assert_eq!(bytes[0], 0x78);
        assert_eq!(((bytes[0] as u16) << 8 | bytes[1] as u16) % 31, 0);
    }

    #[test]
    fn test_compression_shrinks_repetitive_payload() {
        let payload = "print('hello world')\n".repeat(200);
        let raw = encode(payload.as_bytes(), false).unwrap();
        let deflated = encode(payload.as_bytes(), true).unwrap();
        assert!(deflated.encoded.len() < raw.encoded.len() / 10);
    }

    #[test]
    fn test_alphabet_is_quote_safe() {
        for compress in [false, true] {
            let unit = encode(&all_bytes(), compress).unwrap();
            assert!(
                unit.encoded
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
            );
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let bad = TransportUnit {
            compression: CompressionFlag::Raw,
            encoded: "not base64!".into(),
        };
        assert!(matches!(decode(&bad), Err(MergeError::Decode(_))));

        let not_zlib = TransportUnit {
            compression: CompressionFlag::Deflate,
            encoded: STANDARD.encode(b"plain text"),
        };
        assert!(matches!(decode(&not_zlib), Err(MergeError::Decode(_))));
    }
}
