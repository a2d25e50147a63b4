//! Tag codec: 8-character base64 codes to and from raw tags
//!
//! A microtag travels over the wire as 8 base64 characters encoding exactly
//! 6 bytes: the 32-bit data word (big-endian) followed by the 16-bit id
//! (big-endian).

use crate::error::{MtagsError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Length of an encoded tag code in characters
pub const CODE_LEN: usize = 8;

/// A single decoded microtag, immutable once produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTag {
    /// 16-bit tag id, resolved against the definition table
    pub id: u16,
    /// 32-bit payload: a tick counter or opaque data, depending on the id
    pub data: u32,
}

/// Decode an 8-character code into a raw tag.
pub fn decode(code: &str) -> Result<RawTag> {
    if code.len() != CODE_LEN {
        return Err(MtagsError::InvalidCode(code.to_string()));
    }

    let bytes = STANDARD
        .decode(code)
        .map_err(|_| MtagsError::InvalidCode(code.to_string()))?;

    // 8 unpadded base64 characters always yield 6 bytes; anything else means
    // the code carried padding
    if bytes.len() != 6 {
        return Err(MtagsError::InvalidCode(code.to_string()));
    }

    let data = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let id = u16::from_be_bytes([bytes[4], bytes[5]]);

    Ok(RawTag { id, data })
}

/// Encode a raw tag back into its 8-character code. Exact inverse of
/// [`decode`].
pub fn encode(tag: RawTag) -> String {
    let mut bytes = [0u8; 6];
    bytes[..4].copy_from_slice(&tag.data.to_be_bytes());
    bytes[4..].copy_from_slice(&tag.id.to_be_bytes());
    STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_codes() {
        assert_eq!(decode("AAAABQAA").unwrap(), RawTag { id: 0x0000, data: 5 });
        assert_eq!(decode("AAAACgAB").unwrap(), RawTag { id: 0x0001, data: 10 });
    }

    #[test]
    fn test_encode_known_tags() {
        assert_eq!(encode(RawTag { id: 0x0000, data: 5 }), "AAAABQAA");
        assert_eq!(encode(RawTag { id: 0x0001, data: 10 }), "AAAACgAB");
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            RawTag { id: 0x0000, data: 0x00000000 },
            RawTag { id: 0xFFFF, data: 0xFFFFFFFF },
            RawTag { id: 0x1000, data: 0xDEADBEEF },
            RawTag { id: 0x0042, data: 0x00000001 },
            RawTag { id: 0xABCD, data: 0x12345678 },
        ];
        for tag in samples {
            assert_eq!(decode(&encode(tag)).unwrap(), tag);
        }
    }

    #[test]
    fn test_round_trip_exhaustive_ids() {
        // Every id with a handful of data words
        for id in [0u16, 1, 0x00FF, 0x0100, 0x7FFF, 0x8000, 0xFFFE, 0xFFFF] {
            for data in [0u32, 1, 0x80000000, u32::MAX] {
                let tag = RawTag { id, data };
                assert_eq!(decode(&encode(tag)).unwrap(), tag);
            }
        }
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert!(decode("").is_err());
        assert!(decode("AAAA").is_err());
        assert!(decode("AAAABQAAA").is_err());
    }

    #[test]
    fn test_decode_rejects_invalid_characters() {
        assert!(decode("AAAA!QAA").is_err());
        assert!(decode("AAAA BQA").is_err());
        assert!(decode("ÄAAABQAA").is_err());
    }

    #[test]
    fn test_decode_rejects_padding() {
        // 8 characters, but padding makes this 4 raw bytes, not 6
        assert!(decode("AAAAAA==").is_err());
    }

    #[test]
    fn test_encoded_length_is_always_eight() {
        assert_eq!(encode(RawTag { id: 0xFFFF, data: 0xFFFFFFFF }).len(), CODE_LEN);
    }
}
