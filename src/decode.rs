//! File decoding (C8): turns raw bytes into the `String` the scanner operates on. Handles
//! UTF-8 (with or without a BOM) and UTF-16 (LE/BE, with or without a BOM), falling back to a
//! lossy UTF-8 decode for anything else so the driver never has to skip a file outright just
//! because its encoding can't be determined exactly.

/// The encoding the decoder settled on for a given file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    /// Decoding failed cleanly; `String::from_utf8_lossy` was used, substituting U+FFFD for
    /// invalid sequences.
    Lossy,
}

#[derive(Debug, Clone)]
pub struct DecodedSource {
    pub text: String,
    pub encoding: Encoding,
    pub had_bom: bool,
}

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// Decodes a file's raw bytes, trying UTF-8 (BOM-stripped or plain) first, then UTF-16 by BOM,
/// then falling back to a lossy UTF-8 decode.
pub fn decode(bytes: &[u8]) -> DecodedSource {
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        if let Ok(text) = std::str::from_utf8(rest) {
            return DecodedSource { text: text.to_string(), encoding: Encoding::Utf8, had_bom: true };
        }
    }
    if let Ok(text) = std::str::from_utf8(bytes) {
        return DecodedSource { text: text.to_string(), encoding: Encoding::Utf8, had_bom: false };
    }
    if let Some(rest) = bytes.strip_prefix(&UTF16_LE_BOM) {
        return DecodedSource { text: decode_utf16(rest, true), encoding: Encoding::Utf16Le, had_bom: true };
    }
    if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
        return DecodedSource { text: decode_utf16(rest, false), encoding: Encoding::Utf16Be, had_bom: true };
    }
    DecodedSource {
        text: String::from_utf8_lossy(bytes).into_owned(),
        encoding: Encoding::Lossy,
        had_bom: false,
    }
}

/// A trailing odd byte (an incomplete code unit) is silently dropped by `chunks_exact`.
fn decode_utf16(bytes: &[u8], little_endian: bool) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16_lossy(&units)
}
