use encoding_rs::WINDOWS_1254;
use thiserror::Error;

/// Bytes that windows-1254 leaves unassigned. `encoding_rs` follows the WHATWG
/// table and maps them to C1 controls, so they are rejected up front.
const UNDEFINED_BYTES: [u8; 7] = [0x81, 0x8D, 0x8E, 0x8F, 0x90, 0x9D, 0x9E];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("byte 0x{byte:02X} at offset {offset} is undefined in {encoding}")]
    UndefinedByte {
        byte: u8,
        offset: usize,
        encoding: &'static str,
    },
    #[error("malformed {encoding} input")]
    Malformed { encoding: &'static str },
}

pub fn encoding_name() -> &'static str {
    WINDOWS_1254.name()
}

pub fn decode_bytes(bytes: &[u8]) -> Result<String, DecodeError> {
    if let Some(offset) = bytes.iter().position(|b| UNDEFINED_BYTES.contains(b)) {
        return Err(DecodeError::UndefinedByte {
            byte: bytes[offset],
            offset,
            encoding: encoding_name(),
        });
    }
    WINDOWS_1254
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or(DecodeError::Malformed { encoding: encoding_name() })
}

/// Decode one file and split it into lines.
pub fn decode_lines(bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
    let text = decode_bytes(bytes)?;
    Ok(split_lines(&text).into_iter().map(str::to_string).collect())
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Universal newline split. `\r\n` counts as one boundary and a trailing
/// boundary does not produce an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        out.push(&text[start..idx]);
        let mut end = idx + c.len_utf8();
        if c == '\r' {
            if let Some(&(next_idx, '\n')) = chars.peek() {
                chars.next();
                end = next_idx + 1;
            }
        }
        start = end;
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}
