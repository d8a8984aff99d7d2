//! Token codec.
//!
//! A token is a single line of text:
//!
//! ```text
//! OPCODE:CHUNK:OPERAND_LEN:OPERAND:SOURCE_BASE_OFFSET:APPENDIX:FILE_SIZE
//! ```
//!
//! `APPENDIX` is `-` when absent and `LEN:BYTES` when present. Lengths are in
//! bytes, so operands and appendices may themselves contain `:`.
//!
//! The operand is written in escaped form: `%` becomes `%25` and every byte
//! that is not part of valid UTF-8 becomes `%XX`. `OPERAND_LEN` is the length
//! of the escaped form. `SOURCE_BASE_OFFSET` indexes the raw, unescaped bytes.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CodecError;
use crate::operation::{Opcode, Operation};
use crate::os_bytes;

const SEPARATOR: char = ':';
const ABSENT: &str = "-";
const ESCAPE: char = '%';
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Encode an operation into its token form.
#[must_use]
pub fn encode(op: &Operation) -> String {
    let operand = escape(op.operand_bytes());
    let appendix = op
        .dest_base_appendix
        .as_ref()
        .map_or_else(|| ABSENT.to_string(), |a| format!("{}:{a}", a.len()));

    format!(
        "{}:{}:{}:{}:{}:{}:{}",
        op.opcode,
        op.chunk,
        operand.len(),
        operand,
        op.source_base_offset,
        appendix,
        op.file_size
    )
}

/// Decode a token produced by [`encode`].
///
/// # Errors
///
/// * If a field is missing or a numeric field does not parse
/// * If a length prefix does not match the token
/// * If the operand escaping is invalid or not in the form [`encode`] writes
/// * If the operand is not an absolute path or the base offset is out of range
pub fn decode(token: &str) -> Result<Operation, CodecError> {
    let mut cursor = Cursor::new(token);

    let opcode = cursor
        .field("opcode")?
        .parse::<Opcode>()
        .map_err(|e| CodecError::malformed(token, e.to_string()))?;
    let chunk: u32 = cursor.number("chunk")?;

    let operand_len: usize = cursor.number("operand length")?;
    let operand = unescape(token, cursor.sized(operand_len, "operand")?)?;

    let source_base_offset: usize = cursor.number("source base offset")?;

    let appendix_field = cursor.field("appendix")?;
    let dest_base_appendix = if appendix_field == ABSENT {
        None
    } else {
        let len = parse(token, appendix_field, "appendix length")?;
        Some(cursor.sized(len, "appendix")?.to_string())
    };

    let file_size: u64 = parse(token, cursor.remainder(), "file size")?;

    if operand.first() != Some(&b'/') {
        return Err(CodecError::malformed(token, "operand is not an absolute path"));
    }
    if source_base_offset > operand.len() {
        return Err(CodecError::malformed(
            token,
            format!(
                "source base offset {source_base_offset} out of range for operand of length {}",
                operand.len()
            ),
        ));
    }
    let operand = os_bytes::from_bytes(&operand)
        .map(PathBuf::from)
        .ok_or_else(|| CodecError::malformed(token, "operand is not a valid path here"))?;

    log::trace!("Decoded {opcode} operation for {}", operand.display());

    Ok(Operation {
        opcode,
        chunk,
        operand,
        source_base_offset,
        dest_base_appendix,
        file_size,
    })
}

/// Escaped text form of raw operand bytes.
fn escape(bytes: &[u8]) -> String {
    let mut escaped = String::with_capacity(bytes.len());

    for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            if c == ESCAPE {
                push_escaped(&mut escaped, b'%');
            } else {
                escaped.push(c);
            }
        }
        for &byte in chunk.invalid() {
            push_escaped(&mut escaped, byte);
        }
    }

    escaped
}

fn push_escaped(out: &mut String, byte: u8) {
    out.push(ESCAPE);
    out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
    out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]));
}

/// Raw bytes of an escaped operand.
///
/// Only the exact form [`escape`] produces is accepted, so every operand has
/// a single token spelling.
fn unescape(token: &str, field: &str) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::with_capacity(field.len());
    let mut rest = field;

    while let Some((plain, escaped)) = rest.split_once(ESCAPE) {
        bytes.extend_from_slice(plain.as_bytes());
        let byte = escaped
            .get(..2)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or_else(|| CodecError::malformed(token, "invalid escape in operand"))?;
        bytes.push(byte);
        rest = &escaped[2..];
    }
    bytes.extend_from_slice(rest.as_bytes());

    if escape(&bytes) != field {
        return Err(CodecError::malformed(token, "non-canonical escape in operand"));
    }

    Ok(bytes)
}

/// Left-to-right reader over the fields of a token.
struct Cursor<'a> {
    token: &'a str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    const fn new(token: &'a str) -> Self {
        Self { token, rest: token }
    }

    /// Next separator-terminated field.
    fn field(&mut self, name: &str) -> Result<&'a str, CodecError> {
        let (field, rest) = self
            .rest
            .split_once(SEPARATOR)
            .ok_or_else(|| CodecError::malformed(self.token, format!("missing {name}")))?;
        self.rest = rest;
        Ok(field)
    }

    /// Next `len` bytes, which must be followed by a separator.
    fn sized(&mut self, len: usize, name: &str) -> Result<&'a str, CodecError> {
        let field = self.rest.get(..len).ok_or_else(|| {
            CodecError::malformed(self.token, format!("{name} length {len} overruns token"))
        })?;
        self.rest = self.rest[len..].strip_prefix(SEPARATOR).ok_or_else(|| {
            CodecError::malformed(self.token, format!("missing separator after {name}"))
        })?;
        Ok(field)
    }

    fn number<T: FromStr>(&mut self, name: &str) -> Result<T, CodecError> {
        let field = self.field(name)?;
        parse(self.token, field, name)
    }

    const fn remainder(&self) -> &'a str {
        self.rest
    }
}

fn parse<T: FromStr>(token: &str, field: &str, name: &str) -> Result<T, CodecError> {
    // `u*::from_str` accepts a leading '+', which encode never writes.
    if field.starts_with('+') {
        return Err(CodecError::malformed(token, format!("invalid {name} {field:?}")));
    }
    field
        .parse()
        .map_err(|_| CodecError::malformed(token, format!("invalid {name} {field:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Operation {
        Operation {
            opcode: Opcode::Copy,
            chunk: 7,
            operand: PathBuf::from("/src/data/file.bin"),
            source_base_offset: 4,
            dest_base_appendix: None,
            file_size: 8_000_000,
        }
    }

    #[test]
    fn test_encode_format() {
        assert_eq!(encode(&sample()), "COPY:7:18:/src/data/file.bin:4:-:8000000");
    }

    #[test]
    fn test_round_trip() {
        let op = sample();
        assert_eq!(decode(&encode(&op)).unwrap(), op);
    }

    #[test]
    fn test_round_trip_with_appendix() {
        let op = Operation {
            dest_base_appendix: Some("backup".to_string()),
            ..sample()
        };
        let token = encode(&op);

        assert_eq!(token, "COPY:7:18:/src/data/file.bin:4:6:backup:8000000");
        assert_eq!(decode(&token).unwrap(), op);
    }

    #[test]
    fn test_round_trip_separator_in_fields() {
        let op = Operation {
            opcode: Opcode::Treewalk,
            chunk: 0,
            operand: PathBuf::from("/src/a:b/-:/c"),
            source_base_offset: 4,
            dest_base_appendix: Some("x:-:y".to_string()),
            file_size: 0,
        };
        assert_eq!(decode(&encode(&op)).unwrap(), op);
    }

    #[test]
    fn test_round_trip_empty_appendix_is_distinct_from_absent() {
        let op = Operation {
            dest_base_appendix: Some(String::new()),
            ..sample()
        };
        let decoded = decode(&encode(&op)).unwrap();
        assert_eq!(decoded.dest_base_appendix, Some(String::new()));
    }

    #[test]
    fn test_round_trip_multibyte_operand() {
        let op = Operation {
            operand: PathBuf::from("/src/données/日本.txt"),
            source_base_offset: 4,
            ..sample()
        };
        assert_eq!(decode(&encode(&op)).unwrap(), op);
    }

    #[test]
    fn test_percent_in_operand_is_escaped() {
        let op = Operation {
            operand: PathBuf::from("/src/100%/x"),
            ..sample()
        };
        let token = encode(&op);

        assert_eq!(token, "COPY:7:13:/src/100%25/x:4:-:8000000");
        assert_eq!(decode(&token).unwrap(), op);
    }

    #[cfg(unix)]
    #[test]
    fn test_round_trip_non_utf8_operand() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let op = Operation {
            operand: PathBuf::from(OsStr::from_bytes(b"/src/caf\xe9.txt")),
            ..sample()
        };
        let token = encode(&op);

        assert_eq!(token, "COPY:7:15:/src/caf%E9.txt:4:-:8000000");
        let decoded = decode(&token).unwrap();
        assert_eq!(decoded.operand_bytes(), b"/src/caf\xe9.txt");
        assert_eq!(decoded, op);
    }

    #[test]
    fn test_decode_invalid_escape() {
        assert!(decode("TREEWALK:0:3:/a%:0:-:0").is_err());
        assert!(decode("TREEWALK:0:5:/a%zz:0:-:0").is_err());
        // Valid but not the form encode writes.
        assert!(decode("TREEWALK:0:5:/a%41:0:-:0").is_err());
        assert!(decode("TREEWALK:0:5:/a%e9:0:-:0").is_err());
    }

    #[test]
    fn test_decode_unknown_opcode() {
        let err = decode("MOVE:0:2:/a:0:-:0").unwrap_err();
        assert!(err.to_string().contains("unknown opcode"));
    }

    #[test]
    fn test_decode_missing_fields() {
        assert!(decode("").is_err());
        assert!(decode("TREEWALK").is_err());
        assert!(decode("TREEWALK:0:2:/a:0").is_err());
        assert!(decode("TREEWALK:0:2:/a:0:-:").is_err());
    }

    #[test]
    fn test_decode_invalid_numbers() {
        assert!(decode("TREEWALK:x:2:/a:0:-:0").is_err());
        assert!(decode("TREEWALK:-1:2:/a:0:-:0").is_err());
        assert!(decode("TREEWALK:+1:2:/a:0:-:0").is_err());
        assert!(decode("TREEWALK:0:2:/a:0:-:12ab").is_err());
    }

    #[test]
    fn test_decode_operand_length_mismatch() {
        assert!(decode("TREEWALK:0:99:/a:0:-:0").is_err());
        assert!(decode("TREEWALK:0:1:/a:0:-:0").is_err());
    }

    #[test]
    fn test_decode_trailing_bytes() {
        assert!(decode("TREEWALK:0:2:/a:0:-:0:extra").is_err());
    }

    #[test]
    fn test_decode_relative_operand() {
        let err = decode("TREEWALK:0:1:a:0:-:0").unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn test_decode_offset_out_of_range() {
        assert!(decode("TREEWALK:0:2:/a:3:-:0").is_err());
        assert!(decode("TREEWALK:0:2:/a:2:-:0").is_ok());
    }
}
