// crates/source_encoding/src/lib.rs

use encoding_rs::Encoding;
use thiserror::Error;

/// Errors raised while resolving an encoding label or converting bytes.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("unknown encoding label \"{0}\"")]
    UnknownLabel(String),
    #[error("encoding \"{0}\" cannot round-trip source files")]
    NotRoundTrip(String),
    #[error("input is not valid {0}")]
    Malformed(&'static str),
    #[error("text contains characters not representable in {0}")]
    Unmappable(&'static str),
}

/// Resolves an encoding label (e.g. "UTF-8", "ISO-8859-1") to a concrete codec.
///
/// Labels are matched per the WHATWG registry, so common aliases and any
/// mix of case work. Encodings that cannot encode what they decode (the
/// UTF-16 family, whose encoder falls back to UTF-8) are rejected, because
/// writing a file back through them would silently change its encoding.
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, EncodingError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| EncodingError::UnknownLabel(label.to_string()))?;
    if encoding.output_encoding() != encoding {
        return Err(EncodingError::NotRoundTrip(label.to_string()));
    }
    Ok(encoding)
}

/// Decodes `bytes` under `encoding`, failing on any malformed sequence.
///
/// No replacement characters are ever produced: a byte sequence that does not
/// decode cleanly is an error, not a lossy success. A leading BOM is decoded
/// as an ordinary U+FEFF character so it survives a later re-encode.
pub fn decode_strict(bytes: &[u8], encoding: &'static Encoding) -> Result<String, EncodingError> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|cow| cow.into_owned())
        .ok_or(EncodingError::Malformed(encoding.name()))
}

/// Encodes `text` under `encoding`, failing if any character is unmappable.
pub fn encode_strict(text: &str, encoding: &'static Encoding) -> Result<Vec<u8>, EncodingError> {
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(EncodingError::Unmappable(encoding.name()));
    }
    Ok(bytes.into_owned())
}
