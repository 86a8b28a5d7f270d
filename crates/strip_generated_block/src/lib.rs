// crates/strip_generated_block/src/lib.rs

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use source_encoding::{decode_strict, encode_strict, EncodingError};
use thiserror::Error;

/// The substring that identifies a tool-emitted comment line.
const GENERATOR_SIGNATURE: &str = "generated by";

/// Errors raised while normalizing a single file.
#[derive(Debug, Error)]
pub enum StripError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: EncodingError,
    },
    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodingError,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Removes the generator's non-deterministic header comment from `text`.
///
/// The header is a contiguous `//` block of the shape the xjc tool emits:
///
/// ```text
/// //
/// // This file was generated by the JAXB RI...
/// // Generated on: 2021-04-01 12:34:56
/// //
/// ```
///
/// Detection is structural rather than positional:
///   - A marker line is a line whose trimmed content is exactly `//`.
///   - A signature line contains the substring `generated by`.
///   - The stripped region starts at a marker line that reaches a signature
///     line through `//` comment lines only, and ends at the next marker
///     line at or after the signature. Both markers are removed.
///
/// Only the first such region is removed; every other line is preserved
/// byte-for-byte, including its original line terminator. Returns `None`
/// when the text contains no well-formed region.
pub fn strip_generated_block(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let (begin, end) = find_generated_region(&lines)?;

    let mut output = String::with_capacity(text.len());
    for (index, line) in lines.iter().enumerate() {
        if index < begin || index > end {
            output.push_str(line);
        }
    }
    Some(output)
}

/// Locates the first generated-header region, as inclusive line indices.
fn find_generated_region(lines: &[&str]) -> Option<(usize, usize)> {
    for (index, line) in lines.iter().enumerate() {
        if is_marker_line(line) {
            if let Some(end) = scan_candidate_block(lines, index) {
                return Some((index, end));
            }
            // Not a well-formed region; the marker is ordinary content.
        }
    }
    None
}

/// Scans forward from an opening marker. Returns the index of the closing
/// marker if a signature line is reached through comment lines only; a
/// non-comment line or end of file abandons the candidate.
fn scan_candidate_block(lines: &[&str], begin: usize) -> Option<usize> {
    let mut seen_signature = false;
    for (index, line) in lines.iter().enumerate().skip(begin + 1) {
        if !is_comment_line(line) {
            return None;
        }
        if seen_signature && is_marker_line(line) {
            return Some(index);
        }
        if line.contains(GENERATOR_SIGNATURE) {
            seen_signature = true;
        }
    }
    None
}

/// A line whose content, ignoring surrounding whitespace and the line
/// terminator, is exactly the open-comment delimiter.
fn is_marker_line(line: &str) -> bool {
    line.trim() == "//"
}

fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with("//")
}

/// Reads `input` under `encoding`, strips the generated header, and writes
/// the result to `output` (truncating it) in the same encoding.
///
/// The decode is strict: bytes that are malformed under `encoding` fail the
/// transform rather than being replaced. Returns whether a header region was
/// found and removed; when it was not, the bytes written are identical to
/// the bytes read.
pub fn strip_file(
    input: &Path,
    output: &Path,
    encoding: &'static Encoding,
) -> Result<bool, StripError> {
    let bytes = fs::read(input).map_err(|source| StripError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let text = decode_strict(&bytes, encoding).map_err(|source| StripError::Decode {
        path: input.to_path_buf(),
        source,
    })?;

    let (stripped, out_bytes) = match strip_generated_block(&text) {
        Some(normalized) => {
            let encoded =
                encode_strict(&normalized, encoding).map_err(|source| StripError::Encode {
                    path: input.to_path_buf(),
                    source,
                })?;
            (true, encoded)
        }
        // No region: emit the original bytes untouched, so even content the
        // codec would not re-encode identically round-trips.
        None => (false, bytes),
    };

    fs::write(output, out_bytes).map_err(|source| StripError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(stripped)
}
