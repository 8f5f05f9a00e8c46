use anyhow::{Result, bail};
use lopdf::{Object, StringFormat};
use std::path::PathBuf;
use std::time::Duration;

/// Expand glob patterns into concrete paths, keeping command-line order.
///
/// A pattern without glob metacharacters is passed through unchanged so
/// that a missing file is reported by validation with a proper error.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        resolved_paths.extend(collect_paths_for_pattern(pattern.as_ref())?);
    }

    Ok(resolved_paths)
}

fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    if !pattern.contains(['*', '?', '[']) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let mut paths = Vec::new();
    for entry in glob::glob(pattern)? {
        paths.push(entry?);
    }

    if paths.is_empty() {
        bail!("No files match pattern: {pattern}");
    }

    paths.sort();
    Ok(paths)
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}

/// Size in megabytes with two decimals, e.g. `"1.50 MB"`.
pub fn format_megabytes(size: u64) -> String {
    format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
}

/// Serialize a [`Duration`] as fractional seconds.
pub fn serialize_seconds<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Encode a PDF text string.
///
/// ASCII goes out as a literal string; anything else is written as
/// UTF-16BE with a byte order mark so viewers show it correctly.
pub fn pdf_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// Decode a PDF text string written by [`pdf_text_string`] or a plain literal.
pub fn decode_pdf_text_string(bytes: &[u8]) -> Option<String> {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16(&units).ok();
    }

    String::from_utf8(bytes.to_vec()).ok()
}
