//! C header rendering
//!
//! Emits the exact text firmware builds include: a `#pragma once` guard, the
//! configured include lines, a `const uint8_t` array carrying the compressed
//! bytes in flash, and a `size_t` length constant derived via `sizeof` so the
//! two can never disagree.

use crate::manifest::EncoderOptions;
use crate::models::Symbol;

/// Render a complete header for one asset
///
/// The output is ASCII, ends with a newline, and is fully determined by its
/// inputs. Byte literals are two-digit uppercase hex, `bytes_per_row` per
/// row, two-space indent, trailing comma on every row.
pub fn render_header(symbol: &Symbol, data: &[u8], opts: &EncoderOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("#pragma once".to_string());
    lines.push(String::new());
    for include in &opts.includes {
        lines.push(format!("#include {include}"));
    }
    if !opts.includes.is_empty() {
        lines.push(String::new());
    }

    if opts.storage_attr.is_empty() {
        lines.push(format!("const uint8_t {symbol}[] = {{"));
    } else {
        lines.push(format!("const uint8_t {symbol}[] {} = {{", opts.storage_attr));
    }

    let per_row = opts.bytes_per_row.max(1);
    for chunk in data.chunks(per_row) {
        let row: Vec<String> = chunk.iter().map(|b| format!("0x{b:02X}")).collect();
        lines.push(format!("  {},", row.join(", ")));
    }

    lines.push("};".to_string());
    lines.push(format!("const size_t {} = sizeof({symbol});", symbol.len_name()));
    lines.push(String::new());

    lines.join("\n")
}

/// Parse the byte array back out of an emitted header
///
/// Returns `None` when the text between the first `{` and the following `}`
/// is not a well-formed list of `0xNN` literals. Used by `check` to verify
/// that an on-disk header still decompresses to its source.
pub fn parse_header_bytes(content: &str) -> Option<Vec<u8>> {
    let start = content.find('{')? + 1;
    let end = start + content[start..].find('}')?;

    let mut bytes = Vec::new();
    for token in content[start..end].split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let hex = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))?;
        bytes.push(u8::from_str_radix(hex, 16).ok()?);
    }
    Some(bytes)
}
