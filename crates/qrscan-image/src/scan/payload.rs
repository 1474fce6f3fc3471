// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Post-processing of raw decoded symbols into `QrRecord`s: payload text
// decoding and boundary geometry.

use qrscan_core::types::{BoundingBox, QrRecord, RawSymbol};
use tracing::debug;

/// Fewest boundary vertices for which a bounding box is reported.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// How a payload was turned into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadText {
    /// Valid UTF-8.
    Utf8(String),
    /// Not UTF-8; every byte mapped to the code point of the same value.
    Latin1(String),
    /// Not UTF-8 and no text fallback allowed; escaped byte literal.
    Escaped(String),
}

impl PayloadText {
    /// Decode `bytes`, falling back to Latin-1 (if allowed) and finally to an
    /// escaped `b'...'` rendering.
    pub fn decode(bytes: &[u8], latin1_fallback: bool) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::Utf8(text.to_owned()),
            Err(err) if latin1_fallback => {
                debug!(valid_up_to = err.valid_up_to(), "Payload is not UTF-8; using Latin-1");
                Self::Latin1(bytes.iter().map(|&b| char::from(b)).collect())
            }
            Err(err) => {
                debug!(valid_up_to = err.valid_up_to(), "Payload is not UTF-8; escaping bytes");
                Self::Escaped(bytes_literal(bytes))
            }
        }
    }

    pub fn is_utf8(&self) -> bool {
        matches!(self, Self::Utf8(_))
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Utf8(s) | Self::Latin1(s) | Self::Escaped(s) => s,
        }
    }
}

/// Render bytes as a `b'...'` literal. Double quotes are used when the bytes
/// contain `'` but no `"`, so the single quote needs no escape.
pub fn bytes_literal(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };

    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            _ if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\x{b:02x}")),
        }
    }
    out.push(quote as char);
    out
}

/// Normalise one raw symbol.
///
/// `raw_data` keeps the original bytes whenever the payload was not UTF-8.
/// `bbox` and `points` are only filled for polygons of at least
/// [`MIN_POLYGON_VERTICES`] vertices.
pub fn build_record(symbol: RawSymbol, latin1_fallback: bool) -> QrRecord {
    let text = PayloadText::decode(&symbol.payload, latin1_fallback);
    let raw_data = if text.is_utf8() {
        None
    } else {
        Some(symbol.payload)
    };

    let (bbox, points) = if symbol.polygon.len() >= MIN_POLYGON_VERTICES {
        (BoundingBox::enclosing(&symbol.polygon), Some(symbol.polygon))
    } else {
        (None, None)
    };

    QrRecord {
        data: text.into_string(),
        symbol_type: symbol.symbol_type,
        bbox,
        points,
        raw_data,
    }
}
