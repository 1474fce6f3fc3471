// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the qrscan QR reader.

use serde::{Deserialize, Serialize};

/// A pixel coordinate reported by the symbol decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle enclosing a symbol's boundary polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    /// Smallest box containing every point. `None` for an empty slice.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };
        Some(points[1..].iter().fold(init, |bbox, p| Self {
            x_min: bbox.x_min.min(p.x),
            y_min: bbox.y_min.min(p.y),
            x_max: bbox.x_max.max(p.x),
            y_max: bbox.y_max.max(p.y),
        }))
    }

    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.x_min, self.y_min, self.x_max, self.y_max
        )
    }
}

/// Barcode symbology of a decoded symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolType {
    /// ISO/IEC 18004 QR Code.
    #[serde(rename = "QRCODE")]
    QrCode,
}

impl SymbolType {
    /// Upper-case symbology name as printed to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QrCode => "QRCODE",
        }
    }
}

impl std::fmt::Display for SymbolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One preprocessing variant of the fallback chain, in the order they are
/// normally attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStage {
    /// The image exactly as loaded (colour preserved).
    Original,
    /// BT.601 luma conversion.
    Grayscale,
    /// Gaussian blur of the grayscale image.
    Blurred,
    /// Adaptive Gaussian threshold of the grayscale image.
    AdaptiveThreshold,
    /// Global Otsu threshold of the grayscale image.
    OtsuThreshold,
}

impl DecodeStage {
    /// The full chain in its canonical order.
    pub const ALL: [DecodeStage; 5] = [
        Self::Original,
        Self::Grayscale,
        Self::Blurred,
        Self::AdaptiveThreshold,
        Self::OtsuThreshold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Grayscale => "grayscale",
            Self::Blurred => "blurred",
            Self::AdaptiveThreshold => "adaptive_threshold",
            Self::OtsuThreshold => "otsu_threshold",
        }
    }
}

impl std::fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A symbol as handed over by a decoder, before text decoding and geometry
/// normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSymbol {
    pub symbol_type: SymbolType,
    /// Undecoded payload bytes.
    pub payload: Vec<u8>,
    /// Boundary polygon in the order the decoder reported it.
    pub polygon: Vec<Point>,
}

/// A decoded QR symbol, normalised for callers.
///
/// `bbox` and `points` are set together, and only when the decoder reported at
/// least three boundary vertices. `raw_data` is set only when the payload was
/// not valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrRecord {
    pub data: String,
    #[serde(rename = "type")]
    pub symbol_type: SymbolType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<Vec<u8>>,
}

/// Detailed result of one pass through the fallback chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub records: Vec<QrRecord>,
    /// Stage that produced `records`; `None` when every stage came up empty.
    pub stage: Option<DecodeStage>,
    /// Number of stages that were decoded.
    pub attempts: usize,
}

impl ScanOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enclosing_square() {
        let pts: Vec<Point> = [(0, 0), (10, 0), (10, 10), (0, 10)]
            .into_iter()
            .map(Point::from)
            .collect();
        let bbox = BoundingBox::enclosing(&pts).expect("non-empty");
        assert_eq!(
            bbox,
            BoundingBox {
                x_min: 0,
                y_min: 0,
                x_max: 10,
                y_max: 10
            }
        );
        assert_eq!(bbox.width(), 10);
        assert_eq!(bbox.height(), 10);
    }

    #[test]
    fn enclosing_skewed_quad() {
        let pts = [
            Point::new(12, 40),
            Point::new(55, 31),
            Point::new(61, 80),
            Point::new(9, 77),
        ];
        let bbox = BoundingBox::enclosing(&pts).expect("non-empty");
        assert_eq!(bbox.to_string(), "(9, 31, 61, 80)");
    }

    #[test]
    fn enclosing_empty_is_none() {
        assert!(BoundingBox::enclosing(&[]).is_none());
    }

    #[test]
    fn record_serialises_type_and_skips_absent_fields() {
        let record = QrRecord {
            data: "hello".into(),
            symbol_type: SymbolType::QrCode,
            bbox: None,
            points: None,
            raw_data: None,
        };
        let json = serde_json::to_value(&record).expect("serialise");
        assert_eq!(json, serde_json::json!({ "data": "hello", "type": "QRCODE" }));
    }

    #[test]
    fn stage_names_are_snake_case() {
        let json = serde_json::to_string(&DecodeStage::AdaptiveThreshold).expect("serialise");
        assert_eq!(json, "\"adaptive_threshold\"");
        assert_eq!(DecodeStage::OtsuThreshold.to_string(), "otsu_threshold");
    }
}
