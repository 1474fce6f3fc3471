// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text rendering of scan results for the terminal.

use std::path::Path;

use qrscan_core::QrRecord;

/// Banner printed before scanning starts.
pub fn header(path: &Path) -> String {
    format!("Reading QR codes from image: {}\n{}", path.display(), "-".repeat(50))
}

/// One block per record, or a single "nothing found" line.
pub fn render(records: &[QrRecord]) -> String {
    if records.is_empty() {
        return "No QR code found in the image, or an error occurred\n".to_owned();
    }

    let mut out = format!("Found {} QR code(s):\n", records.len());
    for (i, record) in records.iter().enumerate() {
        let position = record
            .bbox
            .map(|bbox| bbox.to_string())
            .unwrap_or_else(|| "unknown".to_owned());
        out.push_str(&format!(
            "\nQR Code #{}:\n  Type: {}\n  Data: {}\n  Position: {}\n",
            i + 1,
            record.symbol_type,
            record.data,
            position
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrscan_core::{BoundingBox, SymbolType};

    fn record(data: &str, bbox: Option<BoundingBox>) -> QrRecord {
        QrRecord {
            data: data.into(),
            symbol_type: SymbolType::QrCode,
            bbox,
            points: None,
            raw_data: None,
        }
    }

    #[test]
    fn header_has_separator() {
        let text = header(Path::new("image (2).png"));
        assert_eq!(
            text,
            format!("Reading QR codes from image: image (2).png\n{}", "-".repeat(50))
        );
    }

    #[test]
    fn empty_results_message() {
        assert_eq!(
            render(&[]),
            "No QR code found in the image, or an error occurred\n"
        );
    }

    #[test]
    fn records_are_numbered_from_one() {
        let bbox = BoundingBox {
            x_min: 3,
            y_min: 4,
            x_max: 50,
            y_max: 61,
        };
        let text = render(&[record("hello", Some(bbox)), record("Hé", None)]);
        assert_eq!(
            text,
            "Found 2 QR code(s):\n\
             \nQR Code #1:\n  Type: QRCODE\n  Data: hello\n  Position: (3, 4, 50, 61)\n\
             \nQR Code #2:\n  Type: QRCODE\n  Data: Hé\n  Position: unknown\n"
        );
    }
}
