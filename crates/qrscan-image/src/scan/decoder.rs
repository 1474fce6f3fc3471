// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Symbol decoder abstraction and the `rqrr`-backed implementation.
//
// The reader only needs "image in, raw symbols out"; everything about how QR
// symbols are located and error-corrected lives behind `SymbolDecoder`.

use image::DynamicImage;
use qrscan_core::error::Result;
use qrscan_core::types::{Point, RawSymbol, SymbolType};
use tracing::{debug, warn};

/// Finds and decodes barcode symbols in a single image.
///
/// Implementations return only symbols whose payload could be decoded; an
/// image without symbols yields an empty vector, not an error.
pub trait SymbolDecoder: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Decode every symbol found in `image`.
    fn decode(&self, image: &DynamicImage) -> Result<Vec<RawSymbol>>;
}

/// Pure-Rust QR decoder built on `rqrr`.
///
/// Colour input is reduced to luma by the `image` crate before detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl SymbolDecoder for RqrrDecoder {
    fn name(&self) -> &str {
        "rqrr"
    }

    fn decode(&self, image: &DynamicImage) -> Result<Vec<RawSymbol>> {
        let luma = image.to_luma8();
        let (width, height) = luma.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let mut prepared =
            rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
                luma.get_pixel(x as u32, y as u32).0[0]
            });
        let grids = prepared.detect_grids();
        debug!(grids = grids.len(), "QR grids detected");

        let mut symbols = Vec::with_capacity(grids.len());
        for (index, grid) in grids.iter().enumerate() {
            let mut payload = Vec::new();
            match grid.decode_to(&mut payload) {
                Ok(meta) => {
                    debug!(
                        index,
                        ecc_level = meta.ecc_level,
                        mask = meta.mask,
                        payload_len = payload.len(),
                        "QR grid decoded"
                    );
                    symbols.push(RawSymbol {
                        symbol_type: SymbolType::QrCode,
                        payload,
                        polygon: grid.bounds.iter().map(|p| Point::new(p.x, p.y)).collect(),
                    });
                }
                Err(err) => {
                    warn!(index, error = ?err, "Detected QR grid could not be decoded; skipping");
                }
            }
        }

        Ok(symbols)
    }
}
