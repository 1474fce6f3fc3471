// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// qrscan-image — Image loading, preprocessing and QR symbol decoding.
//
// Provides image loading and BT.601 grayscale conversion, the preprocessing
// transforms used as decode fallbacks (Gaussian blur, adaptive and Otsu
// thresholding), a pluggable symbol decoder backed by `rqrr`, and the reader
// that ties them together into an ordered fallback chain.

pub mod image;
pub mod scan;

// Re-export the primary items so callers can use `qrscan_image::read_qr_code` etc.
pub use crate::image::processor::ImageProcessor;
pub use crate::scan::decoder::{RqrrDecoder, SymbolDecoder};
pub use crate::scan::reader::{ImageQrReader, read_qr_code};
