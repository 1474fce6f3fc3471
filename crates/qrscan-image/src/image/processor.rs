// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — loading from disk or memory and BT.601 grayscale
// conversion. Operates on in-memory images using the `image` crate.

use image::{DynamicImage, GrayImage, Luma};
use qrscan_core::error::QrScanError;
use tracing::{debug, info, instrument};

/// A single decoded source image.
///
/// The loaded pixels are never modified; preprocessing variants are derived
/// from the grayscale view returned by [`ImageProcessor::to_gray`].
///
/// ```ignore
/// let processor = ImageProcessor::open("ticket.png")?;
/// let gray = processor.to_gray();
/// ```
pub struct ImageProcessor {
    /// The image exactly as decoded.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, QrScanError> {
        let img = image::open(path.as_ref()).map_err(|err| QrScanError::ImageLoad {
            path: path.as_ref().display().to_string(),
            reason: err.to_string(),
        })?;
        info!(
            width = img.width(),
            height = img.height(),
            color = ?img.color(),
            "Image loaded"
        );
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (PNG, JPEG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, QrScanError> {
        let img = image::load_from_memory(data)
            .map_err(|err| QrScanError::ImageDecode(err.to_string()))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    /// BT.601 grayscale view of the image.
    pub fn to_gray(&self) -> GrayImage {
        to_grayscale(&self.image)
    }
}

/// Convert any image to 8-bit luma with ITU-R BT.601 weights
/// (`0.299 R + 0.587 G + 0.114 B`, rounded). Alpha is ignored.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let weighted = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
        Luma([((weighted + 500) / 1000) as u8])
    })
}
