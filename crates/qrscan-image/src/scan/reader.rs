// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// QR reader — runs the decoder over an ordered chain of preprocessing
// variants and stops at the first one that yields symbols.

use std::borrow::Cow;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use image::{DynamicImage, GrayImage};
use qrscan_core::config::ScanConfig;
use qrscan_core::error::{QrScanError, Result};
use qrscan_core::types::{DecodeStage, QrRecord, RawSymbol, ScanOutcome};
use tracing::{debug, error, info, instrument};

use crate::image::processor::{ImageProcessor, to_grayscale};
use crate::scan::decoder::{RqrrDecoder, SymbolDecoder};
use crate::scan::enhance::{adaptive_gaussian_threshold, gaussian_blur, otsu_threshold};
use crate::scan::payload::build_record;

/// Read every QR code in the image at `path` with the default configuration.
///
/// Never fails: an unreadable file or a decoder fault is logged and yields an
/// empty vector.
pub fn read_qr_code(path: impl AsRef<Path>) -> Vec<QrRecord> {
    ImageQrReader::default().read(path)
}

/// Decodes QR symbols from images using a preprocessing fallback chain.
///
/// The chain (by default: original, grayscale, blurred, adaptive threshold,
/// Otsu threshold) is walked in order and stops at the first stage whose
/// image produces at least one symbol. Stage images are built only when the
/// stage is reached; every stage after the first works from one shared
/// grayscale image, so the thresholds are not applied on top of the blur.
pub struct ImageQrReader {
    config: ScanConfig,
    decoder: Box<dyn SymbolDecoder>,
}

impl Default for ImageQrReader {
    fn default() -> Self {
        Self {
            config: ScanConfig::default(),
            decoder: Box::new(RqrrDecoder::new()),
        }
    }
}

impl std::fmt::Debug for ImageQrReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageQrReader")
            .field("config", &self.config)
            .field("decoder", &self.decoder.name())
            .finish()
    }
}

impl ImageQrReader {
    // -- Construction ---------------------------------------------------------

    /// Reader using `rqrr` and a validated `config`.
    pub fn new(config: ScanConfig) -> Result<Self> {
        Self::with_decoder(config, RqrrDecoder::new())
    }

    /// Reader using a caller-supplied decoder.
    pub fn with_decoder(config: ScanConfig, decoder: impl SymbolDecoder + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            decoder: Box::new(decoder),
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    // -- Entry points ---------------------------------------------------------

    /// Read all QR codes at `path`, converting any failure into an empty
    /// result plus an error log line. Panics anywhere in loading,
    /// preprocessing or decoding are caught and treated as failures too.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn read(&self, path: impl AsRef<Path>) -> Vec<QrRecord> {
        let path = path.as_ref();
        match contain_panic(|| "QR scan pipeline".to_owned(), || self.try_scan_path(path)) {
            Ok(outcome) => outcome.records,
            Err(err) => {
                error!(error = %err, detail = ?err, "QR scan failed; returning no results");
                Vec::new()
            }
        }
    }

    /// Load the image at `path` and run the fallback chain over it.
    pub fn try_scan_path(&self, path: impl AsRef<Path>) -> Result<ScanOutcome> {
        let processor = ImageProcessor::open(path)?;
        self.scan_image(processor.as_dynamic())
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) and run the fallback chain.
    pub fn scan_bytes(&self, data: &[u8]) -> Result<ScanOutcome> {
        let processor = ImageProcessor::from_bytes(data)?;
        self.scan_image(processor.as_dynamic())
    }

    /// Run the fallback chain over an already-decoded image.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn scan_image(&self, image: &DynamicImage) -> Result<ScanOutcome> {
        let mut variants = StageImages::new(image, &self.config);
        let mut attempts = 0;

        for &stage in &self.config.stages {
            let variant = variants.render(stage);
            attempts += 1;
            let symbols = self.decode_guarded(stage, &variant)?;
            debug!(%stage, symbols = symbols.len(), "Decode attempt finished");

            if !symbols.is_empty() {
                let records: Vec<QrRecord> = symbols
                    .into_iter()
                    .map(|symbol| build_record(symbol, self.config.latin1_fallback))
                    .collect();
                info!(%stage, attempts, found = records.len(), "QR codes decoded");
                return Ok(ScanOutcome {
                    records,
                    stage: Some(stage),
                    attempts,
                });
            }
        }

        info!(attempts, "No QR code found in any preprocessing variant");
        Ok(ScanOutcome {
            records: Vec::new(),
            stage: None,
            attempts,
        })
    }

    /// Run the decoder, turning a panic inside it into `QrScanError::Decode`.
    fn decode_guarded(&self, stage: DecodeStage, image: &DynamicImage) -> Result<Vec<RawSymbol>> {
        contain_panic(
            || format!("{} decoder at {stage} stage", self.decoder.name()),
            || self.decoder.decode(image),
        )
    }
}

/// Run `f`, mapping a panic into `QrScanError::Decode` that names `context`.
fn contain_panic<T>(
    context: impl FnOnce() -> String,
    f: impl FnOnce() -> Result<T>,
) -> Result<T> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|panic| {
        let message = panic
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Err(QrScanError::Decode(format!("panic in {}: {message}", context())))
    })
}

// -- Stage images -------------------------------------------------------------

/// Lazily built preprocessing variants of one source image.
struct StageImages<'a> {
    source: &'a DynamicImage,
    config: &'a ScanConfig,
    gray: Option<GrayImage>,
}

impl<'a> StageImages<'a> {
    fn new(source: &'a DynamicImage, config: &'a ScanConfig) -> Self {
        Self {
            source,
            config,
            gray: None,
        }
    }

    fn gray(&mut self) -> &GrayImage {
        let source = self.source;
        self.gray.get_or_insert_with(|| to_grayscale(source))
    }

    fn render(&mut self, stage: DecodeStage) -> Cow<'a, DynamicImage> {
        let derived = match stage {
            DecodeStage::Original => return Cow::Borrowed(self.source),
            DecodeStage::Grayscale => self.gray().clone(),
            DecodeStage::Blurred => {
                let size = self.config.blur_kernel_size;
                gaussian_blur(self.gray(), size)
            }
            DecodeStage::AdaptiveThreshold => {
                let (block, c) = (self.config.adaptive_block_size, self.config.adaptive_c);
                adaptive_gaussian_threshold(self.gray(), block, c)
            }
            DecodeStage::OtsuThreshold => otsu_threshold(self.gray()),
        };
        Cow::Owned(DynamicImage::ImageLuma8(derived))
    }
}
