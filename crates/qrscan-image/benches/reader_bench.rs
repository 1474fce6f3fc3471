// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the qrscan-image fallback chain.
// Covers the best case (a clean code decoded at the first stage) and the
// worst case (a blank image that walks all five stages).

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage, Luma};
use qrcode::{Color, QrCode};

use qrscan_image::ImageQrReader;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Render a QR code at 6 px per module with a 4-module quiet zone.
fn synthetic_qr(payload: &str) -> DynamicImage {
    let code = QrCode::new(payload.as_bytes()).expect("encode QR");
    let width = code.width() as u32;
    let colors = code.to_colors();
    let side = (width + 8) * 6;

    DynamicImage::ImageLuma8(GrayImage::from_fn(side, side, |x, y| {
        let (mx, my) = ((x / 6) as i64 - 4, (y / 6) as i64 - 4);
        let inside = (0..width as i64).contains(&mx) && (0..width as i64).contains(&my);
        if inside && colors[(my as u32 * width + mx as u32) as usize] == Color::Dark {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    }))
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// A clean synthetic code: the chain stops after the first decode.
fn bench_first_stage_hit(c: &mut Criterion) {
    let reader = ImageQrReader::default();
    let image = synthetic_qr("https://example.org/qrscan");

    c.bench_function("scan_image clean code", |b| {
        b.iter(|| black_box(reader.scan_image(black_box(&image))).ok());
    });
}

/// A 400x400 blank page: every stage is built and decoded.
fn bench_full_chain_miss(c: &mut Criterion) {
    let reader = ImageQrReader::default();
    let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(400, 400, Luma([230u8])));

    c.bench_function("scan_image blank (400x400)", |b| {
        b.iter(|| black_box(reader.scan_image(black_box(&image))).ok());
    });
}

criterion_group!(benches, bench_first_stage_hit, bench_full_chain_miss);
criterion_main!(benches);
