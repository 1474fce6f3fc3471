// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Preprocessing transforms used as decode fallbacks — Gaussian blur, adaptive
// Gaussian thresholding and global Otsu thresholding of grayscale images.

use image::{GrayImage, Luma};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::filter::separable_filter_equal;
use tracing::{debug, instrument};

/// Precomputed binomial kernels for small windows. Sizes 1–7 use these
/// instead of sampling a Gaussian, matching common computer-vision toolkits.
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Standard deviation implied by a kernel size when none is given.
pub fn sigma_for_kernel(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalised 1-D Gaussian kernel of `size` taps (`size` must be odd).
pub fn gaussian_kernel(size: u32) -> Vec<f32> {
    debug_assert!(size % 2 == 1, "kernel size must be odd");
    if size <= 7 {
        return SMALL_KERNELS[(size / 2) as usize].to_vec();
    }

    let sigma = sigma_for_kernel(size);
    let scale = -0.5 / (sigma * sigma);
    let centre = (size / 2) as f32;
    let raw: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - centre;
            (scale * x * x).exp()
        })
        .collect();
    let sum: f32 = raw.iter().sum();
    raw.into_iter().map(|w| w / sum).collect()
}

/// Blur with a square `size` x `size` Gaussian window. Edges are clamped.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn gaussian_blur(gray: &GrayImage, size: u32) -> GrayImage {
    let kernel = gaussian_kernel(size);
    debug!(size, sigma = sigma_for_kernel(size), "Applying Gaussian blur");
    separable_filter_equal(gray, &kernel)
}

/// Adaptive Gaussian threshold.
///
/// Each pixel is compared with the Gaussian-weighted mean of its
/// `block_size` x `block_size` neighbourhood minus `c`. Pixels strictly above
/// that local threshold become white (255); the rest become black (0).
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn adaptive_gaussian_threshold(gray: &GrayImage, block_size: u32, c: i32) -> GrayImage {
    let local_mean = gaussian_blur(gray, block_size);

    let output = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = gray.get_pixel(x, y).0[0] as i32;
        let mean = local_mean.get_pixel(x, y).0[0] as i32;
        if value > mean - c {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });

    debug!(block_size, c, "Adaptive threshold complete");
    output
}

/// Global binarization at the Otsu level: pixels above the level become 255,
/// the rest 0.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn otsu_threshold(gray: &GrayImage) -> GrayImage {
    let level = otsu_level(gray);
    debug!(level, "Otsu level computed");
    threshold(gray, level, ThresholdType::Binary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within_one(a: u8, b: u8) -> bool {
        (a as i16 - b as i16).abs() <= 1
    }

    #[test]
    fn sigma_matches_kernel_size_rule() {
        assert!((sigma_for_kernel(5) - 1.1).abs() < 1e-6);
        assert!((sigma_for_kernel(11) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn five_tap_kernel_is_binomial() {
        assert_eq!(gaussian_kernel(5), vec![0.0625, 0.25, 0.375, 0.25, 0.0625]);
    }

    #[test]
    fn large_kernel_is_normalised_and_symmetric() {
        let kernel = gaussian_kernel(11);
        assert_eq!(kernel.len(), 11);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5, "sum was {sum}");
        for i in 0..kernel.len() / 2 {
            assert!((kernel[i] - kernel[kernel.len() - 1 - i]).abs() < 1e-7);
        }
        // Peak at the centre tap.
        let peak = kernel
            .iter()
            .cloned()
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(peak, kernel[5]);
    }

    #[test]
    fn blur_keeps_flat_image_flat() {
        let gray = GrayImage::from_pixel(20, 20, Luma([180u8]));
        let blurred = gaussian_blur(&gray, 5);
        assert_eq!(blurred.dimensions(), (20, 20));
        assert!(blurred.pixels().all(|p| within_one(p.0[0], 180)));
    }

    #[test]
    fn blur_softens_a_hard_edge() {
        let gray = GrayImage::from_fn(20, 20, |x, _| {
            if x < 10 { Luma([0u8]) } else { Luma([255u8]) }
        });
        let blurred = gaussian_blur(&gray, 5);
        let left = blurred.get_pixel(9, 10).0[0];
        let right = blurred.get_pixel(10, 10).0[0];
        assert!(left > 0 && left < 128, "left of edge was {left}");
        assert!(right > 128 && right < 255, "right of edge was {right}");
        // Far from the edge nothing changes.
        assert_eq!(blurred.get_pixel(0, 10).0[0], 0);
        assert!(within_one(blurred.get_pixel(19, 10).0[0], 255));
    }

    #[test]
    fn adaptive_threshold_of_flat_image_is_white() {
        let gray = GrayImage::from_pixel(32, 32, Luma([90u8]));
        let binary = adaptive_gaussian_threshold(&gray, 11, 2);
        assert!(binary.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn adaptive_threshold_marks_dark_spot() {
        let mut gray = GrayImage::from_pixel(32, 32, Luma([200u8]));
        for y in 14..18 {
            for x in 14..18 {
                gray.put_pixel(x, y, Luma([20u8]));
            }
        }
        let binary = adaptive_gaussian_threshold(&gray, 11, 2);
        assert_eq!(binary.get_pixel(15, 15).0[0], 0);
        assert_eq!(binary.get_pixel(2, 2).0[0], 255);
        assert!(binary.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn otsu_separates_two_tones() {
        let gray = GrayImage::from_fn(40, 10, |x, _| {
            if x < 20 { Luma([30u8]) } else { Luma([220u8]) }
        });
        let binary = otsu_threshold(&gray);
        assert_eq!(binary.get_pixel(5, 5).0[0], 0);
        assert_eq!(binary.get_pixel(35, 5).0[0], 255);
    }
}
