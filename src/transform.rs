//! Per-image transformations: longest-side resize and watermark overlay.
//!
//! Both operations delegate pixel work to the `image` crate.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

/// Horizontal offset of the watermark's top-left corner, in pixels.
pub const WATERMARK_LEFT: i64 = 20;

/// Vertical offset of the watermark's top-left corner, in pixels.
pub const WATERMARK_TOP: i64 = 20;

/// Resize so the longest side equals `size`, preserving aspect ratio.
///
/// Images are scaled up as well as down. Uses Lanczos3 filtering.
#[must_use]
pub fn resize_longest_side(image: &DynamicImage, size: u32) -> DynamicImage {
    image.resize(size, size, FilterType::Lanczos3)
}

/// Composite `watermark` onto `image` at ([`WATERMARK_LEFT`], [`WATERMARK_TOP`]).
///
/// The watermark is alpha-blended at its native size. Parts that fall outside
/// the base image are clipped. The base image keeps its color type.
pub fn apply_watermark(image: &mut DynamicImage, watermark: &RgbaImage) {
    imageops::overlay(image, watermark, WATERMARK_LEFT, WATERMARK_TOP);
}
