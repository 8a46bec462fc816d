//! Elementwise image-normalization primitives.
//!
//! These are the numeric building blocks the transform steps are written in
//! terms of: casting byte buffers to float, rescaling into the unit range,
//! and per-channel mean/std normalization with optional channel reversal.
//! All buffers are height x width x channels ([`ndarray::Array3`]).

use ndarray::{Array3, Axis};

use crate::core::errors::PrepError;

/// Casts a byte image to `f32`, element for element.
pub fn u8_to_f32(img: &Array3<u8>) -> Array3<f32> {
    img.mapv(|v| v as f32)
}

/// Divides every element by 255, mapping byte-range values into [0, 1].
pub fn rescale_to_unit(mut img: Array3<f32>) -> Array3<f32> {
    img.mapv_inplace(|v| v / 255.0);
    img
}

/// Normalizes an image with per-channel mean and standard deviation.
///
/// If `to_rgb` is set the channel axis is reversed first (BGR to RGB or
/// vice versa; the input must have exactly 3 channels). Every element is
/// then mapped to `(value - mean[c]) / std[c]` for its channel `c`.
///
/// # Errors
///
/// Returns [`PrepError::InvalidInput`] when `to_rgb` is set on a
/// non-3-channel buffer, or when `mean`/`std` length does not match the
/// channel count. A zero or negative standard deviation is not rejected;
/// the division follows IEEE semantics.
pub fn imnormalize(
    img: Array3<f32>,
    mean: &[f32],
    std: &[f32],
    to_rgb: bool,
) -> Result<Array3<f32>, PrepError> {
    let channels = img.len_of(Axis(2));

    if to_rgb && channels != 3 {
        return Err(PrepError::invalid_input(format!(
            "channel reversal expects a 3-channel image, got {channels} channels"
        )));
    }
    if mean.len() != channels || std.len() != channels {
        return Err(PrepError::invalid_input(format!(
            "mean/std length ({}/{}) does not match image channel count ({channels})",
            mean.len(),
            std.len(),
        )));
    }

    let mut img = img;
    if to_rgb {
        img.invert_axis(Axis(2));
    }

    for (c, mut plane) in img.axis_iter_mut(Axis(2)).enumerate() {
        let m = mean[c];
        let s = std[c];
        plane.mapv_inplace(|v| (v - m) / s);
    }

    Ok(img)
}
