//! Conversion helpers and logging setup.
//!
//! Samples store images as height x width x channels arrays; these helpers
//! bridge to the `image` crate's pixel buffers so callers can feed decoded
//! images into a pipeline. Decoding and file I/O stay with the caller.

use image::{Rgb, RgbImage};
use ndarray::Array3;

use crate::core::errors::PrepError;

/// Moves an RGB pixel buffer into a height x width x 3 byte array.
///
/// The pixel data is reused as the array's backing storage; `image` stores
/// pixels row-major with interleaved channels, which is exactly the array's
/// standard layout.
///
/// # Errors
///
/// Returns [`PrepError::Tensor`] if the buffer length does not match the
/// image dimensions.
pub fn rgb_image_to_array(img: RgbImage) -> Result<Array3<u8>, PrepError> {
    let (width, height) = img.dimensions();
    let array = Array3::from_shape_vec((height as usize, width as usize, 3), img.into_raw())?;
    Ok(array)
}

/// Copies a height x width x 3 byte array back into an RGB pixel buffer.
///
/// Works for any memory layout, including views with reversed channel order.
///
/// # Errors
///
/// Returns [`PrepError::InvalidInput`] if the array's channel count is not 3.
pub fn array_to_rgb_image(array: &Array3<u8>) -> Result<RgbImage, PrepError> {
    let (height, width, channels) = array.dim();
    if channels != 3 {
        return Err(PrepError::invalid_input(format!(
            "expected a 3-channel array, got {channels} channels"
        )));
    }

    let mut img = RgbImage::new(width as u32, height as u32);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([
            array[(y as usize, x as usize, 0)],
            array[(y as usize, x as usize, 1)],
            array[(y as usize, x as usize, 2)],
        ]);
    }
    Ok(img)
}

/// Initializes a tracing subscriber reading its filter from `RUST_LOG`,
/// defaulting to `info`. Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
