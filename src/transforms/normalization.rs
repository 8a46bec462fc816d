//! Rescaling and mean/std normalization transform steps.
//!
//! Both transforms read the image buffers named by their configured `keys`
//! from the sample, apply an elementwise operation, and write the result
//! back under the same key. Keys are processed in the configured order;
//! a missing key fails the whole apply call with the sample's lookup error.

use std::fmt;

use ndarray::Array3;

use crate::core::errors::PrepError;
use crate::core::sample::{ImageNormCfg, Sample, Value};
use crate::pipeline::Transform;
use crate::processors::{imnormalize, rescale_to_unit, u8_to_f32};

/// Key under which [`Normalize`] records the parameters it applied.
pub const IMG_NORM_CFG_KEY: &str = "img_norm_cfg";

/// Removes the entry at `key` and returns it as a float image buffer,
/// casting byte buffers on the way out.
fn take_float_image(sample: &mut Sample, key: &str) -> Result<Array3<f32>, PrepError> {
    match sample.take(key)? {
        Value::ImageU8(img) => Ok(u8_to_f32(&img)),
        Value::ImageF32(img) => Ok(img),
        other => Err(PrepError::TypeMismatch {
            key: key.to_string(),
            expected: "an image buffer",
            actual: other.kind(),
        }),
    }
}

/// Rescales byte-range image buffers into floating-point [0, 1].
///
/// Every element of each configured entry is cast to `f32` and divided by
/// 255. An empty key list is legal and makes `apply` a no-op.
#[derive(Debug, Clone)]
pub struct RescaleToZeroOne {
    keys: Vec<String>,
}

impl RescaleToZeroOne {
    /// Creates the transform for the given entry names. The keys are stored
    /// verbatim; no validation is performed.
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// The entry names this transform processes, in order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl Transform for RescaleToZeroOne {
    fn name(&self) -> &'static str {
        "RescaleToZeroOne"
    }

    fn apply(&self, mut sample: Sample) -> Result<Sample, PrepError> {
        for key in &self.keys {
            let img = take_float_image(&mut sample, key)?;
            sample.insert(key.clone(), Value::ImageF32(rescale_to_unit(img)));
        }
        Ok(sample)
    }
}

impl fmt::Display for RescaleToZeroOne {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RescaleToZeroOne(keys={:?})", self.keys)
    }
}

/// Normalizes image buffers with per-channel mean and standard deviation,
/// optionally reversing the channel order first.
///
/// After processing its keys the transform stamps the sample with the
/// parameters it applied, under [`IMG_NORM_CFG_KEY`], overwriting any prior
/// entry there. The stamp is written exactly once per apply call, even when
/// the key list is empty.
#[derive(Debug, Clone)]
pub struct Normalize {
    keys: Vec<String>,
    mean: Vec<f32>,
    std: Vec<f32>,
    to_rgb: bool,
}

impl Normalize {
    /// Creates the transform from per-channel statistics.
    ///
    /// `mean` and `std` are stored as given; their length is not checked
    /// against any image here. A mismatch against an actual buffer's channel
    /// count surfaces from [`imnormalize`] at apply time.
    pub fn new(keys: Vec<String>, mean: Vec<f32>, std: Vec<f32>, to_rgb: bool) -> Self {
        Self {
            keys,
            mean,
            std,
            to_rgb,
        }
    }

    /// The entry names this transform processes, in order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The normalization parameters as stamped into processed samples.
    pub fn norm_cfg(&self) -> ImageNormCfg {
        ImageNormCfg {
            mean: self.mean.clone(),
            std: self.std.clone(),
            to_rgb: self.to_rgb,
        }
    }
}

impl Transform for Normalize {
    fn name(&self) -> &'static str {
        "Normalize"
    }

    fn apply(&self, mut sample: Sample) -> Result<Sample, PrepError> {
        for key in &self.keys {
            let img = take_float_image(&mut sample, key)?;
            let img = imnormalize(img, &self.mean, &self.std, self.to_rgb)?;
            sample.insert(key.clone(), Value::ImageF32(img));
        }
        sample.insert(IMG_NORM_CFG_KEY, Value::NormCfg(self.norm_cfg()));
        Ok(sample)
    }
}

impl fmt::Display for Normalize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Normalize(keys={:?}, mean={:?}, std={:?}, to_rgb={})",
            self.keys, self.mean, self.std, self.to_rgb
        )
    }
}
