//! The per-sample record that flows through a preprocessing pipeline.
//!
//! A [`Sample`] maps string keys to tagged [`Value`] entries: image buffers
//! plus whatever metadata transforms attach along the way. Transforms take
//! entries out, rework them, and insert the result back under the same key;
//! ownership of the whole record passes linearly from stage to stage, so no
//! entry is ever aliased across concurrently-executing stages.

use std::collections::HashMap;

use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::core::errors::PrepError;

/// Normalization parameters recorded by the `Normalize` transform.
///
/// Stored in the sample under [`crate::transforms::IMG_NORM_CFG_KEY`] so
/// downstream consumers can recover how the image buffers were normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageNormCfg {
    /// Per-channel mean that was subtracted.
    pub mean: Vec<f32>,
    /// Per-channel standard deviation that was divided by.
    pub std: Vec<f32>,
    /// Whether the channel order was reversed before normalizing.
    pub to_rgb: bool,
}

/// A single entry in a [`Sample`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A height x width x channels byte image.
    ImageU8(Array3<u8>),
    /// A height x width x channels float image.
    ImageF32(Array3<f32>),
    /// Normalization metadata attached by the `Normalize` transform.
    NormCfg(ImageNormCfg),
}

impl Value {
    /// Short human-readable name of the stored kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::ImageU8(_) => "a u8 image buffer",
            Value::ImageF32(_) => "an f32 image buffer",
            Value::NormCfg(_) => "normalization metadata",
        }
    }
}

/// The mutable record carrying image buffers and metadata through a pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    entries: HashMap<String, Value>,
}

impl Sample {
    /// Creates an empty sample.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the previous value stored under the key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Looks up an entry.
    ///
    /// # Errors
    ///
    /// Returns [`PrepError::MissingKey`] if the sample has no entry under
    /// `key`. Transforms propagate this unmodified; a configured key that is
    /// absent is never silently skipped.
    pub fn get(&self, key: &str) -> Result<&Value, PrepError> {
        self.entries.get(key).ok_or_else(|| PrepError::missing_key(key))
    }

    /// Removes and returns an entry.
    ///
    /// Transforms use this to replace an entry without cloning the buffer:
    /// take, rework, insert back under the same key.
    ///
    /// # Errors
    ///
    /// Returns [`PrepError::MissingKey`] if the sample has no entry under `key`.
    pub fn take(&mut self, key: &str) -> Result<Value, PrepError> {
        self.entries
            .remove(key)
            .ok_or_else(|| PrepError::missing_key(key))
    }

    /// Returns true if the sample has an entry under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries in the sample.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the sample has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the keys currently present (unordered).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Looks up a float image buffer.
    ///
    /// # Errors
    ///
    /// [`PrepError::MissingKey`] if absent, [`PrepError::TypeMismatch`] if the
    /// entry holds something other than an f32 image.
    pub fn get_image_f32(&self, key: &str) -> Result<&Array3<f32>, PrepError> {
        match self.get(key)? {
            Value::ImageF32(img) => Ok(img),
            other => Err(type_mismatch(key, "an f32 image buffer", other)),
        }
    }

    /// Looks up a byte image buffer.
    ///
    /// # Errors
    ///
    /// [`PrepError::MissingKey`] if absent, [`PrepError::TypeMismatch`] if the
    /// entry holds something other than a u8 image.
    pub fn get_image_u8(&self, key: &str) -> Result<&Array3<u8>, PrepError> {
        match self.get(key)? {
            Value::ImageU8(img) => Ok(img),
            other => Err(type_mismatch(key, "a u8 image buffer", other)),
        }
    }

    /// Looks up normalization metadata.
    ///
    /// # Errors
    ///
    /// [`PrepError::MissingKey`] if absent, [`PrepError::TypeMismatch`] if the
    /// entry holds something other than an [`ImageNormCfg`].
    pub fn get_norm_cfg(&self, key: &str) -> Result<&ImageNormCfg, PrepError> {
        match self.get(key)? {
            Value::NormCfg(cfg) => Ok(cfg),
            other => Err(type_mismatch(key, "normalization metadata", other)),
        }
    }
}

fn type_mismatch(key: &str, expected: &'static str, actual: &Value) -> PrepError {
    PrepError::TypeMismatch {
        key: key.to_string(),
        expected,
        actual: actual.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr3;

    #[test]
    fn get_and_take_report_missing_keys() {
        let mut sample = Sample::new();

        assert!(matches!(
            sample.get("img"),
            Err(PrepError::MissingKey { key }) if key == "img"
        ));
        assert!(matches!(
            sample.take("img"),
            Err(PrepError::MissingKey { key }) if key == "img"
        ));
    }

    #[test]
    fn insert_overwrites_and_returns_previous_entry() {
        let mut sample = Sample::new();
        sample.insert("img", Value::ImageU8(arr3(&[[[1u8, 2, 3]]])));

        let previous = sample.insert("img", Value::ImageF32(arr3(&[[[0.5f32, 0.5, 0.5]]])));
        assert!(matches!(previous, Some(Value::ImageU8(_))));
        assert_eq!(sample.len(), 1);
    }

    #[test]
    fn typed_accessors_reject_mismatched_entries() {
        let mut sample = Sample::new();
        sample.insert(
            "cfg",
            Value::NormCfg(ImageNormCfg {
                mean: vec![0.0],
                std: vec![1.0],
                to_rgb: false,
            }),
        );

        let err = sample.get_image_f32("cfg").unwrap_err();
        assert!(matches!(
            err,
            PrepError::TypeMismatch { expected: "an f32 image buffer", .. }
        ));

        assert!(sample.get_norm_cfg("cfg").is_ok());
    }

    #[test]
    fn take_removes_the_entry() {
        let mut sample = Sample::new();
        sample.insert("img", Value::ImageU8(arr3(&[[[9u8, 9, 9]]])));

        let taken = sample.take("img").unwrap();
        assert!(matches!(taken, Value::ImageU8(_)));
        assert!(sample.is_empty());
        assert!(!sample.contains("img"));
    }
}
