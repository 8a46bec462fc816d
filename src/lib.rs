//! Data-pipeline transform steps for preparing images ahead of model input.
//!
//! The crate centers on two transforms:
//!
//! - [`RescaleToZeroOne`] divides byte-range pixel values by 255, producing
//!   floating-point buffers in [0, 1].
//! - [`Normalize`] subtracts a per-channel mean and divides by a per-channel
//!   standard deviation, optionally reversing the channel order first, and
//!   stamps the sample with the parameters it applied.
//!
//! Both read named entries from a [`Sample`], the mutable record carried
//! through a pipeline, and write the reworked buffers back under the same
//! names. Transforms are constructed directly, from serde-deserialized
//! config structs, or by class name through the [`TransformRegistry`], and
//! are sequenced by a [`Pipeline`]:
//!
//! ```
//! use img_prep::{Sample, TransformRegistry, Value};
//! use ndarray::arr3;
//! use serde_json::json;
//!
//! let registry = TransformRegistry::with_defaults();
//! let pipeline = registry
//!     .build_pipeline(vec![
//!         json!({"type": "RescaleToZeroOne", "keys": ["img"]}),
//!         json!({
//!             "type": "Normalize",
//!             "keys": ["img"],
//!             "mean": [0.5, 0.5, 0.5],
//!             "std": [0.5, 0.5, 0.5],
//!         }),
//!     ])
//!     .unwrap();
//!
//! let mut sample = Sample::new();
//! sample.insert("img", Value::ImageU8(arr3(&[[[0u8, 128, 255]]])));
//! let out = pipeline.apply(sample).unwrap();
//! assert!(out.contains("img_norm_cfg"));
//! ```

pub mod core;
pub mod pipeline;
pub mod processors;
pub mod transforms;
pub mod utils;

pub use crate::core::{
    ImageNormCfg, NormalizeConfig, PrepError, RescaleToZeroOneConfig, Sample, TransformConfig,
    TransformRegistry, Value,
};
pub use crate::pipeline::{Pipeline, Transform};
pub use crate::transforms::{IMG_NORM_CFG_KEY, Normalize, RescaleToZeroOne};
