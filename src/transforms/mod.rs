//! Transform steps applied to samples flowing through a pipeline.

pub mod normalization;

pub use normalization::{IMG_NORM_CFG_KEY, Normalize, RescaleToZeroOne};
