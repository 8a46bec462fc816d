//! Elementwise numeric primitives consumed by the transform steps.

pub mod normalization;

pub use normalization::{imnormalize, rescale_to_unit, u8_to_f32};
