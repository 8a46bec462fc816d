//! Configuration types for constructing transforms declaratively.
//!
//! Each transform has an explicit configuration struct whose fields mirror
//! its constructor parameters, plus a tagged [`TransformConfig`] enum for
//! pipeline declarations carried in serde-compatible formats. The registry
//! in [`crate::core::registry`] deserializes into these structs by name.

use serde::{Deserialize, Serialize};

use crate::pipeline::Transform;
use crate::transforms::{Normalize, RescaleToZeroOne};

/// Configuration for [`RescaleToZeroOne`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescaleToZeroOneConfig {
    /// Names of the image entries to rescale, in processing order.
    pub keys: Vec<String>,
}

impl RescaleToZeroOneConfig {
    /// Builds the configured transform.
    pub fn build(self) -> RescaleToZeroOne {
        RescaleToZeroOne::new(self.keys)
    }
}

/// Configuration for [`Normalize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeConfig {
    /// Names of the image entries to normalize, in processing order.
    pub keys: Vec<String>,
    /// Per-channel mean values.
    pub mean: Vec<f32>,
    /// Per-channel standard deviation values.
    pub std: Vec<f32>,
    /// Whether to reverse the channel order before normalizing.
    #[serde(default)]
    pub to_rgb: bool,
}

impl NormalizeConfig {
    /// Builds the configured transform.
    pub fn build(self) -> Normalize {
        Normalize::new(self.keys, self.mean, self.std, self.to_rgb)
    }
}

/// One pipeline stage, tagged by the transform's class name.
///
/// The serde representation is internally tagged on `type`, so a stage in a
/// JSON pipeline declaration reads
/// `{"type": "Normalize", "keys": ["img"], "mean": [...], "std": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransformConfig {
    /// A [`RescaleToZeroOne`] stage.
    RescaleToZeroOne(RescaleToZeroOneConfig),
    /// A [`Normalize`] stage.
    Normalize(NormalizeConfig),
}

impl TransformConfig {
    /// The class name this stage is registered under.
    pub fn type_name(&self) -> &'static str {
        match self {
            TransformConfig::RescaleToZeroOne(_) => "RescaleToZeroOne",
            TransformConfig::Normalize(_) => "Normalize",
        }
    }

    /// Builds the configured transform, boxed for pipeline storage.
    pub fn build(self) -> Box<dyn Transform> {
        match self {
            TransformConfig::RescaleToZeroOne(cfg) => Box::new(cfg.build()),
            TransformConfig::Normalize(cfg) => Box::new(cfg.build()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_config_defaults_to_rgb_off() {
        let cfg: NormalizeConfig = serde_json::from_str(
            r#"{"keys": ["img"], "mean": [0.0, 0.0, 0.0], "std": [1.0, 1.0, 1.0]}"#,
        )
        .unwrap();
        assert!(!cfg.to_rgb);

        let transform = cfg.build();
        assert_eq!(transform.keys(), ["img".to_string()]);
    }

    #[test]
    fn tagged_stage_deserializes_by_type_name() {
        let cfg: TransformConfig =
            serde_json::from_str(r#"{"type": "RescaleToZeroOne", "keys": ["img", "gt"]}"#).unwrap();

        assert_eq!(cfg.type_name(), "RescaleToZeroOne");
        let transform = cfg.build();
        assert_eq!(transform.name(), "RescaleToZeroOne");
    }

    #[test]
    fn tagged_stage_round_trips_through_serde() {
        let cfg = TransformConfig::Normalize(NormalizeConfig {
            keys: vec!["img".to_string()],
            mean: vec![0.5, 0.5, 0.5],
            std: vec![0.25, 0.25, 0.25],
            to_rgb: true,
        });

        let json = serde_json::to_string(&cfg).unwrap();
        let back: TransformConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.type_name(), "Normalize");

        let TransformConfig::Normalize(cfg) = back else {
            panic!("expected a Normalize stage");
        };
        assert_eq!(cfg.mean, vec![0.5, 0.5, 0.5]);
        assert!(cfg.to_rgb);
    }
}
