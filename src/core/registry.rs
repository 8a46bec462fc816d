//! Name-to-factory registry for transform construction.
//!
//! Pipeline declarations select transforms by class name. The registry maps
//! each name to a factory that deserializes the stage's configuration
//! mapping into the matching config struct and builds the boxed transform.
//! The map is populated once at startup ([`TransformRegistry::with_defaults`])
//! and can be extended with external transforms via [`TransformRegistry::register`].

use std::collections::HashMap;

use crate::core::config::{NormalizeConfig, RescaleToZeroOneConfig};
use crate::core::errors::PrepError;
use crate::pipeline::{Pipeline, Transform};

/// Factory signature stored in the registry: raw configuration mapping in,
/// boxed transform out.
pub type TransformBuilder = fn(serde_json::Value) -> Result<Box<dyn Transform>, PrepError>;

/// Registry of transform factories keyed by class name.
#[derive(Debug, Default)]
pub struct TransformRegistry {
    builders: HashMap<String, TransformBuilder>,
}

impl TransformRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the crate's transforms pre-registered under
    /// their class names.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("RescaleToZeroOne", |cfg| {
            let cfg: RescaleToZeroOneConfig = serde_json::from_value(cfg)
                .map_err(|e| PrepError::config_error_detailed("RescaleToZeroOne", e.to_string()))?;
            Ok(Box::new(cfg.build()))
        });
        registry.register("Normalize", |cfg| {
            let cfg: NormalizeConfig = serde_json::from_value(cfg)
                .map_err(|e| PrepError::config_error_detailed("Normalize", e.to_string()))?;
            Ok(Box::new(cfg.build()))
        });
        registry
    }

    /// Registers a factory under a class name, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, builder: TransformBuilder) {
        self.builders.insert(name.into(), builder);
    }

    /// Returns true if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Iterates over the registered class names (unordered).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.builders.keys().map(String::as_str)
    }

    /// Builds a transform by class name from its configuration mapping.
    ///
    /// # Errors
    ///
    /// [`PrepError::ConfigError`] when the name is unknown or the
    /// configuration does not deserialize into the transform's config struct.
    pub fn build(
        &self,
        name: &str,
        config: serde_json::Value,
    ) -> Result<Box<dyn Transform>, PrepError> {
        let builder = self
            .builders
            .get(name)
            .ok_or_else(|| PrepError::unknown_transform(name))?;
        builder(config)
    }

    /// Builds a [`Pipeline`] from a list of stage mappings.
    ///
    /// Each stage must be a mapping with a string `type` field naming the
    /// transform; the remaining fields form its configuration.
    ///
    /// # Errors
    ///
    /// [`PrepError::ConfigError`] for a non-mapping stage, a missing or
    /// non-string `type` field, an unknown name, or a bad configuration.
    pub fn build_pipeline(
        &self,
        stages: Vec<serde_json::Value>,
    ) -> Result<Pipeline, PrepError> {
        let mut transforms = Vec::with_capacity(stages.len());
        for stage in stages {
            transforms.push(self.build_stage(stage)?);
        }
        Ok(Pipeline::new(transforms))
    }

    fn build_stage(&self, stage: serde_json::Value) -> Result<Box<dyn Transform>, PrepError> {
        let serde_json::Value::Object(mut fields) = stage else {
            return Err(PrepError::config_error_detailed(
                "pipeline stage",
                "expected a mapping",
            ));
        };
        let name = match fields.remove("type") {
            Some(serde_json::Value::String(name)) => name,
            Some(_) => {
                return Err(PrepError::config_error_detailed(
                    "pipeline stage",
                    "'type' must be a string",
                ));
            }
            None => {
                return Err(PrepError::config_error_detailed(
                    "pipeline stage",
                    "missing 'type' field",
                ));
            }
        };
        self.build(&name, serde_json::Value::Object(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::{Sample, Value};
    use crate::transforms::IMG_NORM_CFG_KEY;
    use ndarray::arr3;
    use serde_json::json;

    #[test]
    fn defaults_cover_both_transforms() {
        let registry = TransformRegistry::with_defaults();
        assert!(registry.contains("RescaleToZeroOne"));
        assert!(registry.contains("Normalize"));

        let mut names: Vec<&str> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["Normalize", "RescaleToZeroOne"]);
    }

    #[test]
    fn builds_a_working_transform_from_a_mapping() {
        let registry = TransformRegistry::with_defaults();
        let transform = registry
            .build("RescaleToZeroOne", json!({"keys": ["img"]}))
            .unwrap();

        let mut sample = Sample::new();
        sample.insert("img", Value::ImageU8(arr3(&[[[255u8, 0, 128]]])));
        let out = transform.apply(sample).unwrap();
        assert_eq!(
            out.get_image_f32("img").unwrap(),
            &arr3(&[[[1.0f32, 0.0, 128.0 / 255.0]]])
        );
    }

    #[test]
    fn unknown_name_is_a_config_error() {
        let registry = TransformRegistry::with_defaults();
        let err = registry.build("Resize", json!({})).unwrap_err();
        assert!(matches!(err, PrepError::ConfigError { .. }));
        assert_eq!(err.to_string(), "configuration: unknown transform 'Resize'");
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let registry = TransformRegistry::with_defaults();
        // Normalize requires mean and std.
        let err = registry.build("Normalize", json!({"keys": ["img"]})).unwrap_err();
        assert!(matches!(err, PrepError::ConfigError { .. }));
    }

    #[test]
    fn build_pipeline_sequences_declared_stages() {
        let registry = TransformRegistry::with_defaults();
        let pipeline = registry
            .build_pipeline(vec![
                json!({"type": "RescaleToZeroOne", "keys": ["img"]}),
                json!({
                    "type": "Normalize",
                    "keys": ["img"],
                    "mean": [0.0, 0.0, 0.0],
                    "std": [1.0, 1.0, 1.0],
                }),
            ])
            .unwrap();
        assert_eq!(pipeline.len(), 2);

        let mut sample = Sample::new();
        sample.insert("img", Value::ImageU8(arr3(&[[[0u8, 128, 255]]])));
        let out = pipeline.apply(sample).unwrap();

        assert_eq!(
            out.get_image_f32("img").unwrap(),
            &arr3(&[[[0.0f32, 128.0 / 255.0, 1.0]]])
        );
        assert!(out.contains(IMG_NORM_CFG_KEY));
    }

    #[test]
    fn build_pipeline_rejects_stages_without_a_type() {
        let registry = TransformRegistry::with_defaults();

        let err = registry
            .build_pipeline(vec![json!({"keys": ["img"]})])
            .unwrap_err();
        assert!(matches!(err, PrepError::ConfigError { .. }));

        let err = registry.build_pipeline(vec![json!([1, 2])]).unwrap_err();
        assert!(matches!(err, PrepError::ConfigError { .. }));
    }

    #[test]
    fn registered_external_factories_take_part_in_lookup() {
        let mut registry = TransformRegistry::new();
        registry.register("RescaleToZeroOne", |cfg| {
            let cfg: crate::core::config::RescaleToZeroOneConfig = serde_json::from_value(cfg)
                .map_err(|e| PrepError::config_error_detailed("RescaleToZeroOne", e.to_string()))?;
            Ok(Box::new(cfg.build()))
        });

        assert!(registry.contains("RescaleToZeroOne"));
        assert!(!registry.contains("Normalize"));
        assert!(
            registry
                .build("RescaleToZeroOne", json!({"keys": []}))
                .is_ok()
        );
    }
}
