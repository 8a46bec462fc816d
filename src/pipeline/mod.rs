//! The transform seam and the sequential pipeline executor.
//!
//! A [`Transform`] is a stateless, pre-configured operation mapping one
//! [`Sample`] to an updated sample. A [`Pipeline`] owns an ordered list of
//! boxed transforms and folds a sample through them; the sample is moved
//! into each stage and returned from it, so exactly one stage owns the
//! record at any point in time.
//!
//! Transforms hold no mutable state after construction, which makes sharing
//! a pipeline across threads safe; [`Pipeline::apply_batch`] exploits that
//! to process independent samples in parallel.

use std::fmt;

use rayon::prelude::*;
use tracing::debug;

use crate::core::errors::PrepError;
use crate::core::sample::Sample;

/// A configured preprocessing step.
///
/// Implementations are immutable after construction and are invoked many
/// times, once per sample. The `Display` implementation is the transform's
/// human-readable representation, used for logging only.
pub trait Transform: fmt::Debug + fmt::Display + Send + Sync {
    /// Short class name of the transform, as registered in the
    /// [`TransformRegistry`](crate::core::registry::TransformRegistry).
    fn name(&self) -> &'static str;

    /// Applies the transform, consuming the sample and returning it mutated.
    ///
    /// # Errors
    ///
    /// Lookup, type, and shape errors surface unmodified from the sample and
    /// the numeric primitives. On error the sample is dropped with the `Err`;
    /// entries already processed before the failing key are not rolled back.
    fn apply(&self, sample: Sample) -> Result<Sample, PrepError>;
}

/// An ordered sequence of transforms applied to each sample in turn.
#[derive(Debug, Default)]
pub struct Pipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// Creates a pipeline from an ordered list of transforms.
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { transforms }
    }

    /// Appends a transform to the end of the pipeline.
    pub fn push(&mut self, transform: Box<dyn Transform>) {
        self.transforms.push(transform);
    }

    /// Number of stages in the pipeline.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Returns true if the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Runs the sample through every stage in order.
    ///
    /// # Errors
    ///
    /// Returns the first stage error; later stages are not run.
    pub fn apply(&self, mut sample: Sample) -> Result<Sample, PrepError> {
        for transform in &self.transforms {
            debug!(transform = transform.name(), "applying transform");
            sample = transform.apply(sample)?;
        }
        Ok(sample)
    }

    /// Applies the pipeline to a batch of independent samples in parallel.
    ///
    /// Sample order is preserved in the output.
    ///
    /// # Errors
    ///
    /// If any sample fails, one of the failures is returned and the batch is
    /// discarded.
    pub fn apply_batch(&self, samples: Vec<Sample>) -> Result<Vec<Sample>, PrepError> {
        samples
            .into_par_iter()
            .map(|sample| self.apply(sample))
            .collect()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline(")?;
        for transform in &self.transforms {
            writeln!(f, "    {transform}")?;
        }
        write!(f, ")")
    }
}
