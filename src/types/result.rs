//! Pipeline result type

use super::TrackedTarget;

/// Everything one processed frame reported.
///
/// Targets keep the order the pipeline reported them in; the first one is the
/// "best" target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineResult {
    latency_millis: f64,
    targets: Vec<TrackedTarget>,
}

impl PipelineResult {
    pub fn new(latency_millis: f64, targets: Vec<TrackedTarget>) -> Self {
        Self { latency_millis, targets }
    }

    /// A result with zero latency and no targets.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn latency_millis(&self) -> f64 {
        self.latency_millis
    }

    /// Derived from the target list, never stored separately.
    pub fn has_targets(&self) -> bool {
        !self.targets.is_empty()
    }

    pub fn targets(&self) -> &[TrackedTarget] {
        &self.targets
    }

    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn best_target(&self) -> Option<&TrackedTarget> {
        self.targets.first()
    }

    pub fn into_targets(self) -> Vec<TrackedTarget> {
        self.targets
    }
}
