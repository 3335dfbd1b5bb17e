// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Estimator configuration.
//!
//! This module defines the [`EstimatorConfig`] struct, which controls the pose detector:
//! the minimum pose confidence, model input size, and hardware execution options.

use crate::device::Device;

/// Input size used when the model does not declare a fixed one.
pub const DEFAULT_IMGSZ: (usize, usize) = (256, 256);

/// Configuration for the pose landmark detector.
///
/// It uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use segmental_com::EstimatorConfig;
///
/// let config = EstimatorConfig::new()
///     .with_min_detection_confidence(0.6)
///     .with_imgsz(256, 256)
///     .with_threads(4);
/// ```
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Minimum pose presence score (0.0 to 1.0).
    /// Images scoring lower are reported as having no person.
    pub min_detection_confidence: f32,
    /// Explicit input image size (height, width).
    /// If `None`, the model's declared input shape is used, falling back to [`DEFAULT_IMGSZ`].
    pub imgsz: Option<(usize, usize)>,
    /// Number of intra-op threads for ONNX Runtime.
    /// Setting this to `0` allows ONNX Runtime to choose.
    pub num_threads: usize,
    /// Execution device. `None` runs on the CPU.
    pub device: Option<Device>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.5,
            imgsz: None,
            num_threads: 0,
            device: None,
        }
    }
}

impl EstimatorConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum pose presence score.
    ///
    /// # Arguments
    ///
    /// * `threshold` - The minimum score (0.0 to 1.0).
    #[must_use]
    pub const fn with_min_detection_confidence(mut self, threshold: f32) -> Self {
        self.min_detection_confidence = threshold;
        self
    }

    /// Set the input image size.
    ///
    /// # Arguments
    ///
    /// * `height` - The target image height.
    /// * `width` - The target image width.
    #[must_use]
    pub const fn with_imgsz(mut self, height: usize, width: usize) -> Self {
        self.imgsz = Some((height, width));
        self
    }

    /// Set the number of threads for inference.
    ///
    /// # Arguments
    ///
    /// * `threads` - The number of intra-op threads. Set to `0` for auto-configuration.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }

    /// Set the execution device.
    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = EstimatorConfig::default();
        assert!((config.min_detection_confidence - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.imgsz, None);
        assert_eq!(config.num_threads, 0);
        assert_eq!(config.device, None);
    }

    #[test]
    fn test_config_builder() {
        let config = EstimatorConfig::new()
            .with_min_detection_confidence(0.7)
            .with_imgsz(224, 224)
            .with_threads(8)
            .with_device(Device::Cuda(1));

        assert!((config.min_detection_confidence - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.imgsz, Some((224, 224)));
        assert_eq!(config.num_threads, 8);
        assert_eq!(config.device, Some(Device::Cuda(1)));
    }
}
