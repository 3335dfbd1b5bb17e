// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose landmark model loading and inference.
//!
//! This module provides [`PoseModel`], an ONNX Runtime wrapper around a BlazePose-style
//! landmark model. It is the production [`LandmarkDetector`].

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use ndarray::Array4;
use ort::session::Session;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::value::{TensorRef, ValueType};

use crate::aggregate::estimate;
use crate::detector::LandmarkDetector;
use crate::device::Device;
use crate::error::{ComError, Result};
use crate::inference::{DEFAULT_IMGSZ, EstimatorConfig};
use crate::io::load_image;
use crate::landmarks::LandmarkStore;
use crate::postprocessing::decode_landmarks;
use crate::preprocessing::{TensorLayout, preprocess_image};
use crate::results::{Results, Speed};

/// Pose landmark model.
///
/// This struct wraps an ONNX Runtime session. Each call to
/// [`detect`](LandmarkDetector::detect) finds at most one person.
///
/// # Example
///
/// ```no_run
/// use segmental_com::PoseModel;
///
/// let mut model = PoseModel::load("pose_landmark_full.onnx")?;
/// let results = model.predict("athlete.jpg")?;
/// for com in &results.coms {
///     println!("{}: ({:.3}, {:.3})", com.name, com.x, com.y);
/// }
/// # Ok::<(), segmental_com::ComError>(())
/// ```
pub struct PoseModel {
    /// ONNX Runtime session.
    session: Session,
    /// Input tensor name.
    input_name: String,
    /// Output tensor names.
    output_names: Vec<String>,
    /// Input tensor layout.
    layout: TensorLayout,
    /// Model input size (height, width).
    imgsz: (usize, usize),
    /// Estimator configuration.
    config: EstimatorConfig,
    /// Whether model has been warmed up.
    warmed_up: bool,
    /// Timings of the last detection.
    last_speed: Speed,
}

impl PoseModel {
    /// Load a pose landmark model from an ONNX file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the ONNX model file.
    ///
    /// # Errors
    ///
    /// Returns an error if the model file doesn't exist or can't be loaded.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_config(path, EstimatorConfig::default())
    }

    /// Load a pose landmark model with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the ONNX model file.
    /// * `config` - Custom estimator configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the model file doesn't exist, can't be loaded, or its input
    /// is not an image tensor.
    pub fn load_with_config<P: AsRef<Path>>(path: P, config: EstimatorConfig) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ComError::ModelLoadError(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let builder = Session::builder()
            .map_err(|e| ComError::ModelLoadError(format!("Failed to create session builder: {e}")))?;
        let builder = register_device(builder, config.device.as_ref().unwrap_or(&Device::Cpu))?;

        let session = builder
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ComError::ModelLoadError(format!("Failed to set optimization level: {e}")))?
            .with_intra_threads(config.num_threads)
            .map_err(|e| ComError::ModelLoadError(format!("Failed to set intra-thread count: {e}")))?
            .commit_from_file(path)
            .map_err(|e| ComError::ModelLoadError(format!("Failed to load model: {e}")))?;

        let input = session
            .inputs
            .first()
            .ok_or_else(|| ComError::ModelLoadError("Model has no inputs".to_string()))?;
        let input_name = input.name.clone();
        let input_shape: Vec<i64> = match &input.input_type {
            ValueType::Tensor { shape, .. } => shape.iter().copied().collect(),
            other => {
                return Err(ComError::ModelLoadError(format!(
                    "Model input '{input_name}' is not a tensor: {other:?}"
                )));
            }
        };
        let layout = TensorLayout::from_shape(&input_shape).ok_or_else(|| {
            ComError::ModelLoadError(format!(
                "Unsupported model input shape {input_shape:?}, expected a 4-D RGB image tensor"
            ))
        })?;
        let imgsz = config
            .imgsz
            .or_else(|| layout.spatial_size(&input_shape))
            .unwrap_or(DEFAULT_IMGSZ);

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();

        Ok(Self {
            session,
            input_name,
            output_names,
            layout,
            imgsz,
            config,
            warmed_up: false,
            last_speed: Speed::default(),
        })
    }

    /// Warm up the model by running inference with a dummy input.
    ///
    /// Warmup is automatically called on the first detection.
    ///
    /// # Errors
    ///
    /// Returns an error if the dummy inference fails.
    pub fn warmup(&mut self) -> Result<()> {
        if self.warmed_up {
            return Ok(());
        }

        let (height, width) = self.imgsz;
        let dummy_input = match self.layout {
            TensorLayout::Nhwc => Array4::<f32>::zeros((1, height, width, 3)),
            TensorLayout::Nchw => Array4::<f32>::zeros((1, 3, height, width)),
        };
        let _ = self.run_inference(&dummy_input)?;

        self.warmed_up = true;
        Ok(())
    }

    /// Estimate segment CoMs for an image file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the image file.
    ///
    /// # Errors
    ///
    /// Returns an error if the image can't be loaded, inference fails, or a segment joint
    /// is missing from the detected landmarks.
    pub fn predict<P: AsRef<Path>>(&mut self, path: P) -> Result<Results> {
        let path = path.as_ref();
        let image = load_image(path)?;
        estimate(self, &image, path.to_string_lossy().to_string())
    }

    /// Run the ONNX model and collect every output as (data, shape).
    fn run_inference(&mut self, input: &Array4<f32>) -> Result<Vec<(Vec<f32>, Vec<usize>)>> {
        let input_contiguous = input.as_standard_layout();

        let input_tensor = TensorRef::from_array_view(&input_contiguous)
            .map_err(|e| ComError::InferenceError(format!("Failed to create input tensor: {e}")))?;

        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| ComError::InferenceError(format!("Inference failed: {e}")))?;

        self.output_names
            .iter()
            .map(|name| {
                let output = outputs
                    .get(name.as_str())
                    .ok_or_else(|| ComError::InferenceError(format!("Output '{name}' not found")))?;

                let (shape, data) = output
                    .try_extract_tensor::<f32>()
                    .map_err(|e| ComError::InferenceError(format!("Failed to extract output '{name}': {e}")))?;

                #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
                let shape_vec: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
                Ok((data.to_vec(), shape_vec))
            })
            .collect()
    }

    /// Get the model's input size (height, width).
    #[must_use]
    pub const fn imgsz(&self) -> (usize, usize) {
        self.imgsz
    }

    /// Get the model's input tensor layout.
    #[must_use]
    pub const fn layout(&self) -> TensorLayout {
        self.layout
    }

    /// Get the estimator configuration.
    #[must_use]
    pub const fn config(&self) -> &EstimatorConfig {
        &self.config
    }
}

impl LandmarkDetector for PoseModel {
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<LandmarkStore>> {
        if !self.warmed_up {
            self.warmup()?;
        }

        let start_preprocess = Instant::now();
        let preprocess_result = preprocess_image(image, self.imgsz, self.layout);
        let preprocess_time = start_preprocess.elapsed().as_secs_f64() * 1000.0;

        let start_inference = Instant::now();
        let outputs = self.run_inference(&preprocess_result.tensor)?;
        let inference_time = start_inference.elapsed().as_secs_f64() * 1000.0;

        let start_postprocess = Instant::now();
        let landmarks = decode_landmarks(
            &outputs,
            &preprocess_result,
            self.config.min_detection_confidence,
        )?;
        let postprocess_time = start_postprocess.elapsed().as_secs_f64() * 1000.0;

        self.last_speed = Speed::new(preprocess_time, inference_time, postprocess_time);
        Ok(landmarks)
    }

    fn last_speed(&self) -> Speed {
        self.last_speed.clone()
    }
}

impl std::fmt::Debug for PoseModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoseModel")
            .field("input", &self.input_name)
            .field("outputs", &self.output_names)
            .field("layout", &self.layout)
            .field("imgsz", &self.imgsz)
            .field("min_detection_confidence", &self.config.min_detection_confidence)
            .finish()
    }
}

/// Register the execution provider for `device`.
///
/// Devices whose Cargo feature is not compiled in fall back to the CPU with a warning.
#[allow(unreachable_code)]
fn register_device(builder: SessionBuilder, device: &Device) -> Result<SessionBuilder> {
    let registered: ort::Result<SessionBuilder> = match device {
        Device::Cpu => return Ok(builder),
        #[cfg(feature = "cuda")]
        Device::Cuda(index) => {
            use ort::execution_providers::CUDAExecutionProvider;
            builder.with_execution_providers([CUDAExecutionProvider::default()
                .with_device_id(device_id(*index)?)
                .build()])
        }
        #[cfg(feature = "tensorrt")]
        Device::TensorRt(index) => {
            use ort::execution_providers::TensorRTExecutionProvider;
            builder.with_execution_providers([TensorRTExecutionProvider::default()
                .with_device_id(device_id(*index)?)
                .build()])
        }
        #[cfg(feature = "coreml")]
        Device::CoreMl => {
            use ort::execution_providers::CoreMLExecutionProvider;
            builder.with_execution_providers([CoreMLExecutionProvider::default()
                .with_subgraphs(true)
                .build()])
        }
        #[cfg(feature = "directml")]
        Device::DirectMl(index) => {
            use ort::execution_providers::DirectMLExecutionProvider;
            builder.with_execution_providers([DirectMLExecutionProvider::default()
                .with_device_id(device_id(*index)?)
                .build()])
        }
        #[cfg(feature = "openvino")]
        Device::OpenVino => {
            use ort::execution_providers::OpenVINOExecutionProvider;
            builder.with_execution_providers([OpenVINOExecutionProvider::default().build()])
        }
        #[allow(unreachable_patterns)]
        other => {
            crate::warn!(
                "Device '{other}' needs the '{}' feature, which is not enabled; running on CPU",
                other.feature().unwrap_or("cpu")
            );
            return Ok(builder);
        }
    };

    registered.map_err(|e| {
        ComError::ModelLoadError(format!("Failed to register {device} execution provider: {e}"))
    })
}

/// Convert a device index to the signed id ONNX Runtime expects.
#[cfg(any(feature = "cuda", feature = "tensorrt", feature = "directml"))]
fn device_id(index: usize) -> Result<i32> {
    i32::try_from(index).map_err(|_| ComError::ConfigError(format!("Device index {index} out of range")))
}
