// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Segmental Center-of-Mass Estimation
//!
//! Estimate the center of mass (CoM) of 14 body segments from the 33 BlazePose landmarks
//! of a single person in a still image. Segment CoMs follow the anthropometric ratios
//! tabulated by Winter (2005): limb CoMs lie a fixed fraction of the way from the
//! proximal to the distal joint, and feet, shoulders and hips use the joint midpoint.
//!
//! ## Features
//!
//! - **ONNX Runtime** - Runs BlazePose landmark models through `ort`, with optional
//!   hardware acceleration
//! - **Deterministic CoM core** - Pure functions over a landmark store, usable without a model
//! - **Pluggable detector** - Anything implementing [`LandmarkDetector`] can feed the estimator
//! - **Annotation** - Skeleton, landmark and CoM markers drawn onto the image
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use segmental_com::{EstimatorConfig, PoseModel};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EstimatorConfig::new().with_min_detection_confidence(0.5);
//!     let mut model = PoseModel::load_with_config("pose_landmark_full.onnx", config)?;
//!
//!     let results = model.predict("athlete.jpg")?;
//!     let (height, width) = results.orig_shape();
//!     for com in &results.coms {
//!         let (px, py) = com.to_pixel(width, height);
//!         println!("{}: ({:.3}, {:.3}) -> ({px}, {py})", com.name, com.x, com.y);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Without a Model
//!
//! The CoM core works on any [`LandmarkStore`]:
//!
//! ```rust
//! use segmental_com::{LandmarkStore, SEGMENTS, compute_segment_coms};
//!
//! let store: LandmarkStore = (0..33_usize).map(|i| (i, 0.5, 0.01 * i as f32)).collect();
//! let coms = compute_segment_coms(&store, &SEGMENTS).unwrap();
//! assert_eq!(coms.len(), 14);
//! assert_eq!(coms[0].name, "Left Thigh");
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Print landmarks and segment CoMs
//! segmental-com predict --model pose_landmark_full.onnx --source athlete.jpg
//!
//! # Save the annotated image to runs/com/predict
//! segmental-com predict --source athlete.jpg --save
//!
//! # Show the annotated image with segment labels
//! segmental-com predict --source athlete.jpg --show --labels
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`landmarks`] | [`Landmark`] and [`LandmarkStore`], BlazePose joint names |
//! | [`segment`] | Segment catalog ([`SEGMENTS`]) and [`SegmentClass`] |
//! | [`com`] | Segment CoM formulas and anthropometric ratios |
//! | [`aggregate`] | Per-image estimation ([`estimate`], [`compute_segment_coms`]) |
//! | [`detector`] | The [`LandmarkDetector`] trait |
//! | [`model`] | ONNX [`PoseModel`] |
//! | [`results`] | Output types ([`Results`], [`SegmentCom`], [`Speed`]) |
//! | [`inference`] | [`EstimatorConfig`] |
//! | [`error`] | Error types ([`ComError`], [`Result`]) |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `annotate` | Image annotation support (default) |
//! | `visualize` | Window display (default) |
//! | `cuda` | NVIDIA CUDA acceleration |
//! | `tensorrt` | NVIDIA `TensorRT` optimization |
//! | `coreml` | Apple `CoreML` (macOS/iOS) |
//! | `directml` | `DirectML` (Windows) |
//! | `openvino` | Intel `OpenVINO` |

// Modules
pub mod aggregate;
#[cfg(feature = "annotate")]
pub mod annotate;
pub mod cli;
pub mod com;
pub mod detector;
pub mod device;
pub mod error;
pub mod inference;
pub mod io;
pub mod landmarks;
pub mod model;
pub mod postprocessing;
pub mod preprocessing;
pub mod results;
pub mod segment;
pub mod utils;
pub mod visualizer;

// Re-export main types for convenience
pub use aggregate::{compute_segment_coms, estimate, estimate_with_catalog};
pub use detector::LandmarkDetector;
pub use device::Device;
pub use error::{ComError, Result};
pub use inference::EstimatorConfig;
pub use landmarks::{Landmark, LandmarkStore};
pub use model::PoseModel;
pub use results::{Results, SegmentCom, Speed};
pub use segment::{SEGMENTS, Segment, SegmentClass, find_segment};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "segmental-com");
    }
}
