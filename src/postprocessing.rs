// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Post-processing for pose landmark model outputs.
//!
//! A BlazePose-style landmark model emits several tensors per image. Two of them matter
//! here: the landmark tensor (`N >= 33` landmarks of `x, y, z, visibility, presence`, in
//! model input pixels) and a single-element pose flag. Everything else (segmentation
//! mask, heatmap, world landmarks) is ignored.

use crate::error::{ComError, Result};
use crate::landmarks::{LANDMARK_COUNT, Landmark, LandmarkStore};
use crate::preprocessing::{PreprocessResult, scale_point};
use crate::utils::sigmoid;

/// Values per landmark in the landmark tensor: x, y, z, visibility, presence.
pub const LANDMARK_STRIDE: usize = 5;

/// Largest landmark count a model may emit (33 body joints plus 6 auxiliary points).
pub const MAX_MODEL_LANDMARKS: usize = 39;

/// Decode raw model outputs into a normalized landmark store.
///
/// # Arguments
///
/// * `outputs` - Raw model outputs as (data, shape) pairs, in session output order.
/// * `preprocess` - Letterbox parameters used to build the model input.
/// * `min_detection_confidence` - Pose flag threshold below which nobody is reported.
///
/// # Returns
///
/// `Ok(None)` when the pose flag is below the threshold, otherwise the 33 body landmarks
/// in normalized image coordinates.
///
/// # Errors
///
/// Returns [`ComError::PostProcessingError`] if the landmark or pose flag output is missing.
pub fn decode_landmarks(
    outputs: &[(Vec<f32>, Vec<usize>)],
    preprocess: &PreprocessResult,
    min_detection_confidence: f32,
) -> Result<Option<LandmarkStore>> {
    let landmarks = find_landmark_output(outputs).ok_or_else(|| {
        ComError::PostProcessingError(format!(
            "No landmark output found among {} model outputs",
            outputs.len()
        ))
    })?;
    let flag = find_pose_flag(outputs).ok_or_else(|| {
        ComError::PostProcessingError("No pose flag output found".to_string())
    })?;

    if flag.is_nan() || pose_score(flag) < min_detection_confidence {
        return Ok(None);
    }

    let (orig_h, orig_w) = preprocess.orig_shape;
    #[allow(clippy::cast_precision_loss)]
    let (orig_h, orig_w) = (orig_h as f32, orig_w as f32);

    let store = landmarks
        .chunks_exact(LANDMARK_STRIDE)
        .take(LANDMARK_COUNT)
        .enumerate()
        .map(|(index, values)| {
            let (x, y) = scale_point(values[0], values[1], preprocess.scale, preprocess.padding);
            let landmark = Landmark::new(x / orig_w, y / orig_h).with_visibility(sigmoid(values[3]));
            (index, landmark)
        })
        .collect();

    Ok(Some(store))
}

/// Find the landmark tensor: a multiple of 5 values holding 33 to 39 landmarks.
fn find_landmark_output(outputs: &[(Vec<f32>, Vec<usize>)]) -> Option<&[f32]> {
    outputs
        .iter()
        .map(|(data, _)| data.as_slice())
        .find(|data| {
            data.len() % LANDMARK_STRIDE == 0
                && (LANDMARK_COUNT..=MAX_MODEL_LANDMARKS).contains(&(data.len() / LANDMARK_STRIDE))
        })
}

/// Find the single-element pose flag tensor.
fn find_pose_flag(outputs: &[(Vec<f32>, Vec<usize>)]) -> Option<f32> {
    outputs
        .iter()
        .find(|(data, shape)| data.len() == 1 && shape.iter().product::<usize>() == 1)
        .map(|(data, _)| data[0])
}

/// Some exports bake the sigmoid into the graph and some don't; a value outside [0, 1]
/// can only be a logit.
fn pose_score(flag: f32) -> f32 {
    if (0.0..=1.0).contains(&flag) {
        flag
    } else {
        sigmoid(flag)
    }
}
