// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Segment CoM aggregation.
//!
//! Walks a segment catalog against one image's [`LandmarkStore`] and collects a
//! [`SegmentCom`] per segment. A missing joint aborts the whole pass so callers never see
//! a partial skeleton.

use std::time::Instant;

use image::{DynamicImage, GenericImageView};

use crate::detector::LandmarkDetector;
use crate::error::Result;
use crate::landmarks::LandmarkStore;
use crate::results::{Results, SegmentCom};
use crate::segment::{SEGMENTS, Segment};

/// Compute the CoM of every segment in `catalog`, in catalog order.
///
/// # Errors
///
/// Returns [`crate::ComError::LandmarkNotFound`] for the first segment whose joints are not
/// all in `store`.
pub fn compute_segment_coms(store: &LandmarkStore, catalog: &[Segment]) -> Result<Vec<SegmentCom>> {
    catalog
        .iter()
        .map(|segment| segment.center_of_mass(store))
        .collect()
}

/// Run a detector on an image and compute the CoM of every catalog segment.
///
/// When the detector finds nobody, the returned [`Results`] has no landmarks and no CoMs.
///
/// # Errors
///
/// Propagates detector failures and landmark lookup failures.
pub fn estimate<D: LandmarkDetector + ?Sized>(
    detector: &mut D,
    image: &DynamicImage,
    path: String,
) -> Result<Results> {
    estimate_with_catalog(detector, image, path, &SEGMENTS)
}

/// Like [`estimate`], but against a custom segment catalog.
///
/// # Errors
///
/// Propagates detector failures and landmark lookup failures.
pub fn estimate_with_catalog<D: LandmarkDetector + ?Sized>(
    detector: &mut D,
    image: &DynamicImage,
    path: String,
    catalog: &[Segment],
) -> Result<Results> {
    let (width, height) = image.dimensions();
    let landmarks = detector.detect(image)?;
    let mut speed = detector.last_speed();

    let mut results = Results::new(path, (height, width), speed.clone());
    let Some(store) = landmarks.filter(|store| !store.is_empty()) else {
        return Ok(results);
    };

    let start = Instant::now();
    let coms = compute_segment_coms(&store, catalog)?;
    let aggregate_time = start.elapsed().as_secs_f64() * 1000.0;
    speed.postprocess = Some(speed.postprocess.unwrap_or(0.0) + aggregate_time);

    results.landmarks = Some(store);
    results.coms = coms;
    results.speed = speed;
    Ok(results)
}
