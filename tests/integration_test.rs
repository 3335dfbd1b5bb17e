// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Integration tests for the segmental CoM library

use image::{DynamicImage, RgbImage};
use segmental_com::{
    ComError, LandmarkDetector, LandmarkStore, Result, SEGMENTS, SegmentClass, Speed, estimate,
    estimate_with_catalog, find_segment,
};

/// Detector that returns a fixed answer and counts its calls.
struct FakeDetector {
    landmarks: Option<LandmarkStore>,
    calls: usize,
}

impl FakeDetector {
    fn new(landmarks: Option<LandmarkStore>) -> Self {
        Self { landmarks, calls: 0 }
    }
}

impl LandmarkDetector for FakeDetector {
    fn detect(&mut self, _image: &DynamicImage) -> Result<Option<LandmarkStore>> {
        self.calls += 1;
        Ok(self.landmarks.clone())
    }

    fn last_speed(&self) -> Speed {
        Speed::new(1.0, 2.0, 3.0)
    }
}

/// Detector that always fails.
struct BrokenDetector;

impl LandmarkDetector for BrokenDetector {
    fn detect(&mut self, _image: &DynamicImage) -> Result<Option<LandmarkStore>> {
        Err(ComError::InferenceError("session lost".to_string()))
    }
}

fn test_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::new(640, 480))
}

/// All 33 landmarks on a plausible standing pose.
#[allow(clippy::cast_precision_loss)]
fn full_store() -> LandmarkStore {
    (0..33_usize)
        .map(|i| (i, 0.3 + 0.4 * (i % 2) as f32, 0.1 + 0.025 * i as f32))
        .collect()
}

#[test]
fn test_full_pose_yields_every_segment_in_order() {
    let mut detector = FakeDetector::new(Some(full_store()));
    let results = estimate(&mut detector, &test_image(), "pose.jpg".to_string()).unwrap();

    assert_eq!(detector.calls, 1);
    assert!(results.has_person());
    assert_eq!(results.len(), SEGMENTS.len());
    assert_eq!(results.orig_shape(), (480, 640));
    assert_eq!(results.verbose(), "33 landmarks, 14 segments");

    for (com, segment) in results.coms.iter().zip(&SEGMENTS) {
        assert_eq!(com.name, segment.name);
        assert_eq!(com.class, segment.class);
    }
}

#[test]
fn test_no_person_gives_empty_results() {
    let mut detector = FakeDetector::new(None);
    let results = estimate(&mut detector, &test_image(), "empty.jpg".to_string()).unwrap();

    assert!(!results.has_person());
    assert!(results.is_empty());
    assert_eq!(results.verbose(), "(no person detected)");
    assert!((results.speed.total() - 6.0).abs() < 1e-9);
}

#[test]
fn test_empty_landmark_set_is_no_person() {
    let mut detector = FakeDetector::new(Some(LandmarkStore::new()));
    let results = estimate(&mut detector, &test_image(), "blank.jpg".to_string()).unwrap();

    assert!(!results.has_person());
    assert!(results.is_empty());
    assert_eq!(results.verbose(), "(no person detected)");
}

#[test]
fn test_missing_landmark_aborts_estimation() {
    let mut store = LandmarkStore::new();
    for (index, x, y) in [(24, 0.5, 0.6), (26, 0.5, 0.8)] {
        store.put(index, x, y);
    }
    let mut detector = FakeDetector::new(Some(store));

    let err = estimate(&mut detector, &test_image(), "partial.jpg".to_string()).unwrap_err();
    assert!(matches!(err, ComError::LandmarkNotFound(23)));
    assert_eq!(err.to_string(), "Landmark not found: index 23");
}

#[test]
fn test_detector_errors_propagate() {
    let err = estimate(&mut BrokenDetector, &test_image(), "x.jpg".to_string()).unwrap_err();
    assert!(matches!(err, ComError::InferenceError(_)));
}

#[test]
fn test_left_thigh_from_partial_store() {
    let store: LandmarkStore = [(24, 0.5, 0.6), (26, 0.5, 0.8)].into_iter().collect();
    let mut detector = FakeDetector::new(Some(store));
    let catalog = [*find_segment("Left Thigh").unwrap()];

    let results =
        estimate_with_catalog(&mut detector, &test_image(), "thigh.jpg".to_string(), &catalog)
            .unwrap();
    let com = results.get("Left Thigh").unwrap();
    assert!((com.x - 0.5).abs() < 1e-6);
    assert!((com.y - 0.6866).abs() < 1e-5);
    assert_eq!(com.to_pixel(640, 480), (320, 330));
}

#[test]
fn test_left_foot_and_shoulders_midpoints() {
    let store: LandmarkStore = [(28, 0.4, 0.9), (32, 0.6, 0.95), (11, 0.3, 0.2), (12, 0.7, 0.2)]
        .into_iter()
        .collect();
    let mut detector = FakeDetector::new(Some(store));
    let catalog = [
        *find_segment("Left Foot").unwrap(),
        *find_segment("Shoulders").unwrap(),
    ];

    let results =
        estimate_with_catalog(&mut detector, &test_image(), "mid.jpg".to_string(), &catalog)
            .unwrap();

    let foot = results.get("Left Foot").unwrap();
    assert!((foot.x - 0.5).abs() < 1e-6);
    assert!((foot.y - 0.925).abs() < 1e-6);
    assert_eq!(foot.class, SegmentClass::Foot);

    let shoulders = results.get("Shoulders").unwrap();
    assert!((shoulders.x - 0.5).abs() < 1e-6);
    assert!((shoulders.y - 0.2).abs() < 1e-6);
}

#[test]
fn test_estimation_is_deterministic() {
    let mut detector = FakeDetector::new(Some(full_store()));
    let first = estimate(&mut detector, &test_image(), "a.jpg".to_string()).unwrap();
    let second = estimate(&mut detector, &test_image(), "a.jpg".to_string()).unwrap();

    assert_eq!(first.coms, second.coms);
    assert_eq!(detector.calls, 2);
}
