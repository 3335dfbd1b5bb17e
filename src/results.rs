// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Result types for segmental CoM estimation.

use crate::landmarks::LandmarkStore;
use crate::segment::SegmentClass;
use crate::utils::pluralize;

/// Timing information for one image (in milliseconds).
#[derive(Debug, Clone, Default)]
pub struct Speed {
    /// Time spent on preprocessing.
    pub preprocess: Option<f64>,
    /// Time spent on model inference.
    pub inference: Option<f64>,
    /// Time spent decoding landmarks and computing segment CoMs.
    pub postprocess: Option<f64>,
}

impl Speed {
    /// Create a new Speed instance with all timings.
    ///
    /// # Arguments
    ///
    /// * `preprocess` - Time in milliseconds.
    /// * `inference` - Time in milliseconds.
    /// * `postprocess` - Time in milliseconds.
    #[must_use]
    pub const fn new(preprocess: f64, inference: f64, postprocess: f64) -> Self {
        Self {
            preprocess: Some(preprocess),
            inference: Some(inference),
            postprocess: Some(postprocess),
        }
    }

    /// Sum of preprocess, inference, and postprocess times in milliseconds.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.preprocess.unwrap_or(0.0)
            + self.inference.unwrap_or(0.0)
            + self.postprocess.unwrap_or(0.0)
    }
}

/// Center of mass of one segment in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentCom {
    /// Segment name from the catalog.
    pub name: &'static str,
    /// Segment class that produced this estimate.
    pub class: SegmentClass,
    /// Horizontal position as a fraction of image width.
    pub x: f32,
    /// Vertical position as a fraction of image height.
    pub y: f32,
}

impl SegmentCom {
    /// Create a new CoM result.
    #[must_use]
    pub const fn new(name: &'static str, class: SegmentClass, x: f32, y: f32) -> Self {
        Self { name, class, x, y }
    }

    /// Pixel position in an image of the given size, rounded to the nearest pixel.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn to_pixel(&self, width: u32, height: u32) -> (i32, i32) {
        (
            (self.x * width as f32).round() as i32,
            (self.y * height as f32).round() as i32,
        )
    }
}

/// Everything estimated for a single image.
#[derive(Debug, Clone)]
pub struct Results {
    /// Path to the source image.
    pub path: String,
    /// Original image shape (height, width).
    pub orig_shape: (u32, u32),
    /// Detected landmarks, `None` when no person was found.
    pub landmarks: Option<LandmarkStore>,
    /// Per-segment CoMs in catalog order; empty when no person was found.
    pub coms: Vec<SegmentCom>,
    /// Timing information.
    pub speed: Speed,
}

impl Results {
    /// Create a new Results instance with no detections.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the source image.
    /// * `orig_shape` - Original image shape (height, width).
    /// * `speed` - Timing information.
    #[must_use]
    pub const fn new(path: String, orig_shape: (u32, u32), speed: Speed) -> Self {
        Self {
            path,
            orig_shape,
            landmarks: None,
            coms: Vec::new(),
            speed,
        }
    }

    /// Number of segment CoMs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.coms.len()
    }

    /// Check if no segment CoMs were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coms.is_empty()
    }

    /// Whether the detector found a person.
    #[must_use]
    pub const fn has_person(&self) -> bool {
        self.landmarks.is_some()
    }

    /// Get the original image shape.
    #[must_use]
    pub const fn orig_shape(&self) -> (u32, u32) {
        self.orig_shape
    }

    /// Look up a segment CoM by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SegmentCom> {
        self.coms.iter().find(|com| com.name == name)
    }

    /// Pixel positions of every segment CoM in the original image.
    #[must_use]
    pub fn pixel_coms(&self) -> Vec<(&'static str, (i32, i32))> {
        let (height, width) = self.orig_shape;
        self.coms
            .iter()
            .map(|com| (com.name, com.to_pixel(width, height)))
            .collect()
    }

    /// One-line summary, e.g. "33 landmarks, 14 segments".
    #[must_use]
    pub fn verbose(&self) -> String {
        match &self.landmarks {
            None => "(no person detected)".to_string(),
            Some(store) => format!(
                "{}, {}",
                pluralize(store.len(), "landmark"),
                pluralize(self.coms.len(), "segment")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed() {
        let speed = Speed::new(10.0, 20.0, 5.0);
        assert!((speed.total() - 35.0).abs() < 1e-6);
        assert!(Speed::default().total().abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_pixel_rounds() {
        let com = SegmentCom::new("Left Thigh", SegmentClass::Thigh, 0.5, 0.6866);
        assert_eq!(com.to_pixel(640, 480), (320, 330));

        let com = SegmentCom::new("Hips", SegmentClass::HipPair, 0.2549, 0.0);
        assert_eq!(com.to_pixel(100, 100), (25, 0));
    }

    #[test]
    fn test_results_verbose() {
        let mut results = Results::new("test.jpg".to_string(), (480, 640), Speed::default());
        assert!(results.is_empty());
        assert!(!results.has_person());
        assert_eq!(results.verbose(), "(no person detected)");

        let store: LandmarkStore = [(11, 0.3, 0.2), (12, 0.7, 0.2)].into_iter().collect();
        results.landmarks = Some(store);
        results
            .coms
            .push(SegmentCom::new("Shoulders", SegmentClass::ShoulderPair, 0.5, 0.2));
        assert_eq!(results.verbose(), "2 landmarks, 1 segment");
        assert_eq!(results.get("Shoulders").map(|c| c.x), Some(0.5));
        assert_eq!(results.pixel_coms(), vec![("Shoulders", (320, 96))]);
    }
}
