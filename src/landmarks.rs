// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Detected joint landmarks.
//!
//! A [`LandmarkStore`] holds one detection result: normalized image coordinates keyed by
//! BlazePose joint index. It is built once per image and only read afterwards.

use std::collections::BTreeMap;

use crate::error::{ComError, Result};

/// Number of joints in the BlazePose topology.
pub const LANDMARK_COUNT: usize = 33;

/// BlazePose joint names, indexed by landmark index.
pub const LANDMARK_NAMES: [&str; LANDMARK_COUNT] = [
    "nose",
    "left_eye_inner",
    "left_eye",
    "left_eye_outer",
    "right_eye_inner",
    "right_eye",
    "right_eye_outer",
    "left_ear",
    "right_ear",
    "mouth_left",
    "mouth_right",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_pinky",
    "right_pinky",
    "left_index",
    "right_index",
    "left_thumb",
    "right_thumb",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
    "left_heel",
    "right_heel",
    "left_foot_index",
    "right_foot_index",
];

/// Name of a BlazePose joint, or `None` outside the topology.
#[must_use]
pub fn landmark_name(index: usize) -> Option<&'static str> {
    LANDMARK_NAMES.get(index).copied()
}

/// A single detected joint in normalized image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Horizontal position as a fraction of image width.
    pub x: f32,
    /// Vertical position as a fraction of image height (y grows downward).
    pub y: f32,
    /// Detector visibility score, if the detector reports one.
    pub visibility: Option<f32>,
}

impl Landmark {
    /// Create a landmark without a visibility score.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            visibility: None,
        }
    }

    /// Attach a visibility score.
    #[must_use]
    pub const fn with_visibility(mut self, visibility: f32) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Coordinates as an `(x, y)` pair.
    #[must_use]
    pub const fn xy(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Joint index to landmark mapping for one image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkStore {
    landmarks: BTreeMap<usize, Landmark>,
}

impl LandmarkStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the coordinates of a joint.
    pub fn put(&mut self, index: usize, x: f32, y: f32) {
        self.insert(index, Landmark::new(x, y));
    }

    /// Insert or overwrite a full landmark, visibility included.
    pub fn insert(&mut self, index: usize, landmark: Landmark) {
        self.landmarks.insert(index, landmark);
    }

    /// Coordinates of a joint.
    ///
    /// # Errors
    ///
    /// Returns [`ComError::LandmarkNotFound`] if `index` was never populated.
    pub fn get(&self, index: usize) -> Result<(f32, f32)> {
        self.landmark(index).map(|lm| lm.xy())
    }

    /// Full landmark of a joint.
    ///
    /// # Errors
    ///
    /// Returns [`ComError::LandmarkNotFound`] if `index` was never populated.
    pub fn landmark(&self, index: usize) -> Result<&Landmark> {
        self.landmarks
            .get(&index)
            .ok_or(ComError::LandmarkNotFound(index))
    }

    /// Whether a joint is present.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.landmarks.contains_key(&index)
    }

    /// Number of stored joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// Check if the store holds no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Iterate joints in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Landmark)> {
        self.landmarks.iter().map(|(&index, lm)| (index, lm))
    }
}

impl FromIterator<(usize, f32, f32)> for LandmarkStore {
    fn from_iter<I: IntoIterator<Item = (usize, f32, f32)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (index, x, y) in iter {
            store.put(index, x, y);
        }
        store
    }
}

impl FromIterator<(usize, Landmark)> for LandmarkStore {
    fn from_iter<I: IntoIterator<Item = (usize, Landmark)>>(iter: I) -> Self {
        Self {
            landmarks: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut store = LandmarkStore::new();
        store.put(24, 0.5, 0.6);

        assert_eq!(store.get(24).unwrap(), (0.5, 0.6));
        assert_eq!(store.len(), 1);
        assert!(store.contains(24));
    }

    #[test]
    fn test_put_overwrites() {
        let mut store = LandmarkStore::new();
        store.put(11, 0.1, 0.2);
        store.put(11, 0.3, 0.4);

        assert_eq!(store.get(11).unwrap(), (0.3, 0.4));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_index_fails() {
        let store: LandmarkStore = [(0, 0.0, 0.0)].into_iter().collect();

        // Repeated lookups fail the same way and never fall back to (0, 0).
        for _ in 0..2 {
            match store.get(26) {
                Err(ComError::LandmarkNotFound(index)) => assert_eq!(index, 26),
                other => panic!("expected LandmarkNotFound, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_iter_is_index_ordered() {
        let store: LandmarkStore = [(26, 0.5, 0.8), (11, 0.3, 0.2), (24, 0.5, 0.6)]
            .into_iter()
            .collect();

        let indices: Vec<usize> = store.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![11, 24, 26]);
    }

    #[test]
    fn test_visibility_carried() {
        let mut store = LandmarkStore::new();
        store.insert(0, Landmark::new(0.5, 0.1).with_visibility(0.9));

        assert_eq!(store.landmark(0).unwrap().visibility, Some(0.9));
        assert_eq!(store.get(0).unwrap(), (0.5, 0.1));
    }

    #[test]
    fn test_landmark_names() {
        assert_eq!(landmark_name(0), Some("nose"));
        assert_eq!(landmark_name(24), Some("right_hip"));
        assert_eq!(landmark_name(32), Some("right_foot_index"));
        assert_eq!(landmark_name(33), None);
    }
}
