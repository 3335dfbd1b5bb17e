// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Anatomical segment catalog.
//!
//! Each segment is bounded by a proximal and a distal BlazePose landmark and belongs to a
//! [`SegmentClass`] that selects its CoM formula. The left thigh spans landmarks 24 and 26.

use std::fmt;

use crate::com;
use crate::error::Result;
use crate::landmarks::LandmarkStore;
use crate::results::SegmentCom;

/// Signature shared by every CoM formula: `(x_p, x_d, y_p, y_d) -> (x, y)`.
pub type ComFormula = fn(f32, f32, f32, f32) -> (f32, f32);

/// Segment types, each bound to one CoM formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentClass {
    /// Hip to knee.
    Thigh,
    /// Shoulder to elbow.
    UpperArm,
    /// Elbow to wrist.
    ForeArm,
    /// Knee to ankle.
    Leg,
    /// Ankle to foot index.
    Foot,
    /// Wrist to index knuckle.
    Hand,
    /// Left and right shoulders.
    ShoulderPair,
    /// Left and right hips.
    HipPair,
}

impl SegmentClass {
    /// All segment classes in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Thigh,
        Self::UpperArm,
        Self::ForeArm,
        Self::Leg,
        Self::Foot,
        Self::Hand,
        Self::ShoulderPair,
        Self::HipPair,
    ];

    /// Proximal weighting ratio, or `None` for classes that use the midpoint.
    #[must_use]
    pub const fn ratio(self) -> Option<f32> {
        match self {
            Self::Thigh => Some(com::THIGH_RATIO),
            Self::UpperArm => Some(com::UPPER_ARM_RATIO),
            Self::ForeArm => Some(com::FORE_ARM_RATIO),
            Self::Leg => Some(com::LEG_RATIO),
            Self::Hand => Some(com::HAND_RATIO),
            Self::Foot | Self::ShoulderPair | Self::HipPair => None,
        }
    }

    /// CoM formula for this class.
    #[must_use]
    pub fn formula(self) -> ComFormula {
        match self {
            Self::Thigh => com::thigh_com,
            Self::UpperArm => com::upper_arm_com,
            Self::ForeArm => com::fore_arm_com,
            Self::Leg => com::leg_com,
            Self::Foot => com::foot_com,
            Self::Hand => com::hand_com,
            Self::ShoulderPair => com::shoulder_com,
            Self::HipPair => com::hip_com,
        }
    }

    /// Apply this class's formula to a proximal and a distal point.
    #[must_use]
    pub fn center_of_mass(self, proximal: (f32, f32), distal: (f32, f32)) -> (f32, f32) {
        (self.formula())(proximal.0, distal.0, proximal.1, distal.1)
    }
}

impl fmt::Display for SegmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Thigh => "thigh",
            Self::UpperArm => "upper arm",
            Self::ForeArm => "fore arm",
            Self::Leg => "leg",
            Self::Foot => "foot",
            Self::Hand => "hand",
            Self::ShoulderPair => "shoulders",
            Self::HipPair => "hips",
        };
        f.write_str(name)
    }
}

/// A named body segment between two landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Display name.
    pub name: &'static str,
    /// Landmark index nearer the trunk.
    pub proximal: usize,
    /// Landmark index farther from the trunk.
    pub distal: usize,
    /// Formula selector.
    pub class: SegmentClass,
}

impl Segment {
    /// Create a segment definition.
    #[must_use]
    pub const fn new(
        name: &'static str,
        proximal: usize,
        distal: usize,
        class: SegmentClass,
    ) -> Self {
        Self {
            name,
            proximal,
            distal,
            class,
        }
    }

    /// Compute this segment's CoM from a landmark store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ComError::LandmarkNotFound`] if either joint is missing.
    pub fn center_of_mass(&self, store: &LandmarkStore) -> Result<SegmentCom> {
        let proximal = store.get(self.proximal)?;
        let distal = store.get(self.distal)?;
        let (x, y) = self.class.center_of_mass(proximal, distal);
        Ok(SegmentCom::new(self.name, self.class, x, y))
    }
}

/// Every segment the estimator reports, grouped by class.
pub const SEGMENTS: [Segment; 14] = [
    Segment::new("Left Thigh", 24, 26, SegmentClass::Thigh),
    Segment::new("Right Thigh", 23, 25, SegmentClass::Thigh),
    Segment::new("Left Upper Arm", 12, 14, SegmentClass::UpperArm),
    Segment::new("Right Upper Arm", 11, 13, SegmentClass::UpperArm),
    Segment::new("Left Fore Arm", 14, 16, SegmentClass::ForeArm),
    Segment::new("Right Fore Arm", 13, 15, SegmentClass::ForeArm),
    Segment::new("Left Leg", 26, 28, SegmentClass::Leg),
    Segment::new("Right Leg", 25, 27, SegmentClass::Leg),
    Segment::new("Left Foot", 28, 32, SegmentClass::Foot),
    Segment::new("Right Foot", 27, 31, SegmentClass::Foot),
    Segment::new("Left Hand", 16, 20, SegmentClass::Hand),
    Segment::new("Right Hand", 15, 19, SegmentClass::Hand),
    Segment::new("Shoulders", 11, 12, SegmentClass::ShoulderPair),
    Segment::new("Hips", 23, 24, SegmentClass::HipPair),
];

/// Look up a catalog segment by name.
#[must_use]
pub fn find_segment(name: &str) -> Option<&'static Segment> {
    let catalog: &'static [Segment] = &SEGMENTS;
    catalog.iter().find(|segment| segment.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::LANDMARK_COUNT;

    #[test]
    fn test_catalog_joint_pairs() {
        let pairs: Vec<(usize, usize)> = SEGMENTS.iter().map(|s| (s.proximal, s.distal)).collect();
        assert_eq!(
            pairs,
            vec![
                (24, 26),
                (23, 25),
                (12, 14),
                (11, 13),
                (14, 16),
                (13, 15),
                (26, 28),
                (25, 27),
                (28, 32),
                (27, 31),
                (16, 20),
                (15, 19),
                (11, 12),
                (23, 24),
            ]
        );
    }

    #[test]
    fn test_catalog_indices_in_topology() {
        for segment in &SEGMENTS {
            assert!(segment.proximal < LANDMARK_COUNT, "{}", segment.name);
            assert!(segment.distal < LANDMARK_COUNT, "{}", segment.name);
            assert_ne!(segment.proximal, segment.distal, "{}", segment.name);
        }
    }

    #[test]
    fn test_catalog_names_unique() {
        for (i, a) in SEGMENTS.iter().enumerate() {
            for b in &SEGMENTS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_every_class_in_catalog() {
        for class in SegmentClass::ALL {
            assert!(SEGMENTS.iter().any(|s| s.class == class), "{class} missing");
        }
    }

    #[test]
    fn test_class_ratios() {
        assert_eq!(SegmentClass::Thigh.ratio(), Some(0.433));
        assert_eq!(SegmentClass::UpperArm.ratio(), Some(0.436));
        assert_eq!(SegmentClass::ForeArm.ratio(), Some(0.430));
        assert_eq!(SegmentClass::Leg.ratio(), Some(0.433));
        assert_eq!(SegmentClass::Hand.ratio(), Some(0.506));
        assert_eq!(SegmentClass::Foot.ratio(), None);
        assert_eq!(SegmentClass::ShoulderPair.ratio(), None);
        assert_eq!(SegmentClass::HipPair.ratio(), None);
    }

    #[test]
    fn test_formula_matches_ratio() {
        let (p, d) = ((0.2, 0.1), (0.7, 0.9));
        for class in SegmentClass::ALL {
            let (x, y) = class.center_of_mass(p, d);
            let (ex, ey) = match class.ratio() {
                Some(k) => com::weighted_com(k, p.0, d.0, p.1, d.1),
                None => com::midpoint(p.0, d.0, p.1, d.1),
            };
            assert_eq!((x, y), (ex, ey), "{class}");
        }
    }

    #[test]
    fn test_find_segment() {
        let thigh = find_segment("Left Thigh").unwrap();
        assert_eq!((thigh.proximal, thigh.distal), (24, 26));
        assert!(find_segment("Trunk").is_none());
    }

    #[test]
    fn test_segment_missing_distal() {
        let store: LandmarkStore = [(24, 0.5, 0.6)].into_iter().collect();
        let err = find_segment("Left Thigh")
            .unwrap()
            .center_of_mass(&store)
            .unwrap_err();
        assert!(matches!(err, crate::ComError::LandmarkNotFound(26)));
    }
}
