// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose detector abstraction.

use image::DynamicImage;

use crate::error::Result;
use crate::landmarks::LandmarkStore;
use crate::results::Speed;

/// Anything that turns an RGB image into normalized joint landmarks.
///
/// Implementations return `Ok(None)` when no person is in frame; that is an expected
/// outcome, not an error.
pub trait LandmarkDetector {
    /// Detect the landmarks of a single person.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector fails to run on the image.
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<LandmarkStore>>;

    /// Stage timings of the most recent [`detect`](Self::detect) call.
    fn last_speed(&self) -> Speed {
        Speed::default()
    }
}

impl<D: LandmarkDetector + ?Sized> LandmarkDetector for &mut D {
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<LandmarkStore>> {
        (**self).detect(image)
    }

    fn last_speed(&self) -> Speed {
        (**self).last_speed()
    }
}
