// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Segment center-of-mass formulas.
//!
//! Proportionality constants follow the anthropometric tables in Winter (2005),
//! *Biomechanics and Motor Control of Human Movement*. Every function takes the
//! proximal and distal coordinates as `(x_p, x_d, y_p, y_d)` and returns `(x, y)`.
//!
//! The weighted form adds the offset along x but subtracts it along y:
//!
//! ```text
//! x = x_p + k * (x_d - x_p)
//! y = y_p - k * (y_p - y_d)
//! ```
//!
//! The y term must stay in this subtractive shape to reproduce reference outputs.

/// CoM location of the thigh as a fraction of its length from the hip.
pub const THIGH_RATIO: f32 = 0.433;
/// CoM location of the upper arm from the shoulder.
pub const UPPER_ARM_RATIO: f32 = 0.436;
/// CoM location of the forearm from the elbow.
pub const FORE_ARM_RATIO: f32 = 0.430;
/// CoM location of the leg from the knee.
pub const LEG_RATIO: f32 = 0.433;
/// CoM location of the hand from the wrist.
pub const HAND_RATIO: f32 = 0.506;

/// Proximal-weighted interpolation with ratio `k`.
#[must_use]
#[inline]
pub fn weighted_com(k: f32, x_p: f32, x_d: f32, y_p: f32, y_d: f32) -> (f32, f32) {
    (x_p + k * (x_d - x_p), y_p - k * (y_p - y_d))
}

/// Arithmetic midpoint of two joints.
#[must_use]
#[inline]
pub fn midpoint(x_a: f32, x_b: f32, y_a: f32, y_b: f32) -> (f32, f32) {
    ((x_a + x_b) * 0.5, (y_a + y_b) * 0.5)
}

/// Thigh CoM, greater trochanter to femoral condyles.
#[must_use]
pub fn thigh_com(x_p: f32, x_d: f32, y_p: f32, y_d: f32) -> (f32, f32) {
    weighted_com(THIGH_RATIO, x_p, x_d, y_p, y_d)
}

/// Upper arm CoM, glenohumeral joint to elbow axis.
#[must_use]
pub fn upper_arm_com(x_p: f32, x_d: f32, y_p: f32, y_d: f32) -> (f32, f32) {
    weighted_com(UPPER_ARM_RATIO, x_p, x_d, y_p, y_d)
}

/// Forearm CoM, elbow axis to wrist.
#[must_use]
pub fn fore_arm_com(x_p: f32, x_d: f32, y_p: f32, y_d: f32) -> (f32, f32) {
    weighted_com(FORE_ARM_RATIO, x_p, x_d, y_p, y_d)
}

/// Leg CoM, femoral condyles to medial malleolus.
#[must_use]
pub fn leg_com(x_p: f32, x_d: f32, y_p: f32, y_d: f32) -> (f32, f32) {
    weighted_com(LEG_RATIO, x_p, x_d, y_p, y_d)
}

/// Hand CoM, wrist to index knuckle.
#[must_use]
pub fn hand_com(x_p: f32, x_d: f32, y_p: f32, y_d: f32) -> (f32, f32) {
    weighted_com(HAND_RATIO, x_p, x_d, y_p, y_d)
}

/// Foot reference point, ankle to foot index.
#[must_use]
pub fn foot_com(x_p: f32, x_d: f32, y_p: f32, y_d: f32) -> (f32, f32) {
    midpoint(x_p, x_d, y_p, y_d)
}

/// Shoulder girdle reference point.
#[must_use]
pub fn shoulder_com(x_a: f32, x_b: f32, y_a: f32, y_b: f32) -> (f32, f32) {
    midpoint(x_a, x_b, y_a, y_b)
}

/// Pelvis reference point.
#[must_use]
pub fn hip_com(x_a: f32, x_b: f32, y_a: f32, y_b: f32) -> (f32, f32) {
    midpoint(x_a, x_b, y_a, y_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    type ComFn = fn(f32, f32, f32, f32) -> (f32, f32);

    const WEIGHTED: [(&str, ComFn); 5] = [
        ("thigh", thigh_com),
        ("upper_arm", upper_arm_com),
        ("fore_arm", fore_arm_com),
        ("leg", leg_com),
        ("hand", hand_com),
    ];

    const MIDPOINT: [(&str, ComFn); 3] = [
        ("foot", foot_com),
        ("shoulder", shoulder_com),
        ("hip", hip_com),
    ];

    const SAMPLES: [(f32, f32, f32, f32); 5] = [
        (0.5, 0.5, 0.6, 0.8),
        (0.2, 0.7, 0.1, 0.9),
        (0.9, 0.1, 0.3, 0.35),
        (0.4, 0.6, 0.9, 0.95),
        (0.0, 1.0, 1.0, 0.0),
    ];

    #[test]
    fn test_weighted_x_between_joints() {
        for (name, f) in WEIGHTED {
            for (x_p, x_d, y_p, y_d) in SAMPLES {
                if (x_p - x_d).abs() < f32::EPSILON {
                    continue;
                }
                let (x, _) = f(x_p, x_d, y_p, y_d);
                let (lo, hi) = (x_p.min(x_d), x_p.max(x_d));
                assert!(x > lo && x < hi, "{name}: {x} not in ({lo}, {hi})");
            }
        }
    }

    #[test]
    fn test_midpoint_symmetry() {
        for (name, f) in MIDPOINT {
            for (x_a, x_b, y_a, y_b) in SAMPLES {
                let forward = f(x_a, x_b, y_a, y_b);
                let swapped = f(x_b, x_a, y_b, y_a);
                assert_eq!(forward, swapped, "{name}");
                assert_eq!(forward, ((x_a + x_b) * 0.5, (y_a + y_b) * 0.5), "{name}");
            }
        }
    }

    #[test]
    fn test_weighted_asymmetry() {
        for (name, f) in WEIGHTED {
            let forward = f(0.2, 0.7, 0.1, 0.9);
            let swapped = f(0.7, 0.2, 0.9, 0.1);
            assert_ne!(forward, swapped, "{name} behaves like a midpoint");
        }
    }

    #[test]
    fn test_idempotent() {
        for (_, f) in WEIGHTED.iter().chain(MIDPOINT.iter()) {
            for (x_p, x_d, y_p, y_d) in SAMPLES {
                assert_eq!(f(x_p, x_d, y_p, y_d), f(x_p, x_d, y_p, y_d));
            }
        }
    }

    #[test]
    fn test_thigh_reference_value() {
        let (x, y) = thigh_com(0.5, 0.5, 0.6, 0.8);
        assert!((x - 0.5).abs() < 1e-6);
        assert!((y - 0.6866).abs() < 1e-5);
    }

    #[test]
    fn test_y_offset_follows_distal_joint() {
        // Distal joint above the proximal one: the CoM moves up the image.
        let (_, y) = upper_arm_com(0.5, 0.5, 0.8, 0.4);
        assert!((y - (0.8 - 0.436 * 0.4)).abs() < 1e-5);
    }

    #[test]
    fn test_no_clamping() {
        let (x, y) = hand_com(-0.5, 1.5, 2.0, -1.0);
        assert!((x - (-0.5 + 0.506 * 2.0)).abs() < 1e-5);
        assert!((y - (2.0 - 0.506 * 3.0)).abs() < 1e-5);
    }
}
