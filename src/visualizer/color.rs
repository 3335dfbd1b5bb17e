// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

/// Color type for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Blue color.
    pub const BLUE: Self = Self(0, 0, 255);
    /// White color.
    pub const WHITE: Self = Self(255, 255, 255);

    /// Get a color from the pose palette by index.
    #[must_use]
    pub const fn from_pose_index(index: usize) -> Self {
        let color = POSE_COLORS[index % POSE_COLORS.len()];
        Self(color[0], color[1], color[2])
    }

    /// Marker color for a segment CoM, one per segment class.
    #[must_use]
    pub const fn for_segment_class(class_index: usize) -> Self {
        let color = COM_COLORS[class_index % COM_COLORS.len()];
        Self(color[0], color[1], color[2])
    }

    /// Convert to an `image` pixel.
    #[must_use]
    pub const fn to_rgb(self) -> image::Rgb<u8> {
        image::Rgb([self.0, self.1, self.2])
    }

    /// Pack as `0x00RRGGBB`, the framebuffer format `minifb` expects.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        ((self.0 as u32) << 16) | ((self.1 as u32) << 8) | self.2 as u32
    }
}

/// Pose Color Palette
pub const POSE_COLORS: [[u8; 3]; 20] = [
    [255, 128, 0],   // #ff8000
    [255, 153, 51],  // #ff9933
    [255, 178, 102], // #ffb266
    [230, 230, 0],   // #e6e600
    [255, 153, 255], // #ff99ff
    [153, 204, 255], // #99ccff
    [255, 102, 255], // #ff66ff
    [255, 51, 255],  // #ff33ff
    [102, 178, 255], // #66b2ff
    [51, 153, 255],  // #3399ff
    [255, 153, 153], // #ff9999
    [255, 102, 102], // #ff6666
    [255, 51, 51],   // #ff3333
    [153, 255, 153], // #99ff99
    [102, 255, 102], // #66ff66
    [51, 255, 51],   // #33ff33
    [0, 255, 0],     // #00ff00
    [0, 0, 255],     // #0000ff
    [255, 0, 0],     // #ff0000
    [255, 255, 255], // #ffffff
];

/// CoM marker palette, indexed by segment class
pub const COM_COLORS: [[u8; 3]; 8] = [
    [255, 68, 79],   // #ff444f thigh
    [4, 42, 255],    // #042aff upper arm
    [0, 223, 183],   // #00dfb7 fore arm
    [255, 111, 221], // #ff6fdd leg
    [204, 237, 0],   // #cced00 foot
    [189, 0, 255],   // #bd00ff hand
    [0, 180, 255],   // #00b4ff shoulders
    [252, 109, 47],  // #fc6d2f hips
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_wraps() {
        assert_eq!(Color::from_pose_index(0), Color::from_pose_index(POSE_COLORS.len()));
        assert_eq!(Color::from_pose_index(17), Color::BLUE);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Color(255, 0, 0).to_u32(), 0x00FF_0000);
        assert_eq!(Color(1, 2, 3).to_rgb(), image::Rgb([1, 2, 3]));
    }
}
