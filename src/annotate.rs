// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Drawing landmarks, skeleton and segment CoMs onto images.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use ab_glyph::{FontRef, PxScale};
use image::{DynamicImage, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_text_mut};

use crate::landmarks::LandmarkStore;
use crate::results::Results;
use crate::visualizer::Color;
use crate::visualizer::skeleton::{CONNECTION_COLOR_INDICES, POSE_CONNECTIONS};

/// Assets URL for downloading fonts
const ASSETS_URL: &str = "https://github.com/ultralytics/assets/releases/download/v0.0.0";

/// Default label font.
pub const DEFAULT_FONT: &str = "Arial.ttf";

/// Radius of the landmark dots, in pixels.
pub const LANDMARK_RADIUS: i32 = 5;

/// Radius of the filled CoM marker, in pixels.
pub const COM_RADIUS: i32 = 6;

/// Check if font exists locally or download it
pub fn check_font(font: &str) -> Option<PathBuf> {
    let font_name = Path::new(font).file_name()?.to_string_lossy();
    let config_dir = dirs::config_dir()?.join("segmental-com");
    let font_path = config_dir.join(font_name.as_ref());

    if font_path.exists() {
        return Some(font_path);
    }

    if let Err(e) = fs::create_dir_all(&config_dir) {
        crate::warn!("Failed to create config directory: {e}");
        return None;
    }

    let url = format!("{ASSETS_URL}/{font_name}");
    crate::info!("Downloading {url} to {}", font_path.display());

    match ureq::get(&url).call() {
        Ok(response) => {
            let mut file = match File::create(&font_path) {
                Ok(f) => f,
                Err(e) => {
                    crate::warn!("Failed to create font file: {e}");
                    return None;
                }
            };

            let mut reader = response.into_body().into_reader();
            if let Err(e) = io::copy(&mut reader, &mut file) {
                crate::warn!("Failed to download font: {e}");
                let _ = fs::remove_file(&font_path);
                return None;
            }

            Some(font_path)
        }
        Err(e) => {
            crate::warn!("Failed to download font from {url}: {e}");
            None
        }
    }
}

/// Read the bytes of a font, downloading it on first use.
///
/// Parse the returned bytes with [`FontRef::try_from_slice`].
#[must_use]
pub fn load_font_data(font: &str) -> Option<Vec<u8>> {
    fs::read(check_font(font)?).ok()
}

/// Annotate an image with the pose skeleton, landmarks and segment CoMs.
///
/// Landmarks are drawn as blue dots joined by the BlazePose skeleton; each segment CoM
/// gets a white-ringed marker colored by segment class. Segment names are written next
/// to their markers when `font` is given.
#[must_use]
pub fn annotate_image(image: &DynamicImage, result: &Results, font: Option<&FontRef>) -> DynamicImage {
    let mut img = image.to_rgb8();
    let (width, height) = img.dimensions();
    #[allow(clippy::cast_possible_wrap)]
    let (max_x, max_y) = (width as i32, height as i32);

    if let Some(landmarks) = &result.landmarks {
        draw_skeleton(&mut img, landmarks);
    }

    for com in &result.coms {
        let center = com.to_pixel(width, height);
        let color = Color::for_segment_class(com.class as usize);

        draw_filled_circle_mut(&mut img, center, COM_RADIUS + 2, Color::WHITE.to_rgb());
        draw_filled_circle_mut(&mut img, center, COM_RADIUS, color.to_rgb());

        if let Some(f) = font {
            let scale = PxScale::from(14.0);
            let text_x = center.0 + COM_RADIUS + 4;
            let text_y = center.1 - 7;
            if text_x >= 0 && text_y >= 0 && text_x < max_x && text_y < max_y {
                draw_text_mut(&mut img, Color::WHITE.to_rgb(), text_x, text_y, scale, f, com.name);
            }
        }
    }

    DynamicImage::ImageRgb8(img)
}

/// Draw skeleton connections, then a dot on every landmark.
fn draw_skeleton(img: &mut RgbImage, landmarks: &LandmarkStore) {
    let (width, height) = img.dimensions();

    for ([a, b], &color_index) in POSE_CONNECTIONS.iter().zip(&CONNECTION_COLOR_INDICES) {
        let (Ok(start), Ok(end)) = (landmarks.get(*a), landmarks.get(*b)) else {
            continue;
        };
        let start = to_pixel_f32(start, width, height);
        let end = to_pixel_f32(end, width, height);
        let color = Color::from_pose_index(color_index).to_rgb();

        // Two passes one pixel apart for a thicker line.
        draw_line_segment_mut(img, start, end, color);
        draw_line_segment_mut(img, (start.0 + 1.0, start.1), (end.0 + 1.0, end.1), color);
    }

    for (_, landmark) in landmarks.iter() {
        let (x, y) = to_pixel_f32(landmark.xy(), width, height);
        #[allow(clippy::cast_possible_truncation)]
        let center = (x.round() as i32, y.round() as i32);
        draw_filled_circle_mut(img, center, LANDMARK_RADIUS, Color::BLUE.to_rgb());
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_pixel_f32((x, y): (f32, f32), width: u32, height: u32) -> (f32, f32) {
    (x * width as f32, y * height as f32)
}
