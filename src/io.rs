// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Image loading and result saving.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageBuffer};

use crate::error::{ComError, Result};

/// Load an image from disk.
///
/// JPEG files are decoded with `jpeg-decoder` first to bypass zune-jpeg stride issues;
/// anything else, or any JPEG that path fails on, goes through [`image::open`].
///
/// # Errors
///
/// Returns [`ComError::ImageError`] if the file can't be read or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    if matches!(ext.as_deref(), Some("jpg" | "jpeg"))
        && let Some(image) = decode_jpeg(path)
    {
        return Ok(image);
    }

    image::open(path)
        .map_err(|e| ComError::ImageError(format!("Failed to load image {}: {e}", path.display())))
}

/// JPEG fast path. Returns `None` on any failure so the caller can fall back.
fn decode_jpeg(path: &Path) -> Option<DynamicImage> {
    let file = File::open(path).ok()?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder.decode().ok()?;
    let info = decoder.info()?;
    let (width, height) = (u32::from(info.width), u32::from(info.height));

    match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => {
            ImageBuffer::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
        }
        jpeg_decoder::PixelFormat::L8 => {
            ImageBuffer::from_raw(width, height, pixels).map(DynamicImage::ImageLuma8)
        }
        _ => None,
    }
}

/// Find the next available run directory (predict, predict2, predict3, etc.)
#[must_use]
pub fn find_next_run_dir<P: AsRef<Path>>(base: P, prefix: &str) -> PathBuf {
    let base_path = base.as_ref();

    let first = base_path.join(prefix);
    if !first.exists() {
        return first;
    }

    (2..)
        .map(|i| base_path.join(format!("{prefix}{i}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Save an annotated image under `save_dir`, keeping the source file name.
///
/// # Arguments
///
/// * `save_dir` - Output directory, created if missing.
/// * `source` - Path of the source image; its file name is reused.
/// * `annotated` - The annotated image to write.
///
/// # Returns
///
/// The path the image was written to.
///
/// # Errors
///
/// Returns an error if the directory can't be created or the image can't be encoded.
pub fn save_annotated<P: AsRef<Path>>(
    save_dir: P,
    source: &str,
    annotated: &DynamicImage,
) -> Result<PathBuf> {
    let save_dir = save_dir.as_ref();
    fs::create_dir_all(save_dir).map_err(|e| {
        ComError::IoError(format!("Failed to create directory {}: {e}", save_dir.display()))
    })?;

    let filename = Path::new(source)
        .file_name()
        .map_or_else(|| "image.jpg".to_string(), |name| name.to_string_lossy().to_string());
    let save_path = save_dir.join(filename);

    annotated
        .save(&save_path)
        .map_err(|e| ComError::ImageError(format!("Failed to save {}: {e}", save_path.display())))?;

    Ok(save_path)
}
