// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Image preprocessing for the pose landmark model.
//!
//! The image is letterboxed into the model's square input (aspect ratio kept, black
//! padding), normalized to [0, 1] and laid out as NHWC or NCHW depending on the model.

use image::{DynamicImage, GenericImageView, Rgb, RgbImage, imageops};
use ndarray::Array4;

/// Letterbox padding color (black).
pub const LETTERBOX_COLOR: [u8; 3] = [0, 0, 0];

/// Memory layout of the model input tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TensorLayout {
    /// (batch, height, width, channels), as exported from `TFLite`.
    Nhwc,
    /// (batch, channels, height, width).
    Nchw,
}

impl TensorLayout {
    /// Guess the layout from a 4-D input shape; a trailing 3 means channels-last.
    #[must_use]
    pub fn from_shape(shape: &[i64]) -> Option<Self> {
        match shape {
            [_, _, _, 3] => Some(Self::Nhwc),
            [_, 3, _, _] => Some(Self::Nchw),
            _ => None,
        }
    }

    /// Input (height, width) declared by a 4-D shape, if both are fixed.
    #[must_use]
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    pub fn spatial_size(self, shape: &[i64]) -> Option<(usize, usize)> {
        let (h, w) = match (self, shape) {
            (Self::Nhwc, [_, h, w, _]) | (Self::Nchw, [_, _, h, w]) => (*h, *w),
            _ => return None,
        };
        (h > 0 && w > 0).then_some((h as usize, w as usize))
    }
}

/// Result of preprocessing an image, containing the tensor and transform info.
#[derive(Debug, Clone)]
pub struct PreprocessResult {
    /// Preprocessed image tensor, normalized to [0, 1].
    pub tensor: Array4<f32>,
    /// Original image dimensions (height, width).
    pub orig_shape: (u32, u32),
    /// Scale factors applied (`scale_y`, `scale_x`).
    pub scale: (f32, f32),
    /// Padding applied (`pad_top`, `pad_left`).
    pub padding: (f32, f32),
}

/// Preprocess an image for the pose landmark model.
///
/// # Arguments
///
/// * `image` - Input image.
/// * `target_size` - Model input size as (height, width).
/// * `layout` - Tensor layout expected by the model.
#[must_use]
pub fn preprocess_image(
    image: &DynamicImage,
    target_size: (usize, usize),
    layout: TensorLayout,
) -> PreprocessResult {
    let (orig_width, orig_height) = image.dimensions();
    let (new_width, new_height, pad_left, pad_top, scale) =
        calculate_letterbox_params(orig_width, orig_height, target_size);

    let resized = imageops::resize(
        &image.to_rgb8(),
        new_width.max(1),
        new_height.max(1),
        imageops::FilterType::Triangle,
    );

    #[allow(clippy::cast_possible_truncation)]
    let mut canvas = RgbImage::from_pixel(
        target_size.1 as u32,
        target_size.0 as u32,
        Rgb(LETTERBOX_COLOR),
    );
    imageops::overlay(&mut canvas, &resized, i64::from(pad_left), i64::from(pad_top));

    let tensor = match layout {
        TensorLayout::Nhwc => image_to_tensor_nhwc(&canvas),
        TensorLayout::Nchw => image_to_tensor_nchw(&canvas),
    };

    PreprocessResult {
        tensor,
        orig_shape: (orig_height, orig_width),
        scale,
        #[allow(clippy::cast_precision_loss)]
        padding: (pad_top as f32, pad_left as f32),
    }
}

/// Calculate letterbox parameters for resizing.
///
/// Returns `(new_width, new_height, pad_left, pad_top, (scale_y, scale_x))`.
fn calculate_letterbox_params(
    orig_width: u32,
    orig_height: u32,
    target_size: (usize, usize),
) -> (u32, u32, u32, u32, (f32, f32)) {
    #[allow(clippy::cast_precision_loss)]
    let (target_h, target_w) = (target_size.0 as f32, target_size.1 as f32);
    #[allow(clippy::cast_precision_loss)]
    let (orig_h, orig_w) = (orig_height as f32, orig_width as f32);

    let scale = (target_h / orig_h).min(target_w / orig_w);

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let new_w = (orig_w * scale).round() as u32;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let new_h = (orig_h * scale).round() as u32;

    #[allow(clippy::cast_possible_truncation)]
    let pad_w = (target_size.1 as u32).saturating_sub(new_w);
    #[allow(clippy::cast_possible_truncation)]
    let pad_h = (target_size.0 as u32).saturating_sub(new_h);

    let pad_left = pad_w / 2;
    let pad_top = pad_h / 2;

    #[allow(clippy::cast_precision_loss)]
    let scale_x = new_w as f32 / orig_w;
    #[allow(clippy::cast_precision_loss)]
    let scale_y = new_h as f32 / orig_h;

    (new_w, new_h, pad_left, pad_top, (scale_y, scale_x))
}

/// Convert an RGB image to a normalized (1, H, W, 3) tensor.
fn image_to_tensor_nhwc(image: &RgbImage) -> Array4<f32> {
    let (width, height) = image.dimensions();
    Array4::from_shape_fn((1, height as usize, width as usize, 3), |(_, y, x, c)| {
        #[allow(clippy::cast_possible_truncation)]
        let pixel = image.get_pixel(x as u32, y as u32);
        f32::from(pixel[c]) / 255.0
    })
}

/// Convert an RGB image to a normalized (1, 3, H, W) tensor.
fn image_to_tensor_nchw(image: &RgbImage) -> Array4<f32> {
    let (width, height) = image.dimensions();
    Array4::from_shape_fn((1, 3, height as usize, width as usize), |(_, c, y, x)| {
        #[allow(clippy::cast_possible_truncation)]
        let pixel = image.get_pixel(x as u32, y as u32);
        f32::from(pixel[c]) / 255.0
    })
}

/// Map a point from model input space back to original image pixels.
///
/// # Arguments
///
/// * `x`, `y` - Point in model space (after letterbox).
/// * `scale` - Scale factors (`scale_y`, `scale_x`) from preprocessing.
/// * `padding` - Padding (`pad_top`, `pad_left`) from preprocessing.
#[must_use]
pub fn scale_point(x: f32, y: f32, scale: (f32, f32), padding: (f32, f32)) -> (f32, f32) {
    let (scale_y, scale_x) = scale;
    let (pad_top, pad_left) = padding;
    ((x - pad_left) / scale_x, (y - pad_top) / scale_y)
}
