// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::process;

#[cfg(feature = "annotate")]
use ab_glyph::FontRef;
use image::GenericImageView;

#[cfg(feature = "annotate")]
use crate::annotate::{DEFAULT_FONT, annotate_image, load_font_data};
#[cfg(feature = "annotate")]
use crate::io::{find_next_run_dir, save_annotated};
#[cfg(feature = "visualize")]
use crate::visualizer::Viewer;

use crate::cli::args::PredictArgs;
use crate::cli::logging::set_verbose;
use crate::io::load_image;
use crate::landmarks::{Landmark, landmark_name};
use crate::preprocessing::TensorLayout;
use crate::results::SegmentCom;
use crate::{Device, EstimatorConfig, PoseModel, VERSION, estimate};
use crate::{error, info, section, verbose, warn};

/// Directory annotated images are saved under.
const RUNS_DIR: &str = "runs/com";

/// Estimate segment CoMs for one image and report them.
#[allow(clippy::too_many_lines)]
pub fn run_prediction(args: &PredictArgs) {
    set_verbose(args.verbose);

    let device = match args.device.as_deref().map(str::parse::<Device>).transpose() {
        Ok(device) => device,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let mut config = EstimatorConfig::new().with_min_detection_confidence(args.conf);
    if let Some(sz) = args.imgsz {
        config = config.with_imgsz(sz, sz);
    }
    if let Some(d) = &device {
        config = config.with_device(d.clone());
    }

    let mut model = match PoseModel::load_with_config(&args.model, config) {
        Ok(m) => m,
        Err(e) => {
            error!("Error loading model: {e}");
            process::exit(1);
        }
    };

    let device_str = device.as_ref().unwrap_or(&Device::Cpu).to_string().to_uppercase();
    println!("Segmental CoM {VERSION} 🚀 Rust ONNX {device_str}");
    let imgsz = model.imgsz();
    verbose!("{} summary: imgsz=({}, {}), layout={:?}", args.model, imgsz.0, imgsz.1, model.layout());
    verbose!("");

    let image = match load_image(&args.source) {
        Ok(img) => img,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    let results = match estimate(&mut model, &image, args.source.clone()) {
        Ok(results) => results,
        Err(e) => {
            error!("Error estimating segment centers of mass: {e}");
            process::exit(1);
        }
    };

    let (width, height) = image.dimensions();
    verbose!(
        "image 1/1 {}: {}x{} {}, {:.1}ms",
        results.path,
        width,
        height,
        results.verbose(),
        results.speed.inference.unwrap_or(0.0)
    );

    if let Some(landmarks) = &results.landmarks {
        section!("Landmarks");
        for (index, landmark) in landmarks.iter() {
            verbose!("{}", format_landmark(index, landmark));
        }

        section!("Segment centers of mass");
        for com in &results.coms {
            info!("{}", format_com(com, width, height));
        }
    } else {
        warn!("No person detected in {}", results.path);
    }

    #[cfg(feature = "annotate")]
    if args.save || args.show {
        present(args, &image, &results);
    }

    #[cfg(not(feature = "annotate"))]
    if args.save || args.show {
        warn!("--save and --show require the 'annotate' feature. Compile with --features annotate to enable them.");
    }

    verbose!("");
    verbose!(
        "Speed: {:.1}ms preprocess, {:.1}ms inference, {:.1}ms postprocess per image at shape {}",
        results.speed.preprocess.unwrap_or(0.0),
        results.speed.inference.unwrap_or(0.0),
        results.speed.postprocess.unwrap_or(0.0),
        format_input_shape(model.layout(), imgsz)
    );
}

/// Annotate the image, then save and/or show it.
#[cfg(feature = "annotate")]
fn present(args: &PredictArgs, image: &image::DynamicImage, results: &crate::Results) {
    let font_data = if args.labels { load_font_data(DEFAULT_FONT) } else { None };
    let font = font_data
        .as_deref()
        .and_then(|data| FontRef::try_from_slice(data).ok());
    if args.labels && font.is_none() {
        warn!("Label font '{DEFAULT_FONT}' unavailable, drawing markers without labels");
    }

    let annotated = annotate_image(image, results, font.as_ref());

    if args.save {
        let save_dir = find_next_run_dir(RUNS_DIR, "predict");
        match save_annotated(&save_dir, &results.path, &annotated) {
            Ok(path) => verbose!("Results saved to {}", path.display()),
            Err(e) => error!("Failed to save result: {e}"),
        }
    }

    #[cfg(feature = "visualize")]
    if args.show {
        let shown = Viewer::new("Segmental CoM", annotated.width() as usize, annotated.height() as usize)
            .and_then(|mut viewer| {
                viewer.show(&annotated)?;
                viewer.wait_until_closed()
            });
        if let Err(e) = shown {
            error!("{e}");
        }
    }

    #[cfg(not(feature = "visualize"))]
    if args.show {
        warn!("--show requires the 'visualize' feature. Compile with --features visualize to enable it.");
    }
}

/// Format one landmark, e.g. "24 right_hip x=0.5123 y=0.6021 visibility=0.98".
fn format_landmark(index: usize, landmark: &Landmark) -> String {
    let name = landmark_name(index).unwrap_or("unknown");
    let visibility = landmark
        .visibility
        .map_or_else(String::new, |v| format!(" visibility={v:.2}"));
    format!("{index:>2} {name:<16} x={:.4} y={:.4}{visibility}", landmark.x, landmark.y)
}

/// Format one segment CoM with its normalized and pixel coordinates.
fn format_com(com: &SegmentCom, width: u32, height: u32) -> String {
    let (px, py) = com.to_pixel(width, height);
    format!("{:<15} ({:.4}, {:.4}) -> ({px}, {py}) px", com.name, com.x, com.y)
}

/// Model input shape as printed in the speed summary.
fn format_input_shape(layout: TensorLayout, (height, width): (usize, usize)) -> String {
    match layout {
        TensorLayout::Nhwc => format!("(1, {height}, {width}, 3)"),
        TensorLayout::Nchw => format!("(1, 3, {height}, {width})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentClass;

    #[test]
    fn test_format_landmark() {
        let landmark = Landmark::new(0.5, 0.25).with_visibility(0.987);
        assert_eq!(
            format_landmark(24, &landmark),
            "24 right_hip        x=0.5000 y=0.2500 visibility=0.99"
        );

        let bare = Landmark::new(0.1, 0.2);
        assert_eq!(format_landmark(0, &bare), " 0 nose             x=0.1000 y=0.2000");
    }

    #[test]
    fn test_format_com() {
        let com = SegmentCom::new("Left Thigh", SegmentClass::Thigh, 0.5, 0.6866);
        assert_eq!(
            format_com(&com, 640, 480),
            "Left Thigh      (0.5000, 0.6866) -> (320, 330) px"
        );
    }

    #[test]
    fn test_format_input_shape() {
        assert_eq!(format_input_shape(TensorLayout::Nhwc, (256, 256)), "(1, 256, 256, 3)");
        assert_eq!(format_input_shape(TensorLayout::Nchw, (224, 192)), "(1, 3, 224, 192)");
    }
}
