// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::{Args, Parser, Subcommand};

/// Model used when `--model` is not given.
pub const DEFAULT_MODEL: &str = "pose_landmark_full.onnx";

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Predict Options:
    --model, -m <MODEL>    Path to ONNX pose landmark model [default: pose_landmark_full.onnx]
    --source, -s <SOURCE>  Input image
    --conf <CONF>          Minimum pose detection confidence [default: 0.5]
    --imgsz <IMGSZ>        Model input size (overrides the model's declared size)
    --device <DEVICE>      Device (cpu, cuda:0, tensorrt:0, mps, coreml, directml:0, openvino)
    --save                 Save the annotated image to runs/com/predict
    --show                 Display the annotated image in a window
    --labels               Write segment names next to CoM markers
    --verbose <BOOL>       Show verbose output [default: true]

Examples:
    segmental-com predict --source athlete.jpg
    segmental-com predict -m pose_landmark_heavy.onnx -s athlete.jpg --save
    segmental-com predict -s athlete.jpg --show --labels
    segmental-com predict -s athlete.jpg --conf 0.7 --device cuda:0 --verbose false"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate segment centers of mass for the person in an image
    Predict(PredictArgs),
}

/// Arguments for the predict command.
#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct PredictArgs {
    /// Path to ONNX pose landmark model
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Input image
    #[arg(short, long)]
    pub source: String,

    /// Minimum pose detection confidence
    #[arg(long, default_value_t = 0.5)]
    pub conf: f32,

    /// Model input size
    #[arg(long)]
    pub imgsz: Option<usize>,

    /// Device to use (cpu, cuda:0, tensorrt:0, mps, coreml, directml:0, openvino)
    #[arg(long)]
    pub device: Option<String>,

    /// Save the annotated image to runs/com/predict
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Display the annotated image in a window
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Write segment names next to CoM markers
    #[arg(long, default_value_t = false)]
    pub labels: bool,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_predict_args_defaults() {
        let args = Cli::parse_from(["app", "predict", "--source", "pose.jpg"]);
        match args.command {
            Commands::Predict(predict_args) => {
                assert_eq!(predict_args.model, DEFAULT_MODEL);
                assert_eq!(predict_args.source, "pose.jpg");
                assert!((predict_args.conf - 0.5).abs() < f32::EPSILON);
                assert!(predict_args.imgsz.is_none());
                assert!(predict_args.device.is_none());
                assert!(!predict_args.save);
                assert!(!predict_args.show);
                assert!(!predict_args.labels);
                assert!(predict_args.verbose);
            }
        }
    }

    #[test]
    fn test_predict_args_custom() {
        let args = Cli::parse_from([
            "app",
            "predict",
            "-m",
            "pose_landmark_lite.onnx",
            "-s",
            "test.jpg",
            "--conf",
            "0.8",
            "--imgsz",
            "224",
            "--device",
            "cuda:1",
            "--save",
            "--labels",
            "--verbose",
            "false",
        ]);
        match args.command {
            Commands::Predict(predict_args) => {
                assert_eq!(predict_args.model, "pose_landmark_lite.onnx");
                assert_eq!(predict_args.source, "test.jpg");
                assert!((predict_args.conf - 0.8).abs() < f32::EPSILON);
                assert_eq!(predict_args.imgsz, Some(224));
                assert_eq!(predict_args.device.as_deref(), Some("cuda:1"));
                assert!(predict_args.save);
                assert!(predict_args.labels);
                assert!(!predict_args.verbose);
            }
        }
    }

    #[test]
    fn test_source_is_required() {
        assert!(Cli::try_parse_from(["app", "predict"]).is_err());
    }
}
