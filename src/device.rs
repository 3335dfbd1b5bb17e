// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Hardware device selection for the pose model.
use std::fmt;
use std::str::FromStr;

/// Hardware device for pose inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Device {
    /// CPU (Central Processing Unit).
    Cpu,
    /// CUDA for NVIDIA GPUs, with the device index.
    Cuda(usize),
    /// `TensorRT` on an NVIDIA GPU, with the device index.
    TensorRt(usize),
    /// `CoreML` on Apple hardware (`mps` is accepted as an alias).
    CoreMl,
    /// `DirectML` on Windows, with the device index.
    DirectMl(usize),
    /// `OpenVINO` for Intel hardware.
    OpenVino,
}

impl Device {
    /// Name of the Cargo feature that enables this device's execution provider.
    #[must_use]
    pub const fn feature(&self) -> Option<&'static str> {
        match self {
            Self::Cpu => None,
            Self::Cuda(_) => Some("cuda"),
            Self::TensorRt(_) => Some("tensorrt"),
            Self::CoreMl => Some("coreml"),
            Self::DirectMl(_) => Some("directml"),
            Self::OpenVino => Some("openvino"),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda(i) => write!(f, "cuda:{i}"),
            Self::TensorRt(i) => write!(f, "tensorrt:{i}"),
            Self::CoreMl => write!(f, "coreml"),
            Self::DirectMl(i) => write!(f, "directml:{i}"),
            Self::OpenVino => write!(f, "openvino"),
        }
    }
}

impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();
        match s.as_str() {
            "cpu" => Ok(Self::Cpu),
            "mps" | "coreml" => Ok(Self::CoreMl),
            "openvino" => Ok(Self::OpenVino),
            _ => {
                if let Some(rest) = s.strip_prefix("cuda") {
                    Ok(Self::Cuda(parse_device_index(rest)?))
                } else if let Some(rest) = s.strip_prefix("tensorrt") {
                    Ok(Self::TensorRt(parse_device_index(rest)?))
                } else if let Some(rest) = s.strip_prefix("directml") {
                    Ok(Self::DirectMl(parse_device_index(rest)?))
                } else {
                    Err(format!("Unknown device: {s}"))
                }
            }
        }
    }
}

/// Parse the optional ":N" suffix of a device string.
fn parse_device_index(s: &str) -> Result<usize, String> {
    if s.is_empty() {
        return Ok(0);
    }
    s.strip_prefix(':')
        .and_then(|index| index.parse::<usize>().ok())
        .ok_or_else(|| format!("Invalid device index: {s}"))
}
