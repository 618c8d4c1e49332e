//! Operation model and uniform parameter validation

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{OpsError, OpsResult};

/// Default sharpening factor when the caller sends none
pub const DEFAULT_SHARPEN_FACTOR: f64 = 1.5;
/// Default gaussian blur radius when the caller sends none
pub const DEFAULT_BLUR_RADIUS: f64 = 2.0;
/// Default rotation angle when the caller sends none
pub const DEFAULT_ROTATE_DEGREES: i64 = 90;

/// The supported edit kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Drop color channels
    Grayscale,
    /// Sepia tone matrix
    Sepia,
    /// Warm tone channel boost
    Warm,
    /// Unsharp-mask sharpening
    Sharpen,
    /// Gaussian blur
    Blur,
    /// Edge detection
    Edge,
    /// Rotation with expanded canvas
    Rotate,
    /// Horizontal or vertical mirror
    Flip,
    /// Rectangular crop
    Crop,
    /// Exact resize
    Resize,
}

impl OperationKind {
    /// Every supported kind, for enumeration in diagnostics and tests
    pub const ALL: [OperationKind; 10] = [
        OperationKind::Grayscale,
        OperationKind::Sepia,
        OperationKind::Warm,
        OperationKind::Sharpen,
        OperationKind::Blur,
        OperationKind::Edge,
        OperationKind::Rotate,
        OperationKind::Flip,
        OperationKind::Crop,
        OperationKind::Resize,
    ];

    /// Lowercase wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Grayscale => "grayscale",
            OperationKind::Sepia => "sepia",
            OperationKind::Warm => "warm",
            OperationKind::Sharpen => "sharpen",
            OperationKind::Blur => "blur",
            OperationKind::Edge => "edge",
            OperationKind::Rotate => "rotate",
            OperationKind::Flip => "flip",
            OperationKind::Crop => "crop",
            OperationKind::Resize => "resize",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grayscale" => Ok(OperationKind::Grayscale),
            "sepia" => Ok(OperationKind::Sepia),
            "warm" => Ok(OperationKind::Warm),
            "sharpen" => Ok(OperationKind::Sharpen),
            "blur" => Ok(OperationKind::Blur),
            "edge" => Ok(OperationKind::Edge),
            "rotate" => Ok(OperationKind::Rotate),
            "flip" => Ok(OperationKind::Flip),
            "crop" => Ok(OperationKind::Crop),
            "resize" => Ok(OperationKind::Resize),
            other => Err(OpsError::InvalidOperation(other.to_string())),
        }
    }
}

/// Mirror axis for flip operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipDirection {
    /// Mirror across the vertical axis
    Horizontal,
    /// Mirror across the horizontal axis
    Vertical,
}

/// String-keyed parameter map attached to an edit request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationParams(HashMap<String, Value>);

impl OperationParams {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Whether the map holds no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read an integer parameter; present-but-not-integer is an error
    pub fn get_i64(&self, name: &'static str) -> OpsResult<Option<i64>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| OpsError::invalid_parameter(name, "expected an integer")),
        }
    }

    /// Read a non-negative integer parameter that must fit pixel coordinates
    pub fn get_u32(&self, name: &'static str) -> OpsResult<Option<u32>> {
        match self.get_i64(name)? {
            None => Ok(None),
            Some(value) => u32::try_from(value).map(Some).map_err(|_| {
                OpsError::invalid_parameter(name, "expected a non-negative pixel value")
            }),
        }
    }

    /// Read a numeric parameter; present-but-not-numeric is an error
    pub fn get_f64(&self, name: &'static str) -> OpsResult<Option<f64>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| OpsError::invalid_parameter(name, "expected a number")),
        }
    }

    /// Read a string parameter; present-but-not-string is an error
    pub fn get_str(&self, name: &'static str) -> OpsResult<Option<&str>> {
        match self.0.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| OpsError::invalid_parameter(name, "expected a string")),
        }
    }
}

/// An edit request: a kind plus its raw parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// What to do
    pub kind: OperationKind,
    /// How to do it
    pub params: OperationParams,
}

impl Operation {
    /// Create an operation from an already-resolved kind
    pub fn new(kind: OperationKind, params: OperationParams) -> Self {
        Operation { kind, params }
    }

    /// Parse the wire form: a kind name plus raw parameters
    pub fn parse(kind: &str, params: OperationParams) -> OpsResult<Self> {
        Ok(Operation {
            kind: kind.parse()?,
            params,
        })
    }

    /// Validate parameters against the base image dimensions, producing a typed
    /// operation that executors can run without re-checking anything.
    ///
    /// Geometry defaults come from the base image: crop bounds default to the
    /// full frame and resize defaults to the current size.
    pub fn resolve(&self, width: u32, height: u32) -> OpsResult<ResolvedOperation> {
        match self.kind {
            OperationKind::Grayscale => Ok(ResolvedOperation::Grayscale),
            OperationKind::Sepia => Ok(ResolvedOperation::Sepia),
            OperationKind::Warm => Ok(ResolvedOperation::Warm),
            OperationKind::Edge => Ok(ResolvedOperation::Edge),
            OperationKind::Sharpen => {
                let factor = self
                    .params
                    .get_f64("factor")?
                    .unwrap_or(DEFAULT_SHARPEN_FACTOR);
                if factor < 0.0 {
                    return Err(OpsError::invalid_parameter("factor", "must be >= 0"));
                }
                Ok(ResolvedOperation::Sharpen {
                    factor: factor as f32,
                })
            }
            OperationKind::Blur => {
                let radius = self.params.get_f64("radius")?.unwrap_or(DEFAULT_BLUR_RADIUS);
                if radius < 0.0 {
                    return Err(OpsError::invalid_parameter("radius", "must be >= 0"));
                }
                Ok(ResolvedOperation::Blur {
                    radius: radius as f32,
                })
            }
            OperationKind::Rotate => {
                let degrees = self
                    .params
                    .get_i64("angle")?
                    .unwrap_or(DEFAULT_ROTATE_DEGREES);
                // Any integer angle is valid; reduce to one canvas revolution
                Ok(ResolvedOperation::Rotate {
                    degrees: degrees.rem_euclid(360) as i32,
                })
            }
            OperationKind::Flip => {
                let direction = match self.params.get_str("direction")?.unwrap_or("horizontal") {
                    "horizontal" => FlipDirection::Horizontal,
                    "vertical" => FlipDirection::Vertical,
                    other => {
                        return Err(OpsError::invalid_parameter(
                            "direction",
                            format!("expected 'horizontal' or 'vertical', got '{}'", other),
                        ))
                    }
                };
                Ok(ResolvedOperation::Flip { direction })
            }
            OperationKind::Crop => {
                let left = self.params.get_u32("left")?.unwrap_or(0);
                let top = self.params.get_u32("top")?.unwrap_or(0);
                let right = self.params.get_u32("right")?.unwrap_or(width);
                let bottom = self.params.get_u32("bottom")?.unwrap_or(height);
                if left >= right {
                    return Err(OpsError::InvalidGeometry(format!(
                        "crop left ({}) must be less than right ({})",
                        left, right
                    )));
                }
                if top >= bottom {
                    return Err(OpsError::InvalidGeometry(format!(
                        "crop top ({}) must be less than bottom ({})",
                        top, bottom
                    )));
                }
                Ok(ResolvedOperation::Crop {
                    left,
                    top,
                    right,
                    bottom,
                })
            }
            OperationKind::Resize => {
                let target_width = self.params.get_u32("width")?.unwrap_or(width);
                let target_height = self.params.get_u32("height")?.unwrap_or(height);
                if target_width == 0 || target_height == 0 {
                    return Err(OpsError::InvalidGeometry(format!(
                        "resize dimensions must be positive, got {}x{}",
                        target_width, target_height
                    )));
                }
                Ok(ResolvedOperation::Resize {
                    width: target_width,
                    height: target_height,
                })
            }
        }
    }
}

/// A fully validated operation with typed parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedOperation {
    /// Drop color channels
    Grayscale,
    /// Sepia tone matrix
    Sepia,
    /// Warm tone channel boost
    Warm,
    /// Unsharp-mask sharpening
    Sharpen {
        /// Sharpening strength, >= 0
        factor: f32,
    },
    /// Gaussian blur
    Blur {
        /// Blur radius, >= 0
        radius: f32,
    },
    /// Edge detection
    Edge,
    /// Rotation with expanded canvas
    Rotate {
        /// Counter-clockwise degrees, reduced to 0..360
        degrees: i32,
    },
    /// Horizontal or vertical mirror
    Flip {
        /// Mirror axis
        direction: FlipDirection,
    },
    /// Rectangular crop, left < right and top < bottom
    Crop {
        /// Left edge, inclusive
        left: u32,
        /// Top edge, inclusive
        top: u32,
        /// Right edge, exclusive
        right: u32,
        /// Bottom edge, exclusive
        bottom: u32,
    },
    /// Exact resize to positive dimensions
    Resize {
        /// Target width
        width: u32,
        /// Target height
        height: u32,
    },
}

impl ResolvedOperation {
    /// The kind this resolved operation was validated from
    pub fn kind(&self) -> OperationKind {
        match self {
            ResolvedOperation::Grayscale => OperationKind::Grayscale,
            ResolvedOperation::Sepia => OperationKind::Sepia,
            ResolvedOperation::Warm => OperationKind::Warm,
            ResolvedOperation::Sharpen { .. } => OperationKind::Sharpen,
            ResolvedOperation::Blur { .. } => OperationKind::Blur,
            ResolvedOperation::Edge => OperationKind::Edge,
            ResolvedOperation::Rotate { .. } => OperationKind::Rotate,
            ResolvedOperation::Flip { .. } => OperationKind::Flip,
            ResolvedOperation::Crop { .. } => OperationKind::Crop,
            ResolvedOperation::Resize { .. } => OperationKind::Resize,
        }
    }
}
