//! Edit operations for pixelsmith
//!
//! This crate provides the operation model shared by the whole backend:
//! - The immutable [`ImageBuffer`] wrapper around a decoded raster
//! - [`Operation`] parsing and uniform parameter validation
//! - The [`OperationExecutor`] capability seam
//! - [`RasterExecutor`], the built-in executor for all ten edit kinds

pub mod buffer;
pub mod error;
pub mod executor;
pub mod filters;
pub mod operation;
pub mod transforms;

pub use buffer::{ColorMode, ImageBuffer};
pub use error::{OpsError, OpsResult};
pub use executor::{OperationExecutor, RasterExecutor};
pub use operation::{
    FlipDirection, Operation, OperationKind, OperationParams, ResolvedOperation,
    DEFAULT_BLUR_RADIUS, DEFAULT_ROTATE_DEGREES, DEFAULT_SHARPEN_FACTOR,
};
