//! The executor capability seam

use tracing::debug;

use crate::buffer::ImageBuffer;
use crate::error::OpsResult;
use crate::operation::ResolvedOperation;
use crate::{filters, transforms};

/// Computes a new buffer from a validated operation and a base buffer.
///
/// Implementations must be pure with respect to session state: failures leave the
/// caller free to retry against the same base buffer.
pub trait OperationExecutor: Send + Sync {
    /// Run one operation against a base buffer
    fn execute(&self, operation: &ResolvedOperation, base: &ImageBuffer) -> OpsResult<ImageBuffer>;
}

/// The built-in executor covering all ten edit kinds
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterExecutor;

impl RasterExecutor {
    /// Create a new raster executor
    pub fn new() -> Self {
        RasterExecutor
    }
}

impl OperationExecutor for RasterExecutor {
    fn execute(&self, operation: &ResolvedOperation, base: &ImageBuffer) -> OpsResult<ImageBuffer> {
        let (width, height) = base.dimensions();
        debug!(
            op = operation.kind().as_str(),
            width, height, "executing operation"
        );

        let image = base.as_dynamic();
        let produced = match operation {
            ResolvedOperation::Grayscale => filters::grayscale(image),
            ResolvedOperation::Sepia => filters::sepia(base)?,
            ResolvedOperation::Warm => filters::warm(base)?,
            ResolvedOperation::Sharpen { factor } => filters::sharpen(image, *factor),
            ResolvedOperation::Blur { radius } => filters::blur(image, *radius),
            ResolvedOperation::Edge => filters::edge(image),
            ResolvedOperation::Rotate { degrees } => transforms::rotate(image, *degrees),
            ResolvedOperation::Flip { direction } => transforms::flip(image, *direction),
            ResolvedOperation::Crop {
                left,
                top,
                right,
                bottom,
            } => transforms::crop(image, *left, *top, *right, *bottom),
            ResolvedOperation::Resize { width, height } => {
                transforms::resize(image, *width, *height)
            }
        };
        Ok(ImageBuffer::new(produced))
    }
}
