//! Canny edge detection on strided 8-bit grayscale images.
//!
//! The detector runs four passes over the image:
//!
//! 1. 3x3 Sobel derivatives, replicating the border pixels.
//! 2. Gradient magnitude with the [`GradientNorm`] of the parameters.
//! 3. Non-maximum suppression along the gradient direction quantized in four
//!    bins, magnitudes outside the image being zero.
//! 4. Hysteresis: pixels above the high threshold seed the edges, pixels above
//!    the low threshold join them through 8-connectivity.
//!
//! The output holds [`EDGE`] for edge pixels and `0` elsewhere.

use edge_detector_image::{Image, ImageError, PackedImageMut, StridedImage};

use crate::filter::{gradient_magnitude, spatial_gradient, GradientNorm};

mod hysteresis;
pub use hysteresis::hysteresis;

mod nms;
pub use nms::non_maximum_suppression;

/// Value written for edge pixels.
pub const EDGE: u8 = 255;

/// Parameters of the Canny edge detector.
///
/// The thresholds are compared against the raw Sobel magnitude of the chosen
/// norm, e.g. a sharp step from 0 to 255 yields an L1 magnitude of 1020.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyParams {
    /// Magnitude below which (inclusive) a pixel is never an edge.
    pub low_threshold: f32,
    /// Magnitude above which a pixel is always an edge.
    pub high_threshold: f32,
    /// Norm of the gradient magnitude.
    pub norm: GradientNorm,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
            norm: GradientNorm::L1,
        }
    }
}

impl CannyParams {
    /// Create the parameters with the default L1 norm.
    pub fn new(low_threshold: f32, high_threshold: f32) -> Self {
        Self {
            low_threshold,
            high_threshold,
            norm: GradientNorm::L1,
        }
    }

    /// Set the gradient norm.
    pub fn with_norm(mut self, norm: GradientNorm) -> Self {
        self.norm = norm;
        self
    }

    /// The validated `(low, high)` thresholds, swapped if given in reverse order.
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold is negative or not finite.
    pub fn thresholds(&self) -> Result<(f32, f32), ImageError> {
        let (low, high) = (self.low_threshold, self.high_threshold);
        if !low.is_finite() || !high.is_finite() || low < 0.0 || high < 0.0 {
            return Err(ImageError::InvalidThresholds(low, high));
        }
        Ok(if low > high { (high, low) } else { (low, high) })
    }
}

/// Detect the edges of a grayscale image with the Canny algorithm.
///
/// # Arguments
///
/// * `src` - The source image, rows read through its stride.
/// * `dst` - The packed edge map with the same size as `src`.
/// * `params` - The thresholds and the gradient norm.
///
/// # Errors
///
/// Returns an error if the sizes differ or the thresholds are invalid. Nothing
/// is written to `dst` in that case.
///
/// # Examples
///
/// ```
/// use edge_detector_image::{ImageSize, PackedImageMut, StridedImage};
/// use edge_detector_imgproc::edges::{canny, CannyParams};
///
/// let size = ImageSize { width: 4, height: 2 };
/// let src = [0u8, 0, 255, 255, 0, 0, 255, 255];
/// let mut dst = [0u8; 8];
///
/// canny(
///     &StridedImage::new(&src, size, 4).unwrap(),
///     &mut PackedImageMut::new(&mut dst, size).unwrap(),
///     &CannyParams::default(),
/// )
/// .unwrap();
///
/// assert_eq!(dst, [0, 255, 0, 0, 0, 255, 0, 0]);
/// ```
pub fn canny(
    src: &StridedImage<'_>,
    dst: &mut PackedImageMut<'_>,
    params: &CannyParams,
) -> Result<(), ImageError> {
    let size = src.size();
    if dst.size() != size {
        return Err(ImageError::InvalidImageSize(
            dst.size().width,
            dst.size().height,
            size.width,
            size.height,
        ));
    }

    let (low, high) = params.thresholds()?;

    let mut dx = Image::<f32>::zeros(size)?;
    let mut dy = Image::<f32>::zeros(size)?;
    spatial_gradient(src, &mut dx, &mut dy)?;

    let mut magnitude = Image::<f32>::zeros(size)?;
    gradient_magnitude(&dx, &dy, &mut magnitude, params.norm)?;

    let mut suppressed = Image::<f32>::zeros(size)?;
    non_maximum_suppression(&dx, &dy, &magnitude, low, &mut suppressed)?;

    hysteresis(&suppressed, low, high, dst)
}
