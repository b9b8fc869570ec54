use std::ffi::CStr;

use edge_detector_image::{ImageError, ImageSize, PackedImageMut, StridedImage};

use crate::edges::{canny, CannyParams};
use crate::stride::remove_stride;

/// A transform from a strided grayscale image to a packed image of the same size.
///
/// Implementations are picked statically, either through [`ActiveTransform`]
/// or by passing a value to [`process_image_with`], so a call never goes
/// through dynamic dispatch.
pub trait ImageTransform {
    /// Short name of the backend, used in logs.
    const NAME: &'static str;

    /// [`Self::NAME`] as a NUL-terminated string for the C boundary.
    const C_NAME: &'static CStr;

    /// Fill `dst` from `src`.
    ///
    /// PRECONDITION: `src` and `dst` must have the same size.
    fn apply(&self, src: &StridedImage<'_>, dst: &mut PackedImageMut<'_>)
        -> Result<(), ImageError>;
}

// evaluated at compile time, a malformed name fails the build
const fn c_name(bytes: &'static [u8]) -> &'static CStr {
    match CStr::from_bytes_with_nul(bytes) {
        Ok(name) => name,
        Err(_) => panic!("backend name must end with a single NUL byte"),
    }
}

/// Canny edge detection backend.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CannyTransform {
    /// The detector parameters.
    pub params: CannyParams,
}

impl CannyTransform {
    /// Create the backend with the given parameters.
    pub fn new(params: CannyParams) -> Self {
        Self { params }
    }
}

impl ImageTransform for CannyTransform {
    const NAME: &'static str = "canny";
    const C_NAME: &'static CStr = c_name(b"canny\0");

    fn apply(
        &self,
        src: &StridedImage<'_>,
        dst: &mut PackedImageMut<'_>,
    ) -> Result<(), ImageError> {
        canny(src, dst, &self.params)
    }
}

/// Stride-normalizing copy backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrideCopyTransform;

impl ImageTransform for StrideCopyTransform {
    const NAME: &'static str = "stride-copy";
    const C_NAME: &'static CStr = c_name(b"stride-copy\0");

    fn apply(
        &self,
        src: &StridedImage<'_>,
        dst: &mut PackedImageMut<'_>,
    ) -> Result<(), ImageError> {
        remove_stride(src, dst)
    }
}

/// The backend compiled into [`process_image`].
#[cfg(feature = "canny")]
pub type ActiveTransform = CannyTransform;

/// The backend compiled into [`process_image`].
#[cfg(not(feature = "canny"))]
pub type ActiveTransform = StrideCopyTransform;

/// Transform a padded grayscale buffer into a packed buffer with the compiled backend.
///
/// With the `canny` feature (default) the output is the Canny edge map with
/// thresholds 50 and 150, otherwise it is the source without its row padding.
///
/// # Arguments
///
/// * `input` - The source buffer, `height` rows placed `stride` bytes apart.
/// * `width` - The number of valid samples per row.
/// * `height` - The number of rows.
/// * `stride` - The number of bytes between the start of consecutive rows.
/// * `output` - The destination buffer, at least `width * height` bytes.
///
/// # Errors
///
/// Returns an error before touching `output` if a dimension is zero, if
/// `stride < width`, or if a buffer is too small.
///
/// # Examples
///
/// ```
/// use edge_detector_imgproc::process_image;
///
/// let input = [128u8; 4 * 3];
/// let mut output = [1u8; 3 * 3];
///
/// process_image(&input, 3, 3, 4, &mut output).unwrap();
/// ```
pub fn process_image(
    input: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    output: &mut [u8],
) -> Result<(), ImageError> {
    process_image_with(&ActiveTransform::default(), input, width, height, stride, output)
}

/// Transform a padded grayscale buffer into a packed buffer with the given backend.
///
/// See [`process_image`] for the arguments and the errors.
pub fn process_image_with<T: ImageTransform>(
    transform: &T,
    input: &[u8],
    width: usize,
    height: usize,
    stride: usize,
    output: &mut [u8],
) -> Result<(), ImageError> {
    let size = ImageSize { width, height };
    let src = StridedImage::new(input, size, stride)?;
    let mut dst = PackedImageMut::new(output, size)?;

    log::debug!(
        "processing {}x{} image with stride {} using the {} backend",
        width,
        height,
        stride,
        T::NAME
    );

    transform.apply(&src, &mut dst)
}
