//! C ABI of the edge detector.
//!
//! The host keeps ownership of every buffer: the functions only borrow them
//! for the duration of the call and never retain a pointer. Calls on distinct
//! buffers may run concurrently; sharing an output buffer between concurrent
//! calls is a data race the caller must avoid.

use std::ffi::c_char;
use std::panic;

use edge_detector_image::ImageError;
use edge_detector_imgproc::{process_image, ActiveTransform, ImageTransform};

/// Outcome of a call across the C boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDetectorStatus {
    /// The output buffer holds the result.
    Ok = 0,
    /// The input or the output pointer is null.
    NullPointer = 1,
    /// The width or the height is not strictly positive.
    InvalidDimensions = 2,
    /// The stride is smaller than the width.
    InvalidStride = 3,
    /// The input buffer does not hold every row.
    SourceTooSmall = 4,
    /// The output buffer cannot hold `width * height` bytes.
    DestinationTooSmall = 5,
    /// The call failed unexpectedly; the output content is unspecified.
    Internal = 6,
}

impl From<&ImageError> for EdgeDetectorStatus {
    fn from(err: &ImageError) -> Self {
        match err {
            ImageError::InvalidImageDimensions(..) | ImageError::DimensionOverflow => {
                EdgeDetectorStatus::InvalidDimensions
            }
            ImageError::InvalidStride(..) => EdgeDetectorStatus::InvalidStride,
            ImageError::SourceBufferTooSmall(..) => EdgeDetectorStatus::SourceTooSmall,
            ImageError::DestinationBufferTooSmall(..) => EdgeDetectorStatus::DestinationTooSmall,
            _ => EdgeDetectorStatus::Internal,
        }
    }
}

fn dimension(value: i32) -> Option<usize> {
    usize::try_from(value).ok().filter(|&v| v > 0)
}

/// Fill `output` from the strided grayscale `input` with the compiled backend.
///
/// With the default build the output is the Canny edge map of the input
/// (`255` on edges, `0` elsewhere); a build without the `canny` feature copies
/// the input without its row padding.
///
/// # Safety
///
/// - `input` must be valid for reads of `input_len` bytes.
/// - `output` must be valid for writes of `output_len` bytes and must not
///   overlap `input`.
/// - `output` must not be accessed by another thread during the call.
#[no_mangle]
pub unsafe extern "C" fn edge_detector_process_image(
    input: *const u8,
    input_len: usize,
    width: i32,
    height: i32,
    stride: i32,
    output: *mut u8,
    output_len: usize,
) -> EdgeDetectorStatus {
    if input.is_null() || output.is_null() {
        log::error!("edge_detector_process_image called with a null buffer");
        return EdgeDetectorStatus::NullPointer;
    }

    let (Some(width), Some(height)) = (dimension(width), dimension(height)) else {
        log::error!("invalid image dimensions {}x{}", width, height);
        return EdgeDetectorStatus::InvalidDimensions;
    };

    let Some(stride) = dimension(stride) else {
        log::error!("invalid row stride {}", stride);
        return EdgeDetectorStatus::InvalidStride;
    };

    let input = std::slice::from_raw_parts(input, input_len);
    let output = std::slice::from_raw_parts_mut(output, output_len);

    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        process_image(input, width, height, stride, output)
    }));

    match result {
        Ok(Ok(())) => EdgeDetectorStatus::Ok,
        Ok(Err(err)) => {
            log::error!("rejected image: {}", err);
            EdgeDetectorStatus::from(&err)
        }
        Err(_) => {
            log::error!("edge detector panicked");
            EdgeDetectorStatus::Internal
        }
    }
}

/// Name of the compiled backend as a static NUL-terminated string.
#[no_mangle]
pub extern "C" fn edge_detector_backend() -> *const c_char {
    ActiveTransform::C_NAME.as_ptr()
}

/// Version of the library as a static NUL-terminated string.
#[no_mangle]
pub extern "C" fn edge_detector_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr().cast()
}
