/// An error type for the image module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Error when the width or the height of the image is zero.
    #[error("Image dimensions must be positive, got {0}x{1}")]
    InvalidImageDimensions(usize, usize),

    /// Error when the row stride is smaller than the image width.
    #[error("Row stride ({0}) must be greater or equal than the image width ({1})")]
    InvalidStride(usize, usize),

    /// Error when the source buffer cannot hold every addressed row.
    #[error("Source buffer length ({0}) is smaller than the required length ({1})")]
    SourceBufferTooSmall(usize, usize),

    /// Error when the destination buffer cannot hold the packed image.
    #[error("Destination buffer length ({0}) is smaller than the required length ({1})")]
    DestinationBufferTooSmall(usize, usize),

    /// Error when the buffer extent does not fit in the address space.
    #[error("Image dimensions overflow the addressable size")]
    DimensionOverflow,

    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images are expected to have the same size.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the hysteresis thresholds are negative or not finite.
    #[error("Invalid hysteresis thresholds: low {0}, high {1}")]
    InvalidThresholds(f32, f32),
}
