use num_traits::Zero;

use crate::error::ImageError;
use crate::view::StridedImage;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use edge_detector_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels of the image, or `None` if it overflows `usize`.
    pub fn num_pixels(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Whether both dimensions are strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// An owned single-channel image plane stored row-major without padding.
///
/// Used for the intermediate maps of the filters (gradients, magnitudes) and
/// to build inputs in tests and demos.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image, row-major.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use edge_detector_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20],
    /// ).unwrap();
    ///
    /// assert_eq!(image.cols(), 10);
    /// assert_eq!(image.rows(), 20);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        if !size.is_valid() {
            return Err(ImageError::InvalidImageDimensions(size.width, size.height));
        }

        let num_pixels = size.num_pixels().ok_or(ImageError::DimensionOverflow)?;
        if data.len() != num_pixels {
            return Err(ImageError::InvalidChannelShape(data.len(), num_pixels));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and every pixel set to `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let num_pixels = size.num_pixels().ok_or(ImageError::DimensionOverflow)?;
        Image::new(size, vec![val; num_pixels])
    }

    /// Create a new zero-filled image with the given size.
    pub fn zeros(size: ImageSize) -> Result<Self, ImageError>
    where
        T: Clone + Zero,
    {
        Self::from_size_val(size, T::zero())
    }

    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The number of columns of the image.
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// The number of rows of the image.
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// The pixel data as a contiguous slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The pixel data as a contiguous mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return the pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// The pixels of row `r`, or `None` if out of bounds.
    pub fn row(&self, r: usize) -> Option<&[T]> {
        if r >= self.rows() {
            return None;
        }
        let start = r * self.cols();
        Some(&self.data[start..start + self.cols()])
    }

    /// The pixel at column `x` and row `y`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.cols() || y >= self.rows() {
            return None;
        }
        self.data.get(y * self.cols() + x)
    }

    /// Check that `other` has the same size as this image.
    pub fn check_same_size(&self, other: ImageSize) -> Result<(), ImageError> {
        if self.size != other {
            return Err(ImageError::InvalidImageSize(
                other.width,
                other.height,
                self.size.width,
                self.size.height,
            ));
        }
        Ok(())
    }
}

impl Image<u8> {
    /// Borrow the image as a packed strided view (stride equal to width).
    pub fn as_strided(&self) -> StridedImage<'_> {
        StridedImage::packed(&self.data, self.size)
    }
}
