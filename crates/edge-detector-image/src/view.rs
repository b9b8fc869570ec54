use crate::error::ImageError;
use crate::image::ImageSize;

/// A read-only view over a host-owned grayscale buffer with row padding.
///
/// The buffer holds `height` rows of `width` valid samples, consecutive row
/// starts being `stride` bytes apart. Only the first `width` bytes of each row
/// are ever read, so the last row does not need to carry its padding.
///
/// # Examples
///
/// ```
/// use edge_detector_image::{ImageSize, StridedImage};
///
/// // two rows of two pixels, padded to four bytes
/// let data = [1u8, 2, 0, 0, 3, 4, 0, 0];
/// let view = StridedImage::new(&data, ImageSize { width: 2, height: 2 }, 4).unwrap();
///
/// assert_eq!(view.row(1), &[3, 4]);
/// assert_eq!(view.get(0, 1), Some(3));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StridedImage<'a> {
    data: &'a [u8],
    size: ImageSize,
    stride: usize,
}

/// Minimal number of bytes addressed by `height` rows of `width` bytes placed
/// `stride` bytes apart.
///
/// PRECONDITION: `size` is valid and `stride >= size.width`.
fn required_len(size: ImageSize, stride: usize) -> Result<usize, ImageError> {
    (size.height - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(size.width))
        .ok_or(ImageError::DimensionOverflow)
}

impl<'a> StridedImage<'a> {
    /// Create a view over `data`.
    ///
    /// # Arguments
    ///
    /// * `data` - The source buffer.
    /// * `size` - The logical size of the image.
    /// * `stride` - The number of bytes between the start of consecutive rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero, if `stride < width`, or if
    /// `data` is shorter than `(height - 1) * stride + width` bytes.
    pub fn new(data: &'a [u8], size: ImageSize, stride: usize) -> Result<Self, ImageError> {
        if !size.is_valid() {
            return Err(ImageError::InvalidImageDimensions(size.width, size.height));
        }

        if stride < size.width {
            return Err(ImageError::InvalidStride(stride, size.width));
        }

        // the packed destination must be addressable too
        size.num_pixels().ok_or(ImageError::DimensionOverflow)?;

        let required = required_len(size, stride)?;
        if data.len() < required {
            return Err(ImageError::SourceBufferTooSmall(data.len(), required));
        }

        Ok(Self { data, size, stride })
    }

    /// Create a view over packed data whose invariants are already known to hold.
    pub(crate) fn packed(data: &'a [u8], size: ImageSize) -> Self {
        Self {
            data,
            size,
            stride: size.width,
        }
    }

    /// The logical size of the image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The number of valid samples per row.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The number of rows.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The number of bytes between the start of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Whether the rows are stored without padding.
    pub fn is_packed(&self) -> bool {
        self.stride == self.size.width
    }

    /// The whole borrowed buffer, padding included.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// The `width` valid samples of row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= height`.
    #[inline]
    pub fn row(&self, r: usize) -> &'a [u8] {
        assert!(r < self.size.height, "row index out of bounds");
        let start = r * self.stride;
        &self.data[start..start + self.size.width]
    }

    /// Iterate over the valid samples of every row, top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &'a [u8]> + '_ {
        (0..self.size.height).map(move |r| self.row(r))
    }

    /// The sample at column `x` and row `y`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.data.get(y * self.stride + x).copied()
    }
}

/// A writable view over a host-owned, tightly packed grayscale buffer.
///
/// Only the first `width * height` bytes are addressed; anything past them
/// is left untouched.
#[derive(Debug)]
pub struct PackedImageMut<'a> {
    data: &'a mut [u8],
    size: ImageSize,
}

impl<'a> PackedImageMut<'a> {
    /// Create a view over `data`.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is zero or if `data` is shorter than
    /// `width * height` bytes.
    pub fn new(data: &'a mut [u8], size: ImageSize) -> Result<Self, ImageError> {
        if !size.is_valid() {
            return Err(ImageError::InvalidImageDimensions(size.width, size.height));
        }

        let required = size.num_pixels().ok_or(ImageError::DimensionOverflow)?;
        if data.len() < required {
            return Err(ImageError::DestinationBufferTooSmall(data.len(), required));
        }

        Ok(Self {
            data: &mut data[..required],
            size,
        })
    }

    /// The logical size of the image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// The `width * height` addressed bytes.
    pub fn as_slice(&self) -> &[u8] {
        &*self.data
    }

    /// The `width * height` addressed bytes, mutably.
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    /// Row `r` of the destination, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `r >= height`.
    pub fn row_mut(&mut self, r: usize) -> &mut [u8] {
        assert!(r < self.size.height, "row index out of bounds");
        let start = r * self.size.width;
        &mut self.data[start..start + self.size.width]
    }

    /// Set every addressed byte to `val`.
    pub fn fill(&mut self, val: u8) {
        self.data.fill(val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_view_rows() -> Result<(), ImageError> {
        let data = [1u8, 2, 9, 9, 3, 4, 9, 9];
        let view = StridedImage::new(&data, [2, 2].into(), 4)?;
        assert_eq!(view.stride(), 4);
        assert!(!view.is_packed());
        assert_eq!(view.rows().collect::<Vec<_>>(), vec![&[1u8, 2][..], &[3u8, 4][..]]);
        assert_eq!(view.get(1, 1), Some(4));
        assert_eq!(view.get(2, 1), None);
        Ok(())
    }

    #[test]
    fn strided_view_last_row_without_padding() -> Result<(), ImageError> {
        let data = [1u8, 2, 9, 9, 3, 4];
        let view = StridedImage::new(&data, [2, 2].into(), 4)?;
        assert_eq!(view.row(1), &[3, 4]);
        Ok(())
    }

    #[test]
    fn strided_view_rejects_bad_inputs() {
        let data = [0u8; 8];
        assert_eq!(
            StridedImage::new(&data, [0, 2].into(), 4).err(),
            Some(ImageError::InvalidImageDimensions(0, 2))
        );
        assert_eq!(
            StridedImage::new(&data, [2, 0].into(), 4).err(),
            Some(ImageError::InvalidImageDimensions(2, 0))
        );
        assert_eq!(
            StridedImage::new(&data, [4, 2].into(), 3).err(),
            Some(ImageError::InvalidStride(3, 4))
        );
        assert_eq!(
            StridedImage::new(&data[..5], [2, 2].into(), 4).err(),
            Some(ImageError::SourceBufferTooSmall(5, 6))
        );
        assert_eq!(
            StridedImage::new(&data, [2, usize::MAX].into(), usize::MAX / 2).err(),
            Some(ImageError::DimensionOverflow)
        );
    }

    #[test]
    fn packed_view_writes_only_addressed_bytes() -> Result<(), ImageError> {
        let mut data = [7u8; 6];
        {
            let mut view = PackedImageMut::new(&mut data, [2, 2].into())?;
            assert_eq!(view.as_slice().len(), 4);
            view.fill(0);
            view.row_mut(1).copy_from_slice(&[5, 6]);
        }
        assert_eq!(data, [0, 0, 5, 6, 7, 7]);
        Ok(())
    }

    #[test]
    fn packed_view_rejects_bad_inputs() {
        let mut data = [0u8; 3];
        assert_eq!(
            PackedImageMut::new(&mut data, [2, 2].into()).err(),
            Some(ImageError::DestinationBufferTooSmall(3, 4))
        );
        assert_eq!(
            PackedImageMut::new(&mut data, [0, 2].into()).err(),
            Some(ImageError::InvalidImageDimensions(0, 2))
        );
    }
}
