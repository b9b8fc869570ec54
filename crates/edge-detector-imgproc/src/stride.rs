use edge_detector_image::{ImageError, PackedImageMut, StridedImage};

/// Copy a strided image into a packed buffer, dropping the row padding.
///
/// A packed source is copied as a single block, otherwise every row copies
/// its `width` valid samples and skips the `stride - width` padding bytes.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `dst` - The packed destination with the same size as `src`.
///
/// # Examples
///
/// ```
/// use edge_detector_image::{ImageSize, PackedImageMut, StridedImage};
/// use edge_detector_imgproc::stride::remove_stride;
///
/// let size = ImageSize { width: 2, height: 2 };
/// let src = [1u8, 2, 0, 0, 3, 4, 0, 0];
/// let mut dst = [0u8; 4];
///
/// remove_stride(
///     &StridedImage::new(&src, size, 4).unwrap(),
///     &mut PackedImageMut::new(&mut dst, size).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(dst, [1, 2, 3, 4]);
/// ```
pub fn remove_stride(
    src: &StridedImage<'_>,
    dst: &mut PackedImageMut<'_>,
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

    if src.is_packed() {
        let len = dst.as_slice().len();
        dst.as_slice_mut().copy_from_slice(&src.as_slice()[..len]);
        return Ok(());
    }

    dst.as_slice_mut()
        .chunks_exact_mut(size.width)
        .zip(src.rows())
        .for_each(|(dst_row, src_row)| dst_row.copy_from_slice(src_row));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_detector_image::ImageSize;
    use rand::{Rng, SeedableRng};

    fn run(data: &[u8], size: ImageSize, stride: usize) -> Result<Vec<u8>, ImageError> {
        let src = StridedImage::new(data, size, stride)?;
        let mut out = vec![0u8; size.width * size.height];
        remove_stride(&src, &mut PackedImageMut::new(&mut out, size)?)?;
        Ok(out)
    }

    #[test]
    fn test_remove_stride_padding() -> Result<(), ImageError> {
        let (a, b, c, d, x) = (10, 20, 30, 40, 0xEE);
        let out = run(&[a, b, x, x, c, d, x, x], [2, 2].into(), 4)?;
        assert_eq!(out, vec![a, b, c, d]);
        Ok(())
    }

    #[test]
    fn test_remove_stride_packed_identity() -> Result<(), ImageError> {
        let data = (0..12u8).collect::<Vec<_>>();
        assert_eq!(run(&data, [4, 3].into(), 4)?, data);
        Ok(())
    }

    #[test]
    fn test_remove_stride_packed_with_trailing_bytes() -> Result<(), ImageError> {
        let data = [1u8, 2, 3, 4, 99, 99];
        assert_eq!(run(&data, [2, 2].into(), 2)?, vec![1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_remove_stride_random() -> Result<(), ImageError> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let width = rng.random_range(1..16);
            let height = rng.random_range(1..16);
            let stride = width + rng.random_range(0..8);
            let data = (0..stride * height).map(|_| rng.random()).collect::<Vec<u8>>();

            let out = run(&data, ImageSize { width, height }, stride)?;

            for r in 0..height {
                for c in 0..width {
                    assert_eq!(out[r * width + c], data[r * stride + c]);
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_remove_stride_single_column() -> Result<(), ImageError> {
        let out = run(&[1, 0, 0, 2, 0, 0, 3], [1, 3].into(), 3)?;
        assert_eq!(out, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_remove_stride_size_mismatch() -> Result<(), ImageError> {
        let data = [0u8; 4];
        let src = StridedImage::new(&data, [2, 2].into(), 2)?;
        let mut out = [5u8; 4];
        let res = remove_stride(&src, &mut PackedImageMut::new(&mut out, [4, 1].into())?);
        assert_eq!(res, Err(ImageError::InvalidImageSize(4, 1, 2, 2)));
        assert_eq!(out, [5; 4]);
        Ok(())
    }
}
