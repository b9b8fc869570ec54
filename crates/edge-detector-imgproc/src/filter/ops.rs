use edge_detector_image::{Image, ImageError, StridedImage};

use super::kernels;

/// Compute the response of both 3x3 kernels at one pixel.
///
/// # Arguments
///
/// * `window` - The three source rows centered on the current row
/// * `kernel_x` - 3x3 kernel for the horizontal derivative
/// * `kernel_y` - 3x3 kernel for the vertical derivative
/// * `col` - current col idx in source image
/// * `col_pos_bias` - maps the column index and the kernel x index to the real column to read
#[inline]
fn filter_kernel3_pix_calc<FC: Fn(usize, usize) -> usize>(
    window: &[&[u8]; 3],
    kernel_x: &[[f32; 3]; 3],
    kernel_y: &[[f32; 3]; 3],
    col: usize,
    col_pos_bias: FC,
) -> (f32, f32) {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for (dy, src_row) in window.iter().enumerate() {
        for dx in 0..3 {
            let val = src_row[col_pos_bias(col, dx)] as f32;
            sum_x += val * kernel_x[dy][dx];
            sum_y += val * kernel_y[dy][dx];
        }
    }
    (sum_x, sum_y)
}

/// Compute one row of both derivatives with replicated borders.
///
/// The first and the last column clamp their reads, the interior columns
/// index the window directly.
fn filter_kernel3_row_calc(
    window: &[&[u8]; 3],
    kernel_x: &[[f32; 3]; 3],
    kernel_y: &[[f32; 3]; 3],
    dx_row: &mut [f32],
    dy_row: &mut [f32],
) {
    let cols = dx_row.len();
    let replicate = |c: usize, k: usize| (c + k).clamp(1, cols) - 1;

    (dx_row[0], dy_row[0]) = filter_kernel3_pix_calc(window, kernel_x, kernel_y, 0, replicate);

    for c in 1..cols.saturating_sub(1) {
        (dx_row[c], dy_row[c]) =
            filter_kernel3_pix_calc(window, kernel_x, kernel_y, c, |c, k| c + k - 1);
    }

    if cols > 1 {
        let c = cols - 1;
        (dx_row[c], dy_row[c]) = filter_kernel3_pix_calc(window, kernel_x, kernel_y, c, replicate);
    }
}

/// Compute the first order image derivative in both x and y using a Sobel operator.
///
/// Pixels outside the image replicate the nearest edge pixel, so images of a
/// single row or column are supported.
///
/// # Arguments
///
/// * `src` - The source image, rows read through its stride.
/// * `dx` - The horizontal derivative with the same size as `src`.
/// * `dy` - The vertical derivative with the same size as `src`.
///
/// # Errors
///
/// Returns an error if `dx` or `dy` do not match the size of `src`.
pub fn spatial_gradient(
    src: &StridedImage<'_>,
    dx: &mut Image<f32>,
    dy: &mut Image<f32>,
) -> Result<(), ImageError> {
    dx.check_same_size(src.size())?;
    dy.check_same_size(src.size())?;

    let (sobel_x, sobel_y) = kernels::sobel_kernel3();
    let rows = src.height();
    let cols = src.width();

    dx.as_slice_mut()
        .chunks_exact_mut(cols)
        .zip(dy.as_slice_mut().chunks_exact_mut(cols))
        .enumerate()
        .for_each(|(r, (dx_row, dy_row))| {
            let window = [
                src.row(r.max(1) - 1),
                src.row(r),
                src.row((r + 2).clamp(1, rows) - 1),
            ];
            filter_kernel3_row_calc(&window, &sobel_x, &sobel_y, dx_row, dy_row);
        });

    Ok(())
}

/// The norm used to combine the two derivatives into a gradient magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientNorm {
    /// `|dx| + |dy|`
    #[default]
    L1,
    /// `sqrt(dx² + dy²)`
    L2,
}

/// Compute the gradient magnitude from the image derivatives.
///
/// # Arguments
///
/// * `dx` - The horizontal derivative.
/// * `dy` - The vertical derivative with the same size as `dx`.
/// * `dst` - The magnitude with the same size as `dx`.
/// * `norm` - The norm used to combine both derivatives.
pub fn gradient_magnitude(
    dx: &Image<f32>,
    dy: &Image<f32>,
    dst: &mut Image<f32>,
    norm: GradientNorm,
) -> Result<(), ImageError> {
    dy.check_same_size(dx.size())?;
    dst.check_same_size(dx.size())?;

    let pixels = dst
        .as_slice_mut()
        .iter_mut()
        .zip(dx.as_slice().iter())
        .zip(dy.as_slice().iter());

    match norm {
        GradientNorm::L1 => pixels.for_each(|((dst, &gx), &gy)| *dst = gx.abs() + gy.abs()),
        GradientNorm::L2 => pixels.for_each(|((dst, &gx), &gy)| *dst = (gx * gx + gy * gy).sqrt()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use edge_detector_image::ImageSize;

    #[test]
    fn test_spatial_gradient_ramp() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 3,
        };

        // horizontal ramp 0, 10, 20, 30 on every row
        let img = Image::new(size, (0..12).map(|i| (i % 4 * 10) as u8).collect())?;

        let mut dx = Image::<f32>::zeros(size)?;
        let mut dy = Image::<f32>::zeros(size)?;
        spatial_gradient(&img.as_strided(), &mut dx, &mut dy)?;

        #[rustfmt::skip]
        let expected_dx = [
            40.0, 80.0, 80.0, 40.0,
            40.0, 80.0, 80.0, 40.0,
            40.0, 80.0, 80.0, 40.0,
        ];
        for (&a, &b) in dx.as_slice().iter().zip(expected_dx.iter()) {
            assert_relative_eq!(a, b);
        }
        assert!(dy.as_slice().iter().all(|&v| v == 0.0));

        Ok(())
    }

    #[test]
    fn test_spatial_gradient_vertical_ramp() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 3,
        };

        let img = Image::new(size, vec![0u8, 0, 5, 5, 10, 10])?;
        let mut dx = Image::<f32>::zeros(size)?;
        let mut dy = Image::<f32>::zeros(size)?;
        spatial_gradient(&img.as_strided(), &mut dx, &mut dy)?;

        assert_eq!(dy.as_slice(), &[20.0, 20.0, 40.0, 40.0, 20.0, 20.0]);
        assert!(dx.as_slice().iter().all(|&v| v == 0.0));

        Ok(())
    }

    #[test]
    fn test_spatial_gradient_single_pixel() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 1,
            height: 1,
        };

        let img = Image::new(size, vec![42u8])?;
        let mut dx = Image::<f32>::zeros(size)?;
        let mut dy = Image::<f32>::zeros(size)?;
        spatial_gradient(&img.as_strided(), &mut dx, &mut dy)?;

        assert_eq!(dx.as_slice(), &[0.0]);
        assert_eq!(dy.as_slice(), &[0.0]);

        Ok(())
    }

    #[test]
    fn test_spatial_gradient_reads_through_stride() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };

        // padding bytes would create a strong response if they were read
        let data = [0u8, 0, 90, 255, 255, 0, 0, 90];
        let src = StridedImage::new(&data, size, 5)?;

        let mut dx = Image::<f32>::zeros(size)?;
        let mut dy = Image::<f32>::zeros(size)?;
        spatial_gradient(&src, &mut dx, &mut dy)?;

        assert_eq!(dx.as_slice(), &[0.0, 360.0, 360.0, 0.0, 360.0, 360.0]);
        assert!(dy.as_slice().iter().all(|&v| v == 0.0));

        Ok(())
    }

    #[test]
    fn test_spatial_gradient_size_mismatch() -> Result<(), ImageError> {
        let img = Image::<u8>::zeros([3, 3].into())?;
        let mut dx = Image::<f32>::zeros([3, 2].into())?;
        let mut dy = Image::<f32>::zeros([3, 3].into())?;

        let res = spatial_gradient(&img.as_strided(), &mut dx, &mut dy);
        assert_eq!(res, Err(ImageError::InvalidImageSize(3, 3, 3, 2)));

        Ok(())
    }

    #[test]
    fn test_gradient_magnitude() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 1,
        };

        let dx = Image::new(size, vec![3.0, -3.0, 0.0])?;
        let dy = Image::new(size, vec![4.0, -4.0, -2.0])?;
        let mut mag = Image::<f32>::zeros(size)?;

        gradient_magnitude(&dx, &dy, &mut mag, GradientNorm::L1)?;
        assert_eq!(mag.as_slice(), &[7.0, 7.0, 2.0]);

        gradient_magnitude(&dx, &dy, &mut mag, GradientNorm::L2)?;
        assert_relative_eq!(mag.as_slice()[0], 5.0);
        assert_relative_eq!(mag.as_slice()[1], 5.0);
        assert_relative_eq!(mag.as_slice()[2], 2.0);

        Ok(())
    }
}
