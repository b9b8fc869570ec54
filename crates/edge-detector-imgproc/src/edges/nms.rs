use edge_detector_image::{Image, ImageError};

const TAN_22_5_DEG: f32 = 0.414_213_57;
const TAN_67_5_DEG: f32 = 2.414_213_6;

/// Keep the gradient magnitudes that are a local maximum along the gradient direction.
///
/// The direction is quantized in four bins (0°, 45°, 90°, 135°). Along the
/// horizontal and vertical bins a pixel must be strictly greater than the
/// neighbour before it and not smaller than the one after it, so that a
/// plateau two pixels wide keeps exactly one pixel. Along the diagonals it
/// must be strictly greater than both. Magnitudes outside the image count as
/// zero.
///
/// # Arguments
///
/// * `dx` - The horizontal derivative.
/// * `dy` - The vertical derivative.
/// * `magnitude` - The gradient magnitude.
/// * `low_threshold` - Pixels whose magnitude is not above it are dropped.
/// * `dst` - The kept magnitudes, zero elsewhere.
pub fn non_maximum_suppression(
    dx: &Image<f32>,
    dy: &Image<f32>,
    magnitude: &Image<f32>,
    low_threshold: f32,
    dst: &mut Image<f32>,
) -> Result<(), ImageError> {
    dx.check_same_size(magnitude.size())?;
    dy.check_same_size(magnitude.size())?;
    dst.check_same_size(magnitude.size())?;

    let cols = magnitude.cols() as isize;
    let rows = magnitude.rows() as isize;
    let mag = magnitude.as_slice();

    let mag_at = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= cols || y >= rows {
            0.0
        } else {
            mag[(y * cols + x) as usize]
        }
    };

    let gradients = dx.as_slice().iter().zip(dy.as_slice().iter());

    for (idx, (out, (&gx, &gy))) in dst.as_slice_mut().iter_mut().zip(gradients).enumerate() {
        let m = mag[idx];
        if m <= low_threshold {
            *out = 0.0;
            continue;
        }

        let x = idx as isize % cols;
        let y = idx as isize / cols;
        let abs_gx = gx.abs();
        let abs_gy = gy.abs();

        let is_max = if abs_gy < abs_gx * TAN_22_5_DEG {
            m > mag_at(x - 1, y) && m >= mag_at(x + 1, y)
        } else if abs_gy > abs_gx * TAN_67_5_DEG {
            m > mag_at(x, y - 1) && m >= mag_at(x, y + 1)
        } else {
            // the gradient points down-right when both derivatives share a sign
            let s = if (gx < 0.0) != (gy < 0.0) { -1 } else { 1 };
            m > mag_at(x - s, y - 1) && m > mag_at(x + s, y + 1)
        };

        *out = if is_max { m } else { 0.0 };
    }

    Ok(())
}
