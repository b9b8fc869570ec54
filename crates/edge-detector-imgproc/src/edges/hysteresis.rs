use edge_detector_image::{Image, ImageError, PackedImageMut};

use super::EDGE;

/// Classify the suppressed magnitudes with two thresholds.
///
/// Pixels above `high_threshold` are edges. Pixels above `low_threshold` are
/// edges only when 8-connected, possibly through other such pixels, to a pixel
/// above `high_threshold`. Every other pixel is set to `0`.
///
/// The result does not depend on the visiting order: it is the union of the
/// connected components of weak pixels that contain a strong one.
///
/// # Arguments
///
/// * `suppressed` - The magnitudes after non-maximum suppression.
/// * `low_threshold` - The lower threshold.
/// * `high_threshold` - The upper threshold.
/// * `dst` - The packed edge map with the same size as `suppressed`.
pub fn hysteresis(
    suppressed: &Image<f32>,
    low_threshold: f32,
    high_threshold: f32,
    dst: &mut PackedImageMut<'_>,
) -> Result<(), ImageError> {
    suppressed.check_same_size(dst.size())?;

    let cols = suppressed.cols();
    let rows = suppressed.rows();
    let mag = suppressed.as_slice();

    let out = dst.as_slice_mut();
    out.fill(0);

    // seed with the strong pixels
    let mut stack = Vec::new();
    for (idx, &m) in mag.iter().enumerate() {
        if m > high_threshold {
            out[idx] = EDGE;
            stack.push(idx);
        }
    }

    while let Some(idx) = stack.pop() {
        let x = idx % cols;
        let y = idx / cols;

        for ny in y.saturating_sub(1)..=(y + 1).min(rows - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(cols - 1) {
                let n = ny * cols + nx;
                if out[n] == 0 && mag[n] > low_threshold {
                    out[n] = EDGE;
                    stack.push(n);
                }
            }
        }
    }

    Ok(())
}
