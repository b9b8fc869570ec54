/// Create the 3x3 sobel kernels.
///
/// The kernels are not normalized so that the response of an 8-bit image is
/// an exact integer in `[-1020, 1020]`.
///
/// # Returns
///
/// The kernels for the horizontal and the vertical derivative, indexed as `[row][col]`.
pub fn sobel_kernel3() -> ([[f32; 3]; 3], [[f32; 3]; 3]) {
    let sobel_x = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
    let sobel_y = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
    (sobel_x, sobel_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sobel_kernel3() {
        let (kernel_x, kernel_y) = sobel_kernel3();

        // the vertical kernel is the transpose of the horizontal one
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(kernel_x[r][c], kernel_y[c][r]);
            }
        }

        assert_eq!(kernel_x.iter().flatten().sum::<f32>(), 0.0);
        assert_eq!(kernel_x[1], [-2.0, 0.0, 2.0]);
    }
}
