use argh::FromArgs;
use std::path::PathBuf;
use std::time::Instant;

use edge_detector_image::ImageSize;
use edge_detector_imgproc::{
    edges::CannyParams,
    filter::GradientNorm,
    process_image, process_image_with,
    transform::CannyTransform,
    ActiveTransform, ImageTransform,
};

#[derive(FromArgs)]
/// Run the edge detector on an image file laid out as a padded camera plane
struct Args {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output grayscale image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// extra bytes appended to every row of the simulated plane
    #[argh(option, default = "16")]
    padding: usize,

    /// low hysteresis threshold, implies the canny backend
    #[argh(option)]
    low: Option<f32>,

    /// high hysteresis threshold, implies the canny backend
    #[argh(option)]
    high: Option<f32>,

    /// use the L2 gradient magnitude, implies the canny backend
    #[argh(switch)]
    l2: bool,
}

/// Copy packed rows into a buffer whose rows are `stride` bytes apart.
fn pad_rows(packed: &[u8], size: ImageSize, stride: usize) -> Vec<u8> {
    // the padding holds garbage on a real device
    let mut plane = vec![0xA5u8; stride * size.height];
    for (dst, src) in plane
        .chunks_exact_mut(stride)
        .zip(packed.chunks_exact(size.width))
    {
        dst[..size.width].copy_from_slice(src);
    }
    plane
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let gray = image::open(&args.input)?.to_luma8();
    let size = ImageSize {
        width: gray.width() as usize,
        height: gray.height() as usize,
    };
    if !size.is_valid() {
        return Err(format!("{} is an empty image", args.input.display()).into());
    }
    let stride = size.width + args.padding;
    log::info!(
        "loaded {} as a {} plane with stride {}",
        args.input.display(),
        size,
        stride
    );

    let plane = pad_rows(gray.as_raw(), size, stride);
    let mut output = vec![0u8; size.width * size.height];

    let custom = args.low.is_some() || args.high.is_some() || args.l2;
    let start = Instant::now();
    let backend = if custom {
        let defaults = CannyParams::default();
        let params = CannyParams::new(
            args.low.unwrap_or(defaults.low_threshold),
            args.high.unwrap_or(defaults.high_threshold),
        )
        .with_norm(if args.l2 {
            GradientNorm::L2
        } else {
            GradientNorm::L1
        });
        process_image_with(
            &CannyTransform::new(params),
            &plane,
            size.width,
            size.height,
            stride,
            &mut output,
        )?;
        CannyTransform::NAME
    } else {
        process_image(&plane, size.width, size.height, stride, &mut output)?;
        ActiveTransform::NAME
    };
    log::info!("{} backend took {:?}", backend, start.elapsed());

    let result = image::GrayImage::from_raw(gray.width(), gray.height(), output)
        .ok_or("output buffer does not match the image size")?;
    result.save(&args.output)?;
    log::info!("saved {}", args.output.display());

    Ok(())
}
