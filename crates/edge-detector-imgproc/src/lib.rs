#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// edge detection module.
pub mod edges;

/// image filtering module.
pub mod filter;

/// stride normalization module.
pub mod stride;

/// backend selection and the buffer-level entry point.
pub mod transform;

pub use transform::{process_image, process_image_with, ActiveTransform, ImageTransform};
