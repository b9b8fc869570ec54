#![deny(missing_docs)]
//! Image types for single-channel 8-bit buffers with row padding.

/// owned single-channel image planes and image geometry.
pub mod image;

/// borrowed views over host-owned buffers.
pub mod view;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
pub use crate::view::{PackedImageMut, StridedImage};
