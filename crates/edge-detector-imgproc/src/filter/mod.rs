//! Filter operations
//!
//! This module provides the derivative filters used by the edge detector.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;
