//! # ADNI Dataset
//!
//! A Rust library for loading the ADNI brain-scan dataset with the Burn framework.
//! The dataset consists of grayscale JPEG brain scans (256x240 pixels) organised
//! into AD (Alzheimer's Disease) and NC (Normal Control) categories:
//!
//! ```text
//! root/
//! ├── train/
//! │   ├── AD/*.jpeg
//! │   └── NC/*.jpeg
//! └── test/
//!     ├── AD/*.jpeg
//!     └── NC/*.jpeg
//! ```
//!
//! ## Modules
//!
//! - `dataset`: index construction, preprocessing pipeline, and Burn integration
//! - `utils`: logging helpers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use adni_dataset::AdniDataset;
//!
//! let dataset = AdniDataset::new("data/adni")?;
//! let (tensor, label) = dataset.get(0)?;
//! assert_eq!(tensor.shape(), [1, 256, 240]);
//! ```

pub mod dataset;
pub mod error;
pub mod utils;

// Re-export commonly used items for convenience
pub use dataset::burn_dataset::{AdniBatch, AdniBatcher, AdniBurnDataset, AdniItem};
pub use dataset::loader::{AdniDataset, DatasetStats, ImageSample};
pub use dataset::transform::{DefaultTransform, ImageTensor, Transform, TransformConfig};
pub use dataset::Category;
pub use error::{Error, Result};

/// Number of classes (AD and NC)
pub const NUM_CLASSES: usize = 2;

/// Height of ADNI scan slices in pixels
pub const IMAGE_HEIGHT: u32 = 256;

/// Width of ADNI scan slices in pixels
pub const IMAGE_WIDTH: u32 = 240;

/// Default split used when none is given
pub const DEFAULT_SPLIT: &str = "train";

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
