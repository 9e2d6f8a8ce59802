//! Preprocessing pipeline turning decoded scans into normalized tensors.
//!
//! The default pipeline mirrors the preprocessing the ADNI classification
//! models were trained with: grayscale collapse, exact resize to 256x240,
//! CHW float conversion, and an affine normalization to [-1, 1].

use image::imageops::FilterType;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{IMAGE_HEIGHT, IMAGE_WIDTH};

/// A preprocessed scan in CHW layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTensor {
    /// Flattened pixel data, channel-major
    pub data: Vec<f32>,
    /// Number of channels
    pub channels: usize,
    /// Height in pixels
    pub height: usize,
    /// Width in pixels
    pub width: usize,
}

impl ImageTensor {
    /// Creates a tensor from raw CHW data.
    pub fn new(data: Vec<f32>, channels: usize, height: usize, width: usize) -> Self {
        debug_assert_eq!(data.len(), channels * height * width);
        Self {
            data,
            channels,
            height,
            width,
        }
    }

    /// Shape as `[channels, height, width]`
    pub fn shape(&self) -> [usize; 3] {
        [self.channels, self.height, self.width]
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the tensor holds no data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consumes the tensor, returning the flattened data
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }
}

/// A preprocessing stage from decoded image to tensor.
///
/// `AdniDataset` applies its pipeline on every access; supplying a custom
/// implementation replaces the default pipeline wholesale.
pub trait Transform: Send + Sync {
    /// Runs the pipeline on a decoded image.
    fn apply(&self, image: DynamicImage) -> Result<ImageTensor>;

    /// Output shape for a conforming input, `[channels, height, width]`.
    fn output_shape(&self) -> [usize; 3];
}

/// Configuration for the default preprocessing pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Whether to collapse color channels to one
    pub grayscale: bool,
    /// Target height in pixels
    pub target_height: u32,
    /// Target width in pixels
    pub target_width: u32,
    /// Per-channel normalization mean
    pub mean: f32,
    /// Per-channel normalization standard deviation
    pub std: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            grayscale: true,
            target_height: IMAGE_HEIGHT,
            target_width: IMAGE_WIDTH,
            // Maps [0, 1] pixel values to [-1, 1]
            mean: 0.5,
            std: 0.5,
        }
    }
}

/// The default scan preprocessor: grayscale, resize, tensor, normalize.
#[derive(Debug, Clone, Default)]
pub struct DefaultTransform {
    config: TransformConfig,
}

impl DefaultTransform {
    /// Creates a pipeline with the given configuration
    pub fn new(config: TransformConfig) -> Self {
        Self { config }
    }

    /// The pipeline's configuration
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    fn normalize(&self, value: u8) -> f32 {
        (value as f32 / 255.0 - self.config.mean) / self.config.std
    }
}

impl Transform for DefaultTransform {
    fn apply(&self, image: DynamicImage) -> Result<ImageTensor> {
        let image = if self.config.grayscale {
            image.grayscale()
        } else {
            image
        };

        let resized = image.resize_exact(
            self.config.target_width,
            self.config.target_height,
            FilterType::Triangle,
        );

        let height = self.config.target_height as usize;
        let width = self.config.target_width as usize;

        if self.config.grayscale {
            let gray = resized.to_luma8();
            let data: Vec<f32> = gray.pixels().map(|p| self.normalize(p[0])).collect();
            Ok(ImageTensor::new(data, 1, height, width))
        } else {
            let rgb = resized.to_rgb8();
            // CHW: one full plane per channel
            let mut data = Vec::with_capacity(3 * height * width);
            for channel in 0..3 {
                for pixel in rgb.pixels() {
                    data.push(self.normalize(pixel[channel]));
                }
            }
            Ok(ImageTensor::new(data, 3, height, width))
        }
    }

    fn output_shape(&self) -> [usize; 3] {
        let channels = if self.config.grayscale { 1 } else { 3 };
        [
            channels,
            self.config.target_height as usize,
            self.config.target_width as usize,
        ]
    }
}
