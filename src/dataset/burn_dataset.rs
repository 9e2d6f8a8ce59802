//! Burn integration for the ADNI dataset.
//!
//! Adapts [`AdniDataset`] to Burn's `Dataset` trait and provides a batcher
//! that stacks preprocessed scans into `[batch, 1, 256, 240]` tensors for a
//! training loop's dataloader.

use burn::data::dataloader::batcher::Batcher;
use burn::data::dataset::Dataset;
use burn::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dataset::loader::AdniDataset;
use crate::{IMAGE_HEIGHT, IMAGE_WIDTH};

/// A single preprocessed scan ready for batching
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdniItem {
    /// Scan data as flattened CHW float array
    pub image: Vec<f32>,
    /// Class label (0 for AD, 1 for NC)
    pub label: usize,
    /// Source path, kept for debugging and logging
    pub path: String,
}

/// ADNI dataset implementing Burn's `Dataset` trait.
///
/// Scans are decoded on demand; dataloader workers share the immutable index
/// through `&self`, so concurrent reads need no coordination.
pub struct AdniBurnDataset {
    dataset: AdniDataset,
}

impl AdniBurnDataset {
    /// Wraps an indexed dataset for Burn consumption
    pub fn new(dataset: AdniDataset) -> Self {
        Self { dataset }
    }

    /// The underlying indexed dataset
    pub fn inner(&self) -> &AdniDataset {
        &self.dataset
    }
}

impl Dataset<AdniItem> for AdniBurnDataset {
    fn get(&self, index: usize) -> Option<AdniItem> {
        let path = self.dataset.sample(index)?.path.clone();

        match self.dataset.get(index) {
            Ok((tensor, label)) => Some(AdniItem {
                image: tensor.into_data(),
                label,
                path: path.to_string_lossy().to_string(),
            }),
            Err(err) => {
                warn!("Dropping scan {:?}: {}", path, err);
                None
            }
        }
    }

    fn len(&self) -> usize {
        self.dataset.len()
    }
}

/// A batch of scans for training
#[derive(Clone, Debug)]
pub struct AdniBatch<B: Backend> {
    /// Batch of scans with shape [batch_size, 1, height, width]
    pub images: Tensor<B, 4>,
    /// Batch of labels with shape [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

/// Batcher stacking preprocessed scans into training batches.
///
/// Items arrive already normalized by the dataset's pipeline, so the batcher
/// only reshapes and stacks.
#[derive(Clone, Debug)]
pub struct AdniBatcher<B: Backend> {
    device: B::Device,
    height: usize,
    width: usize,
}

impl<B: Backend> AdniBatcher<B> {
    /// Create a new batcher for the given device
    pub fn new(device: B::Device) -> Self {
        Self {
            device,
            height: IMAGE_HEIGHT as usize,
            width: IMAGE_WIDTH as usize,
        }
    }

    /// Create a batcher for a custom scan size
    pub fn with_size(device: B::Device, height: usize, width: usize) -> Self {
        Self {
            device,
            height,
            width,
        }
    }
}

impl<B: Backend> Batcher<AdniItem, AdniBatch<B>> for AdniBatcher<B> {
    fn batch(&self, items: Vec<AdniItem>) -> AdniBatch<B> {
        let batch_size = items.len();

        let images_data: Vec<f32> = items.iter().flat_map(|item| item.image.clone()).collect();
        let images = Tensor::<B, 4>::from_floats(
            TensorData::new(images_data, [batch_size, 1, self.height, self.width]),
            &self.device,
        );

        let targets_data: Vec<i64> = items.iter().map(|item| item.label as i64).collect();
        let targets = Tensor::<B, 1, Int>::from_data(
            TensorData::new(targets_data, [batch_size]),
            &self.device,
        );

        AdniBatch { images, targets }
    }
}
