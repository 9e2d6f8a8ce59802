//! Dataset module for ADNI data handling
//!
//! This module provides functionality for:
//! - Building a (path, label) index from the on-disk AD/NC layout
//! - Decoding and preprocessing scans into normalized tensors
//! - Burn `Dataset`/`Batcher` integration for training loops
//!
//! ## Directory convention
//!
//! Labels come from the directory structure, not from metadata files:
//! everything under `root/{split}/AD` is label 0, everything under
//! `root/{split}/NC` is label 1. Only `.jpeg` and `.jpg` files (exact,
//! lowercase extensions) are indexed.

pub mod burn_dataset;
pub mod loader;
pub mod transform;

// Re-export main types for convenience
pub use burn_dataset::{AdniBatch, AdniBatcher, AdniBurnDataset, AdniItem};
pub use loader::{AdniDataset, DatasetStats, ImageSample};
pub use transform::{DefaultTransform, ImageTensor, Transform, TransformConfig};

use serde::{Deserialize, Serialize};

/// Diagnostic category of a scan, as encoded by its parent directory.
///
/// The tag-to-label mapping is a fixed convention of the ADNI layout:
/// `AD` is 0, `NC` is 1. Categories are always scanned in `ALL` order,
/// so AD samples precede NC samples in the index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    /// Alzheimer's Disease
    Ad,
    /// Normal Control
    Nc,
}

impl Category {
    /// Fixed scan order for index construction
    pub const ALL: [Category; 2] = [Category::Ad, Category::Nc];

    /// Directory name holding this category's scans
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Ad => "AD",
            Category::Nc => "NC",
        }
    }

    /// Integer label assigned to this category
    pub fn label(&self) -> usize {
        match self {
            Category::Ad => 0,
            Category::Nc => 1,
        }
    }

    /// Look up the category for a label index
    pub fn from_label(label: usize) -> Option<Category> {
        match label {
            0 => Some(Category::Ad),
            1 => Some(Category::Nc),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::Ad.label(), 0);
        assert_eq!(Category::Nc.label(), 1);
    }

    #[test]
    fn test_category_dir_names() {
        assert_eq!(Category::Ad.dir_name(), "AD");
        assert_eq!(Category::Nc.dir_name(), "NC");
    }

    #[test]
    fn test_category_from_label() {
        assert_eq!(Category::from_label(0), Some(Category::Ad));
        assert_eq!(Category::from_label(1), Some(Category::Nc));
        assert_eq!(Category::from_label(2), None);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Ad.to_string(), "AD");
        assert_eq!(Category::Nc.to_string(), "NC");
    }

    #[test]
    fn test_scan_order() {
        assert_eq!(Category::ALL[0], Category::Ad);
        assert_eq!(Category::ALL[1], Category::Nc);
    }
}
