//! ADNI index construction and per-index scan access.
//!
//! The index is built eagerly at construction by walking the two category
//! directories of a split, and is immutable afterwards; reconstructing the
//! dataset is the only way to pick up filesystem changes.

use std::fmt;
use std::path::{Path, PathBuf};

use image::ImageReader;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::dataset::transform::{DefaultTransform, ImageTensor, Transform};
use crate::dataset::Category;
use crate::error::{Error, Result};
use crate::DEFAULT_SPLIT;

/// A single indexed scan with its label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSample {
    /// Path to the scan file
    pub path: PathBuf,
    /// Diagnostic category, derived from the parent directory
    pub category: Category,
    /// Integer label (0 for AD, 1 for NC)
    pub label: usize,
}

/// ADNI brain-scan dataset with lazy per-index decoding.
///
/// Construction materializes the full (path, label) index; access decodes one
/// scan from disk and runs it through the preprocessing pipeline. The index
/// never changes after construction, so shared read-only access from multiple
/// loader workers is safe.
pub struct AdniDataset {
    root: PathBuf,
    split: String,
    samples: Vec<ImageSample>,
    transform: Box<dyn Transform>,
}

impl AdniDataset {
    /// Creates a dataset over the `train` split with the default pipeline.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_split(root, DEFAULT_SPLIT)
    }

    /// Creates a dataset over a named split with the default pipeline.
    pub fn with_split(root: impl Into<PathBuf>, split: &str) -> Result<Self> {
        Self::with_transform(root, split, Box::new(DefaultTransform::default()))
    }

    /// Creates a dataset with a caller-supplied preprocessing pipeline.
    ///
    /// Walks `root/{split}/AD` then `root/{split}/NC`; a missing or unreadable
    /// category directory fails construction with the underlying IO error.
    /// Within a category, samples keep the order the filesystem returns —
    /// no sorting is applied, so cross-platform index order is not guaranteed.
    pub fn with_transform(
        root: impl Into<PathBuf>,
        split: &str,
        transform: Box<dyn Transform>,
    ) -> Result<Self> {
        let root = root.into();
        info!("Indexing ADNI scans under {:?}, split {:?}", root, split);

        let mut samples = Vec::new();
        for category in Category::ALL {
            let dir = root.join(split).join(category.dir_name());
            let before = samples.len();

            for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
                let entry = entry.map_err(std::io::Error::from)?;
                // Extension match is exact and lowercase, as the layout requires
                let name = entry.file_name().to_string_lossy();
                if name.ends_with(".jpeg") || name.ends_with(".jpg") {
                    samples.push(ImageSample {
                        path: entry.into_path(),
                        category,
                        label: category.label(),
                    });
                }
            }

            debug!(
                "Category {} ({:?}): {} scans",
                category,
                dir,
                samples.len() - before
            );
        }

        info!("Indexed {} scans total", samples.len());

        Ok(Self {
            root,
            split: split.to_string(),
            samples,
            transform,
        })
    }

    /// Number of indexed scans. O(1).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Decodes and preprocesses the scan at `index`, returning it with its
    /// label.
    ///
    /// Every call re-decodes from disk; nothing is cached between calls.
    /// Out-of-range indices fail with [`Error::IndexOutOfBounds`], undecodable
    /// files with the propagated [`Error::Image`].
    pub fn get(&self, index: usize) -> Result<(ImageTensor, usize)> {
        let sample = self
            .samples
            .get(index)
            .ok_or(Error::IndexOutOfBounds {
                index,
                len: self.samples.len(),
            })?;

        let image = ImageReader::open(&sample.path)?.decode()?;
        let tensor = self.transform.apply(image)?;

        Ok((tensor, sample.label))
    }

    /// Index metadata without any file I/O
    pub fn sample(&self, index: usize) -> Option<&ImageSample> {
        self.samples.get(index)
    }

    /// The full sample index
    pub fn samples(&self) -> &[ImageSample] {
        &self.samples
    }

    /// Dataset root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Split name this dataset was built over
    pub fn split(&self) -> &str {
        &self.split
    }

    /// The configured preprocessing pipeline
    pub fn transform(&self) -> &dyn Transform {
        self.transform.as_ref()
    }

    /// Sample counts per category, indexed by label
    pub fn class_distribution(&self) -> [usize; 2] {
        let mut counts = [0usize; 2];
        for sample in &self.samples {
            counts[sample.label] += 1;
        }
        counts
    }

    /// Summary statistics for the indexed split
    pub fn stats(&self) -> DatasetStats {
        let counts = self.class_distribution();
        DatasetStats {
            split: self.split.clone(),
            total_samples: self.samples.len(),
            ad_samples: counts[0],
            nc_samples: counts[1],
        }
    }

    /// A seeded permutation of `0..len()` for iteration-order shuffling.
    ///
    /// The index itself stays untouched; callers drive their own traversal
    /// with the returned order.
    pub fn shuffled_indices(&self, seed: u64) -> Vec<usize> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (0..self.samples.len()).collect();
        indices.shuffle(&mut rng);
        indices
    }
}

impl fmt::Debug for AdniDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdniDataset")
            .field("root", &self.root)
            .field("split", &self.split)
            .field("len", &self.samples.len())
            .finish_non_exhaustive()
    }
}

/// Statistics about an indexed split
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub split: String,
    pub total_samples: usize,
    pub ad_samples: usize,
    pub nc_samples: usize,
}

impl DatasetStats {
    /// Print statistics to console
    pub fn print(&self) {
        println!("\nDataset statistics for split '{}':", self.split);
        println!("  Total scans: {}", self.total_samples);

        for (name, count) in [("AD", self.ad_samples), ("NC", self.nc_samples)] {
            let bar_len = if self.total_samples > 0 {
                (count as f32 / self.total_samples as f32 * 40.0) as usize
            } else {
                0
            };
            let bar: String = "█".repeat(bar_len);
            println!("    {:2}  {:5} {}", name, count, bar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_scan(path: &Path) {
        // A simple grayscale gradient, saved as JPEG
        let img = image::ImageBuffer::from_fn(32, 32, |x, _| image::Luma([(x * 8) as u8]));
        img.save(path).unwrap();
    }

    /// root/{train/{AD,NC},test/{AD,NC}} with:
    /// train/AD/a.jpeg, train/AD/b.jpg, train/NC/c.jpeg, test/AD/d.jpeg
    fn fixture_root() -> TempDir {
        let temp = TempDir::new().unwrap();
        for split in ["train", "test"] {
            for category in ["AD", "NC"] {
                fs::create_dir_all(temp.path().join(split).join(category)).unwrap();
            }
        }
        create_test_scan(&temp.path().join("train/AD/a.jpeg"));
        create_test_scan(&temp.path().join("train/AD/b.jpg"));
        create_test_scan(&temp.path().join("train/NC/c.jpeg"));
        create_test_scan(&temp.path().join("test/AD/d.jpeg"));
        temp
    }

    #[test]
    fn test_len_counts_both_categories() {
        let root = fixture_root();
        let dataset = AdniDataset::new(root.path()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_split_selection() {
        let root = fixture_root();
        let dataset = AdniDataset::with_split(root.path(), "test").unwrap();
        assert_eq!(dataset.len(), 1);

        let (_, label) = dataset.get(0).unwrap();
        assert_eq!(label, 0);
    }

    #[test]
    fn test_labels_follow_directories() {
        let root = fixture_root();
        let dataset = AdniDataset::new(root.path()).unwrap();

        for index in 0..dataset.len() {
            let sample = dataset.sample(index).unwrap();
            let expected = if sample.path.to_string_lossy().contains("/AD/") {
                0
            } else {
                1
            };
            assert_eq!(sample.label, expected);
        }
        // AD scans precede NC scans in the index
        assert_eq!(dataset.class_distribution(), [2, 1]);
        assert_eq!(dataset.sample(2).unwrap().category, Category::Nc);
    }

    #[test]
    fn test_non_image_files_ignored() {
        let root = fixture_root();
        fs::write(root.path().join("train/AD/note.txt"), "not a scan").unwrap();

        let dataset = AdniDataset::new(root.path()).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let root = fixture_root();
        create_test_scan(&root.path().join("train/AD/upper.png"));
        fs::rename(
            root.path().join("train/AD/upper.png"),
            root.path().join("train/AD/upper.JPG"),
        )
        .unwrap();

        let dataset = AdniDataset::new(root.path()).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_missing_category_dir_fails_construction() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("train/AD")).unwrap();
        // NC missing

        let result = AdniDataset::new(temp.path());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_get_returns_default_pipeline_tensor() {
        let root = fixture_root();
        let dataset = AdniDataset::new(root.path()).unwrap();

        let (tensor, label) = dataset.get(0).unwrap();
        assert_eq!(tensor.shape(), [1, 256, 240]);
        assert!(tensor.data.iter().all(|&v| (-1.0..=1.0).contains(&v)));
        assert_eq!(label, 0);
    }

    #[test]
    fn test_get_is_idempotent() {
        let root = fixture_root();
        let dataset = AdniDataset::new(root.path()).unwrap();

        let (a, _) = dataset.get(1).unwrap();
        let (b, _) = dataset.get(1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_get_out_of_range() {
        let root = fixture_root();
        let dataset = AdniDataset::new(root.path()).unwrap();

        let result = dataset.get(dataset.len());
        assert!(matches!(
            result,
            Err(Error::IndexOutOfBounds { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_get_undecodable_file() {
        let root = fixture_root();
        fs::write(root.path().join("train/NC/broken.jpeg"), b"not a jpeg").unwrap();

        let dataset = AdniDataset::new(root.path()).unwrap();
        assert_eq!(dataset.len(), 4);

        let broken_index = dataset
            .samples()
            .iter()
            .position(|s| s.path.ends_with("broken.jpeg"))
            .unwrap();
        let result = dataset.get(broken_index);
        assert!(matches!(result, Err(Error::Image(_))));
    }

    #[test]
    fn test_stats() {
        let root = fixture_root();
        let dataset = AdniDataset::new(root.path()).unwrap();

        let stats = dataset.stats();
        assert_eq!(stats.split, "train");
        assert_eq!(stats.total_samples, 3);
        assert_eq!(stats.ad_samples, 2);
        assert_eq!(stats.nc_samples, 1);
    }

    #[test]
    fn test_shuffled_indices_is_a_seeded_permutation() {
        let root = fixture_root();
        let dataset = AdniDataset::new(root.path()).unwrap();

        let a = dataset.shuffled_indices(42);
        let b = dataset.shuffled_indices(42);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);

        // The index itself is untouched
        assert_eq!(dataset.sample(0).unwrap().label, 0);
    }

    #[test]
    fn test_dataset_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AdniDataset>();
    }
}
