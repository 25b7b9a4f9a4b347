//! Image decoding and caching.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use image::DynamicImage;

/// First-in first-out cache of decoded images keyed by path.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<PathBuf, DynamicImage>,
    order: VecDeque<PathBuf>,
    max_size: usize,
}

impl ImageCache {
    /// Create a new image cache with the given maximum number of entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            max_size,
        }
    }

    pub fn get(&self, path: &Path) -> Option<&DynamicImage> {
        self.entries.get(path)
    }

    /// Insert an image, evicting the oldest entries beyond capacity.
    pub fn insert(&mut self, path: PathBuf, image: DynamicImage) {
        if self.entries.insert(path.clone(), image).is_none() {
            self.order.push_back(path);
        }
        while self.entries.len() > self.max_size {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Image loader with caching.
///
/// Reviewers step back and forth between neighbouring records, so a handful
/// of decoded images is enough.
#[derive(Debug)]
pub struct ImageLoader {
    cache: ImageCache,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        Self {
            cache: ImageCache::new(8),
        }
    }

    /// Decode `path`, using the cache if available.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the file is unreadable or not an image.
    pub fn load(&mut self, path: &Path) -> image::ImageResult<DynamicImage> {
        if let Some(img) = self.cache.get(path) {
            return Ok(img.clone());
        }
        let img = image::open(path)?;
        self.cache.insert(path.to_path_buf(), img.clone());
        Ok(img)
    }

    pub const fn cache(&self) -> &ImageCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn pixel() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255])))
    }

    #[test]
    fn test_cache_new() {
        let cache = ImageCache::new(10);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_evicts_oldest() {
        let mut cache = ImageCache::new(2);
        cache.insert(PathBuf::from("a"), pixel());
        cache.insert(PathBuf::from("b"), pixel());
        cache.insert(PathBuf::from("a"), pixel());
        cache.insert(PathBuf::from("c"), pixel());
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(Path::new("a")));
        assert!(cache.contains(Path::new("b")));
        assert!(cache.contains(Path::new("c")));
    }

    #[test]
    fn test_loader_caches_decoded_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.png");
        pixel().save(&path).unwrap();

        let mut loader = ImageLoader::new();
        let img = loader.load(&path).unwrap();
        assert_eq!(img.width(), 1);
        assert!(loader.cache().contains(&path));
    }

    #[test]
    fn test_loader_rejects_non_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(ImageLoader::new().load(&path).is_err());
    }
}
