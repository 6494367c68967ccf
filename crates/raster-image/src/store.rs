use std::collections::HashMap;

use crate::image::Image;

/// A caller-owned mapping from image names to images.
///
/// The store is an explicit handle passed to whatever needs it; transformations only
/// read from it through keys they are given and never keep a reference to it.
///
/// # Examples
///
/// ```
/// use raster_image::{Image, ImageStore, Pixel};
///
/// let mut store = ImageStore::new();
/// store.insert("koala", Image::from_size_val([2, 2].into(), Pixel::default()).unwrap());
///
/// assert!(store.contains("koala"));
/// assert!(store.get("panda").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct ImageStore {
    images: HashMap<String, Image>,
}

impl ImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an image under `name`, returning the image it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, image: Image) -> Option<Image> {
        self.images.insert(name.into(), image)
    }

    /// Get the image stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Image> {
        self.images.get(name)
    }

    /// Remove and return the image stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<Image> {
        self.images.remove(name)
    }

    /// Whether an image is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    /// Names of all stored images, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    /// Number of stored images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
