//! Resource Cache - path-keyed memoization of loaded assets
//!
//! Meshes are expensive to load and are shared by every entity that draws
//! them, so the first request for a path loads it and every later request
//! gets the same shared instance. The cache never evicts: it lives as long as
//! the session that owns it.
//!
//! The cache is single-threaded (`Rc` handles, `&mut self` lookups). Sharing
//! it across threads would need a lock around the check-then-insert sequence
//! to keep loads unique.

use std::collections::HashMap;
use std::rc::Rc;

use super::{AssetError, AssetLoader};

/// Memoizes loaded assets by path
#[derive(Debug)]
pub struct ResourceCache<T> {
    loaded: HashMap<String, Rc<T>>,
}

impl<T> Default for ResourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        log::debug!("Creating ResourceCache<{}>", std::any::type_name::<T>());
        Self {
            loaded: HashMap::new(),
        }
    }

    /// Return the asset for `path`, loading it with `load` on first request
    ///
    /// `load` runs only on a miss. A failed load is returned to the caller
    /// and leaves no entry behind, so the next request retries.
    pub fn load_or_get<F>(&mut self, path: &str, load: F) -> Result<Rc<T>, AssetError>
    where
        F: FnOnce(&str) -> Result<T, AssetError>,
    {
        if let Some(asset) = self.loaded.get(path) {
            log::trace!("Resource cache hit: {}", path);
            return Ok(Rc::clone(asset));
        }

        let asset = Rc::new(load(path)?);
        self.loaded.insert(path.to_string(), Rc::clone(&asset));
        log::debug!("Loaded and cached {} ({} cached)", path, self.loaded.len());
        Ok(asset)
    }

    /// [`ResourceCache::load_or_get`] using an [`AssetLoader`]
    pub fn load_or_get_with<L>(&mut self, loader: &mut L, path: &str) -> Result<Rc<T>, AssetError>
    where
        L: AssetLoader<Output = T> + ?Sized,
    {
        self.load_or_get(path, |path| loader.load(path))
    }

    /// Cached asset for `path`, without loading
    pub fn get(&self, path: &str) -> Option<Rc<T>> {
        self.loaded.get(path).cloned()
    }

    /// Whether `path` has been loaded
    pub fn contains(&self, path: &str) -> bool {
        self.loaded.contains_key(path)
    }

    /// Number of cached assets
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    /// Whether nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Paths of cached assets, in no particular order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.loaded.keys().map(String::as_str)
    }
}
