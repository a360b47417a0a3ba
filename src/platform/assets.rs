//! Image assets
//!
//! The session only starts once every required image has loaded. A single
//! failure aborts the start; nothing renders half-loaded.

use std::collections::HashMap;

use crate::error::AssetError;

/// Hero sprite sheet: one row per animation state
pub const HERO_SPRITE: &str = "/hero.png";
/// Width/height of one hero sprite frame in the sheet
pub const HERO_FRAME_SIZE: f32 = 64.0;

/// Everything that must load before a session can start
pub const REQUIRED_ASSETS: &[&str] = &[HERO_SPRITE];

/// Loaded images keyed by path
#[derive(Debug, Clone)]
pub struct AssetCache<I> {
    images: HashMap<String, I>,
}

impl<I> Default for AssetCache<I> {
    fn default() -> Self {
        Self {
            images: HashMap::new(),
        }
    }
}

impl<I> AssetCache<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, image: I) {
        self.images.insert(path.to_string(), image);
    }

    pub fn get(&self, path: &str) -> Option<&I> {
        self.images.get(path)
    }

    pub fn require(&self, path: &str) -> Result<&I, AssetError> {
        self.get(path).ok_or_else(|| AssetError::Missing(path.to_string()))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.images.contains_key(path)
    }

    /// Paths from `paths` not loaded yet
    pub fn missing<'a>(&self, paths: &[&'a str]) -> Vec<&'a str> {
        paths.iter().copied().filter(|p| !self.contains(p)).collect()
    }

    /// Load every uncached path with `load`, stopping at the first failure
    pub fn preload_with(
        &mut self,
        paths: &[&str],
        mut load: impl FnMut(&str) -> Result<I, AssetError>,
    ) -> Result<(), AssetError> {
        for path in self.missing(paths) {
            let image = load(path)?;
            self.insert(path, image);
            log::debug!("Loaded {}", path);
        }
        Ok(())
    }
}

/// Browser image loading through `HtmlImageElement` load/error callbacks
#[cfg(target_arch = "wasm32")]
pub mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    use super::AssetCache;
    use crate::error::AssetError;

    /// Start every load at once, then wait for all of them
    pub async fn preload_images(
        cache: &mut AssetCache<HtmlImageElement>,
        paths: &[&str],
    ) -> Result<(), AssetError> {
        let mut pending = Vec::new();
        for path in cache.missing(paths) {
            let image = HtmlImageElement::new()
                .map_err(|_| AssetError::Load(path.to_string()))?;
            let loader = image.clone();
            let promise = js_sys::Promise::new(&mut |resolve, reject| {
                loader.set_onload(Some(resolve.unchecked_ref()));
                loader.set_onerror(Some(reject.unchecked_ref()));
            });
            image.set_src(path);
            pending.push((path, image, promise));
        }

        for (path, image, promise) in pending {
            JsFuture::from(promise)
                .await
                .map_err(|_| AssetError::Load(path.to_string()))?;
            image.set_onload(None);
            image.set_onerror(None);
            cache.insert(path, image);
            log::debug!("Loaded {}", path);
        }
        Ok(())
    }
}
