use std::collections::HashMap;

use glam::Vec2;

use crate::assets::manifest::ImageManifest;

/// Identifies a source image. Index into the ImageManifest's image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageId(pub u32);

/// Resolved reference to a source image: id plus native pixel size.
/// This is all the particle factory needs; decoding the actual bitmap is the
/// host renderer's job.
#[derive(Debug, Clone)]
pub struct ImageRef {
    pub id: ImageId,
    pub native_size: Vec2,
}

/// Registry of named images, built from an ImageManifest.
/// Provides name-based lookup for app code.
pub struct ImageRegistry {
    images: HashMap<String, ImageRef>,
}

impl ImageRegistry {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
        }
    }

    /// Build a registry from a parsed ImageManifest.
    pub fn from_manifest(manifest: &ImageManifest) -> Self {
        let mut images = HashMap::with_capacity(manifest.images.len());
        for (index, desc) in manifest.images.iter().enumerate() {
            images.insert(
                desc.name.clone(),
                ImageRef {
                    id: ImageId(index as u32),
                    native_size: Vec2::new(desc.width as f32, desc.height as f32),
                },
            );
        }
        Self { images }
    }

    /// Look up an image by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&ImageRef> {
        self.images.get(name)
    }
}

impl Default for ImageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
