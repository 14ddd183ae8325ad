use serde::{Deserialize, Serialize};

/// Image manifest describing the bitmaps particles can be rendered with.
/// Loaded from a JSON file at runtime. The native pixel size is what the
/// particle factory scales down from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageManifest {
    /// All images available to the app.
    pub images: Vec<ImageDescriptor>,
}

/// Describes a single source image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Human-readable name (e.g., "token").
    pub name: String,
    /// Relative path to the image file (e.g., "token.png").
    pub path: String,
    /// Native width in pixels.
    pub width: u32,
    /// Native height in pixels.
    pub height: u32,
}

impl ImageManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
