//! Uploaded-asset registry seam.
//!
//! Image placement looks up the raw payload of a customer upload by its
//! two-part reference (upload batch id + image id). Where the uploads live is
//! the host's business; the editor only sees this trait.

use crate::model::{ImageOrigin, ImagePayload};
use std::collections::HashMap;
use std::sync::Arc;

/// An uploaded image as handed to the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedAsset {
    pub src: String,
    pub data: Arc<[u8]>,
    pub width: u32,
    pub height: u32,
}

/// Source of uploaded image payloads.
pub trait AssetRegistry {
    fn resolve(&self, upload_id: &str, image_id: &str) -> Option<UploadedAsset>;
}

impl UploadedAsset {
    /// Build the image payload for placing this asset, remembering where it came from.
    pub fn to_payload(&self, upload_id: &str, image_id: &str) -> ImagePayload {
        ImagePayload {
            src: self.src.clone(),
            data: Some(Arc::clone(&self.data)),
            width: self.width,
            height: self.height,
            origin: ImageOrigin::Upload {
                upload_id: upload_id.to_string(),
                image_id: image_id.to_string(),
            },
        }
    }
}

/// `HashMap`-backed registry, filled by the host before placement.
#[derive(Debug, Default)]
pub struct InMemoryAssets {
    assets: HashMap<(String, String), UploadedAsset>,
}

impl InMemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) an uploaded asset.
    pub fn insert(&mut self, upload_id: &str, image_id: &str, asset: UploadedAsset) {
        self.assets
            .insert((upload_id.to_string(), image_id.to_string()), asset);
    }

    pub fn remove(&mut self, upload_id: &str, image_id: &str) -> Option<UploadedAsset> {
        self.assets
            .remove(&(upload_id.to_string(), image_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetRegistry for InMemoryAssets {
    fn resolve(&self, upload_id: &str, image_id: &str) -> Option<UploadedAsset> {
        self.assets
            .get(&(upload_id.to_string(), image_id.to_string()))
            .cloned()
    }
}
