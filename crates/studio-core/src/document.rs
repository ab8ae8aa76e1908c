//! Design documents: the finished customization as handed to persistence
//! and ordering.
//!
//! A document is the three object collections with their placement and
//! stacking. Selection and undo history are session state and stay behind.
//! Two encodings are supported: pretty JSON for inspection and storage
//! alongside product options, and MessagePack for compact transfer.

use crate::id::{ObjectId, ViewId};
use crate::model::{ImageObject, LayerItem, ShapeObject, TextObject};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Current document format version.
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    pub version: u32,
    #[serde(default)]
    pub images: Vec<ImageObject>,
    #[serde(default)]
    pub texts: Vec<TextObject>,
    #[serde(default)]
    pub shapes: Vec<ShapeObject>,
}

#[derive(Debug)]
pub enum DocumentError {
    Json(serde_json::Error),
    Encode(rmp_serde::encode::Error),
    Decode(rmp_serde::decode::Error),
    UnsupportedVersion(u32),
    MissingView(ObjectId),
    DuplicateId(ObjectId),
    DuplicateZIndex { view: ViewId, z_index: i32 },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Json(e) => write!(f, "invalid document JSON: {e}"),
            DocumentError::Encode(e) => write!(f, "cannot encode document: {e}"),
            DocumentError::Decode(e) => write!(f, "cannot decode document: {e}"),
            DocumentError::UnsupportedVersion(v) => {
                write!(f, "unsupported document version {v} (expected {DOCUMENT_VERSION})")
            }
            DocumentError::MissingView(id) => write!(f, "object {id} has no view"),
            DocumentError::DuplicateId(id) => write!(f, "object id {id} appears twice"),
            DocumentError::DuplicateZIndex { view, z_index } => {
                write!(f, "z-index {z_index} used twice in view `{view}`")
            }
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocumentError::Json(e) => Some(e),
            DocumentError::Encode(e) => Some(e),
            DocumentError::Decode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(e: serde_json::Error) -> Self {
        DocumentError::Json(e)
    }
}

impl From<rmp_serde::encode::Error> for DocumentError {
    fn from(e: rmp_serde::encode::Error) -> Self {
        DocumentError::Encode(e)
    }
}

impl From<rmp_serde::decode::Error> for DocumentError {
    fn from(e: rmp_serde::decode::Error) -> Self {
        DocumentError::Decode(e)
    }
}

impl Default for DesignDocument {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            images: Vec::new(),
            texts: Vec::new(),
            shapes: Vec::new(),
        }
    }
}

impl DesignDocument {
    pub fn new(images: Vec<ImageObject>, texts: Vec<TextObject>, shapes: Vec<ShapeObject>) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            images,
            texts,
            shapes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.texts.is_empty() && self.shapes.is_empty()
    }

    /// Total number of objects across all kinds.
    pub fn len(&self) -> usize {
        self.images.len() + self.texts.len() + self.shapes.len()
    }

    /// Every object in the document as a layer summary, in no particular order.
    pub fn layer_items(&self) -> impl Iterator<Item = LayerItem> + '_ {
        self.images
            .iter()
            .map(|o| o.layer_item())
            .chain(self.texts.iter().map(|o| o.layer_item()))
            .chain(self.shapes.iter().map(|o| o.layer_item()))
    }

    /// Check the structural invariants a loaded design must satisfy:
    /// known version, every object in a named view, unique ids, and unique
    /// z-index per view across all kinds.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.version != DOCUMENT_VERSION {
            return Err(DocumentError::UnsupportedVersion(self.version));
        }
        let mut ids = HashSet::new();
        let mut stacking = HashSet::new();
        for item in self.layer_items() {
            if item.view.is_empty() {
                return Err(DocumentError::MissingView(item.id));
            }
            if !ids.insert(item.id) {
                return Err(DocumentError::DuplicateId(item.id));
            }
            if !stacking.insert((item.view, item.z_index)) {
                return Err(DocumentError::DuplicateZIndex {
                    view: item.view,
                    z_index: item.z_index,
                });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let doc: DesignDocument = serde_json::from_str(text)?;
        doc.validate()?;
        log::debug!("loaded design document ({} objects)", doc.len());
        Ok(doc)
    }

    pub fn to_msgpack(&self) -> Result<Vec<u8>, DocumentError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    /// Decode and validate a MessagePack document.
    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, DocumentError> {
        let doc: DesignDocument = rmp_serde::from_slice(bytes)?;
        doc.validate()?;
        log::debug!("decoded design document ({} objects)", doc.len());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageOrigin, ImagePayload, ShapeKind, ShapePayload, TextPayload, Transform};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn sample() -> DesignDocument {
        let front = ViewId::intern("front");
        let logo = ImagePayload {
            src: "blob:logo".into(),
            data: Some(Arc::from(vec![0x89, b'P', b'N', b'G'])),
            width: 64,
            height: 48,
            origin: ImageOrigin::Upload {
                upload_id: "u1".into(),
                image_id: "logo".into(),
            },
        };
        DesignDocument::new(
            vec![ImageObject::new(front, Transform::default(), 2, logo)],
            vec![TextObject::new(
                front,
                Transform::default(),
                0,
                TextPayload::new("Team 2026"),
            )],
            vec![ShapeObject::new(
                front,
                Transform::default(),
                1,
                ShapePayload::new(ShapeKind::Circle),
            )],
        )
    }

    #[test]
    fn json_document_loads_back() {
        let doc = sample();
        let json = doc.to_json().unwrap();
        assert!(json.contains("Team 2026"));
        assert!(json.contains(r#""type": "upload""#));
        assert_eq!(DesignDocument::from_json(&json).unwrap(), doc);
    }

    #[test]
    fn msgpack_document_loads_back() {
        let doc = sample();
        let bytes = doc.to_msgpack().unwrap();
        let loaded = DesignDocument::from_msgpack(&bytes).unwrap();
        assert_eq!(loaded, doc);

        let image = &loaded.images[0].payload;
        assert_eq!(image.data.as_deref(), Some(&[0x89, b'P', b'N', b'G'][..]));
        assert_eq!(
            image.origin,
            ImageOrigin::Upload {
                upload_id: "u1".into(),
                image_id: "logo".into(),
            }
        );
    }

    #[test]
    fn duplicate_z_index_is_rejected() {
        let mut doc = sample();
        doc.shapes[0].z_index = 0;
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::DuplicateZIndex { z_index: 0, .. })
        ));
    }

    #[test]
    fn same_z_in_different_views_is_fine() {
        let mut doc = sample();
        doc.shapes[0].z_index = 0;
        doc.shapes[0].view = ViewId::intern("back");
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut doc = sample();
        doc.version = 99;
        let json = serde_json::to_string(&doc).unwrap();
        assert!(matches!(
            DesignDocument::from_json(&json),
            Err(DocumentError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let err = DesignDocument::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
        assert!(err.to_string().starts_with("invalid document JSON"));
    }
}
