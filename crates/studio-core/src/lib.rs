pub mod assets;
pub mod document;
pub mod id;
pub mod model;

pub use assets::{AssetRegistry, InMemoryAssets, UploadedAsset};
pub use document::{DOCUMENT_VERSION, DesignDocument, DocumentError};
pub use id::{ObjectId, ViewId};
pub use model::*;
