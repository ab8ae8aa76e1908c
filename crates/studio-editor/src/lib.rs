pub mod config;
pub mod history;
pub mod session;
pub mod shortcuts;
pub mod store;
pub mod zorder;

pub use config::EditorConfig;
pub use history::History;
pub use session::Studio;
pub use shortcuts::{NudgeDirection, ShortcutAction, ShortcutMap};
pub use store::{
    CanvasMutation, CanvasSnapshot, CanvasStore, MutationError, MutationOutcome, ObjectRef,
    Selection,
};
pub use zorder::{ViewLayers, ZOrderMove};
