//! Editing session: one store, one history, one config.
//!
//! `Studio` is the surface UI collaborators talk to. Every mutating call
//! goes through `History::execute`, which decides synchronously whether to
//! record a pre-mutation snapshot. Failures never panic: a structural
//! violation (creating outside a view) is logged as an error, everything
//! else that has nothing to do is a quiet no-op.

use crate::config::EditorConfig;
use crate::history::History;
use crate::shortcuts::ShortcutAction;
use crate::store::{CanvasMutation, CanvasStore, MutationOutcome, Selection};
use crate::zorder::{ViewLayers, ZOrderMove};
use studio_core::{
    AssetRegistry, DesignDocument, DocumentError, ImagePatch, ImagePayload, ObjectId, ObjectKind,
    Patch, ShapePatch, ShapePayload, TextPatch, TextPayload, Transform, ViewId,
};

pub struct Studio {
    store: CanvasStore,
    history: History,
    config: EditorConfig,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Studio {
    pub fn new(config: EditorConfig) -> Self {
        let store = CanvasStore::with_clamping(config.clamp_placement);
        let history = History::new(config.history_limit, store.snapshot());
        Self {
            store,
            history,
            config,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &CanvasStore {
        &self.store
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Run one mutation through history. Returns `None` on a structural
    /// error, which is logged.
    pub fn execute(&mut self, mutation: CanvasMutation) -> Option<MutationOutcome> {
        match self.history.execute(&mut self.store, mutation) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log::error!("{e}");
                None
            }
        }
    }

    fn create(&mut self, mutation: CanvasMutation) -> Option<ObjectId> {
        self.execute(mutation).and_then(MutationOutcome::created)
    }

    fn changed(&mut self, mutation: CanvasMutation) -> bool {
        self.execute(mutation).is_some_and(MutationOutcome::changed)
    }

    pub fn add_image(
        &mut self,
        view: ViewId,
        transform: Transform,
        payload: ImagePayload,
    ) -> Option<ObjectId> {
        self.create(CanvasMutation::AddImage {
            view,
            transform,
            payload,
        })
    }

    /// Place an uploaded asset from `assets`. Unknown assets are logged and
    /// create nothing.
    pub fn add_uploaded_image(
        &mut self,
        view: ViewId,
        upload_id: &str,
        image_id: &str,
        assets: &dyn AssetRegistry,
    ) -> Option<ObjectId> {
        let Some(asset) = assets.resolve(upload_id, image_id) else {
            log::warn!("no uploaded asset {upload_id}/{image_id}");
            return None;
        };
        self.add_image(
            view,
            Transform::default(),
            asset.to_payload(upload_id, image_id),
        )
    }

    pub fn add_text(
        &mut self,
        view: ViewId,
        transform: Transform,
        payload: TextPayload,
    ) -> Option<ObjectId> {
        self.create(CanvasMutation::AddText {
            view,
            transform,
            payload,
        })
    }

    pub fn add_shape(
        &mut self,
        view: ViewId,
        transform: Transform,
        payload: ShapePayload,
    ) -> Option<ObjectId> {
        self.create(CanvasMutation::AddShape {
            view,
            transform,
            payload,
        })
    }

    pub fn update_image(&mut self, id: ObjectId, patch: Patch<ImagePatch>) -> bool {
        self.changed(CanvasMutation::UpdateImage { id, patch })
    }

    pub fn update_text(&mut self, id: ObjectId, patch: Patch<TextPatch>) -> bool {
        self.changed(CanvasMutation::UpdateText { id, patch })
    }

    pub fn update_shape(&mut self, id: ObjectId, patch: Patch<ShapePatch>) -> bool {
        self.changed(CanvasMutation::UpdateShape { id, patch })
    }

    /// Move an object by a relative offset. Locked objects stay put.
    pub fn nudge(&mut self, id: ObjectId, dx: f32, dy: f32) -> bool {
        self.changed(CanvasMutation::Nudge { id, dx, dy })
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.changed(CanvasMutation::Remove { id })
    }

    /// Copy an object on top of its view, offset by the configured
    /// duplicate offset. The copy is unlocked and selected.
    pub fn duplicate(&mut self, id: ObjectId) -> Option<ObjectId> {
        self.create(CanvasMutation::Duplicate {
            id,
            offset: self.config.duplicate_offset,
        })
    }

    pub fn toggle_lock(&mut self, id: ObjectId) -> bool {
        self.changed(CanvasMutation::ToggleLock { id })
    }

    /// Select an object, or clear the selection with `None`.
    /// Locked and unknown objects are rejected.
    pub fn select(&mut self, id: Option<ObjectId>) -> bool {
        self.store.select(id)
    }

    pub fn bring_forward(&mut self, id: ObjectId) -> bool {
        self.reorder(id, ZOrderMove::Forward)
    }

    pub fn send_backward(&mut self, id: ObjectId) -> bool {
        self.reorder(id, ZOrderMove::Backward)
    }

    pub fn bring_to_front(&mut self, id: ObjectId) -> bool {
        self.reorder(id, ZOrderMove::ToFront)
    }

    pub fn send_to_back(&mut self, id: ObjectId) -> bool {
        self.reorder(id, ZOrderMove::ToBack)
    }

    pub fn reorder(&mut self, id: ObjectId, movement: ZOrderMove) -> bool {
        self.changed(CanvasMutation::Reorder { id, movement })
    }

    /// Remove every unlocked object in `view`.
    pub fn clear_view(&mut self, view: ViewId) -> bool {
        self.changed(CanvasMutation::ClearView { view })
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> Option<String> {
        self.history.undo(&mut self.store)
    }

    pub fn redo(&mut self) -> Option<String> {
        self.history.redo(&mut self.store)
    }

    /// Bracket a gesture (drag, slider scrub) so it undoes as one step.
    pub fn start_interactive_operation(&mut self, label: &str) {
        self.history.begin_interactive(&self.store, label);
    }

    pub fn end_interactive_operation(&mut self) {
        self.history.end_interactive();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn selection(&self) -> Selection {
        self.store.selection()
    }

    pub fn selected_id(&self) -> Option<ObjectId> {
        self.store.selected_id()
    }

    pub fn layers(&self, view: ViewId) -> ViewLayers {
        self.store.layers(view)
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Apply a shortcut action to the current selection. Returns whether
    /// anything changed.
    pub fn dispatch(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::Undo => return self.undo().is_some(),
            ShortcutAction::Redo => return self.redo().is_some(),
            ShortcutAction::Deselect => {
                let had_selection = self.selected_id().is_some();
                self.store.select(None);
                return had_selection;
            }
            _ => {}
        }

        let Some(id) = self.selected_id() else {
            log::debug!("{}: nothing selected", action.name());
            return false;
        };
        match action {
            ShortcutAction::Delete => self.remove(id),
            ShortcutAction::Duplicate => self.duplicate(id).is_some(),
            ShortcutAction::ToggleLock => self.toggle_lock(id),
            ShortcutAction::BringForward => self.bring_forward(id),
            ShortcutAction::SendBackward => self.send_backward(id),
            ShortcutAction::BringToFront => self.bring_to_front(id),
            ShortcutAction::SendToBack => self.send_to_back(id),
            ShortcutAction::Nudge { direction, large } => {
                let step = if large {
                    self.config.nudge_step_large
                } else {
                    self.config.nudge_step
                };
                let (dx, dy) = direction.delta();
                self.nudge(id, dx * step, dy * step)
            }
            ShortcutAction::Undo | ShortcutAction::Redo | ShortcutAction::Deselect => false,
        }
    }

    // ─── Documents ───────────────────────────────────────────────────────

    pub fn export_document(&self) -> DesignDocument {
        self.store.to_document()
    }

    /// Replace the canvas with a validated document. History restarts with
    /// the imported state as its base entry.
    pub fn import_document(&mut self, doc: DesignDocument) -> Result<(), DocumentError> {
        if let Err(e) = doc.validate() {
            log::warn!("rejected design document: {e}");
            return Err(e);
        }
        self.store.load_document(doc);
        self.history.reset(self.store.snapshot());
        Ok(())
    }

    /// Kind of the object with `id`, if it exists.
    pub fn kind_of(&self, id: ObjectId) -> Option<ObjectKind> {
        self.store.kind_of(id)
    }
}
