//! Canvas object store: the authoritative set of placed objects.
//!
//! Holds three collections (images, texts, shapes) and the single
//! selection. All edits go through `CanvasStore::apply` as `CanvasMutation`
//! values. Invariants:
//!
//! - z-index values are unique per view across all three collections,
//! - at most one object is selected (structurally: `Selection` is one enum),
//! - a locked object is never the selection.
//!
//! The store does not know about history; `History` wraps `apply` and
//! decides when to snapshot.

use crate::zorder::{self, ViewLayers, ZChange, ZOrderMove};
use serde::{Deserialize, Serialize};
use std::fmt;
use studio_core::{
    CanvasObject, DesignDocument, ImageObject, ImagePatch, ImagePayload, LayerItem, ObjectId,
    ObjectKind, Patch, Payload, ShapeObject, ShapePatch, ShapePayload, TextObject, TextPatch,
    TextPayload, Transform, ViewId,
};

/// Smallest scale kept when placement clamping is on.
const MIN_SCALE: f32 = 0.01;

// ─── Selection ───────────────────────────────────────────────────────────

/// The selected object, if any. One variant per kind, so two simultaneous
/// selections cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Selection {
    #[default]
    None,
    Image(ObjectId),
    Text(ObjectId),
    Shape(ObjectId),
}

impl Selection {
    pub fn id(self) -> Option<ObjectId> {
        match self {
            Selection::None => None,
            Selection::Image(id) | Selection::Text(id) | Selection::Shape(id) => Some(id),
        }
    }

    pub fn kind(self) -> Option<ObjectKind> {
        match self {
            Selection::None => None,
            Selection::Image(_) => Some(ObjectKind::Image),
            Selection::Text(_) => Some(ObjectKind::Text),
            Selection::Shape(_) => Some(ObjectKind::Shape),
        }
    }

    pub fn of(kind: ObjectKind, id: ObjectId) -> Self {
        match kind {
            ObjectKind::Image => Selection::Image(id),
            ObjectKind::Text => Selection::Text(id),
            ObjectKind::Shape => Selection::Shape(id),
        }
    }

    pub fn is(self, id: ObjectId) -> bool {
        self.id() == Some(id)
    }
}

// ─── Snapshot ────────────────────────────────────────────────────────────

/// Full copy of the store's state: the three collections and the selection.
/// Image payload bytes are shared between snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanvasSnapshot {
    pub images: Vec<ImageObject>,
    pub texts: Vec<TextObject>,
    pub shapes: Vec<ShapeObject>,
    pub selection: Selection,
}

impl CanvasSnapshot {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.texts.is_empty() && self.shapes.is_empty()
    }

    fn layer_items(&self) -> impl Iterator<Item = LayerItem> + '_ {
        self.images
            .iter()
            .map(CanvasObject::layer_item)
            .chain(self.texts.iter().map(CanvasObject::layer_item))
            .chain(self.shapes.iter().map(CanvasObject::layer_item))
    }
}

// ─── Collection access ───────────────────────────────────────────────────

/// A payload with its own collection in the store.
pub trait Collection: Payload + Sized {
    fn objects(state: &CanvasSnapshot) -> &Vec<CanvasObject<Self>>;
    fn objects_mut(state: &mut CanvasSnapshot) -> &mut Vec<CanvasObject<Self>>;
}

impl Collection for ImagePayload {
    fn objects(state: &CanvasSnapshot) -> &Vec<ImageObject> {
        &state.images
    }
    fn objects_mut(state: &mut CanvasSnapshot) -> &mut Vec<ImageObject> {
        &mut state.images
    }
}

impl Collection for TextPayload {
    fn objects(state: &CanvasSnapshot) -> &Vec<TextObject> {
        &state.texts
    }
    fn objects_mut(state: &mut CanvasSnapshot) -> &mut Vec<TextObject> {
        &mut state.texts
    }
}

impl Collection for ShapePayload {
    fn objects(state: &CanvasSnapshot) -> &Vec<ShapeObject> {
        &state.shapes
    }
    fn objects_mut(state: &mut CanvasSnapshot) -> &mut Vec<ShapeObject> {
        &mut state.shapes
    }
}

// ─── Object references ───────────────────────────────────────────────────

/// Borrowed view of any object, tagged by kind.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ObjectRef<'a> {
    Image(&'a ImageObject),
    Text(&'a TextObject),
    Shape(&'a ShapeObject),
}

/// Mutable access to the common envelope of any object.
enum ObjectMut<'a> {
    Image(&'a mut ImageObject),
    Text(&'a mut TextObject),
    Shape(&'a mut ShapeObject),
}

macro_rules! envelope {
    ($obj:expr, $o:ident => $body:expr) => {
        match $obj {
            ObjectMut::Image($o) => $body,
            ObjectMut::Text($o) => $body,
            ObjectMut::Shape($o) => $body,
        }
    };
}

impl ObjectRef<'_> {
    pub fn layer_item(&self) -> LayerItem {
        match self {
            ObjectRef::Image(o) => o.layer_item(),
            ObjectRef::Text(o) => o.layer_item(),
            ObjectRef::Shape(o) => o.layer_item(),
        }
    }

    pub fn transform(&self) -> Transform {
        match self {
            ObjectRef::Image(o) => o.transform,
            ObjectRef::Text(o) => o.transform,
            ObjectRef::Shape(o) => o.transform,
        }
    }
}

// ─── Mutations ───────────────────────────────────────────────────────────

/// A single edit to the store.
#[derive(Debug, Clone)]
pub enum CanvasMutation {
    AddImage {
        view: ViewId,
        transform: Transform,
        payload: ImagePayload,
    },
    AddText {
        view: ViewId,
        transform: Transform,
        payload: TextPayload,
    },
    AddShape {
        view: ViewId,
        transform: Transform,
        payload: ShapePayload,
    },
    UpdateImage {
        id: ObjectId,
        patch: Patch<ImagePatch>,
    },
    UpdateText {
        id: ObjectId,
        patch: Patch<TextPatch>,
    },
    UpdateShape {
        id: ObjectId,
        patch: Patch<ShapePatch>,
    },
    /// Relative move of an unlocked object.
    Nudge { id: ObjectId, dx: f32, dy: f32 },
    Remove { id: ObjectId },
    /// Copy an object on top of its view, offset by `offset` on both axes.
    Duplicate { id: ObjectId, offset: f32 },
    ToggleLock { id: ObjectId },
    Reorder { id: ObjectId, movement: ZOrderMove },
    /// Remove every unlocked object of a view.
    ClearView { view: ViewId },
}

impl CanvasMutation {
    /// Short description used as the undo/redo label.
    pub fn label(&self) -> String {
        match self {
            CanvasMutation::AddImage { .. } => "Add image".into(),
            CanvasMutation::AddText { .. } => "Add text".into(),
            CanvasMutation::AddShape { .. } => "Add shape".into(),
            CanvasMutation::UpdateImage { .. } => "Edit image".into(),
            CanvasMutation::UpdateText { .. } => "Edit text".into(),
            CanvasMutation::UpdateShape { .. } => "Edit shape".into(),
            CanvasMutation::Nudge { .. } => "Move".into(),
            CanvasMutation::Remove { .. } => "Delete".into(),
            CanvasMutation::Duplicate { .. } => "Duplicate".into(),
            CanvasMutation::ToggleLock { .. } => "Toggle lock".into(),
            CanvasMutation::Reorder { movement, .. } => movement.label().into(),
            CanvasMutation::ClearView { view } => format!("Clear {view}"),
        }
    }
}

/// What applying a mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Created(ObjectId),
    Modified,
    /// Nothing to do: unknown id, locked target, boundary reorder, or a
    /// patch that left every field as it was.
    Unchanged,
}

impl MutationOutcome {
    pub fn changed(self) -> bool {
        !matches!(self, MutationOutcome::Unchanged)
    }

    pub fn created(self) -> Option<ObjectId> {
        match self {
            MutationOutcome::Created(id) => Some(id),
            _ => None,
        }
    }

    fn from_changed(changed: bool) -> Self {
        if changed {
            MutationOutcome::Modified
        } else {
            MutationOutcome::Unchanged
        }
    }
}

/// A structural precondition the caller violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationError {
    /// Objects must be created inside a named view.
    MissingView,
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::MissingView => f.write_str("cannot create an object without a view"),
        }
    }
}

impl std::error::Error for MutationError {}

// ─── Store ───────────────────────────────────────────────────────────────

/// The canvas object store.
#[derive(Debug, Clone, Default)]
pub struct CanvasStore {
    state: CanvasSnapshot,
    clamp_placement: bool,
}

impl CanvasStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that clamps `x`/`y` to [0, 100] and keeps `scale` positive.
    pub fn with_clamping(clamp_placement: bool) -> Self {
        Self {
            state: CanvasSnapshot::default(),
            clamp_placement,
        }
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply one mutation.
    pub fn apply(&mut self, mutation: CanvasMutation) -> Result<MutationOutcome, MutationError> {
        let outcome = match mutation {
            CanvasMutation::AddImage {
                view,
                transform,
                payload,
            } => self.add(view, transform, payload)?,
            CanvasMutation::AddText {
                view,
                transform,
                payload,
            } => self.add(view, transform, payload)?,
            CanvasMutation::AddShape {
                view,
                transform,
                payload,
            } => self.add(view, transform, payload)?,
            CanvasMutation::UpdateImage { id, patch } => self.update::<ImagePayload>(id, &patch),
            CanvasMutation::UpdateText { id, patch } => self.update::<TextPayload>(id, &patch),
            CanvasMutation::UpdateShape { id, patch } => self.update::<ShapePayload>(id, &patch),
            CanvasMutation::Nudge { id, dx, dy } => self.nudge(id, dx, dy),
            CanvasMutation::Remove { id } => self.remove(id),
            CanvasMutation::Duplicate { id, offset } => self.duplicate(id, offset),
            CanvasMutation::ToggleLock { id } => self.toggle_lock(id),
            CanvasMutation::Reorder { id, movement } => self.reorder(id, movement),
            CanvasMutation::ClearView { view } => self.clear_view(view),
        };
        Ok(outcome)
    }

    fn add<P: Collection>(
        &mut self,
        view: ViewId,
        mut transform: Transform,
        payload: P,
    ) -> Result<MutationOutcome, MutationError> {
        if view.is_empty() {
            return Err(MutationError::MissingView);
        }
        if self.clamp_placement {
            clamp(&mut transform);
        }
        let Some(z_index) = zorder::next_z(&self.layers(view)) else {
            return Ok(MutationOutcome::Unchanged);
        };
        let object = CanvasObject::new(view, transform, z_index, payload);
        let id = object.id;
        P::objects_mut(&mut self.state).push(object);
        self.state.selection = Selection::of(P::KIND, id);
        log::trace!("added {} {id} to {view} at z {z_index}", P::KIND.name());
        Ok(MutationOutcome::Created(id))
    }

    fn update<P: Collection>(&mut self, id: ObjectId, patch: &Patch<P::Patch>) -> MutationOutcome {
        let clamp_placement = self.clamp_placement;
        let Some(object) = P::objects_mut(&mut self.state)
            .iter_mut()
            .find(|o| o.id == id)
        else {
            log::debug!("update: no {} with id {id}", P::KIND.name());
            return MutationOutcome::Unchanged;
        };
        let mut updated = object.clone();
        updated.apply(patch);
        if patch.transform.x.is_some() || patch.transform.y.is_some() {
            updated.moved_from_default = true;
        }
        if clamp_placement {
            clamp(&mut updated.transform);
        }
        if !updated.is_finite() {
            log::warn!("update: rejected non-finite value for {id}");
            return MutationOutcome::Unchanged;
        }
        if updated == *object {
            return MutationOutcome::Unchanged;
        }
        *object = updated;
        MutationOutcome::Modified
    }

    fn nudge(&mut self, id: ObjectId, dx: f32, dy: f32) -> MutationOutcome {
        let clamp_placement = self.clamp_placement;
        let Some(object) = self.object_mut(id) else {
            log::debug!("nudge: unknown id {id}");
            return MutationOutcome::Unchanged;
        };
        envelope!(object, o => {
            if o.locked {
                log::debug!("nudge: {id} is locked");
                return MutationOutcome::Unchanged;
            }
            let mut moved = o.transform;
            moved.x += dx;
            moved.y += dy;
            if clamp_placement {
                clamp(&mut moved);
            }
            if !moved.is_finite() {
                log::warn!("nudge: rejected non-finite offset for {id}");
                return MutationOutcome::Unchanged;
            }
            if moved == o.transform {
                return MutationOutcome::Unchanged;
            }
            o.transform = moved;
            o.moved_from_default = true;
        });
        MutationOutcome::Modified
    }

    fn remove(&mut self, id: ObjectId) -> MutationOutcome {
        let removed = match self.kind_of(id) {
            Some(ObjectKind::Image) => remove_from(&mut self.state.images, id),
            Some(ObjectKind::Text) => remove_from(&mut self.state.texts, id),
            Some(ObjectKind::Shape) => remove_from(&mut self.state.shapes, id),
            None => false,
        };
        if !removed {
            log::debug!("remove: unknown id {id}");
            return MutationOutcome::Unchanged;
        }
        if self.state.selection.is(id) {
            self.state.selection = Selection::None;
        }
        MutationOutcome::Modified
    }

    fn duplicate(&mut self, id: ObjectId, offset: f32) -> MutationOutcome {
        let copy = match self.kind_of(id) {
            Some(ObjectKind::Image) => self.duplicate_in::<ImagePayload>(id, offset),
            Some(ObjectKind::Text) => self.duplicate_in::<TextPayload>(id, offset),
            Some(ObjectKind::Shape) => self.duplicate_in::<ShapePayload>(id, offset),
            None => None,
        };
        match copy {
            Some(new_id) => MutationOutcome::Created(new_id),
            None => {
                log::debug!("duplicate: nothing copied from {id}");
                MutationOutcome::Unchanged
            }
        }
    }

    fn duplicate_in<P: Collection>(&mut self, id: ObjectId, offset: f32) -> Option<ObjectId> {
        let source = P::objects(&self.state).iter().find(|o| o.id == id)?;
        let z_index = zorder::next_z(&self.layers(source.view))?;
        let mut copy =
            CanvasObject::new(source.view, source.transform, z_index, source.payload.clone());
        copy.transform.x += offset;
        copy.transform.y += offset;
        if self.clamp_placement {
            clamp(&mut copy.transform);
        }
        copy.moved_from_default = true;
        let new_id = copy.id;
        P::objects_mut(&mut self.state).push(copy);
        self.state.selection = Selection::of(P::KIND, new_id);
        Some(new_id)
    }

    fn toggle_lock(&mut self, id: ObjectId) -> MutationOutcome {
        let Some(object) = self.object_mut(id) else {
            log::debug!("toggle_lock: unknown id {id}");
            return MutationOutcome::Unchanged;
        };
        let locked = envelope!(object, o => {
            o.locked = !o.locked;
            o.locked
        });
        if locked && self.state.selection.is(id) {
            self.state.selection = Selection::None;
        }
        MutationOutcome::Modified
    }

    fn reorder(&mut self, id: ObjectId, movement: ZOrderMove) -> MutationOutcome {
        let Some(view) = self.object(id).map(|o| o.layer_item().view) else {
            log::debug!("reorder: unknown id {id}");
            return MutationOutcome::Unchanged;
        };
        let layers = self.layers(view);
        match zorder::resolve(&layers, id, movement) {
            Some(ZChange::Swap(a, b)) => {
                let (za, zb) = (z_of(&layers, a), z_of(&layers, b));
                self.set_z(a, zb);
                self.set_z(b, za);
                MutationOutcome::Modified
            }
            Some(ZChange::Set(target, z_index)) => {
                self.set_z(target, z_index);
                MutationOutcome::Modified
            }
            None => {
                log::debug!("reorder: {id} cannot move {movement:?}");
                MutationOutcome::Unchanged
            }
        }
    }

    fn clear_view(&mut self, view: ViewId) -> MutationOutcome {
        let before = self.len();
        let keep = |locked: bool, v: ViewId| locked || v != view;
        self.state.images.retain(|o| keep(o.locked, o.view));
        self.state.texts.retain(|o| keep(o.locked, o.view));
        self.state.shapes.retain(|o| keep(o.locked, o.view));
        if let Some(selected) = self.state.selection.id()
            && self.object(selected).is_none()
        {
            self.state.selection = Selection::None;
        }
        MutationOutcome::from_changed(self.len() != before)
    }

    /// Set the selection. `None` clears it.
    ///
    /// Returns `false` (and changes nothing) for unknown or locked objects.
    /// Selection is not an undoable edit.
    pub fn select(&mut self, id: Option<ObjectId>) -> bool {
        let Some(id) = id else {
            self.state.selection = Selection::None;
            return true;
        };
        let Some(item) = self.object(id).map(|o| o.layer_item()) else {
            log::debug!("select: unknown id {id}");
            return false;
        };
        if item.locked {
            log::debug!("select: {id} is locked");
            return false;
        }
        self.state.selection = Selection::of(item.kind, id);
        true
    }

    // ─── Snapshots ───────────────────────────────────────────────────────

    pub fn snapshot(&self) -> CanvasSnapshot {
        self.state.clone()
    }

    pub fn restore(&mut self, snapshot: CanvasSnapshot) {
        self.state = snapshot;
    }

    /// The placed objects as a design document.
    pub fn to_document(&self) -> DesignDocument {
        DesignDocument::new(
            self.state.images.clone(),
            self.state.texts.clone(),
            self.state.shapes.clone(),
        )
    }

    /// Replace every object with the document's. Clears the selection.
    /// The document is expected to be validated.
    ///
    /// Z-indices are renumbered 0..n per view, keeping their order, so
    /// imported values never sit at the edge of the `i32` range.
    pub fn load_document(&mut self, doc: DesignDocument) {
        self.state = CanvasSnapshot {
            images: doc.images,
            texts: doc.texts,
            shapes: doc.shapes,
            selection: Selection::None,
        };
        for view in self.views() {
            for (z_index, item) in (0..).zip(self.layers(view)) {
                self.set_z(item.id, z_index);
            }
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn images(&self) -> &[ImageObject] {
        &self.state.images
    }

    pub fn texts(&self) -> &[TextObject] {
        &self.state.texts
    }

    pub fn shapes(&self) -> &[ShapeObject] {
        &self.state.shapes
    }

    pub fn image(&self, id: ObjectId) -> Option<&ImageObject> {
        self.state.images.iter().find(|o| o.id == id)
    }

    pub fn text(&self, id: ObjectId) -> Option<&TextObject> {
        self.state.texts.iter().find(|o| o.id == id)
    }

    pub fn shape(&self, id: ObjectId) -> Option<&ShapeObject> {
        self.state.shapes.iter().find(|o| o.id == id)
    }

    pub fn object(&self, id: ObjectId) -> Option<ObjectRef<'_>> {
        if let Some(o) = self.image(id) {
            return Some(ObjectRef::Image(o));
        }
        if let Some(o) = self.text(id) {
            return Some(ObjectRef::Text(o));
        }
        self.shape(id).map(ObjectRef::Shape)
    }

    pub fn kind_of(&self, id: ObjectId) -> Option<ObjectKind> {
        self.object(id).map(|o| o.layer_item().kind)
    }

    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    pub fn selected_id(&self) -> Option<ObjectId> {
        self.state.selection.id()
    }

    pub fn selected_image_id(&self) -> Option<ObjectId> {
        match self.state.selection {
            Selection::Image(id) => Some(id),
            _ => None,
        }
    }

    pub fn selected_text_id(&self) -> Option<ObjectId> {
        match self.state.selection {
            Selection::Text(id) => Some(id),
            _ => None,
        }
    }

    pub fn selected_shape_id(&self) -> Option<ObjectId> {
        match self.state.selection {
            Selection::Shape(id) => Some(id),
            _ => None,
        }
    }

    /// Layers of one view, bottom to top.
    pub fn layers(&self, view: ViewId) -> ViewLayers {
        zorder::view_layers(self.state.layer_items(), view)
    }

    /// Every view that owns at least one object, in first-seen order.
    pub fn views(&self) -> Vec<ViewId> {
        let mut views = Vec::new();
        for item in self.state.layer_items() {
            if !views.contains(&item.view) {
                views.push(item.view);
            }
        }
        views
    }

    pub fn len(&self) -> usize {
        self.state.images.len() + self.state.texts.len() + self.state.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    // ─── Private helpers ─────────────────────────────────────────────────

    fn object_mut(&mut self, id: ObjectId) -> Option<ObjectMut<'_>> {
        if let Some(o) = self.state.images.iter_mut().find(|o| o.id == id) {
            return Some(ObjectMut::Image(o));
        }
        if let Some(o) = self.state.texts.iter_mut().find(|o| o.id == id) {
            return Some(ObjectMut::Text(o));
        }
        self.state
            .shapes
            .iter_mut()
            .find(|o| o.id == id)
            .map(ObjectMut::Shape)
    }

    fn set_z(&mut self, id: ObjectId, z_index: i32) {
        if let Some(object) = self.object_mut(id) {
            envelope!(object, o => o.z_index = z_index);
        }
    }
}

fn remove_from<P>(objects: &mut Vec<CanvasObject<P>>, id: ObjectId) -> bool {
    let before = objects.len();
    objects.retain(|o| o.id != id);
    objects.len() != before
}

fn z_of(layers: &[LayerItem], id: ObjectId) -> i32 {
    layers
        .iter()
        .find(|l| l.id == id)
        .map(|l| l.z_index)
        .unwrap_or_default()
}

fn clamp(transform: &mut Transform) {
    transform.x = transform.x.clamp(0.0, 100.0);
    transform.y = transform.y.clamp(0.0, 100.0);
    transform.scale = transform.scale.max(MIN_SCALE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use studio_core::{ShapeKind, TransformPatch};

    fn front() -> ViewId {
        ViewId::intern("front")
    }

    fn add_shape(store: &mut CanvasStore, view: ViewId) -> ObjectId {
        store
            .apply(CanvasMutation::AddShape {
                view,
                transform: Transform::default(),
                payload: ShapePayload::new(ShapeKind::Rectangle),
            })
            .unwrap()
            .created()
            .unwrap()
    }

    fn add_text(store: &mut CanvasStore, view: ViewId) -> ObjectId {
        store
            .apply(CanvasMutation::AddText {
                view,
                transform: Transform::default(),
                payload: TextPayload::new("Hi"),
            })
            .unwrap()
            .created()
            .unwrap()
    }

    fn z(store: &CanvasStore, id: ObjectId) -> i32 {
        store.object(id).unwrap().layer_item().z_index
    }

    #[test]
    fn add_stacks_across_kinds() {
        let mut store = CanvasStore::new();
        let a = add_shape(&mut store, front());
        let b = add_text(&mut store, front());
        let c = add_shape(&mut store, ViewId::intern("back"));
        assert_eq!(z(&store, a), 0);
        assert_eq!(z(&store, b), 1);
        assert_eq!(z(&store, c), 0);
        assert_eq!(store.selection(), Selection::Shape(c));
    }

    #[test]
    fn add_without_view_is_rejected() {
        let mut store = CanvasStore::new();
        let result = store.apply(CanvasMutation::AddText {
            view: ViewId::intern(""),
            transform: Transform::default(),
            payload: TextPayload::default(),
        });
        assert_eq!(result, Err(MutationError::MissingView));
        assert!(store.is_empty());
    }

    #[test]
    fn update_unknown_or_wrong_kind_is_unchanged() {
        let mut store = CanvasStore::new();
        let text = add_text(&mut store, front());
        let outcome = store
            .apply(CanvasMutation::UpdateShape {
                id: text,
                patch: Patch::transform(TransformPatch {
                    x: Some(10.0),
                    ..Default::default()
                }),
            })
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Unchanged);
        assert_eq!(store.text(text).unwrap().transform.x, 50.0);
    }

    #[test]
    fn update_with_same_values_is_unchanged() {
        let mut store = CanvasStore::new();
        let text = add_text(&mut store, front());
        let outcome = store
            .apply(CanvasMutation::UpdateText {
                id: text,
                patch: Patch::payload(TextPatch {
                    content: Some("Hi".into()),
                    ..Default::default()
                }),
            })
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Unchanged);
    }

    #[test]
    fn moving_marks_moved_from_default() {
        let mut store = CanvasStore::new();
        let shape = add_shape(&mut store, front());
        store
            .apply(CanvasMutation::UpdateShape {
                id: shape,
                patch: Patch::transform(TransformPatch {
                    y: Some(20.0),
                    ..Default::default()
                }),
            })
            .unwrap();
        assert!(store.shape(shape).unwrap().moved_from_default);
    }

    #[test]
    fn remove_clears_selection() {
        let mut store = CanvasStore::new();
        let shape = add_shape(&mut store, front());
        assert_eq!(store.selected_shape_id(), Some(shape));
        store.apply(CanvasMutation::Remove { id: shape }).unwrap();
        assert_eq!(store.selection(), Selection::None);
        assert!(store.is_empty());
    }

    #[test]
    fn lock_clears_selection_and_blocks_select() {
        let mut store = CanvasStore::new();
        let text = add_text(&mut store, front());
        store.apply(CanvasMutation::ToggleLock { id: text }).unwrap();
        assert_eq!(store.selection(), Selection::None);
        assert!(!store.select(Some(text)));

        store.apply(CanvasMutation::ToggleLock { id: text }).unwrap();
        assert!(store.select(Some(text)));
        assert_eq!(store.selected_text_id(), Some(text));
    }

    #[test]
    fn duplicate_goes_on_top_unlocked_and_offset() {
        let mut store = CanvasStore::new();
        let base = add_shape(&mut store, front());
        let _other = add_text(&mut store, front());
        store.apply(CanvasMutation::ToggleLock { id: base }).unwrap();

        let copy = store
            .apply(CanvasMutation::Duplicate {
                id: base,
                offset: 2.0,
            })
            .unwrap()
            .created()
            .unwrap();

        let original = store.shape(base).unwrap().clone();
        let dup = store.shape(copy).unwrap();
        assert_ne!(copy, base);
        assert_eq!(dup.transform.x, original.transform.x + 2.0);
        assert_eq!(dup.transform.y, original.transform.y + 2.0);
        assert!(!dup.locked);
        assert!(dup.moved_from_default);
        assert_eq!(dup.z_index, 2);
        assert_eq!(dup.payload, original.payload);
        assert_eq!(store.selection(), Selection::Shape(copy));
    }

    #[test]
    fn nudge_skips_locked() {
        let mut store = CanvasStore::new();
        let shape = add_shape(&mut store, front());
        store.apply(CanvasMutation::ToggleLock { id: shape }).unwrap();
        let outcome = store
            .apply(CanvasMutation::Nudge {
                id: shape,
                dx: 1.0,
                dy: 0.0,
            })
            .unwrap();
        assert_eq!(outcome, MutationOutcome::Unchanged);
    }

    #[test]
    fn clamping_keeps_placement_in_bounds() {
        let mut store = CanvasStore::with_clamping(true);
        let shape = add_shape(&mut store, front());
        store
            .apply(CanvasMutation::UpdateShape {
                id: shape,
                patch: Patch::transform(TransformPatch {
                    x: Some(140.0),
                    y: Some(-5.0),
                    scale: Some(-1.0),
                    ..Default::default()
                }),
            })
            .unwrap();
        let t = store.shape(shape).unwrap().transform;
        assert_eq!((t.x, t.y, t.scale), (100.0, 0.0, MIN_SCALE));
    }

    #[test]
    fn reorder_swaps_only_two_values() {
        let mut store = CanvasStore::new();
        let a = add_shape(&mut store, front());
        let b = add_text(&mut store, front());
        let c = add_shape(&mut store, front());
        store.apply(CanvasMutation::ToggleLock { id: b }).unwrap();

        store
            .apply(CanvasMutation::Reorder {
                id: a,
                movement: ZOrderMove::Forward,
            })
            .unwrap();
        assert_eq!((z(&store, a), z(&store, b), z(&store, c)), (2, 1, 0));
    }

    #[test]
    fn clear_view_keeps_locked_and_other_views() {
        let mut store = CanvasStore::new();
        let keep_locked = add_shape(&mut store, front());
        store
            .apply(CanvasMutation::ToggleLock { id: keep_locked })
            .unwrap();
        add_text(&mut store, front());
        let back = add_text(&mut store, ViewId::intern("back"));

        store
            .apply(CanvasMutation::ClearView { view: front() })
            .unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.object(keep_locked).is_some());
        assert!(store.object(back).is_some());
        // Texts are listed before shapes, so the back view is seen first.
        assert_eq!(store.views(), vec![ViewId::intern("back"), front()]);
    }

    #[test]
    fn select_is_exclusive_across_kinds() {
        let mut store = CanvasStore::new();
        let shape = add_shape(&mut store, front());
        let text = add_text(&mut store, front());
        assert!(store.select(Some(shape)));
        assert_eq!(store.selected_text_id(), None);
        assert!(store.select(Some(text)));
        assert_eq!(store.selected_shape_id(), None);
        assert!(store.select(None));
        assert_eq!(store.selected_id(), None);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut store = CanvasStore::new();
        let shape = add_shape(&mut store, front());
        let before = store.shape(shape).unwrap().clone();

        let nan_x = CanvasMutation::UpdateShape {
            id: shape,
            patch: Patch::transform(TransformPatch {
                x: Some(f32::NAN),
                ..Default::default()
            }),
        };
        assert_eq!(store.apply(nan_x.clone()).unwrap(), MutationOutcome::Unchanged);
        assert_eq!(store.apply(nan_x).unwrap(), MutationOutcome::Unchanged);

        let infinite_width = CanvasMutation::UpdateShape {
            id: shape,
            patch: Patch::payload(ShapePatch {
                width: Some(f32::INFINITY),
                ..Default::default()
            }),
        };
        assert_eq!(
            store.apply(infinite_width).unwrap(),
            MutationOutcome::Unchanged
        );

        let nudge = CanvasMutation::Nudge {
            id: shape,
            dx: f32::NAN,
            dy: 0.0,
        };
        assert_eq!(store.apply(nudge).unwrap(), MutationOutcome::Unchanged);
        assert_eq!(store.shape(shape), Some(&before));
    }

    #[test]
    fn load_document_renumbers_each_view() {
        let mut source = CanvasStore::new();
        let low = add_shape(&mut source, front());
        let high = add_text(&mut source, front());
        let back = add_shape(&mut source, ViewId::intern("back"));
        let mut doc = source.to_document();
        doc.shapes[0].z_index = i32::MIN;
        doc.texts[0].z_index = i32::MAX;
        doc.shapes[1].z_index = 40;

        let mut store = CanvasStore::new();
        store.load_document(doc);
        assert_eq!(z(&store, low), 0);
        assert_eq!(z(&store, high), 1);
        assert_eq!(z(&store, back), 0);
    }
}
