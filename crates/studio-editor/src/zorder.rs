//! Z-order resolution within a view.
//!
//! Works on the view's combined layer list (images, texts, and shapes
//! together, ascending by z-index) and decides which z-index writes a
//! reorder needs. Locked objects never move and are skipped over, not
//! swapped with. Single steps are transpositions of two z-index values, so
//! every other object keeps its position in the order.

use smallvec::SmallVec;
use studio_core::{LayerItem, ObjectId, ViewId};

/// Layer list of one view. Most views hold a handful of objects.
pub type ViewLayers = SmallVec<[LayerItem; 16]>;

/// Requested stacking move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrderMove {
    /// One step up, past the nearest unlocked neighbor above.
    Forward,
    /// One step down, past the nearest unlocked neighbor below.
    Backward,
    /// Above everything in the view.
    ToFront,
    /// Below everything in the view.
    ToBack,
}

impl ZOrderMove {
    pub fn label(self) -> &'static str {
        match self {
            ZOrderMove::Forward => "Bring forward",
            ZOrderMove::Backward => "Send backward",
            ZOrderMove::ToFront => "Bring to front",
            ZOrderMove::ToBack => "Send to back",
        }
    }
}

/// The z-index writes a reorder resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZChange {
    /// Exchange the z-index values of two objects.
    Swap(ObjectId, ObjectId),
    /// Give one object a new z-index outside the current range.
    Set(ObjectId, i32),
}

/// Collect the layers of `view` from `items`, ascending by z-index.
pub fn view_layers(items: impl IntoIterator<Item = LayerItem>, view: ViewId) -> ViewLayers {
    let mut layers: ViewLayers = items.into_iter().filter(|l| l.view == view).collect();
    layers.sort_by_key(|l| l.z_index);
    layers
}

/// Next free z-index on top of `layers` (0 for an empty view). `None`
/// when the topmost layer already sits at `i32::MAX`.
pub fn next_z(layers: &[LayerItem]) -> Option<i32> {
    match layers.iter().map(|l| l.z_index).max() {
        Some(top) => above(top),
        None => Some(0),
    }
}

fn above(z: i32) -> Option<i32> {
    let next = z.checked_add(1);
    if next.is_none() {
        log::warn!("z-index {z} has no room above it");
    }
    next
}

fn below(z: i32) -> Option<i32> {
    let next = z.checked_sub(1);
    if next.is_none() {
        log::warn!("z-index {z} has no room below it");
    }
    next
}

/// Resolve a reorder of `id` within `layers` (one view, ascending z).
///
/// Returns `None` when nothing should change: unknown or locked target, no
/// unlocked neighbor in the requested direction, already at the extreme, or
/// no z-index left past the extreme.
pub fn resolve(layers: &[LayerItem], id: ObjectId, movement: ZOrderMove) -> Option<ZChange> {
    let pos = layers.iter().position(|l| l.id == id)?;
    if layers[pos].locked {
        return None;
    }
    match movement {
        ZOrderMove::Forward => layers[pos + 1..]
            .iter()
            .find(|l| !l.locked)
            .map(|neighbor| ZChange::Swap(id, neighbor.id)),
        ZOrderMove::Backward => layers[..pos]
            .iter()
            .rev()
            .find(|l| !l.locked)
            .map(|neighbor| ZChange::Swap(id, neighbor.id)),
        ZOrderMove::ToFront => {
            let top = layers.last()?;
            if top.id == id {
                return None;
            }
            above(top.z_index).map(|z| ZChange::Set(id, z))
        }
        ZOrderMove::ToBack => {
            let bottom = layers.first()?;
            if bottom.id == id {
                return None;
            }
            below(bottom.z_index).map(|z| ZChange::Set(id, z))
        }
    }
}
