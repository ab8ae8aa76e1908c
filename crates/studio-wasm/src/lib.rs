//! WASM bridge for the customization studio: exposes the canvas editing
//! session to the storefront's JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. Values cross the boundary
//! as strings: object ids as plain strings (empty = none), structured data
//! as JSON.

use serde::de::DeserializeOwned;
use studio_core::{
    DesignDocument, ImagePatch, ImagePayload, InMemoryAssets, ObjectId, ObjectKind, Patch,
    Payload, ShapePatch, ShapePayload, TextPatch, TextPayload, Transform, UploadedAsset, ViewId,
};
use studio_editor::{EditorConfig, ShortcutMap, Studio};
use wasm_bindgen::prelude::*;

/// The main WASM-facing canvas controller.
///
/// Owns one editing session and the uploaded assets registered by the host.
/// All interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct StudioCanvas {
    studio: Studio,
    assets: InMemoryAssets,
}

#[wasm_bindgen]
impl StudioCanvas {
    /// Create a new editing session. `config_json` is a partial
    /// `EditorConfig` in camelCase; empty or invalid JSON uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Self {
        console_error_panic_hook_setup();
        console_logger_setup();

        let config = EditorConfig::from_json(config_json).unwrap_or_else(|e| {
            log::error!("invalid editor config, using defaults: {e}");
            EditorConfig::default()
        });
        Self {
            studio: Studio::new(config),
            assets: InMemoryAssets::new(),
        }
    }

    // ─── Assets ──────────────────────────────────────────────────────────

    /// Register an uploaded image so `add_uploaded_image` can place it.
    pub fn register_asset(
        &mut self,
        upload_id: &str,
        image_id: &str,
        src: &str,
        data: &[u8],
        width: u32,
        height: u32,
    ) {
        self.assets.insert(
            upload_id,
            image_id,
            UploadedAsset {
                src: src.to_string(),
                data: data.into(),
                width,
                height,
            },
        );
    }

    // ─── Creation ────────────────────────────────────────────────────────

    /// Add an image to `view`. `json` holds optional transform and image
    /// fields (`{"src": "...", "x": 30}`). Returns the new id or `""`.
    pub fn add_image(&mut self, view: &str, json: &str) -> String {
        let Some((transform, payload)) = placement::<ImagePayload>(json) else {
            return String::new();
        };
        id_or_empty(self.studio.add_image(ViewId::intern(view), transform, payload))
    }

    /// Place a registered upload in `view`. Returns the new id or `""`.
    pub fn add_uploaded_image(&mut self, view: &str, upload_id: &str, image_id: &str) -> String {
        id_or_empty(self.studio.add_uploaded_image(
            ViewId::intern(view),
            upload_id,
            image_id,
            &self.assets,
        ))
    }

    /// Add a text object. `json` holds optional transform and text fields
    /// (`{"content": "Team", "fontSize": 32}`). Returns the new id or `""`.
    pub fn add_text(&mut self, view: &str, json: &str) -> String {
        let Some((transform, payload)) = placement::<TextPayload>(json) else {
            return String::new();
        };
        id_or_empty(self.studio.add_text(ViewId::intern(view), transform, payload))
    }

    /// Add a shape. `json` holds optional transform and shape fields
    /// (`{"kind": "circle", "fill": "#FF0000"}`). Returns the new id or `""`.
    pub fn add_shape(&mut self, view: &str, json: &str) -> String {
        let Some((transform, payload)) = placement::<ShapePayload>(json) else {
            return String::new();
        };
        id_or_empty(self.studio.add_shape(ViewId::intern(view), transform, payload))
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    /// Merge a flat camelCase patch into the object with `id`.
    /// Returns `true` if anything changed.
    pub fn update_object(&mut self, id: &str, patch_json: &str) -> bool {
        let Some(id) = ObjectId::lookup(id) else {
            return false;
        };
        match self.studio.kind_of(id) {
            Some(ObjectKind::Image) => parse::<Patch<ImagePatch>>(patch_json)
                .is_some_and(|patch| self.studio.update_image(id, patch)),
            Some(ObjectKind::Text) => parse::<Patch<TextPatch>>(patch_json)
                .is_some_and(|patch| self.studio.update_text(id, patch)),
            Some(ObjectKind::Shape) => parse::<Patch<ShapePatch>>(patch_json)
                .is_some_and(|patch| self.studio.update_shape(id, patch)),
            None => false,
        }
    }

    pub fn nudge(&mut self, id: &str, dx: f32, dy: f32) -> bool {
        ObjectId::lookup(id).is_some_and(|id| self.studio.nudge(id, dx, dy))
    }

    pub fn remove_object(&mut self, id: &str) -> bool {
        ObjectId::lookup(id).is_some_and(|id| self.studio.remove(id))
    }

    /// Duplicate an object. Returns the copy's id or `""`.
    pub fn duplicate_object(&mut self, id: &str) -> String {
        id_or_empty(ObjectId::lookup(id).and_then(|id| self.studio.duplicate(id)))
    }

    pub fn toggle_lock(&mut self, id: &str) -> bool {
        ObjectId::lookup(id).is_some_and(|id| self.studio.toggle_lock(id))
    }

    /// Select an object by id; `""` clears the selection.
    /// Returns `false` for unknown or locked objects.
    pub fn select(&mut self, id: &str) -> bool {
        if id.is_empty() {
            return self.studio.select(None);
        }
        ObjectId::lookup(id).is_some_and(|id| self.studio.select(Some(id)))
    }

    pub fn bring_forward(&mut self, id: &str) -> bool {
        ObjectId::lookup(id).is_some_and(|id| self.studio.bring_forward(id))
    }

    pub fn send_backward(&mut self, id: &str) -> bool {
        ObjectId::lookup(id).is_some_and(|id| self.studio.send_backward(id))
    }

    pub fn bring_to_front(&mut self, id: &str) -> bool {
        ObjectId::lookup(id).is_some_and(|id| self.studio.bring_to_front(id))
    }

    pub fn send_to_back(&mut self, id: &str) -> bool {
        ObjectId::lookup(id).is_some_and(|id| self.studio.send_to_back(id))
    }

    /// Remove every unlocked object in `view`.
    pub fn clear_view(&mut self, view: &str) -> bool {
        ViewId::lookup(view).is_some_and(|view| self.studio.clear_view(view))
    }

    // ─── History ─────────────────────────────────────────────────────────

    /// Undo the last action. Returns true if something was undone.
    pub fn undo(&mut self) -> bool {
        self.studio.undo().is_some()
    }

    /// Redo the last undone action. Returns true if something was redone.
    pub fn redo(&mut self) -> bool {
        self.studio.redo().is_some()
    }

    /// Call on pointer-down of a drag or at the start of a slider scrub.
    pub fn start_interactive_operation(&mut self, label: &str) {
        self.studio.start_interactive_operation(label);
    }

    /// Call on pointer-up / slider release.
    pub fn end_interactive_operation(&mut self) {
        self.studio.end_interactive_operation();
    }

    pub fn can_undo(&self) -> bool {
        self.studio.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.studio.can_redo()
    }

    /// Labels of the undoable actions, newest first, as a JSON array.
    pub fn get_undo_labels_json(&self) -> String {
        serde_json::to_string(&self.studio.history().undo_labels())
            .unwrap_or_else(|_| "[]".to_string())
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    /// Full canvas state (all three collections plus selection) as JSON.
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(&self.studio.store().snapshot()).unwrap_or_else(|e| {
            log::error!("cannot serialize canvas state: {e}");
            "{}".to_string()
        })
    }

    /// Layers of `view`, bottom to top, as a JSON array.
    pub fn get_layers_json(&self, view: &str) -> String {
        let Some(view) = ViewId::lookup(view) else {
            return "[]".to_string();
        };
        let layers = self.studio.layers(view);
        serde_json::to_string(layers.as_slice()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Get the selected object's id, or `""`.
    pub fn get_selected_id(&self) -> String {
        id_or_empty(self.studio.selected_id())
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Handle a keyboard event against the current selection.
    /// Returns JSON: `{"changed":bool,"action":"<name>"}` (`"none"` when
    /// the combo has no binding).
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let Some(action) = ShortcutMap::resolve(key, ctrl, shift, alt, meta) else {
            return r#"{"changed":false,"action":"none"}"#.to_string();
        };
        let changed = self.studio.dispatch(action);
        serde_json::json!({ "changed": changed, "action": action.name() }).to_string()
    }

    // ─── Documents ───────────────────────────────────────────────────────

    /// Export the design as pretty JSON. Returns `""` on failure.
    pub fn export_document(&self) -> String {
        self.studio.export_document().to_json().unwrap_or_else(|e| {
            log::error!("{e}");
            String::new()
        })
    }

    /// Replace the canvas with a JSON design document. Returns `false` and
    /// leaves the canvas untouched when the document is invalid.
    pub fn import_document(&mut self, json: &str) -> bool {
        let doc = match DesignDocument::from_json(json) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("{e}");
                return false;
            }
        };
        self.studio.import_document(doc).is_ok()
    }

    /// Export the design as MessagePack bytes (empty on failure).
    pub fn export_document_msgpack(&self) -> Vec<u8> {
        self.studio.export_document().to_msgpack().unwrap_or_else(|e| {
            log::error!("{e}");
            Vec::new()
        })
    }

    pub fn import_document_msgpack(&mut self, bytes: &[u8]) -> bool {
        match DesignDocument::from_msgpack(bytes) {
            Ok(doc) => self.studio.import_document(doc).is_ok(),
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn id_or_empty(id: Option<ObjectId>) -> String {
    id.map(|id| id.as_str().to_string()).unwrap_or_default()
}

fn parse<T: DeserializeOwned>(json: &str) -> Option<T> {
    let text = if json.trim().is_empty() { "{}" } else { json };
    serde_json::from_str(text)
        .map_err(|e| log::error!("invalid JSON from host: {e}"))
        .ok()
}

/// Build a transform and payload from a flat creation JSON by applying it as
/// a patch over the defaults.
fn placement<P>(json: &str) -> Option<(Transform, P)>
where
    P: Payload + Default,
    Patch<P::Patch>: DeserializeOwned,
{
    let patch: Patch<P::Patch> = parse(json)?;
    let mut transform = Transform::default();
    transform.apply(&patch.transform);
    let mut payload = P::default();
    payload.apply(&patch.payload);
    Some((transform, payload))
}

/// Route panics to the browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("studio WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

/// `log` backend writing to the browser console.
#[cfg(target_arch = "wasm32")]
struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg: JsValue = format!("[{}] {}", record.target(), record.args()).into();
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

fn console_logger_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        static LOGGER: ConsoleLogger = ConsoleLogger;
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }
}
