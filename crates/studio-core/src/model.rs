//! Canvas object model for the product customization studio.
//!
//! A design is a set of placeable objects (images, text, shapes), each
//! belonging to one product view. The three kinds share a common envelope
//! (`CanvasObject<P>`: id, view, transform, stacking, lock state) and differ
//! only in their payload `P`. Partial updates arrive as `Patch<T>` values
//! where every field is optional.

use crate::id::{ObjectId, ViewId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0], serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_finite(&self) -> bool {
        [self.r, self.g, self.b, self.a].iter().all(|c| c.is_finite())
    }

    /// Build from 8-bit channels. Values built this way survive a hex round-trip exactly.
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| -> Option<f32> {
            Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        );
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color `{s}`")))
    }
}

// ─── Transform ───────────────────────────────────────────────────────────

/// Placement of an object within its view.
///
/// `x`/`y` are percentages of the view bounds locating the object's center
/// (conceptually 0..100). `rotation` is in degrees, `scale` a positive
/// multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl Transform {
    /// Merge the present fields of `patch` into this transform.
    pub fn apply(&mut self, patch: &TransformPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
        if let Some(scale) = patch.scale {
            self.scale = scale;
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.rotation, self.scale]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Partial transform update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
}

impl TransformPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ─── Object envelope ─────────────────────────────────────────────────────

/// The three kinds of placeable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Image,
    Text,
    Shape,
}

impl ObjectKind {
    /// Lowercase name, also the prefix of generated ids (`image_4`).
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Image => "image",
            ObjectKind::Text => "text",
            ObjectKind::Shape => "shape",
        }
    }
}

/// A payload that can ride inside a `CanvasObject`.
pub trait Payload: Clone + PartialEq + fmt::Debug {
    /// The partial-update type for this payload.
    type Patch: Default + fmt::Debug;

    const KIND: ObjectKind;

    /// Merge the present fields of `patch` into this payload.
    fn apply(&mut self, patch: &Self::Patch);

    /// Whether every numeric field holds a finite value.
    fn is_finite(&self) -> bool;
}

/// A placed object on the canvas: common envelope plus a kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasObject<P> {
    pub id: ObjectId,
    pub view: ViewId,
    pub transform: Transform,
    /// Stacking key, unique within the view across all kinds. Higher draws on top.
    pub z_index: i32,
    pub locked: bool,
    /// Set once the object has been placed somewhere other than where it
    /// was first created (duplicates start out moved).
    pub moved_from_default: bool,
    pub payload: P,
}

impl<P: Payload> CanvasObject<P> {
    /// Create an unlocked object with a freshly generated id.
    pub fn new(view: ViewId, transform: Transform, z_index: i32, payload: P) -> Self {
        Self {
            id: ObjectId::with_prefix(P::KIND.name()),
            view,
            transform,
            z_index,
            locked: false,
            moved_from_default: false,
            payload,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        P::KIND
    }

    /// No NaN or infinity anywhere in the transform or payload.
    pub fn is_finite(&self) -> bool {
        self.transform.is_finite() && self.payload.is_finite()
    }

    /// Merge a full patch (transform + payload) into this object.
    pub fn apply(&mut self, patch: &Patch<P::Patch>) {
        self.transform.apply(&patch.transform);
        self.payload.apply(&patch.payload);
    }

    pub fn layer_item(&self) -> LayerItem {
        LayerItem {
            kind: P::KIND,
            id: self.id,
            view: self.view,
            z_index: self.z_index,
            locked: self.locked,
        }
    }
}

/// Partial update for a `CanvasObject<P>`: transform fields and payload
/// fields side by side, every one optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patch<T> {
    #[serde(flatten)]
    pub transform: TransformPatch,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Default> Patch<T> {
    /// A patch touching only the transform.
    pub fn transform(transform: TransformPatch) -> Self {
        Self {
            transform,
            payload: T::default(),
        }
    }

    /// A patch touching only the payload.
    pub fn payload(payload: T) -> Self {
        Self {
            transform: TransformPatch::default(),
            payload,
        }
    }
}

/// Owned summary of any object, used for the combined layers list and
/// z-order resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerItem {
    pub kind: ObjectKind,
    pub id: ObjectId,
    pub view: ViewId,
    pub z_index: i32,
    pub locked: bool,
}

// ─── Images ──────────────────────────────────────────────────────────────

/// Where a placed image came from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImageOrigin {
    /// An image the customer uploaded: upload batch id + image id within it.
    #[serde(rename_all = "camelCase")]
    Upload { upload_id: String, image_id: String },
    /// A clipart / library image.
    #[serde(rename_all = "camelCase")]
    Library { clipart_id: String },
    /// Anything else (generated images, direct URLs).
    #[default]
    External,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    /// Source reference (URL or data URL) handed to the renderer.
    pub src: String,
    /// Raw image bytes, shared between snapshots.
    #[serde(default)]
    pub data: Option<Arc<[u8]>>,
    /// Natural width and height in pixels, when known.
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub origin: ImageOrigin,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImagePatch {
    pub src: Option<String>,
}

impl Payload for ImagePayload {
    type Patch = ImagePatch;
    const KIND: ObjectKind = ObjectKind::Image;

    fn apply(&mut self, patch: &ImagePatch) {
        if let Some(src) = &patch.src {
            self.src.clone_from(src);
        }
    }

    fn is_finite(&self) -> bool {
        true
    }
}

// ─── Text ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
    Overline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

/// Typography for a text object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f32,
    pub font_weight: u16, // 100..900
    pub font_style: FontStyle,
    pub decoration: TextDecoration,
    pub transform: TextTransform,
    pub line_height: f32,
    pub letter_spacing: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".into(),
            font_size: 24.0,
            font_weight: 400,
            font_style: FontStyle::Normal,
            decoration: TextDecoration::None,
            transform: TextTransform::None,
            line_height: 1.2,
            letter_spacing: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    pub enabled: bool,
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub enabled: bool,
    pub color: Color,
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            enabled: false,
            color: Color::rgba8(0, 0, 0, 128),
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 0.0,
        }
    }
}

impl Shadow {
    /// A shadow is visible when any of its geometry is non-zero.
    pub fn has_geometry(&self) -> bool {
        self.offset_x != 0.0 || self.offset_y != 0.0 || self.blur != 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPayload {
    pub content: String,
    pub style: TextStyle,
    pub fill: Color,
    pub outline: Outline,
    pub shadow: Shadow,
    /// Curvature amount for arched text. Stored, not rendered yet.
    pub arch: f32,
}

impl Default for TextPayload {
    fn default() -> Self {
        Self {
            content: "Your text".into(),
            style: TextStyle::default(),
            fill: Color::BLACK,
            outline: Outline::default(),
            shadow: Shadow::default(),
            arch: 0.0,
        }
    }
}

impl TextPayload {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextPatch {
    pub content: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<u16>,
    pub font_style: Option<FontStyle>,
    pub text_decoration: Option<TextDecoration>,
    pub text_transform: Option<TextTransform>,
    pub line_height: Option<f32>,
    pub letter_spacing: Option<f32>,
    pub fill: Option<Color>,
    pub outline_color: Option<Color>,
    pub outline_width: Option<f32>,
    pub shadow_color: Option<Color>,
    pub shadow_offset_x: Option<f32>,
    pub shadow_offset_y: Option<f32>,
    pub shadow_blur: Option<f32>,
    pub arch: Option<f32>,
}

impl Payload for TextPayload {
    type Patch = TextPatch;
    const KIND: ObjectKind = ObjectKind::Text;

    /// Merges the patch, then re-derives the outline/shadow `enabled` flags
    /// from their numeric parameters when those parameters were touched.
    fn apply(&mut self, patch: &TextPatch) {
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        if let Some(family) = &patch.font_family {
            self.style.font_family.clone_from(family);
        }
        if let Some(size) = patch.font_size {
            self.style.font_size = size;
        }
        if let Some(weight) = patch.font_weight {
            self.style.font_weight = weight;
        }
        if let Some(font_style) = patch.font_style {
            self.style.font_style = font_style;
        }
        if let Some(decoration) = patch.text_decoration {
            self.style.decoration = decoration;
        }
        if let Some(transform) = patch.text_transform {
            self.style.transform = transform;
        }
        if let Some(line_height) = patch.line_height {
            self.style.line_height = line_height;
        }
        if let Some(spacing) = patch.letter_spacing {
            self.style.letter_spacing = spacing;
        }
        if let Some(fill) = patch.fill {
            self.fill = fill;
        }
        if let Some(arch) = patch.arch {
            self.arch = arch;
        }

        if let Some(color) = patch.outline_color {
            self.outline.color = color;
        }
        if let Some(width) = patch.outline_width {
            self.outline.width = width;
            self.outline.enabled = width > 0.0;
        }

        if let Some(color) = patch.shadow_color {
            self.shadow.color = color;
        }
        let mut shadow_touched = false;
        if let Some(dx) = patch.shadow_offset_x {
            self.shadow.offset_x = dx;
            shadow_touched = true;
        }
        if let Some(dy) = patch.shadow_offset_y {
            self.shadow.offset_y = dy;
            shadow_touched = true;
        }
        if let Some(blur) = patch.shadow_blur {
            self.shadow.blur = blur;
            shadow_touched = true;
        }
        if shadow_touched {
            self.shadow.enabled = self.shadow.has_geometry();
        }
    }

    fn is_finite(&self) -> bool {
        let style = &self.style;
        let shadow = &self.shadow;
        [
            style.font_size,
            style.line_height,
            style.letter_spacing,
            self.outline.width,
            shadow.offset_x,
            shadow.offset_y,
            shadow.blur,
            self.arch,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.fill.is_finite()
            && self.outline.color.is_finite()
            && shadow.color.is_finite()
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Triangle,
    Star,
}

impl ShapeKind {
    /// Triangle and star are accepted and stored but have no renderer yet.
    pub fn is_renderable(self) -> bool {
        matches!(self, ShapeKind::Rectangle | ShapeKind::Circle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapePayload {
    pub kind: ShapeKind,
    pub width: f32,
    pub height: f32,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f32,
}

impl Default for ShapePayload {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Rectangle,
            width: 100.0,
            height: 100.0,
            fill: Color::rgba8(59, 130, 246, 255),
            stroke: Color::BLACK,
            stroke_width: 0.0,
        }
    }
}

impl ShapePayload {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapePatch {
    pub kind: Option<ShapeKind>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f32>,
}

impl Payload for ShapePayload {
    type Patch = ShapePatch;
    const KIND: ObjectKind = ObjectKind::Shape;

    fn apply(&mut self, patch: &ShapePatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(fill) = patch.fill {
            self.fill = fill;
        }
        if let Some(stroke) = patch.stroke {
            self.stroke = stroke;
        }
        if let Some(stroke_width) = patch.stroke_width {
            self.stroke_width = stroke_width;
        }
    }

    fn is_finite(&self) -> bool {
        [self.width, self.height, self.stroke_width]
            .iter()
            .all(|v| v.is_finite())
            && self.fill.is_finite()
            && self.stroke.is_finite()
    }
}

pub type ImageObject = CanvasObject<ImagePayload>;
pub type TextObject = CanvasObject<TextPayload>;
pub type ShapeObject = CanvasObject<ShapePayload>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#6C5CE7").unwrap();
        assert_eq!(c.to_hex(), "#6C5CE7");

        let c2 = Color::from_hex("#FF000080").unwrap();
        assert!((c2.a - 128.0 / 255.0).abs() < 0.01);
        assert_eq!(c2.to_hex().len(), 9);

        assert_eq!(Color::from_hex("#fff").unwrap().to_hex(), "#FFFFFF");
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GG0000").is_none());
    }

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::WHITE).unwrap();
        assert_eq!(json, "\"#FFFFFF\"");
        let back: Color = serde_json::from_str("\"#000\"").unwrap();
        assert_eq!(back, Color::BLACK);
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn outline_enabled_follows_width() {
        let mut text = TextPayload::new("Hello");
        text.apply(&TextPatch {
            outline_width: Some(2.0),
            ..Default::default()
        });
        assert!(text.outline.enabled);
        assert_eq!(text.outline.width, 2.0);

        text.apply(&TextPatch {
            outline_width: Some(0.0),
            ..Default::default()
        });
        assert!(!text.outline.enabled);
    }

    #[test]
    fn outline_color_alone_keeps_enabled_flag() {
        let mut text = TextPayload::new("Hello");
        text.outline.enabled = true;
        text.outline.width = 3.0;
        text.apply(&TextPatch {
            outline_color: Some(Color::WHITE),
            ..Default::default()
        });
        assert!(text.outline.enabled);
        assert_eq!(text.outline.color, Color::WHITE);
    }

    #[test]
    fn shadow_enabled_follows_geometry() {
        let mut text = TextPayload::new("Hello");
        text.apply(&TextPatch {
            shadow_blur: Some(4.0),
            ..Default::default()
        });
        assert!(text.shadow.enabled);

        // Zeroing blur while an offset is still set keeps the shadow on.
        text.apply(&TextPatch {
            shadow_offset_x: Some(1.0),
            ..Default::default()
        });
        text.apply(&TextPatch {
            shadow_blur: Some(0.0),
            ..Default::default()
        });
        assert!(text.shadow.enabled);

        text.apply(&TextPatch {
            shadow_offset_x: Some(0.0),
            ..Default::default()
        });
        assert!(!text.shadow.enabled);
    }

    #[test]
    fn patch_deserializes_flat_camel_case() {
        let patch: Patch<TextPatch> =
            serde_json::from_str(r##"{"x": 12.5, "fontSize": 32, "fill": "#FF0000"}"##).unwrap();
        assert_eq!(patch.transform.x, Some(12.5));
        assert_eq!(patch.transform.y, None);
        assert_eq!(patch.payload.font_size, Some(32.0));
        assert_eq!(patch.payload.fill, Some(Color::rgba(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn shape_kinds_renderable() {
        assert!(ShapeKind::Rectangle.is_renderable());
        assert!(ShapeKind::Circle.is_renderable());
        assert!(!ShapeKind::Triangle.is_renderable());
        assert!(!ShapeKind::Star.is_renderable());
    }

    #[test]
    fn new_object_is_unlocked_with_prefixed_id() {
        let shape = ShapeObject::new(
            ViewId::intern("front"),
            Transform::default(),
            3,
            ShapePayload::new(ShapeKind::Circle),
        );
        assert!(shape.id.as_str().starts_with("shape_"));
        assert!(!shape.locked);
        assert!(!shape.moved_from_default);
        assert_eq!(shape.layer_item().z_index, 3);
        assert_eq!(shape.kind(), ObjectKind::Shape);
    }

    #[test]
    fn nan_anywhere_is_not_finite() {
        let mut text = TextObject::new(
            ViewId::intern("front"),
            Transform::default(),
            0,
            TextPayload::default(),
        );
        assert!(text.is_finite());

        text.payload.shadow.blur = f32::NAN;
        assert!(!text.is_finite());
        text.payload.shadow.blur = 0.0;

        text.transform.scale = f32::INFINITY;
        assert!(!text.is_finite());
    }
}
