use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for object and view ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Process-wide counter behind generated object ids.
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identifier of a placed canvas object (image, text, or shape).
///
/// Internally a 4-byte `Spur` index.
/// Generated ids are unique for the lifetime of the process.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(Spur);

impl ObjectId {
    /// Intern an existing id string (e.g. one handed back by the UI).
    pub fn intern(s: &str) -> Self {
        ObjectId(INTERNER.get_or_intern(s))
    }

    /// Look up an id string without interning it. Returns `None` if the
    /// string was never produced by this process.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(ObjectId)
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh id with a kind prefix (e.g. `image_4`, `text_7`).
    ///
    /// Skips any candidate already interned, so ids loaded from an imported
    /// document are never handed out again.
    pub fn with_prefix(prefix: &str) -> Self {
        loop {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{prefix}_{n}");
            if INTERNER.get(candidate.as_str()).is_none() {
                return Self::intern(&candidate);
            }
            log::trace!("id {candidate} already taken, skipping");
        }
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ObjectId::intern(&s))
    }
}

/// One photographed angle of a product (`front`, `back`, …).
/// Every canvas object belongs to exactly one view.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(Spur);

impl ViewId {
    pub fn intern(s: &str) -> Self {
        ViewId(INTERNER.get_or_intern(s))
    }

    /// Like `ObjectId::lookup`: `None` for a name never interned.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(ViewId)
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// A view with an empty name cannot own objects.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl fmt::Debug for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view:{}", self.as_str())
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ViewId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ViewId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ViewId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ObjectId::intern("text_front_title");
        let b = ObjectId::intern("text_front_title");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "text_front_title");
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ObjectId::with_prefix("image");
        let b = ObjectId::with_prefix("image");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("image_"));
    }

    #[test]
    fn lookup_does_not_intern() {
        assert!(ObjectId::lookup("never_seen_before_42").is_none());
        let id = ObjectId::intern("seen_once");
        assert_eq!(ObjectId::lookup("seen_once"), Some(id));
    }

    #[test]
    fn empty_view_is_detected() {
        assert!(ViewId::intern("").is_empty());
        assert!(!ViewId::intern("front").is_empty());
    }

    #[test]
    fn view_lookup_does_not_intern() {
        assert!(ViewId::lookup("no_such_view_17").is_none());
        assert!(ViewId::lookup("no_such_view_17").is_none());
        let back = ViewId::intern("back");
        assert_eq!(ViewId::lookup("back"), Some(back));
    }
}
