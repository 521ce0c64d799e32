//! Canonical keys for format deduplication

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Canonical byte key identifying a format (or one of its attribute
/// bundles) by content.
///
/// Two formats are the same format exactly when their keys are
/// byte-identical, so a key serves both as the equality witness and as the
/// lookup key in deduplication tables. The encoding is deterministic across
/// runs and processes: no hashing, no pointer- or environment-dependent
/// input. Cloning is O(1) (the buffer is shared).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FormatKey(Rc<[u8]>);

impl FormatKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the key in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty (never computed) key.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for FormatKey {
    fn default() -> Self {
        FormatKey(Rc::from(Vec::new()))
    }
}

impl fmt::Debug for FormatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FormatKey(")?;
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

/// Fixed-order byte encoder behind [`FormatKey`].
///
/// All multi-byte values are written big-endian. Variable-length payloads
/// (strings, nested keys) are length-prefixed so adjacent fields can never
/// alias each other, and optional values carry a presence byte.
#[derive(Debug, Default)]
pub struct KeyBuilder {
    buf: Vec<u8>,
}

impl KeyBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a preallocated buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append a single byte.
    pub fn push_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append a `u16` (big-endian).
    pub fn push_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Append a `u32` (big-endian).
    pub fn push_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Append an `i32` (big-endian).
    pub fn push_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Append an `f64` as its IEEE-754 bit pattern (big-endian).
    pub fn push_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_bits().to_be_bytes());
    }

    /// Append a bool as one byte.
    pub fn push_bool(&mut self, value: bool) {
        self.buf.push(value as u8);
    }

    /// Append a string as u32 length + UTF-8 bytes.
    pub fn push_str(&mut self, value: &str) {
        self.push_u32(value.len() as u32);
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Append an optional string as a presence byte + string.
    pub fn push_opt_str(&mut self, value: Option<&str>) {
        match value {
            Some(s) => {
                self.buf.push(1);
                self.push_str(s);
            }
            None => self.buf.push(0),
        }
    }

    /// Append a nested key as u32 length + bytes.
    pub fn push_key(&mut self, key: &FormatKey) {
        self.push_u32(key.len() as u32);
        self.buf.extend_from_slice(key.as_bytes());
    }

    /// Finish and produce the key.
    pub fn finish(self) -> FormatKey {
        FormatKey(Rc::from(self.buf))
    }
}

/// Cached registry index for a bundle or whole value.
///
/// The index value is retained even after invalidation (callers are expected
/// to consult [`IndexSlot::is_valid`] first); assigning a new index
/// revalidates the slot.
#[derive(Debug, Clone, Default)]
pub(crate) struct IndexSlot {
    index: Cell<Option<u32>>,
    valid: Cell<bool>,
}

impl IndexSlot {
    pub(crate) fn get(&self) -> Option<u32> {
        self.index.get()
    }

    pub(crate) fn set(&self, index: u32) {
        self.index.set(Some(index));
        self.valid.set(true);
    }

    pub(crate) fn invalidate(&self) {
        self.valid.set(false);
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.valid.get() && self.index.get().is_some()
    }
}

/// Dirty flag, cached sub-key and cached index shared by the font, border
/// and fill bundles.
///
/// A bundle starts dirty (no key computed yet). Recomputing the key clears
/// the dirty flag and invalidates the cached index in the same step: an
/// index assigned before the content changed must not be trusted again just
/// because the key has been refreshed.
#[derive(Debug, Clone)]
pub(crate) struct KeyCache {
    dirty: Cell<bool>,
    key: RefCell<FormatKey>,
    slot: IndexSlot,
}

impl Default for KeyCache {
    fn default() -> Self {
        Self {
            dirty: Cell::new(true),
            key: RefCell::new(FormatKey::default()),
            slot: IndexSlot::default(),
        }
    }
}

impl KeyCache {
    pub(crate) fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Return the cached key, recomputing it via `build` when dirty.
    pub(crate) fn key_with(&self, build: impl FnOnce(&mut KeyBuilder)) -> FormatKey {
        if self.dirty.get() {
            let mut builder = KeyBuilder::with_capacity(64);
            build(&mut builder);
            *self.key.borrow_mut() = builder.finish();
            self.dirty.set(false);
            self.slot.invalidate();
        }
        self.key.borrow().clone()
    }

    pub(crate) fn index(&self) -> Option<u32> {
        self.slot.get()
    }

    pub(crate) fn set_index(&self, index: u32) {
        self.slot.set(index);
    }

    pub(crate) fn index_valid(&self) -> bool {
        !self.dirty.get() && self.slot.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_determinism() {
        let build = || {
            let mut b = KeyBuilder::new();
            b.push_u32(42);
            b.push_str("Calibri");
            b.push_f64(11.0);
            b.push_bool(true);
            b.finish()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_length_prefix_disambiguates() {
        // "ab" + "c" must not encode to the same bytes as "a" + "bc".
        let mut left = KeyBuilder::new();
        left.push_str("ab");
        left.push_str("c");
        let mut right = KeyBuilder::new();
        right.push_str("a");
        right.push_str("bc");
        assert_ne!(left.finish(), right.finish());
    }

    #[test]
    fn test_opt_str_presence_byte() {
        let mut some = KeyBuilder::new();
        some.push_opt_str(Some(""));
        let mut none = KeyBuilder::new();
        none.push_opt_str(None);
        assert_ne!(some.finish(), none.finish());
    }

    #[test]
    fn test_key_cache_recompute_invalidates_index() {
        let cache = KeyCache::default();
        let key = cache.key_with(|b| b.push_u8(1));
        assert!(!cache.is_dirty());
        assert!(!key.is_empty());

        cache.set_index(3);
        assert!(cache.index_valid());

        // Mutation: dirty until the key is recomputed, and the old index
        // stays untrusted afterwards.
        cache.mark_dirty();
        assert!(!cache.index_valid());
        let rekey = cache.key_with(|b| b.push_u8(2));
        assert_ne!(key, rekey);
        assert!(!cache.index_valid());
        assert_eq!(cache.index(), Some(3));

        cache.set_index(7);
        assert!(cache.index_valid());
    }

    #[test]
    fn test_clean_cache_skips_rebuild() {
        let cache = KeyCache::default();
        let first = cache.key_with(|b| b.push_u8(1));
        // Second read must return the cached bytes without invoking the
        // builder closure.
        let second = cache.key_with(|_| panic!("key rebuilt while clean"));
        assert_eq!(first, second);
    }
}
