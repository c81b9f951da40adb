//! Chained member namespaces.
//!
//! A [`Namespace`] is an ordered map of own members plus an optional link to
//! the namespace it inherits from. Lookups check the own map first and fall
//! through to the parent chain, so a member added to an ancestor is
//! visible to every descendant without copying.
//!
//! A namespace may also carry a live *overlay*: another namespace whose own
//! members are consulted between this namespace's own members and its parent.
//! Composed classes use it to expose their mixin's current members.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use crate::value::Value;

#[derive(Clone)]
pub struct Namespace(Rc<NamespaceData>);

struct NamespaceData {
    entries: RefCell<IndexMap<String, Value>>,
    overlay: Option<Namespace>,
    parent: Option<Namespace>,
}

impl Namespace {
    /// A namespace that inherits from nothing.
    pub fn new() -> Self {
        Self::with_links(None, None)
    }

    /// A namespace whose lookups fall through to `parent`.
    pub fn chained(parent: &Namespace) -> Self {
        Self::with_links(Some(parent.clone()), None)
    }

    /// A namespace that consults `overlay`'s own members before `parent`.
    pub fn delegating(parent: &Namespace, overlay: &Namespace) -> Self {
        Self::with_links(Some(parent.clone()), Some(overlay.clone()))
    }

    fn with_links(parent: Option<Namespace>, overlay: Option<Namespace>) -> Self {
        Namespace(Rc::new(NamespaceData {
            entries: RefCell::new(IndexMap::new()),
            overlay,
            parent,
        }))
    }

    /// Resolve `key`: own members, then the overlay's own members, then the
    /// parent chain.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut current = Some(self);
        while let Some(ns) = current {
            if let Some(value) = ns.get_own(key) {
                return Some(value);
            }
            if let Some(value) = ns.0.overlay.as_ref().and_then(|o| o.get_own(key)) {
                return Some(value);
            }
            current = ns.0.parent.as_ref();
        }
        None
    }

    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.0.entries.borrow().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn contains_own(&self, key: &str) -> bool {
        self.0.entries.borrow().contains_key(key)
    }

    /// Add or overwrite an own member, returning the previous own value.
    /// Ancestors are never touched.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.entries.borrow_mut().insert(key.into(), value.into())
    }

    /// Remove an own member. Lookups for `key` fall through to the ancestry
    /// again afterwards.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.entries.borrow_mut().shift_remove(key)
    }

    /// Own keys in insertion order.
    pub fn own_keys(&self) -> Vec<String> {
        self.0.entries.borrow().keys().cloned().collect()
    }

    /// Own entries in insertion order, cloned out of the map.
    pub fn own_entries(&self) -> Vec<(String, Value)> {
        self.0
            .entries
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Every key visible through this namespace, nearest first, each once.
    pub fn keys(&self) -> Vec<String> {
        let mut seen = IndexSet::new();
        let mut current = Some(self);
        while let Some(ns) = current {
            seen.extend(ns.0.entries.borrow().keys().cloned());
            if let Some(overlay) = &ns.0.overlay {
                seen.extend(overlay.0.entries.borrow().keys().cloned());
            }
            current = ns.0.parent.as_ref();
        }
        seen.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.0.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.entries.borrow().is_empty()
    }

    /// Copy every own member of `source` into this namespace, overwriting
    /// keys that already exist. Returns how many members were copied.
    pub(crate) fn absorb_own(&self, source: &Namespace) -> usize {
        let entries = source.own_entries();
        let count = entries.len();
        let mut own = self.0.entries.borrow_mut();
        for (key, value) in entries {
            own.insert(key, value);
        }
        count
    }

    pub fn ptr_eq(&self, other: &Namespace) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Drop for NamespaceData {
    // Long parent chains are released iteratively.
    fn drop(&mut self) {
        let mut pending: Vec<Namespace> = self.parent.take().into_iter().collect();
        pending.extend(self.overlay.take());
        while let Some(ns) = pending.pop() {
            if let Ok(mut data) = Rc::try_unwrap(ns.0) {
                pending.extend(data.parent.take());
                pending.extend(data.overlay.take());
            }
        }
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.entries.borrow().iter()).finish()
    }
}
