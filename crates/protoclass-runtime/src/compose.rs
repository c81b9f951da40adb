//! Multiple-inheritance composition.
//!
//! Two parents `a` and `b` are merged into a synthetic class that is an
//! ordinary subclass of `a` with `b`'s own members laid over it. Longer parent
//! lists are reduced pairwise from the left, so each new parent is laid over
//! everything accumulated so far and the right-most parent wins a conflict.
//!
//! How `b`'s members get onto the merged class depends on the factory's
//! [`Strategy`]:
//!
//! - `snapshot` and `none` copy `b`'s own members once. Later changes to `b`
//!   stay invisible to the merged class.
//! - `live` installs `b`'s namespaces as overlays, consulted on every lookup
//!   between the merged class's own members and `a`'s chain.
//!
//! Either way only `b`'s own members are laid over `a`; what `b` inherits
//! from its own ancestors is not. Members that reach the merged class through
//! `a` are always live, because that part is plain chaining.

use tracing::debug;

use crate::class::{Class, ClassFactory};
use crate::strategy::Strategy;

impl ClassFactory {
    /// Merge `a` and `b` into a synthetic parent class.
    ///
    /// The result has `a` as its parent and `b` as its mixin, so ancestry
    /// queries can still tell the two apart.
    pub fn compose_pair(&self, a: &Class, b: &Class) -> Class {
        match self.strategy() {
            Strategy::Live => {
                let merged = Class::derive_with_mixin(a, b, true);
                debug!(
                    merged = %merged.id(),
                    parent = %a.id(),
                    mixin = %b.id(),
                    strategy = %self.strategy(),
                    "composed classes"
                );
                merged
            }
            Strategy::Snapshot | Strategy::None => {
                let merged = Class::derive_with_mixin(a, b, false);
                let statics = merged.statics().absorb_own(b.statics());
                let members = merged.members().absorb_own(b.members());
                debug!(
                    merged = %merged.id(),
                    parent = %a.id(),
                    mixin = %b.id(),
                    strategy = %self.strategy(),
                    statics,
                    members,
                    "composed classes"
                );
                merged
            }
        }
    }
}
