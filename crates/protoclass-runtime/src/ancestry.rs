//! Subclass queries over the recorded parent and mixin links.

use std::collections::HashSet;

use crate::class::Class;

/// Whether `cls` is `ancestor` or descends from it.
///
/// The primary parent chain is always followed. Mixin links, which only
/// composed classes carry, are followed when `include_mixins` is set.
/// Each class is visited once, so shared ancestors reached through several
/// paths are not walked again.
pub fn is_subclass(cls: &Class, ancestor: &Class, include_mixins: bool) -> bool {
    let mut visited = HashSet::new();
    let mut pending = vec![cls];
    while let Some(class) = pending.pop() {
        if class.ptr_eq(ancestor) {
            return true;
        }
        if !visited.insert(class.as_ptr()) {
            continue;
        }
        if include_mixins {
            pending.extend(class.mixin());
        }
        pending.extend(class.parent());
    }
    false
}

/// The primary parent chain of `cls`, nearest first, excluding `cls`.
pub fn ancestors(cls: &Class) -> impl Iterator<Item = &Class> {
    std::iter::successors(cls.parent(), |class| class.parent())
}
