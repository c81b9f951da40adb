//! Class descriptors and the class factory.
//!
//! A [`Class`] owns two namespaces: `statics` for class-level members and
//! `members` for what its instances expose. Both are chained onto the
//! parent's namespaces, or onto the shared root namespaces for a class
//! without a parent. Classes with two or more parents go through the
//! composition resolver first (see [`crate::compose`]).

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace, warn};

use crate::ancestry;
use crate::errors::{CapabilityError, MemberError};
use crate::instance::Instance;
use crate::namespace::Namespace;
use crate::strategy::Strategy;
use crate::value::{Function, Receiver, Value};

/// Static member consulted by [`Class::instantiate`].
pub const ON_INSTANCE_CREATE: &str = "on_instance_create";

/// Static member defined on the root namespace; instantiates its receiver.
pub const INSTANTIATE: &str = "instantiate";

static NEXT_CLASS_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(u64);

impl ClassId {
    fn fresh() -> Self {
        ClassId(NEXT_CLASS_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct RootNamespaces {
    statics: Namespace,
    members: Namespace,
}

thread_local! {
    static ROOT: RootNamespaces = RootNamespaces::new();
}

impl RootNamespaces {
    fn new() -> Self {
        let statics = Namespace::new();
        statics.set(
            INSTANTIATE,
            Function::named(INSTANTIATE, |this, _args| match this {
                Receiver::Class(class) => Value::Instance(class.instantiate()),
                Receiver::Instance(_) => Value::Nil,
            }),
        );
        RootNamespaces {
            statics,
            members: Namespace::new(),
        }
    }
}

/// A class descriptor. Cloning shares the same descriptor.
#[derive(Clone)]
pub struct Class(Rc<ClassData>);

struct ClassData {
    id: ClassId,
    statics: Namespace,
    members: Namespace,
    parent: Option<Class>,
    mixin: Option<Class>,
}

impl Class {
    /// A class chained onto `parent`, or onto the root namespaces.
    pub(crate) fn derive(parent: Option<&Class>) -> Class {
        let (statics, members) = match parent {
            Some(parent) => (
                Namespace::chained(&parent.0.statics),
                Namespace::chained(&parent.0.members),
            ),
            None => ROOT.with(|root| {
                (
                    Namespace::chained(&root.statics),
                    Namespace::chained(&root.members),
                )
            }),
        };
        let class = Class(Rc::new(ClassData {
            id: ClassId::fresh(),
            statics,
            members,
            parent: parent.cloned(),
            mixin: None,
        }));
        debug!(
            class = %class.id(),
            parent = ?parent.map(Class::id),
            "created class"
        );
        class
    }

    /// A synthetic subclass of `parent` that records `mixin` as its second
    /// ancestor. With `live` set, its namespaces delegate to the mixin's
    /// own members on every lookup.
    pub(crate) fn derive_with_mixin(parent: &Class, mixin: &Class, live: bool) -> Class {
        let (statics, members) = if live {
            (
                Namespace::delegating(&parent.0.statics, &mixin.0.statics),
                Namespace::delegating(&parent.0.members, &mixin.0.members),
            )
        } else {
            (
                Namespace::chained(&parent.0.statics),
                Namespace::chained(&parent.0.members),
            )
        };
        Class(Rc::new(ClassData {
            id: ClassId::fresh(),
            statics,
            members,
            parent: Some(parent.clone()),
            mixin: Some(mixin.clone()),
        }))
    }

    pub fn id(&self) -> ClassId {
        self.0.id
    }

    /// Class-level members. Writes here are visible to subclasses.
    pub fn statics(&self) -> &Namespace {
        &self.0.statics
    }

    /// Members exposed by every instance of this class and its subclasses.
    pub fn members(&self) -> &Namespace {
        &self.0.members
    }

    pub fn parent(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// The second parent, set only on classes produced by composition.
    pub fn mixin(&self) -> Option<&Class> {
        self.0.mixin.as_ref()
    }

    /// Static member lookup through the chain.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.statics.get(key)
    }

    /// Call a static function member with this class as receiver.
    pub fn call(&self, key: &str, args: &[Value]) -> Result<Value, MemberError> {
        match self.get(key) {
            Some(Value::Function(f)) => Ok(f.call(Receiver::Class(self), args)),
            Some(_) => Err(MemberError::not_callable(key)),
            None => Err(MemberError::missing(key)),
        }
    }

    /// Create an instance and run the nearest construction hook on it.
    pub fn instantiate(&self) -> Instance {
        let instance = Instance::new(self);
        match self.0.statics.get(ON_INSTANCE_CREATE) {
            Some(Value::Function(hook)) => {
                trace!(
                    class = %self.id(),
                    hook = ?hook.name(),
                    "running construction hook"
                );
                hook.call(Receiver::Instance(&instance), &[]);
            }
            Some(other) => {
                warn!(
                    class = %self.id(),
                    found = other.type_name(),
                    "`{ON_INSTANCE_CREATE}` is not a function; skipping"
                );
            }
            None => {}
        }
        instance
    }

    pub fn is_subclass_of(&self, ancestor: &Class, include_mixins: bool) -> bool {
        ancestry::is_subclass(self, ancestor, include_mixins)
    }

    pub fn ptr_eq(&self, other: &Class) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.0).cast()
    }
}

impl Drop for ClassData {
    // Unlink ancestry one class at a time so that tearing down a deep
    // hierarchy does not recurse once per level.
    fn drop(&mut self) {
        let mut pending: Vec<Class> = self.parent.take().into_iter().collect();
        pending.extend(self.mixin.take());
        while let Some(class) = pending.pop() {
            if let Ok(mut data) = Rc::try_unwrap(class.0) {
                pending.extend(data.parent.take());
                pending.extend(data.mixin.take());
            }
        }
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({})", self.id())
    }
}

/// Builds classes with a fixed composition strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassFactory {
    strategy: Strategy,
}

impl ClassFactory {
    pub fn new(strategy: Strategy) -> Self {
        ClassFactory { strategy }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Create a class from zero, one, or several parents.
    ///
    /// Several parents are folded left to right with
    /// [`compose_pair`](Self::compose_pair); where they disagree on a member,
    /// the right-most parent wins.
    pub fn create(&self, parents: &[&Class]) -> Class {
        match parents {
            [] => Class::derive(None),
            [parent] => Class::derive(Some(*parent)),
            [first, rest @ ..] => {
                let merged = rest
                    .iter()
                    .fold((*first).clone(), |acc, next| self.compose_pair(&acc, next));
                Class::derive(Some(&merged))
            }
        }
    }

    /// Fails when the strategy offers no delegation at all; otherwise hands
    /// the factory back so calls can be chained.
    pub fn require_live_support(self) -> Result<Self, CapabilityError> {
        if self.strategy.supports_live_inheritance() {
            Ok(self)
        } else {
            Err(CapabilityError {
                strategy: self.strategy,
            })
        }
    }
}

impl Default for ClassFactory {
    /// A factory using the process-wide strategy.
    fn default() -> Self {
        ClassFactory::new(Strategy::active())
    }
}

/// Create a class with the process-wide strategy.
pub fn create_class(parents: &[&Class]) -> Class {
    ClassFactory::default().create(parents)
}

/// Gate on live inheritance being available for the process-wide strategy.
pub fn require_live_inheritance_support() -> Result<ClassFactory, CapabilityError> {
    ClassFactory::default().require_live_support()
}

/// Alias of [`require_live_inheritance_support`].
pub fn dynamic() -> Result<ClassFactory, CapabilityError> {
    require_live_inheritance_support()
}
