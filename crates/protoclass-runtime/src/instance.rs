//! Instances created by [`Class::instantiate`].

use std::fmt;
use std::rc::Rc;

use crate::class::Class;
use crate::errors::MemberError;
use crate::namespace::Namespace;
use crate::value::{Receiver, Value};

/// An object whose own fields are chained onto its class's `members`.
#[derive(Clone)]
pub struct Instance(Rc<InstanceData>);

struct InstanceData {
    class: Class,
    fields: Namespace,
}

impl Instance {
    pub(crate) fn new(class: &Class) -> Self {
        Instance(Rc::new(InstanceData {
            class: class.clone(),
            fields: Namespace::chained(class.members()),
        }))
    }

    pub fn class(&self) -> &Class {
        &self.0.class
    }

    /// Own field first, then the class's instance members.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.fields.get(key)
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.fields.set(key, value)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.fields.remove(key)
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.0.fields.contains_own(key)
    }

    pub fn own_keys(&self) -> Vec<String> {
        self.0.fields.own_keys()
    }

    /// The instance's own fields as a namespace handle.
    pub fn fields(&self) -> &Namespace {
        &self.0.fields
    }

    /// Call a function member with this instance as receiver.
    pub fn call(&self, key: &str, args: &[Value]) -> Result<Value, MemberError> {
        match self.get(key) {
            Some(Value::Function(f)) => Ok(f.call(Receiver::Instance(self), args)),
            Some(_) => Err(MemberError::not_callable(key)),
            None => Err(MemberError::missing(key)),
        }
    }

    /// Whether this instance's class is `class` or descends from it,
    /// mixins included.
    pub fn is_instance_of(&self, class: &Class) -> bool {
        self.0.class.is_subclass_of(class, true)
    }

    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.0.class.id())
            .field("fields", &self.0.fields)
            .finish()
    }
}
