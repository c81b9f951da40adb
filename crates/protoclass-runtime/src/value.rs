//! Member values stored in class and instance namespaces.
//!
//! Data members are plain variants. Methods and construction hooks are
//! [`Function`]s, native closures that receive the class or instance they
//! were invoked on. Functions, classes and instances compare by identity.

use std::fmt;
use std::rc::Rc;

use crate::class::Class;
use crate::errors::MemberError;
use crate::instance::Instance;

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Function(Function),
    Class(Class),
    Instance(Instance),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Value::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(i) => Some(i),
            _ => None,
        }
    }

    /// Truthiness in the usual dynamic-language sense.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(x) => *x != 0.0 && !x.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Function(_) | Value::Class(_) | Value::Instance(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Function(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Class(a), Value::Class(b)) => a.ptr_eq(b),
            (Value::Instance(a), Value::Instance(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::Class(class) => fmt::Debug::fmt(class, f),
            // Fields are not followed, so self-referencing instances print.
            Value::Instance(instance) => write!(f, "<instance of {}>", instance.class().id()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Class> for Value {
    fn from(c: Class) -> Self {
        Value::Class(c)
    }
}

impl From<Instance> for Value {
    fn from(i: Instance) -> Self {
        Value::Instance(i)
    }
}

/// The `this` of a function call.
#[derive(Clone, Copy, Debug)]
pub enum Receiver<'a> {
    Class(&'a Class),
    Instance(&'a Instance),
}

impl<'a> Receiver<'a> {
    /// Member lookup through the receiver's chain.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Receiver::Class(class) => class.get(key),
            Receiver::Instance(instance) => instance.get(key),
        }
    }

    /// Write an own member on the receiver: the static namespace for a
    /// class, the instance's own fields for an instance.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        match self {
            Receiver::Class(class) => class.statics().set(key, value),
            Receiver::Instance(instance) => instance.set(key, value),
        }
    }

    pub fn call(&self, key: &str, args: &[Value]) -> Result<Value, MemberError> {
        match self {
            Receiver::Class(class) => class.call(key, args),
            Receiver::Instance(instance) => instance.call(key, args),
        }
    }

    pub fn as_class(&self) -> Option<&'a Class> {
        match *self {
            Receiver::Class(class) => Some(class),
            Receiver::Instance(_) => None,
        }
    }

    pub fn as_instance(&self) -> Option<&'a Instance> {
        match *self {
            Receiver::Instance(instance) => Some(instance),
            Receiver::Class(_) => None,
        }
    }
}

type NativeFn = dyn Fn(Receiver<'_>, &[Value]) -> Value;

/// A shared native callable.
#[derive(Clone)]
pub struct Function {
    name: Option<Rc<str>>,
    body: Rc<NativeFn>,
}

impl Function {
    pub fn new(body: impl Fn(Receiver<'_>, &[Value]) -> Value + 'static) -> Self {
        Function {
            name: None,
            body: Rc::new(body),
        }
    }

    pub fn named(name: &str, body: impl Fn(Receiver<'_>, &[Value]) -> Value + 'static) -> Self {
        Function {
            name: Some(Rc::from(name)),
            body: Rc::new(body),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invoke with an explicit receiver. This is also how a subclass calls a
    /// member it fetched from one of its parents.
    pub fn call(&self, receiver: Receiver<'_>, args: &[Value]) -> Value {
        (self.body)(receiver, args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<function {name}>"),
            None => f.write_str("<function>"),
        }
    }
}
