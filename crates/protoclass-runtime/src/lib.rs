//! Protoclass runtime library.
//!
//! Classical classes on top of a chain-of-maps object model:
//! - [`Namespace`]: ordered member maps that delegate misses to a parent
//! - [`Class`] / [`ClassFactory`]: class descriptors with static and instance
//!   namespaces, single inheritance by chaining
//! - [`ClassFactory::compose_pair`]: multiple inheritance by pairwise
//!   composition, with a snapshot or live [`Strategy`]
//! - [`is_subclass`]: ancestry through parent and mixin links
//!
//! ```
//! use protoclass_runtime::{ClassFactory, Strategy, Value};
//!
//! let factory = ClassFactory::new(Strategy::Live);
//! let base = factory.create(&[]);
//! base.statics().set("thing", "base");
//!
//! let a = factory.create(&[&base]);
//! a.statics().set("thing", "A");
//! let b = factory.create(&[&base]);
//! b.statics().set("thing", "B");
//!
//! assert_eq!(factory.create(&[&a, &b]).get("thing"), Some(Value::from("B")));
//! assert_eq!(factory.create(&[&b, &a]).get("thing"), Some(Value::from("A")));
//! ```

pub mod ancestry;
pub mod class;
pub mod compose;
pub mod errors;
pub mod instance;
pub mod namespace;
pub mod strategy;
pub mod value;


pub use ancestry::is_subclass;
pub use class::{
    Class, ClassFactory, ClassId, INSTANTIATE, ON_INSTANCE_CREATE, create_class, dynamic,
    require_live_inheritance_support,
};
pub use errors::{CapabilityError, Error, MemberError, Result, UnknownStrategy};
pub use instance::Instance;
pub use namespace::Namespace;
pub use strategy::{STRATEGY_ENV, Strategy};
pub use value::{Function, Receiver, Value};
