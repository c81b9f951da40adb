//! End-to-end class semantics: single inheritance, construction hooks,
//! explicit parent calls, overriding, multiple inheritance and live mode.

use protoclass_runtime::{
    CapabilityError, Class, ClassFactory, Function, ON_INSTANCE_CREATE, Receiver, Strategy, Value,
    is_subclass,
};

fn person(factory: &ClassFactory) -> Class {
    let person = factory.create(&[]);
    person.statics().set(
        ON_INSTANCE_CREATE,
        Function::named("person_create", |this, _| {
            this.set("foo", "bar");
            Value::Nil
        }),
    );
    person
        .statics()
        .set("badrage", Function::new(|_, _| Value::from("bar")));
    person.statics().set("CONSTANT", "variable");
    person
        .members()
        .set("asdragons", Function::new(|_, _| Value::from("badragons")));
    person
}

fn factory() -> ClassFactory {
    ClassFactory::new(Strategy::Live)
}

#[test]
fn test_class_looks_like_a_class() {
    let person = person(&factory());
    let instance = person.instantiate();

    assert_eq!(instance.call("asdragons", &[]), Ok(Value::from("badragons")));
    assert_eq!(person.call("badrage", &[]), Ok(Value::from("bar")));
    assert_eq!(instance.get("foo"), Some(Value::from("bar")));
    assert_eq!(person.get("CONSTANT"), Some(Value::from("variable")));
}

#[test]
fn test_subclass_inherits_statics_and_hook() {
    let factory = factory();
    let person = person(&factory);
    let sub_person = factory.create(&[&person]);

    let sub = sub_person.instantiate();
    assert_eq!(sub.get("foo"), Some(Value::from("bar")));

    sub_person.statics().set(
        ON_INSTANCE_CREATE,
        Function::new(|this, _| {
            this.set("foo", "baz");
            Value::Nil
        }),
    );
    let with_own_hook = sub_person.instantiate();
    assert_eq!(with_own_hook.get("foo"), Some(Value::from("baz")));

    assert!(sub_person.statics().remove(ON_INSTANCE_CREATE).is_some());
    assert_eq!(sub_person.instantiate().get("foo"), Some(Value::from("bar")));
    // Earlier instances keep what their hook wrote.
    assert_eq!(with_own_hook.get("foo"), Some(Value::from("baz")));
    assert_eq!(sub.get("foo"), Some(Value::from("bar")));

    assert_eq!(sub.call("asdragons", &[]), Ok(Value::from("badragons")));
    assert_eq!(sub_person.call("badrage", &[]), Ok(Value::from("bar")));
    assert_eq!(sub_person.get("CONSTANT"), Some(Value::from("variable")));
    assert!(!sub_person.statics().contains_own("CONSTANT"));
}

#[test]
fn test_is_subclass_utility() {
    let factory = factory();
    let person = person(&factory);
    let sub_person = factory.create(&[&person]);
    let third_level = factory.create(&[&sub_person]);

    assert!(is_subclass(&person, &person, true));
    assert!(is_subclass(&sub_person, &person, true));
    assert!(is_subclass(&third_level, &sub_person, true));
    assert!(is_subclass(&third_level, &person, true));
    assert!(!is_subclass(&person, &third_level, true));
}

#[test]
fn test_parent_members_callable_from_subclass() {
    let factory = factory();
    let person = person(&factory);
    let sub_person = factory.create(&[&person]);
    let sub2_person = factory.create(&[&sub_person]);

    let parent_hook = sub_person.statics().get(ON_INSTANCE_CREATE).unwrap();
    sub2_person.statics().set(
        ON_INSTANCE_CREATE,
        Function::new(move |this, args| {
            this.set("baz", "baz");
            match &parent_hook {
                Value::Function(hook) => hook.call(this, args),
                _ => Value::Nil,
            }
        }),
    );

    let parent_method = sub_person.members().get("asdragons").unwrap();
    sub2_person.members().set(
        "asdragons",
        Function::new(move |this, args| {
            let inherited = match &parent_method {
                Value::Function(f) => f.call(this, args),
                _ => Value::Nil,
            };
            Value::from(format!("{inherited} fraggles!"))
        }),
    );

    let sub2 = sub2_person.instantiate();
    assert!(sub2.get("foo").is_some_and(|v| v.is_truthy()));
    assert!(sub2.get("baz").is_some_and(|v| v.is_truthy()));
    assert_eq!(
        sub2.call("asdragons", &[]),
        Ok(Value::from("badragons fraggles!"))
    );
}

#[test]
fn test_overriding_static_and_instance_members() {
    let factory = factory();
    let base = factory.create(&[]);
    base.members().set("thing", "base thing");
    base.statics().set("thing", "static base thing");
    base.members().set("base_thing", "base thing");
    base.statics().set("base_thing", "static base thing");

    let a = factory.create(&[&base]);
    a.members().set("thing", "A thing");
    a.statics().set("thing", "static A thing");

    assert_eq!(base.get("thing"), Some(Value::from("static base thing")));
    assert_eq!(base.get("base_thing"), Some(Value::from("static base thing")));
    assert_eq!(base.instantiate().get("thing"), Some(Value::from("base thing")));
    assert_eq!(base.instantiate().get("base_thing"), Some(Value::from("base thing")));

    assert_eq!(a.get("thing"), Some(Value::from("static A thing")));
    assert_eq!(a.get("base_thing"), Some(Value::from("static base thing")));
    assert_eq!(a.instantiate().get("thing"), Some(Value::from("A thing")));
    assert_eq!(a.instantiate().get("base_thing"), Some(Value::from("base thing")));
}

struct Diamond {
    base: Class,
    a: Class,
    b: Class,
    c: Class,
}

fn diamond(factory: &ClassFactory) -> Diamond {
    let base = factory.create(&[]);
    base.members().set("thing", "base thing");
    base.statics().set("thing", "static base thing");
    base.members().set("base_thing", "base thing");
    base.statics().set("base_thing", "static base thing");

    let a = factory.create(&[&base]);
    a.members().set("thing", "A thing");
    a.statics().set("thing", "static A thing");
    a.members().set("a_thing", "A thing");
    a.statics().set("a_thing", "static A thing");

    let b = factory.create(&[&base]);
    b.members().set("thing", "B thing");
    b.statics().set("thing", "static B thing");
    b.members().set("b_thing", "B thing");
    b.statics().set("b_thing", "static B thing");

    let c = factory.create(&[&a, &b]);
    c.members().set("c_thing", "C thing");
    c.statics().set("c_thing", "static C thing");

    Diamond { base, a, b, c }
}

#[test]
fn test_multiple_inheritance_reaches_every_parent() {
    for strategy in [Strategy::None, Strategy::Snapshot, Strategy::Live] {
        let Diamond { c, .. } = diamond(&ClassFactory::new(strategy));
        let instance = c.instantiate();

        for key in ["c_thing", "b_thing", "a_thing", "base_thing"] {
            assert!(c.get(key).is_some(), "{strategy}: static {key}");
            assert!(instance.get(key).is_some(), "{strategy}: instance {key}");
        }
    }
}

#[test]
fn test_multiple_inheritance_is_right_most_wins() {
    for strategy in [Strategy::None, Strategy::Snapshot, Strategy::Live] {
        let factory = ClassFactory::new(strategy);
        let Diamond { a, b, c, .. } = diamond(&factory);

        assert_eq!(c.get("thing"), Some(Value::from("static B thing")));
        assert_eq!(c.instantiate().get("thing"), Some(Value::from("B thing")));

        let switched = factory.create(&[&b, &a]);
        assert_eq!(switched.get("thing"), Some(Value::from("static A thing")));
        assert_eq!(switched.instantiate().get("thing"), Some(Value::from("A thing")));
    }
}

#[test]
fn test_multiple_inheritance_ancestry() {
    let Diamond { base, a, b, c } = diamond(&factory());

    assert!(is_subclass(&a, &base, true));
    assert!(is_subclass(&b, &base, true));
    assert!(is_subclass(&c, &base, true));
    assert!(is_subclass(&c, &a, true));
    assert!(is_subclass(&c, &b, true));

    assert!(is_subclass(&c, &a, false));
    assert!(!is_subclass(&c, &b, false));
    assert!(is_subclass(&c, &base, false));
}

#[test]
fn test_live_mode_propagates_parent_changes() {
    let Diamond { base, a, b, c } = diamond(&ClassFactory::new(Strategy::Live));

    base.statics().set("new_base_thing", "new base thing");
    base.statics().set("new_thing", "new base thing");
    base.statics().set("base_thing", "changed base thing");
    base.statics().set("thing", "changed base thing");

    assert_eq!(c.get("new_base_thing"), Some(Value::from("new base thing")));
    assert_eq!(c.get("new_thing"), Some(Value::from("new base thing")));
    assert_eq!(c.get("base_thing"), Some(Value::from("changed base thing")));
    assert_eq!(c.get("thing"), Some(Value::from("static B thing")));

    b.statics().set("new_b_thing", "new B thing");
    b.statics().set("new_thing", "new B thing");
    b.statics().set("b_thing", "changed B thing");
    b.statics().set("thing", "changed B thing");

    assert_eq!(c.get("new_b_thing"), Some(Value::from("new B thing")));
    assert_eq!(c.get("new_thing"), Some(Value::from("new B thing")));
    assert_eq!(c.get("b_thing"), Some(Value::from("changed B thing")));
    assert_eq!(c.get("thing"), Some(Value::from("changed B thing")));

    a.statics().set("new_a_thing", "new A thing");
    a.statics().set("new_thing", "new A thing");
    a.statics().set("a_thing", "changed A thing");
    a.statics().set("thing", "changed A thing");

    assert_eq!(a.get("thing"), Some(Value::from("changed A thing")));
    assert_eq!(c.get("new_a_thing"), Some(Value::from("new A thing")));
    assert_eq!(c.get("new_thing"), Some(Value::from("new B thing")));
    assert_eq!(c.get("a_thing"), Some(Value::from("changed A thing")));
    assert_eq!(c.get("thing"), Some(Value::from("changed B thing")));
}

#[test]
fn test_snapshot_mode_freezes_mixin_members() {
    let Diamond { base, a, b, c } = diamond(&ClassFactory::new(Strategy::Snapshot));

    b.statics().set("new_b_thing", "new B thing");
    b.statics().set("thing", "changed B thing");
    assert_eq!(c.get("new_b_thing"), None);
    assert_eq!(c.get("thing"), Some(Value::from("static B thing")));

    // The primary chain is plain delegation and stays live.
    a.statics().set("new_a_thing", "new A thing");
    base.statics().set("new_base_thing", "new base thing");
    assert_eq!(c.get("new_a_thing"), Some(Value::from("new A thing")));
    assert_eq!(c.get("new_base_thing"), Some(Value::from("new base thing")));
}

#[test]
fn test_capability_gate_returns_factory() {
    let live = ClassFactory::new(Strategy::Live)
        .require_live_support()
        .map(|factory| factory.create(&[]));
    assert!(live.is_ok());

    let err = ClassFactory::new(Strategy::None)
        .require_live_support()
        .unwrap_err();
    assert_eq!(err, CapabilityError { strategy: Strategy::None });
}

#[test]
fn test_receiver_helpers() {
    let factory = factory();
    let class = factory.create(&[]);
    class.statics().set(
        "describe",
        Function::new(|this: Receiver<'_>, _| {
            Value::from(this.as_class().is_some() && this.as_instance().is_none())
        }),
    );
    assert_eq!(class.call("describe", &[]), Ok(Value::Bool(true)));
}
