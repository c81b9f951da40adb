//! Demonstration scenario.
//!
//! Builds the classic `Person` / diamond example with a given factory and
//! records what each step observes, one line per observation.

use protoclass_runtime::{
    ClassFactory, Function, ON_INSTANCE_CREATE, Result, Value, is_subclass,
};

#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    fn record(&mut self, label: &str, value: impl std::fmt::Display) {
        self.lines.push(format!("{label} = {value}"));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl std::fmt::Display for Transcript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn setter(key: &'static str, value: &'static str) -> Function {
    Function::new(move |this, _| {
        this.set(key, value);
        Value::Nil
    })
}

fn field(value: Option<Value>) -> Value {
    value.unwrap_or_default()
}

pub fn run(factory: ClassFactory) -> Result<Transcript> {
    let mut out = Transcript::default();
    out.record("strategy", factory.strategy());

    let person = factory.create(&[]);
    person.statics().set(ON_INSTANCE_CREATE, setter("foo", "bar"));
    person
        .statics()
        .set("badrage", Function::new(|_, _| Value::from("bar")));
    person.statics().set("CONSTANT", "variable");
    person
        .members()
        .set("asdragons", Function::new(|_, _| Value::from("badragons")));

    let p = person.instantiate();
    out.record("Person.badrage()", person.call("badrage", &[])?);
    out.record("person.asdragons()", p.call("asdragons", &[])?);
    out.record("person.foo", field(p.get("foo")));
    out.record("Person.CONSTANT", field(person.get("CONSTANT")));

    let sub_person = factory.create(&[&person]);
    out.record(
        "SubPerson (inherited hook) .foo",
        field(sub_person.instantiate().get("foo")),
    );
    sub_person
        .statics()
        .set(ON_INSTANCE_CREATE, setter("foo", "baz"));
    out.record(
        "SubPerson (own hook) .foo",
        field(sub_person.instantiate().get("foo")),
    );
    sub_person.statics().remove(ON_INSTANCE_CREATE);
    out.record(
        "SubPerson (hook removed) .foo",
        field(sub_person.instantiate().get("foo")),
    );

    let third_level = factory.create(&[&sub_person]);
    out.record(
        "is_subclass(ThirdLevel, Person)",
        is_subclass(&third_level, &person, true),
    );

    let base = factory.create(&[]);
    base.statics().set("thing", "static base thing");
    base.members().set("thing", "base thing");
    let a = factory.create(&[&base]);
    a.statics().set("thing", "static A thing");
    a.members().set("thing", "A thing");
    let b = factory.create(&[&base]);
    b.statics().set("thing", "static B thing");
    b.members().set("thing", "B thing");

    let c = factory.create(&[&a, &b]);
    out.record("C(A, B).thing", field(c.get("thing")));
    out.record("C(A, B) instance .thing", field(c.instantiate().get("thing")));
    let switched = factory.create(&[&b, &a]);
    out.record("C(B, A).thing", field(switched.get("thing")));
    out.record("is_subclass(C, B)", is_subclass(&c, &b, true));
    out.record("is_subclass(C, B, without mixins)", is_subclass(&c, &b, false));

    b.statics().set("thing", "changed B thing");
    b.statics().set("new_b_thing", "new B thing");
    out.record("C.thing after B changed", field(c.get("thing")));
    out.record("C.new_b_thing after B changed", field(c.get("new_b_thing")));

    let gate = match factory.require_live_support() {
        Ok(_) => "available".to_string(),
        Err(err) => err.to_string(),
    };
    out.record("live inheritance", gate);

    Ok(out)
}
