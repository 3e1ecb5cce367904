//! End-to-end engine scenarios: graph traversal, cascading, groups,
//! sequences, fail-fast, and the error taxonomy.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;
use verdict_validator::prelude::*;

fn address_type() -> TypeDescriptor {
    TypeDescriptor::builder("Address")
        .property("street", |p| p.constraint(ConstraintDescriptor::not_null()))
        .build()
}

fn user_type() -> TypeDescriptor {
    TypeDescriptor::builder("User")
        .property("name", |p| p.constraint(ConstraintDescriptor::not_null()))
        .property("age", |p| {
            p.constraint(ConstraintDescriptor::min(0))
                .declared(ValueKind::Int)
        })
        .property("address", |p| p.cascade())
        .build()
}

fn engine() -> Validator {
    let metadata = MetadataRegistry::builder()
        .register_type(user_type())
        .register_type(address_type())
        .build();
    Validator::builder(metadata).build()
}

fn paths(violations: &Violations) -> Vec<String> {
    let mut rendered: Vec<String> = violations.iter().map(|v| v.path().to_string()).collect();
    rendered.sort();
    rendered
}

#[test]
fn collects_all_violations_across_properties() {
    let user = Object::builder("User")
        .null_field("name")
        .field("age", -3_i64)
        .build();
    let violations = engine().validate(&Value::Object(user), &[]).unwrap();
    assert_eq!(paths(&violations), vec!["age", "name"]);
}

#[test]
fn valid_object_produces_no_violations() {
    let user = Object::builder("User")
        .field("name", "alice")
        .field("age", 30_i64)
        .build();
    let violations = engine().validate(&Value::Object(user), &[]).unwrap();
    assert!(violations.is_empty());
}

#[test]
fn null_never_violates_bound_constraints() {
    // `age` carries Min but not NotNull: absence is not a violation.
    let user = Object::builder("User")
        .field("name", "alice")
        .null_field("age")
        .build();
    let violations = engine().validate(&Value::Object(user), &[]).unwrap();
    assert!(violations.is_empty());
}

#[test]
fn unknown_root_type_validates_to_empty() {
    let stranger = Object::builder("Stranger").field("x", 1_i64).build();
    let violations = engine().validate(&Value::Object(stranger), &[]).unwrap();
    assert!(violations.is_empty());
    let violations = engine().validate(&Value::Int(5), &[]).unwrap();
    assert!(violations.is_empty());
}

#[test]
fn cascades_into_nested_objects() {
    let address = Object::builder("Address").null_field("street").build();
    let user = Object::builder("User")
        .field("name", "alice")
        .field("address", address)
        .build();
    let violations = engine().validate(&Value::Object(user), &[]).unwrap();
    assert_eq!(paths(&violations), vec!["address.street"]);
}

#[test]
fn cascades_into_list_elements_with_indexes() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Team")
                .property("members", |p| p.cascade())
                .build(),
        )
        .register_type(user_type())
        .register_type(address_type())
        .build();
    let engine = Validator::builder(metadata).build();

    let good = Object::builder("User").field("name", "a").build();
    let bad = Object::builder("User").null_field("name").build();
    let team = Object::builder("Team")
        .field("members", vec![Value::Object(good), Value::Object(bad)])
        .build();

    let violations = engine.validate(&Value::Object(team), &[]).unwrap();
    assert_eq!(paths(&violations), vec!["members[1].name"]);
}

#[test]
fn cascades_into_map_values_and_optionally_keys() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Ledger")
                .property("entries", |p| p.cascade_with(Cascade::with_keys()))
                .build(),
        )
        .register_type(user_type())
        .register_type(address_type())
        .build();
    let engine = Validator::builder(metadata).build();

    let key_user = Object::builder("User").null_field("name").build();
    let value_user = Object::builder("User").null_field("name").build();
    let ledger = Object::builder("Ledger")
        .field(
            "entries",
            Value::Map(vec![(
                Value::Object(key_user),
                Value::Object(value_user),
            )]),
        )
        .build();

    let violations = engine.validate(&Value::Object(ledger), &[]).unwrap();
    assert_eq!(violations.len(), 2);
    assert!(
        violations
            .iter()
            .any(|v| v.path().to_string().contains("<key>"))
    );
}

#[test]
fn self_referential_graph_terminates() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Node")
                .property("label", |p| p.constraint(ConstraintDescriptor::not_null()))
                .property("next", |p| p.cascade())
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();

    let node = Object::builder("Node").null_field("label").build();
    node.set("next", node.clone());

    let violations = engine.validate(&Value::Object(node), &[]).unwrap();
    assert_eq!(paths(&violations), vec!["label"]);
}

#[test]
fn mutually_referential_graph_terminates() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Node")
                .property("label", |p| p.constraint(ConstraintDescriptor::not_null()))
                .property("next", |p| p.cascade())
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();

    let a = Object::builder("Node").null_field("label").build();
    let b = Object::builder("Node").null_field("label").build();
    a.set("next", b.clone());
    b.set("next", a.clone());

    let violations = engine.validate(&Value::Object(a), &[]).unwrap();
    assert_eq!(paths(&violations), vec!["label", "next.label"]);
}

/// The redeclared-Default-sequence scenario: a self-cyclic instance whose
/// `Max`-group check fails must yield exactly that one violation, with the
/// type's own sheet never evaluated.
#[test]
fn default_sequence_skips_later_sheets_after_a_violation() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("A")
                .property("foo", |p| {
                    p.constraint(ConstraintDescriptor::not_null().group("Max"))
                })
                .property("baz", |p| p.constraint(ConstraintDescriptor::not_null()))
                .property("me", |p| p.cascade())
                .default_sequence([Group::new("Max"), Group::new("A")])
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();

    let a = Object::builder("A")
        .null_field("foo")
        .null_field("baz")
        .field("x", "x")
        .build();
    a.set("me", a.clone());

    let violations = engine.validate(&Value::Object(a), &[]).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.iter().next().unwrap().group().name(), "Max");
}

#[test]
fn default_sequence_continues_when_earlier_sheets_pass() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("A")
                .property("foo", |p| {
                    p.constraint(ConstraintDescriptor::not_null().group("Max"))
                })
                .property("baz", |p| p.constraint(ConstraintDescriptor::not_null()))
                .default_sequence([Group::new("Max"), Group::new("A")])
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();

    let a = Object::builder("A").field("foo", "set").null_field("baz").build();
    let violations = engine.validate(&Value::Object(a), &[]).unwrap();
    assert_eq!(violations.len(), 1);
    assert!(violations.iter().next().unwrap().group().is_default());
}

#[test]
fn default_sequence_must_contain_the_own_group() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("A")
                .property("foo", |p| p.constraint(ConstraintDescriptor::not_null()))
                .default_sequence([Group::new("Max")])
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();
    let a = Object::builder("A").null_field("foo").build();
    let err = engine.validate(&Value::Object(a), &[]).unwrap_err();
    assert!(matches!(err, EngineError::InvalidGroupSequence { .. }));
}

#[test]
fn registered_sequences_short_circuit_between_positions() {
    let build = || {
        MetadataRegistry::builder()
            .register_type(
                TypeDescriptor::builder("Order")
                    .property("id", |p| {
                        p.constraint(ConstraintDescriptor::not_null().group("Quick"))
                    })
                    .property("total", |p| {
                        p.constraint(ConstraintDescriptor::min(0).group("Thorough"))
                    })
                    .build(),
            )
            .register_sequence(GroupSequence::new(
                "Checkout",
                [Group::new("Quick"), Group::new("Thorough")],
            ))
            .build()
    };

    // First position fails: the second never runs.
    let engine = Validator::builder(build()).build();
    let order = Object::builder("Order")
        .null_field("id")
        .field("total", -10_i64)
        .build();
    let violations = engine
        .validate(&Value::Object(order), &[Group::new("Checkout")])
        .unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.iter().next().unwrap().group().name(), "Quick");

    // First position passes: the second runs and reports.
    let engine = Validator::builder(build()).build();
    let order = Object::builder("Order")
        .field("id", "A-1")
        .field("total", -10_i64)
        .build();
    let violations = engine
        .validate(&Value::Object(order), &[Group::new("Checkout")])
        .unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.iter().next().unwrap().group().name(), "Thorough");
}

#[derive(Debug)]
struct FieldsOnly;

impl PropertySelection for FieldsOnly {
    fn property(&self, accessor: &Accessor) -> Option<String> {
        match accessor.kind() {
            AccessorKind::Field => Some(accessor.name().to_owned()),
            AccessorKind::Getter => None,
        }
    }

    fn accessor_candidates(&self, property: &str) -> Vec<String> {
        vec![property.to_owned()]
    }
}

#[test]
fn selection_strategy_decides_what_is_a_property() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Account")
                .property("owner", |p| p.constraint(ConstraintDescriptor::not_null()))
                .getter("getBalance", |p| p.constraint(ConstraintDescriptor::not_null()))
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata)
        .property_selection(FieldsOnly)
        .build();

    // Both backing fields are null, but the getter is not a property under
    // this strategy and is never traversed.
    let account = Object::builder("Account")
        .null_field("owner")
        .null_field("balance")
        .build();
    let violations = engine.validate(&Value::Object(account), &[]).unwrap();
    assert_eq!(paths(&violations), vec!["owner"]);
}

#[test]
fn constraints_outside_requested_groups_are_not_evaluated() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Form")
                .property("draft", |p| {
                    p.constraint(ConstraintDescriptor::not_null().group("Publish"))
                })
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();
    let form = Object::builder("Form").null_field("draft").build();

    let by_default = engine.validate(&Value::Object(form.clone()), &[]).unwrap();
    assert!(by_default.is_empty());

    let publishing = engine
        .validate(&Value::Object(form), &[Group::new("Publish")])
        .unwrap();
    assert_eq!(publishing.len(), 1);
}

#[test]
fn group_inheritance_pulls_parent_constraints_into_the_sheet() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Form")
                .property("basic", |p| {
                    p.constraint(ConstraintDescriptor::not_null().group("Light"))
                })
                .property("extra", |p| {
                    p.constraint(ConstraintDescriptor::not_null().group("Heavy"))
                })
                .build(),
        )
        .register_group_parents(Group::new("Heavy"), [Group::new("Light")])
        .build();
    let engine = Validator::builder(metadata).build();
    let form = Object::builder("Form")
        .null_field("basic")
        .null_field("extra")
        .build();

    let violations = engine
        .validate(&Value::Object(form), &[Group::new("Heavy")])
        .unwrap();
    assert_eq!(paths(&violations), vec!["basic", "extra"]);
}

fn two_group_engine(mode: FailFast) -> (Validator, Value) {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Doc")
                .property("first", |p| {
                    p.constraint(ConstraintDescriptor::not_null().group("G1"))
                })
                .property("second", |p| {
                    p.constraint(ConstraintDescriptor::not_null().group("G2"))
                })
                .build(),
        )
        .build();
    let doc = Object::builder("Doc")
        .null_field("first")
        .null_field("second")
        .build();
    let engine = Validator::builder(metadata).fail_fast(mode).build();
    (engine, Value::Object(doc))
}

#[test]
fn per_sheet_fail_fast_returns_only_the_first_sheets_violations() {
    let groups = [Group::new("G1"), Group::new("G2")];

    let (engine, doc) = two_group_engine(FailFast::Off);
    let collected = engine.validate(&doc, &groups).unwrap();
    assert_eq!(collected.len(), 2);

    let (engine, doc) = two_group_engine(FailFast::PerSheet);
    let fast = engine.validate(&doc, &groups).unwrap();
    assert_eq!(fast.len(), 1);
    assert_eq!(fast.iter().next().unwrap().group().name(), "G1");
}

#[test]
fn global_fail_fast_stops_at_the_first_violation() {
    let metadata = MetadataRegistry::builder()
        .register_type(user_type())
        .register_type(address_type())
        .build();
    let engine = Validator::builder(metadata)
        .fail_fast(FailFast::Global)
        .build();
    let user = Object::builder("User")
        .null_field("name")
        .field("age", -3_i64)
        .build();
    let violations = engine.validate(&Value::Object(user), &[]).unwrap();
    assert_eq!(violations.len(), 1);
}

#[rstest]
#[case(-1_i64, 1)]
#[case(0_i64, 0)]
#[case(7_i64, 0)]
fn validate_value_checks_prospective_values(#[case] age: i64, #[case] expected: usize) {
    let violations = engine()
        .validate_value("User", "age", &Value::Int(age), &[])
        .unwrap();
    assert_eq!(violations.len(), expected);
    if expected == 1 {
        let violation = violations.iter().next().unwrap();
        assert_eq!(violation.path().to_string(), "age");
        assert_eq!(violation.constraint().kind().name(), "Min");
    }
}

#[test]
fn validate_value_rejects_unknown_properties() {
    let err = engine()
        .validate_value("User", "salary", &Value::Int(1), &[])
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::UnknownProperty {
            type_name: "User".to_owned(),
            property: "salary".to_owned(),
        }
    );
    let err = engine()
        .validate_value("Ghost", "age", &Value::Int(1), &[])
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownProperty { .. }));
}

#[test]
fn validate_property_checks_a_single_node() {
    let user = Object::builder("User")
        .null_field("name")
        .field("age", -3_i64)
        .build();
    let root = Value::Object(user);

    let violations = engine().validate_property(&root, "name", &[]).unwrap();
    assert_eq!(paths(&violations), vec!["name"]);

    // Only the addressed node is validated.
    let violations = engine().validate_property(&root, "age", &[]).unwrap();
    assert_eq!(paths(&violations), vec!["age"]);
}

#[test]
fn validate_property_reaches_nested_nodes() {
    let address = Object::builder("Address").null_field("street").build();
    let user = Object::builder("User")
        .field("name", "alice")
        .field("address", address)
        .build();
    let root = Value::Object(user);

    let violations = engine()
        .validate_property(&root, "address.street", &[])
        .unwrap();
    assert_eq!(paths(&violations), vec!["address.street"]);
}

#[test]
fn validate_property_on_a_null_intermediate_is_empty() {
    let user = Object::builder("User")
        .field("name", "alice")
        .null_field("address")
        .build();
    let violations = engine()
        .validate_property(&Value::Object(user), "address.street", &[])
        .unwrap();
    assert!(violations.is_empty());
}

#[test]
fn validate_property_rejects_unknown_paths() {
    let user = Object::builder("User").field("name", "a").build();
    let err = engine()
        .validate_property(&Value::Object(user), "nope", &[])
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownProperty { .. }));
}

#[test]
fn unsupported_type_aborts_the_call() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Odd")
                .property("word", |p| p.constraint(ConstraintDescriptor::min(1)))
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();
    let odd = Object::builder("Odd").field("word", "hello").build();

    let err = engine.validate(&Value::Object(odd), &[]).unwrap_err();
    assert_eq!(
        err,
        EngineError::UnsupportedType {
            constraint: "Min".to_owned(),
            kind: ValueKind::Text,
        }
    );
}

#[derive(Debug)]
struct UppercaseStart;

impl ConstraintValidator for UppercaseStart {
    fn is_valid(&self, value: &Value, _ctx: &ConstraintContext<'_>) -> bool {
        value
            .as_text()
            .is_none_or(|s| s.starts_with(char::is_uppercase))
    }
}

#[test]
fn custom_constraints_register_and_fire() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Tag")
                .property("label", |p| {
                    p.constraint(
                        ConstraintDescriptor::custom("UppercaseStart")
                            .message("must start uppercase"),
                    )
                })
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata)
        .constraint(
            ConstraintKind::Custom("UppercaseStart".into()),
            TypeMatch::Kind(ValueKind::Text),
            |_d| Ok(Arc::new(UppercaseStart) as Arc<dyn ConstraintValidator>),
        )
        .build();

    let tag = Object::builder("Tag").field("label", "lower").build();
    let violations = engine.validate(&Value::Object(tag), &[]).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.iter().next().unwrap().message(), "must start uppercase");

    let tag = Object::builder("Tag").field("label", "Upper").build();
    assert!(engine.validate(&Value::Object(tag), &[]).unwrap().is_empty());
}

#[test]
fn ambiguous_registration_aborts_the_call() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Tag")
                .property("label", |p| {
                    p.constraint(ConstraintDescriptor::custom("Flagged"))
                })
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata)
        .constraint(
            ConstraintKind::Custom("Flagged".into()),
            TypeMatch::Any,
            |_d| Ok(Arc::new(UppercaseStart) as Arc<dyn ConstraintValidator>),
        )
        .constraint(
            ConstraintKind::Custom("Flagged".into()),
            TypeMatch::Any,
            |_d| Ok(Arc::new(UppercaseStart) as Arc<dyn ConstraintValidator>),
        )
        .build();

    let tag = Object::builder("Tag").field("label", "x").build();
    let err = engine.validate(&Value::Object(tag), &[]).unwrap_err();
    assert!(matches!(err, EngineError::AmbiguousResolution { .. }));
}

#[test]
fn cyclic_group_sequences_abort_the_call() {
    let metadata = MetadataRegistry::builder()
        .register_type(TypeDescriptor::builder("T").build())
        .register_sequence(GroupSequence::new("A", [Group::new("B")]))
        .register_sequence(GroupSequence::new("B", [Group::new("A")]))
        .build();
    let engine = Validator::builder(metadata).build();
    let t = Object::builder("T").build();
    let err = engine
        .validate(&Value::Object(t), &[Group::new("A")])
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidGroupSequence { .. }));
}

#[test]
fn malformed_declarations_abort_the_call() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Box")
                .property("items", |p| p.constraint(ConstraintDescriptor::size(5, 2)))
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();
    let boxed = Object::builder("Box").field("items", vec![Value::Int(1)]).build();
    let err = engine.validate(&Value::Object(boxed), &[]).unwrap_err();
    assert!(matches!(err, EngineError::ConstraintDeclaration { .. }));
}

#[test]
fn max_int_against_equal_decimal_bound_is_exact() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Counter")
                .property("count", |p| {
                    p.constraint(ConstraintDescriptor::decimal_max(Decimal::from(i64::MAX)))
                })
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();
    let counter = Object::builder("Counter").field("count", i64::MAX).build();
    let violations = engine.validate(&Value::Object(counter), &[]).unwrap();
    assert!(violations.is_empty());
}

#[test]
fn numeric_dispatch_covers_every_numeric_kind() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Reading")
                .property("value", |p| p.constraint(ConstraintDescriptor::min(0)))
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();

    for bad in [
        Value::Int(-1),
        Value::Float(-0.5),
        Value::Decimal(Decimal::new(-1, 2)),
    ] {
        let reading = Object::builder("Reading").field("value", bad).build();
        let violations = engine.validate(&Value::Object(reading), &[]).unwrap();
        assert_eq!(violations.len(), 1, "expected one violation");
    }
}

#[test]
fn temporal_constraints_use_the_engine_clock() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Person")
                .property("born", |p| p.constraint(ConstraintDescriptor::past()))
                .build(),
        )
        .build();
    let clock = FixedClock::at_utc(2024, 6, 15, 12, 0, 0);
    let engine = Validator::builder(metadata).clock(clock).build();

    let born_ok = chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    let person = Object::builder("Person").field("born", born_ok).build();
    assert!(engine.validate(&Value::Object(person), &[]).unwrap().is_empty());

    let born_later = chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let person = Object::builder("Person").field("born", born_later).build();
    assert_eq!(engine.validate(&Value::Object(person), &[]).unwrap().len(), 1);
}

#[test]
fn getter_accessors_validate_under_their_property_name() {
    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Account")
                .getter("getOwner", |p| p.constraint(ConstraintDescriptor::not_null()))
                .getter("computeHash", |p| p.constraint(ConstraintDescriptor::not_null()))
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata).build();

    // Fields are stored under the resolved property name; `computeHash` is
    // not a getter by convention and is never traversed.
    let account = Object::builder("Account").null_field("owner").build();
    let violations = engine.validate(&Value::Object(account), &[]).unwrap();
    assert_eq!(paths(&violations), vec!["owner"]);
}

#[test]
fn class_level_constraints_report_at_the_root() {
    #[derive(Debug)]
    struct RequiresBalance;

    impl ConstraintValidator for RequiresBalance {
        fn is_valid(&self, value: &Value, _ctx: &ConstraintContext<'_>) -> bool {
            let Some(object) = value.as_object() else {
                return true;
            };
            let debit = object.get("debit").and_then(|v| v.as_int()).unwrap_or(0);
            let credit = object.get("credit").and_then(|v| v.as_int()).unwrap_or(0);
            debit == credit
        }
    }

    let metadata = MetadataRegistry::builder()
        .register_type(
            TypeDescriptor::builder("Entry")
                .constraint(ConstraintDescriptor::custom("Balanced").message("must balance"))
                .property("debit", |p| p.declared(ValueKind::Int))
                .property("credit", |p| p.declared(ValueKind::Int))
                .build(),
        )
        .build();
    let engine = Validator::builder(metadata)
        .constraint(
            ConstraintKind::Custom("Balanced".into()),
            TypeMatch::Kind(ValueKind::Object),
            |_d| Ok(Arc::new(RequiresBalance) as Arc<dyn ConstraintValidator>),
        )
        .build();

    let entry = Object::builder("Entry")
        .field("debit", 10_i64)
        .field("credit", 7_i64)
        .build();
    let violations = engine.validate(&Value::Object(entry), &[]).unwrap();
    assert_eq!(violations.len(), 1);
    let violation = violations.iter().next().unwrap();
    assert!(violation.path().is_root());
    assert_eq!(violation.message(), "must balance");
}

#[test]
fn validation_is_deterministic_across_calls() {
    let engine = engine();
    let user = Object::builder("User")
        .null_field("name")
        .field("age", -1_i64)
        .build();
    let root = Value::Object(user);

    let first = engine.validate(&root, &[]).unwrap();
    let second = engine.validate(&root, &[]).unwrap();
    assert_eq!(paths(&first), paths(&second));
    assert_eq!(first.len(), second.len());
}

#[test]
fn one_engine_serves_many_threads() {
    let engine = engine();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let user = Object::builder("User")
                    .null_field("name")
                    .field("age", -1_i64)
                    .build();
                let violations = engine.validate(&Value::Object(user), &[]).unwrap();
                assert_eq!(violations.len(), 2);
            });
        }
    });
}

#[test]
fn violation_reports_carry_full_context() {
    let user = Object::builder("User")
        .field("name", "alice")
        .field("age", -5_i64)
        .build();
    let violations = engine().validate(&Value::Object(user.clone()), &[]).unwrap();
    let violation = violations.iter().next().unwrap();

    assert_eq!(violation.message(), "must be greater than or equal to 0");
    assert_eq!(violation.invalid_value(), &Value::Int(-5));
    assert_eq!(violation.root(), &Value::Object(user));
    assert!(violation.group().is_default());

    let json = serde_json::to_value(&violations).unwrap();
    assert_eq!(json[0]["path"], "age");
    assert_eq!(json[0]["constraint"], "Min");
}
