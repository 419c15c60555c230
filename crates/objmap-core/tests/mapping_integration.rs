//! Integration tests for the record-mapping engine
//!
//! Exercises the full public surface: rename, merge, split, ordered
//! multi-rule application, and the non-mutation guarantee.

use objmap_core::{create_mapper, mapping::transforms, MappingRule, Mapper, MappingMode};
use serde_json::{json, Value};

fn person() -> Value {
    json!({
        "name": "Juan",
        "surname": "Munain",
        "mobile": "655778899",
        "phone": "945667788",
        "parents": [
            {"name": "Martin", "surname": "Munain"},
            {"name": "Maitane", "surname": "Gamiz"},
        ],
    })
}

#[test]
fn does_not_mutate_the_input_record() {
    let record = person();
    let mapper = create_mapper(
        MappingRule::new("name").transform(|_| json!("noname")),
    );

    let mapped = mapper.apply(&record).unwrap();

    assert_eq!(record, person());
    assert_ne!(mapped, record);
    assert_eq!(mapped["name"], json!("noname"));
}

#[test]
fn identity_rule_keeps_the_value() {
    let record = person();
    let mapper = create_mapper(MappingRule::new("name"));
    let mapped = mapper.apply(&record).unwrap();
    assert_eq!(mapped["name"], record["name"]);
}

#[test]
fn applies_several_in_place_transforms() {
    let mapper = create_mapper(vec![
        MappingRule::new("name").with_transform(transforms::lowercase()),
        MappingRule::new("surname").with_transform(transforms::uppercase()),
    ]);

    let mapped = mapper.apply(&person()).unwrap();

    assert_eq!(mapped["name"], json!("juan"));
    assert_eq!(mapped["surname"], json!("MUNAIN"));
}

#[test]
fn renames_fields_and_removes_old_keys() {
    let mapper = create_mapper(vec![
        MappingRule::new("name").keyout("nombre"),
        MappingRule::new("surname")
            .keyout("apellido")
            .with_transform(transforms::uppercase()),
    ]);

    let mapped = mapper.apply(&person()).unwrap();

    assert!(mapped.get("name").is_none());
    assert!(mapped.get("surname").is_none());
    assert_eq!(mapped["nombre"], json!("Juan"));
    assert_eq!(mapped["apellido"], json!("MUNAIN"));
}

#[test]
fn merges_several_keys_into_one() {
    let mapper = create_mapper(vec![
        MappingRule::new(["name", "surname"])
            .keyout("fullname")
            .with_transform(transforms::join(" ")),
        MappingRule::new(["mobile", "phone"])
            .keyout("phones")
            .transform(|mut values: Vec<Value>| {
                let home = values.pop().unwrap_or(Value::Null);
                let mobile = values.pop().unwrap_or(Value::Null);
                json!({"mobile": mobile, "home": home})
            }),
    ]);

    let mapped = mapper.apply(&person()).unwrap();

    assert!(mapped.get("name").is_none());
    assert!(mapped.get("surname").is_none());
    assert_eq!(mapped["fullname"], json!("Juan Munain"));

    assert!(mapped.get("mobile").is_none());
    assert!(mapped.get("phone").is_none());
    assert_eq!(mapped["phones"]["mobile"], json!("655778899"));
    assert_eq!(mapped["phones"]["home"], json!("945667788"));
}

#[test]
fn splits_one_key_into_several() {
    let mapper = create_mapper(
        MappingRule::new("parents")
            .keyout(["father", "mother"])
            .transform(|values: Vec<Value>| {
                let parents = values[0].as_array().cloned().unwrap_or_default();
                let names: Vec<Value> = parents
                    .iter()
                    .map(|p| {
                        json!(format!(
                            "{} {}",
                            p["name"].as_str().unwrap_or_default(),
                            p["surname"].as_str().unwrap_or_default()
                        ))
                    })
                    .collect();
                Value::Array(names)
            }),
    );

    let mapped = mapper.apply(&person()).unwrap();

    assert!(mapped.get("parents").is_none());
    assert_eq!(mapped["father"], json!("Martin Munain"));
    assert_eq!(mapped["mother"], json!("Maitane Gamiz"));
}

#[test]
fn splits_a_list_with_the_stringify_transform() {
    let mapper = create_mapper(
        MappingRule::new("list")
            .keyout(["p", "q"])
            .with_transform(transforms::stringify()),
    );
    let mapped = mapper.apply(&json!({"list": [1, 2]})).unwrap();
    assert_eq!(mapped, json!({"p": "1", "q": "2"}));
}

#[test]
fn later_rules_observe_earlier_outputs() {
    // Rule 2 reads the key rule 1 produced: application is sequential, not
    // independent evaluation against the original record.
    let mapper = create_mapper(vec![
        MappingRule::new("raw")
            .keyout("step1")
            .transform(|values: Vec<Value>| {
                json!(format!("{}+first", values[0].as_str().unwrap_or_default()))
            }),
        MappingRule::new("step1")
            .keyout("step2")
            .transform(|values: Vec<Value>| {
                json!(format!("{}+second", values[0].as_str().unwrap_or_default()))
            }),
    ]);

    let mapped = mapper.apply(&json!({"raw": "seed"})).unwrap();

    assert!(mapped.get("raw").is_none());
    assert!(mapped.get("step1").is_none());
    assert_eq!(mapped["step2"], json!("seed+first+second"));
}

#[test]
fn output_key_colliding_with_next_rules_input() {
    // Rule 1 writes "b"; rule 2 consumes "b". The collision resolves in
    // rule order.
    let mapper = create_mapper(vec![
        MappingRule::new("a").keyout("b"),
        MappingRule::new("b").keyout("c"),
    ]);
    let mapped = mapper.apply(&json!({"a": 10})).unwrap();
    assert_eq!(mapped, json!({"c": 10}));
}

#[test]
fn single_rule_equals_one_element_sequence() {
    let record = person();
    let single = create_mapper(MappingRule::new("name").keyout("nombre"));
    let listed = create_mapper(vec![MappingRule::new("name").keyout("nombre")]);
    assert_eq!(
        single.apply(&record).unwrap(),
        listed.apply(&record).unwrap()
    );
}

#[test]
fn reapplying_a_mapper_is_not_idempotent() {
    // Rename is not self-inverse: the first pass moves the value, the
    // second pass finds the source key absent and overwrites the renamed
    // value with null.
    let mapper = create_mapper(MappingRule::new("a").keyout("b"));
    let once = mapper.apply(&json!({"a": 1})).unwrap();
    let twice = mapper.apply(&once).unwrap();

    assert_eq!(once, json!({"b": 1}));
    assert_eq!(twice, json!({"b": Value::Null}));
    assert_ne!(once, twice);
}

#[test]
fn missing_input_key_produces_null_not_an_error() {
    let mapper = create_mapper(MappingRule::new("absent").keyout("out"));
    let mapped = mapper.apply(&json!({"other": 1})).unwrap();
    assert_eq!(mapped, json!({"other": 1, "out": Value::Null}));
}

#[test]
fn strict_mapper_surfaces_the_same_scenario_as_an_error() {
    let mapper = Mapper::with_mode(
        MappingRule::new("absent").keyout("out"),
        MappingMode::Strict,
    )
    .unwrap();
    assert!(mapper.apply(&json!({"other": 1})).is_err());
}

#[test]
fn nested_structures_survive_untouched_rules() {
    let record = person();
    let mapper = create_mapper(MappingRule::new("name").keyout("nombre"));
    let mapped = mapper.apply(&record).unwrap();
    // Fields no rule names are carried over verbatim, deep copies included.
    assert_eq!(mapped["parents"], record["parents"]);
}

#[test]
fn mapper_is_reusable_across_records() {
    let mapper = create_mapper(MappingRule::new("name").with_transform(transforms::uppercase()));
    assert_eq!(
        mapper.apply(&json!({"name": "ada"})).unwrap(),
        json!({"name": "ADA"})
    );
    assert_eq!(
        mapper.apply(&json!({"name": "grace"})).unwrap(),
        json!({"name": "GRACE"})
    );
}

#[test]
fn mapper_is_shareable_across_threads() {
    use std::sync::Arc;

    let mapper = Arc::new(create_mapper(
        MappingRule::new("n").transform(|values: Vec<Value>| {
            json!(values[0].as_i64().unwrap_or_default() * 2)
        }),
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mapper = Arc::clone(&mapper);
            std::thread::spawn(move || mapper.apply(&json!({"n": i})).unwrap())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), json!({"n": (i as i64) * 2}));
    }
}
