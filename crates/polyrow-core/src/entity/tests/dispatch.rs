use super::{lookup, zoo_root};
use crate::{
    entity::Resolved,
    error::ErrorClass,
    model::ConversionError,
    row::ResultRow,
    test_fixtures::{Dog, Puppy, animal_row, tenant},
    value::Value,
};

fn puppy_row() -> ResultRow {
    animal_row("puppy", 3, "Bit")
        .column("good_boy", Value::Bool(true))
        .column("age_weeks", Value::Uint(9))
        .build()
}

#[test]
fn own_discriminator_decodes_the_concrete_type() {
    let (_mgr, _zoo, root) = zoo_root();
    let dog = lookup(&root, "dog");
    let row = animal_row("dog", 7, "Rex")
        .column("good_boy", Value::Bool(true))
        .build();

    let decoded = dog
        .decode_as(Some(&row), "dog", &tenant("acme"))
        .expect("dog row decodes")
        .downcast::<Dog>()
        .expect("decoded a dog");

    assert_eq!(
        *decoded,
        Dog {
            tenant: "acme".to_string(),
            id: 7,
            kind: "dog".to_string(),
            name: "Rex".to_string(),
            good_boy: true,
        }
    );
}

#[test]
fn subtype_rows_are_delegated_to_the_subtype() {
    let (_mgr, _zoo, root) = zoo_root();
    let dog = lookup(&root, "dog");

    let resolved = dog
        .decode_as(Some(&puppy_row()), "puppy", &tenant("acme"))
        .expect("puppy is a registered dog subtype");
    let puppy = resolved.downcast::<Puppy>().expect("decoded a puppy");

    assert_eq!(puppy.age_weeks, Some(9));
    assert_eq!(puppy.name, "Bit");
    assert_eq!(puppy.tenant, "acme");
}

#[test]
fn rows_of_other_branches_are_unrelated() {
    let (_mgr, _zoo, root) = zoo_root();
    let cat = lookup(&root, "cat");
    let puppy = lookup(&root, "puppy");

    let from_cat = cat
        .decode_as(Some(&puppy_row()), "puppy", &tenant("acme"))
        .expect("puppy is registered");
    assert!(matches!(
        from_cat,
        Resolved::Unrelated { ref discriminator } if discriminator == "puppy"
    ));

    // dispatch only narrows: a dog row is not a puppy
    let dog_row = animal_row("dog", 1, "Rex").build();
    let from_puppy = puppy
        .decode_as(Some(&dog_row), "dog", &tenant("acme"))
        .expect("dog is registered");
    assert!(from_puppy.is_unrelated());
}

#[test]
fn unregistered_discriminator_is_a_registry_miss() {
    let (_mgr, _zoo, root) = zoo_root();
    let dog = lookup(&root, "dog");
    let row = animal_row("unicorn", 1, "Sparkle").build();

    let err = dog
        .decode_as(Some(&row), "unicorn", &tenant("acme"))
        .expect_err("unicorn is not registered");

    assert!(err.is_not_found());
    assert_eq!(err.class, ErrorClass::NotFound);
    assert_eq!(
        err.to_string(),
        "no type entity registered for 'unicorn' under root 'zoo::Animal'"
    );
}

#[test]
fn missing_row_resolves_to_empty() {
    let (_mgr, _zoo, root) = zoo_root();
    let dog = lookup(&root, "dog");
    let kkeys = tenant("acme");

    assert!(
        dog.decode_as(None::<&ResultRow>, "unicorn", &kkeys)
            .expect("no row, no lookup")
            .is_empty()
    );
    assert!(
        dog.decode(None::<&ResultRow>, &kkeys)
            .expect("no row, no discovery")
            .is_empty()
    );
    assert!(
        root.decode(None::<&ResultRow>, &kkeys)
            .expect("no row, no discovery")
            .is_empty()
    );
}

#[test]
fn discovered_discriminator_matches_the_known_one() {
    let (_mgr, _zoo, root) = zoo_root();
    let dog = lookup(&root, "dog");
    let row = puppy_row();
    let kkeys = tenant("acme");

    let discovered = dog
        .decode(Some(&row), &kkeys)
        .expect("type column is present")
        .downcast::<Puppy>()
        .expect("decoded a puppy");
    let known = dog
        .decode_as(Some(&row), "puppy", &kkeys)
        .expect("puppy is registered")
        .downcast::<Puppy>()
        .expect("decoded a puppy");

    assert_eq!(discovered, known);
}

#[test]
fn discovery_requires_a_type_column_from_the_right_table() {
    let (_mgr, _zoo, root) = zoo_root();
    let dog = lookup(&root, "dog");
    let kkeys = tenant("acme");

    let without = ResultRow::builder("zoo_acme", "animals")
        .column("id", Value::Uint(1))
        .build();
    let foreign = ResultRow::builder("zoo_acme", "animals")
        .column("id", Value::Uint(1))
        .column_from("audit", "kind", "dog")
        .build();
    let null = ResultRow::builder("zoo_acme", "animals")
        .column("id", Value::Uint(1))
        .column("kind", Value::Null)
        .build();

    for row in [without, foreign, null] {
        let err = dog
            .decode(Some(&row), &kkeys)
            .expect_err("no usable type column");
        assert!(err.is_conversion());
        assert_eq!(err.to_string(), "missing POJO type column for class 'zoo::Dog'");
    }
}

#[test]
fn root_dispatches_to_every_registered_type() {
    let (_mgr, _zoo, root) = zoo_root();
    let kkeys = tenant("acme");

    let puppy = root
        .decode(Some(&puppy_row()), &kkeys)
        .expect("root reaches every type");
    assert!(puppy.object().is_some_and(|p| p.is::<Puppy>()));

    let unknown = animal_row("unicorn", 1, "Sparkle").build();
    let err = root
        .decode(Some(&unknown), &kkeys)
        .expect_err("unicorn is not registered");
    assert!(err.is_not_found());

    let dog = root
        .decode_as(Some(&animal_row("dog", 2, "Rex").build()), "dog", &kkeys)
        .expect("dog is registered");
    assert!(dog.downcast::<Dog>().is_some());
}

#[test]
fn keyspace_keys_must_be_supplied() {
    let (_mgr, _zoo, root) = zoo_root();
    let dog = lookup(&root, "dog");
    let row = animal_row("dog", 7, "Rex").build();

    let err = dog
        .decode_as(Some(&row), "dog", &Default::default())
        .expect_err("tenant is not a column and was not supplied");

    assert!(matches!(
        err.detail,
        Some(crate::error::ErrorDetail::Conversion(
            ConversionError::MissingKeyspaceKey { ref key, .. }
        )) if key == "tenant"
    ));
}

#[test]
fn incompatible_column_fails_conversion() {
    let (_mgr, _zoo, root) = zoo_root();
    let dog = lookup(&root, "dog");
    let row = animal_row("dog", 7, "Rex")
        .column("good_boy", Value::Text("very".into()))
        .build();

    let err = dog
        .decode_as(Some(&row), "dog", &tenant("acme"))
        .expect_err("text is not a bool");

    assert!(err.is_conversion());
    assert_eq!(
        err.to_string(),
        "column 'good_boy' (declared in 'zoo::Dog') expects bool but found text"
    );
}

#[test]
fn display_lists_type_class_keyspace_and_columns() {
    let (_mgr, _zoo, root) = zoo_root();

    assert_eq!(
        lookup(&root, "dog").to_string(),
        "TypeEntityDescriptor[type=dog,class=zoo::Dog,keyspace=zoo,columns=[id, kind, name, good_boy]]"
    );
}
