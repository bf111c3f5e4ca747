use super::{lookup, zoo_root};
use crate::{
    entity::ContextError,
    error::{ErrorClass, InternalError},
    model::ConversionError,
    row::Row,
    test_fixtures::{Cat, Dog, Puppy},
    value::Value,
};

fn rex(tenant: &str) -> Dog {
    Dog {
        tenant: tenant.to_string(),
        id: 7,
        kind: "dog".to_string(),
        name: "Rex".to_string(),
        good_boy: true,
    }
}

#[test]
fn object_round_trips_through_its_row() {
    let (_mgr, _zoo, root) = zoo_root();
    let ctx = root
        .new_context(Box::new(rex("Acme")))
        .expect("dog is registered");

    let row = ctx.to_row("animals").expect("dog encodes");
    assert_eq!(row.column_definitions().keyspace(0), Some("zoo_acme"));
    assert_eq!(row.get("good_boy"), Some(&Value::Bool(true)));

    let kkeys = ctx.keyspace_key_values().expect("tenant is readable");
    let decoded = root
        .decode(Some(&row), &kkeys)
        .expect("row decodes")
        .downcast::<Dog>()
        .expect("decoded a dog");

    assert_eq!(*decoded, rex("Acme"));
}

#[test]
fn type_key_column_carries_the_discriminator() {
    let (_mgr, _zoo, root) = zoo_root();
    let puppy = Puppy {
        kind: "stale".to_string(),
        tenant: "acme".to_string(),
        ..Puppy::default()
    };
    let ctx = root.new_context(Box::new(puppy)).expect("puppy is registered");

    let values = ctx.column_values("animals").expect("puppy encodes");
    assert!(values.contains(&("kind", Value::Text("puppy".to_string()))));
    assert!(values.contains(&("age_weeks", Value::Null)));
    assert_eq!(
        ctx.primary_key_values("animals").expect("id encodes"),
        [("id", Value::Uint(0))]
    );
}

#[test]
fn contexts_require_the_exact_registered_class() {
    let (_mgr, _zoo, root) = zoo_root();
    let dog = lookup(&root, "dog");

    let err = dog
        .new_context_from_root(Box::new(Cat::default()))
        .expect_err("a cat is not a dog");
    assert_eq!(
        err,
        ContextError::ClassMismatch {
            expected: "zoo::Dog".to_string(),
            found: "zoo::Cat".to_string(),
        }
    );

    let internal: InternalError = err.into();
    assert_eq!(internal.class, ErrorClass::InvalidArgument);

    let ctx = dog
        .new_context_from_root(Box::new(rex("acme")))
        .expect("exact class");
    assert!(matches!(
        ctx.to_row("audit"),
        Err(ContextError::UnknownTable { ref table, .. }) if table == "audit"
    ));
    assert!(ctx.into_object().is::<Dog>());
}

#[test]
fn excluded_keyspace_values_fail_as_conversion_errors() {
    let (_mgr, _zoo, root) = zoo_root();
    let ctx = root
        .new_context(Box::new(rex("system")))
        .expect("dog is registered");

    let err = ctx.to_row("animals").expect_err("system tenant is excluded");
    assert_eq!(
        err,
        ContextError::Conversion(ConversionError::ExcludedKeyspaceKey {
            class: "zoo::Dog".to_string(),
            key: "tenant".to_string(),
            value: "system".to_string(),
        })
    );

    let internal: InternalError = err.into();
    assert!(internal.is_conversion());
}
