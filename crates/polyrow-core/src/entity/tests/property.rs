use super::{lookup, zoo_root};
use crate::{
    entity::KeyspaceKeys,
    test_fixtures::{Cat, Dog, Puppy},
    traits::Pojo,
};
use proptest::prelude::*;
use std::fmt::Debug;

fn arb_tenant() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}".prop_filter("excluded tenant", |t| t != "system")
}

fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z ]{0,12}"
}

fn arb_dog() -> impl Strategy<Value = Dog> {
    (arb_tenant(), any::<u64>(), arb_name(), any::<bool>()).prop_map(
        |(tenant, id, name, good_boy)| Dog {
            tenant,
            id,
            kind: "dog".to_string(),
            name,
            good_boy,
        },
    )
}

fn arb_puppy() -> impl Strategy<Value = Puppy> {
    (arb_dog(), any::<Option<u32>>()).prop_map(|(dog, age_weeks)| Puppy {
        tenant: dog.tenant,
        id: dog.id,
        kind: "puppy".to_string(),
        name: dog.name,
        good_boy: dog.good_boy,
        age_weeks,
    })
}

fn arb_cat() -> impl Strategy<Value = Cat> {
    (arb_tenant(), any::<u64>(), arb_name(), any::<u8>()).prop_map(|(tenant, id, name, lives)| {
        Cat {
            tenant,
            id,
            kind: "cat".to_string(),
            name,
            lives,
        }
    })
}

// Encode through the root, then decode the row twice through the root and
// once through the object's own type descriptor.
fn round_trip<T>(object: T) -> Result<(), TestCaseError>
where
    T: Pojo + Clone + Debug + PartialEq,
{
    let (_mgr, _zoo, root) = zoo_root();
    let ctx = root
        .new_context(Box::new(object.clone()))
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let row = ctx
        .to_row("animals")
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let kkeys: KeyspaceKeys = ctx
        .keyspace_key_values()
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let own = lookup(&root, ctx.descriptor().discriminator());

    let mut decoded = Vec::new();
    for resolved in [
        root.decode(Some(&row), &kkeys),
        root.decode(Some(&row), &kkeys),
        own.decode(Some(&row), &kkeys),
    ] {
        let resolved = resolved.map_err(|err| TestCaseError::fail(err.to_string()))?;
        decoded.push(resolved.downcast::<T>());
    }

    for object_back in decoded {
        prop_assert_eq!(object_back.as_deref(), Some(&object));
    }

    Ok(())
}

proptest! {
    #[test]
    fn dogs_round_trip_and_decode_idempotently(dog in arb_dog()) {
        round_trip(dog)?;
    }

    #[test]
    fn puppies_round_trip_and_decode_idempotently(puppy in arb_puppy()) {
        round_trip(puppy)?;
    }

    #[test]
    fn cats_round_trip_and_decode_idempotently(cat in arb_cat()) {
        round_trip(cat)?;
    }
}
