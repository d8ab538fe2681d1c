use super::*;
use crate::{
    error::ErrorKind,
    test_support::{Address, Opaque, Profile, TestObject, fixture_registry},
    types::Timestamp,
    value::Value,
};
use proptest::prelude::*;
use serde_json::json;

fn map(doc: serde_json::Value) -> ValueMap {
    ValueMap::try_from(doc).unwrap()
}

#[test]
fn transformations_rename_keys_and_nested_containers() {
    let registry = fixture_registry();
    let data = map(json!({
        "SourceKey1": "MappedValue",
        "SourceKey2": 123,
        "Name": "OriginalName",
        "SourceSub": { "OldChild": "ChildValue" },
        "SourceRenamedSub": { "OldChild2": "ChildValue2" },
    }));
    let transforms = Transformations::from_map(&map(json!({
        "SourceKey1": "DiffProp",
        "SourceKey2": "Age",
        "SourceSub": { "OldChild": "NewChild" },
        "SourceRenamedSub": { "__key": "RenamedSub", "OldChild2": "NewChild2" },
    })))
    .unwrap();

    let object =
        create_object_from_map(&registry, "test::TestObject", &data, Some(&transforms)).unwrap();
    let object = object.downcast_ref::<TestObject>().unwrap();

    assert_eq!(object.name, "OriginalName");
    assert_eq!(object.other, "MappedValue");
    assert_eq!(object.age, 123);
    assert_eq!(object.sub.new_child, "ChildValue");
    assert_eq!(object.sub2.new_child2, "ChildValue2");
}

#[test]
fn dotted_keys_only_touch_the_nested_value() {
    let data = map(json!({
        "Application": { "Identifier": "123", "Name": "TestApp" },
        "Other": "Value",
    }));
    let transforms = Transformations::from_map(&map(json!({
        "Application.Identifier": "Id",
    })))
    .unwrap();

    let out = transforms.apply(&data);
    let app = out.get_map("Application").unwrap();

    assert_eq!(app.get_str("Id"), Some("123"));
    assert_eq!(app.get_str("Name"), Some("TestApp"));
    assert!(app.get("Identifier").is_none());
    assert_eq!(out.get_str("Other"), Some("Value"));
}

#[test]
fn dotted_rules_merge_with_a_container_rename() {
    let transforms = Transformations::new()
        .rename("Application", "App")
        .rename("Application.Name", "AppName");
    let data = map(json!({ "Application": { "Name": "TestApp", "Kind": "svc" } }));

    let out = transforms.apply(&data);
    let app = out.get_map("App").unwrap();

    assert_eq!(app.get_str("AppName"), Some("TestApp"));
    assert_eq!(app.get_str("Kind"), Some("svc"));
    assert!(out.get("Application").is_none());
}

#[test]
fn rename_targets_may_be_dotted_paths() {
    let transforms = Transformations::new().rename("city", "Home.City");
    let out = transforms.apply(&map(json!({ "city": "Lyon" })));

    assert_eq!(
        out.get_map("Home").and_then(|home| home.get_str("City")),
        Some("Lyon")
    );
}

#[test]
fn malformed_transformations_are_bad_arguments() {
    let err = Transformations::from_map(&map(json!({ "A": 1 }))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadArgument);

    let err = Transformations::from_map(&map(json!({ "A": { "__key": 2 } }))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::BadArgument);
}

#[test]
fn map_source_coerces_generic_representations() {
    let mut profile = Profile::default();
    let data = map(json!({
        "Age": 42.0,
        "Visits": 7,
        "Active": "true",
        "Avatar": [1, 2, 3],
        "Joined": "2024-03-01T12:30:45.250Z",
        "Score": 3,
    }));

    hydrate_from_map(&mut profile, &data).unwrap();

    assert_eq!(profile.age, 42);
    assert_eq!(profile.visits, 7);
    assert!(profile.active);
    assert_eq!(profile.avatar, vec![1, 2, 3]);
    assert_eq!(profile.joined, Timestamp::from_millis(1_709_296_245_250));
    assert!((profile.score - 3.0).abs() < f64::EPSILON);
}

#[test]
fn map_source_rejects_non_boolean_text() {
    let mut profile = Profile::default();
    let err = hydrate_from_map(&mut profile, &map(json!({ "Active": "not-a-bool" }))).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert!(matches!(
        err.leaf(),
        MarshalError::TypeMismatch { property, expected: "bool", found: "text" } if property == "Active"
    ));
}

#[test]
fn map_source_rejects_floats_beyond_f32_range() {
    let mut profile = Profile::default();
    let err = hydrate_from_map(&mut profile, &map(json!({ "Ratio": 1e300 }))).unwrap_err();

    assert!(matches!(
        err.leaf(),
        MarshalError::TypeMismatch { property, expected: "float", found: "float" } if property == "Ratio"
    ));
    assert!(profile.ratio.abs() < f32::EPSILON);
}

#[test]
fn map_source_treats_null_as_absent() {
    let mut profile = Profile {
        name: "Kept".into(),
        ..Profile::default()
    };

    hydrate_from_map(&mut profile, &map(json!({ "Name": null, "Home": null }))).unwrap();

    assert_eq!(profile.name, "Kept");
    assert_eq!(profile.home, Address::default());
}

#[test]
fn map_source_requires_a_map_for_nested_objects() {
    let mut profile = Profile::default();
    let err = hydrate_from_map(&mut profile, &map(json!({ "Home": "Lyon" }))).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn unknown_keys_are_tolerated() {
    let mut profile = Profile::default();
    hydrate_from_map(
        &mut profile,
        &map(json!({ "Name": "Ada", "Unknown": { "Deep": [1, 2] } })),
    )
    .unwrap();

    assert_eq!(profile.name, "Ada");
}

#[test]
fn create_object_from_map_requires_a_serializable_type() {
    let registry = fixture_registry();

    let err = create_object_from_map(&registry, "test::Opaque", &ValueMap::new(), None)
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::Serialization);

    let err = create_object_from_map(&registry, "test::Missing", &ValueMap::new(), None)
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::MissingType);

    let opaque = registry.create_object("test::Opaque").unwrap();
    assert_eq!(opaque.downcast_ref::<Opaque>(), Some(&Opaque::default()));
}

#[test]
fn absent_or_null_values_pass_through_map_source() {
    let mut tags = vec!["kept".to_string()];
    let data = map(json!({ "Tags": null }));
    let codec = crate::serialize::JsonCodec::default();

    crate::protocol::FieldSource::read_array(&mut MapSource::new(&data), &codec, "Tags", &mut tags)
        .unwrap();

    assert_eq!(tags, vec!["kept".to_string()]);
    assert_eq!(Value::Null.type_name(), "null");
}

proptest! {
    #[test]
    fn empty_mapping_changes_nothing(
        name in ".*",
        age in any::<i32>(),
        active in any::<bool>(),
        tags in proptest::collection::vec("[a-z]{0,6}", 0..4),
    ) {
        let mut profile = Profile { name, age, active, tags, ..Profile::default() };
        let before = profile.clone();

        hydrate_from_map(&mut profile, &ValueMap::new()).unwrap();

        prop_assert_eq!(profile, before);
    }
}
