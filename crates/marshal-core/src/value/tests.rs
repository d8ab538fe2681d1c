use super::*;
use crate::types::Timestamp;

#[test]
fn numeric_coercions_narrow_or_refuse() {
    assert_eq!(Value::Float(42.0).coerce_i32(), Some(42));
    assert_eq!(Value::Float(42.9).coerce_i64(), Some(42));
    assert_eq!(Value::Float(f64::NAN).coerce_i64(), None);
    assert_eq!(Value::Float(1e20).coerce_i64(), None);
    assert_eq!(Value::Int(-1).coerce_u64(), None);
    assert_eq!(Value::Uint(u64::MAX).coerce_i64(), None);
    assert_eq!(Value::Int(7).coerce_f64(), Some(7.0));
    assert_eq!(Value::Text("7".into()).coerce_i64(), None);
}

#[test]
fn f32_narrowing_refuses_out_of_range_values() {
    assert_eq!(Value::Float(1e300).coerce_f32(), None);
    assert_eq!(Value::Float(-1e300).coerce_f32(), None);
    assert_eq!(Value::Float(0.5).coerce_f32(), Some(0.5));
    assert_eq!(Value::Float(f64::INFINITY).coerce_f32(), Some(f32::INFINITY));
    assert!(Value::Float(f64::NAN).coerce_f32().is_some_and(f32::is_nan));
}

#[test]
fn booleans_accept_common_text_spellings() {
    assert_eq!(Value::from("true").coerce_bool(), Some(true));
    assert_eq!(Value::from("FALSE").coerce_bool(), Some(false));
    assert_eq!(Value::from("1").coerce_bool(), Some(true));
    assert_eq!(Value::from("not-a-bool").coerce_bool(), None);
    assert_eq!(Value::Int(1).coerce_bool(), None);
}

#[test]
fn bytes_accept_blob_text_and_integer_lists() {
    assert_eq!(Value::Blob(vec![1, 2]).coerce_bytes(), Some(vec![1, 2]));
    assert_eq!(Value::from("hi").coerce_bytes(), Some(b"hi".to_vec()));
    assert_eq!(Value::list([1_u8, 255]).coerce_bytes(), Some(vec![1, 255]));
    assert_eq!(Value::list([1_i32, 256]).coerce_bytes(), None);
}

#[test]
fn timestamps_accept_millis_and_rfc3339() {
    let ts = Timestamp::from_millis(1_709_296_245_250);

    assert_eq!(Value::Int(1_709_296_245_250).coerce_timestamp(), Some(ts));
    assert_eq!(
        Value::from("2024-03-01T12:30:45.250Z").coerce_timestamp(),
        Some(ts)
    );
    assert_eq!(Value::from("soon").coerce_timestamp(), None);
}

#[test]
fn insert_path_creates_and_replaces_intermediate_maps() {
    let mut map = ValueMap::new();
    map.insert("Parent", "scalar");
    map.insert_path("Parent.Child.Leaf", 1_i64);
    map.insert_path("Top", true);

    let parent = map.get_map("Parent").unwrap();
    let child = parent.get_map("Child").unwrap();

    assert_eq!(child.get("Leaf"), Some(&Value::Int(1)));
    assert_eq!(map.get("Top"), Some(&Value::Bool(true)));
}

#[test]
fn json_documents_convert_to_values() {
    let map = ValueMap::from_json_str(
        r#"{"Name":"Ada","Age":36,"Ratio":0.5,"Big":18446744073709551615,"Tags":["a"],"Gone":null}"#,
    )
    .unwrap();

    assert_eq!(map.get_str("Name"), Some("Ada"));
    assert_eq!(map.get("Age"), Some(&Value::Int(36)));
    assert_eq!(map.get("Ratio"), Some(&Value::Float(0.5)));
    assert_eq!(map.get("Big"), Some(&Value::Uint(u64::MAX)));
    assert_eq!(map.get_list("Tags"), Some(&[Value::from("a")][..]));
    assert_eq!(map.get("Gone"), Some(&Value::Null));
}

#[test]
fn non_object_json_is_a_bad_argument() {
    let err = ValueMap::from_json_str("[1, 2]").unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::BadArgument);
}

#[test]
fn wire_shape_is_untagged() {
    let mut map = ValueMap::new();
    map.insert("Joined", Timestamp::from_millis(5));
    map.insert("Name", "Ada");
    map.insert("Nothing", Value::Null);

    let json = serde_json::to_string(&Value::Map(map)).unwrap();
    assert_eq!(json, r#"{"Joined":5,"Name":"Ada","Nothing":null}"#);

    let back: Value = serde_json::from_str(&json).unwrap();
    let back = back.as_map().unwrap();
    assert_eq!(back.get("Joined"), Some(&Value::Int(5)));
    assert_eq!(back.get("Nothing"), Some(&Value::Null));
}

#[test]
fn option_conversion_maps_none_to_null() {
    assert_eq!(Value::from(None::<String>), Value::Null);
    assert_eq!(Value::from(Some(3_u32)), Value::Uint(3));
    assert_eq!(Value::Null.type_name(), "null");
}
