//! Unit tests for ObjectId encoding and decoding.

use objgraph::{DecodeError, GroupKind, ObjectId, ObjectKey};
use proptest::prelude::*;

#[test]
fn test_encode_canonical_form() {
    let id = ObjectId::new("apps", "Deployment", "default", "web");
    assert_eq!(id.encode(), "G=apps,K=Deployment,NS=default,N=web");
    assert_eq!(id.to_string(), id.encode());
}

#[test]
fn test_round_trip_with_empty_group_and_namespace() {
    let ids = [
        ObjectId::new("", "Pod", "default", "web-0"),
        ObjectId::new("rbac.authorization.k8s.io", "ClusterRole", "", "admin"),
        ObjectId::new("", "Namespace", "", "kube-system"),
        ObjectId::new("", "", "", ""),
    ];
    for id in ids {
        let encoded = id.encode();
        let decoded = ObjectId::parse(&encoded).unwrap();
        assert_eq!(decoded, id);
        assert_eq!(decoded.encode(), encoded);
    }
}

#[test]
fn test_round_trip_escapes_separators() {
    let id = ObjectId::new("a,b", "K=ind", "ns\\x", "name,=\\");
    let encoded = id.encode();
    assert_eq!(encoded, r"G=a\,b,K=K\=ind,NS=ns\\x,N=name\,\=\\");
    assert_eq!(encoded.parse::<ObjectId>().unwrap(), id);
}

#[test]
fn test_decode_empty_string() {
    assert_eq!(ObjectId::parse(""), Err(DecodeError::Empty));
}

#[test]
fn test_decode_unknown_field() {
    let err = ObjectId::parse("G=apps,K=Deployment,NS=default,X=web").unwrap_err();
    assert!(err.is_unknown_field());
    assert!(matches!(err, DecodeError::UnknownField { ref field, .. } if field == "X"));
}

#[test]
fn test_decode_missing_field_is_not_defaulted() {
    let err = ObjectId::parse("G=apps,K=Deployment,N=web").unwrap_err();
    assert!(matches!(err, DecodeError::MissingField { field: "NS", .. }));
}

#[test]
fn test_decode_duplicate_field() {
    let err = ObjectId::parse("G=apps,K=Deployment,NS=default,N=web,N=api").unwrap_err();
    assert!(matches!(err, DecodeError::DuplicateField { field: "N", .. }));
}

#[test]
fn test_decode_out_of_order_fields() {
    let err = ObjectId::parse("K=Deployment,G=apps,NS=default,N=web").unwrap_err();
    assert!(matches!(err, DecodeError::OutOfOrder { field: "G", .. }));
}

#[test]
fn test_decode_segment_without_separator() {
    let err = ObjectId::parse("G=apps,Deployment,NS=default,N=web").unwrap_err();
    assert!(matches!(err, DecodeError::MalformedSegment { ref segment, .. } if segment == "Deployment"));
}

#[test]
fn test_decode_unescaped_equals_in_value() {
    let err = ObjectId::parse("G=apps,K=Deployment,NS=default,N=a=b").unwrap_err();
    assert!(matches!(err, DecodeError::MalformedSegment { .. }));
}

#[test]
fn test_decode_dangling_escape() {
    let err = ObjectId::parse("G=apps,K=Deployment,NS=default,N=web\\").unwrap_err();
    assert!(matches!(err, DecodeError::DanglingEscape { .. }));
}

#[test]
fn test_derived_keys() {
    let id = ObjectId::new("apps", "StatefulSet", "demo", "pg");
    assert_eq!(id.group_kind(), GroupKind::new("apps", "StatefulSet"));
    assert_eq!(
        id.object_key(),
        ObjectKey {
            namespace: "demo".to_string(),
            name: "pg".to_string()
        }
    );
    assert_eq!(id.object_key().to_string(), "demo/pg");
}

#[test]
fn test_serde_uses_string_form() {
    let id = ObjectId::new("", "Service", "demo", "pg");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"G=,K=Service,NS=demo,N=pg\"");
    let back: ObjectId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);

    let bad: Result<ObjectId, _> = serde_json::from_str("\"G=,K=Service\"");
    assert!(bad.is_err());
}

#[test]
fn test_decode_rejects_escape_of_ordinary_char() {
    let input = r"G=,K=Pod,NS=default,N=\a";
    let err = ObjectId::parse(input).unwrap_err();
    assert!(matches!(err, DecodeError::InvalidEscape { escaped: 'a', .. }));
    assert_eq!(
        err.to_string(),
        r"invalid escape '\a' in object id 'G=,K=Pod,NS=default,N=\a'"
    );
}

#[test]
fn test_accepted_input_reencodes_identically() {
    let inputs = [
        "G=apps,K=Deployment,NS=default,N=web",
        r"G=a\,b,K=K\=ind,NS=ns\\x,N=name\,\=\\",
        "G=,K=,NS=,N=",
    ];
    for input in inputs {
        assert_eq!(ObjectId::parse(input).unwrap().encode(), input);
    }
}

proptest! {
    #[test]
    fn parse_then_encode_returns_input(
        s in r"G=([a-z,=\\]|\\[a-z,=\\]){0,4},K=([a-z,=\\]|\\[a-z,=\\]){0,4},NS=([a-z,=\\]|\\[a-z,=\\]){0,4},N=([a-z,=\\]|\\[a-z,=\\]){0,4}",
    ) {
        if let Ok(id) = ObjectId::parse(&s) {
            prop_assert_eq!(id.encode(), s);
        }
    }

    #[test]
    fn encode_then_parse_returns_id(
        group in r"[a-z.,=\\]{0,6}",
        kind in r"[A-Za-z,=\\]{0,6}",
        namespace in r"[a-z\-,=\\]{0,6}",
        name in r"[a-z0-9,=\\]{0,6}",
    ) {
        let id = ObjectId::new(group, kind, namespace, name);
        prop_assert_eq!(ObjectId::parse(&id.encode()), Ok(id));
    }
}
