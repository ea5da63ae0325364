use bytes::Bytes;
use rstest::rstest;

use super::NO_PATH;
use crate::{Error, ValueKind, iterate_array, iterate_object};

fn array_raw<P: AsRef<str>>(doc: &'static [u8], path: &[P]) -> Vec<Vec<u8>> {
    iterate_array(Bytes::from_static(doc), path)
        .map(|item| item.unwrap().raw().to_vec())
        .collect()
}

fn object_raw<P: AsRef<str>>(doc: &'static [u8], path: &[P]) -> Vec<(Vec<u8>, Vec<u8>)> {
    iterate_object(Bytes::from_static(doc), path)
        .map(|item| {
            let member = item.unwrap();
            (member.key().to_vec(), member.value().raw().to_vec())
        })
        .collect()
}

#[test]
fn array_yields_elements_in_document_order() {
    let got = array_raw(br#"[{"a":1},{"e":666},"leonard",666,null]"#, NO_PATH);
    let expect: Vec<&[u8]> = vec![br#"{"a":1}"#, br#"{"e":666}"#, b"leonard", b"666", b"null"];
    assert_eq!(got, expect);
}

#[test]
fn array_tolerates_arbitrary_whitespace_between_tokens() {
    let doc = b"   [\n  {\"a\"   :   [0,true,  false  ,\"leonard\",null]\n  ,\"b\":99,\"c\":{\"d\":233}\n  },   {    \"e\":666},    \"   leonard\"\n  , 666, null\n  ]";
    let got = array_raw(doc, NO_PATH);
    assert_eq!(got.len(), 5);
    assert_eq!(got[1], br#"{    "e":666}"#.to_vec());
    assert_eq!(got[2], b"   leonard".to_vec());
    assert_eq!(got[3], b"666".to_vec());
    assert_eq!(got[4], b"null".to_vec());
}

#[test]
fn array_value_kinds_are_classified() {
    let kinds: Vec<ValueKind> = iterate_array(Bytes::from_static(br#"[{},[1],"x",0]"#), NO_PATH)
        .map(|item| item.unwrap().kind())
        .collect();
    assert_eq!(
        kinds,
        [
            ValueKind::Object,
            ValueKind::Array,
            ValueKind::String,
            ValueKind::Scalar
        ]
    );
}

#[test]
fn empty_array_completes_without_items() {
    assert!(array_raw(b"  [  ]  ", NO_PATH).is_empty());
}

#[test]
fn trailing_comma_before_close_is_tolerated() {
    // A close bracket after a trailing comma simply ends the sequence.
    assert_eq!(array_raw(b"[1, ]", NO_PATH), vec![b"1".to_vec()]);
}

#[test]
fn object_yields_members_with_exact_whitespace_keys() {
    let got = object_raw(br#"{"":0," ":1,"  ":2}"#, NO_PATH);
    let expect: Vec<(&[u8], &[u8])> =
        vec![(b"", b"0"), (b" ", b"1"), (b"  ", b"2")];
    let expect: Vec<(Vec<u8>, Vec<u8>)> = expect
        .into_iter()
        .map(|(k, v)| (k.to_vec(), v.to_vec()))
        .collect();
    assert_eq!(got, expect);
}

#[test]
fn object_preserves_duplicate_keys_in_encounter_order() {
    let got = object_raw(br#"{"a":1,"a":2}"#, NO_PATH);
    assert_eq!(
        got,
        vec![(b"a".to_vec(), b"1".to_vec()), (b"a".to_vec(), b"2".to_vec())]
    );
}

#[test]
fn object_iterates_mixed_value_kinds() {
    let got = object_raw(
        br#"{"":{"a":[0,true,"leonard"]},"b":{"c":"miao"},"d":666,"e":"leonard","f":null,"g":[1,true,"leonard"]}"#,
        NO_PATH,
    );
    let keys: Vec<&[u8]> = got.iter().map(|(k, _)| k.as_slice()).collect();
    assert_eq!(keys, [&b""[..], &b"b"[..], &b"d"[..], &b"e"[..], &b"f"[..], &b"g"[..]]);
    assert_eq!(got[0].1, br#"{"a":[0,true,"leonard"]}"#.to_vec());
    assert_eq!(got[3].1, b"leonard".to_vec());
    assert_eq!(got[5].1, br#"[1,true,"leonard"]"#.to_vec());
}

#[test]
fn iterators_descend_through_a_key_path_first() {
    let doc = b"{   \"a\"\n  :{\" \":{\"c\":233\n  ,\"d\":\"leonard\",\"e\"    :     null,\"f\":\n  [null,1,\"leonard\"],\"\":666}\n  }}";
    let got = object_raw(doc, &["a", " "]);
    let keys: Vec<&[u8]> = got.iter().map(|(k, _)| k.as_slice()).collect();
    assert_eq!(keys, [&b"c"[..], &b"d"[..], &b"e"[..], &b"f"[..], &b""[..]]);
    assert_eq!(got[3].1, br#"[null,1,"leonard"]"#.to_vec());
}

#[rstest]
#[case(&br#"{"a":"#[..])] // truncated document
#[case(b"")] // nothing at all
#[case(br#"{"a":1}"#)] // object where an array was requested
fn array_iteration_emits_exactly_one_malformed(#[case] doc: &'static [u8]) {
    let mut stream = iterate_array(Bytes::from_static(doc), NO_PATH);
    assert_eq!(stream.next().unwrap().unwrap_err(), Error::Malformed);
    assert!(stream.next().is_none());
}

#[rstest]
#[case(br#"{}"#)] // no valid key token
#[case(br#"{"a" 1}"#)] // missing colon
#[case(br#"{"a":1 "b":2}"#)] // missing separator
#[case(br#"{666:1}"#)] // non-string key
fn object_contract_violations_emit_exactly_one_malformed(#[case] doc: &'static [u8]) {
    let mut stream = iterate_object(Bytes::from_static(doc), NO_PATH);
    assert_eq!(stream.next().unwrap().unwrap_err(), Error::Malformed);
    assert!(stream.next().is_none());
}

#[test]
fn path_to_non_composite_is_malformed() {
    let mut stream = iterate_array(Bytes::from_static(br#"{"a":1}"#), &["a"]);
    assert_eq!(stream.next().unwrap().unwrap_err(), Error::Malformed);
    assert!(stream.next().is_none());
}

#[test]
fn absent_path_surfaces_path_not_found() {
    let mut stream = iterate_object(Bytes::from_static(br#"{"a":{}}"#), &["x"]);
    assert_eq!(stream.next().unwrap().unwrap_err(), Error::PathNotFound);
    assert!(stream.next().is_none());
}

#[test]
fn array_spans_reconstruct_the_document() {
    let doc = Bytes::from_static(br#"[{"a":1},{"e":666},"leonard",666,null]"#);
    let mut rebuilt = Vec::new();
    rebuilt.push(b'[');
    for (i, item) in iterate_array(doc.clone(), NO_PATH).enumerate() {
        let value = item.unwrap();
        if i > 0 {
            rebuilt.push(b',');
        }
        if value.kind() == ValueKind::String {
            rebuilt.push(b'"');
            rebuilt.extend_from_slice(value.span().slice(&doc));
            rebuilt.push(b'"');
        } else {
            rebuilt.extend_from_slice(value.span().slice(&doc));
        }
    }
    rebuilt.push(b']');

    let original: serde_json::Value = serde_json::from_slice(&doc).unwrap();
    let roundtrip: serde_json::Value = serde_json::from_slice(&rebuilt).unwrap();
    assert_eq!(original, roundtrip);
}

#[test]
fn object_spans_reconstruct_the_document() {
    let doc = Bytes::from_static(
        br#"{"a":{"b":[1,2,{"c":null}]},"d":"leonard","e":false,"f":[true]}"#,
    );
    let mut rebuilt = Vec::new();
    rebuilt.push(b'{');
    for (i, item) in iterate_object(doc.clone(), NO_PATH).enumerate() {
        let member = item.unwrap();
        if i > 0 {
            rebuilt.push(b',');
        }
        rebuilt.push(b'"');
        rebuilt.extend_from_slice(member.key());
        rebuilt.push(b'"');
        rebuilt.push(b':');
        let value = member.value();
        if value.kind() == ValueKind::String {
            rebuilt.push(b'"');
            rebuilt.extend_from_slice(value.raw());
            rebuilt.push(b'"');
        } else {
            rebuilt.extend_from_slice(value.raw());
        }
    }
    rebuilt.push(b'}');

    let original: serde_json::Value = serde_json::from_slice(&doc).unwrap();
    let roundtrip: serde_json::Value = serde_json::from_slice(&rebuilt).unwrap();
    assert_eq!(original, roundtrip);
}

#[test]
fn iteration_is_idempotent() {
    let doc = Bytes::from_static(br#"[1,[2],"three",{"f":4}]"#);
    let first: Vec<_> = iterate_array(doc.clone(), NO_PATH).collect();
    let second: Vec<_> = iterate_array(doc, NO_PATH).collect();
    assert_eq!(first, second);
}
