#![cfg(all(feature = "bincode", feature = "serde_json"))]

use std::collections::BTreeMap;

use anycodec::{
    BincodeCodec, Codec, DecodingError, EncodingError, Format, JsonCodec, ProbeFailure, Result,
};
use serde::{Deserialize, Serialize, Serializer, ser::Error as _};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Record {
    id: u32,
    name: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
enum Shape {
    #[default]
    Empty,
    Circle {
        radius: f64,
    },
    Polygon(Vec<(i32, i32)>),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Scene {
    title: String,
    shapes: Vec<Shape>,
    tags: BTreeMap<String, u8>,
    parent: Option<Box<Scene>>,
}

/// Carries a self-describing payload: fine for JSON, not for bincode.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Event {
    kind: String,
    payload: serde_json::Value,
}

/// Serde bounds hold, but serialization always refuses.
#[derive(Debug, Default, Deserialize)]
struct Secret {
    #[allow(dead_code)]
    key: String,
}

impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("secrets are not serializable"))
    }
}

fn sample_scene() -> Scene {
    Scene {
        title: "root".to_string(),
        shapes: vec![
            Shape::Empty,
            Shape::Circle { radius: 2.5 },
            Shape::Polygon(vec![(0, 0), (3, -4), (i32::MAX, i32::MIN)]),
        ],
        tags: BTreeMap::from([("a".to_string(), 1), ("b".to_string(), 2)]),
        parent: Some(Box::new(Scene {
            title: "parent".to_string(),
            ..Scene::default()
        })),
    }
}

#[test]
fn test_bincode_round_trip() -> Result<()> {
    let mut codec = BincodeCodec::<Scene>::new();

    let scene = sample_scene();
    let bytes = codec.encode(&scene)?;
    assert!(!bytes.is_empty());
    assert_eq!(codec.decode(&bytes)?, scene);

    let bytes = codec.encode(&Scene::default())?;
    assert!(!bytes.is_empty());
    assert_eq!(codec.decode(&bytes)?, Scene::default());

    Ok(())
}

#[test]
fn test_json_round_trip() -> Result<()> {
    let mut codec = JsonCodec::<Scene>::new();

    let scene = sample_scene();
    let bytes = codec.encode(&scene)?;
    assert_eq!(codec.decode(&bytes)?, scene);

    let mut codec = JsonCodec::<Record>::new();
    let bytes = codec.encode(&Record {
        id: 42,
        name: "abc".to_string(),
    })?;
    assert_eq!(bytes, br#"{"id":42,"name":"abc"}"#);

    Ok(())
}

#[test]
fn test_bincode_rejects_garbage() -> Result<()> {
    let mut codec = BincodeCodec::<Record>::new();
    let bytes = codec.encode(&Record {
        id: 7,
        name: "truncate me".to_string(),
    })?;

    assert!(matches!(
        codec.decode(&bytes[..bytes.len() - 3]),
        Err(DecodingError::Bincode(_))
    ));

    let mut padded = bytes.clone();
    padded.push(0);
    assert!(matches!(
        codec.decode(&padded),
        Err(DecodingError::Bincode(_))
    ));

    Ok(())
}

#[test]
fn test_json_rejects_garbage() {
    let codec = JsonCodec::<Record>::new();

    assert!(matches!(
        codec.decode(br#"{"id":42,"name":"#),
        Err(DecodingError::SerdeJSON(_))
    ));
    assert!(matches!(
        codec.decode(br#"{"id":"42","name":"abc"}"#),
        Err(DecodingError::SerdeJSON(_))
    ));
    assert!(matches!(
        codec.decode(br#"{"id":42,"name":"abc"} extra"#),
        Err(DecodingError::SerdeJSON(_))
    ));
}

#[test]
fn test_bincode_limit() -> Result<()> {
    let mut codec = BincodeCodec::<Vec<u8>>::new().with_limit(16);
    assert_eq!(codec.limit(), 16);

    assert!(matches!(
        codec.encode(&vec![0; 64]),
        Err(EncodingError::Bincode(_))
    ));

    let bytes = BincodeCodec::<Vec<u8>>::new().encode(&vec![0; 64])?;
    assert!(matches!(
        codec.decode(&bytes),
        Err(DecodingError::Bincode(_))
    ));

    let bytes = codec.encode(&vec![1, 2, 3])?;
    assert_eq!(codec.decode(&bytes)?, vec![1, 2, 3]);

    // Length byte plus fifteen elements lands exactly on the limit.
    let bytes = codec.encode(&vec![9; 15])?;
    assert_eq!(bytes.len(), 16);
    assert_eq!(codec.decode(&bytes)?, vec![9; 15]);

    Ok(())
}

#[test]
fn test_json_refuses_non_finite_floats() -> Result<()> {
    let mut codec = JsonCodec::<f64>::new();
    for float in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            codec.encode(&float),
            Err(EncodingError::Unsupported { .. })
        ));
    }
    assert_eq!(codec.encode(&1.5)?, b"1.5");

    let mut codec = JsonCodec::<Scene>::new();
    let mut scene = sample_scene();
    scene.shapes.push(Shape::Circle {
        radius: f64::INFINITY,
    });
    let err = codec.encode(&scene).unwrap_err();
    assert!(err.to_string().contains("inf"));

    // Bincode stores the bits as they are.
    let mut codec = BincodeCodec::<f64>::new();
    let bytes = codec.encode(&f64::INFINITY)?;
    assert_eq!(codec.decode(&bytes)?, f64::INFINITY);

    Ok(())
}

#[test]
fn test_serialize_error_propagates() {
    let secret = Secret {
        key: "hunter2".to_string(),
    };

    let err = BincodeCodec::<Secret>::new().encode(&secret).unwrap_err();
    assert!(err.to_string().contains("secrets are not serializable"));

    let err = JsonCodec::<Secret>::new().encode(&secret).unwrap_err();
    assert!(matches!(err, EncodingError::SerdeJSON(_)));
}

#[test]
fn test_probe_supported_types() {
    assert!(BincodeCodec::<Record>::new().probe_support());
    assert!(BincodeCodec::<Scene>::new().probe_support());
    assert!(BincodeCodec::<String>::new().probe_support());
    assert!(!BincodeCodec::<()>::new().probe_support());

    assert!(JsonCodec::<Record>::new().probe_support());
    assert!(JsonCodec::<Scene>::new().probe_support());
    assert!(JsonCodec::<String>::new().probe_support());
    assert!(JsonCodec::<()>::new().probe_support());
}

#[test]
fn test_probe_self_describing_payload() {
    let mut bincode = BincodeCodec::<Event>::new();
    assert!(matches!(
        bincode.probe(),
        Err(ProbeFailure::Decoding(DecodingError::Bincode(_)))
    ));
    assert!(!bincode.probe_support());

    assert!(JsonCodec::<Event>::new().probe_support());
}

#[test]
fn test_probe_unserializable_type() {
    assert!(matches!(
        BincodeCodec::<Secret>::new().probe(),
        Err(ProbeFailure::Encoding(EncodingError::Bincode(_)))
    ));
    assert!(matches!(
        JsonCodec::<Secret>::new().probe(),
        Err(ProbeFailure::Encoding(EncodingError::SerdeJSON(_)))
    ));
}

#[test]
fn test_formats() {
    assert_eq!(<BincodeCodec<Record> as Codec<Record>>::FORMAT, Format::Bincode);
    assert_eq!(<JsonCodec<Record> as Codec<Record>>::FORMAT, Format::Json);
    assert!(Format::Bincode.is_serde());
    assert_eq!(Format::Json.to_string(), "json");
}
