use super::*;

fn sample_frame() -> Frame {
    Frame {
        id: "id-1".to_owned(),
        ts: 42,
        game_id: Some("game-1".to_owned()),
        from: Some("player-1".to_owned()),
        syscall: "hero:moved".to_owned(),
        kind: FrameKind::Delta,
        data: serde_json::json!({
            "hero_id": 2,
            "cell": {"x": 3, "y": -4},
            "paused": true,
            "ratio": 1.25,
            "nil": null
        }),
    }
}

fn encode_wire(wire: &WireFrame) -> Vec<u8> {
    let mut bytes = Vec::new();
    wire.encode(&mut bytes).expect("encode");
    bytes
}

#[test]
fn kind_numeric_mapping_matches_wire_enum() {
    assert_eq!(FrameKind::Delta.as_i32(), 0);
    assert_eq!(FrameKind::Request.as_i32(), 1);
}

#[test]
fn kind_from_wire_rejects_out_of_range_value() {
    let err = FrameKind::from_i32(9).expect_err("kind should be invalid");
    assert!(matches!(err, CodecError::InvalidKind(9)));
}

#[test]
fn encode_decode_preserves_frame() {
    let frame = sample_frame();
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode should succeed");
    assert_eq!(decoded, frame);
}

#[test]
fn integral_numbers_decode_as_integers() {
    let frame = sample_frame();
    let decoded = decode_frame(&encode_frame(&frame)).expect("decode");
    assert_eq!(decoded.data["cell"]["x"].as_i64(), Some(3));
    assert_eq!(decoded.data["cell"]["y"].as_i64(), Some(-4));
    assert_eq!(decoded.data["ratio"].as_f64(), Some(1.25));
}

#[test]
fn decode_frame_rejects_malformed_bytes() {
    let err = decode_frame(&[0xff, 0x00, 0x01]).expect_err("bytes should fail");
    assert!(matches!(err, CodecError::Decode(_)));
}

#[test]
fn decode_frame_rejects_invalid_wire_kind() {
    let wire = WireFrame {
        id: "id-1".to_owned(),
        ts: 1,
        game_id: None,
        from: None,
        syscall: "cell:used".to_owned(),
        kind: 77,
        data: Some(json_to_proto(&serde_json::json!({}))),
    };

    let err = decode_frame(&encode_wire(&wire)).expect_err("kind should fail");
    assert!(matches!(err, CodecError::InvalidKind(77)));
}

#[test]
fn decode_frame_defaults_missing_data_to_empty_object() {
    let wire = WireFrame {
        id: "id-1".to_owned(),
        ts: 1,
        game_id: None,
        from: None,
        syscall: "ai:recompute".to_owned(),
        kind: FrameKind::Request.as_i32(),
        data: None,
    };

    let frame = decode_frame(&encode_wire(&wire)).expect("decode");
    assert_eq!(frame.data, serde_json::json!({}));
}

#[test]
fn decode_frame_converts_nan_number_to_json_null() {
    let wire = WireFrame {
        id: "id-1".to_owned(),
        ts: 1,
        game_id: None,
        from: None,
        syscall: "cell:used".to_owned(),
        kind: FrameKind::Delta.as_i32(),
        data: Some(prost_types::Value {
            kind: Some(prost_types::value::Kind::NumberValue(f64::NAN)),
        }),
    };

    let frame = decode_frame(&encode_wire(&wire)).expect("decode");
    assert_eq!(frame.data, Value::Null);
}

#[test]
fn new_frame_has_fresh_id_and_timestamp() {
    let a = Frame::new("clock:inverted", FrameKind::Delta, serde_json::json!({}));
    let b = Frame::new("clock:inverted", FrameKind::Delta, serde_json::json!({}));
    assert_ne!(a.id, b.id);
    assert!(a.ts > 0);
    assert!(a.game_id.is_none());
}

#[test]
fn builders_set_game_and_sender() {
    let frame = Frame::new("game:pause", FrameKind::Delta, serde_json::json!({"paused": true}))
        .with_game_id("g")
        .with_from("p");
    assert_eq!(frame.game_id.as_deref(), Some("g"));
    assert_eq!(frame.from.as_deref(), Some("p"));
}

#[test]
fn kind_serializes_as_lowercase_json() {
    assert_eq!(serde_json::to_string(&FrameKind::Delta).expect("serialize"), "\"delta\"");
    assert_eq!(
        serde_json::from_str::<FrameKind>("\"request\"").expect("deserialize"),
        FrameKind::Request
    );
    assert!(serde_json::from_str::<FrameKind>("\"Request\"").is_err());
}
