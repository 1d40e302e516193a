use super::*;

fn all_messages() -> Vec<Message> {
    vec![
        Message::TilePlaced { origin: CellPos::new(-3, 4), tile_id: 2, orientation: Orientation::Left },
        Message::HeroMoved { hero_id: 1, cell: CellPos::new(0, 5) },
        Message::RecomputeAi,
        Message::ClockInverted,
        Message::CellUsed { x: 7, y: -1 },
        Message::RolesSwapRequested,
        Message::PauseRequested { paused: true },
    ]
}

// =============================================================
// Message
// =============================================================

#[test]
fn syscalls_are_namespaced() {
    let syscalls: Vec<_> = all_messages().iter().map(Message::syscall).collect();
    assert_eq!(
        syscalls,
        vec!["tile:placed", "hero:moved", "ai:recompute", "clock:inverted", "cell:used", "roles:swap", "game:pause"]
    );
}

#[test]
fn only_authority_requests_are_requests() {
    for message in all_messages() {
        let expected = matches!(message, Message::RecomputeAi | Message::RolesSwapRequested);
        assert_eq!(message.kind() == FrameKind::Request, expected, "{message:?}");
    }
}

#[test]
fn tile_placed_payload_shape() {
    let message = Message::TilePlaced { origin: CellPos::new(1, 2), tile_id: 9, orientation: Orientation::Down };
    assert_eq!(
        message.payload(),
        json!({ "origin": { "x": 1, "y": 2 }, "tile_id": 9, "orientation": "down" })
    );
}

#[test]
fn frame_carries_syscall_kind_and_payload() {
    let message = Message::CellUsed { x: 1, y: 1 };
    let frame = message.to_frame();
    assert_eq!(frame.syscall, "cell:used");
    assert_eq!(frame.kind, FrameKind::Delta);
    assert_eq!(frame.data, json!({ "x": 1, "y": 1 }));
}

#[test]
fn from_frame_rebuilds_every_message() {
    for message in all_messages() {
        assert_eq!(Message::from_frame(&message.to_frame()).unwrap(), message);
    }
}

#[test]
fn unknown_syscall_is_rejected() {
    let frame = Frame::new("board:join", FrameKind::Request, json!({}));
    assert!(matches!(Message::from_frame(&frame), Err(DecodeError::UnknownSyscall(s)) if s == "board:join"));
}

#[test]
fn missing_field_names_the_field() {
    let frame = Frame::new(SYSCALL_HERO_MOVED, FrameKind::Delta, json!({ "hero_id": 1 }));
    match Message::from_frame(&frame) {
        Err(DecodeError::Payload { field, .. }) => assert_eq!(field, "cell"),
        other => panic!("expected payload error, got {other:?}"),
    }
}

// =============================================================
// Outbox
// =============================================================

#[test]
fn outbox_drains_in_emission_order() {
    let mut outbox = Outbox::new();
    for message in all_messages() {
        outbox.push(message);
    }
    assert_eq!(outbox.len(), 7);
    assert_eq!(outbox.drain(), all_messages());
    assert!(outbox.is_empty());
}

#[test]
fn drain_on_empty_outbox_is_empty() {
    assert!(Outbox::new().drain().is_empty());
}
