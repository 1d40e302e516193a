use super::*;

fn held(names: &[&str]) -> HeldKeys {
    let mut keys = HeldKeys::default();
    for name in names {
        keys.press(&Key::new(*name));
    }
    keys
}

// =============================================================
// Bindings
// =============================================================

#[test]
fn bindings_map_to_commands() {
    assert_eq!(Command::from_key(&Key::new("c")), Some(Command::EngageTile));
    assert_eq!(Command::from_key(&Key::new("r")), Some(Command::Rotate(Rotation::CounterClockwise)));
    assert_eq!(Command::from_key(&Key::new("t")), Some(Command::Rotate(Rotation::Clockwise)));
    assert_eq!(Command::from_key(&Key::new("Escape")), Some(Command::Cancel));
    assert_eq!(Command::from_key(&Key::new("p")), Some(Command::TogglePause));
    assert_eq!(Command::from_key(&Key::new("g")), Some(Command::ToggleGrid));
}

#[test]
fn bindings_ignore_case() {
    assert_eq!(Command::from_key(&Key::new("C")), Some(Command::EngageTile));
}

#[test]
fn camera_keys_are_not_commands() {
    for name in ["a", "e", "z", "q", "s", "d", "Shift"] {
        assert_eq!(Command::from_key(&Key::new(name)), None, "{name}");
    }
}

// =============================================================
// HeldKeys
// =============================================================

#[test]
fn nothing_held_gives_empty_signals() {
    let keys = HeldKeys::default();
    assert_eq!(keys.zoom_signal(), ZoomSignal::default());
    assert_eq!(keys.pan_signal(), PanSignal::default());
}

#[test]
fn zoom_keys() {
    let keys = held(&["a", "E"]);
    assert_eq!(keys.zoom_signal(), ZoomSignal { zoom_out: true, zoom_in: true });
}

#[test]
fn pan_keys() {
    let keys = held(&["z", "d"]);
    assert_eq!(keys.pan_signal(), PanSignal { up: true, left: false, down: false, right: true });
}

#[test]
fn release_and_clear() {
    let mut keys = held(&["q", "s"]);
    keys.release(&Key::new("Q"));
    assert!(!keys.is_down("q"));
    assert!(keys.is_down("s"));
    keys.clear();
    assert!(!keys.is_down("s"));
}

// =============================================================
// ActionMode
// =============================================================

#[test]
fn mode_queries() {
    let placing = ActionMode::Placing { trigger: PlacingTrigger::Gate(CellPos::new(1, 2)) };
    let selected = ActionMode::HeroSelected { hero: 4 };

    assert!(ActionMode::default().is_idle());
    assert!(placing.is_placing());
    assert_eq!(placing.active_hero(), None);
    assert_eq!(selected.active_hero(), Some(4));
    assert!(!selected.is_placing());
}
