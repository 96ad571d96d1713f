use screenkey::modifiers::{Modifier, ModifierSet};

#[test]
fn membership_tracks_the_last_transition() {
    let mut mods = ModifierSet::new();
    mods.press(Modifier::Ctrl);
    mods.press(Modifier::Shift);
    mods.release(Modifier::Ctrl);

    assert!(!mods.contains(Modifier::Ctrl));
    assert!(mods.contains(Modifier::Shift));
    assert_eq!(mods.len(), 1);
}

#[test]
fn release_without_press_is_a_noop() {
    let mut mods = ModifierSet::new();
    mods.release(Modifier::Alt);
    assert!(mods.is_empty());
}

#[test]
fn duplicate_press_is_idempotent() {
    let mut mods = ModifierSet::new();
    mods.press(Modifier::Win);
    mods.press(Modifier::Win);
    assert_eq!(mods.len(), 1);

    mods.release(Modifier::Win);
    assert!(mods.is_empty());
}

#[test]
fn replay_converges_to_the_held_set() {
    let mut mods = ModifierSet::new();
    let script = [
        (Modifier::Ctrl, true),
        (Modifier::Alt, true),
        (Modifier::Ctrl, false),
        (Modifier::Shift, true),
        (Modifier::Alt, false),
        (Modifier::Ctrl, true),
    ];
    for (modifier, down) in script {
        if down {
            mods.press(modifier);
        } else {
            mods.release(modifier);
        }
    }

    assert!(mods.contains(Modifier::Ctrl));
    assert!(mods.contains(Modifier::Shift));
    assert!(!mods.contains(Modifier::Alt));
    assert!(!mods.contains(Modifier::Win));
}
