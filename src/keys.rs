use std::borrow::Cow;

use crate::modifiers::{Modifier, ModifierSet};

/// Raw key name for a Windows virtual-key code.
///
/// Total: codes missing from the table fall back to a printable `KeyNN`
/// form rather than an error.
pub fn virtual_key_name(vk: u32) -> Cow<'static, str> {
    let name = match vk {
        0x08 => "Backspace",
        0x09 => "Tab",
        0x0D => "Enter",
        0x10 => "Shift",
        0x11 => "Ctrl",
        0x12 => "Alt",
        0x13 => "Pause",
        0x14 => "CapsLock",
        0x1B => "Escape",
        0x20 => "Space",
        0x21 => "PageUp",
        0x22 => "PageDown",
        0x23 => "End",
        0x24 => "Home",
        0x25 => "Left",
        0x26 => "Up",
        0x27 => "Right",
        0x28 => "Down",
        0x2C => "PrintScreen",
        0x2D => "Insert",
        0x2E => "Delete",

        0x30 => "0",
        0x31 => "1",
        0x32 => "2",
        0x33 => "3",
        0x34 => "4",
        0x35 => "5",
        0x36 => "6",
        0x37 => "7",
        0x38 => "8",
        0x39 => "9",

        0x41 => "A",
        0x42 => "B",
        0x43 => "C",
        0x44 => "D",
        0x45 => "E",
        0x46 => "F",
        0x47 => "G",
        0x48 => "H",
        0x49 => "I",
        0x4A => "J",
        0x4B => "K",
        0x4C => "L",
        0x4D => "M",
        0x4E => "N",
        0x4F => "O",
        0x50 => "P",
        0x51 => "Q",
        0x52 => "R",
        0x53 => "S",
        0x54 => "T",
        0x55 => "U",
        0x56 => "V",
        0x57 => "W",
        0x58 => "X",
        0x59 => "Y",
        0x5A => "Z",

        0x5B => "LWin",
        0x5C => "RWin",
        0x5D => "Apps",

        0x60 => "NumPad0",
        0x61 => "NumPad1",
        0x62 => "NumPad2",
        0x63 => "NumPad3",
        0x64 => "NumPad4",
        0x65 => "NumPad5",
        0x66 => "NumPad6",
        0x67 => "NumPad7",
        0x68 => "NumPad8",
        0x69 => "NumPad9",
        0x6A => "NumPadMultiply",
        0x6B => "NumPadAdd",
        0x6C => "NumPadSeparator",
        0x6D => "NumPadSubtract",
        0x6E => "NumPadDot",
        0x6F => "NumPadDivide",

        0x70 => "F1",
        0x71 => "F2",
        0x72 => "F3",
        0x73 => "F4",
        0x74 => "F5",
        0x75 => "F6",
        0x76 => "F7",
        0x77 => "F8",
        0x78 => "F9",
        0x79 => "F10",
        0x7A => "F11",
        0x7B => "F12",
        0x7C => "F13",
        0x7D => "F14",
        0x7E => "F15",
        0x7F => "F16",
        0x80 => "F17",
        0x81 => "F18",
        0x82 => "F19",
        0x83 => "F20",
        0x84 => "F21",
        0x85 => "F22",
        0x86 => "F23",
        0x87 => "F24",

        0x90 => "NumLock",
        0x91 => "ScrollLock",

        0xA0 => "LeftShift",
        0xA1 => "RightShift",
        0xA2 => "LeftCtrl",
        0xA3 => "RightCtrl",
        0xA4 => "LeftAlt",
        0xA5 => "RightAlt",

        0xBA => "Oem1",
        0xBB => "OemPlus",
        0xBC => "OemComma",
        0xBD => "OemMinus",
        0xBE => "OemPeriod",
        0xBF => "OemQuestion",
        0xC0 => "Oem3",
        0xDB => "Oem4",
        0xDC => "Oem5",
        0xDD => "Oem6",
        0xDE => "Oem7",

        _ => return Cow::Owned(format!("Key{vk:#04X}")),
    };
    Cow::Borrowed(name)
}

/// Display glyph for a raw key name.
///
/// Total: unrecognized names pass through unchanged, single characters are
/// uppercased.
pub fn display_name(raw: &str) -> String {
    match raw {
        "LeftCtrl" | "RightCtrl" | "Ctrl" => "Ctrl".into(),
        "LeftShift" | "RightShift" | "Shift" => "Shift".into(),
        "LeftAlt" | "RightAlt" | "Alt" => "Alt".into(),
        "LWin" | "RWin" | "Win" => "Win".into(),
        "Backspace" => "←".into(),
        "Delete" | "Del" => "Delete".into(),
        "Enter" | "Return" => "↵".into(),
        "Space" => "␣".into(),
        "OemQuestion" => "?".into(),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c.to_uppercase().to_string(),
                _ => raw.into(),
            }
        }
    }
}

/// Build the combo label for a pressed key under the held modifiers.
///
/// Non-Shift modifiers come first in a stable order, Shift always sits last
/// among the modifiers, the key's display name closes the label.
pub fn format_combo(mods: &ModifierSet, key_name: &str) -> String {
    let mut parts: Vec<&str> = [Modifier::Ctrl, Modifier::Alt, Modifier::Win]
        .iter()
        .filter(|m| mods.contains(**m))
        .map(|m| m.label())
        .collect();
    if mods.contains(Modifier::Shift) {
        parts.push(Modifier::Shift.label());
    }
    parts.push(key_name);
    parts.join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_vk_gets_printable_fallback() {
        assert_eq!(virtual_key_name(0xE8), "Key0xE8");
    }

    #[test]
    fn single_char_is_uppercased() {
        assert_eq!(display_name("a"), "A");
        assert_eq!(display_name("A"), "A");
    }
}
