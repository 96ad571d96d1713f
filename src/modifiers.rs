use std::collections::HashSet;
use std::fmt;

/// The modifier vocabulary shown in combo labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Ctrl,
    Alt,
    Win,
    Shift,
}

impl Modifier {
    /// Map a display key name to a modifier, if it is one.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Ctrl" => Some(Modifier::Ctrl),
            "Alt" => Some(Modifier::Alt),
            "Win" => Some(Modifier::Win),
            "Shift" => Some(Modifier::Shift),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Win => "Win",
            Modifier::Shift => "Shift",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Modifiers currently held down, driven by the hook's key transitions.
///
/// Membership reflects only keys for which a key-down was observed without an
/// intervening key-up. The text-composition channel never touches this.
#[derive(Debug, Default, Clone)]
pub struct ModifierSet {
    held: HashSet<Modifier>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, modifier: Modifier) {
        self.held.insert(modifier);
    }

    /// Releasing a modifier that was never pressed is a valid no-op.
    pub fn release(&mut self, modifier: Modifier) {
        self.held.remove(&modifier);
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.held.contains(&modifier)
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}
