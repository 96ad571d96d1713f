use std::time::{Duration, Instant};

/// The dedup character for a pressed key's display name: the name itself
/// when it is a single alphanumeric character, otherwise nothing. Glyphs
/// like `↵` or `?` never arm the filter; they cannot echo through the text
/// channel as-is, and a stale entry must not outlive them.
pub fn echo_char(key_name: &str) -> Option<char> {
    let mut chars = key_name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphanumeric() => Some(c),
        _ => None,
    }
}

/// Reconciles the two input channels for the same physical keystroke.
///
/// A plain letter arrives twice: once through the low-level hook (as an
/// uppercased combo label) and once through the window's text-composition
/// stream. The filter remembers the last single-character key shown via the
/// hook and drops a matching text event that lands inside the configured
/// window.
///
/// The window is a heuristic, not a guarantee: a genuinely distinct repeat
/// of the same key typed faster than the window is also swallowed, and an
/// echo slower than the window gets through.
#[derive(Debug)]
pub struct EchoFilter {
    window: Duration,
    last: Option<(char, Instant)>,
}

impl EchoFilter {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Record the dedup character of a keystroke just shown via the hook
    /// channel; `None` clears any previous memory.
    pub fn observe(&mut self, echo: Option<char>, at: Instant) {
        self.last = echo.map(|c| (c, at));
    }

    /// Decide whether a text-channel event should reach the display.
    ///
    /// Suppressed only when `text` is a single alphanumeric character that
    /// case-insensitively matches the recorded character and strictly less
    /// than the window has elapsed since it was recorded. Everything else
    /// fails open.
    pub fn admit(&self, text: &str, now: Instant) -> bool {
        let mut chars = text.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return true,
        };
        if !c.is_alphanumeric() {
            return true;
        }
        match self.last {
            Some((last, at)) => {
                let same = c.to_lowercase().eq(last.to_lowercase());
                !(same && now.saturating_duration_since(at) < self.window)
            }
            None => true,
        }
    }
}
