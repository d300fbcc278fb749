//! Terminal-independent key events.
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary so
//! the launcher logic can be driven without a terminal (headless mode, tests).

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character with Ctrl held (Ctrl+L, Ctrl+C, ...)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,

    /// Function key (F1-F12)
    F(u8),
}

impl InputKey {
    /// Whether this key edits text in a focused input
    pub fn is_text_edit(&self) -> bool {
        matches!(
            self,
            InputKey::Char(_) | InputKey::Backspace | InputKey::Delete
        )
    }
}
