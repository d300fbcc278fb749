//! Color palette

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const CARD_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);
pub const INPUT_BG: Color = Color::Rgb(40, 40, 50);
pub const INPUT_FOCUSED_BG: Color = Color::Rgb(60, 60, 80);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
/// Foreground on accent-colored backgrounds
pub const CONTRAST_FG: Color = Color::Black;

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_BLUE: Color = Color::Blue;

// --- Buttons ---
pub const BUTTON_PRIMARY_BG: Color = Color::Rgb(37, 99, 235);
pub const BUTTON_NEGATIVE_BG: Color = Color::Rgb(190, 40, 60);
pub const BUTTON_DISABLED_BG: Color = Color::Rgb(50, 50, 60);

// --- Output streams ---
pub const OUTPUT_STDOUT: Color = Color::White;
pub const OUTPUT_STDERR: Color = Color::LightRed;
pub const OUTPUT_TIMESTAMP: Color = Color::DarkGray;

// --- Effects ---
pub const SHADOW: Color = Color::Black;
