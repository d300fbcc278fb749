//! Semantic style builders

use bslaunch_core::LauncherPhase;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

pub fn link() -> Style {
    Style::default()
        .fg(palette::STATUS_BLUE)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn error() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

/// "Black on Cyan" - focused element
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Text input background, brighter when focused
pub fn input(focused: bool, disabled: bool) -> Style {
    if disabled {
        Style::default().fg(palette::TEXT_MUTED).bg(palette::INPUT_BG)
    } else if focused {
        Style::default()
            .fg(palette::TEXT_PRIMARY)
            .bg(palette::INPUT_FOCUSED_BG)
    } else {
        Style::default()
            .fg(palette::TEXT_SECONDARY)
            .bg(palette::INPUT_BG)
    }
}

/// Button style; `negative` selects the destructive color
pub fn button(negative: bool, focused: bool, disabled: bool) -> Style {
    let bg = if disabled {
        palette::BUTTON_DISABLED_BG
    } else if negative {
        palette::BUTTON_NEGATIVE_BG
    } else {
        palette::BUTTON_PRIMARY_BG
    };
    let style = Style::default().fg(palette::TEXT_PRIMARY).bg(bg);
    if focused && !disabled {
        style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        style
    }
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

pub fn modal_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_active())
        .style(Style::default().bg(palette::POPUP_BG))
}

/// Returns `(icon, label, Style)` for the launcher phase
pub fn phase_indicator(phase: LauncherPhase) -> (&'static str, &'static str, Style) {
    match phase {
        LauncherPhase::Running => (
            "●",
            "Running",
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        LauncherPhase::Stopped => ("○", "Stopped", Style::default().fg(palette::TEXT_MUTED)),
    }
}
