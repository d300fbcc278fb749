//! Header bar widget
//!
//! Title, launcher id, running indicator and key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use bslaunch_core::LauncherPhase;

use crate::theme::{palette, styles};

const SHORTCUTS: [(&str, &str); 5] = [
    ("^L", "Launch/Stop"),
    ("^R", "Reset"),
    ("^O", "Directory"),
    ("F1", "License"),
    ("^Q", "Quit"),
];

pub struct MainHeader<'a> {
    launcher_id: &'a str,
    phase: LauncherPhase,
}

impl<'a> MainHeader<'a> {
    pub fn new(launcher_id: &'a str, phase: LauncherPhase) -> Self {
        Self { launcher_id, phase }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (icon, label, phase_style) = styles::phase_indicator(self.phase);

        let mut left = vec![
            Span::raw(" "),
            Span::styled(icon, phase_style),
            Span::raw(" "),
            Span::styled(
                "Browsersync Launcher",
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
            Span::styled(self.launcher_id, styles::text_secondary()),
            Span::raw("  "),
            Span::styled(label, phase_style),
        ];
        let left_width = Line::from(left.clone()).width() as u16;

        let mut hints = Vec::new();
        for (i, (key, action)) in SHORTCUTS.iter().enumerate() {
            if i > 0 {
                hints.push(Span::raw("  "));
            }
            hints.push(Span::styled("[", styles::text_muted()));
            hints.push(Span::styled(*key, styles::keybinding()));
            hints.push(Span::styled(format!("] {}", action), styles::text_muted()));
        }
        let hints_width = Line::from(hints.clone()).width() as u16;

        // Hints are right-aligned and dropped when they do not fit
        if left_width + hints_width + 2 <= inner.width {
            let gap = inner.width - left_width - hints_width - 1;
            left.push(Span::raw(" ".repeat(gap as usize)));
            left.extend(hints);
        }

        Paragraph::new(Line::from(left)).render(inner, buf);
    }
}
