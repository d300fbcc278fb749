//! Directory dialog and drop overlay
//!
//! The terminal stands in for the native directory chooser: a modal with a
//! path input. Enter selects, Esc cancels.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget},
};

use bslaunch_app::state::DirectoryPrompt;

use super::modal_overlay::{centered_rect, dim_background, render_shadow};
use crate::theme::styles;

pub struct DirectoryPromptView<'a> {
    prompt: &'a DirectoryPrompt,
}

impl<'a> DirectoryPromptView<'a> {
    pub fn new(prompt: &'a DirectoryPrompt) -> Self {
        Self { prompt }
    }
}

impl Widget for DirectoryPromptView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        dim_background(buf, area);

        let modal = centered_rect(area.width.saturating_sub(10).min(90), 7, area);
        Clear.render(modal, buf);
        render_shadow(buf, modal);

        let block = styles::modal_block(" Select base directory ");
        let inner = block.inner(modal);
        block.render(modal, buf);

        let input_width = inner.width.saturating_sub(2) as usize;
        let chars = self.prompt.input.chars().count();
        let visible: String = self
            .prompt
            .input
            .chars()
            .skip(chars.saturating_sub(input_width.saturating_sub(1)))
            .collect();

        let mut lines = vec![
            Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    format!("{:<width$}", format!("{}▏", visible), width = input_width),
                    styles::input(true, false),
                ),
            ]),
            Line::default(),
        ];

        match &self.prompt.error {
            Some(error) => lines.push(Line::styled(format!(" {}", error), styles::error())),
            None => lines.push(Line::from(vec![
                Span::styled(" Enter", styles::keybinding()),
                Span::styled(" select  ", styles::text_muted()),
                Span::styled("Esc", styles::keybinding()),
                Span::styled(" cancel  ", styles::text_muted()),
                Span::styled("~", styles::keybinding()),
                Span::styled(" expands to home", styles::text_muted()),
            ])),
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Shown over the form while something is dragged over the panel
pub struct DropOverlay;

impl Widget for DropOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = centered_rect(40, 5, area);
        Clear.render(modal, buf);

        let block = styles::modal_block(" Drop ");
        let inner = block.inner(modal);
        block.render(modal, buf);

        Paragraph::new(Line::styled(
            " Drop a directory to serve it",
            styles::accent_bold(),
        ))
        .render(inner, buf);
    }
}
