//! Launcher form widget
//!
//! One row per field, then the launch and reset buttons. Empty text fields
//! show their placeholder (the default that applies) in muted text; every
//! field is greyed out while the server runs.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use bslaunch_app::state::Focus;
use bslaunch_app::{ButtonView, FieldId, FormState};

use crate::theme::styles;

/// Width of the label column
const LABEL_WIDTH: usize = 16;

pub const RESET_LABEL: &str = "Reset";

pub struct FormView<'a> {
    form: &'a FormState,
    launch_button: &'a ButtonView,
    focus: Focus,
}

impl<'a> FormView<'a> {
    pub fn new(form: &'a FormState, launch_button: &'a ButtonView, focus: Focus) -> Self {
        Self {
            form,
            launch_button,
            focus,
        }
    }

    fn field_line(&self, field: FieldId, width: u16) -> Line<'a> {
        let focused = self.focus == Focus::Field(field);
        let disabled = self.form.fields_disabled;

        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            styles::accent_bold()
        } else if disabled {
            styles::text_muted()
        } else {
            styles::text_secondary()
        };
        let mut spans = vec![
            Span::styled(marker, styles::accent_bold()),
            Span::styled(
                format!("{:<width$}", field.label(), width = LABEL_WIDTH),
                label_style,
            ),
        ];

        if let Some(checked) = self.form.checked(field) {
            let mark = if checked { "[x]" } else { "[ ]" };
            let style = if focused && !disabled {
                styles::focused_selected()
            } else if disabled {
                styles::text_muted()
            } else {
                styles::text_primary()
            };
            spans.push(Span::styled(mark, style));
            return Line::from(spans);
        }

        let value = self.form.text(field).unwrap_or_default();
        let input_width = (width as usize).saturating_sub(LABEL_WIDTH + 4).max(1);
        let style = styles::input(focused, disabled);

        let (shown, shown_style) = if value.is_empty() {
            let placeholder = self.form.placeholder(field).unwrap_or_default();
            (
                placeholder.to_string(),
                style
                    .fg(crate::theme::palette::TEXT_MUTED)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            (value.to_string(), style)
        };

        let mut text = tail(&shown, input_width.saturating_sub(1));
        if focused && !disabled && !value.is_empty() {
            text.push('▏');
        }
        spans.push(Span::styled(
            format!("{:<width$}", text, width = input_width),
            shown_style,
        ));
        Line::from(spans)
    }

    fn button_line(&self) -> Line<'a> {
        let launch_focused = self.focus == Focus::Launch;
        let reset_focused = self.focus == Focus::Reset;

        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!(" {} ", self.launch_button.label),
                styles::button(self.launch_button.negative, launch_focused, false),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", RESET_LABEL),
                styles::button(false, reset_focused, self.form.reset_disabled),
            ),
        ])
    }
}

/// Keep the end of `text` so the cursor side stays visible
fn tail(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        text.to_string()
    } else {
        text.chars().skip(count - max).collect()
    }
}

impl Widget for FormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = matches!(self.focus, Focus::Field(_));
        let block = styles::glass_block(focused).title(" Server ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut lines: Vec<Line> = FieldId::ALL
            .iter()
            .map(|field| self.field_line(*field, inner.width))
            .collect();
        lines.push(Line::default());
        lines.push(self.button_line());

        Paragraph::new(lines).render(inner, buf);
    }
}
