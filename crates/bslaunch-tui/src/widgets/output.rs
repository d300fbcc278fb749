//! Browsersync output widget
//!
//! Shows the newest lines that fit, oldest at the top.

use std::collections::VecDeque;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use bslaunch_app::state::OutputLine;
use bslaunch_core::OutputStream;

use crate::theme::{palette, styles};

pub struct OutputView<'a> {
    lines: &'a VecDeque<OutputLine>,
}

impl<'a> OutputView<'a> {
    pub fn new(lines: &'a VecDeque<OutputLine>) -> Self {
        Self { lines }
    }
}

fn format_line(line: &OutputLine) -> Line<'_> {
    let color = match line.stream {
        OutputStream::Stdout => palette::OUTPUT_STDOUT,
        OutputStream::Stderr => palette::OUTPUT_STDERR,
    };
    Line::from(vec![
        Span::styled(
            line.at.format("%H:%M:%S ").to_string(),
            Style::default().fg(palette::OUTPUT_TIMESTAMP),
        ),
        Span::styled(line.text.as_str(), Style::default().fg(color)),
    ])
}

impl Widget for OutputView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Output ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.lines.is_empty() {
            Paragraph::new(Line::styled(" No server output yet", styles::text_muted()))
                .render(inner, buf);
            return;
        }

        let visible = inner.height as usize;
        let skip = self.lines.len().saturating_sub(visible);
        let lines: Vec<Line> = self.lines.iter().skip(skip).map(format_line).collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
