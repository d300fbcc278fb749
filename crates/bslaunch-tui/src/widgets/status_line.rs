//! Status line widget
//!
//! The latest status message, or a usage hint when there is none. The
//! server pid is shown on the right while running.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use bslaunch_app::state::{StatusLevel, StatusMessage};

use crate::theme::styles;

const HINT: &str = "Tab moves focus · Space toggles · paste or drop a folder to set the base directory";

pub struct StatusLine<'a> {
    status: Option<&'a StatusMessage>,
    pid: Option<u32>,
}

impl<'a> StatusLine<'a> {
    pub fn new(status: Option<&'a StatusMessage>) -> Self {
        Self { status, pid: None }
    }

    pub fn pid(mut self, pid: Option<u32>) -> Self {
        self.pid = pid;
        self
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut spans = match self.status {
            Some(status) => {
                let style = match status.level {
                    StatusLevel::Info => styles::text_primary(),
                    StatusLevel::Error => styles::error(),
                };
                vec![
                    Span::styled(
                        format!(" {} ", status.at.format("%H:%M:%S")),
                        styles::text_muted(),
                    ),
                    Span::styled(status.text.as_str(), style),
                ]
            }
            None => vec![Span::styled(format!(" {}", HINT), styles::text_muted())],
        };

        if let Some(pid) = self.pid {
            let right = format!("pid {} ", pid);
            let used = Line::from(spans.clone()).width() + right.len();
            if used < area.width as usize {
                spans.push(Span::raw(" ".repeat(area.width as usize - used)));
                spans.push(Span::styled(right, styles::text_secondary()));
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_state, TestTerminal};

    #[test]
    fn test_hint_without_status() {
        let mut term = TestTerminal::with_size(100, 1);
        let area = term.area();
        term.render_widget(StatusLine::new(None), area);
        assert!(term.buffer_contains("Tab moves focus"));
    }

    #[test]
    fn test_status_and_pid() {
        let mut state = test_state();
        state.report_error("port 8000 is already in use");

        let mut term = TestTerminal::with_size(100, 1);
        let area = term.area();
        term.render_widget(
            StatusLine::new(state.status.as_ref()).pid(Some(4242)),
            area,
        );
        assert!(term.buffer_contains("port 8000 is already in use"));
        assert!(term.buffer_contains("pid 4242"));
    }
}
