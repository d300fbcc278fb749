//! License overlay widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Widget, Wrap},
};

use bslaunch_app::license::LicenseViewer;

use super::modal_overlay::{centered_rect, dim_background, render_shadow};
use crate::theme::styles;

pub struct LicenseOverlay<'a> {
    viewer: &'a LicenseViewer,
}

impl<'a> LicenseOverlay<'a> {
    pub fn new(viewer: &'a LicenseViewer) -> Self {
        Self { viewer }
    }
}

impl Widget for LicenseOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        dim_background(buf, area);

        let modal = centered_rect(
            area.width.saturating_sub(8).min(100),
            area.height.saturating_sub(4),
            area,
        );
        Clear.render(modal, buf);
        render_shadow(buf, modal);

        let block = styles::modal_block(" License ").title_bottom(Line::from(vec![
            Span::styled(" Esc", styles::keybinding()),
            Span::styled(" close  ", styles::text_muted()),
            Span::styled("↑/↓", styles::keybinding()),
            Span::styled(" scroll ", styles::text_muted()),
        ]));
        let inner = block.inner(modal);
        block.render(modal, buf);

        let body = self.viewer.body();
        let paragraph = if body.is_empty() {
            Paragraph::new(Line::styled("Loading…", styles::text_muted()))
        } else {
            Paragraph::new(body)
                .style(styles::text_primary())
                .wrap(Wrap { trim: false })
                .scroll((self.viewer.scroll, 0))
        };
        paragraph.render(inner, buf);
    }
}
