//! Generated links widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use bslaunch_app::{LinkSlot, PanelView};

use crate::theme::styles;

pub struct LinksView<'a> {
    view: &'a PanelView,
}

impl<'a> LinksView<'a> {
    pub fn new(view: &'a PanelView) -> Self {
        Self { view }
    }
}

impl Widget for LinksView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Links ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let lines: Vec<Line> = LinkSlot::ALL
            .iter()
            .map(|slot| {
                let link = self.view.link(*slot);
                let text_style = if link.is_active() {
                    styles::link()
                } else {
                    styles::text_muted()
                };
                let mut spans = vec![
                    Span::styled(format!(" {:<10}", slot.label()), styles::text_secondary()),
                    Span::styled(link.text.as_str(), text_style),
                ];
                if link.target.is_some() {
                    spans.push(Span::styled(" ↗", styles::text_muted()));
                }
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
