//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Rows of the form block: seven fields, a spacer and the button row, plus borders
pub const FORM_HEIGHT: u16 = 11;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title and key hints
    pub header: Rect,

    /// Form fields and buttons
    pub form: Rect,

    /// Generated links, right of the form
    pub links: Rect,

    /// Browsersync output
    pub output: Rect,

    /// Single status row at the bottom
    pub status: Rect,
}

/// Split the screen into header, panel, output and status line.
///
/// The panel puts the form and the links side by side; on narrow terminals
/// (under 90 columns) the links go below the form instead.
pub fn create(area: Rect) -> ScreenAreas {
    let wide = area.width >= 90;
    let panel_height = if wide { FORM_HEIGHT } else { FORM_HEIGHT + 5 };

    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(panel_height),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .split(area);

    let (form, links) = if wide {
        let cols = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);
        (cols[0], cols[1])
    } else {
        let stacked =
            Layout::vertical([Constraint::Length(FORM_HEIGHT), Constraint::Min(0)]).split(rows[1]);
        (stacked[0], stacked[1])
    };

    ScreenAreas {
        header: rows[0],
        form,
        links,
        output: rows[2],
        status: rows[3],
    }
}
