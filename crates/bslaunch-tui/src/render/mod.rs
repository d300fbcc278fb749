//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use bslaunch_app::AppState;

use crate::theme::palette;
use crate::{layout, widgets};

/// Render the complete UI. Pure: reads state, never modifies it.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);
    let launcher = &state.launcher;

    frame.render_widget(
        widgets::MainHeader::new(launcher.id(), launcher.phase()),
        areas.header,
    );
    frame.render_widget(
        widgets::FormView::new(launcher.form(), &launcher.view().launch_button, state.focus),
        areas.form,
    );
    frame.render_widget(widgets::LinksView::new(launcher.view()), areas.links);
    frame.render_widget(widgets::OutputView::new(&state.output), areas.output);

    let pid = launcher.session().handle().and_then(|handle| handle.pid());
    frame.render_widget(
        widgets::StatusLine::new(state.status.as_ref()).pid(pid),
        areas.status,
    );

    // Overlays, lowest first
    if launcher.selector().overlay_active() {
        frame.render_widget(widgets::DropOverlay, areas.form);
    }
    if let Some(prompt) = &state.prompt {
        frame.render_widget(widgets::DirectoryPromptView::new(prompt), area);
    }
    if state.license.is_open() {
        frame.render_widget(widgets::LicenseOverlay::new(&state.license), area);
    }
}
