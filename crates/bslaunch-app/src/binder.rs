//! Reactive view state driven by lifecycle events
//!
//! Nothing in here decides anything: [`bind`] registers listeners that map
//! `Started` / `Stopped` onto the launch button, field enablement and the
//! generated links.

use bslaunch_core::LaunchConfig;

use crate::event_bus::EventBus;
use crate::launcher::LauncherContext;

pub const LAUNCH_LABEL: &str = "Launch Browsersync";
pub const STOP_LABEL: &str = "Stop Browsersync";
pub const LINK_INACTIVE_HREF: &str = "javascript:;";
pub const LINK_INACTIVE_TEXT: &str = "Not Available";
pub const LINK_TARGET_BLANK: &str = "_blank";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    /// Rendered with the destructive style
    pub negative: bool,
}

impl ButtonView {
    pub fn launch() -> Self {
        Self {
            label: LAUNCH_LABEL.to_string(),
            negative: false,
        }
    }

    pub fn stop() -> Self {
        Self {
            label: STOP_LABEL.to_string(),
            negative: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub href: String,
    pub target: Option<String>,
    pub text: String,
}

impl LinkView {
    pub fn inactive() -> Self {
        Self {
            href: LINK_INACTIVE_HREF.to_string(),
            target: None,
            text: LINK_INACTIVE_TEXT.to_string(),
        }
    }

    pub fn to(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            href: url.clone(),
            target: Some(LINK_TARGET_BLANK.to_string()),
            text: url,
        }
    }

    pub fn is_active(&self) -> bool {
        self.href != LINK_INACTIVE_HREF
    }
}

/// The three generated links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSlot {
    Local,
    External,
    Ui,
}

impl LinkSlot {
    pub const ALL: [LinkSlot; 3] = [LinkSlot::Local, LinkSlot::External, LinkSlot::Ui];

    pub fn label(&self) -> &'static str {
        match self {
            LinkSlot::Local => "Local",
            LinkSlot::External => "External",
            LinkSlot::Ui => "UI",
        }
    }

    /// URL for this slot, `None` for the UI link when the UI is disabled
    pub fn url_for(&self, config: &LaunchConfig) -> Option<String> {
        match self {
            LinkSlot::Local => Some(config.local_url()),
            LinkSlot::External => Some(config.external_url()),
            LinkSlot::Ui => config.ui_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub launch_button: ButtonView,
    pub local: LinkView,
    pub external: LinkView,
    pub ui: LinkView,
}

impl Default for PanelView {
    fn default() -> Self {
        Self {
            launch_button: ButtonView::launch(),
            local: LinkView::inactive(),
            external: LinkView::inactive(),
            ui: LinkView::inactive(),
        }
    }
}

impl PanelView {
    pub fn link(&self, slot: LinkSlot) -> &LinkView {
        match slot {
            LinkSlot::Local => &self.local,
            LinkSlot::External => &self.external,
            LinkSlot::Ui => &self.ui,
        }
    }

    pub fn link_mut(&mut self, slot: LinkSlot) -> &mut LinkView {
        match slot {
            LinkSlot::Local => &mut self.local,
            LinkSlot::External => &mut self.external,
            LinkSlot::Ui => &mut self.ui,
        }
    }
}

/// Register the view listeners.
///
/// Order: field enablement, one pair per link, then the launch button.
pub fn bind(bus: &mut EventBus<LauncherContext>) {
    bus.on_started(|ctx, _| ctx.form.set_enabled(false));
    bus.on_stopped(|ctx| ctx.form.set_enabled(true));

    for slot in LinkSlot::ALL {
        bus.on_started(move |ctx, config| {
            // The UI link keeps its previous state when the UI is off
            if let Some(url) = slot.url_for(config) {
                *ctx.view.link_mut(slot) = LinkView::to(url);
            }
        });
        bus.on_stopped(move |ctx| *ctx.view.link_mut(slot) = LinkView::inactive());
    }

    bus.on_started(|ctx, _| ctx.view.launch_button = ButtonView::stop());
    bus.on_stopped(|ctx| ctx.view.launch_button = ButtonView::launch());
}
