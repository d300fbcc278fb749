//! Launcher instance: the running/stopped state machine
//!
//! A [`LauncherInstance`] owns one server session, one config store record
//! (keyed by its id) and the view state its listeners maintain. Instances
//! share nothing, so several may coexist under distinct ids.
//!
//! The instance is synchronous. Starting a server is the one async step: the
//! caller receives [`LaunchDecision::Start`], runs the engine, and reports
//! back through [`LauncherInstance::start_completed`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use bslaunch_core::prelude::*;
use bslaunch_core::{LaunchConfig, LauncherEvent, LauncherPhase};
use bslaunch_server::ServerHandle;

use crate::binder::{self, PanelView};
use crate::builder::{build, Defaults};
use crate::config::{ConfigStore, PersistedConfig};
use crate::directory::{DirectorySelector, DroppedEntry};
use crate::event_bus::EventBus;
use crate::form::{FormState, Placeholders};
use crate::session::{AttachRejected, ServerId, ServerSession};

/// A UI element the front-end provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    BaseDirField,
    LaunchButton,
    ResetButton,
    Droppable,
    Overlay,
    LicenseInfo,
    LicenseLink,
    LicenseClose,
    LicenseBody,
}

impl Binding {
    pub const ALL: [Binding; 9] = [
        Binding::BaseDirField,
        Binding::LaunchButton,
        Binding::ResetButton,
        Binding::Droppable,
        Binding::Overlay,
        Binding::LicenseInfo,
        Binding::LicenseLink,
        Binding::LicenseClose,
        Binding::LicenseBody,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Binding::BaseDirField => "base_dir_field",
            Binding::LaunchButton => "launch_button",
            Binding::ResetButton => "reset_button",
            Binding::Droppable => "droppable",
            Binding::Overlay => "overlay",
            Binding::LicenseInfo => "license_info",
            Binding::LicenseLink => "license_info_link",
            Binding::LicenseClose => "license_info_close",
            Binding::LicenseBody => "license_info_body",
        }
    }
}

/// The set of UI elements a front-end provides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiBindings {
    present: HashSet<Binding>,
}

impl UiBindings {
    pub fn all() -> Self {
        Self {
            present: Binding::ALL.into_iter().collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn with(mut self, binding: Binding) -> Self {
        self.present.insert(binding);
        self
    }

    pub fn without(mut self, binding: Binding) -> Self {
        self.present.remove(&binding);
        self
    }

    pub fn contains(&self, binding: Binding) -> bool {
        self.present.contains(&binding)
    }

    /// Fail with [`Error::MissingBinding`] naming every required element
    /// when any of them is absent.
    pub fn require(&self, routine: &'static str, required: &[Binding]) -> Result<()> {
        if required.iter().all(|b| self.contains(*b)) {
            return Ok(());
        }

        let names: Vec<String> = required
            .iter()
            .map(|b| format!("\"{}\"", b.name()))
            .collect();
        let bindings = match names.split_last() {
            Some((last, rest)) if !rest.is_empty() => {
                format!("{} and {}", rest.join(" "), last)
            }
            _ => names.join(""),
        };
        Err(Error::missing_binding(routine, bindings))
    }
}

/// State the event listeners operate on
pub struct LauncherContext {
    id: String,
    pub form: FormState,
    pub view: PanelView,
    store: Box<dyn ConfigStore>,
}

impl LauncherContext {
    pub fn new(id: impl Into<String>, form: FormState, store: Box<dyn ConfigStore>) -> Self {
        Self {
            id: id.into(),
            form,
            view: PanelView::default(),
            store,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Pre-fill the form from the stored record, if there is one
    fn restore(&mut self) {
        match self.store.load(&self.id) {
            Ok(Some(record)) => {
                debug!("Restoring launch record for '{}'", self.id);
                self.form.restore(&record);
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to restore launch record for '{}': {}", self.id, e),
        }
    }

    fn persist(&mut self, config: &LaunchConfig) {
        let record = PersistedConfig::from(config);
        if let Err(e) = self.store.save(&self.id, &record) {
            warn!("Failed to save launch record for '{}': {}", self.id, e);
        }
    }
}

/// What a launch click turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchDecision {
    /// Start a server for `config`; report back with `server_id`
    Start {
        server_id: ServerId,
        config: LaunchConfig,
    },
    /// The running server was stopped
    Stopped,
}

pub struct LauncherInstance {
    ctx: LauncherContext,
    bus: EventBus<LauncherContext>,
    session: ServerSession,
    selector: DirectorySelector,
    defaults: Defaults,
    emitted: Vec<LauncherEvent>,
}

impl LauncherInstance {
    /// Build a launcher, restore its last record and wire its listeners.
    ///
    /// Fails only when `bindings` lacks an element an enable routine needs.
    pub fn new(
        id: impl Into<String>,
        store: Box<dyn ConfigStore>,
        defaults: Defaults,
        bindings: &UiBindings,
    ) -> Result<Self> {
        let form = FormState::new(Placeholders::from(&defaults));
        let mut ctx = LauncherContext::new(id, form, store);
        ctx.restore();

        let mut bus = EventBus::new();
        bus.on_started(|ctx: &mut LauncherContext, config| ctx.persist(config));
        binder::bind(&mut bus);

        let mut instance = Self {
            ctx,
            bus,
            session: ServerSession::new(),
            selector: DirectorySelector::new(),
            defaults,
            emitted: Vec::new(),
        };

        instance
            .enable_reset_button(bindings)?
            .enable_launch_button(bindings)?
            .enable_select_base_dir(bindings)?
            .enable_drag_drop_base_dir(bindings)?
            .enable_license_info(bindings)?;

        info!("Launcher '{}' ready", instance.id());
        Ok(instance)
    }

    fn enable_reset_button(&mut self, bindings: &UiBindings) -> Result<&mut Self> {
        bindings.require("enable_reset_button", &[Binding::ResetButton])?;
        Ok(self)
    }

    fn enable_launch_button(&mut self, bindings: &UiBindings) -> Result<&mut Self> {
        bindings.require("enable_launch_button", &[Binding::LaunchButton])?;
        Ok(self)
    }

    fn enable_select_base_dir(&mut self, bindings: &UiBindings) -> Result<&mut Self> {
        bindings.require("enable_select_base_dir", &[Binding::BaseDirField])?;
        self.bus.on_base_dir_selected(|ctx, path| {
            ctx.form.base_dir = path.to_string_lossy().into_owned();
        });
        Ok(self)
    }

    fn enable_drag_drop_base_dir(&mut self, bindings: &UiBindings) -> Result<&mut Self> {
        bindings.require(
            "enable_drag_drop_base_dir",
            &[Binding::Droppable, Binding::Overlay],
        )?;
        Ok(self)
    }

    fn enable_license_info(&mut self, bindings: &UiBindings) -> Result<&mut Self> {
        bindings.require(
            "enable_license_info",
            &[
                Binding::LicenseInfo,
                Binding::LicenseLink,
                Binding::LicenseClose,
                Binding::LicenseBody,
            ],
        )?;
        Ok(self)
    }

    fn emit(&mut self, event: LauncherEvent) {
        self.bus.emit(&mut self.ctx, &event);
        self.emitted.push(event);
    }

    /// Events emitted since the last call, in order
    pub fn take_emitted(&mut self) -> Vec<LauncherEvent> {
        std::mem::take(&mut self.emitted)
    }

    pub fn id(&self) -> &str {
        self.ctx.id()
    }

    pub fn form(&self) -> &FormState {
        &self.ctx.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.ctx.form
    }

    pub fn view(&self) -> &PanelView {
        &self.ctx.view
    }

    pub fn session(&self) -> &ServerSession {
        &self.session
    }

    pub fn selector(&self) -> &DirectorySelector {
        &self.selector
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    pub fn phase(&self) -> LauncherPhase {
        if self.is_active() {
            LauncherPhase::Running
        } else {
            LauncherPhase::Stopped
        }
    }

    /// Toggle: stop when running, otherwise build a config to start
    pub fn launch_clicked(&mut self) -> LaunchDecision {
        if self.session.is_active() {
            self.session.stop();
            self.emit(LauncherEvent::Stopped);
            return LaunchDecision::Stopped;
        }

        let config = build(&self.ctx.form.raw(), &self.defaults);
        let server_id = self.session.next_request();
        debug!("Start request {} for {:?}", server_id, config.base_dir());
        LaunchDecision::Start { server_id, config }
    }

    /// The engine reported a successful start
    pub fn start_completed(
        &mut self,
        server_id: ServerId,
        config: LaunchConfig,
        handle: ServerHandle,
    ) -> std::result::Result<(), AttachRejected> {
        self.session.attach(server_id, config.clone(), handle)?;
        self.emit(LauncherEvent::Started { config });
        Ok(())
    }

    /// A server exited on its own. Emits `Stopped` if it was the active one.
    pub fn server_exited(&mut self, server_id: ServerId) -> bool {
        if self.session.exited(server_id) {
            self.emit(LauncherEvent::Stopped);
            true
        } else {
            false
        }
    }

    /// Clear the stored record. Ignored while the reset button is disabled.
    pub fn reset_clicked(&mut self) -> Result<bool> {
        if self.ctx.form.reset_disabled {
            return Ok(false);
        }
        let id = self.ctx.id.clone();
        self.ctx.store.clear(&id)?;
        info!("Cleared launch record for '{}'", id);
        Ok(true)
    }

    /// Returns `true` when the host should open a directory dialog
    pub fn request_dialog(&mut self) -> bool {
        self.selector.request_dialog(self.session.is_active())
    }

    pub fn dialog_selected(&mut self, path: &Path) -> Option<PathBuf> {
        let path = self.selector.dialog_selected(path, self.session.is_active())?;
        self.emit(LauncherEvent::BaseDirSelected { path: path.clone() });
        Some(path)
    }

    pub fn dialog_cancelled(&mut self) {
        self.selector.dialog_cancelled();
        self.emit(LauncherEvent::DialogCancelled);
    }

    pub fn drag_enter(&mut self) {
        self.selector.drag_enter(self.session.is_active());
    }

    pub fn drag_leave(&mut self) {
        self.selector.drag_leave(self.session.is_active());
    }

    pub fn drop_entries(&mut self, entries: &[DroppedEntry]) -> Option<PathBuf> {
        let path = self
            .selector
            .drop_entries(entries, self.session.is_active())?;
        self.emit(LauncherEvent::BaseDirSelected { path: path.clone() });
        Some(path)
    }

    /// Stop the server on teardown
    pub fn shutdown(&mut self) {
        if self.session.stop() {
            self.emit(LauncherEvent::Stopped);
        }
    }
}
