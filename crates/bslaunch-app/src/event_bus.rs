//! Ordered, synchronous listener registry for launcher events
//!
//! Listeners receive a mutable context and the event. `emit` runs every
//! listener registered for the event's kind, in registration order, before
//! returning.

use std::path::Path;

use bslaunch_core::{LaunchConfig, LauncherEvent};

/// Discriminant of [`LauncherEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Started,
    Stopped,
    BaseDirSelected,
    DialogCancelled,
}

impl From<&LauncherEvent> for EventKind {
    fn from(event: &LauncherEvent) -> Self {
        match event {
            LauncherEvent::Started { .. } => EventKind::Started,
            LauncherEvent::Stopped => EventKind::Stopped,
            LauncherEvent::BaseDirSelected { .. } => EventKind::BaseDirSelected,
            LauncherEvent::DialogCancelled => EventKind::DialogCancelled,
        }
    }
}

pub type Listener<C> = Box<dyn Fn(&mut C, &LauncherEvent) + Send>;

pub struct EventBus<C> {
    listeners: Vec<(EventKind, Listener<C>)>,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: Fn(&mut C, &LauncherEvent) + Send + 'static,
    {
        self.listeners.push((kind, Box::new(listener)));
    }

    pub fn on_started<F>(&mut self, listener: F)
    where
        F: Fn(&mut C, &LaunchConfig) + Send + 'static,
    {
        self.on(EventKind::Started, move |ctx, event| {
            if let LauncherEvent::Started { config } = event {
                listener(ctx, config);
            }
        });
    }

    pub fn on_stopped<F>(&mut self, listener: F)
    where
        F: Fn(&mut C) + Send + 'static,
    {
        self.on(EventKind::Stopped, move |ctx, _| listener(ctx));
    }

    pub fn on_base_dir_selected<F>(&mut self, listener: F)
    where
        F: Fn(&mut C, &Path) + Send + 'static,
    {
        self.on(EventKind::BaseDirSelected, move |ctx, event| {
            if let LauncherEvent::BaseDirSelected { path } = event {
                listener(ctx, path);
            }
        });
    }

    /// Run the listeners for `event`. Returns how many ran.
    pub fn emit(&self, ctx: &mut C, event: &LauncherEvent) -> usize {
        let kind = EventKind::from(event);
        let mut count = 0;
        for (_, listener) in self.listeners.iter().filter(|(k, _)| *k == kind) {
            listener(ctx, event);
            count += 1;
        }
        tracing::trace!("{} dispatched to {} listener(s)", event.event_type(), count);
        count
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.iter().filter(|(k, _)| *k == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut bus: EventBus<Vec<&'static str>> = EventBus::new();
        bus.on_stopped(|log| log.push("first"));
        bus.on(EventKind::Stopped, |log, _| log.push("second"));
        bus.on_stopped(|log| log.push("third"));

        let mut log = Vec::new();
        assert_eq!(bus.emit(&mut log, &LauncherEvent::Stopped), 3);
        assert_eq!(log, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_only_matching_kind_runs() {
        let mut bus: EventBus<Vec<String>> = EventBus::new();
        bus.on_stopped(|log| log.push("stopped".into()));
        bus.on_base_dir_selected(|log, path| log.push(path.display().to_string()));

        let mut log = Vec::new();
        bus.emit(
            &mut log,
            &LauncherEvent::BaseDirSelected {
                path: PathBuf::from("/srv/site"),
            },
        );
        assert_eq!(log, vec!["/srv/site".to_string()]);
        assert_eq!(bus.emit(&mut log, &LauncherEvent::DialogCancelled), 0);
    }

    #[test]
    fn test_listener_count() {
        let mut bus: EventBus<()> = EventBus::new();
        bus.on_stopped(|_| {});
        bus.on_stopped(|_| {});
        bus.on_started(|_, _| {});
        assert_eq!(bus.listener_count(EventKind::Stopped), 2);
        assert_eq!(bus.listener_count(EventKind::Started), 1);
        assert_eq!(bus.listener_count(EventKind::DialogCancelled), 0);
    }
}
