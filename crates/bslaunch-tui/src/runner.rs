//! Main TUI runner - entry point and event loop

use bslaunch_app::Engine;
use bslaunch_core::prelude::*;
use bslaunch_server::ServerEngine;

use crate::{event, render, terminal};

/// Run the control panel until the user quits.
///
/// The engine is shut down (stopping a running server) before the terminal
/// is restored, whatever the loop returned.
pub async fn run<E>(mut engine: Engine<E>) -> Result<()>
where
    E: ServerEngine + Send + Sync + 'static,
{
    terminal::install_panic_hook();
    let mut term = terminal::init()?;

    info!("Control panel started for launcher '{}'", engine.state.launcher.id());

    let result = run_loop(&mut term, &mut engine);

    if let Err(ref e) = result {
        error!("Event loop failed: {}", e);
    }

    engine.shutdown();
    terminal::restore();
    result
}

fn run_loop<E>(term: &mut ratatui::DefaultTerminal, engine: &mut Engine<E>) -> Result<()>
where
    E: ServerEngine + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Results of background work (server starts, output, license reads)
        engine.drain_pending_messages();

        term.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }
    Ok(())
}
