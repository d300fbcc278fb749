//! Message processing: runs the TEA update loop and dispatches actions

use std::sync::Arc;

use tokio::sync::mpsc;

use bslaunch_server::ServerEngine;

use crate::handler;
use crate::message::Message;
use crate::state::AppState;

use super::actions::handle_action;

/// Process a message through the TEA update function, following up
/// messages until the chain ends.
pub fn process_message<E>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    engine: &Arc<E>,
) where
    E: ServerEngine + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), Arc::clone(engine));
        }

        msg = result.message;
    }
}
