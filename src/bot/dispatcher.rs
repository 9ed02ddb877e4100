//! Update dispatch.
//!
//! Builds the handler schema and runs decoded webhook updates through it.

use std::ops::ControlFlow;
use std::sync::Arc;

use teloxide::adaptors::Throttle;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::{debug, error};

use super::api::{SendOptions, WelcomeApi};
use crate::cache::PinStore;
use crate::events;

/// Bot type with Throttle adaptor for automatic rate limiting.
pub type ThrottledBot = Throttle<Bot>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Telegram backend used by the handlers.
    pub api: Arc<dyn WelcomeApi>,

    /// Pinned welcome per chat.
    pub pins: PinStore,

    /// How new welcomes are delivered.
    pub send_options: SendOptions,
}

impl AppState {
    /// Create a new application state.
    pub fn new(api: Arc<dyn WelcomeApi>, send_options: SendOptions) -> Self {
        Self {
            api,
            pins: PinStore::new(),
            send_options,
        }
    }
}

/// Build the handler schema.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    // Only member joins are wired; everything else falls through.
    let message_handler = Update::filter_message().branch(events::message_event_handler());

    dptree::entry().branch(message_handler)
}

/// Routes updates to handlers.
#[derive(Clone)]
pub struct UpdateDispatcher {
    state: AppState,
    schema: UpdateHandler<anyhow::Error>,
}

impl UpdateDispatcher {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            schema: schema(),
        }
    }

    /// Run one update through the schema. Handler errors are logged, never returned.
    pub async fn dispatch(&self, update: Update) {
        let update_id = update.id;
        let deps = dptree::deps![update, self.state.clone()];

        match self.schema.dispatch(deps).await {
            ControlFlow::Break(Ok(())) => {}
            ControlFlow::Break(Err(e)) => error!("Error handling update {:?}: {}", update_id, e),
            ControlFlow::Continue(_) => debug!("Update {:?} not handled", update_id),
        }
    }
}
