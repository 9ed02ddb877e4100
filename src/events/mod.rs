//! Event handler system.
//!
//! Add new event handlers by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_event;` below
//! 3. Adding the handler to `message_event_handler()`

pub mod welcome;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

/// Build the handler for chat service messages (member joins).
pub fn message_event_handler() -> UpdateHandler<anyhow::Error> {
    dptree::entry().branch(welcome::handler())
}
