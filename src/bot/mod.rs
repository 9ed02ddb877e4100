//! Bot module - Core bot functionality.

pub mod api;
pub mod dispatcher;
mod runtime;
pub mod webhook;

pub use dispatcher::{AppState, UpdateDispatcher};
pub use runtime::run;
