//! In-memory state shared between webhook requests.
//!
//! Nothing here survives a restart.

mod pins;

pub use pins::PinStore;
