//! Data carried through a welcome: who joined where, and what gets posted.

mod event;
mod message;

pub use event::{ChatRef, NewMemberEvent};
#[cfg(test)]
pub use event::NewMember;
pub use message::{Button, WelcomeMessage};
