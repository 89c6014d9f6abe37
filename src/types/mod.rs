//! Core types for relaybot.

pub mod completion;
pub mod message;

pub use completion::*;
pub use message::*;
