//! Conversation session state.
//!
//! A `Session` owns the running transcript and the generation parameters.
//! Completion and edit sessions keep flat text; chat sessions keep a list
//! of role-tagged messages. The representation is chosen by the `Mode`
//! at construction and never changes afterwards.

mod manager;
mod types;


pub use manager::Session;
pub use types::Mode;
