//! Event subscription and notification.
//!
//! The [`Editor`] publishes through an [`EventRegistry`], which keeps
//! non-owning references to the [`EventListener`]s its clients own.

pub mod editor;
pub mod listener;
pub mod registry;

pub use editor::{Editor, EditorEvent, FileHandle};
pub use listener::{EmailNotificationListener, EventListener, FnListener, LogOpenListener};
pub use registry::{listener_ref, EventRegistry, ListenerRef};
