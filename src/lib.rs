//! # Observer Pattern
//!
//! An editor announces what happens to its file through an event registry,
//! and independently owned listeners react to it.
//!
//! ## Pieces
//!
//! 1. **EventRegistry** - event type -> ordered listener list
//! 2. **EventListener** - the one-method capability every listener implements
//! 3. **Editor** - the publisher, notifies on `open` and `save`
//! 4. **EditorConfig** - TOML description of the vocabulary and listeners
//!
//! ## Running the demo
//!
//! ```bash
//! cargo run --bin complete_observer_editor
//! cargo run --bin complete_observer_editor -- config/editor.toml
//! RUST_LOG=debug cargo run --bin complete_observer_editor
//! ```
//!
//! ## Key Dependencies
//!
//! - `thiserror` - listener and config error types
//! - `serde` / `toml` - config file parsing
//! - `tracing` - diagnostics from the registry and listeners
//! - `colored` - demo output

pub mod config;
pub mod error;
pub mod observer;

pub use config::{EditorConfig, ListenerConfig, Subscriber, Subscribers};
pub use error::{ConfigError, ListenerError};
pub use observer::{
    EditorEvent, EmailNotificationListener, Editor, EventListener, EventRegistry, FileHandle,
    FnListener, ListenerRef, LogOpenListener, listener_ref,
};
