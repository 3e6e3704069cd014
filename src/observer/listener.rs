use std::cell::RefCell;

use tracing::info;

use super::editor::FileHandle;
use crate::error::ListenerError;

/// Something that wants to hear about events of type `event_type`.
///
/// Implementors take `&self`: the registry only holds shared, non-owning
/// references, so any state a listener keeps lives behind interior
/// mutability.
pub trait EventListener<P: ?Sized> {
    fn update(&self, event_type: &str, payload: &P) -> Result<(), ListenerError>;
}

// ============================================================================
// Email notifications
// ============================================================================

#[derive(Debug)]
pub struct EmailNotificationListener {
    email: String,
    outbox: RefCell<Vec<String>>,
}

impl EmailNotificationListener {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            outbox: RefCell::new(Vec::new()),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<String> {
        self.outbox.borrow().clone()
    }
}

impl EventListener<FileHandle> for EmailNotificationListener {
    fn update(&self, event_type: &str, file: &FileHandle) -> Result<(), ListenerError> {
        let message = format!(
            "Email to {}: Someone has performed {} operation with the file {}",
            self.email,
            event_type,
            file.name()
        );
        info!("{}", message);
        self.outbox.borrow_mut().push(message);
        Ok(())
    }
}

// ============================================================================
// Log journal
// ============================================================================

#[derive(Debug)]
pub struct LogOpenListener {
    log_path: String,
    journal: RefCell<Vec<String>>,
}

impl LogOpenListener {
    pub fn new(log_path: impl Into<String>) -> Self {
        Self {
            log_path: log_path.into(),
            journal: RefCell::new(Vec::new()),
        }
    }

    pub fn log_path(&self) -> &str {
        &self.log_path
    }

    pub fn entries(&self) -> Vec<String> {
        self.journal.borrow().clone()
    }
}

impl EventListener<FileHandle> for LogOpenListener {
    fn update(&self, event_type: &str, file: &FileHandle) -> Result<(), ListenerError> {
        let entry = format!(
            "Save to log {}: Someone has performed {} operation with the file {}",
            self.log_path,
            event_type,
            file.name()
        );
        info!("{}", entry);
        self.journal.borrow_mut().push(entry);
        Ok(())
    }
}

// ============================================================================
// Closure adapter
// ============================================================================

/// Turns a closure into a listener.
///
/// ```
/// use observer_pattern::{EventListener, FnListener};
///
/// let shout = FnListener::new(|event_type: &str, word: &str| {
///     println!("{event_type}: {}", word.to_uppercase());
///     Ok(())
/// });
/// shout.update("greet", "hello").unwrap();
/// ```
pub struct FnListener<F> {
    callback: F,
}

impl<F> FnListener<F> {
    pub fn new<P>(callback: F) -> Self
    where
        P: ?Sized,
        F: Fn(&str, &P) -> Result<(), ListenerError>,
    {
        Self { callback }
    }
}

impl<P, F> EventListener<P> for FnListener<F>
where
    P: ?Sized,
    F: Fn(&str, &P) -> Result<(), ListenerError>,
{
    fn update(&self, event_type: &str, payload: &P) -> Result<(), ListenerError> {
        (self.callback)(event_type, payload)
    }
}
