use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::registry::EventRegistry;
use crate::error::ListenerError;

/// Path of the file an editor works on.
///
/// Only a token handed to listeners; nothing here touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, or the whole path when there is none.
    pub fn name(&self) -> String {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => self.path.display().to_string(),
        }
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    Open,
    Save,
}

impl EditorEvent {
    pub const ALL: [EditorEvent; 2] = [EditorEvent::Open, EditorEvent::Save];

    pub fn as_str(self) -> &'static str {
        match self {
            EditorEvent::Open => "open",
            EditorEvent::Save => "save",
        }
    }
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publisher: tells its registry whenever a file is opened or saved.
#[derive(Debug)]
pub struct Editor {
    events: EventRegistry<FileHandle>,
    file: Option<FileHandle>,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_registry(EventRegistry::new(EditorEvent::ALL.map(EditorEvent::as_str)))
    }

    pub fn with_registry(events: EventRegistry<FileHandle>) -> Self {
        Self { events, file: None }
    }

    pub fn events(&self) -> &EventRegistry<FileHandle> {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventRegistry<FileHandle> {
        &mut self.events
    }

    pub fn current_file(&self) -> Option<&FileHandle> {
        self.file.as_ref()
    }

    /// Makes `path` the current file, then notifies `open` subscribers.
    ///
    /// The file stays current even when a listener fails.
    pub fn open_file(&mut self, path: impl Into<PathBuf>) -> Result<(), ListenerError> {
        let file = self.file.insert(FileHandle::new(path));
        debug!(file = %file, "file opened");
        self.events.notify(EditorEvent::Open.as_str(), file)
    }

    /// Notifies `save` subscribers about the current file; does nothing when
    /// no file is open.
    pub fn save_file(&self) -> Result<(), ListenerError> {
        match &self.file {
            Some(file) => self.events.notify(EditorEvent::Save.as_str(), file),
            None => {
                debug!("save skipped: no file open");
                Ok(())
            }
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::listener::{
        EmailNotificationListener, EventListener, FnListener, LogOpenListener,
    };
    use crate::observer::registry::{listener_ref, ListenerRef};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_file_handle_name() {
        assert_eq!(FileHandle::new("dir/sub/test.txt").name(), "test.txt");
        assert_eq!(FileHandle::new("test.txt").name(), "test.txt");
        assert_eq!(FileHandle::new("/").name(), "/");
    }

    #[test]
    fn test_new_editor_declares_open_and_save() {
        let editor = Editor::new();
        assert_eq!(editor.events().event_types(), vec!["open", "save"]);
        assert!(editor.current_file().is_none());
    }

    #[test]
    fn test_log_and_email_scenario() {
        let mut editor = Editor::new();
        let log = Rc::new(LogOpenListener::new("path/to/log/file.txt"));
        let email = Rc::new(EmailNotificationListener::new("test@test.com"));

        editor.events_mut().subscribe("open", listener_ref(&log));
        editor.events_mut().subscribe("open", listener_ref(&email));
        editor.events_mut().subscribe("save", listener_ref(&email));

        editor.open_file("test.txt").unwrap();
        editor.save_file().unwrap();

        assert_eq!(
            log.entries(),
            vec!["Save to log path/to/log/file.txt: Someone has performed open operation with the file test.txt"]
        );
        assert_eq!(
            email.sent(),
            vec![
                "Email to test@test.com: Someone has performed open operation with the file test.txt",
                "Email to test@test.com: Someone has performed save operation with the file test.txt",
            ]
        );
    }

    #[test]
    fn test_open_notifies_log_before_email() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let log_order = Rc::clone(&order);
        let email_order = Rc::clone(&order);
        let log: Rc<dyn EventListener<FileHandle>> =
            Rc::new(FnListener::new(move |event_type: &str, _: &FileHandle| {
                log_order.borrow_mut().push(format!("log:{event_type}"));
                Ok(())
            }));
        let email: Rc<dyn EventListener<FileHandle>> =
            Rc::new(FnListener::new(move |event_type: &str, _: &FileHandle| {
                email_order.borrow_mut().push(format!("email:{event_type}"));
                Ok(())
            }));

        let mut editor = Editor::new();
        editor.events_mut().subscribe("open", Rc::downgrade(&log));
        editor.events_mut().subscribe("open", Rc::downgrade(&email));
        editor.events_mut().subscribe("save", Rc::downgrade(&email));

        editor.open_file("test.txt").unwrap();
        assert_eq!(*order.borrow(), vec!["log:open", "email:open"]);

        order.borrow_mut().clear();
        editor.save_file().unwrap();
        assert_eq!(*order.borrow(), vec!["email:save"]);
    }

    #[test]
    fn test_unsubscribed_email_hears_nothing() {
        let mut editor = Editor::new();
        let email = Rc::new(EmailNotificationListener::new("test@test.com"));
        let handle: ListenerRef<FileHandle> = listener_ref(&email);

        editor.events_mut().subscribe("open", handle.clone());
        editor.events_mut().unsubscribe("open", &handle);
        editor.open_file("test.txt").unwrap();

        assert!(email.sent().is_empty());
    }

    #[test]
    fn test_save_without_open_is_noop() {
        let mut editor = Editor::new();
        let email = Rc::new(EmailNotificationListener::new("test@test.com"));
        editor.events_mut().subscribe("save", listener_ref(&email));

        editor.save_file().unwrap();

        assert!(email.sent().is_empty());
    }

    #[test]
    fn test_listener_error_reaches_editor_caller() {
        let failing: Rc<dyn EventListener<FileHandle>> =
            Rc::new(FnListener::new(|_: &str, file: &FileHandle| {
                Err(ListenerError::failed("audit", format!("cannot record {}", file.name())))
            }));

        let mut editor = Editor::new();
        editor.events_mut().subscribe("open", Rc::downgrade(&failing));

        let err = editor.open_file("secret.txt").unwrap_err();
        assert_eq!(err, ListenerError::failed("audit", "cannot record secret.txt"));
        assert_eq!(editor.current_file(), Some(&FileHandle::new("secret.txt")));
    }

    #[test]
    fn test_injected_registry_is_used() {
        let registry = EventRegistry::new(["open"]);
        let mut editor = Editor::with_registry(registry);
        let email = Rc::new(EmailNotificationListener::new("test@test.com"));
        editor.events_mut().subscribe("save", listener_ref(&email));

        editor.open_file("a.txt").unwrap();
        editor.save_file().unwrap();

        assert!(!editor.events().is_registered("save"));
        assert!(email.sent().is_empty());
    }
}
