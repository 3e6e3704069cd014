// Editor configuration: which event types exist and who listens to them.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::observer::{
    listener_ref, Editor, EditorEvent, EmailNotificationListener, EventRegistry, FileHandle,
    ListenerRef, LogOpenListener,
};

// =============================================================================
// File format
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_event_types")]
    pub event_types: Vec<String>,
    #[serde(default)]
    pub listeners: Vec<ListenerConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListenerConfig {
    Email { address: String, events: Vec<String> },
    Log { path: PathBuf, events: Vec<String> },
}

fn default_event_types() -> Vec<String> {
    EditorEvent::ALL
        .iter()
        .map(|event| event.as_str().to_string())
        .collect()
}

impl ListenerConfig {
    pub fn events(&self) -> &[String] {
        match self {
            ListenerConfig::Email { events, .. } | ListenerConfig::Log { events, .. } => events,
        }
    }

    /// Short label used in error messages, e.g. `email:ops@example.com`.
    pub fn label(&self) -> String {
        match self {
            ListenerConfig::Email { address, .. } => format!("email:{address}"),
            ListenerConfig::Log { path, .. } => format!("log:{}", path.display()),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            event_types: default_event_types(),
            listeners: vec![
                ListenerConfig::Log {
                    path: PathBuf::from("path/to/log/file.txt"),
                    events: vec!["open".to_string()],
                },
                ListenerConfig::Email {
                    address: "test@test.com".to_string(),
                    events: vec!["open".to_string(), "save".to_string()],
                },
            ],
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded editor config");
        Self::from_toml_str(&content)
    }

    /// Rejects listeners that name an event type missing from `event_types`.
    ///
    /// The registry itself would silently ignore such subscriptions; a
    /// config that asks for one is almost certainly a typo.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.event_types.is_empty() {
            return Err(ConfigError::EmptyVocabulary);
        }

        for listener in &self.listeners {
            if let ListenerConfig::Email { address, .. } = listener {
                if !is_plausible_email(address) {
                    return Err(ConfigError::InvalidEmail(address.clone()));
                }
            }
            if let Some(unknown) = listener
                .events()
                .iter()
                .find(|event| !self.event_types.contains(*event))
            {
                return Err(ConfigError::unknown_event_type(listener.label(), unknown.as_str()));
            }
        }
        Ok(())
    }

    pub fn build_registry(&self) -> EventRegistry<FileHandle> {
        EventRegistry::new(self.event_types.iter().cloned())
    }

    /// Builds an editor plus the listeners it was told about.
    ///
    /// The registry only keeps weak references, so the returned
    /// [`Subscribers`] must stay alive for as long as notifications are wanted.
    pub fn build_editor(&self) -> Result<(Editor, Subscribers), ConfigError> {
        self.validate()?;
        let mut editor = Editor::with_registry(self.build_registry());
        let subscribers = Subscribers::from_config(self);
        subscribers.attach(editor.events_mut());
        Ok((editor, subscribers))
    }
}

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("invalid email pattern");
}

fn is_plausible_email(address: &str) -> bool {
    EMAIL_PATTERN.is_match(address)
}

// =============================================================================
// Listener ownership
// =============================================================================

/// A listener built from config, kept alive on the registry's behalf.
#[derive(Debug, Clone)]
pub enum Subscriber {
    Email(Rc<EmailNotificationListener>),
    Log(Rc<LogOpenListener>),
}

impl Subscriber {
    fn handle(&self) -> ListenerRef<FileHandle> {
        match self {
            Subscriber::Email(listener) => listener_ref(listener),
            Subscriber::Log(listener) => listener_ref(listener),
        }
    }

    /// Drops one subscription of this listener to `event_type`.
    pub fn detach(&self, registry: &mut EventRegistry<FileHandle>, event_type: &str) {
        registry.unsubscribe(event_type, &self.handle());
    }
}

/// Owns the listeners described by a config, each with the event types it
/// subscribes to, in config order.
#[derive(Debug, Default)]
pub struct Subscribers {
    entries: Vec<(Subscriber, Vec<String>)>,
}

impl Subscribers {
    pub fn from_config(config: &EditorConfig) -> Self {
        let entries = config
            .listeners
            .iter()
            .map(|listener| {
                let subscriber = match listener {
                    ListenerConfig::Email { address, .. } => {
                        Subscriber::Email(Rc::new(EmailNotificationListener::new(address.as_str())))
                    }
                    ListenerConfig::Log { path, .. } => Subscriber::Log(Rc::new(
                        LogOpenListener::new(path.display().to_string()),
                    )),
                };
                (subscriber, listener.events().to_vec())
            })
            .collect();
        Self { entries }
    }

    pub fn attach(&self, registry: &mut EventRegistry<FileHandle>) {
        for (subscriber, events) in &self.entries {
            let handle = subscriber.handle();
            for event_type in events {
                registry.subscribe(event_type, handle.clone());
            }
        }
    }

    /// Detaches each email listener from `event_type` once, so listeners
    /// sharing an address are each detached exactly once.
    pub fn detach_emails(&self, registry: &mut EventRegistry<FileHandle>, event_type: &str) {
        for (subscriber, _) in &self.entries {
            if let Subscriber::Email(_) = subscriber {
                subscriber.detach(registry, event_type);
            }
        }
    }

    pub fn emails(&self) -> impl Iterator<Item = &Rc<EmailNotificationListener>> {
        self.entries.iter().filter_map(|(subscriber, _)| match subscriber {
            Subscriber::Email(listener) => Some(listener),
            Subscriber::Log(_) => None,
        })
    }

    pub fn logs(&self) -> impl Iterator<Item = &Rc<LogOpenListener>> {
        self.entries.iter().filter_map(|(subscriber, _)| match subscriber {
            Subscriber::Log(listener) => Some(listener),
            Subscriber::Email(_) => None,
        })
    }
}
