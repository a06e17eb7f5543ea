//! The host file-manager contract.
//!
//! pinmark does not render, traverse or read the keyboard. It plugs into a
//! host through five extension points, all owned by a [`Session`]:
//!
//! - [`CommandRegistry`] - named commands run over the current selection
//! - [`SortKeyRegistry`] - named sort keys for listings
//! - [`KeyMap`] - key sequences bound to chains of actions
//! - [`InitHooks`] - observers run once when the session initializes
//! - [`ColorPipeline`] - per-entry style tag contributors
//!
//! The session also owns the [`PinStore`], so every hook reaches pin state
//! through the session instead of through global state.

pub mod commands;
pub mod hooks;
pub mod keymap;
pub mod sort_keys;

pub use commands::{Command, CommandRegistry};
pub use hooks::{ColorHook, ColorPipeline, InitHook, InitHooks};
pub use keymap::{Binding, KeyAction, KeyMap};
pub use sort_keys::{NATURAL_SORT_KEY, SortKeyRegistry};

use crate::models::Entry;
use crate::sort::sort_entries_by;
use crate::storage::PinStore;
use crate::{Error, Result};
use serde::Serialize;
use tracing::{debug, error};

/// Severity of a host notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Error,
}

/// A message surfaced to the user through the host's status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Result of feeding one key to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The pending keys are a prefix of a binding; waiting for more
    Pending,
    /// A binding matched and its chain ran
    Handled,
    /// No binding starts with the pending keys; input was reset
    Unbound,
}

/// A host session with its registries and the pin store.
pub struct Session {
    store: PinStore,
    commands: CommandRegistry,
    sort_keys: SortKeyRegistry,
    keymap: KeyMap,
    init_hooks: InitHooks,
    color_pipeline: ColorPipeline,
    notifications: Vec<Notification>,
    pending_keys: String,
    initialized: bool,
}

impl Session {
    /// Create a session around an opened pin store.
    pub fn new(store: PinStore) -> Self {
        Self {
            store,
            commands: CommandRegistry::new(),
            sort_keys: SortKeyRegistry::new(),
            keymap: KeyMap::new(),
            init_hooks: InitHooks::new(),
            color_pipeline: ColorPipeline::new(),
            notifications: Vec::new(),
            pending_keys: String::new(),
            initialized: false,
        }
    }

    pub fn store(&self) -> &PinStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut PinStore {
        &mut self.store
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    pub fn sort_keys(&self) -> &SortKeyRegistry {
        &self.sort_keys
    }

    pub fn sort_keys_mut(&mut self) -> &mut SortKeyRegistry {
        &mut self.sort_keys
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn keymap_mut(&mut self) -> &mut KeyMap {
        &mut self.keymap
    }

    pub fn init_hooks_mut(&mut self) -> &mut InitHooks {
        &mut self.init_hooks
    }

    pub fn color_pipeline_mut(&mut self) -> &mut ColorPipeline {
        &mut self.color_pipeline
    }

    /// Run the init hooks. Later calls are no-ops.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        self.init_hooks.run(&mut self.keymap)?;
        self.initialized = true;
        debug!(bindings = self.keymap.len(), "Session initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run a registered command over `selection`.
    pub fn run_command(&mut self, name: &str, selection: &[Entry]) -> Result<()> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
        debug!(command = name, selected = selection.len(), "Running command");
        command.execute(&mut self.store, selection)
    }

    /// Run the chain bound to `keys`.
    ///
    /// A failing command is reported as an error notification, the rest of
    /// the chain is skipped and input is reset. Returns `false` if nothing
    /// is bound to `keys`.
    pub fn dispatch(&mut self, keys: &str, selection: &[Entry]) -> bool {
        let Some(binding) = self.keymap.get(keys).cloned() else {
            return false;
        };

        for action in binding.actions {
            match action {
                KeyAction::Run(name) => {
                    if let Err(err) = self.run_command(&name, selection) {
                        self.report_error(&name, &err);
                        self.reset_input();
                        return true;
                    }
                }
                KeyAction::Reset => self.reset_input(),
            }
        }
        true
    }

    /// Feed one key of input.
    pub fn press(&mut self, key: char, selection: &[Entry]) -> KeyOutcome {
        self.pending_keys.push(key);

        if self.keymap.get(&self.pending_keys).is_some() {
            let keys = std::mem::take(&mut self.pending_keys);
            self.dispatch(&keys, selection);
            return KeyOutcome::Handled;
        }

        if self.keymap.is_prefix(&self.pending_keys) {
            return KeyOutcome::Pending;
        }

        self.reset_input();
        KeyOutcome::Unbound
    }

    /// Keys typed so far that have not resolved to a binding.
    pub fn pending_keys(&self) -> &str {
        &self.pending_keys
    }

    /// Drop pending key input.
    pub fn reset_input(&mut self) {
        self.pending_keys.clear();
    }

    /// Sort a listing with a registered sort key.
    pub fn sort(&self, entries: &mut [Entry], key_name: &str) -> Result<()> {
        let key = self.sort_keys.get(key_name).ok_or_else(|| {
            let known: Vec<&str> = self.sort_keys.names().collect();
            Error::UnknownSortKey(format!("{} (known keys: {})", key_name, known.join(", ")))
        })?;
        sort_entries_by(entries, self.store.pins(), key);
        Ok(())
    }

    /// Style tags for an entry: the host's own tags plus every color hook's.
    pub fn style_tags(&self, entry: &Entry, mut tags: Vec<String>) -> Vec<String> {
        self.color_pipeline.apply(entry, &self.store, &mut tags);
        tags
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Take all pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn report_error(&mut self, command: &str, err: &Error) {
        error!(command, error = %err, "Command failed");
        self.notifications.push(Notification {
            level: NotificationLevel::Error,
            message: format!("{}: {}", command, err),
        });
    }
}
