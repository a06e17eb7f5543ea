//! The pin plugin.
//!
//! Installs into a host [`Session`]:
//! - commands `pin` and `unpin` over the current selection
//! - sort key `pin` (pinned entries first, natural order otherwise)
//! - an init hook binding `++` and `--` to "run command, then reset"
//! - a color hook adding the `pin` tag to pinned entries

use crate::Result;
use crate::host::{Binding, ColorHook, Command, InitHook, KeyMap, Session};
use crate::models::Entry;
use crate::sort::pin_sort_key;
use crate::storage::PinStore;
use serde::Serialize;

pub const PIN_COMMAND: &str = "pin";
pub const UNPIN_COMMAND: &str = "unpin";
pub const PIN_SORT_KEY: &str = "pin";
pub const DEFAULT_TAG: &str = "pin";
pub const DEFAULT_PIN_KEYS: &str = "++";
pub const DEFAULT_UNPIN_KEYS: &str = "--";

/// User-adjustable plugin settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginSettings {
    /// Style tag added to pinned entries
    pub tag: String,
    /// Key sequence bound to `pin`
    pub pin_keys: String,
    /// Key sequence bound to `unpin`
    pub unpin_keys: String,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
            pin_keys: DEFAULT_PIN_KEYS.to_string(),
            unpin_keys: DEFAULT_UNPIN_KEYS.to_string(),
        }
    }
}

/// The pin plugin.
#[derive(Debug, Clone, Default)]
pub struct PinPlugin {
    settings: PluginSettings,
}

impl PinPlugin {
    pub fn new(settings: PluginSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    /// Key bindings the plugin contributes.
    pub fn bindings(&self) -> Vec<Binding> {
        vec![
            Binding::run_then_reset(self.settings.pin_keys.clone(), PIN_COMMAND),
            Binding::run_then_reset(self.settings.unpin_keys.clone(), UNPIN_COMMAND),
        ]
    }

    /// Register everything with the session.
    ///
    /// Only appends to the session's hook lists; hooks registered before
    /// keep running.
    pub fn install(&self, session: &mut Session) {
        session
            .commands_mut()
            .register(PIN_COMMAND, Box::new(PinCommand));
        session
            .commands_mut()
            .register(UNPIN_COMMAND, Box::new(UnpinCommand));
        session
            .sort_keys_mut()
            .register(PIN_SORT_KEY, pin_sort_key);
        session.init_hooks_mut().register(Box::new(BindKeys {
            bindings: self.bindings(),
        }));
        session.color_pipeline_mut().register(Box::new(PinTag {
            tag: self.settings.tag.clone(),
        }));
    }
}

struct PinCommand;

impl Command for PinCommand {
    fn execute(&self, store: &mut PinStore, selection: &[Entry]) -> Result<()> {
        store.pin(selection.iter().map(Entry::path))?;
        Ok(())
    }
}

struct UnpinCommand;

impl Command for UnpinCommand {
    fn execute(&self, store: &mut PinStore, selection: &[Entry]) -> Result<()> {
        store.unpin(selection.iter().map(Entry::path))?;
        Ok(())
    }
}

struct BindKeys {
    bindings: Vec<Binding>,
}

impl InitHook for BindKeys {
    fn on_init(&self, keymap: &mut KeyMap) -> Result<()> {
        for binding in &self.bindings {
            keymap.bind(binding.clone())?;
        }
        Ok(())
    }
}

struct PinTag {
    tag: String,
}

impl ColorHook for PinTag {
    fn before_drawing(&self, entry: &Entry, store: &PinStore, tags: &mut Vec<String>) {
        if store.is_pinned(entry.path()) {
            tags.push(self.tag.clone());
        }
    }
}
