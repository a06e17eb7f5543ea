//! Named commands the host can run over its current selection.

use crate::Result;
use crate::models::Entry;
use crate::storage::PinStore;
use std::collections::BTreeMap;

/// A command runnable over the host's selected entries.
pub trait Command {
    fn execute(&self, store: &mut PinStore, selection: &[Entry]) -> Result<()>;
}

impl<F> Command for F
where
    F: Fn(&mut PinStore, &[Entry]) -> Result<()>,
{
    fn execute(&self, store: &mut PinStore, selection: &[Entry]) -> Result<()> {
        self(store, selection)
    }
}

/// Command name to implementation.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, returning the one it replaced, if any.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        command: Box<dyn Command>,
    ) -> Option<Box<dyn Command>> {
        self.commands.insert(name.into(), command)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| &**c)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.commands.keys()).finish()
    }
}
