//! Key sequences bound to chains of actions.

use crate::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One step of a key binding's chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "command", rename_all = "lowercase")]
pub enum KeyAction {
    /// Run a registered command over the selection
    Run(String),
    /// Drop any pending key input
    Reset,
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyAction::Run(command) => write!(f, "{}", command),
            KeyAction::Reset => write!(f, "reset"),
        }
    }
}

/// A key sequence and the actions it triggers, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub keys: String,
    pub actions: Vec<KeyAction>,
}

impl Binding {
    /// Bind `keys` to a chain of actions.
    pub fn chain(keys: impl Into<String>, actions: Vec<KeyAction>) -> Self {
        Self {
            keys: keys.into(),
            actions,
        }
    }

    /// Bind `keys` to "run `command`, then reset".
    pub fn run_then_reset(keys: impl Into<String>, command: impl Into<String>) -> Self {
        Self::chain(keys, vec![KeyAction::Run(command.into()), KeyAction::Reset])
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain: Vec<String> = self.actions.iter().map(ToString::to_string).collect();
        write!(f, "map {} chain {}", self.keys, chain.join("; "))
    }
}

/// Key sequence to binding.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: BTreeMap<String, Binding>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, returning the binding it replaced, if any.
    pub fn bind(&mut self, binding: Binding) -> Result<Option<Binding>> {
        if binding.keys.is_empty() {
            return Err(Error::InvalidInput("key sequence must not be empty".to_string()));
        }
        if binding.actions.is_empty() {
            return Err(Error::InvalidInput(format!(
                "binding for {:?} has no actions",
                binding.keys
            )));
        }
        Ok(self.bindings.insert(binding.keys.clone(), binding))
    }

    pub fn get(&self, keys: &str) -> Option<&Binding> {
        self.bindings.get(keys)
    }

    /// True if `keys` is a strict prefix of some bound sequence.
    pub fn is_prefix(&self, keys: &str) -> bool {
        self.bindings
            .keys()
            .any(|bound| bound.len() > keys.len() && bound.starts_with(keys))
    }

    /// All bindings, sorted by key sequence.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
