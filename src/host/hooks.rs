//! Ordered hook lists: init hooks and the per-entry color pipeline.
//!
//! Registering a hook appends it. Nothing is ever replaced, so hooks
//! installed earlier (by the host or by other plugins) keep running, in
//! registration order.

use crate::Result;
use crate::host::keymap::KeyMap;
use crate::models::Entry;
use crate::storage::PinStore;

/// Runs once when the host session initializes.
pub trait InitHook {
    fn on_init(&self, keymap: &mut KeyMap) -> Result<()>;
}

impl<F> InitHook for F
where
    F: Fn(&mut KeyMap) -> Result<()>,
{
    fn on_init(&self, keymap: &mut KeyMap) -> Result<()> {
        self(keymap)
    }
}

/// Contributes style tags for an entry before it is drawn.
pub trait ColorHook {
    fn before_drawing(&self, entry: &Entry, store: &PinStore, tags: &mut Vec<String>);
}

impl<F> ColorHook for F
where
    F: Fn(&Entry, &PinStore, &mut Vec<String>),
{
    fn before_drawing(&self, entry: &Entry, store: &PinStore, tags: &mut Vec<String>) {
        self(entry, store, tags)
    }
}

#[derive(Default)]
pub struct InitHooks {
    hooks: Vec<Box<dyn InitHook>>,
}

impl InitHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn InitHook>) {
        self.hooks.push(hook);
    }

    /// Run every hook in registration order, stopping at the first error.
    pub fn run(&self, keymap: &mut KeyMap) -> Result<()> {
        for hook in &self.hooks {
            hook.on_init(keymap)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

#[derive(Default)]
pub struct ColorPipeline {
    hooks: Vec<Box<dyn ColorHook>>,
}

impl ColorPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn ColorHook>) {
        self.hooks.push(hook);
    }

    /// Let every hook add to `tags`, in registration order.
    pub fn apply(&self, entry: &Entry, store: &PinStore, tags: &mut Vec<String>) {
        for hook in &self.hooks {
            hook.before_drawing(entry, store, tags);
        }
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
