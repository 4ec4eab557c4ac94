use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::schedule::{Debouncer, NextTick};
use crate::core::{ActionQueue, ActionStatus, QueuedAction};
use crate::domain::address::AddressResolver;
use crate::store::KeyValueStore;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

pub const MSG_DUPLICATE: &str = "This address has already been added to the list";
pub const MSG_ADDED: &str = "The address has been added to the list";

/// Called with the full selection after every change.
pub type OnChange = Box<dyn FnMut(&[String])>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionConfig {
    pub max_count: usize,
    pub debounce: Duration,
}

impl SelectionConfig {
    pub fn new(max_count: usize) -> Self {
        Self {
            max_count,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Bounded multi-select over a growable candidate pool.
///
/// Typed filter text is resolved once it settles; a new address joins the
/// pool, a known one raises a warning. The selection never exceeds
/// `max_count` and never holds duplicates.
pub struct SelectionState<S> {
    resolver: AddressResolver<S>,
    queue: Box<dyn ActionQueue>,
    on_change: OnChange,
    max_count: usize,
    filter: String,
    settled_filter: String,
    debouncer: Debouncer<String>,
    next_tick: NextTick,
    selected: Vec<String>,
    pool: Vec<String>,
}

impl<S: KeyValueStore> SelectionState<S> {
    pub fn new(
        available: Vec<String>,
        config: SelectionConfig,
        resolver: AddressResolver<S>,
        queue: Box<dyn ActionQueue>,
        on_change: OnChange,
    ) -> Self {
        let mut state = Self {
            resolver,
            queue,
            on_change,
            max_count: config.max_count,
            filter: String::new(),
            settled_filter: String::new(),
            debouncer: Debouncer::new(config.debounce),
            next_tick: NextTick::new(),
            selected: Vec::new(),
            pool: available,
        };
        state.emit_change();
        state
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn resolver(&self) -> &AddressResolver<S> {
        &self.resolver
    }

    /// Replaces the selection wholesale.
    pub fn set_default_value(&mut self, values: Vec<String>) {
        self.selected = values;
        self.emit_change();
    }

    /// Appends `address` unless present or full. Returns whether it changed.
    pub fn on_select(&mut self, address: &str) -> bool {
        if self.selected.iter().any(|a| a == address) {
            return false;
        }
        if self.selected.len() >= self.max_count {
            debug!(max = self.max_count, "selection full");
            return false;
        }
        self.selected.push(address.to_string());
        self.emit_change();
        true
    }

    /// Removes `address` if present. Returns whether it changed.
    pub fn on_deselect(&mut self, address: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|a| a != address);
        if self.selected.len() == before {
            return false;
        }
        self.emit_change();
        true
    }

    /// Records an edit; resolution waits for the text to settle.
    pub fn on_filter_change(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.filter.clone_from(&text);
        self.debouncer.push(text, now);
    }

    /// Advances the scheduler: opens the first-tick guard and settles the filter.
    pub fn on_tick(&mut self, now: Instant) {
        self.next_tick.tick();
        if let Some(text) = self.debouncer.poll(now) {
            self.on_filter_settled(text);
        }
    }

    /// Pool entries to offer, or `None` while the first tick is pending.
    ///
    /// Selected entries are hidden; the rest must contain the settled filter
    /// text (case-insensitive).
    pub fn available(&self) -> Option<Vec<&str>> {
        if !self.next_tick.is_ready() {
            return None;
        }
        let needle = self.settled_filter.trim().to_lowercase();
        Some(
            self.pool
                .iter()
                .filter(|address| !self.selected.contains(address))
                .filter(|address| needle.is_empty() || address.to_lowercase().contains(&needle))
                .map(String::as_str)
                .collect(),
        )
    }

    fn on_filter_settled(&mut self, text: String) {
        self.settled_filter = text;
        if self.settled_filter.is_empty() {
            return;
        }
        let Some(address) = self.resolver.resolve(self.settled_filter.as_str(), false) else {
            return;
        };

        if self.pool.contains(&address) {
            self.queue
                .queue_action(QueuedAction::new("", MSG_DUPLICATE, ActionStatus::EventWarn));
        } else {
            info!(%address, "address added to pool");
            self.pool.push(address);
            self.queue
                .queue_action(QueuedAction::new("completed", MSG_ADDED, ActionStatus::Success));
        }
        self.clear_filter();
    }

    fn clear_filter(&mut self) {
        self.filter.clear();
        self.settled_filter.clear();
        self.debouncer.cancel();
    }

    fn emit_change(&mut self) {
        (self.on_change)(&self.selected);
    }
}

impl<S> fmt::Debug for SelectionState<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionState")
            .field("max_count", &self.max_count)
            .field("filter", &self.filter)
            .field("selected", &self.selected)
            .field("pool", &self.pool)
            .field("ready", &self.next_tick.is_ready())
            .finish()
    }
}
