//! Bounded address multi-selection

pub mod schedule;
pub mod state;

pub use schedule::{Debouncer, NextTick};
pub use state::{OnChange, SelectionConfig, SelectionState, DEFAULT_DEBOUNCE};
