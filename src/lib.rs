//! nodedesk: node endpoint registry, address resolution, and bounded
//! address selection for substrate-style chains with EVM accounts.

pub mod config;
pub mod core;
pub mod domain;
pub mod store;
