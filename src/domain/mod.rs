//! Domain logic: address resolution, endpoint registry, selection
//!
//! Nothing in here renders or talks to a node.

pub mod address;
pub mod endpoints;
pub mod selection;
