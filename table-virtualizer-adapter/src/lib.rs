//! Adapter utilities for the `table-virtualizer` crate.
//!
//! The `table-virtualizer` crate is UI-agnostic and talks to its display environment only
//! through the `Host` capability. This crate provides the pieces adapters commonly need
//! when there is no real display tree to lean on:
//!
//! - [`MemoryHost`]: an in-memory display environment with per-instance resize subscriptions
//! - [`Controller`]: owns a table plus a host and runs scroll → paint → focus restoration
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod host;


pub use controller::Controller;
pub use host::{MemoryHost, TableLayout};
