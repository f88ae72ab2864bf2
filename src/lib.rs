//! par-launch: a self-updating application launcher.
//!
//! The root crate wires the CLI and logging backend around the two member
//! crates: `par-launch-config` (configuration document) and
//! `par-launch-update` (reconciliation core).

pub mod cli;
pub mod logging;
