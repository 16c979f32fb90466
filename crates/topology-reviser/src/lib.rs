//! # Topology Reviser
//!
//! The command-line binary's supporting modules, exposed as a library so
//! they can be exercised from tests without going through `main`.

pub mod catalog_io;
pub mod config;
pub mod emit;
