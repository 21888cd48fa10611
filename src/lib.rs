//! Posterctl - poster selection automation for Plex libraries
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod logging;
pub mod plex;
pub mod selector;
