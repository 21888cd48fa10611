//! Typed client for the subset of the Plex server API this tool touches.

mod client;
mod types;

pub use client::{Error, PlexClient};
pub use types::{LibrarySection, MediaItem, MetadataField, PosterCandidate};
