//! # Tagstage Architecture
//!
//! Tagstage is the engine behind a two-list tag picker for a media library:
//! one list shows the tags assigned to a song or video, the other shows the
//! tags still available. Edits are staged in a per-item working copy and are
//! either applied or cancelled, while the rest of the library keeps rendering
//! from its stored tags.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the collaborators, dispatches, pushes views to sink │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Runs edit events, performs requested commits             │
//! │  - Catalog CRUD, structured messages                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Staging Engine (staging/)                                  │
//! │  - EditSession state machine, available pool, controller    │
//! │  - No I/O: returns outcomes and commit requests             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ItemStore (local records), DurableStore (persistence)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Asymmetry Worth Knowing
//!
//! Removing a tag that the item already had when editing began is saved
//! immediately. Cancelling afterwards restores the tag on screen but not in
//! durable storage. See [`staging`] for the full protocol table.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: Business operations returning `CmdResult`
//! - [`staging`]: Edit sessions and the staging controller
//! - [`store`]: Storage traits and implementations
//! - [`tags`]: Tag catalog and naming rules
//! - [`model`]: `Item`, `ItemId`, `MediaKind`
//! - [`render`]: Render sink collaborator
//! - [`config`]: Configuration loading
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod staging;
pub mod store;
pub mod tags;

#[cfg(test)]
pub mod test_utils;
