//! Dominoes client library - state synchronization and move encoding.
//!
//! The authoritative rules engine lives on the server. This crate is the
//! client side only: it fetches a complete [`GameSnapshot`], renders it into
//! a structured [`PageView`], captures player intents (drag a hand tile onto
//! a board end, pick up, pass, start, join a fresh game), encodes them as
//! requests, and re-renders from whatever comes back.
//!
//! # Architecture
//!
//! - **Snapshot**: the wire model the server sends wholesale
//! - **Renderer**: pure snapshot-to-view projection with a version-token
//!   skip guard
//! - **Drag controller**: the one-gesture state machine behind move
//!   submissions
//! - **Action client and pipeline**: request encoding under the
//!   single-in-flight rule
//! - **Session**: the only state that outlives a snapshot, the game id and
//!   the last applied version token
//!
//! The server is trusted completely. The client performs no legality checks
//! and never updates the view optimistically.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod drag;
mod error;
mod pipeline;
mod render;
mod session;
mod snapshot;
mod tile;
mod view;

pub mod cli;
pub mod tui;

// Wire model
pub use snapshot::{GameSnapshot, HistoryEntry, PlayerSummary};
pub use tile::Tile;

// Rendering
pub use render::{RenderOutcome, render};
pub use view::{
    ActionControl, BigMessage, PANEL_SLOTS, PageView, PanelHighlight, PlayerPanel, TileRegion,
    TileView,
};

// Actions and transport
pub use client::{ActionClient, ActionOutcome};
pub use error::ClientError;
pub use pipeline::{ActionPipeline, ActionReply, PlayerAction};

// Interaction state
pub use drag::{DragController, DragPayload, DragState, DropZone, MoveIntent};
pub use session::Session;
