//! Drag-and-drop interaction state machine.
//!
//! One gesture at a time: `Idle` until a draggable hand tile is picked up,
//! `Dragging` until a drop or a cancellation. The payload lives in the
//! controller from the moment the drag starts, so the drop handler reads the
//! pip attributes recorded back then instead of re-querying a view that may
//! have changed under the gesture.

use tracing::{debug, instrument};

use crate::view::TileView;

/// The two drop targets flanking the played chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZone {
    /// The open end at the head of the chain.
    LeftEnd,
    /// The open end at the tail of the chain.
    RightEnd,
}

impl DropZone {
    /// The end flag a move submission carries for this zone.
    ///
    /// Fixed per zone. The dragged tile's own orientation plays no part.
    pub fn is_left_end(self) -> bool {
        matches!(self, Self::LeftEnd)
    }
}

/// Attributes recorded off the dragged tile view at drag start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    /// Instance id of the tile view being carried.
    pub instance: String,
    /// Left pip attribute.
    pub left: u8,
    /// Right pip attribute.
    pub right: u8,
}

/// A completed drop, ready for the action client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    /// True when the drop landed on the left-end zone.
    pub is_left_end: bool,
    /// Raw left pip value, exactly as read off the tile view.
    pub left: u8,
    /// Raw right pip value, exactly as read off the tile view.
    pub right: u8,
}

/// Gesture state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A tile is being carried.
    Dragging(DragPayload),
}

/// Tracks the active drag gesture.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// True while a tile is being carried.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Payload recorded at drag start, while a drag is in progress.
    pub fn payload(&self) -> Option<&DragPayload> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(payload) => Some(payload),
        }
    }

    /// Starts a drag from `tile`, refusing tiles that are not draggable.
    ///
    /// Returns whether the gesture began.
    #[instrument(skip(self, tile), fields(instance = %tile.instance()))]
    pub fn begin(&mut self, tile: &TileView) -> bool {
        if !tile.draggable() {
            debug!("Tile is not draggable; staying idle");
            return false;
        }
        self.state = DragState::Dragging(DragPayload {
            instance: tile.instance().clone(),
            left: *tile.left(),
            right: *tile.right(),
        });
        debug!(left = *tile.left(), right = *tile.right(), "Drag started");
        true
    }

    /// Whether `zone` should present as a live target right now.
    ///
    /// Both zones accept any carried tile; the server decides whether the
    /// pips actually match the end.
    pub fn drag_over(&self, _zone: DropZone) -> bool {
        self.is_dragging()
    }

    /// Completes the gesture over `zone`.
    ///
    /// Maps the zone, not the tile, to the end flag, and returns the payload
    /// recorded at drag start. Returns `None` when nothing was being carried.
    /// The controller is idle afterwards either way.
    #[instrument(skip(self))]
    pub fn drop_on(&mut self, zone: DropZone) -> Option<MoveIntent> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Dragging(payload) => {
                debug!(?zone, instance = %payload.instance, "Drop completed");
                Some(MoveIntent {
                    is_left_end: zone.is_left_end(),
                    left: payload.left,
                    right: payload.right,
                })
            }
        }
    }

    /// Abandons the gesture, discarding any payload.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("Drag cancelled");
        }
        self.state = DragState::Idle;
    }
}
