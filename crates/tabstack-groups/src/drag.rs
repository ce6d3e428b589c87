//! Drag gesture interpretation
//!
//! A drag carries one source tab. Hovering only moves the insertion marker,
//! which is a visual hint: stored membership stays in insertion order.
//! Dropping outside a recognized target cancels without touching anything.

use tabstack_tabs::TabId;

use crate::reassign::MoveTarget;

/// Vertical extent of a rendered tab row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemRect {
    pub top: f64,
    pub height: f64,
}

impl ItemRect {
    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPosition {
    Before(TabId),
    After(TabId),
    /// Empty space of the list: after the last row
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionMarker {
    pub target: MoveTarget,
    pub position: MarkerPosition,
}

/// A drop that should be applied through the reassignment engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    pub tab_id: TabId,
    pub target: MoveTarget,
}

/// Midpoint rule: above the middle of the hovered row places the marker
/// before it, otherwise after.
pub fn marker_position(item: TabId, rect: ItemRect, pointer_y: f64) -> MarkerPosition {
    if pointer_y < rect.midpoint() {
        MarkerPosition::Before(item)
    } else {
        MarkerPosition::After(item)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    source: TabId,
    marker: Option<InsertionMarker>,
}

impl DragSession {
    pub fn start(source: TabId) -> Self {
        tracing::debug!(tab_id = source, "Drag started");
        Self {
            source,
            marker: None,
        }
    }

    pub fn source(&self) -> TabId {
        self.source
    }

    pub fn marker(&self) -> Option<&InsertionMarker> {
        self.marker.as_ref()
    }

    /// Pointer moved over a list. `over` is the row under the pointer, if
    /// any. Hovering the dragged row itself leaves the marker where it was.
    pub fn hover(
        &mut self,
        target: MoveTarget,
        over: Option<(TabId, ItemRect)>,
        pointer_y: f64,
    ) -> Option<&InsertionMarker> {
        let position = match over {
            Some((item, _)) if item == self.source => return self.marker.as_ref(),
            Some((item, rect)) => marker_position(item, rect, pointer_y),
            None => MarkerPosition::End,
        };

        self.marker = Some(InsertionMarker { target, position });
        self.marker.as_ref()
    }

    /// Pointer left every drop target
    pub fn leave(&mut self) {
        self.marker = None;
    }

    /// Finish the gesture. `None` means the pointer was released outside any
    /// drop target and nothing happens.
    pub fn drop_on(self, target: Option<MoveTarget>) -> Option<PendingMove> {
        match target {
            Some(target) => Some(PendingMove {
                tab_id: self.source,
                target,
            }),
            None => {
                tracing::debug!(tab_id = self.source, "Drag cancelled");
                None
            }
        }
    }
}
