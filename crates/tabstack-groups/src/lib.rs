//! Tabstack Groups
//!
//! Tab-to-group membership. A tab id belongs to at most one group, group
//! names are unique ignoring case, and auto-close groups disappear as soon as
//! a removal leaves them empty.

mod drag;
mod error;
mod group;
mod reassign;
mod selection;
mod store;

pub use drag::{marker_position, DragSession, InsertionMarker, ItemRect, MarkerPosition, PendingMove};
pub use error::GroupError;
pub use group::{Group, GroupId, GroupMember};
pub use reassign::{move_selected, move_tab, BulkMoveOutcome, MoveOutcome, MoveTarget};
pub use selection::SelectionSet;
pub use store::GroupStore;

pub type Result<T> = std::result::Result<T, GroupError>;
