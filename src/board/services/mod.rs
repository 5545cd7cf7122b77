//! Application services for the task board.

mod manager;
mod sync;

pub use manager::BoardStateManager;
pub use sync::{
    BoardSyncError, BoardSyncResult, BoardSyncService, MoveRequest, PersistFailurePolicy,
};
