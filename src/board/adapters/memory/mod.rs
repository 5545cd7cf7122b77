//! In-memory adapters for the board ports.

mod mutation;
mod observer;
mod task_source;

pub use mutation::InMemoryTaskMutationService;
pub use observer::RecordingObserver;
pub use task_source::InMemoryTaskSource;
