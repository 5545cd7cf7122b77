//! Taskboard: column-based task board state for project-management front
//! ends.
//!
//! The crate owns the board a Kanban view renders: tasks grouped into
//! ordered columns, moved by drag-and-drop gestures, with per-column
//! capacity limits. Fetching and persisting tasks happens behind ports so the
//! board itself stays synchronous and deterministic.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the backend and rendering layer
//! - **Adapters**: Concrete implementations of ports
//! - **Services**: The board state manager and backend synchronization
//!
//! # Modules
//!
//! - [`board`]: Board state, moves, and synchronization with the backend

pub mod board;
