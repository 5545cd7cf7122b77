//! Column-based task board.
//!
//! Models tasks grouped into ordered, capacity-limited columns and applies
//! drag-and-drop moves without ever losing or duplicating a task. The module
//! follows hexagonal architecture:
//!
//! - Domain types and the move algorithm in [`domain`]
//! - Port contracts for the backend and rendering layer in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The board state manager and sync orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
