//! Job board state engine.
//!
//! The [`board`] module holds the catalog, bookmark persistence, filtering,
//! card rendering and the application modal, all owned by a single
//! [`board::JobBoard`] that processes typed events one at a time.

pub mod board;
pub mod config;
pub mod error;
pub mod telemetry;
