//! Native client implementations
//!
//! Each module provides a [`NativeClient`](crate::core::NativeClient) that a
//! [`Driver`](crate::Driver) can open sessions through.

pub mod recording;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use recording::{Command, RecordingClient};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteClient;
