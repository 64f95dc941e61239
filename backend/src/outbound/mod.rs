//! Outbound adapters implementing domain ports.
//!
//! - **memory**: the seeded record store behind a `RwLock` and a plain
//!   identity slot for sessions that live outside HTTP.
//!
//! Adapters are thin translators between domain types and their storage.
//! They contain no business logic.

pub mod memory;
