//! Infrastructure adapters. Implement outbound ports.
//!
//! Filesystem picker, fixture directory, publish backends, console UI.
//! Map infrastructure errors to domain errors at the boundary.

pub mod backend;
pub mod directory;
pub mod ingestion;
pub mod ui;
