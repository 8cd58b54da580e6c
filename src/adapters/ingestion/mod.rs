//! Media ingestion adapters. Implement the MediaSource port.

pub mod fs_source;

pub use fs_source::FsMediaSource;
