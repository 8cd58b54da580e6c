//! Directory adapters. Implement user/location/hashtag lookup.

pub mod fixtures;

pub use fixtures::FixtureDirectory;
