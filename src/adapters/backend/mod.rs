//! Submission backend adapters. Implement the Publisher port.

pub mod http_publisher;
pub mod mock_publisher;

pub use http_publisher::HttpPublisher;
pub use mock_publisher::MockPublisher;
