//! compose-flow: staged content composition for posts, stories and reels,
//! with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
