//! # Domain Layer
//!
//! Core business entities of the messaging system and the repository traits
//! that define their data-access contracts. The traits are implemented in
//! the infrastructure layer.

pub mod entities;

pub use entities::*;
