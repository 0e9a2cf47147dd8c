//! Tandem Domain Layer
//!
//! This crate contains the core business logic and domain model for the
//! Tandem connection graph. It defines the fundamental concepts, value
//! objects, and trait interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Relationship**: the single record capturing any interaction between
//!   exactly two users (pending, ignored, accepted, or rejected)
//! - **RequestStatus**: the state machine governing legal transitions on a
//!   Relationship
//! - **PairKey**: canonical unordered pair of user ids; the uniqueness key
//!   for the relationship store
//! - **SafeProfile**: the narrow, display-only projection of a user that the
//!   engine is allowed to see
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure business logic only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod id;
pub mod pair;
pub mod profile;
pub mod relationship;
pub mod status;
pub mod traits;

// Re-exports for convenience
pub use id::{RelationshipId, UserId};
pub use pair::PairKey;
pub use profile::SafeProfile;
pub use relationship::Relationship;
pub use status::RequestStatus;
