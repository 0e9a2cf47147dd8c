//! Tandem Connection Engine
//!
//! The application layer over the relationship store: request lifecycle,
//! connection listing and removal, the exclusion-filtered discovery feed,
//! search, and the account-deletion cascade.
//!
//! The engine owns no storage. Every operation takes the store as an
//! explicit parameter (one type implementing both `RelationshipStore` and
//! `IdentityDirectory`), and the authenticated actor is an explicit
//! argument on every call - there is no ambient "current user".
//!
//! # Examples
//!
//! ```no_run
//! use tandem_engine::{Engine, EngineConfig};
//! use tandem_store::SqliteStore;
//! use tandem_domain::{RequestStatus, UserId};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SqliteStore::new(":memory:")?;
//! let engine = Engine::new(EngineConfig::default());
//!
//! let actor = UserId::new();
//! let target = UserId::new();
//! // (profiles must exist in the directory first)
//! let request = engine.send_request(&mut store, actor, target, RequestStatus::Interested)?;
//! println!("request {} recorded", request.id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod discovery;
mod engine;
mod error;

pub use config::{EngineConfig, SearchField};
pub use engine::Engine;
pub use error::EngineError;
