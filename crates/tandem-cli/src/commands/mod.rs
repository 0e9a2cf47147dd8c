//! Command implementations.

pub mod connections;
pub mod discover;
pub mod request;
pub mod user;

pub use self::connections::{execute_connections, execute_disconnect};
pub use self::discover::{execute_feed, execute_search};
pub use self::request::{execute_requests, execute_review, execute_send};
pub use self::user::execute_user;

use crate::error::{CliError, Result};
use std::str::FromStr;
use tandem_domain::{RelationshipId, RequestStatus, UserId};

/// Parse a user id argument.
pub(crate) fn parse_user_id(value: &str) -> Result<UserId> {
    UserId::from_string(value).map_err(CliError::InvalidInput)
}

/// Parse a relationship id argument.
pub(crate) fn parse_relationship_id(value: &str) -> Result<RelationshipId> {
    RelationshipId::from_string(value).map_err(CliError::InvalidInput)
}

/// Parse a status argument.
pub(crate) fn parse_status(value: &str) -> Result<RequestStatus> {
    RequestStatus::from_str(value).map_err(CliError::InvalidInput)
}
