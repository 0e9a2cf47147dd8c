//! Safe profile projection
//!
//! The engine never sees full identity records (credentials, email, and so
//! on live with the identity collaborator). It works exclusively with this
//! display-safe projection.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// Display-safe projection of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeProfile {
    /// The user's identifier
    pub id: UserId,

    /// Given name
    pub first_name: String,

    /// Family name, if provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// Avatar URL, if provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,

    /// Age, if provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,

    /// Self-described gender, if provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    /// Short bio, if provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,

    /// Skill tags
    #[serde(default)]
    pub skills: Vec<String>,
}

impl SafeProfile {
    /// Minimal profile with only the required fields set
    pub fn new(id: UserId, first_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: None,
            photo_url: None,
            age: None,
            gender: None,
            about: None,
            skills: Vec::new(),
        }
    }

    /// Full display name ("First Last" or just "First")
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}
