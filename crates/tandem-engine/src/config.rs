//! Engine configuration

use serde::{Deserialize, Serialize};

/// Profile fields the search filter matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// First and last name
    Name,

    /// Skill tags
    Skills,

    /// Bio text
    About,
}

/// Policy configuration for feed and search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Hard cap on feed page size; caller input is clamped to this
    pub max_page_size: usize,

    /// Page size used when the caller does not specify one
    pub default_page_size: usize,

    /// Fields the search filter matches against; a candidate matches if
    /// any configured field matches
    pub search_fields: Vec<SearchField>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_page_size: 50,
            default_page_size: 10,
            search_fields: vec![SearchField::Name, SearchField::Skills],
        }
    }
}
