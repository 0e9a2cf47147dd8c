//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use tandem_domain::{Relationship, SafeProfile};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of profiles.
    pub fn format_profiles(&self, profiles: &[SafeProfile]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(profiles)?),
            OutputFormat::Table => Ok(self.profiles_table(profiles)),
            OutputFormat::Quiet => Ok(profiles
                .iter()
                .map(|p| p.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format pending requests with their counterpart profiles.
    pub fn format_requests(&self, requests: &[(Relationship, SafeProfile)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = requests
                    .iter()
                    .map(|(rel, profile)| {
                        serde_json::json!({
                            "request": rel,
                            "profile": profile,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => Ok(self.requests_table(requests)),
            OutputFormat::Quiet => Ok(requests
                .iter()
                .map(|(rel, _)| rel.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a single relationship record.
    pub fn format_relationship(&self, rel: &Relationship) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(rel)?),
            OutputFormat::Table | OutputFormat::Quiet => Ok(format!(
                "{} {} -> {} [{}]",
                rel.id, rel.from_user, rel.to_user, rel.status
            )),
        }
    }

    fn profiles_table(&self, profiles: &[SafeProfile]) -> String {
        if profiles.is_empty() {
            return self.colorize("No users found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Age", "Gender", "Skills"]);

        for profile in profiles {
            let id = profile.id.to_string();
            let name = profile.display_name();
            let age = profile.age.map(|a| a.to_string()).unwrap_or_default();
            let skills = profile.skills.join(", ");
            builder.push_record([
                &id[..8],
                name.as_str(),
                age.as_str(),
                profile.gender.as_deref().unwrap_or(""),
                skills.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn requests_table(&self, requests: &[(Relationship, SafeProfile)]) -> String {
        if requests.is_empty() {
            return self.colorize("No pending requests.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Request", "Status", "User", "Name"]);

        for (rel, profile) in requests {
            let request_id = rel.id.to_string();
            let user_id = profile.id.to_string();
            let name = profile.display_name();
            builder.push_record([
                &request_id[..8],
                rel.status.as_str(),
                &user_id[..8],
                name.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
