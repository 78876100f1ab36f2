use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Moderation state of a report.
///
/// Transitions are admin-only and one-way: pending -> approved, or either
/// state -> deleted. Nothing ever moves back to pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Approved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Approved => "approved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "approved" => Ok(ReportStatus::Approved),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

/// Reporter reference on a report.
///
/// The backend sometimes populates the relation (`{_id, email}`) and
/// sometimes returns the bare id string, depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatedBy {
    User(ReporterRef),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl CreatedBy {
    /// The reporter's user id, regardless of population.
    pub fn id(&self) -> &str {
        match self {
            CreatedBy::User(user) => &user.id,
            CreatedBy::Id(id) => id,
        }
    }

    /// The reporter's email when the relation was populated.
    pub fn email(&self) -> Option<&str> {
        match self {
            CreatedBy::User(user) => user.email.as_deref(),
            CreatedBy::Id(_) => None,
        }
    }
}

/// A lost-or-found item record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// Filename of an externally hosted image, served under `/uploads/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: ReportStatus,
    #[serde(rename = "createdBy")]
    pub created_by: CreatedBy,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// Display name for the reporter, with the original UI's fallback.
    pub fn reporter_label(&self) -> &str {
        self.created_by.email().unwrap_or("Anonymous")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_populated_created_by() {
        let json = r#"{
            "_id": "abc123",
            "title": "Blue Backpack",
            "description": "Left in library",
            "status": "pending",
            "createdBy": { "_id": "u1", "email": "sam@campus.edu" },
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.created_by.id(), "u1");
        assert_eq!(report.created_by.email(), Some("sam@campus.edu"));
        assert_eq!(report.status, ReportStatus::Pending);
        assert!(report.image.is_none());
    }

    #[test]
    fn deserializes_bare_created_by_id() {
        let json = r#"{
            "_id": "abc123",
            "title": "Keys",
            "description": "Cafeteria",
            "image": "keys.jpg",
            "status": "approved",
            "createdBy": "u2",
            "createdAt": "2024-05-01T12:00:00Z"
        }"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.created_by.id(), "u2");
        assert_eq!(report.reporter_label(), "Anonymous");
        assert_eq!(report.image.as_deref(), Some("keys.jpg"));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Approved).unwrap(),
            "\"approved\""
        );
    }
}
