//! Reported issues fetched from the backend.

use serde::{Deserialize, Serialize};

/// Processing status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    Unprocessed,
    Processing,
    Processed,
}

impl IssueStatus {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            IssueStatus::Unprocessed => "Chưa xử lý",
            IssueStatus::Processing => "Đang xử lý",
            IssueStatus::Processed => "Đã xử lý",
        }
    }
}

/// Who an issue is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    Authority,
    Maintenance,
    Security,
    Noise,
    /// Any type this client does not know about.
    #[serde(other)]
    Other,
}

impl IssueKind {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            IssueKind::Authority => "Cơ quan chức năng",
            IssueKind::Maintenance => "Bảo trì",
            IssueKind::Security => "An ninh",
            IssueKind::Noise => "Tiếng ồn",
            IssueKind::Other => "Khác",
        }
    }
}

/// A reported incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub status: IssueStatus,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<u32>,
}

impl Issue {
    /// Creates an issue with empty description and no reporter.
    pub fn new(id: u64, kind: IssueKind, status: IssueStatus, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            status,
            title: title.into(),
            description: String::new(),
            reporter_name: None,
            room_number: None,
        }
    }
}
