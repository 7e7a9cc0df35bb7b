//! Data models for Collabcut entities.
//!
//! This module defines the core data structures:
//! - `Project` - A body of work with a methodology and a team
//! - `Task` - Work items inside a project with assignees and a status
//! - `Document` - File metadata attached to a project (no bytes are kept)
//! - `ChatMessage` / `Channel` - Session-local chat
//! - `Decision` - Timestamped record of a team choice
//! - `User` - Team members and the session user

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Working methodology tag on a project. Has no behavioural effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Methodology {
    #[default]
    Agile,
    Waterfall,
    Kanban,
    Scrum,
}

impl Methodology {
    /// Get all methodologies in menu order.
    pub fn all() -> &'static [Methodology] {
        &[
            Methodology::Agile,
            Methodology::Waterfall,
            Methodology::Kanban,
            Methodology::Scrum,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Methodology::Agile => "agile",
            Methodology::Waterfall => "waterfall",
            Methodology::Kanban => "kanban",
            Methodology::Scrum => "scrum",
        }
    }
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Methodology {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "agile" => Ok(Methodology::Agile),
            "waterfall" => Ok(Methodology::Waterfall),
            "kanban" => Ok(Methodology::Kanban),
            "scrum" => Ok(Methodology::Scrum),
            _ => Err(format!("Unknown methodology: {}", s)),
        }
    }
}

/// Task status. Any state may follow any other; there is no enforced workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Archived,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Done => "done",
            TaskStatus::Archived => "archived",
        }
    }

    /// Human label used in listings.
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To do",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Done => "Done",
            TaskStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "inprogress" | "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            "archived" => Ok(TaskStatus::Archived),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// Kind of account a user registered as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    Client,
    Investor,
    #[default]
    Developer,
}

impl ProfileType {
    pub fn all() -> &'static [ProfileType] {
        &[
            ProfileType::Client,
            ProfileType::Investor,
            ProfileType::Developer,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileType::Client => "client",
            ProfileType::Investor => "investor",
            ProfileType::Developer => "developer",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProfileType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "client" => Ok(ProfileType::Client),
            "investor" => Ok(ProfileType::Investor),
            "developer" => Ok(ProfileType::Developer),
            _ => Err(format!("Unknown profile type: {}", s)),
        }
    }
}

/// A team member or the session user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (e.g., "user1")
    pub id: String,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Account kind
    #[serde(default)]
    pub profile_type: ProfileType,

    /// Role inside the team (e.g., "UX Designer")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Short biography (at most 200 characters)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            profile_type: ProfileType::default(),
            role: None,
            bio: None,
        }
    }

    /// Avatar initials: first letter of the first two words, or the first
    /// two characters of a single-word name.
    pub fn initials(&self) -> String {
        let words: Vec<&str> = self.name.split_whitespace().collect();
        let raw: String = match words.as_slice() {
            [] => String::new(),
            [single] => single.chars().take(2).collect(),
            [first, second, ..] => first
                .chars()
                .take(1)
                .chain(second.chars().take(1))
                .collect(),
        };
        raw.to_uppercase()
    }
}

/// A project tracked in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier (e.g., "1" for seeded projects, "p1718000000000" for new ones)
    pub id: String,

    /// Project name
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Working methodology
    #[serde(default)]
    pub methodology: Methodology,

    /// Owning user
    pub owner_id: String,

    /// Team member user IDs, in join order
    #[serde(default)]
    pub team_member_ids: Vec<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a project owned by `owner_id`, who is also its only member.
    pub fn new(
        id: String,
        name: String,
        description: String,
        methodology: Methodology,
        owner_id: String,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            methodology,
            team_member_ids: vec![owner_id.clone()],
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A work item inside a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (e.g., "t1")
    pub id: String,

    /// Owning project
    pub project_id: String,

    /// Task title
    pub title: String,

    /// Detailed description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Assigned users; never empty for tasks created through the form
    #[serde(default)]
    pub assignee_ids: Vec<String>,

    /// Optional due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    /// Status held before the task was last marked done
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<TaskStatus>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task in the initial `todo` state.
    pub fn new(
        id: String,
        project_id: String,
        title: String,
        assignee_ids: Vec<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            project_id,
            title,
            description: None,
            assignee_ids,
            due_date: None,
            status: TaskStatus::Todo,
            previous_status: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

/// Metadata for a file attached to a project. No content is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier (e.g., "d1")
    pub id: String,

    /// Owning project
    pub project_id: String,

    /// File name as selected
    pub name: String,

    /// File type, usually the lowercased extension (e.g., "pdf")
    #[serde(rename = "type")]
    pub doc_type: String,

    /// Placeholder location
    pub url: String,

    /// Uploading user
    pub uploaded_by: String,

    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,

    /// Size in bytes
    pub size: u64,
}

/// Placeholder URL given to every mock upload.
pub const PLACEHOLDER_URL: &str = "#";

impl Document {
    pub fn human_size(&self) -> String {
        format_size(self.size)
    }
}

/// Extract the lowercased extension of a file name.
///
/// Returns an empty string when the name has no dot or its only dot is the
/// first character (e.g., ".env").
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(pos) => name[pos + 1..].to_lowercase(),
    }
}

/// Format a byte count as a human-readable size (1024-based).
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Kind of chat channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    #[default]
    Public,
    Project,
}

impl ChannelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Public => "public",
            ChannelKind::Project => "project",
        }
    }
}

impl std::str::FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "public" => Ok(ChannelKind::Public),
            "project" => Ok(ChannelKind::Project),
            _ => Err(format!("Unknown channel kind: {}", s)),
        }
    }
}

/// A chat grouping key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: ChannelKind,
}

/// A chat message. Never leaves the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier (e.g., "msg1")
    pub id: String,

    /// Channel or project ID the message was posted to
    pub channel_id: String,

    /// Sending user
    pub sender_id: String,

    /// Message body, stored as typed
    pub content: String,

    /// Send timestamp
    pub timestamp: DateTime<Utc>,
}

/// A timestamped record of a team choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Unique identifier (e.g., "dec1")
    pub id: String,

    /// Project the decision belongs to
    pub project_id: String,

    /// Decision title
    pub title: String,

    /// What was decided and why
    pub description: String,

    /// Free-text author (a person, role or group)
    pub made_by: String,

    /// When the decision was recorded
    pub date: DateTime<Utc>,

    /// Expected outcomes
    #[serde(default)]
    pub outcomes: Vec<String>,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Completion statistics for a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectProgress {
    /// Total number of tasks in the project
    pub total: usize,
    /// Number of done tasks
    pub completed: usize,
    /// Rounded completion percentage (0-100)
    pub percentage: u8,
}

impl ProjectProgress {
    pub fn new(total: usize, completed: usize) -> Self {
        let percentage = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        } else {
            0
        };
        Self {
            total,
            completed,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_serialization() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, r#""inprogress""#);

        let status: TaskStatus = serde_json::from_str(r#""archived""#).unwrap();
        assert_eq!(status, TaskStatus::Archived);
    }

    #[test]
    fn test_task_status_from_str() {
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!(
            "in_progress".parse::<TaskStatus>().unwrap(),
            TaskStatus::InProgress
        );
        assert!("started".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_methodology_from_str() {
        for m in Methodology::all() {
            assert_eq!(m.as_str().parse::<Methodology>().unwrap(), *m);
        }
        assert!("lean".parse::<Methodology>().is_err());
    }

    #[test]
    fn test_new_task_starts_todo() {
        let task = Task::new(
            "t1".to_string(),
            "1".to_string(),
            "Wireframes".to_string(),
            vec!["user3".to_string()],
            Utc::now(),
        );
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.assignee_ids, vec!["user3"]);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_new_project_owner_is_only_member() {
        let project = Project::new(
            "p1".to_string(),
            "Storefront".to_string(),
            "Rebuild the storefront".to_string(),
            Methodology::Kanban,
            "currentUser".to_string(),
            Utc::now(),
        );
        assert_eq!(project.team_member_ids, vec!["currentUser".to_string()]);
    }

    #[test]
    fn test_document_type_serializes_as_type() {
        let doc = Document {
            id: "d1".to_string(),
            project_id: "1".to_string(),
            name: "brief.pdf".to_string(),
            doc_type: "pdf".to_string(),
            url: PLACEHOLDER_URL.to_string(),
            uploaded_by: "user1".to_string(),
            uploaded_at: Utc::now(),
            size: 2048,
        };
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains(r#""type":"pdf""#));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("Brief v1.2.PDF"), "pdf");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("Makefile"), "");
        assert_eq!(file_extension(".env"), "");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(25_000_000), "23.84 MB");
    }

    #[test]
    fn test_user_initials() {
        let mut user = User::new("u", "Ada Lovelace", "ada@example.com");
        assert_eq!(user.initials(), "AL");
        user.name = "Dev".to_string();
        assert_eq!(user.initials(), "DE");
        user.name = "   ".to_string();
        assert_eq!(user.initials(), "");
    }

    #[test]
    fn test_project_progress() {
        assert_eq!(ProjectProgress::new(0, 0).percentage, 0);
        assert_eq!(ProjectProgress::new(4, 1).percentage, 25);
        assert_eq!(ProjectProgress::new(3, 2).percentage, 67);
        assert_eq!(ProjectProgress::new(2, 2).percentage, 100);
    }

    #[test]
    fn test_decision_defaults_when_lists_missing() {
        let json = r#"{"id":"dec1","project_id":"1","title":"Adopt SSR","description":"Render on the server","made_by":"Tech Lead","date":"2024-05-05T00:00:00Z"}"#;
        let decision: Decision = serde_json::from_str(json).unwrap();
        assert!(decision.outcomes.is_empty());
        assert!(decision.tags.is_empty());
    }
}
