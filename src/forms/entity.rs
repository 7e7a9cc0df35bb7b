//! Forms that create collaborative entities: projects, tasks and decisions.

use super::{ValidationErrors, check_min};
use crate::models::Methodology;
use chrono::NaiveDate;

/// Raw values of the "new project" form.
#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub methodology: String,
}

/// A validated project submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    pub name: String,
    pub description: String,
    pub methodology: Methodology,
}

impl ProjectForm {
    pub fn validate(&self) -> Result<ProjectInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_min(
            &mut errors,
            "name",
            &self.name,
            3,
            "Project name must be at least 3 characters.",
        );
        check_min(
            &mut errors,
            "description",
            &self.description,
            10,
            "Description must be at least 10 characters.",
        );
        let methodology = match self.methodology.parse::<Methodology>() {
            Ok(m) => m,
            Err(_) => {
                errors.add(
                    "methodology",
                    "Methodology must be one of agile, waterfall, kanban or scrum.",
                );
                Methodology::default()
            }
        };

        errors.into_result(ProjectInput {
            name: self.name.clone(),
            description: self.description.clone(),
            methodology,
        })
    }
}

/// Raw values of the "new task" form.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub assignee_ids: Vec<String>,
    /// Due date as typed, `YYYY-MM-DD`; empty means none
    pub due_date: String,
}

/// A validated task submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub assignee_ids: Vec<String>,
    pub due_date: Option<NaiveDate>,
}

impl TaskForm {
    /// Validate against the project's current team and the session's today.
    ///
    /// Assignees are deduplicated, keeping the order of first selection.
    pub fn validate(
        &self,
        team_member_ids: &[String],
        today: NaiveDate,
    ) -> Result<TaskInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_min(
            &mut errors,
            "title",
            &self.title,
            3,
            "Title must be at least 3 characters.",
        );

        let mut assignee_ids: Vec<String> = Vec::new();
        for id in &self.assignee_ids {
            if !assignee_ids.contains(id) {
                assignee_ids.push(id.clone());
            }
        }
        if assignee_ids.is_empty() {
            errors.add("assignee_ids", "Select at least one assignee.");
        } else if let Some(outsider) = assignee_ids
            .iter()
            .find(|id| !team_member_ids.contains(id))
        {
            errors.add(
                "assignee_ids",
                format!("{} is not a member of this project's team.", outsider),
            );
        }

        let due_date = if self.due_date.is_empty() {
            None
        } else {
            match NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d") {
                Ok(date) if date < today => {
                    errors.add("due_date", "Due date cannot be in the past.");
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("due_date", "Due date must use the YYYY-MM-DD format.");
                    None
                }
            }
        };

        let description = if self.description.is_empty() {
            None
        } else {
            Some(self.description.clone())
        };

        errors.into_result(TaskInput {
            title: self.title.clone(),
            description,
            assignee_ids,
            due_date,
        })
    }
}

/// Raw values of the "record decision" form.
#[derive(Debug, Clone, Default)]
pub struct DecisionForm {
    pub title: String,
    pub description: String,
    pub made_by: String,
    pub project_id: String,
    /// Comma-separated outcomes
    pub outcomes: String,
    /// Comma-separated tags
    pub tags: String,
}

/// A validated decision submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionInput {
    pub title: String,
    pub description: String,
    pub made_by: String,
    pub project_id: String,
    pub outcomes: Vec<String>,
    pub tags: Vec<String>,
}

impl DecisionForm {
    /// Validate against the ids of the projects offered as options.
    pub fn validate(&self, known_project_ids: &[String]) -> Result<DecisionInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_min(
            &mut errors,
            "title",
            &self.title,
            3,
            "Title must be at least 3 characters.",
        );
        check_min(
            &mut errors,
            "description",
            &self.description,
            10,
            "Description must be at least 10 characters.",
        );
        check_min(
            &mut errors,
            "made_by",
            &self.made_by,
            2,
            "'Made by' must be at least 2 characters.",
        );
        if self.project_id.is_empty() {
            errors.add("project_id", "Select a project.");
        } else if !known_project_ids.contains(&self.project_id) {
            errors.add("project_id", "Selected project is not valid.");
        }

        errors.into_result(DecisionInput {
            title: self.title.clone(),
            description: self.description.clone(),
            made_by: self.made_by.clone(),
            project_id: self.project_id.clone(),
            outcomes: split_list(&self.outcomes),
            tags: split_list(&self.tags),
        })
    }
}

/// Split a free-text comma list into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
