//! Project list, detail, creation and progress.

use super::{App, Output, json, rejected, short_time};
use crate::Result;
use crate::forms::ProjectForm;
use crate::models::{Decision, Document, Project, ProjectProgress, Task, User};
use crate::notify::Notification;
use crate::routes::Route;
use crate::store::TaskFilter;
use crate::store::ids::PROJECT_PREFIX;
use serde::Serialize;

/// A project with its completion figures.
#[derive(Debug, Serialize)]
pub struct ProjectRow {
    #[serde(flatten)]
    pub project: Project,
    pub progress: ProjectProgress,
}

#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<ProjectRow>,
    pub count: usize,
}

impl Output for ProjectList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.projects.is_empty() {
            return "No projects.".to_string();
        }
        let mut lines = vec![format!("{} project(s):", self.count)];
        for row in &self.projects {
            lines.push(format!(
                "  [{}] {} ({}) - {}% done, {} member(s)",
                row.project.id,
                row.project.name,
                row.project.methodology,
                row.progress.percentage,
                row.project.team_member_ids.len()
            ));
        }
        lines.join("\n")
    }
}

/// Everything the project page shows.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub progress: ProjectProgress,
    pub team: Vec<User>,
    pub tasks: Vec<Task>,
    pub documents: Vec<Document>,
    pub decisions: Vec<Decision>,
}

impl Output for ProjectDetail {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let p = &self.project;
        let mut lines = vec![
            format!("{} [{}]", p.name, p.id),
            format!("  {}", p.description),
            format!("  Methodology: {}", p.methodology),
            format!("  Created: {}", short_time(&p.created_at)),
            format!(
                "  Progress: {}/{} tasks done ({}%)",
                self.progress.completed, self.progress.total, self.progress.percentage
            ),
            String::new(),
            format!("Team ({}):", self.team.len()),
        ];
        for user in &self.team {
            let role = user.role.as_deref().unwrap_or("Member");
            lines.push(format!("  {} {} - {}", user.initials(), user.name, role));
        }
        lines.push(format!("Tasks ({}):", self.tasks.len()));
        for task in &self.tasks {
            lines.push(format!("  [{}] {} {}", task.status.label(), task.id, task.title));
        }
        lines.push(format!("Documents ({}):", self.documents.len()));
        for doc in &self.documents {
            lines.push(format!("  {} ({})", doc.name, doc.human_size()));
        }
        lines.push(format!("Decisions ({}):", self.decisions.len()));
        for decision in &self.decisions {
            lines.push(format!(
                "  {} {} - by {}",
                decision.date.format("%Y-%m-%d"),
                decision.title,
                decision.made_by
            ));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectCreated {
    pub project: Project,
}

impl Output for ProjectCreated {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Created project {} \"{}\" ({})",
            self.project.id, self.project.name, self.project.methodology
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectProgressResult {
    pub project_id: String,
    #[serde(flatten)]
    pub progress: ProjectProgress,
}

impl Output for ProjectProgressResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Project {}: {}/{} tasks done ({}%)",
            self.project_id, self.progress.completed, self.progress.total, self.progress.percentage
        )
    }
}

impl App {
    fn progress_of(&self, project_id: &str) -> Result<ProjectProgress> {
        let tasks = self.store.list_tasks(&TaskFilter {
            project_id: Some(project_id),
            ..Default::default()
        })?;
        let completed = tasks.iter().filter(|t| t.is_done()).count();
        Ok(ProjectProgress::new(tasks.len(), completed))
    }

    /// All projects, newest first.
    pub fn project_list(&self) -> Result<ProjectList> {
        self.guard(&Route::Projects)?;
        let projects = self
            .store
            .list_projects()?
            .into_iter()
            .map(|project| {
                let progress = self.progress_of(&project.id)?;
                Ok(ProjectRow { project, progress })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(ProjectList {
            count: projects.len(),
            projects,
        })
    }

    pub fn project_show(&self, id: &str) -> Result<ProjectDetail> {
        self.guard(&Route::ProjectDetail(id.to_string()))?;
        let project = self.store.get_project(id)?;
        let team = project
            .team_member_ids
            .iter()
            .map(|uid| self.store.get_user(uid))
            .collect::<Result<Vec<_>>>()?;
        let tasks = self.store.list_tasks(&TaskFilter {
            project_id: Some(id),
            ..Default::default()
        })?;
        let completed = tasks.iter().filter(|t| t.is_done()).count();
        Ok(ProjectDetail {
            progress: ProjectProgress::new(tasks.len(), completed),
            documents: self.store.list_documents(Some(id))?,
            decisions: self.store.list_decisions(Some(id), None)?,
            team,
            tasks,
            project,
        })
    }

    /// Submit the new-project form. The session user owns the project and is
    /// its only team member.
    pub fn project_create(&mut self, form: &ProjectForm) -> Result<ProjectCreated> {
        self.guard(&Route::Projects)?;
        let input = form.validate().map_err(|e| rejected("project", e))?;

        let now = self.now();
        let id = self.next_id(PROJECT_PREFIX);
        let project = Project::new(
            id,
            input.name,
            input.description,
            input.methodology,
            self.user_id(),
            now,
        );
        self.store.add_project(&project)?;
        tracing::info!(id = %project.id, name = %project.name, "project created");
        self.notify(Notification::info(
            "Project Created",
            format!("Project \"{}\" has been created.", project.name),
        ));
        Ok(ProjectCreated { project })
    }

    pub fn project_progress(&self, id: &str) -> Result<ProjectProgressResult> {
        self.guard(&Route::ProjectDetail(id.to_string()))?;
        // Resolve first so unknown ids are reported as missing.
        self.store.get_project(id)?;
        Ok(ProjectProgressResult {
            project_id: id.to_string(),
            progress: self.progress_of(id)?,
        })
    }
}
