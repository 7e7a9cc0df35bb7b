//! Task list, creation, toggle and status changes.

use super::{App, Output, json, rejected, short_time};
use crate::config::ToggleBehavior;
use crate::forms::TaskForm;
use crate::models::{Task, TaskStatus, User};
use crate::notify::Notification;
use crate::routes::Route;
use crate::store::TaskFilter;
use crate::store::ids::TASK_PREFIX;
use crate::Result;
use serde::Serialize;

/// Compute the status a toggle moves a task to.
///
/// Returns the new status and the value to record as `previous_status`.
/// Any non-done status becomes done and is remembered. A done task goes back
/// to todo, or under [`ToggleBehavior::Restore`] to the remembered status.
pub fn toggled_status(task: &Task, behavior: ToggleBehavior) -> (TaskStatus, Option<TaskStatus>) {
    if task.status != TaskStatus::Done {
        return (TaskStatus::Done, Some(task.status));
    }
    let next = match behavior {
        ToggleBehavior::Reset => TaskStatus::Todo,
        ToggleBehavior::Restore => task
            .previous_status
            .filter(|s| *s != TaskStatus::Done)
            .unwrap_or(TaskStatus::Todo),
    };
    (next, None)
}

/// Options for `task list`.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub project_id: Option<String>,
    /// Only tasks assigned to the session user
    pub mine: bool,
    pub status: Option<TaskStatus>,
}

/// A task with the name of its project.
#[derive(Debug, Serialize)]
pub struct TaskRow {
    #[serde(flatten)]
    pub task: Task,
    pub project_name: String,
}

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub tasks: Vec<TaskRow>,
    pub count: usize,
}

impl Output for TaskList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks found.".to_string();
        }
        let mut lines = vec![format!("{} task(s):", self.count)];
        for row in &self.tasks {
            let due = row
                .task
                .due_date
                .map(|d| format!(" due {}", d))
                .unwrap_or_default();
            lines.push(format!(
                "  [{}] {} {} ({}){}",
                row.task.status.label(),
                row.task.id,
                row.task.title,
                row.project_name,
                due
            ));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct TaskDetail {
    pub task: Task,
    pub project_name: String,
    pub assignees: Vec<User>,
}

impl Output for TaskDetail {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let t = &self.task;
        let mut lines = vec![
            format!("{} {}", t.id, t.title),
            format!("  Project: {} [{}]", self.project_name, t.project_id),
            format!("  Status: {}", t.status.label()),
        ];
        if let Some(ref desc) = t.description {
            lines.push(format!("  Description: {}", desc));
        }
        if let Some(due) = t.due_date {
            lines.push(format!("  Due: {}", due));
        }
        let names: Vec<&str> = self.assignees.iter().map(|u| u.name.as_str()).collect();
        lines.push(format!("  Assignees: {}", names.join(", ")));
        lines.push(format!("  Updated: {}", short_time(&t.updated_at)));
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct TaskCreated {
    pub task: Task,
}

impl Output for TaskCreated {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Created task {} \"{}\" in project {}",
            self.task.id, self.task.title, self.task.project_id
        )
    }
}

#[derive(Debug, Serialize)]
pub struct TaskStatusChanged {
    pub id: String,
    pub from: TaskStatus,
    pub to: TaskStatus,
    pub task: Task,
}

impl Output for TaskStatusChanged {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Task {}: {} -> {}",
            self.id,
            self.from.label(),
            self.to.label()
        )
    }
}

impl App {
    /// Tasks, newest first. `mine` restricts to the session user's tasks.
    pub fn task_list(&self, query: &TaskQuery) -> Result<TaskList> {
        self.guard(&Route::Tasks)?;
        let user_id = self.user_id();
        let filter = TaskFilter {
            project_id: query.project_id.as_deref(),
            assignee_id: query.mine.then_some(user_id.as_str()),
            status: query.status,
        };
        let names = self.project_names()?;
        let tasks: Vec<TaskRow> = self
            .store
            .list_tasks(&filter)?
            .into_iter()
            .map(|task| TaskRow {
                project_name: names.get(&task.project_id).cloned().unwrap_or_default(),
                task,
            })
            .collect();
        Ok(TaskList {
            count: tasks.len(),
            tasks,
        })
    }

    pub fn task_show(&self, id: &str) -> Result<TaskDetail> {
        self.guard(&Route::Tasks)?;
        let task = self.store.get_task(id)?;
        let project = self.store.get_project(&task.project_id)?;
        let assignees = task
            .assignee_ids
            .iter()
            .map(|uid| self.store.get_user(uid))
            .collect::<Result<Vec<_>>>()?;
        Ok(TaskDetail {
            task,
            project_name: project.name,
            assignees,
        })
    }

    /// Submit the new-task form of a project page.
    pub fn task_create(&mut self, project_id: &str, form: &TaskForm) -> Result<TaskCreated> {
        self.guard(&Route::ProjectDetail(project_id.to_string()))?;
        let project = self.store.get_project(project_id)?;

        let now = self.now();
        let input = form
            .validate(&project.team_member_ids, now.date_naive())
            .map_err(|e| rejected("task", e))?;

        let id = self.next_id(TASK_PREFIX);
        let mut task = Task::new(id, project.id, input.title, input.assignee_ids, now);
        task.description = input.description;
        task.due_date = input.due_date;
        self.store.add_task(&task)?;

        tracing::info!(id = %task.id, project = %task.project_id, "task created");
        self.notify(Notification::info(
            "Task Created",
            format!("Task \"{}\" has been added to {}.", task.title, project.name),
        ));
        Ok(TaskCreated { task })
    }

    /// Flip a task between done and not done.
    pub fn task_toggle(&mut self, id: &str) -> Result<TaskStatusChanged> {
        self.guard(&Route::Tasks)?;
        let task = self.store.get_task(id)?;
        let (next, previous) = toggled_status(&task, self.settings.toggle_behavior);
        self.apply_status(task, next, previous)
    }

    /// Set any of the four statuses directly.
    pub fn task_set_status(&mut self, id: &str, status: TaskStatus) -> Result<TaskStatusChanged> {
        self.guard(&Route::Tasks)?;
        let task = self.store.get_task(id)?;
        let previous = match (task.status, status) {
            (TaskStatus::Done, TaskStatus::Done) => task.previous_status,
            (current, TaskStatus::Done) => Some(current),
            _ => None,
        };
        self.apply_status(task, status, previous)
    }

    fn apply_status(
        &mut self,
        mut task: Task,
        next: TaskStatus,
        previous: Option<TaskStatus>,
    ) -> Result<TaskStatusChanged> {
        let from = task.status;
        task.status = next;
        task.previous_status = previous;
        task.updated_at = self.now();
        self.store.update_task_status(&task)?;
        tracing::info!(id = %task.id, %from, to = %next, "task status changed");
        Ok(TaskStatusChanged {
            id: task.id.clone(),
            from,
            to: next,
            task,
        })
    }
}
