//! Session store for Collabcut data.
//!
//! A single normalized store shared by every view. Entities live in an
//! in-memory SQLite database that is dropped with the process; nothing is
//! ever written to disk.
//!
//! ## Tables
//!
//! - `users`, `projects` + `project_members`
//! - `tasks` + `task_assignees`
//! - `documents`, `channels`, `messages`
//! - `decisions` + `decision_tags`
//!
//! Foreign keys are enforced, so a task cannot point at a missing project
//! and an assignee must be a known user. Every entity table carries an
//! autoincrement `seq` that records insertion order: listings that show the
//! newest item first sort by `seq DESC`, chat sorts by `seq ASC`.

pub mod ids;
pub mod seed;

use crate::models::{
    Channel, ChatMessage, Decision, Document, Project, Task, TaskStatus, User,
};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use ids::IdGenerator;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Filters for task listings.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter<'a> {
    pub project_id: Option<&'a str>,
    pub assignee_id: Option<&'a str>,
    pub status: Option<TaskStatus>,
}

/// The session's data.
pub struct Store {
    conn: Connection,
    ids: IdGenerator,
}

impl Store {
    /// Open an empty store.
    pub fn new() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn,
            ids: IdGenerator::new(),
        })
    }

    /// Open a store holding the mock seed, with relative dates anchored at `now`.
    pub fn seeded(now: DateTime<Utc>) -> Result<Self> {
        let mut store = Self::new()?;
        seed::load(&mut store, now)?;
        Ok(store)
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                profile_type TEXT NOT NULL DEFAULT 'developer',
                role TEXT,
                bio TEXT
            );

            CREATE TABLE IF NOT EXISTS projects (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                methodology TEXT NOT NULL DEFAULT 'agile',
                owner_id TEXT NOT NULL REFERENCES users(id),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS project_members (
                project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL REFERENCES users(id),
                position INTEGER NOT NULL,
                PRIMARY KEY (project_id, user_id)
            );

            CREATE TABLE IF NOT EXISTS tasks (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                description TEXT,
                due_date TEXT,
                status TEXT NOT NULL DEFAULT 'todo',
                previous_status TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS task_assignees (
                task_id TEXT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                user_id TEXT NOT NULL REFERENCES users(id),
                position INTEGER NOT NULL,
                PRIMARY KEY (task_id, user_id)
            );

            CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                doc_type TEXT NOT NULL,
                url TEXT NOT NULL,
                uploaded_by TEXT NOT NULL REFERENCES users(id),
                uploaded_at TEXT NOT NULL,
                size INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS channels (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                kind TEXT NOT NULL DEFAULT 'public'
            );

            CREATE TABLE IF NOT EXISTS messages (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                channel_id TEXT NOT NULL,
                sender_id TEXT NOT NULL REFERENCES users(id),
                content TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS decisions (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                made_by TEXT NOT NULL,
                date TEXT NOT NULL,
                outcomes TEXT NOT NULL DEFAULT '[]'
            );

            CREATE TABLE IF NOT EXISTS decision_tags (
                decision_id TEXT NOT NULL REFERENCES decisions(id) ON DELETE CASCADE,
                tag TEXT NOT NULL,
                position INTEGER NOT NULL,
                PRIMARY KEY (decision_id, position)
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id);
            CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
            CREATE INDEX IF NOT EXISTS idx_task_assignees_user ON task_assignees(user_id);
            CREATE INDEX IF NOT EXISTS idx_documents_project ON documents(project_id);
            CREATE INDEX IF NOT EXISTS idx_messages_channel ON messages(channel_id);
            CREATE INDEX IF NOT EXISTS idx_decisions_date ON decisions(date);
            CREATE INDEX IF NOT EXISTS idx_decision_tags_tag ON decision_tags(tag);
            "#,
        )?;
        Ok(())
    }

    /// Generate a session-unique id for a new entity.
    pub fn next_id(&mut self, prefix: &str, now: DateTime<Utc>) -> String {
        self.ids.next(prefix, now)
    }

    // === User Operations ===

    pub fn add_user(&mut self, user: &User) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (id, name, email, profile_type, role, bio)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id,
                user.name,
                user.email,
                user.profile_type.as_str(),
                user.role,
                user.bio,
            ],
        )?;
        tracing::debug!(id = %user.id, "user added");
        Ok(())
    }

    pub fn get_user(&self, id: &str) -> Result<User> {
        self.conn
            .query_row(
                "SELECT id, name, email, profile_type, role, bio FROM users WHERE id = ?",
                [id],
                user_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("User not found: {}", id)))
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email, profile_type, role, bio FROM users ORDER BY rowid")?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    /// Overwrite a user's editable fields.
    pub fn update_user(&mut self, user: &User) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE users SET name = ?2, email = ?3, profile_type = ?4, role = ?5, bio = ?6
             WHERE id = ?1",
            params![
                user.id,
                user.name,
                user.email,
                user.profile_type.as_str(),
                user.role,
                user.bio,
            ],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("User not found: {}", user.id)));
        }
        tracing::debug!(id = %user.id, "user updated");
        Ok(())
    }

    // === Project Operations ===

    /// Insert a project. It becomes the first entry of `list_projects`.
    pub fn add_project(&mut self, project: &Project) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO projects (id, name, description, methodology, owner_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                project.id,
                project.name,
                project.description,
                project.methodology.as_str(),
                project.owner_id,
                ts(&project.created_at),
                ts(&project.updated_at),
            ],
        )?;
        for (position, user_id) in project.team_member_ids.iter().enumerate() {
            tx.execute(
                "INSERT OR IGNORE INTO project_members (project_id, user_id, position)
                 VALUES (?1, ?2, ?3)",
                params![project.id, user_id, position as i64],
            )?;
        }
        tx.commit()?;
        tracing::debug!(id = %project.id, "project added");
        Ok(())
    }

    pub fn get_project(&self, id: &str) -> Result<Project> {
        let mut project = self
            .conn
            .query_row(
                "SELECT id, name, description, methodology, owner_id, created_at, updated_at
                 FROM projects WHERE id = ?",
                [id],
                project_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Project not found: {}", id)))?;
        project.team_member_ids = self.project_members(id)?;
        Ok(project)
    }

    pub fn project_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM projects WHERE id = ?", [id], |row| {
                row.get(0)
            })?;
        Ok(count > 0)
    }

    /// All projects, newest first.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        let ids = self.project_ids()?;
        ids.iter().map(|id| self.get_project(id)).collect()
    }

    /// Ids of all projects, newest first.
    pub fn project_ids(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT id FROM projects ORDER BY seq DESC")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(ids)
    }

    fn project_members(&self, project_id: &str) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id FROM project_members WHERE project_id = ? ORDER BY position",
        )?;
        let members = stmt
            .query_map([project_id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(members)
    }

    // === Task Operations ===

    /// Insert a task. It becomes the first entry of `list_tasks`.
    pub fn add_task(&mut self, task: &Task) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO tasks (id, project_id, title, description, due_date, status,
                                previous_status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                task.id,
                task.project_id,
                task.title,
                task.description,
                task.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                task.status.as_str(),
                task.previous_status.map(|s| s.as_str()),
                ts(&task.created_at),
                ts(&task.updated_at),
            ],
        )?;
        for (position, user_id) in task.assignee_ids.iter().enumerate() {
            tx.execute(
                "INSERT OR IGNORE INTO task_assignees (task_id, user_id, position)
                 VALUES (?1, ?2, ?3)",
                params![task.id, user_id, position as i64],
            )?;
        }
        tx.commit()?;
        tracing::debug!(id = %task.id, project = %task.project_id, "task added");
        Ok(())
    }

    pub fn get_task(&self, id: &str) -> Result<Task> {
        let mut task = self
            .conn
            .query_row(
                "SELECT id, project_id, title, description, due_date, status, previous_status,
                        created_at, updated_at
                 FROM tasks WHERE id = ?",
                [id],
                task_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Task not found: {}", id)))?;

        let mut stmt = self
            .conn
            .prepare("SELECT user_id FROM task_assignees WHERE task_id = ? ORDER BY position")?;
        task.assignee_ids = stmt
            .query_map([id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(task)
    }

    /// Tasks matching `filter`, newest first.
    pub fn list_tasks(&self, filter: &TaskFilter<'_>) -> Result<Vec<Task>> {
        let mut sql = String::from(
            "SELECT DISTINCT t.id, t.seq FROM tasks t
             LEFT JOIN task_assignees ta ON t.id = ta.task_id
             WHERE 1=1",
        );
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(p) = filter.project_id {
            sql.push_str(" AND t.project_id = ?");
            params_vec.push(Box::new(p.to_string()));
        }
        if let Some(a) = filter.assignee_id {
            sql.push_str(" AND ta.user_id = ?");
            params_vec.push(Box::new(a.to_string()));
        }
        if let Some(s) = filter.status {
            sql.push_str(" AND t.status = ?");
            params_vec.push(Box::new(s.as_str()));
        }
        sql.push_str(" ORDER BY t.seq DESC");

        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let ids = stmt
            .query_map(params_refs.as_slice(), |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        ids.iter().map(|id| self.get_task(id)).collect()
    }

    /// Persist a task's status fields and update timestamp.
    pub fn update_task_status(&mut self, task: &Task) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET status = ?2, previous_status = ?3, updated_at = ?4 WHERE id = ?1",
            params![
                task.id,
                task.status.as_str(),
                task.previous_status.map(|s| s.as_str()),
                ts(&task.updated_at),
            ],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(format!("Task not found: {}", task.id)));
        }
        tracing::debug!(id = %task.id, status = %task.status, "task status updated");
        Ok(())
    }

    // === Document Operations ===

    /// Insert a document. It becomes the first entry of `list_documents`.
    pub fn add_document(&mut self, doc: &Document) -> Result<()> {
        let size = i64::try_from(doc.size).map_err(|_| {
            Error::InvalidInput(format!("File size too large: {} bytes", doc.size))
        })?;
        self.conn.execute(
            "INSERT INTO documents (id, project_id, name, doc_type, url, uploaded_by, uploaded_at, size)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                doc.id,
                doc.project_id,
                doc.name,
                doc.doc_type,
                doc.url,
                doc.uploaded_by,
                ts(&doc.uploaded_at),
                size,
            ],
        )?;
        tracing::debug!(id = %doc.id, project = %doc.project_id, "document added");
        Ok(())
    }

    /// Documents, newest first, optionally for one project.
    pub fn list_documents(&self, project_id: Option<&str>) -> Result<Vec<Document>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, project_id, name, doc_type, url, uploaded_by, uploaded_at, size
             FROM documents
             WHERE ?1 IS NULL OR project_id = ?1
             ORDER BY seq DESC",
        )?;
        let docs = stmt
            .query_map([project_id], document_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(docs)
    }

    // === Chat Operations ===

    pub fn add_channel(&mut self, channel: &Channel) -> Result<()> {
        self.conn.execute(
            "INSERT INTO channels (id, name, kind) VALUES (?1, ?2, ?3)",
            params![channel.id, channel.name, channel.kind.as_str()],
        )?;
        Ok(())
    }

    pub fn list_channels(&self) -> Result<Vec<Channel>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, kind FROM channels ORDER BY seq")?;
        let channels = stmt
            .query_map([], |row| {
                let kind: String = row.get(2)?;
                Ok(Channel {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    kind: parse_col(2, &kind)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(channels)
    }

    pub fn get_channel(&self, id: &str) -> Result<Option<Channel>> {
        Ok(self.list_channels()?.into_iter().find(|c| c.id == id))
    }

    /// Append a message to the end of its channel.
    pub fn add_message(&mut self, message: &ChatMessage) -> Result<()> {
        self.conn.execute(
            "INSERT INTO messages (id, channel_id, sender_id, content, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                message.id,
                message.channel_id,
                message.sender_id,
                message.content,
                ts(&message.timestamp),
            ],
        )?;
        tracing::debug!(id = %message.id, channel = %message.channel_id, "message appended");
        Ok(())
    }

    /// Messages of one channel, oldest first.
    pub fn list_messages(&self, channel_id: &str) -> Result<Vec<ChatMessage>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, channel_id, sender_id, content, timestamp
             FROM messages WHERE channel_id = ? ORDER BY seq ASC",
        )?;
        let messages = stmt
            .query_map([channel_id], |row| {
                let timestamp: String = row.get(4)?;
                Ok(ChatMessage {
                    id: row.get(0)?,
                    channel_id: row.get(1)?,
                    sender_id: row.get(2)?,
                    content: row.get(3)?,
                    timestamp: parse_ts(4, &timestamp)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(messages)
    }

    // === Decision Operations ===

    pub fn add_decision(&mut self, decision: &Decision) -> Result<()> {
        let outcomes = serde_json::to_string(&decision.outcomes)?;
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO decisions (id, project_id, title, description, made_by, date, outcomes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                decision.id,
                decision.project_id,
                decision.title,
                decision.description,
                decision.made_by,
                ts(&decision.date),
                outcomes,
            ],
        )?;
        for (position, tag) in decision.tags.iter().enumerate() {
            tx.execute(
                "INSERT INTO decision_tags (decision_id, tag, position)
                 VALUES (?1, ?2, ?3)",
                params![decision.id, tag, position as i64],
            )?;
        }
        tx.commit()?;
        tracing::debug!(id = %decision.id, project = %decision.project_id, "decision added");
        Ok(())
    }

    pub fn get_decision(&self, id: &str) -> Result<Decision> {
        let mut decision = self
            .conn
            .query_row(
                "SELECT id, project_id, title, description, made_by, date, outcomes
                 FROM decisions WHERE id = ?",
                [id],
                decision_from_row,
            )
            .optional()?
            .ok_or_else(|| Error::NotFound(format!("Decision not found: {}", id)))?;

        let mut stmt = self.conn.prepare(
            "SELECT tag FROM decision_tags WHERE decision_id = ? ORDER BY position",
        )?;
        decision.tags = stmt
            .query_map([id], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(decision)
    }

    /// Decisions, newest date first; equal dates keep the later insertion first.
    pub fn list_decisions(
        &self,
        project_id: Option<&str>,
        tag: Option<&str>,
    ) -> Result<Vec<Decision>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT d.id, d.date, d.seq FROM decisions d
             LEFT JOIN decision_tags dt ON d.id = dt.decision_id
             WHERE (?1 IS NULL OR d.project_id = ?1) AND (?2 IS NULL OR dt.tag = ?2)
             ORDER BY d.date DESC, d.seq DESC",
        )?;
        let ids = stmt
            .query_map(params![project_id, tag], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        ids.iter().map(|id| self.get_decision(id)).collect()
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed-width UTC timestamp so text order matches time order.
fn ts(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn conversion_error(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into())
}

fn parse_ts(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, format!("bad timestamp {:?}: {}", raw, e)))
}

fn parse_col<T: std::str::FromStr<Err = String>>(idx: usize, raw: &str) -> rusqlite::Result<T> {
    raw.parse::<T>().map_err(|e| conversion_error(idx, e))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let profile_type: String = row.get(3)?;
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        profile_type: parse_col(3, &profile_type)?,
        role: row.get(4)?,
        bio: row.get(5)?,
    })
}

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    let methodology: String = row.get(3)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        methodology: parse_col(3, &methodology)?,
        owner_id: row.get(4)?,
        team_member_ids: Vec::new(),
        created_at: parse_ts(5, &created_at)?,
        updated_at: parse_ts(6, &updated_at)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let due_date: Option<String> = row.get(4)?;
    let status: String = row.get(5)?;
    let previous_status: Option<String> = row.get(6)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;
    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        assignee_ids: Vec::new(),
        due_date: due_date
            .map(|d| {
                NaiveDate::parse_from_str(&d, DATE_FORMAT)
                    .map_err(|e| conversion_error(4, format!("bad date {:?}: {}", d, e)))
            })
            .transpose()?,
        status: parse_col(5, &status)?,
        previous_status: previous_status
            .map(|s| parse_col(6, &s))
            .transpose()?,
        created_at: parse_ts(7, &created_at)?,
        updated_at: parse_ts(8, &updated_at)?,
    })
}

fn document_from_row(row: &Row<'_>) -> rusqlite::Result<Document> {
    let uploaded_at: String = row.get(6)?;
    let size: i64 = row.get(7)?;
    Ok(Document {
        id: row.get(0)?,
        project_id: row.get(1)?,
        name: row.get(2)?,
        doc_type: row.get(3)?,
        url: row.get(4)?,
        uploaded_by: row.get(5)?,
        uploaded_at: parse_ts(6, &uploaded_at)?,
        size: u64::try_from(size).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(7, size))?,
    })
}

fn decision_from_row(row: &Row<'_>) -> rusqlite::Result<Decision> {
    let date: String = row.get(5)?;
    let outcomes: String = row.get(6)?;
    Ok(Decision {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        made_by: row.get(4)?,
        date: parse_ts(5, &date)?,
        outcomes: serde_json::from_str(&outcomes)
            .map_err(|e| conversion_error(6, format!("bad outcomes: {}", e)))?,
        tags: Vec::new(),
    })
}
