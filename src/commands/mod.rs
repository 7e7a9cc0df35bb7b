//! Command implementations for the Collabcut CLI.
//!
//! Each command is the view-model operation behind one page action. Commands
//! run against an [`App`], which bundles the session store with the injected
//! session, clock and notifier. Every command that reads or mutates session
//! data first passes the route guard for its page.
//!
//! Commands are organized by page:
//! - `project` - Project list, detail, creation and progress
//! - `task` - Task list, creation, toggle and status changes
//! - `decision` - Decision timeline
//! - `chat` - Channels, history grouping and message append
//! - `document` - Document list and mock upload
//! - `account` - Login, registration, logout and profile
//! - `nav` - Navigation menu and route resolution

mod account;
mod chat;
mod decision;
mod document;
mod nav;
mod project;
mod task;

pub use account::{AuthResult, LogoutResult, ProfileUpdated, ProfileView};
pub use chat::{ChannelList, ChatEntry, ChatHistory, MessageSent, group_messages};
pub use decision::{DecisionCreated, DecisionList, DecisionRow};
pub use document::{DocumentList, DocumentRow, DocumentUploaded, UploadRequest};
pub use nav::{NavEntry, NavMenu, NavigationResult};
pub use project::{ProjectCreated, ProjectDetail, ProjectList, ProjectProgressResult, ProjectRow};
pub use task::{TaskCreated, TaskDetail, TaskList, TaskQuery, TaskRow, TaskStatusChanged, toggled_status};

use crate::clock::{Clock, SystemClock};
use crate::config::{ResolvedConfig, ToggleBehavior};
use crate::config::schema::DEFAULT_CHAT_GROUP_WINDOW;
use crate::models::User;
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::routes::{self, Route};
use crate::session::{MockSession, SessionProvider};
use crate::store::Store;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Serialize a result for `Output::to_json`.
pub(crate) fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}

/// Display name used when a sender id matches no known user.
pub const UNKNOWN_USER: &str = "Unknown User";

/// Behavioural settings resolved from configuration.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub toggle_behavior: ToggleBehavior,
    /// Chat grouping window in seconds
    pub chat_group_window: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            toggle_behavior: ToggleBehavior::Reset,
            chat_group_window: DEFAULT_CHAT_GROUP_WINDOW,
        }
    }
}

impl From<&ResolvedConfig> for Settings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            toggle_behavior: config.toggle_behavior(),
            chat_group_window: config.chat_group_window(),
        }
    }
}

/// One session: the store plus the capabilities commands depend on.
pub struct App {
    store: Store,
    session: Box<dyn SessionProvider>,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
    settings: Settings,
}

impl App {
    /// Assemble a session. The session user gets a placeholder record if the
    /// store does not know it yet.
    pub fn new(
        mut store: Store,
        session: Box<dyn SessionProvider>,
        clock: Box<dyn Clock>,
        notifier: Box<dyn Notifier>,
        settings: Settings,
    ) -> Result<Self> {
        let user_id = session.user_id().to_string();
        match store.get_user(&user_id) {
            Ok(_) => {}
            Err(Error::NotFound(_)) => {
                tracing::debug!(user = %user_id, "adding placeholder record for session user");
                store.add_user(&User::new(user_id.clone(), user_id, String::new()))?;
            }
            Err(e) => return Err(e),
        }
        Ok(Self {
            store,
            session,
            clock,
            notifier,
            settings,
        })
    }

    /// Build the session the CLI runs: wall clock, mock sign-in, log notifications.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let clock = SystemClock;
        let store = if config.seed() {
            Store::seeded(clock.now())?
        } else {
            Store::new()?
        };
        Self::new(
            store,
            Box::new(MockSession::signed_in(config.current_user())),
            Box::new(clock),
            Box::new(TracingNotifier),
            Settings::from(config),
        )
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn session(&self) -> &dyn SessionProvider {
        self.session.as_ref()
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn user_id(&self) -> String {
        self.session.user_id().to_string()
    }

    fn guard(&self, route: &Route) -> Result<()> {
        routes::guard(route, self.session.as_ref())
    }

    fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let now = self.clock.now();
        self.store.next_id(prefix, now)
    }

    /// Display names by user id.
    fn user_names(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .store
            .list_users()?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect())
    }

    /// Project names by project id.
    fn project_names(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .store
            .list_projects()?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect())
    }
}

/// Log a rejected submission and turn it into an error.
fn rejected(form: &str, errors: crate::forms::ValidationErrors) -> Error {
    tracing::warn!(form, errors = %errors, "submission rejected");
    Error::Validation(errors)
}

/// Short local-independent timestamp for human output.
fn short_time(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}
