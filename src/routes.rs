//! Page routes, the navigation menu and the authentication gate.

use crate::session::SessionProvider;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// A page the user can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Dashboard,
    Projects,
    ProjectDetail(String),
    Tasks,
    Communication,
    Documents,
    Timeline,
    Profile,
    Login,
    Register,
}

impl Route {
    /// Parse a path such as `/projects/42`. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .skip(1)
            .filter(|s| !s.is_empty())
            .collect();
        if !path.starts_with('/') {
            return None;
        }
        match segments.as_slice() {
            [] => Some(Route::Home),
            ["dashboard"] => Some(Route::Dashboard),
            ["projects"] => Some(Route::Projects),
            ["projects", id] => Some(Route::ProjectDetail(id.to_string())),
            ["tasks"] => Some(Route::Tasks),
            ["communication"] => Some(Route::Communication),
            ["documents"] => Some(Route::Documents),
            ["timeline"] => Some(Route::Timeline),
            ["profile"] => Some(Route::Profile),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::ProjectDetail(id) => format!("/projects/{}", id),
            Route::Tasks => "/tasks".to_string(),
            Route::Communication => "/communication".to_string(),
            Route::Documents => "/documents".to_string(),
            Route::Timeline => "/timeline".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Home | Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Where the user ends up after a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "path", rename_all = "snake_case")]
pub enum Navigation {
    /// The requested page is shown
    Allowed(String),
    /// The user is sent elsewhere
    Redirect(String),
}

impl Navigation {
    pub fn path(&self) -> &str {
        match self {
            Navigation::Allowed(p) | Navigation::Redirect(p) => p,
        }
    }
}

/// Resolve a navigation request against the session.
pub fn resolve(route: &Route, session: &dyn SessionProvider) -> Navigation {
    if route.requires_auth() && !session.is_authenticated() {
        tracing::warn!(requested = %route, "unauthenticated request redirected to login");
        Navigation::Redirect(Route::Login.path())
    } else {
        Navigation::Allowed(route.path())
    }
}

/// Gate a command behind its page route.
pub fn guard(route: &Route, session: &dyn SessionProvider) -> Result<()> {
    match resolve(route, session) {
        Navigation::Allowed(_) => Ok(()),
        Navigation::Redirect(redirect) => Err(Error::Unauthenticated { redirect }),
    }
}

/// An entry of the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub tooltip: &'static str,
    pub auth_required: bool,
}

const fn item(
    href: &'static str,
    label: &'static str,
    tooltip: &'static str,
    auth_required: bool,
) -> NavItem {
    NavItem {
        href,
        label,
        tooltip,
        auth_required,
    }
}

pub const NAV_LINKS_MAIN: [NavItem; 6] = [
    item("/dashboard", "Dashboard", "Dashboard", true),
    item("/projects", "Projects", "Manage projects", true),
    item("/tasks", "My Tasks", "Your tasks", true),
    item("/communication", "Chat", "Team chat", true),
    item("/documents", "Documents", "Project files", true),
    item("/timeline", "Decisions", "Project timeline", true),
];

pub const NAV_LINKS_USER: [NavItem; 1] = [item("/profile", "Profile", "Your profile", true)];

pub const NAV_LINKS_AUTH: [NavItem; 2] = [
    item("/login", "Sign In", "Sign in", false),
    item("/register", "Register", "Create an account", false),
];

/// Menu entries visible for the session state.
pub fn nav_items(authenticated: bool) -> Vec<NavItem> {
    if authenticated {
        NAV_LINKS_MAIN
            .iter()
            .chain(NAV_LINKS_USER.iter())
            .cloned()
            .collect()
    } else {
        NAV_LINKS_AUTH.to_vec()
    }
}

/// A menu link is active on its own path and on any path below it.
pub fn is_active(href: &str, current_path: &str) -> bool {
    current_path == href || (href != "/" && current_path.starts_with(href))
}
