//! Navigation menu and route resolution.

use super::{App, Output, json};
use crate::routes::{self, NavItem, Navigation, Route};
use crate::{Error, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NavEntry {
    #[serde(flatten)]
    pub item: NavItem,
    pub active: bool,
}

/// The menu as rendered for the session state.
#[derive(Debug, Serialize)]
pub struct NavMenu {
    pub authenticated: bool,
    pub current_path: String,
    pub items: Vec<NavEntry>,
}

impl Output for NavMenu {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        for entry in &self.items {
            let marker = if entry.active { '*' } else { ' ' };
            lines.push(format!(
                "{} {:<12} {:<16} {}",
                marker, entry.item.label, entry.item.href, entry.item.tooltip
            ));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct NavigationResult {
    pub requested: String,
    #[serde(flatten)]
    pub navigation: Navigation,
}

impl Output for NavigationResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        match &self.navigation {
            Navigation::Allowed(path) => format!("-> {}", path),
            Navigation::Redirect(path) => {
                format!("{} requires sign-in, redirected to {}", self.requested, path)
            }
        }
    }
}

impl App {
    pub fn nav(&self, current_path: &str) -> NavMenu {
        let authenticated = self.session.is_authenticated();
        NavMenu {
            authenticated,
            current_path: current_path.to_string(),
            items: routes::nav_items(authenticated)
                .into_iter()
                .map(|item| NavEntry {
                    active: routes::is_active(item.href, current_path),
                    item,
                })
                .collect(),
        }
    }

    pub fn navigate(&self, path: &str) -> Result<NavigationResult> {
        let route =
            Route::parse(path).ok_or_else(|| Error::NotFound(format!("Page not found: {}", path)))?;
        Ok(NavigationResult {
            requested: path.to_string(),
            navigation: routes::resolve(&route, self.session.as_ref()),
        })
    }
}
