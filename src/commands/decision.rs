//! Decision timeline.

use super::{App, Output, json, rejected};
use crate::Result;
use crate::forms::DecisionForm;
use crate::models::Decision;
use crate::notify::Notification;
use crate::routes::Route;
use crate::store::ids::DECISION_PREFIX;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DecisionRow {
    #[serde(flatten)]
    pub decision: Decision,
    pub project_name: String,
}

/// The timeline, newest first.
#[derive(Debug, Serialize)]
pub struct DecisionList {
    pub decisions: Vec<DecisionRow>,
    pub count: usize,
}

impl Output for DecisionList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.decisions.is_empty() {
            return "No decisions recorded.".to_string();
        }
        let mut lines = Vec::new();
        for row in &self.decisions {
            let d = &row.decision;
            lines.push(format!(
                "{}  {} [{}]",
                d.date.format("%Y-%m-%d"),
                d.title,
                row.project_name
            ));
            lines.push(format!("    by {}: {}", d.made_by, d.description));
            if !d.outcomes.is_empty() {
                lines.push(format!("    Outcomes: {}", d.outcomes.join(", ")));
            }
            if !d.tags.is_empty() {
                lines.push(format!("    Tags: {}", d.tags.join(", ")));
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct DecisionCreated {
    pub decision: Decision,
    /// Index of the new decision in the re-sorted timeline
    pub position: usize,
}

impl Output for DecisionCreated {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Recorded decision {} \"{}\" (timeline position {})",
            self.decision.id,
            self.decision.title,
            self.position + 1
        )
    }
}

impl App {
    pub fn decision_list(&self, project_id: Option<&str>, tag: Option<&str>) -> Result<DecisionList> {
        self.guard(&Route::Timeline)?;
        let names = self.project_names()?;
        let decisions: Vec<DecisionRow> = self
            .store
            .list_decisions(project_id, tag)?
            .into_iter()
            .map(|decision| DecisionRow {
                project_name: names.get(&decision.project_id).cloned().unwrap_or_default(),
                decision,
            })
            .collect();
        Ok(DecisionList {
            count: decisions.len(),
            decisions,
        })
    }

    /// Record a decision dated now and report where it landed on the timeline.
    pub fn decision_create(&mut self, form: &DecisionForm) -> Result<DecisionCreated> {
        self.guard(&Route::Timeline)?;
        let known = self.store.project_ids()?;
        let input = form.validate(&known).map_err(|e| rejected("decision", e))?;

        let date = self.now();
        let decision = Decision {
            id: self.next_id(DECISION_PREFIX),
            project_id: input.project_id,
            title: input.title,
            description: input.description,
            made_by: input.made_by,
            date,
            outcomes: input.outcomes,
            tags: input.tags,
        };
        self.store.add_decision(&decision)?;

        let position = self
            .store
            .list_decisions(None, None)?
            .iter()
            .position(|d| d.id == decision.id)
            .unwrap_or_default();

        tracing::info!(id = %decision.id, project = %decision.project_id, position, "decision recorded");
        self.notify(Notification::info(
            "Decision Recorded",
            format!(
                "The decision \"{}\" has been added to the timeline.",
                decision.title
            ),
        ));
        Ok(DecisionCreated { decision, position })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::Error;
    use crate::forms::DecisionForm;
    use chrono::Duration;

    fn form(project_id: &str) -> DecisionForm {
        DecisionForm {
            title: "Adopt trunk-based development".to_string(),
            description: "Short-lived branches merged daily".to_string(),
            made_by: "Engineering".to_string(),
            project_id: project_id.to_string(),
            outcomes: "Fewer conflicts, faster reviews,".to_string(),
            tags: " Process , ".to_string(),
        }
    }

    #[test]
    fn test_new_decision_is_first_on_timeline() {
        let (mut app, _, toasts) = seeded_app();
        let created = app.decision_create(&form("2")).unwrap();
        assert_eq!(created.position, 0);
        assert_eq!(created.decision.outcomes, vec!["Fewer conflicts", "faster reviews"]);
        assert_eq!(created.decision.tags, vec!["Process"]);

        let list = app.decision_list(None, None).unwrap();
        assert_eq!(list.count, 5);
        assert_eq!(list.decisions[0].decision.id, created.decision.id);
        assert_eq!(list.decisions[0].project_name, "Mobile App Development");
        assert_eq!(toasts.drain()[0].title, "Decision Recorded");
    }

    #[test]
    fn test_same_instant_decisions_newest_first() {
        let (mut app, _, _) = seeded_app();
        let first = app.decision_create(&form("1")).unwrap().decision;
        let second = app.decision_create(&form("1")).unwrap().decision;
        assert_eq!(first.date, second.date);
        assert_ne!(first.id, second.id);

        let list = app.decision_list(None, None).unwrap();
        assert_eq!(list.decisions[0].decision.id, second.id);
        assert_eq!(list.decisions[1].decision.id, first.id);
    }

    #[test]
    fn test_later_decision_goes_first() {
        let (mut app, clock, _) = seeded_app();
        app.decision_create(&form("1")).unwrap();
        clock.advance(Duration::hours(1));
        let later = app.decision_create(&form("3")).unwrap();
        assert_eq!(later.position, 0);
    }

    #[test]
    fn test_unknown_project_is_rejected() {
        let (mut app, _, _) = seeded_app();
        match app.decision_create(&form("project-x")).unwrap_err() {
            Error::Validation(errors) => {
                assert_eq!(errors.get("project_id"), Some("Selected project is not valid."))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_repeated_tags_stored_as_typed() {
        let (mut app, _, _) = seeded_app();
        let mut f = form("1");
        f.tags = "ux, ux".to_string();
        let created = app.decision_create(&f).unwrap();
        assert_eq!(created.decision.tags, vec!["ux", "ux"]);

        let listed = app.decision_list(Some("1"), Some("ux")).unwrap();
        assert_eq!(listed.count, 1);
        assert_eq!(listed.decisions[0].decision.tags, created.decision.tags);
    }

    #[test]
    fn test_filter_by_tag() {
        let (app, _, _) = seeded_app();
        let ux = app.decision_list(None, Some("UX")).unwrap();
        assert_eq!(ux.count, 1);
        assert_eq!(ux.decisions[0].decision.id, "dec2");
    }
}
