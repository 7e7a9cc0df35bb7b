//! Mock data every session starts from.
//!
//! Relative dates (chat history, decisions, uploads) are anchored at the
//! session clock so the seed always looks recent. Listings that show the
//! newest entry first are loaded in reverse, which keeps the display order
//! identical to the order written here.

use super::Store;
use crate::Result;
use crate::models::{
    Channel, ChannelKind, ChatMessage, Decision, Document, Methodology, PLACEHOLDER_URL,
    ProfileType, Project, Task, TaskStatus, User,
};
use crate::session::DEFAULT_USER_ID;
use chrono::{DateTime, Duration, NaiveDate, Utc};

struct SeedUser {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    profile_type: ProfileType,
    role: &'static str,
}

const USERS: &[SeedUser] = &[
    SeedUser {
        id: DEFAULT_USER_ID,
        name: "Alicia Gómez",
        email: "alicia@collabcut.dev",
        profile_type: ProfileType::Developer,
        role: "Project Manager",
    },
    SeedUser {
        id: "user2",
        name: "Roberto",
        email: "roberto@collabcut.dev",
        profile_type: ProfileType::Developer,
        role: "Lead Developer",
    },
    SeedUser {
        id: "user3",
        name: "Carol",
        email: "carol@collabcut.dev",
        profile_type: ProfileType::Developer,
        role: "UX Designer",
    },
    SeedUser {
        id: "user4",
        name: "David",
        email: "david@collabcut.dev",
        profile_type: ProfileType::Developer,
        role: "Backend Engineer",
    },
    SeedUser {
        id: "user5",
        name: "Elena Ruiz",
        email: "elena@northwind.example",
        profile_type: ProfileType::Client,
        role: "Product Owner",
    },
];

struct SeedProject {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    methodology: Methodology,
    owner: &'static str,
    team: &'static [&'static str],
    created_days_ago: i64,
}

const PROJECTS: &[SeedProject] = &[
    SeedProject {
        id: "1",
        name: "E-commerce Platform Revamp",
        description: "A complete overhaul of the existing e-commerce platform to improve \
                      user experience, performance and scalability.",
        methodology: Methodology::Agile,
        owner: DEFAULT_USER_ID,
        team: &[DEFAULT_USER_ID, "user2", "user3", "user4"],
        created_days_ago: 120,
    },
    SeedProject {
        id: "2",
        name: "Mobile App Development",
        description: "Build a cross-platform mobile application for the Q3 launch.",
        methodology: Methodology::Scrum,
        owner: DEFAULT_USER_ID,
        team: &[DEFAULT_USER_ID, "user3", "user5"],
        created_days_ago: 60,
    },
    SeedProject {
        id: "3",
        name: "Marketing Campaign",
        description: "Launch a new marketing campaign and refresh the marketing site for Q3.",
        methodology: Methodology::Kanban,
        owner: "user2",
        team: &["user2", "user4", DEFAULT_USER_ID],
        created_days_ago: 45,
    },
];

struct SeedTask {
    id: &'static str,
    project: &'static str,
    title: &'static str,
    description: Option<&'static str>,
    assignees: &'static [&'static str],
    due_in_days: Option<i64>,
    status: TaskStatus,
    created_days_ago: i64,
}

const TASKS: &[SeedTask] = &[
    SeedTask {
        id: "t1",
        project: "1",
        title: "User research and persona definition",
        description: Some("Interview ten customers and consolidate the findings into personas."),
        assignees: &["user2"],
        due_in_days: Some(-14),
        status: TaskStatus::Done,
        created_days_ago: 40,
    },
    SeedTask {
        id: "t2",
        project: "1",
        title: "Checkout wireframes",
        description: None,
        assignees: &[DEFAULT_USER_ID, "user3"],
        due_in_days: Some(7),
        status: TaskStatus::InProgress,
        created_days_ago: 30,
    },
    SeedTask {
        id: "t3",
        project: "1",
        title: "Develop backend API",
        description: Some("Catalog, cart and order endpoints."),
        assignees: &["user4"],
        due_in_days: Some(21),
        status: TaskStatus::Todo,
        created_days_ago: 20,
    },
    SeedTask {
        id: "t4",
        project: "1",
        title: "Frontend development - home page",
        description: None,
        assignees: &[DEFAULT_USER_ID, "user3"],
        due_in_days: Some(35),
        status: TaskStatus::Todo,
        created_days_ago: 10,
    },
    SeedTask {
        id: "t5",
        project: "2",
        title: "Implement push notifications",
        description: None,
        assignees: &[DEFAULT_USER_ID],
        due_in_days: Some(14),
        status: TaskStatus::Todo,
        created_days_ago: 12,
    },
    SeedTask {
        id: "t6",
        project: "3",
        title: "Write new blog content",
        description: None,
        assignees: &[DEFAULT_USER_ID],
        due_in_days: None,
        status: TaskStatus::Done,
        created_days_ago: 25,
    },
];

struct SeedDocument {
    id: &'static str,
    project: &'static str,
    name: &'static str,
    uploaded_by: &'static str,
    days_ago: i64,
    size: u64,
}

const DOCUMENTS: &[SeedDocument] = &[
    SeedDocument {
        id: "doc1",
        project: "1",
        name: "Project Charter v2.pdf",
        uploaded_by: DEFAULT_USER_ID,
        days_ago: 5,
        size: 2_400_000,
    },
    SeedDocument {
        id: "doc2",
        project: "1",
        name: "User Stories.xlsx",
        uploaded_by: "user2",
        days_ago: 3,
        size: 120_000,
    },
    SeedDocument {
        id: "doc3",
        project: "2",
        name: "API Documentation.docx",
        uploaded_by: "user3",
        days_ago: 2,
        size: 850_000,
    },
    SeedDocument {
        id: "doc4",
        project: "2",
        name: "Design Mockups_v3.zip",
        uploaded_by: DEFAULT_USER_ID,
        days_ago: 1,
        size: 25_000_000,
    },
    SeedDocument {
        id: "doc5",
        project: "3",
        name: "Competitor Analysis.pptx",
        uploaded_by: "user4",
        days_ago: 10,
        size: 5_300_000,
    },
];

const CHANNELS: &[(&str, ChannelKind)] = &[
    ("general", ChannelKind::Public),
    ("dev-team", ChannelKind::Public),
    ("marketing", ChannelKind::Public),
    ("random", ChannelKind::Public),
    ("project-alpha", ChannelKind::Project),
];

/// (id, channel, sender, content, minutes ago)
const MESSAGES: &[(&str, &str, &str, &str, i64)] = &[
    ("msg1", "general", "user2", "Good morning everyone!", 120),
    (
        "msg2",
        "general",
        "user3",
        "Morning Roberto! Has anyone seen the latest designs for Project Alpha?",
        58,
    ),
    (
        "msg3",
        "general",
        DEFAULT_USER_ID,
        "Hi Carol, I just shared them in #project-alpha.",
        55,
    ),
    ("msg4", "general", "user4", "Thanks! Taking a look now.", 50),
    (
        "m1",
        "1",
        "user2",
        "Hi team, how are the wireframes coming along?",
        30,
    ),
    (
        "m2",
        "1",
        "user3",
        "Going well! I should have a draft by the end of the day.",
        25,
    ),
    (
        "m3",
        "1",
        DEFAULT_USER_ID,
        "Great, let's sync tomorrow morning to review.",
        15,
    ),
];

struct SeedDecision {
    id: &'static str,
    project: &'static str,
    title: &'static str,
    description: &'static str,
    made_by: &'static str,
    days_ago: i64,
    outcomes: &'static [&'static str],
    tags: &'static [&'static str],
}

const DECISIONS: &[SeedDecision] = &[
    SeedDecision {
        id: "dec1",
        project: "1",
        title: "Adopt Next.js for the frontend rebuild",
        description: "After evaluating several frameworks the team chose Next.js for its \
                      rendering performance and ecosystem.",
        made_by: "Tech Leads Council",
        days_ago: 30,
        outcomes: &["Improved SEO", "Faster page loads", "Better DX"],
        tags: &["Technology", "Frontend", "Critical"],
    },
    SeedDecision {
        id: "dec2",
        project: "1",
        title: "Prioritize a mobile-first design approach",
        description: "More than 60% of traffic comes from mobile devices, so every UI \
                      design starts from the mobile layout.",
        made_by: "UX Department",
        days_ago: 25,
        outcomes: &["Better mobile UX", "Higher mobile conversion"],
        tags: &["UX", "Design", "Strategy"],
    },
    SeedDecision {
        id: "dec3",
        project: "2",
        title: "Integrate Stripe for payments",
        description: "Stripe replaces the legacy in-house payment system thanks to its \
                      developer-friendly APIs.",
        made_by: "Product Team",
        days_ago: 15,
        outcomes: &["Simplified payment processing", "PCI compliance"],
        tags: &["Integration", "Payments", "Feature"],
    },
    SeedDecision {
        id: "dec4",
        project: "3",
        title: "Move to a headless CMS",
        description: "The marketing site migrates to a headless CMS for flexible content \
                      and omnichannel distribution.",
        made_by: "Marketing & DevOps",
        days_ago: 10,
        outcomes: &["Faster content updates", "Improved site speed"],
        tags: &["CMS", "Infrastructure", "Marketing"],
    },
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn days_from(now: DateTime<Utc>, days: i64) -> NaiveDate {
    (now + Duration::days(days)).date_naive()
}

/// Load the mock seed into an empty store.
pub fn load(store: &mut Store, now: DateTime<Utc>) -> Result<()> {
    for u in USERS {
        store.add_user(&User {
            id: u.id.to_string(),
            name: u.name.to_string(),
            email: u.email.to_string(),
            profile_type: u.profile_type,
            role: Some(u.role.to_string()),
            bio: None,
        })?;
    }

    for p in PROJECTS.iter().rev() {
        let created = now - Duration::days(p.created_days_ago);
        store.add_project(&Project {
            id: p.id.to_string(),
            name: p.name.to_string(),
            description: p.description.to_string(),
            methodology: p.methodology,
            owner_id: p.owner.to_string(),
            team_member_ids: strings(p.team),
            created_at: created,
            updated_at: created,
        })?;
    }

    for t in TASKS.iter().rev() {
        let created = now - Duration::days(t.created_days_ago);
        let mut task = Task::new(
            t.id.to_string(),
            t.project.to_string(),
            t.title.to_string(),
            strings(t.assignees),
            created,
        );
        task.description = t.description.map(str::to_string);
        task.due_date = t.due_in_days.map(|d| days_from(now, d));
        task.status = t.status;
        store.add_task(&task)?;
    }

    for d in DOCUMENTS.iter().rev() {
        store.add_document(&Document {
            id: d.id.to_string(),
            project_id: d.project.to_string(),
            name: d.name.to_string(),
            doc_type: crate::models::file_extension(d.name),
            url: PLACEHOLDER_URL.to_string(),
            uploaded_by: d.uploaded_by.to_string(),
            uploaded_at: now - Duration::days(d.days_ago),
            size: d.size,
        })?;
    }

    for (id, kind) in CHANNELS {
        store.add_channel(&Channel {
            id: id.to_string(),
            name: id.to_string(),
            kind: *kind,
        })?;
    }

    for (id, channel, sender, content, minutes_ago) in MESSAGES {
        store.add_message(&ChatMessage {
            id: id.to_string(),
            channel_id: channel.to_string(),
            sender_id: sender.to_string(),
            content: content.to_string(),
            timestamp: now - Duration::minutes(*minutes_ago),
        })?;
    }

    for d in DECISIONS {
        store.add_decision(&Decision {
            id: d.id.to_string(),
            project_id: d.project.to_string(),
            title: d.title.to_string(),
            description: d.description.to_string(),
            made_by: d.made_by.to_string(),
            date: now - Duration::days(d.days_ago),
            outcomes: strings(d.outcomes),
            tags: strings(d.tags),
        })?;
    }

    tracing::debug!(
        users = USERS.len(),
        projects = PROJECTS.len(),
        tasks = TASKS.len(),
        "mock seed loaded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskFilter;
    use chrono::TimeZone;

    fn seeded() -> Store {
        Store::seeded(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_seed_display_order_matches_declaration() {
        let store = seeded();
        assert_eq!(store.project_ids().unwrap(), vec!["1", "2", "3"]);

        let tasks: Vec<String> = store
            .list_tasks(&TaskFilter::default())
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(tasks, vec!["t1", "t2", "t3", "t4", "t5", "t6"]);

        let docs = store.list_documents(None).unwrap();
        assert_eq!(docs[0].id, "doc1");
        assert_eq!(docs[3].doc_type, "zip");
    }

    #[test]
    fn test_seed_decisions_newest_first() {
        let store = seeded();
        let ids: Vec<String> = store
            .list_decisions(None, None)
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["dec4", "dec3", "dec2", "dec1"]);
    }

    #[test]
    fn test_seed_session_user_has_tasks() {
        let store = seeded();
        let mine = store
            .list_tasks(&TaskFilter {
                assignee_id: Some(DEFAULT_USER_ID),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(mine.len(), 4);
        assert!(store.get_user(DEFAULT_USER_ID).is_ok());
    }

    #[test]
    fn test_seed_chat_channels() {
        let store = seeded();
        assert_eq!(store.list_channels().unwrap().len(), 5);
        assert_eq!(store.list_messages("general").unwrap().len(), 4);
        assert_eq!(store.list_messages("1").unwrap()[0].id, "m1");
    }
}
