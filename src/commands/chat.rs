//! Chat: channels, history with sender grouping, and message append.

use super::{App, Output, UNKNOWN_USER, json, rejected};
use crate::forms::ValidationErrors;
use crate::models::{Channel, ChannelKind, ChatMessage};
use crate::routes::Route;
use crate::store::ids::MESSAGE_PREFIX;
use crate::{Error, Result};
use chrono::TimeDelta;
use serde::Serialize;
use std::collections::HashMap;

/// A message as displayed in a channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChatEntry {
    #[serde(flatten)]
    pub message: ChatMessage,
    pub sender_name: String,
    /// Whether sender name and time are shown above this message
    pub show_header: bool,
    /// Sent by the session user
    pub own: bool,
}

/// Decide which messages start a new group.
///
/// A message joins the group of the previous message when both come from the
/// same sender and the gap between them is at most `window_secs`. Messages
/// are expected to belong to one channel, oldest first.
pub fn group_messages(
    messages: Vec<ChatMessage>,
    names: &HashMap<String, String>,
    session_user: &str,
    window_secs: u64,
) -> Vec<ChatEntry> {
    let window = i64::try_from(window_secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX);
    let mut entries: Vec<ChatEntry> = Vec::with_capacity(messages.len());
    for message in messages {
        let show_header = match entries.last() {
            None => true,
            Some(prev) => {
                let gap = message.timestamp - prev.message.timestamp;
                prev.message.sender_id != message.sender_id || gap > window
            }
        };
        entries.push(ChatEntry {
            sender_name: names
                .get(&message.sender_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_USER.to_string()),
            own: message.sender_id == session_user,
            show_header,
            message,
        });
    }
    entries
}

#[derive(Debug, Serialize)]
pub struct ChannelList {
    pub channels: Vec<Channel>,
}

impl Output for ChannelList {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec!["Channels:".to_string()];
        for c in self.channels.iter().filter(|c| c.kind == ChannelKind::Public) {
            lines.push(format!("  #{}", c.name));
        }
        lines.push("Projects:".to_string());
        for c in self.channels.iter().filter(|c| c.kind == ChannelKind::Project) {
            lines.push(format!("  #{} ({})", c.name, c.id));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct ChatHistory {
    pub channel_id: String,
    pub messages: Vec<ChatEntry>,
}

impl Output for ChatHistory {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.messages.is_empty() {
            return format!("#{}: no messages yet.", self.channel_id);
        }
        let mut lines = vec![format!("#{}", self.channel_id)];
        for entry in &self.messages {
            if entry.show_header {
                let who = if entry.own { "You" } else { entry.sender_name.as_str() };
                lines.push(format!(
                    "{} {}",
                    who,
                    entry.message.timestamp.format("%H:%M")
                ));
            }
            lines.push(format!("    {}", entry.message.content));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Serialize)]
pub struct MessageSent {
    pub message: ChatMessage,
}

impl Output for MessageSent {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Sent {} to #{}",
            self.message.id, self.message.channel_id
        )
    }
}

impl App {
    /// Topic channels followed by one channel per project.
    fn all_channels(&self) -> Result<Vec<Channel>> {
        let mut channels = self.store.list_channels()?;
        channels.extend(self.store.list_projects()?.into_iter().map(|p| Channel {
            id: p.id,
            name: p.name,
            kind: ChannelKind::Project,
        }));
        Ok(channels)
    }

    fn channel_exists(&self, id: &str) -> Result<bool> {
        Ok(self.store.get_channel(id)?.is_some() || self.store.project_exists(id)?)
    }

    pub fn chat_channels(&self) -> Result<ChannelList> {
        self.guard(&Route::Communication)?;
        Ok(ChannelList {
            channels: self.all_channels()?,
        })
    }

    pub fn chat_history(&self, channel_id: &str) -> Result<ChatHistory> {
        self.guard(&Route::Communication)?;
        if !self.channel_exists(channel_id)? {
            return Err(Error::NotFound(format!("Channel not found: {}", channel_id)));
        }
        let messages = self.store.list_messages(channel_id)?;
        let names = self.user_names()?;
        Ok(ChatHistory {
            channel_id: channel_id.to_string(),
            messages: group_messages(
                messages,
                &names,
                self.session.user_id(),
                self.settings.chat_group_window,
            ),
        })
    }

    /// Append a message from the session user. Content is stored as typed.
    pub fn chat_send(&mut self, channel_id: &str, content: &str) -> Result<MessageSent> {
        self.guard(&Route::Communication)?;
        if content.trim().is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add("content", "Message cannot be empty.");
            return Err(rejected("message", errors));
        }
        if !self.channel_exists(channel_id)? {
            return Err(Error::NotFound(format!("Channel not found: {}", channel_id)));
        }

        let message = ChatMessage {
            id: self.next_id(MESSAGE_PREFIX),
            channel_id: channel_id.to_string(),
            sender_id: self.user_id(),
            content: content.to_string(),
            timestamp: self.now(),
        };
        self.store.add_message(&message)?;
        tracing::info!(id = %message.id, channel = %message.channel_id, "message sent");
        Ok(MessageSent { message })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn msg(id: &str, sender: &str, minutes: i64) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            channel_id: "general".to_string(),
            sender_id: sender.to_string(),
            content: format!("message {}", id),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
                + Duration::minutes(minutes),
        }
    }

    fn names() -> HashMap<String, String> {
        HashMap::from([("a".to_string(), "Ann".to_string())])
    }

    #[test]
    fn test_grouping_by_sender_and_gap() {
        let entries = group_messages(
            vec![
                msg("1", "a", 0),
                msg("2", "a", 5),
                msg("3", "a", 11),
                msg("4", "b", 12),
                msg("5", "a", 13),
            ],
            &names(),
            "a",
            300,
        );
        let headers: Vec<bool> = entries.iter().map(|e| e.show_header).collect();
        // exactly 5 minutes is still grouped, 6 is not
        assert_eq!(headers, vec![true, false, true, true, true]);
        assert!(entries[0].own);
        assert_eq!(entries[3].sender_name, UNKNOWN_USER);
    }

    #[test]
    fn test_gap_just_over_window_starts_group() {
        let first = msg("1", "a", 0);
        let mut second = msg("2", "a", 5);
        second.timestamp += Duration::milliseconds(500);
        let entries = group_messages(vec![first, second], &names(), "a", 300);
        assert!(entries[1].show_header);
    }

    #[test]
    fn test_grouping_window_is_configurable() {
        let entries = group_messages(
            vec![msg("1", "a", 0), msg("2", "a", 2)],
            &names(),
            "x",
            60,
        );
        assert!(entries[1].show_header);
    }

    #[test]
    fn test_send_appends_to_channel() {
        let (mut app, clock, _) = seeded_app();
        clock.advance(Duration::minutes(1));
        let sent = app.chat_send("general", "  Standup in 5  ").unwrap().message;
        assert_eq!(sent.content, "  Standup in 5  ");
        assert_eq!(sent.sender_id, "currentUser");

        let history = app.chat_history("general").unwrap();
        let last = history.messages.last().unwrap();
        assert_eq!(last.message.id, sent.id);
        assert!(last.own);
    }

    #[test]
    fn test_send_to_project_channel() {
        let (mut app, _, _) = seeded_app();
        app.chat_send("2", "Kickoff notes are up").unwrap();
        assert_eq!(app.chat_history("2").unwrap().messages.len(), 1);
    }

    #[test]
    fn test_blank_message_is_rejected() {
        let (mut app, _, _) = seeded_app();
        assert!(matches!(
            app.chat_send("general", " \t "),
            Err(Error::Validation(_))
        ));
        assert_eq!(app.chat_history("general").unwrap().messages.len(), 4);
    }

    #[test]
    fn test_unknown_channel() {
        let (mut app, _, _) = seeded_app();
        assert!(matches!(app.chat_send("nowhere", "hi"), Err(Error::NotFound(_))));
        assert!(matches!(app.chat_history("nowhere"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_channels_include_projects() {
        let (app, _, _) = seeded_app();
        let list = app.chat_channels().unwrap();
        assert_eq!(list.channels.len(), 8);
        assert_eq!(list.channels[5].kind, ChannelKind::Project);
    }
}
