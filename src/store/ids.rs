//! Client-side id generation.
//!
//! Format: `<prefix><unix millis>` (e.g., "t1718000000000"). Ids are unique
//! within one session only. Two requests in the same millisecond, or a clock
//! that moved backwards, get `last + 1` so ids never repeat.

use chrono::{DateTime, Utc};

pub const PROJECT_PREFIX: &str = "p";
pub const TASK_PREFIX: &str = "t";
pub const DOCUMENT_PREFIX: &str = "doc";
pub const MESSAGE_PREFIX: &str = "msg";
pub const DECISION_PREFIX: &str = "dec";

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: &str, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis();
        let stamp = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(stamp);
        format!("{}{}", prefix, stamp)
    }
}
