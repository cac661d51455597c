use chrono::{DateTime, Local};

use crate::core::constants::TURN_TIMESTAMP_FORMAT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used in exported transcripts.
    pub fn export_label(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
        }
    }
}

/// One message in the conversation. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    content: String,
    timestamp: String,
}

impl Turn {
    /// Build a turn stamped with the current local time.
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self::at(role, content, Local::now())
    }

    pub fn at(role: Role, content: impl Into<String>, when: DateTime<Local>) -> Self {
        Self::with_timestamp(
            role,
            content,
            when.format(TURN_TIMESTAMP_FORMAT).to_string(),
        )
    }

    pub fn with_timestamp(
        role: Role,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::now(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::now(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}
