// ABOUTME: Chat event log models consumed by the derivation pipeline
// ABOUTME: Role-tagged text/voice/image/file events with a uniform text projection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Author of a chat event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventRole {
    /// The coached user
    User,
    /// The coach (AI or deterministic)
    Assistant,
}

/// Type-specific payload of a chat event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventPayload {
    /// Typed message
    Text {
        /// Message body
        text: String,
    },
    /// Voice note
    Voice {
        /// Transcript, when available
        #[serde(default, skip_serializing_if = "Option::is_none")]
        transcript: Option<String>,
        /// Duration in seconds
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_sec: Option<f64>,
    },
    /// Photo
    Image {
        /// Caption typed with the photo
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        /// Opaque storage reference
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    /// Attached file
    File {
        /// File name
        name: String,
        /// Extracted text, when available
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
}

/// One entry of the append-only chat log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Author
    pub role: EventRole,
    /// Epoch milliseconds
    pub ts: i64,
    /// Type-specific payload
    #[serde(flatten)]
    pub payload: EventPayload,
}

impl ChatEvent {
    /// Convenience constructor for a user text message
    #[must_use]
    pub fn user_text(ts: i64, text: impl Into<String>) -> Self {
        Self {
            role: EventRole::User,
            ts,
            payload: EventPayload::Text { text: text.into() },
        }
    }

    /// Convenience constructor for an assistant text message
    #[must_use]
    pub fn assistant_text(ts: i64, text: impl Into<String>) -> Self {
        Self {
            role: EventRole::Assistant,
            ts,
            payload: EventPayload::Text { text: text.into() },
        }
    }

    /// Whether the user authored this event
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.role == EventRole::User
    }

    /// Event instant, if the epoch value is representable
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.ts).single()
    }

    /// Text the pipeline reads from this event
    #[must_use]
    pub fn text_projection(&self) -> Option<&str> {
        let text = match &self.payload {
            EventPayload::Text { text } => Some(text.as_str()),
            EventPayload::Voice { transcript, .. } => transcript.as_deref(),
            EventPayload::Image { caption, .. } => caption.as_deref(),
            EventPayload::File { name, text } => text.as_deref().or(Some(name.as_str())),
        };
        text.filter(|value| !value.trim().is_empty())
    }
}
