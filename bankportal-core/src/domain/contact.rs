//! Contact message domain model

use serde::{Deserialize, Serialize};

/// A message sent through the contact form, with a snapshot of its sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

/// Body of the `sendMessage` mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub subject: String,
    pub message: String,
}

impl NewContactMessage {
    pub fn is_complete(&self) -> bool {
        !self.subject.is_empty() && !self.message.trim().is_empty()
    }
}

/// Admin filters for the contact message table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// One page of contact messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePage {
    pub messages: Vec<ContactMessage>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// Acknowledgement of `sendMessage`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub message: String,
    pub data: Option<SentMessageData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessageData {
    pub subject: String,
    pub message: String,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_completeness() {
        let msg = NewContactMessage { subject: "Cards".into(), message: "  ".into() };
        assert!(!msg.is_complete());

        let msg = NewContactMessage { subject: "".into(), message: "Hello".into() };
        assert!(!msg.is_complete());

        let msg = NewContactMessage { subject: "Cards".into(), message: "Hello".into() };
        assert!(msg.is_complete());
    }

    #[test]
    fn test_filters_skip_unset() {
        let filters = MessageFilters { city: Some("Beirut".into()), page: Some(2), ..Default::default() };
        let json = serde_json::to_value(filters).unwrap();
        assert_eq!(json, serde_json::json!({"city": "Beirut", "page": 2}));
    }
}
