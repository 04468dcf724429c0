//! Contact form slice

use super::RequestState;
use crate::domain::result::Result;
use crate::domain::{NewContactMessage, SentMessage};
use crate::services::ContactApi;

#[derive(Debug, Clone, Default)]
pub struct ContactSlice {
    pub subject: String,
    pub message: String,
    pub request: RequestState,
}

impl ContactSlice {
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn reset_form(&mut self) {
        self.subject.clear();
        self.message.clear();
    }

    /// The form as a message body
    pub fn draft(&self) -> NewContactMessage {
        NewContactMessage {
            subject: self.subject.clone(),
            message: self.message.clone(),
        }
    }

    /// Submit is only possible with a subject and a non-blank message
    pub fn can_submit(&self) -> bool {
        self.draft().is_complete()
    }

    pub fn send(&mut self, api: &ContactApi) -> Result<SentMessage> {
        let draft = self.draft();
        self.request.track("Failed to send message", || api.send(&draft))
    }
}
