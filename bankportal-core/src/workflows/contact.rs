//! Contact form (user)

use super::Outcome;
use crate::domain::SentMessage;
use crate::services::ContactApi;
use crate::state::{Alert, ContactSlice};

pub fn send(slice: &mut ContactSlice, api: &ContactApi) -> Outcome<SentMessage> {
    if !slice.can_submit() {
        return Outcome::rejected(Alert::warning("Please choose a subject and write a message."));
    }
    match slice.send(api) {
        Ok(sent) => {
            slice.reset_form();
            Outcome::done(sent, Alert::success("Message sent successfully!"))
        }
        Err(_) => Outcome::rejected(Alert::error("Failed to send message")),
    }
}
