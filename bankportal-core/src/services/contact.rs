//! Contact messages (GraphQL)

use serde_json::json;

use super::log_failure;
use crate::adapters::GraphQlClient;
use crate::domain::result::Result;
use crate::domain::{MessageFilters, MessagePage, NewContactMessage, SentMessage};

const USERS_MESSAGES: &str = r#"
query GetUsersMessages(
  $username: String
  $firstName: String
  $lastName: String
  $phoneNumber: String
  $country: String
  $city: String
  $page: Int
  $limit: Int
) {
  getUsersMessages(
    filters: {
      username: $username
      firstName: $firstName
      lastName: $lastName
      phoneNumber: $phoneNumber
      country: $country
      city: $city
      page: $page
      limit: $limit
    }
  ) {
    messages { username firstName lastName phoneNumber country city subject message createdAt }
    total
    page
    limit
    totalPages
  }
}"#;

const SEND_MESSAGE: &str = r#"
mutation SendMessage($subject: String!, $message: String!) {
  sendMessage(data: { subject: $subject, message: $message }) {
    message
    data { subject message createdAt }
  }
}"#;

pub struct ContactApi {
    graphql: GraphQlClient,
}

impl ContactApi {
    pub fn new(graphql: GraphQlClient) -> Self {
        Self { graphql }
    }

    /// Admin view of contact messages
    pub fn list(&self, filters: &MessageFilters) -> Result<MessagePage> {
        self.graphql
            .query(USERS_MESSAGES, serde_json::to_value(filters)?, "getUsersMessages")
            .inspect_err(log_failure("fetching user messages"))
    }

    pub fn send(&self, message: &NewContactMessage) -> Result<SentMessage> {
        self.graphql
            .query(
                SEND_MESSAGE,
                json!({ "subject": message.subject, "message": message.message }),
                "sendMessage",
            )
            .inspect_err(log_failure("sending message"))
    }
}
