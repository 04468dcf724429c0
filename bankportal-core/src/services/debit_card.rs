//! Debit card operations (GraphQL)

use serde::Deserialize;
use serde_json::json;

use super::log_failure;
use crate::adapters::GraphQlClient;
use crate::domain::result::Result;
use crate::domain::{DebitCard, DebitCardDeletion, DebitCardInput, DebitCardMutation, DeleteDebitCard};

const USER_DEBIT_CARDS: &str = r#"
query {
  getUserDebitCards {
    userDebitCards { username accountNb expirationDate cardStatus }
    message
  }
}"#;

const CREATE_DEBIT_CARD: &str = r#"
mutation ($data: CreateDebitCardInput!) {
  createDebitCard(data: $data) {
    message
    data { username accountNb expirationDate cardStatus }
  }
}"#;

const UPDATE_DEBIT_CARD: &str = r#"
mutation ($data: UpdateDebitCardInput!) {
  updateDebitCard(data: $data) {
    message
    data { username accountNb expirationDate cardStatus }
  }
}"#;

const DELETE_DEBIT_CARD: &str = r#"
mutation ($data: DeleteDebitCardInput!) {
  deleteDebitCard(data: $data) {
    message
    deleted
  }
}"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDebitCards {
    #[serde(default)]
    user_debit_cards: Option<Vec<DebitCard>>,
}

pub struct DebitCardApi {
    graphql: GraphQlClient,
}

impl DebitCardApi {
    pub fn new(graphql: GraphQlClient) -> Self {
        Self { graphql }
    }

    /// Cards of the signed-in user
    pub fn list(&self) -> Result<Vec<DebitCard>> {
        let cards: UserDebitCards = self
            .graphql
            .query(USER_DEBIT_CARDS, json!({}), "getUserDebitCards")
            .inspect_err(log_failure("fetching user debit cards"))?;
        Ok(cards.user_debit_cards.unwrap_or_default())
    }

    pub fn create(&self, input: &DebitCardInput) -> Result<DebitCardMutation> {
        self.graphql
            .query(CREATE_DEBIT_CARD, json!({ "data": input }), "createDebitCard")
            .inspect_err(log_failure("creating debit card"))
    }

    pub fn update(&self, input: &DebitCardInput) -> Result<DebitCardMutation> {
        self.graphql
            .query(UPDATE_DEBIT_CARD, json!({ "data": input }), "updateDebitCard")
            .inspect_err(log_failure("updating debit card"))
    }

    pub fn delete(&self, input: &DeleteDebitCard) -> Result<DebitCardDeletion> {
        self.graphql
            .query(DELETE_DEBIT_CARD, json!({ "data": input }), "deleteDebitCard")
            .inspect_err(log_failure("deleting debit card"))
    }
}
