//! Form submissions end to end against the mock backend
//!
//! Run with: cargo test --test workflows_test

mod common;

use std::sync::Arc;

use bankportal_core::adapters::mock_backend::{MockBackend, MockResponse};
use bankportal_core::adapters::{ApiClient, BackendIdentityScanner, GraphQlClient};
use bankportal_core::domain::{CreateTransaction, CreateUser, DepositWithdraw, IdentityDocument, UpdateUser};
use bankportal_core::services::{AccountApi, AuthApi, ContactApi, DebitCardApi, TransactionApi, UserApi};
use bankportal_core::state::{ContactSlice, Severity, UserAdminSlice};
use bankportal_core::workflows::{self, cards::CardForm, funds::FundsAction};
use rust_decimal::Decimal;
use serde_json::json;

use common::{client_for, scan_json, user_json};

fn id_card() -> IdentityDocument {
    IdentityDocument::new("image/png", vec![0x89, 0x50, 0x4e, 0x47])
}

fn transfer_apis(client: &Arc<ApiClient>) -> (AuthApi, BackendIdentityScanner, TransactionApi) {
    (
        AuthApi::new(Arc::clone(client)),
        BackendIdentityScanner::new(Arc::clone(client)),
        TransactionApi::new(Arc::clone(client)),
    )
}

// ============================================================================
// Deposit / withdraw
// ============================================================================

#[test]
fn test_deposit_rejects_non_positive_amount_without_request() {
    let server = MockBackend::start().unwrap();
    let (client, _, _) = client_for(&server);
    let api = AccountApi::new(client);

    for amount in [Decimal::ZERO, Decimal::new(-500, 2)] {
        let outcome = workflows::funds::submit(&api, FundsAction::Deposit, &DepositWithdraw::new(1001, amount));
        assert!(!outcome.is_success());
        assert_eq!(outcome.alert.severity, Severity::Error);
    }
    assert_eq!(server.request_count(), 0);
}

#[test]
fn test_withdraw_success() {
    let server = MockBackend::start().unwrap();
    server.route(
        "PUT",
        "/accounts/withdrawMoney",
        MockResponse::ok(json!({ "modifiedAcc": { "accountNb": 1001, "accountBalance": 75.5 } })),
    );
    let (client, _, _) = client_for(&server);

    let outcome = workflows::funds::submit(
        &AccountApi::new(client),
        FundsAction::Withdraw,
        &DepositWithdraw::new(1001, Decimal::new(2450, 2)),
    );

    assert!(outcome.is_success());
    assert_eq!(outcome.alert.messages, vec!["Money withdrawn successfully!".to_string()]);
    let body = server.requests_to("PUT", "/accounts/withdrawMoney")[0].json();
    assert_eq!(body["accountNb"], 1001);
    assert_eq!(body["amount"], 24.5);
}

#[test]
fn test_deposit_failure_shows_backend_message() {
    let server = MockBackend::start().unwrap();
    server.route(
        "PUT",
        "/accounts/depositMoney",
        MockResponse::json(404, json!({ "message": "Account not found" })),
    );
    let (client, _, _) = client_for(&server);

    let outcome = workflows::funds::submit(
        &AccountApi::new(client),
        FundsAction::Deposit,
        &DepositWithdraw::new(9999, Decimal::TEN),
    );

    assert_eq!(outcome.alert.severity, Severity::Error);
    assert_eq!(outcome.alert.messages, vec!["Account not found".to_string()]);
}

// ============================================================================
// Verified transfer
// ============================================================================

#[test]
fn test_transfer_without_document_makes_no_request() {
    let server = MockBackend::start().unwrap();
    let (client, _, _) = client_for(&server);
    let (auth, scanner, transactions) = transfer_apis(&client);

    let tx = CreateTransaction::new(1001, 2002, Decimal::new(5000, 2));
    let outcome = workflows::transfer::send(&auth, &scanner, &transactions, tx, None);

    assert_eq!(outcome.alert.messages, vec![workflows::transfer::MISSING_DOCUMENT.to_string()]);
    assert_eq!(server.request_count(), 0);
}

#[test]
fn test_transfer_scans_identity_then_sends() {
    let server = MockBackend::start().unwrap();
    server
        .route("GET", "/auth/me", MockResponse::ok(json!({ "data": { "user": user_json("User") } })))
        .route("POST", "/identity/scan", MockResponse::ok(scan_json("LB1234567", "Lebanon")))
        .route("POST", "/transactions/create", MockResponse::ok(json!({ "message": "created" })));
    let (client, _, _) = client_for(&server);
    let (auth, scanner, transactions) = transfer_apis(&client);

    let tx = CreateTransaction::new(1001, 2002, Decimal::new(5000, 2)).with_message("rent");
    let outcome = workflows::transfer::send(&auth, &scanner, &transactions, tx, Some(&id_card()));

    assert!(outcome.is_success(), "{:?}", outcome.alert);
    assert_eq!(
        outcome.alert.messages,
        vec!["Transaction verified and sent successfully!".to_string()]
    );

    let order: Vec<String> = server.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(order, vec!["/auth/me", "/identity/scan", "/transactions/create"]);

    let scan = server.requests_to("POST", "/identity/scan")[0].json();
    assert_eq!(scan["country"], "LB");
    assert!(scan["document"].as_str().unwrap().starts_with("data:image/png;base64,"));

    let sent = server.requests_to("POST", "/transactions/create")[0].json();
    assert_eq!(sent["documentNumber"], "LB1234567");
    assert_eq!(sent["countryFull"], "Lebanon");
    assert_eq!(sent["message"], "rent");
}

#[test]
fn test_transfer_unreadable_document_is_not_sent() {
    let server = MockBackend::start().unwrap();
    server
        .route("GET", "/auth/me", MockResponse::ok(json!({ "data": { "user": user_json("User") } })))
        .route("POST", "/identity/scan", MockResponse::ok(json!({ "data": {} })));
    let (client, _, _) = client_for(&server);
    let (auth, scanner, transactions) = transfer_apis(&client);

    let tx = CreateTransaction::new(1001, 2002, Decimal::ONE);
    let outcome = workflows::transfer::send(&auth, &scanner, &transactions, tx, Some(&id_card()));

    assert!(!outcome.is_success());
    assert_eq!(
        outcome.alert.messages,
        vec!["Failed to extract user details from national ID Image.".to_string()]
    );
    assert!(server.requests_to("POST", "/transactions/create").is_empty());
}

// ============================================================================
// User administration
// ============================================================================

fn new_user() -> CreateUser {
    CreateUser {
        username: "sam".into(),
        email: "sam@example.com".into(),
        password: "Str0ng#Pass".into(),
        first_name: "Sam".into(),
        last_name: "Haddad".into(),
        dob: "1988-11-30".into(),
        phone_number: "+96171000000".into(),
        country: "LB".into(),
        city: "Tripoli".into(),
        ..CreateUser::default()
    }
}

#[test]
fn test_create_user_requires_document_and_country() {
    let server = MockBackend::start().unwrap();
    let (client, _, _) = client_for(&server);
    let scanner = BackendIdentityScanner::new(Arc::clone(&client));
    let users = UserApi::new(client);

    let outcome = workflows::users::create(&scanner, &users, new_user(), None);
    assert_eq!(outcome.alert.messages, vec!["Please upload a National ID image.".to_string()]);

    let no_country = CreateUser {
        country: String::new(),
        ..new_user()
    };
    let outcome = workflows::users::create(&scanner, &users, no_country, Some(&id_card()));
    assert_eq!(
        outcome.alert.messages,
        vec!["Please select a country before uploading ID.".to_string()]
    );

    assert_eq!(server.request_count(), 0);
}

#[test]
fn test_create_user_attaches_scanned_identity() {
    let server = MockBackend::start().unwrap();
    server
        .route("POST", "/identity/scan", MockResponse::ok(scan_json("RL998877", "Lebanon")))
        .route("POST", "/users/create", MockResponse::ok(json!({ "data": { "username": "sam" } })));
    let (client, _, _) = client_for(&server);
    let scanner = BackendIdentityScanner::new(Arc::clone(&client));

    let outcome = workflows::users::create(&scanner, &UserApi::new(client), new_user(), Some(&id_card()));

    assert!(outcome.is_success());
    let body = server.requests_to("POST", "/users/create")[0].json();
    assert_eq!(body["documentNumber"], "RL998877");
    assert_eq!(body["countryFull"], "Lebanon");
}

#[test]
fn test_update_user_with_nothing_to_change_is_skipped() {
    let server = MockBackend::start().unwrap();
    let (client, _, _) = client_for(&server);
    let mut slice = UserAdminSlice::default();

    let form = UpdateUser {
        username: "sam".into(),
        city: Some("   ".into()),
        ..UpdateUser::default()
    };
    let outcome = workflows::users::update(&mut slice, &UserApi::new(client), form);

    assert_eq!(outcome.alert.severity, Severity::Info);
    assert_eq!(server.request_count(), 0);
}

#[test]
fn test_update_user_sends_trimmed_fields_only() {
    let server = MockBackend::start().unwrap();
    server.route("PUT", "/users/update", MockResponse::ok(json!({ "message": "updated" })));
    let (client, _, _) = client_for(&server);
    let mut slice = UserAdminSlice::default();

    let form = UpdateUser {
        username: "sam".into(),
        city: Some(" Byblos ".into()),
        email: Some(String::new()),
        ..UpdateUser::default()
    };
    let outcome = workflows::users::update(&mut slice, &UserApi::new(client), form);

    assert!(outcome.is_success());
    let body = server.requests_to("PUT", "/users/update")[0].json();
    assert_eq!(body, json!({ "username": "sam", "city": "Byblos" }));
}

#[test]
fn test_delete_user_reports_backend_error() {
    let server = MockBackend::start().unwrap();
    server.route(
        "DELETE",
        "/users/delete/sam",
        MockResponse::json(409, json!({ "message": "User still owns accounts" })),
    );
    let (client, _, _) = client_for(&server);
    let mut slice = UserAdminSlice::default();

    let outcome = workflows::users::delete(&mut slice, &UserApi::new(client), "sam");

    assert_eq!(outcome.alert.messages, vec!["User still owns accounts".to_string()]);
    assert_eq!(slice.request.error.as_deref(), Some("User still owns accounts"));
}

#[test]
fn test_filtered_users_fill_in_paging_defaults() {
    let server = MockBackend::start().unwrap();
    server.route(
        "GET",
        "/users/getFilteredUsers",
        MockResponse::ok(json!({ "data": { "users": [user_json("User")], "total": 1 } })),
    );
    let (client, _, _) = client_for(&server);

    let filters = bankportal_core::domain::UserFilters {
        city: Some("Beirut".into()),
        email: Some(String::new()),
        ..Default::default()
    };
    let page = UserApi::new(client).filtered(&filters).unwrap();

    assert_eq!(page.users.len(), 1);
    assert_eq!((page.page, page.limit, page.total_pages), (1, 10, 1));

    let request = &server.requests_to("GET", "/users/getFilteredUsers")[0];
    assert_eq!(request.query_param("city").as_deref(), Some("Beirut"));
    assert_eq!(request.query_param("email"), None);
}

// ============================================================================
// Debit cards and contact (GraphQL)
// ============================================================================

#[test]
fn test_card_delete_not_deleted_is_error() {
    let server = MockBackend::start().unwrap();
    server.graphql(
        "deleteDebitCard",
        MockResponse::ok(json!({
            "data": { "deleteDebitCard": { "message": "Card not found", "deleted": false } }
        })),
    );
    let (client, _, _) = client_for(&server);
    let cards = DebitCardApi::new(GraphQlClient::new(client));

    let outcome = workflows::cards::delete(&cards, "jane", "1001");

    assert_eq!(outcome.alert.severity, Severity::Error);
    assert_eq!(outcome.alert.messages, vec!["Card not found".to_string()]);
}

#[test]
fn test_card_create_with_bad_account_number_makes_no_request() {
    let server = MockBackend::start().unwrap();
    let (client, _, _) = client_for(&server);
    let cards = DebitCardApi::new(GraphQlClient::new(client));

    let form = CardForm {
        username: "jane".into(),
        account_nb: "abc".into(),
        card_expiration_date: "3".into(),
    };
    let outcome = workflows::cards::create(&cards, &form);

    assert_eq!(outcome.alert.messages, vec![workflows::cards::INVALID_ACCOUNT.to_string()]);
    assert_eq!(server.request_count(), 0);
}

#[test]
fn test_card_create_sends_expanded_expiration() {
    let server = MockBackend::start().unwrap();
    server.graphql(
        "createDebitCard",
        MockResponse::ok(json!({
            "data": { "createDebitCard": {
                "message": "created",
                "data": {
                    "username": "jane",
                    "accountNb": 1001,
                    "expirationDate": "2029-10-18",
                    "cardStatus": "Active"
                }
            } }
        })),
    );
    let (client, _, _) = client_for(&server);
    let cards = DebitCardApi::new(GraphQlClient::new(client));

    let form = CardForm {
        username: "jane".into(),
        account_nb: "1001".into(),
        card_expiration_date: "3".into(),
    };
    let outcome = workflows::cards::create(&cards, &form);

    assert!(outcome.is_success());
    let body = server.requests_to("POST", "/graphql")[0].json();
    assert_eq!(body["variables"]["data"]["cardExpirationDate"], "3 years");
    assert_eq!(body["variables"]["data"]["accountNb"], 1001);
}

#[test]
fn test_contact_send_resets_form() {
    let server = MockBackend::start().unwrap();
    server.graphql(
        "sendMessage",
        MockResponse::ok(json!({
            "data": { "sendMessage": { "message": "Message sent", "data": null } }
        })),
    );
    let (client, _, _) = client_for(&server);
    let api = ContactApi::new(GraphQlClient::new(client));

    let mut slice = ContactSlice::default();
    let outcome = workflows::contact::send(&mut slice, &api);
    assert_eq!(outcome.alert.severity, Severity::Warning);
    assert_eq!(server.request_count(), 0);

    slice.set_subject("Card");
    slice.set_message("My card is blocked");
    let outcome = workflows::contact::send(&mut slice, &api);

    assert!(outcome.is_success());
    assert!(slice.subject.is_empty() && slice.message.is_empty());
}
