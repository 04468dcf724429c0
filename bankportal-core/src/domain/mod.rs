//! Core domain entities
//!
//! Wire types exchanged with the backend, plus the validation rules the
//! client applies before sending them. No I/O here.

mod account;
mod contact;
pub mod debit_card;
pub mod identity;
pub mod result;
mod transaction;
mod user;
pub mod validation;

pub use account::{
    AccountForm, AccountInfo, AccountNb, AccountType, AccountTypeBreakdown,
    AccountTypePercentage, DepositWithdraw,
};
pub use contact::{
    ContactMessage, MessageFilters, MessagePage, NewContactMessage, SentMessage, SentMessageData,
};
pub use debit_card::{DebitCard, DebitCardDeletion, DebitCardInput, DebitCardMutation, DeleteDebitCard};
pub use identity::{IdentityDocument, ScannedIdentity};
pub use transaction::{CreateTransaction, TransactionData, TransactionValueOverTime};
pub use user::{
    CreateUser, DeleteUser, LoginPayload, PasswordReset, Role, UpdateUser, User, UserFilters,
    UserPage,
};
