//! Deposit and withdraw (admin)

use serde_json::Value as JsonValue;

use super::Outcome;
use crate::domain::DepositWithdraw;
use crate::services::AccountApi;
use crate::state::Alert;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundsAction {
    Deposit,
    Withdraw,
}

impl FundsAction {
    fn success_message(&self) -> &'static str {
        match self {
            FundsAction::Deposit => "Money deposited successfully!",
            FundsAction::Withdraw => "Money withdrawn successfully!",
        }
    }

    fn fallback(&self) -> &'static str {
        match self {
            FundsAction::Deposit => "Deposit failed. Try again.",
            FundsAction::Withdraw => "Withdrawal failed. Try again.",
        }
    }
}

/// Move money in or out of an account; returns the modified account
pub fn submit(api: &AccountApi, action: FundsAction, request: &DepositWithdraw) -> Outcome<JsonValue> {
    if let Err(msg) = request.validate() {
        return Outcome::rejected(Alert::error(msg));
    }

    let result = match action {
        FundsAction::Deposit => api.deposit(request),
        FundsAction::Withdraw => api.withdraw(request),
    };
    match result {
        Ok(account) => Outcome::done(account, Alert::success(action.success_message())),
        Err(e) => Outcome::failed(&e, action.fallback()),
    }
}
