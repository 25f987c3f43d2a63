// Copyright (c) 2025 Hisab.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Core ledger error taxonomy. Everything here is recoverable: the caller
/// reverts any optimistic in-memory change and surfaces the message.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown currency code '{0}'")]
    UnknownCurrency(String),

    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    #[error("goal '{0}' is a fixed deposit; clear the lock by editing the goal before withdrawing")]
    FixedDepositLocked(String),

    #[error("no goal '{0}'")]
    GoalNotFound(String),

    #[error("no transaction with id '{0}'")]
    TransactionNotFound(String),

    #[error("cannot delete the last remaining profile")]
    LastProfile,

    #[error("sync failed, local change rolled back: {0}")]
    RemoteSync(String),
}
