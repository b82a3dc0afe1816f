use std::collections::HashMap;

use crate::{
    command::{
        args::{FetchAccountArgs, FetchAccountsArgs, NoArgs},
        names,
    },
    domain::{AccountId, Balance, BalanceStatistics},
    hub::Hub,
    mutation::{Mutation, MutationDescriptor, mutation},
    notify::messages,
    query::{QuerySpec, keys},
};

/// Balance of one account as last stored by the backend
pub fn balance_query(hub: &Hub, id: &AccountId) -> QuerySpec<Balance> {
    hub.command_query(
        keys::accounts::balance(id),
        names::FETCH_ACCOUNT_BALANCE,
        &FetchAccountArgs {
            account_id: id.clone(),
            force_refresh: false,
        },
    )
}

pub fn statistics_query(hub: &Hub) -> QuerySpec<BalanceStatistics> {
    hub.command_query(
        keys::balance_statistics(),
        names::GET_BALANCE_STATISTICS,
        &NoArgs {},
    )
}

/// Fetch a balance from the provider. The result is written straight into the
/// account's balance slot; lists and the aggregate are invalidated.
pub fn refresh(hub: &Hub) -> Mutation<FetchAccountArgs, Balance> {
    mutation(
        hub,
        MutationDescriptor::new(names::FETCH_ACCOUNT_BALANCE)
            .invalidate_with(|inv, args: &FetchAccountArgs, balance: &Balance| {
                inv.invalidate_all_accounts();
                if let Err(e) = inv
                    .queries()
                    .set_query_data(&keys::accounts::balance(&args.account_id), balance)
                {
                    tracing::warn!(error = %e, "could not store refreshed balance");
                }
            })
            .success_message(messages::BALANCE_REFRESHED)
            .error_message(messages::BALANCE_REFRESH_FAILED)
            .log_prefix("refresh balance"),
    )
}

/// Batch variant of [`refresh`]. Accounts the backend could not reach come back as `None`
/// and keep whatever was cached for them.
pub fn refresh_many(hub: &Hub) -> Mutation<FetchAccountsArgs, HashMap<AccountId, Option<Balance>>> {
    mutation(
        hub,
        MutationDescriptor::new(names::FETCH_ACCOUNTS_BALANCES)
            .invalidate_with(
                |inv, _, balances: &HashMap<AccountId, Option<Balance>>| {
                    inv.invalidate_all_accounts();
                    for (id, balance) in balances {
                        let Some(balance) = balance else { continue };
                        if let Err(e) = inv
                            .queries()
                            .set_query_data(&keys::accounts::balance(id), balance)
                        {
                            tracing::warn!(account = %id, error = %e, "could not store refreshed balance");
                        }
                    }
                },
            )
            .success_message(messages::BALANCE_REFRESHED)
            .error_message(messages::BALANCE_REFRESH_FAILED)
            .log_prefix("refresh balances"),
    )
}
